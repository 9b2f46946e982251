//! # Focus Events
//!
//! Slots report focus changes through a [`FocusNotifier`]; the controller
//! drains them from the single [`FocusQueue`] in the order they were sent.
//!
//! The queue has exactly one consumer and is never read concurrently, so the
//! controller can reconcile each event to completion before looking at the
//! next one. Notifiers are cheap to clone; one is handed to every slot.

use log::warn;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::sync::mpsc::error::TryRecvError;

use crate::display::SlotId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusEvent {
    pub slot: SlotId,
    pub focused: bool,
}

impl FocusEvent {
    pub fn focused(slot: SlotId) -> Self {
        Self { slot, focused: true }
    }

    pub fn unfocused(slot: SlotId) -> Self {
        Self { slot, focused: false }
    }
}

/// Sending half handed to each slot.
#[derive(Debug, Clone)]
pub struct FocusNotifier {
    sender: UnboundedSender<FocusEvent>,
}

impl FocusNotifier {
    /// Queues a focus change. Returns `false` if the controller is gone.
    pub fn notify(&self, slot: SlotId, focused: bool) -> bool {
        match self.sender.send(FocusEvent { slot, focused }) {
            Ok(()) => true,
            Err(_) => {
                warn!("Dropped focus event for {slot}: controller no longer listening");
                false
            }
        }
    }
}

/// Receiving half, owned by the controller.
#[derive(Debug)]
pub struct FocusQueue {
    receiver: UnboundedReceiver<FocusEvent>,
}

impl FocusQueue {
    pub fn channel() -> (FocusNotifier, FocusQueue) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (FocusNotifier { sender }, FocusQueue { receiver })
    }

    /// Next queued event without waiting. `None` when the queue is empty
    /// or every notifier has been dropped.
    pub fn try_next(&mut self) -> Option<FocusEvent> {
        match self.receiver.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Waits for the next event. `None` once every notifier is dropped
    /// and the queue is drained.
    pub async fn next(&mut self) -> Option<FocusEvent> {
        self.receiver.recv().await
    }
}
