//! # Display System Seam
//!
//! The external display system owns a small, fixed pool of reusable slots and
//! only ever tells us "this slot gained focus" or "this slot lost focus".
//! Everything it renders goes through the traits in this module; the
//! navigation core never creates or destroys slots.
//!
//! ```text
//!   Slot pool (external)          PageFactory (external)
//!   ┌──────┬──────┬──────┐        builds one PageContent
//!   │  0   │  1   │  2   │        per pushed page
//!   └──┬───┴──┬───┴──┬───┘
//!      └──────┴──────┴── FocusNotifier ──▶ core::event::FocusQueue
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::event::FocusNotifier;
use crate::media::{Location, Marker};

/// Stable identifier of a display slot.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct SlotId(pub u32);

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "slot#{}", self.0)
    }
}

/// Shared wiring every page receives when it binds its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageContext {
    /// Slot showing the now-playing view, targeted when a song is chosen.
    pub playback: SlotId,
    /// Slot used for text entry (search, filtering).
    pub input: SlotId,
}

/// A reusable display handle from the external pool.
pub trait Slot {
    fn id(&self) -> SlotId;

    /// One-time setup shared by every browse slot (list columns, actions).
    fn setup(&mut self, context: &PageContext);

    /// Registers where focus changes for this slot must be delivered.
    fn subscribe(&mut self, notifier: FocusNotifier);
}

/// The content renderer bound to one page.
///
/// Implementations should tolerate repeated calls, although the page
/// adapter in `core::page` already collapses redundant ones.
pub trait PageContent {
    /// Loads the listing and attaches listeners.
    fn init_content(&mut self, context: &PageContext);

    fn show(&mut self);

    /// Stops listening and releases anything held for the slot.
    fn hide(&mut self);
}

/// Builds page content for a newly pushed page.
pub trait PageFactory {
    fn build(
        &mut self,
        slot: SlotId,
        location: &Location,
        previously_selected: Option<&Marker>,
    ) -> Box<dyn PageContent>;
}
