//! # Navigation Controller
//!
//! Keeps the page stack and the location history in step with whatever slot
//! the display system decides to focus next.
//!
//! The display system never says *why* a slot gained focus. The controller
//! infers it from the current stack:
//!
//! ```text
//! focus(slot) ──▶ app changed?        ──yes──▶ clear stack + history
//!                 slot != top slot?   ──yes──▶ pop one page, re-show new top
//!                 stack empty?        ──yes──▶ push root on this slot
//!                 slot == top slot?   ──yes──▶ bind + show top
//! ```
//!
//! Each focus event pops at most one page; the display system sends one
//! event per step back.
//!
//! Slots are reused cyclically: the page at depth `d` lands on
//! `pool[d % pool.len()]` unless the caller asks for a specific slot.

use log::{debug, info, warn};
use serde::Serialize;
use std::fmt;

use super::event::{FocusEvent, FocusQueue};
use super::history::LocationHistory;
use super::page::Page;
use crate::display::{PageContext, PageFactory, Slot, SlotId};
use crate::media::{AppId, Location, Marker, MediaItem, MediaSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavError {
    /// A navigation call arrived before `bind`.
    NotBound,
    /// `bind` was called a second time.
    AlreadyBound,
    /// `bind` was given no slots.
    EmptyPool,
}

impl fmt::Display for NavError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavError::NotBound => write!(f, "controller used before bind"),
            NavError::AlreadyBound => write!(f, "controller already bound to a slot pool"),
            NavError::EmptyPool => write!(f, "slot pool is empty"),
        }
    }
}

impl std::error::Error for NavError {}

/// Serializable view of one stacked page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageSnapshot {
    pub slot: SlotId,
    pub location: Location,
    pub previously_selected: Option<Marker>,
    pub shown: bool,
}

/// Serializable view of the whole navigation state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavSnapshot {
    pub depth: usize,
    pub top_slot: Option<SlotId>,
    pub pages: Vec<PageSnapshot>,
    pub history: LocationHistory,
    pub last_app: Option<AppId>,
}

pub struct NavigationController<M, F> {
    media: M,
    factory: F,
    pool: Vec<SlotId>,
    context: Option<PageContext>,
    queue: Option<FocusQueue>,
    stack: Vec<Page>,
    history: LocationHistory,
    last_app: Option<AppId>,
}

impl<M: MediaSource, F: PageFactory> NavigationController<M, F> {
    pub fn new(media: M, factory: F) -> Self {
        Self {
            media,
            factory,
            pool: Vec::new(),
            context: None,
            queue: None,
            stack: Vec::new(),
            history: LocationHistory::new(),
            last_app: None,
        }
    }

    /// Wires the controller to the slot pool. Every slot gets the shared
    /// setup and a notifier feeding this controller's focus queue.
    pub fn bind<S: Slot>(&mut self, slots: &mut [S], context: PageContext) -> Result<(), NavError> {
        if self.context.is_some() {
            return Err(NavError::AlreadyBound);
        }
        if slots.is_empty() {
            return Err(NavError::EmptyPool);
        }

        let (notifier, queue) = FocusQueue::channel();
        for slot in slots.iter_mut() {
            slot.setup(&context);
            slot.subscribe(notifier.clone());
        }
        self.pool = slots.iter().map(|slot| slot.id()).collect();
        self.context = Some(context);
        self.queue = Some(queue);
        info!(
            "Bound to {} slots (playback {}, input {})",
            self.pool.len(),
            context.playback,
            context.input
        );
        Ok(())
    }

    /// Drops every page but keeps the history, so re-entering browsing from
    /// the now-playing view starts at the root with old selections intact.
    pub fn reset_for_entry(&mut self) {
        info!("Resetting {} pages for browse entry", self.stack.len());
        self.detach_all();
        self.stack.clear();
    }

    /// Reconciles one focus change reported by the slot pool.
    ///
    /// Unknown slots are ignored. Before `bind` the pool is empty, so every
    /// event is ignored.
    pub fn on_focus_changed(&mut self, slot: SlotId, focused: bool) {
        let Some(context) = self.context else {
            warn!("Ignoring focus change for {slot}: controller not bound");
            return;
        };
        if !self.pool.contains(&slot) {
            warn!("Ignoring focus change for unknown {slot}");
            return;
        }
        debug!("Focus {} for {slot}", if focused { "gained" } else { "lost" });

        if focused {
            self.on_focused(slot, &context);
        } else {
            self.on_unfocused(slot);
        }
    }

    fn on_focused(&mut self, slot: SlotId, context: &PageContext) {
        let current_app = self.media.current_app();
        if self.last_app.is_some() && self.last_app != current_app {
            info!(
                "Active app changed from {:?} to {:?}, discarding navigation",
                self.last_app, current_app
            );
            self.detach_all();
            self.stack.clear();
            self.history.clear();
        }
        self.last_app = current_app;

        if self.stack.last().is_some_and(|top| top.slot() != slot) {
            // The display went back on its own (hardware back, timeout).
            if let Some(mut popped) = self.stack.pop() {
                debug!("Back to depth {}: popping {}", self.stack.len(), popped.location());
                popped.detach();
            }
            if let Some(top) = self.stack.last_mut() {
                top.activate(context);
            }
        }

        if self.stack.is_empty() {
            debug!("Stack empty, pushing root on {slot}");
            self.push_bound(Location::Root, Some(slot), context);
        }

        if let Some(top) = self.stack.last_mut()
            && top.slot() == slot
        {
            top.activate(context);
        }
    }

    fn on_unfocused(&mut self, slot: SlotId) {
        if let Some(top) = self.stack.last_mut()
            && top.slot() == slot
        {
            top.detach();
        }
    }

    /// Pushes a page for a directory the user opened.
    ///
    /// `requested_slot` wins when it belongs to the pool; otherwise the page
    /// goes to the slot the cyclic rule assigns to the new depth.
    pub fn push_page(
        &mut self,
        location: Location,
        requested_slot: Option<SlotId>,
    ) -> Result<&Page, NavError> {
        let context = self.context.ok_or(NavError::NotBound)?;
        Ok(self.push_bound(location, requested_slot, &context))
    }

    fn push_bound(
        &mut self,
        location: Location,
        requested_slot: Option<SlotId>,
        context: &PageContext,
    ) -> &Page {
        let depth = self.stack.len();
        let slot = requested_slot
            .filter(|id| self.pool.contains(id))
            .unwrap_or_else(|| self.slot_for_depth(depth));

        self.history.record(depth, Marker::from(&location));
        let hint = self.history.hint_for(depth).cloned();
        debug!(
            "Pushing {} at depth {} on {} (hint: {:?})",
            location, depth, slot, hint
        );

        // The display is leaving the old top, and its slot may be about to
        // be reused by the new page.
        if let Some(previous) = self.stack.last_mut() {
            previous.detach();
        }

        let content = self.factory.build(slot, &location, hint.as_ref());
        let mut page = Page::new(slot, location, hint, content);
        page.bind(context);
        self.stack.push(page);
        &self.stack[depth]
    }

    /// Records a terminal selection (a song) and hands it to the media
    /// source. Pushes no page.
    pub fn select_item(&mut self, item: &MediaItem) -> Result<(), NavError> {
        if self.context.is_none() {
            return Err(NavError::NotBound);
        }
        let depth = self.stack.len();
        debug!("Selecting {} at depth {}", item, depth);
        self.history.record(depth, Marker::Item(item.clone()));
        self.media.play(item);
        Ok(())
    }

    /// Reconciles every focus event already queued. Returns how many were
    /// processed.
    pub fn pump(&mut self) -> usize {
        let Some(mut queue) = self.queue.take() else {
            return 0;
        };
        let mut processed = 0;
        while let Some(FocusEvent { slot, focused }) = queue.try_next() {
            self.on_focus_changed(slot, focused);
            processed += 1;
        }
        self.queue = Some(queue);
        processed
    }

    /// Reconciles focus events as they arrive until every slot has dropped
    /// its notifier.
    pub async fn run(&mut self) -> Result<usize, NavError> {
        let mut queue = self.queue.take().ok_or(NavError::NotBound)?;
        let mut processed = 0;
        while let Some(FocusEvent { slot, focused }) = queue.next().await {
            self.on_focus_changed(slot, focused);
            processed += 1;
        }
        debug!("Focus queue closed after {processed} events");
        self.queue = Some(queue);
        Ok(processed)
    }

    fn slot_for_depth(&self, depth: usize) -> SlotId {
        self.pool[depth % self.pool.len()]
    }

    fn detach_all(&mut self) {
        for page in self.stack.iter_mut().rev() {
            page.detach();
        }
    }

    pub fn is_bound(&self) -> bool {
        self.context.is_some()
    }

    pub fn pool(&self) -> &[SlotId] {
        &self.pool
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn top(&self) -> Option<&Page> {
        self.stack.last()
    }

    pub fn pages(&self) -> &[Page] {
        &self.stack
    }

    pub fn history(&self) -> &LocationHistory {
        &self.history
    }

    pub fn last_app(&self) -> Option<&AppId> {
        self.last_app.as_ref()
    }

    pub fn media(&self) -> &M {
        &self.media
    }

    pub fn snapshot(&self) -> NavSnapshot {
        NavSnapshot {
            depth: self.stack.len(),
            top_slot: self.top().map(Page::slot),
            pages: self
                .stack
                .iter()
                .map(|page| PageSnapshot {
                    slot: page.slot(),
                    location: page.location().clone(),
                    previously_selected: page.previously_selected().cloned(),
                    shown: page.is_shown(),
                })
                .collect(),
            history: self.history.clone(),
            last_app: self.last_app.clone(),
        }
    }
}
