//! # Replay
//!
//! Drives a [`NavigationController`] from a scripted [`Scenario`] using the
//! scripted collaborators, so navigation traces can be reproduced without a
//! real display system.
//!
//! Focus and blur steps travel the same road real slots use: the scripted
//! slot sends through its notifier, then the controller pumps its queue.
//! Slots `0..pool_size` form the pool; the playback view and the input slot
//! take the next two ids.

pub mod collaborators;
pub mod scenario;

use log::{debug, warn};

use crate::core::controller::{NavError, NavSnapshot, NavigationController};
use crate::display::{PageContext, Slot, SlotId};
use crate::media::{Location, Marker};

pub use collaborators::{
    BuiltPage, ContentCall, RecordingContent, RecordingFactory, ScriptedMedia, ScriptedSlot,
};
pub use scenario::{Scenario, ScenarioError, Step};

pub type ScriptedController = NavigationController<ScriptedMedia, RecordingFactory>;

pub struct Replay {
    controller: ScriptedController,
    slots: Vec<ScriptedSlot>,
    media: ScriptedMedia,
    factory: RecordingFactory,
}

impl Replay {
    pub fn new(pool_size: u32, app: Option<&str>) -> Result<Self, NavError> {
        let media = ScriptedMedia::default();
        media.switch_app(app);
        let factory = RecordingFactory::default();
        let mut controller = NavigationController::new(media.clone(), factory.clone());
        let mut slots = ScriptedSlot::pool(pool_size);
        let context = PageContext {
            playback: SlotId(pool_size),
            input: SlotId(pool_size + 1),
        };
        controller.bind(&mut slots, context)?;
        Ok(Self {
            controller,
            slots,
            media,
            factory,
        })
    }

    pub fn controller(&self) -> &ScriptedController {
        &self.controller
    }

    pub fn media(&self) -> &ScriptedMedia {
        &self.media
    }

    pub fn factory(&self) -> &RecordingFactory {
        &self.factory
    }

    pub fn apply(&mut self, step: &Step) -> Result<(), NavError> {
        debug!("Replaying step: {step}");
        match step {
            Step::Focus { slot } => self.emit(SlotId(*slot), true),
            Step::Blur { slot } => self.emit(SlotId(*slot), false),
            Step::Push { directory, slot } => {
                let location = match directory {
                    Some(dir) => Location::Directory(dir.clone()),
                    None => Location::Root,
                };
                self.controller.push_page(location, slot.map(SlotId))?;
            }
            Step::Select { item } => self.controller.select_item(item)?,
            Step::Reset => self.controller.reset_for_entry(),
            Step::SwitchApp { app } => self.media.switch_app(app.as_deref()),
        }
        Ok(())
    }

    /// Applies every step, reporting the state after each one.
    pub fn run<R>(&mut self, steps: &[Step], mut report: R) -> Result<NavSnapshot, NavError>
    where
        R: FnMut(usize, &Step, &NavSnapshot),
    {
        for (index, step) in steps.iter().enumerate() {
            self.apply(step)?;
            report(index, step, &self.controller.snapshot());
        }
        Ok(self.controller.snapshot())
    }

    fn emit(&mut self, slot: SlotId, focused: bool) {
        match self.slots.iter().find(|s| s.id() == slot) {
            Some(scripted) => {
                scripted.emit(focused);
                self.controller.pump();
            }
            None => {
                // Not part of the pool, so there is no notifier to go through.
                warn!("Scenario references {slot} outside the pool");
                self.controller.on_focus_changed(slot, focused);
            }
        }
    }
}

/// One-line, human-readable rendering of a snapshot.
pub fn render_text(snapshot: &NavSnapshot) -> String {
    let stack = if snapshot.pages.is_empty() {
        "(empty)".to_string()
    } else {
        snapshot
            .pages
            .iter()
            .map(|page| {
                let marker = if page.shown { "*" } else { "" };
                format!("{}@{}{}", page.location, page.slot, marker)
            })
            .collect::<Vec<_>>()
            .join(" > ")
    };
    let history = snapshot
        .history
        .entries()
        .iter()
        .map(Marker::to_string)
        .collect::<Vec<_>>()
        .join(" / ");
    format!(
        "depth={} stack=[{}] history=[{}]",
        snapshot.depth, stack, history
    )
}
