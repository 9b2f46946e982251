//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use crate::display::{PageContext, SlotId};
use crate::media::MediaItem;
use crate::replay::ScriptedSlot;

pub use crate::replay::{ContentCall, RecordingContent, RecordingFactory, ScriptedMedia};

/// Playback view and input slot sit outside any test pool.
pub fn test_context() -> PageContext {
    PageContext {
        playback: SlotId(100),
        input: SlotId(101),
    }
}

pub fn slots(size: u32) -> Vec<ScriptedSlot> {
    ScriptedSlot::pool(size)
}

/// A directory (or song) whose title mirrors its id.
pub fn dir(id: &str) -> MediaItem {
    MediaItem::new(id, id)
}
