//! # Browse Page
//!
//! One logical browse screen: a slot, the location it lists, and the entry
//! to pre-highlight. Wraps the external [`PageContent`] and tracks whether
//! it is currently bound and shown so the controller can re-confirm a page
//! as often as focus events demand without reloading it.

use log::debug;

use crate::display::{PageContent, PageContext, SlotId};
use crate::media::{Location, Marker};

pub struct Page {
    slot: SlotId,
    location: Location,
    previously_selected: Option<Marker>,
    content: Box<dyn PageContent>,
    bound: bool,
    shown: bool,
}

impl Page {
    pub(crate) fn new(
        slot: SlotId,
        location: Location,
        previously_selected: Option<Marker>,
        content: Box<dyn PageContent>,
    ) -> Self {
        Self {
            slot,
            location,
            previously_selected,
            content,
            bound: false,
            shown: false,
        }
    }

    pub fn slot(&self) -> SlotId {
        self.slot
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn previously_selected(&self) -> Option<&Marker> {
        self.previously_selected.as_ref()
    }

    pub fn is_bound(&self) -> bool {
        self.bound
    }

    pub fn is_shown(&self) -> bool {
        self.shown
    }

    /// Loads content into the slot unless it is already there.
    pub(crate) fn bind(&mut self, context: &PageContext) {
        if !self.bound {
            debug!("Binding {} to {}", self.location, self.slot);
            self.content.init_content(context);
            self.bound = true;
        }
    }

    /// Binds if needed, then shows if not already visible.
    pub(crate) fn activate(&mut self, context: &PageContext) {
        self.bind(context);
        if !self.shown {
            self.content.show();
            self.shown = true;
        }
    }

    /// Releases listeners. The next activation binds again, since another
    /// page may have taken over the slot in the meantime.
    pub(crate) fn detach(&mut self) {
        if self.bound || self.shown {
            debug!("Detaching {} from {}", self.location, self.slot);
            self.content.hide();
        }
        self.bound = false;
        self.shown = false;
    }
}

impl std::fmt::Debug for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page")
            .field("slot", &self.slot)
            .field("location", &self.location)
            .field("previously_selected", &self.previously_selected)
            .field("bound", &self.bound)
            .field("shown", &self.shown)
            .finish()
    }
}
