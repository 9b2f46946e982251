//! Scripted stand-ins for the display system and the media controller.
//!
//! They keep their state behind `Rc<RefCell<..>>` so a clone handed to the
//! controller and a clone kept by the caller observe the same calls.

use log::debug;
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;

use crate::core::event::FocusNotifier;
use crate::display::{PageContent, PageContext, PageFactory, Slot, SlotId};
use crate::media::{AppId, Location, Marker, MediaItem, MediaSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentCall {
    Init,
    Show,
    Hide,
}

/// Page content that only records the lifecycle calls it receives.
#[derive(Debug, Clone, Default)]
pub struct RecordingContent {
    calls: Rc<RefCell<Vec<ContentCall>>>,
}

impl RecordingContent {
    pub fn calls(&self) -> Vec<ContentCall> {
        self.calls.borrow().clone()
    }
}

impl PageContent for RecordingContent {
    fn init_content(&mut self, _context: &PageContext) {
        self.calls.borrow_mut().push(ContentCall::Init);
    }

    fn show(&mut self) {
        self.calls.borrow_mut().push(ContentCall::Show);
    }

    fn hide(&mut self) {
        self.calls.borrow_mut().push(ContentCall::Hide);
    }
}

/// A page the factory was asked to build, in build order.
#[derive(Debug, Clone)]
pub struct BuiltPage {
    pub slot: SlotId,
    pub location: Location,
    pub previously_selected: Option<Marker>,
    pub content: RecordingContent,
}

#[derive(Debug, Clone, Default)]
pub struct RecordingFactory {
    built: Rc<RefCell<Vec<BuiltPage>>>,
}

impl RecordingFactory {
    pub fn built(&self) -> Vec<BuiltPage> {
        self.built.borrow().clone()
    }

    /// Lifecycle calls received by the `index`-th built page.
    pub fn calls_for(&self, index: usize) -> Vec<ContentCall> {
        self.built
            .borrow()
            .get(index)
            .map(|page| page.content.calls())
            .unwrap_or_default()
    }

    pub fn hint_for(&self, index: usize) -> Option<Marker> {
        self.built
            .borrow()
            .get(index)
            .and_then(|page| page.previously_selected.clone())
    }
}

impl PageFactory for RecordingFactory {
    fn build(
        &mut self,
        slot: SlotId,
        location: &Location,
        previously_selected: Option<&Marker>,
    ) -> Box<dyn PageContent> {
        let content = RecordingContent::default();
        self.built.borrow_mut().push(BuiltPage {
            slot,
            location: location.clone(),
            previously_selected: previously_selected.cloned(),
            content: content.clone(),
        });
        Box::new(content)
    }
}

#[derive(Debug, Default)]
struct MediaState {
    app: Option<AppId>,
    played: Vec<MediaItem>,
}

/// Media source whose active app is set by the script.
#[derive(Debug, Clone, Default)]
pub struct ScriptedMedia {
    state: Rc<RefCell<MediaState>>,
}

impl ScriptedMedia {
    pub fn new(app: &str) -> Self {
        let media = Self::default();
        media.switch_app(Some(app));
        media
    }

    pub fn switch_app(&self, app: Option<&str>) {
        self.state.borrow_mut().app = app.map(AppId::new);
    }

    pub fn played(&self) -> Vec<MediaItem> {
        self.state.borrow().played.clone()
    }
}

impl MediaSource for ScriptedMedia {
    fn current_app(&self) -> Option<AppId> {
        self.state.borrow().app.clone()
    }

    fn play(&mut self, item: &MediaItem) {
        debug!("Playing {item}");
        self.state.borrow_mut().played.push(item.clone());
    }
}

/// A display slot the script can focus and blur.
#[derive(Debug)]
pub struct ScriptedSlot {
    id: SlotId,
    setup_count: usize,
    notifier: Option<FocusNotifier>,
}

impl ScriptedSlot {
    pub fn new(id: SlotId) -> Self {
        Self {
            id,
            setup_count: 0,
            notifier: None,
        }
    }

    /// Numbered pool `0..size`.
    pub fn pool(size: u32) -> Vec<ScriptedSlot> {
        (0..size).map(|n| ScriptedSlot::new(SlotId(n))).collect()
    }

    pub fn setup_count(&self) -> usize {
        self.setup_count
    }

    pub fn is_subscribed(&self) -> bool {
        self.notifier.is_some()
    }

    /// Reports a focus change, as the display system would.
    pub fn emit(&self, focused: bool) -> bool {
        match &self.notifier {
            Some(notifier) => notifier.notify(self.id, focused),
            None => false,
        }
    }
}

impl Slot for ScriptedSlot {
    fn id(&self) -> SlotId {
        self.id
    }

    fn setup(&mut self, _context: &PageContext) {
        self.setup_count += 1;
    }

    fn subscribe(&mut self, notifier: FocusNotifier) {
        self.notifier = Some(notifier);
    }
}
