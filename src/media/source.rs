use super::types::{AppId, MediaItem};

/// The media controller behind the browse UI.
///
/// The navigation core only reads which app is active (to notice app
/// switches) and hands terminal selections over for playback.
pub trait MediaSource {
    /// The app currently feeding the browse UI, if any.
    fn current_app(&self) -> Option<AppId>;

    /// Starts playback of a selected item.
    fn play(&mut self, item: &MediaItem);
}
