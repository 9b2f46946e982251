pub mod source;
pub mod types;

pub use source::MediaSource;
pub use types::{AppId, Location, Marker, MediaItem};
