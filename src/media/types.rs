use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies the media app currently feeding the browse UI.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct AppId(pub String);

impl AppId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A browsable directory or playable entry reported by the media source.
///
/// Equality covers every field: the same id with a different title is a
/// different selection as far as the location history is concerned.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MediaItem {
    pub id: String,
    #[serde(default)]
    pub title: String,
}

impl MediaItem {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

impl fmt::Display for MediaItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.title.is_empty() {
            f.write_str(&self.id)
        } else {
            write!(f, "{} ({})", self.title, self.id)
        }
    }
}

/// What a browse page lists: the root of the app, or one directory.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    Root,
    Directory(MediaItem),
}

impl Location {
    pub fn is_root(&self) -> bool {
        matches!(self, Location::Root)
    }

    pub fn directory(&self) -> Option<&MediaItem> {
        match self {
            Location::Root => None,
            Location::Directory(item) => Some(item),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Root => f.write_str("<root>"),
            Location::Directory(item) => item.fmt(f),
        }
    }
}

/// One entry of the location history: what was chosen at a given depth.
///
/// Directories browsed into and songs played both land here as `Item`;
/// `Root` only appears when a root page is pushed explicitly.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Marker {
    Root,
    Item(MediaItem),
}

impl Marker {
    pub fn item(&self) -> Option<&MediaItem> {
        match self {
            Marker::Root => None,
            Marker::Item(item) => Some(item),
        }
    }
}

impl From<&Location> for Marker {
    fn from(location: &Location) -> Self {
        match location {
            Location::Root => Marker::Root,
            Location::Directory(item) => Marker::Item(item.clone()),
        }
    }
}

impl From<MediaItem> for Marker {
    fn from(item: MediaItem) -> Self {
        Marker::Item(item)
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Marker::Root => f.write_str("<root>"),
            Marker::Item(item) => item.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_from_location() {
        let dir = MediaItem::new("albums", "Albums");
        assert_eq!(Marker::from(&Location::Root), Marker::Root);
        assert_eq!(
            Marker::from(&Location::Directory(dir.clone())),
            Marker::Item(dir)
        );
    }

    #[test]
    fn test_item_equality_includes_title() {
        assert_ne!(MediaItem::new("a", "One"), MediaItem::new("a", "Two"));
    }

    #[test]
    fn test_location_serde_shape() {
        let json = serde_json::to_string(&Location::Directory(MediaItem::new("x", "X"))).unwrap();
        assert_eq!(json, r#"{"directory":{"id":"x","title":"X"}}"#);
        let root: Location = serde_json::from_str(r#""root""#).unwrap();
        assert!(root.is_root());
    }

    #[test]
    fn test_display() {
        assert_eq!(Location::Root.to_string(), "<root>");
        assert_eq!(MediaItem::new("x", "").to_string(), "x");
        assert_eq!(Marker::Item(MediaItem::new("x", "X")).to_string(), "X (x)");
    }
}
