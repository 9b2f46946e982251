//! # Scenario Files
//!
//! A scenario is a TOML script of display and user events:
//!
//! ```toml
//! pool_size = 3
//! app = "radio"
//!
//! [[steps]]
//! action = "focus"
//! slot = 0
//!
//! [[steps]]
//! action = "push"
//! directory = { id = "albums", title = "Albums" }
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

use crate::media::MediaItem;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    /// The display system focused a slot.
    Focus { slot: u32 },
    /// The display system took focus away from a slot.
    Blur { slot: u32 },
    /// The user opened a directory; no directory means the root listing.
    Push {
        directory: Option<MediaItem>,
        slot: Option<u32>,
    },
    /// The user picked a playable item.
    Select { item: MediaItem },
    /// Browsing re-entered from the now-playing view.
    Reset,
    /// The media controller switched to another app (or to none).
    SwitchApp { app: Option<String> },
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Focus { slot } => write!(f, "focus slot#{slot}"),
            Step::Blur { slot } => write!(f, "blur slot#{slot}"),
            Step::Push { directory: None, .. } => write!(f, "push <root>"),
            Step::Push {
                directory: Some(dir),
                ..
            } => write!(f, "push {dir}"),
            Step::Select { item } => write!(f, "select {item}"),
            Step::Reset => write!(f, "reset"),
            Step::SwitchApp { app: Some(app) } => write!(f, "switch app {app}"),
            Step::SwitchApp { app: None } => write!(f, "switch app <none>"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Scenario {
    pub pool_size: Option<u32>,
    pub app: Option<String>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Debug)]
pub enum ScenarioError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl fmt::Display for ScenarioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScenarioError::Io(e) => write!(f, "scenario I/O error: {e}"),
            ScenarioError::Parse(e) => write!(f, "scenario parse error: {e}"),
            ScenarioError::Invalid(msg) => write!(f, "invalid scenario: {msg}"),
        }
    }
}

impl std::error::Error for ScenarioError {}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let contents = fs::read_to_string(path).map_err(ScenarioError::Io)?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self, ScenarioError> {
        let scenario: Scenario = toml::from_str(contents).map_err(ScenarioError::Parse)?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Rejects scripts no slot pool could run. Focus on slots outside the
    /// pool is allowed: the controller ignores it.
    pub fn validate(&self) -> Result<(), ScenarioError> {
        if self.pool_size == Some(0) {
            return Err(ScenarioError::Invalid("pool_size must be at least 1".into()));
        }
        Ok(())
    }
}
