//! Pagestack library exports

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub mod core;
pub mod display;
pub mod media;
pub mod replay;

#[cfg(test)]
pub mod test_support;

/// How the replay binary prints snapshots.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
