//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.pagestack/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{LevelFilter, debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::OutputFormat;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PagestackConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub replay: ReplayConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub log_level: Option<String>,
    pub log_file: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ReplayConfig {
    pub pool_size: Option<u32>,
    pub output: Option<OutputFormat>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Debug;
pub const DEFAULT_LOG_FILE: &str = "pagestack.log";
pub const DEFAULT_POOL_SIZE: u32 = 3;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub log_level: LevelFilter,
    pub log_file: PathBuf,
    pub pool_size: u32,
    pub output: OutputFormat,
}

/// Values given on the command line. `None` means "not specified".
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub log_level: Option<String>,
    pub pool_size: Option<u32>,
    pub output: Option<OutputFormat>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.pagestack/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".pagestack").join("config.toml"))
}

/// Load config from `~/.pagestack/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `PagestackConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<PagestackConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(PagestackConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(PagestackConfig::default());
    }

    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<PagestackConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: PagestackConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Pagestack Configuration
# All settings are optional — defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# log_level = "debug"                # "off", "error", "warn", "info", "debug", "trace"
# log_file = "pagestack.log"         # Or set PAGESTACK_LOG_FILE env var

# [replay]
# pool_size = 3                      # Slots in the scripted pool when a scenario sets none
# output = "text"                    # "text" or "json"
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &PagestackConfig, cli: &CliOverrides) -> ResolvedConfig {
    // Log level: CLI → env → config → default
    let log_level = cli
        .log_level
        .clone()
        .or_else(|| std::env::var("PAGESTACK_LOG_LEVEL").ok())
        .or_else(|| config.general.log_level.clone())
        .map(|level| parse_level(&level))
        .unwrap_or(DEFAULT_LOG_LEVEL);

    // Log file: env → config → default
    let log_file = std::env::var("PAGESTACK_LOG_FILE")
        .ok()
        .or_else(|| config.general.log_file.clone())
        .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());

    // Pool size: CLI → env → config → default
    let pool_size = cli
        .pool_size
        .or_else(|| {
            std::env::var("PAGESTACK_POOL_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
        })
        .or(config.replay.pool_size)
        .filter(|size| *size > 0)
        .unwrap_or(DEFAULT_POOL_SIZE);

    ResolvedConfig {
        log_level,
        log_file: PathBuf::from(log_file),
        pool_size,
        output: cli.output.or(config.replay.output).unwrap_or_default(),
    }
}

fn parse_level(level: &str) -> LevelFilter {
    LevelFilter::from_str(level).unwrap_or_else(|_| {
        warn!("Unknown log level {:?}, using {}", level, DEFAULT_LOG_LEVEL);
        DEFAULT_LOG_LEVEL
    })
}
