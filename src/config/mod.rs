pub mod runtime;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Complete configuration for the delegate and the replay harness
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentsConfig {
    #[serde(default)]
    pub transitions: TransitionConfig,
    #[serde(default)]
    pub console: ConsoleConfig,
    #[serde(default)]
    pub replay: ReplayConfig,
}

/// State transition feed configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionConfig {
    /// Publish every state change on the broadcast feed
    #[serde(default = "default_transitions_enabled")]
    pub enabled: bool,
    /// Broadcast buffer size; slow receivers lag beyond this
    #[serde(default = "default_transitions_capacity")]
    pub capacity: usize,
}

fn default_transitions_enabled() -> bool {
    true
}

fn default_transitions_capacity() -> usize {
    256
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            enabled: default_transitions_enabled(),
            capacity: default_transitions_capacity(),
        }
    }
}

/// Console message handling
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// Mirror page console messages into the tracing log
    #[serde(default = "default_forward_to_log")]
    pub forward_to_log: bool,
}

fn default_forward_to_log() -> bool {
    true
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            forward_to_log: default_forward_to_log(),
        }
    }
}

/// Trace replay configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayConfig {
    #[serde(default = "default_browser_id")]
    pub browser_id: i32,
    /// Stop reading the trace once the contents report destruction
    #[serde(default = "default_halt_on_destroyed")]
    pub halt_on_destroyed: bool,
}

fn default_browser_id() -> i32 {
    1
}

fn default_halt_on_destroyed() -> bool {
    true
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            browser_id: default_browser_id(),
            halt_on_destroyed: default_halt_on_destroyed(),
        }
    }
}

/// Load configuration from TOML file
pub fn load_config(path: impl AsRef<Path>) -> Result<ContentsConfig> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config: ContentsConfig = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;
    Ok(config)
}
