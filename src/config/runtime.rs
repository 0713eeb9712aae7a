use super::ContentsConfig;

/// Environment variables that override the config file
pub const ENV_TRANSITIONS_ENABLED: &str = "CONTENTS_TRANSITIONS_ENABLED";
pub const ENV_TRANSITIONS_CAPACITY: &str = "CONTENTS_TRANSITIONS_CAPACITY";
pub const ENV_CONSOLE_FORWARD_TO_LOG: &str = "CONTENTS_CONSOLE_FORWARD_TO_LOG";
pub const ENV_REPLAY_BROWSER_ID: &str = "CONTENTS_REPLAY_BROWSER_ID";

impl ContentsConfig {
    /// Apply overrides from the process environment, ignoring unparsable values.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(v) = lookup(ENV_TRANSITIONS_ENABLED) {
            if let Ok(b) = v.parse::<bool>() {
                self.transitions.enabled = b;
            }
        }
        if let Some(v) = lookup(ENV_TRANSITIONS_CAPACITY) {
            if let Ok(n) = v.parse::<usize>() {
                self.transitions.capacity = n;
            }
        }
        if let Some(v) = lookup(ENV_CONSOLE_FORWARD_TO_LOG) {
            if let Ok(b) = v.parse::<bool>() {
                self.console.forward_to_log = b;
            }
        }
        if let Some(v) = lookup(ENV_REPLAY_BROWSER_ID) {
            if let Ok(n) = v.parse::<i32>() {
                self.replay.browser_id = n;
            }
        }

        self
    }
}
