use crate::{ConfigError, ConfigErrorResult};

use std::time::Duration;

use serde::Deserialize;

pub const MAX_FORBIDDEN_COOLDOWN_MS: u64 = 60_000;
pub const DEFAULT_FORBIDDEN_COOLDOWN_MS: u64 = 1_000;

/// Session persistence and auth-failure handling.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Directory of the session storage scope. `None` uses the runtime dir.
    pub storage_dir: Option<String>,
    /// How long a 403 logout suppresses further logouts, in milliseconds
    pub forbidden_cooldown_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            storage_dir: None,
            forbidden_cooldown_ms: DEFAULT_FORBIDDEN_COOLDOWN_MS,
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.forbidden_cooldown_ms > MAX_FORBIDDEN_COOLDOWN_MS {
            return Err(ConfigError::session(format!(
                "session.forbidden_cooldown_ms must be 0-{}, got {}",
                MAX_FORBIDDEN_COOLDOWN_MS, self.forbidden_cooldown_ms
            )));
        }

        if let Some(dir) = &self.storage_dir
            && dir.trim().is_empty()
        {
            return Err(ConfigError::session(
                "session.storage_dir cannot be empty when set",
            ));
        }

        Ok(())
    }

    pub fn forbidden_cooldown(&self) -> Duration {
        Duration::from_millis(self.forbidden_cooldown_ms)
    }
}
