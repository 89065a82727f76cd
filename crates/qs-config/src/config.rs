use crate::{
    ApiConfig, CONFIG_FILENAME, ConfigError, ConfigErrorResult, DEFAULT_CONFIG_DIR, LoggingConfig,
    SessionConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub session: SessionConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load config.
    ///
    /// Loading order:
    /// 1. Check for QS_CONFIG_DIR env var, else use ./.qualitas/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply QS_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: QS_CONFIG_DIR env var > ./.qualitas/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var("QS_CONFIG_DIR") {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(DEFAULT_CONFIG_DIR))
    }

    /// Validate all configuration.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.api.validate()?;
        self.session.validate()?;
        Ok(())
    }

    /// Log configuration summary. Credentials never live here, so nothing is masked.
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!(
            "  api: {} (tenant: {}, timeout {}s)",
            self.api.base_url,
            self.api.tenant.as_deref().unwrap_or("none"),
            self.api.timeout_secs
        );
        info!(
            "  session: storage={}, forbidden_cooldown={}ms",
            self.session.storage_dir.as_deref().unwrap_or("<runtime dir>"),
            self.session.forbidden_cooldown_ms
        );
        info!(
            "  logging: {} (colored: {}, file: {})",
            *self.logging.level,
            self.logging.colored,
            self.logging.file.as_deref().unwrap_or("stdout")
        );
    }

    fn apply_env_overrides(&mut self) {
        // Api
        Self::apply_env_string("QS_API_BASE_URL", &mut self.api.base_url);
        Self::apply_env_option_string("QS_API_TENANT", &mut self.api.tenant);
        Self::apply_env_parse("QS_API_TIMEOUT_SECS", &mut self.api.timeout_secs);

        // Session
        Self::apply_env_option_string("QS_SESSION_STORAGE_DIR", &mut self.session.storage_dir);
        Self::apply_env_parse(
            "QS_SESSION_FORBIDDEN_COOLDOWN_MS",
            &mut self.session.forbidden_cooldown_ms,
        );

        // Logging
        Self::apply_env_parse("QS_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("QS_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("QS_LOG_FILE", &mut self.logging.file);
    }

    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Accepts "true"/"1"
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}
