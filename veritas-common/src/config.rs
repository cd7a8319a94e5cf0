//! Configuration loading for the Veritas engine
//!
//! Resolution priority for the config file:
//! 1. Explicit path argument (highest priority)
//! 2. `VERITAS_CONFIG` environment variable
//! 3. Platform config directory (`~/.config/veritas/config.toml` on Linux)
//! 4. Compiled defaults (fallback)
//!
//! Individual fields may additionally be overridden via `VERITAS_*`
//! environment variables after the file is loaded.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Seconds between scheduling agent ticks
    pub agent_interval_secs: f64,
    /// Fixed pause after a failed tick before the next attempt
    pub tick_backoff_secs: f64,
    /// Maximum entries retained by the result log store
    pub log_capacity: usize,
    /// Language tag assigned to items that carry none
    pub language_default: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            agent_interval_secs: 5.0,
            tick_backoff_secs: 1.0,
            log_capacity: 100,
            language_default: "en".to_string(),
        }
    }
}

impl EngineConfig {
    /// Load configuration following the documented priority order
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let mut config = match resolve_config_path(explicit_path) {
            Some(path) => {
                info!("Loading config from {}", path.display());
                Self::from_file(&path)?
            }
            None => {
                info!("No config file found, using compiled defaults");
                Self::default()
            }
        };

        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))
    }

    /// Apply `VERITAS_*` environment variable overrides
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(v) = std::env::var("VERITAS_AGENT_INTERVAL_SECS") {
            self.agent_interval_secs = v.parse().map_err(|_| {
                Error::Config(format!("VERITAS_AGENT_INTERVAL_SECS is not a number: {v}"))
            })?;
        }
        if let Ok(v) = std::env::var("VERITAS_TICK_BACKOFF_SECS") {
            self.tick_backoff_secs = v.parse().map_err(|_| {
                Error::Config(format!("VERITAS_TICK_BACKOFF_SECS is not a number: {v}"))
            })?;
        }
        if let Ok(v) = std::env::var("VERITAS_LOG_CAPACITY") {
            self.log_capacity = v.parse().map_err(|_| {
                Error::Config(format!("VERITAS_LOG_CAPACITY is not an integer: {v}"))
            })?;
        }
        Ok(())
    }

    /// Validate field ranges
    fn validate(&self) -> Result<()> {
        if self.agent_interval_secs <= 0.0 {
            return Err(Error::Config(format!(
                "agent_interval_secs must be positive, got {}",
                self.agent_interval_secs
            )));
        }
        if self.tick_backoff_secs < 0.0 {
            return Err(Error::Config(format!(
                "tick_backoff_secs must not be negative, got {}",
                self.tick_backoff_secs
            )));
        }
        if self.log_capacity == 0 {
            return Err(Error::Config(
                "log_capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Resolve the config file path following the priority order
fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    // Priority 1: explicit path (missing file is an operator mistake worth
    // surfacing, so it is returned even if absent and read_to_string fails)
    if let Some(path) = explicit_path {
        return Some(path.to_path_buf());
    }

    // Priority 2: environment variable
    if let Ok(path) = std::env::var("VERITAS_CONFIG") {
        return Some(PathBuf::from(path));
    }

    // Priority 3: platform config directory
    if let Some(dir) = dirs::config_dir() {
        let path = dir.join("veritas").join("config.toml");
        if path.exists() {
            return Some(path);
        }
    }

    // Priority 4: compiled defaults
    None
}

/// Log any config fields that deviate from defaults, for startup diagnostics
pub fn log_overrides(config: &EngineConfig) {
    let defaults = EngineConfig::default();
    if (config.agent_interval_secs - defaults.agent_interval_secs).abs() > f64::EPSILON {
        info!("agent_interval_secs overridden: {}", config.agent_interval_secs);
    }
    if config.log_capacity != defaults.log_capacity {
        info!("log_capacity overridden: {}", config.log_capacity);
    }
    if config.agent_interval_secs < 1.0 {
        warn!(
            "agent_interval_secs {} is below 1s; expect a busy analysis loop",
            config.agent_interval_secs
        );
    }
}
