//! # Engine Configuration
//!
//! All configuration structures for the engine in one place: window
//! metadata handed to the backend, frame timing, asset search paths and
//! logging. Every section is serializable so a partial TOML or RON file
//! can override just the fields it names.

use serde::{Serialize, Deserialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::config::{Config, ConfigError};
use crate::foundation::time::{DEFAULT_MAX_DELTA, DEFAULT_MIN_FRAME};

/// # Window Configuration
///
/// Passed to the backend at initialization. The engine itself never opens a
/// window; it only forwards these values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width in pixels
    pub width: u32,
    /// Window height in pixels
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Actor Engine Application".to_string(),
            width: 1024,
            height: 768,
        }
    }
}

/// # Timing Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Minimum wall-clock interval between frames, in milliseconds
    pub min_frame_ms: u64,
    /// Largest delta time handed to the simulation, in seconds
    pub max_delta_secs: f32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            min_frame_ms: u64::try_from(DEFAULT_MIN_FRAME.as_millis()).unwrap_or(16),
            max_delta_secs: DEFAULT_MAX_DELTA,
        }
    }
}

impl TimingConfig {
    /// Minimum frame interval as a duration
    pub fn min_frame(&self) -> Duration {
        Duration::from_millis(self.min_frame_ms)
    }
}

/// # Asset Configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Directories searched, in order, when resolving a texture name
    pub search_paths: Vec<PathBuf>,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            search_paths: vec![PathBuf::from("."), PathBuf::from("resources")],
        }
    }
}

/// # Logging Configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default log level (`RUST_LOG` still takes precedence)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// # Complete Engine Configuration
///
/// Top-level configuration that applications hand to
/// [`Engine::run`](crate::Engine::run).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Window configuration
    pub window: WindowConfig,
    /// Frame timing
    pub timing: TimingConfig,
    /// Asset loading
    pub assets: AssetConfig,
    /// Logging
    pub logging: LoggingConfig,
}

impl EngineConfig {
    /// Create a configuration with the given window title
    pub fn new(title: impl Into<String>) -> Self {
        let mut config = Self::default();
        config.window.title = title.into();
        config
    }

    /// Set the window size
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window.width = width;
        self.window.height = height;
        self
    }

    /// Set frame timing limits
    pub fn with_timing(mut self, min_frame_ms: u64, max_delta_secs: f32) -> Self {
        self.timing.min_frame_ms = min_frame_ms;
        self.timing.max_delta_secs = max_delta_secs;
        self
    }

    /// Add an asset search path
    pub fn with_search_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.assets.search_paths.push(path.into());
        self
    }

    /// Set the default log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.logging.level = level.into();
        self
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid("Window size must be non-zero".to_string()));
        }

        if !(self.timing.max_delta_secs > 0.0) {
            return Err(ConfigError::Invalid("Max delta time must be positive".to_string()));
        }

        if self.timing.max_delta_secs > DEFAULT_MAX_DELTA {
            return Err(ConfigError::Invalid(format!(
                "Max delta time must not exceed {DEFAULT_MAX_DELTA}s"
            )));
        }

        if self.timing.min_frame_ms > 1000 {
            return Err(ConfigError::Invalid("Minimum frame interval must not exceed one second".to_string()));
        }

        Ok(())
    }
}

impl Config for EngineConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.window.width, 1024);
        assert_eq!(config.window.height, 768);
        assert_eq!(config.timing.min_frame_ms, 16);
        assert_eq!(config.timing.max_delta_secs, 0.05);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_overrides() {
        let text = "[window]\ntitle = \"Ship\"\n\n[timing]\nmin_frame_ms = 8\nmax_delta_secs = 0.02\n";
        let config = EngineConfig::load_from_str("game.toml", text).unwrap();

        assert_eq!(config.window.title, "Ship");
        assert_eq!(config.window.width, 1024);
        assert_eq!(config.timing.max_delta_secs, 0.02);
        assert_eq!(config.timing.min_frame_ms, 8);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_delta_clamp_above_default_rejected() {
        let text = "[timing]\nmax_delta_secs = 0.1\n";
        let config = EngineConfig::load_from_str("game.toml", text).unwrap();

        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
        assert!(EngineConfig::default().with_timing(16, 0.5).validate().is_err());
        assert!(EngineConfig::default().with_timing(16, DEFAULT_MAX_DELTA).validate().is_ok());
    }

    #[test]
    fn test_ron_round_trip() {
        let config = EngineConfig::new("Ron").with_window_size(640, 480);
        let text = config.to_config_string("game.ron").unwrap();
        let parsed = EngineConfig::load_from_str("game.ron", &text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_unsupported_format() {
        let result = EngineConfig::load_from_str("game.ini", "");
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_validation() {
        assert!(EngineConfig::default().with_window_size(0, 10).validate().is_err());
        assert!(EngineConfig::default().with_timing(16, 0.0).validate().is_err());
        assert!(EngineConfig::default().with_timing(5000, 0.05).validate().is_err());
    }
}
