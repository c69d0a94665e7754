//! Engine configuration.
//!
//! Loaded from TOML. Every field has a default, so a config file only needs to
//! list what it changes:
//!
//! ```toml
//! [window]
//! title = "squares"
//! width = 1024
//!
//! [timing]
//! tick_rate = 120
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::{EngineError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EngineConfig {
    pub window: WindowConfig,
    pub timing: TimingConfig,
    pub render: RenderConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    /// Logical pixels.
    pub width: u32,
    pub height: u32,
    pub resizable: bool,
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "tessera".to_string(),
            width: 800,
            height: 600,
            resizable: true,
            vsync: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Fixed updates per second.
    pub tick_rate: u32,
    /// Upper bound on fixed updates per frame; older backlog is dropped.
    pub max_substeps: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60,
            max_substeps: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub clear_color: Color,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            clear_color: Color::WHITE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `env_logger` filter used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(text: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| EngineError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text).map_err(|source| EngineError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Like [`load`](Self::load), but a missing file yields the defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn validate(&self) -> Result<()> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(EngineError::Config(format!(
                "window size must be non-zero, got {}x{}",
                self.window.width, self.window.height
            )));
        }
        if self.timing.tick_rate == 0 {
            return Err(EngineError::Config("tick_rate must be at least 1".into()));
        }
        if self.timing.max_substeps == 0 {
            return Err(EngineError::Config(
                "max_substeps must be at least 1".into(),
            ));
        }
        Ok(())
    }

    pub fn fixed_timestep(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.timing.tick_rate.max(1)))
    }

    pub fn to_toml_string(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = EngineConfig::from_toml_str(
            r#"
            [window]
            title = "squares"

            [timing]
            tick_rate = 120
            "#,
        )
        .unwrap();

        assert_eq!(config.window.title, "squares");
        assert_eq!(config.window.width, 800);
        assert_eq!(config.timing.tick_rate, 120);
        assert_eq!(config.timing.max_substeps, 5);
        assert_eq!(config.render.clear_color, Color::WHITE);
    }

    #[test]
    fn fixed_timestep_from_tick_rate() {
        let mut config = EngineConfig::default();
        config.timing.tick_rate = 50;
        assert_eq!(config.fixed_timestep(), Duration::from_millis(20));
    }

    #[test]
    fn validation_rejects_zero_values() {
        let mut config = EngineConfig::default();
        config.timing.tick_rate = 0;
        assert!(matches!(config.validate(), Err(EngineError::Config(_))));

        let mut config = EngineConfig::default();
        config.window.height = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_or_default_handles_missing_and_malformed_files() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert_eq!(
            EngineConfig::load_or_default(&missing).unwrap(),
            EngineConfig::default()
        );

        let bad = dir.path().join("bad.toml");
        let mut file = fs::File::create(&bad).unwrap();
        writeln!(file, "[window\nwidth = ").unwrap();
        assert!(matches!(
            EngineConfig::load_or_default(&bad),
            Err(EngineError::ConfigParse { .. })
        ));
    }

    #[test]
    fn round_trips_through_toml() {
        let mut config = EngineConfig::default();
        config.render.clear_color = Color::DARK_GRAY;
        let text = config.to_toml_string().unwrap();
        assert_eq!(EngineConfig::from_toml_str(&text).unwrap(), config);
    }
}
