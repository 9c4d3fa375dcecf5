//! TOML configuration.
//!
//! ```toml
//! poll_interval_ms = 10
//! battery = true
//!
//! [[measure]]
//! device = 0
//! channel = "JoyL_X"
//!
//! [[measure]]
//! device = 1
//! channel = "connected"
//! ```
//!
//! Registry settings and per-consumer settings live in one file. Consumer
//! entries are deliberately loose (`device` is a plain integer and `channel`
//! any string) because invalid values degrade at reload time instead of
//! failing the whole file; see [`ConsumerHandle::reload`](crate::ConsumerHandle::reload).

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default minimum time between two polls of the same slot.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Registry-wide settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Minimum time between two hardware polls of one slot.
    #[serde(rename = "poll_interval_ms", with = "millis")]
    pub poll_interval: Duration,
    /// Query pad and headset battery levels on every connected poll.
    pub battery: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            battery: false,
        }
    }
}

/// Settings of one consumer (one host measure).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeasureOptions {
    /// Device slot; out-of-range values fall back to slot 0.
    pub device: i64,
    /// Channel name; empty keeps the current channel.
    pub channel: String,
}

impl MeasureOptions {
    pub fn new(device: i64, channel: impl Into<String>) -> Self {
        Self {
            device,
            channel: channel.into(),
        }
    }
}

/// Whole configuration file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PadmeterConfig {
    #[serde(flatten)]
    pub registry: RegistryConfig,
    #[serde(default, rename = "measure")]
    pub measures: Vec<MeasureOptions>,
}

impl PadmeterConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let cfg: PadmeterConfig = toml::from_str(text)?;
        cfg.registry.validate()?;
        Ok(cfg)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_str(&read_config(path.as_ref())?)
    }
}

fn read_config(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })
}

impl RegistryConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let cfg: RegistryConfig = toml::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read registry settings from a TOML file. `[[measure]]` tables are ignored.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_str(&read_config(path.as_ref())?)
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_battery(mut self, battery: bool) -> Self {
        self.battery = battery;
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval > Duration::from_secs(60) {
            return Err(ConfigError::Invalid(format!(
                "poll_interval_ms = {} exceeds one minute",
                self.poll_interval.as_millis()
            )));
        }
        Ok(())
    }
}

mod millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}
