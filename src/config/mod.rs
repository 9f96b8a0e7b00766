use std::io;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default discovery path of the physical gamepad
pub const DEFAULT_DEVICE_PATH: &str =
    "/dev/input/by-id/usb-1038_SteelSeries_Stratus_Duo-event-joystick";
/// Default stable path for the event interface
pub const DEFAULT_EVENT_LINK: &str = "/tmp/gamepad-event";
/// Default stable path for the joystick interface
pub const DEFAULT_JS_LINK: &str = "/tmp/gamepad-js";
/// Default display name of the virtual device
pub const DEFAULT_DEVICE_NAME: &str = "VirtualGamepad";
/// Default interval between device discovery attempts
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;

/// Represents all possible errors loading a [Config]
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Could not read: {0}")]
    IoError(#[from] io::Error),
    #[error("Unable to deserialize: {0}")]
    DeserializeError(#[from] serde_yaml::Error),
}

/// Immutable daemon configuration. Built once at startup from the optional
/// config file and command-line flags, then passed by reference into the
/// supervisor.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "snake_case", default)]
pub struct Config {
    /// Path where the physical gamepad is discovered
    pub device_path: String,
    /// Stable symlink path for the event interface
    pub event_link: String,
    /// Stable symlink path for the joystick interface
    pub js_link: String,
    /// Display name of the virtual device
    pub device_name: String,
    /// Interval in milliseconds between device discovery attempts
    pub poll_interval_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            device_path: DEFAULT_DEVICE_PATH.to_string(),
            event_link: DEFAULT_EVENT_LINK.to_string(),
            js_link: DEFAULT_JS_LINK.to_string(),
            device_name: DEFAULT_DEVICE_NAME.to_string(),
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl Config {
    /// Load a [Config] from the given YAML string
    pub fn from_yaml(content: &str) -> Result<Config, LoadError> {
        let config: Config = serde_yaml::from_str(content)?;
        Ok(config)
    }

    /// Load a [Config] from the given YAML file
    pub fn from_yaml_file(path: &Path) -> Result<Config, LoadError> {
        let file = std::fs::File::open(path)?;
        let config: Config = serde_yaml::from_reader(file)?;
        Ok(config)
    }

    /// Returns the discovery poll interval as a [Duration]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

#[cfg(test)]
pub mod config_test;
