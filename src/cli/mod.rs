use std::path::PathBuf;

use clap::Parser;

use crate::config::{Config, LoadError};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to a YAML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Discovery path of the physical gamepad (e.g. /dev/input/by-id/...)
    #[arg(long)]
    pub device: Option<String>,

    /// Stable symlink path for the event interface
    #[arg(long)]
    pub event_link: Option<String>,

    /// Stable symlink path for the joystick interface
    #[arg(long)]
    pub js_link: Option<String>,

    /// Display name of the virtual device
    #[arg(long)]
    pub name: Option<String>,

    /// Interval in milliseconds between device discovery attempts
    #[arg(long)]
    pub poll_interval_ms: Option<u64>,
}

impl Args {
    /// Build the daemon [Config] from the optional config file with any
    /// command-line overrides applied on top.
    pub fn into_config(self) -> Result<Config, LoadError> {
        let mut config = match self.config {
            Some(path) => Config::from_yaml_file(&path)?,
            None => Config::default(),
        };

        if let Some(device) = self.device {
            config.device_path = device;
        }
        if let Some(event_link) = self.event_link {
            config.event_link = event_link;
        }
        if let Some(js_link) = self.js_link {
            config.js_link = js_link;
        }
        if let Some(name) = self.name {
            config.device_name = name;
        }
        if let Some(interval) = self.poll_interval_ms {
            config.poll_interval_ms = interval;
        }

        Ok(config)
    }
}
