//! Configuration file support for the Mellanox platform API.
//!
//! Loads settings from a TOML file. Default location:
//! /etc/sonic/mlnx-thermal.toml. A missing file yields the defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::{ThermalError, ThermalResult};
use crate::layout::{FileLayout, HW_MGMT_THERMAL_ROOT};

/// Default configuration file location.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/sonic/mlnx-thermal.toml";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Platform thermal configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThermalConfig {
    /// Directory populated by hw-management
    #[serde(default = "default_thermal_root")]
    pub thermal_root: PathBuf,

    /// Hardware SKU; required when not given on the command line
    #[serde(default)]
    pub sku: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Number of PSU status providers to create instead of the profile's count
    #[serde(default)]
    pub psu_count_override: Option<usize>,
}

fn default_thermal_root() -> PathBuf {
    PathBuf::from(HW_MGMT_THERMAL_ROOT)
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ThermalConfig {
    fn default() -> Self {
        Self {
            thermal_root: default_thermal_root(),
            sku: None,
            log_level: default_log_level(),
            psu_count_override: None,
        }
    }
}

impl ThermalConfig {
    /// Load configuration from file, falling back to defaults if file not found
    pub fn load_or_default(path: impl AsRef<Path>) -> ThermalResult<Self> {
        let path = path.as_ref();

        match fs::read_to_string(path) {
            Ok(content) => Self::from_toml(&content).map_err(|e| {
                ThermalError::config(format!(
                    "Failed to parse config file {}: {}",
                    path.display(),
                    e
                ))
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("Config file {} not found, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(ThermalError::Io(e)),
        }
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// File layout rooted at [`Self::thermal_root`].
    pub fn layout(&self) -> FileLayout {
        FileLayout::new(&self.thermal_root)
    }

    /// Validate configuration
    pub fn validate(&self) -> ThermalResult<()> {
        if self.thermal_root.as_os_str().is_empty() {
            return Err(ThermalError::config("thermal_root must not be empty"));
        }

        if !LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(ThermalError::config(format!(
                "log_level must be one of {}",
                LOG_LEVELS.join(", ")
            )));
        }

        if matches!(self.sku.as_deref(), Some("")) {
            return Err(ThermalError::config("sku must not be empty"));
        }

        Ok(())
    }
}
