//! Thermal sensor backed by a hw-management file.

use serde::Serialize;
use sonic_platform_base::{ReadinessDependency, ThermalBase};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::category::{AmbientKind, SensorCategory, SensorIndex, ThermalApi};
use crate::error::{ThermalError, ThermalResult};
use crate::layout::FileLayout;

const INDEX_PLACEHOLDER: &str = "{}";

/// One physical thermal sensor.
///
/// File paths are resolved once at construction and never change; every
/// read goes to the filesystem again, nothing is cached.
#[derive(Debug, Clone)]
pub struct Thermal {
    category: SensorCategory,
    index: SensorIndex,
    name: String,
    temperature_path: PathBuf,
    high_threshold_path: Option<PathBuf>,
    dependency: Option<ReadinessDependency>,
}

impl Thermal {
    /// Creates the sensor of an indexed category, e.g. "xSFP module 3 Temp".
    pub fn indexed(
        category: SensorCategory,
        index: u32,
        layout: &FileLayout,
    ) -> ThermalResult<Self> {
        let template = numeric_name_template(category)?;
        let name = template.replace(INDEX_PLACEHOLDER, &index.to_string());
        Self::numeric(category, index, name, layout)
    }

    /// Creates the only sensor of a category, named without an index.
    pub fn singleton(category: SensorCategory, layout: &FileLayout) -> ThermalResult<Self> {
        let name = unindexed_name(numeric_name_template(category)?);
        Self::numeric(category, 0, name, layout)
    }

    /// Creates a chassis ambient sensor.
    pub fn ambient(kind: AmbientKind, layout: &FileLayout) -> Self {
        let index = SensorIndex::Ambient(kind);
        Self {
            category: SensorCategory::Ambient,
            index,
            name: kind.display_name().to_string(),
            temperature_path: layout.root().join(kind.file_name()),
            high_threshold_path: layout.resolve(
                SensorCategory::Ambient,
                index,
                ThermalApi::HighThreshold,
            ),
            dependency: None,
        }
    }

    /// Gates temperature reads on `dependency` being ready.
    pub fn with_dependency(mut self, dependency: ReadinessDependency) -> Self {
        self.dependency = Some(dependency);
        self
    }

    fn numeric(
        category: SensorCategory,
        index: u32,
        name: String,
        layout: &FileLayout,
    ) -> ThermalResult<Self> {
        let index = SensorIndex::Numeric(index);
        let temperature_path = layout
            .resolve(category, index, ThermalApi::Temperature)
            .ok_or_else(|| ThermalError::config(format!("no temperature file for {}", category)))?;

        Ok(Self {
            category,
            index,
            name,
            temperature_path,
            high_threshold_path: layout.resolve(category, index, ThermalApi::HighThreshold),
            dependency: None,
        })
    }

    pub fn category(&self) -> SensorCategory {
        self.category
    }

    pub fn index(&self) -> SensorIndex {
        self.index
    }

    pub fn temperature_path(&self) -> &Path {
        &self.temperature_path
    }

    /// Returns `None` for categories without a threshold file (gearbox, ambient).
    pub fn high_threshold_path(&self) -> Option<&Path> {
        self.high_threshold_path.as_deref()
    }

    pub fn dependency(&self) -> Option<&ReadinessDependency> {
        self.dependency.as_ref()
    }

    /// Snapshot of the sensor's current values.
    pub fn reading(&self) -> ThermalReading {
        ThermalReading {
            name: self.name.clone(),
            category: self.category,
            temperature: self.temperature(),
            high_threshold: self.high_threshold(),
        }
    }

    fn read_value(&self, path: &Path) -> Option<f64> {
        match read_milli_celsius(path) {
            Ok(value) => Some(value),
            Err(e) => {
                info!(thermal = %self.name, "{}", e);
                None
            }
        }
    }
}

impl ThermalBase for Thermal {
    fn name(&self) -> &str {
        &self.name
    }

    fn temperature(&self) -> Option<f64> {
        if let Some(dependency) = &self.dependency {
            if !dependency.is_ready() {
                info!(
                    "get_temperature for {} failed due to {}",
                    self.name,
                    dependency.hint()
                );
                return None;
            }
        }
        self.read_value(&self.temperature_path)
    }

    /// Thresholds are hardware limits and are read even when the
    /// dependency reports not-ready.
    fn high_threshold(&self) -> Option<f64> {
        let path = self.high_threshold_path.as_deref()?;
        self.read_value(path)
    }
}

/// Serializable snapshot of one sensor, used by the CLI output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThermalReading {
    pub name: String,
    pub category: SensorCategory,
    pub temperature: Option<f64>,
    pub high_threshold: Option<f64>,
}

/// Reads a file holding milli-degrees Celsius and returns degrees Celsius.
///
/// Surrounding whitespace (the trailing newline sysfs writes) is ignored.
pub fn read_milli_celsius(path: &Path) -> ThermalResult<f64> {
    let content = fs::read_to_string(path).map_err(|source| ThermalError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let trimmed = content.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value / 1000.0),
        _ => Err(ThermalError::Parse {
            path: path.to_path_buf(),
            content: trimmed.to_string(),
        }),
    }
}

fn numeric_name_template(category: SensorCategory) -> ThermalResult<&'static str> {
    category.name_template().ok_or(ThermalError::InvalidName {
        kind: "numeric sensor category",
        value: category.to_string(),
    })
}

/// "CPU Core {} Temp" -> "CPU Core Temp", "PSU-{} Temp" -> "PSU Temp".
fn unindexed_name(template: &str) -> String {
    template
        .replace(" {}", "")
        .replace("-{}", "")
        .replace(INDEX_PLACEHOLDER, "")
}
