//! Backing file layout of the hw-management thermal directory.
//!
//! hw-management exposes one file per reading under a flat directory:
//!
//! | category | temperature | high threshold |
//! |----------|-------------|----------------|
//! | cpu_core | `cpu_core{}` | `cpu_core{}_max` |
//! | cpu_pack | `cpu_pack` | `cpu_pack_max` |
//! | module | `module{}_temp_input` | `module{}_temp_crit` |
//! | psu | `psu{}_temp` | `psu{}_temp_max` |
//! | gearbox | `gearbox{}_temp_input` | - |
//! | ambient | per kind (`asic`, `port_amb`, ...) | - |

use std::path::{Path, PathBuf};

use crate::category::{SensorCategory, SensorIndex, ThermalApi};

/// Default directory populated by the hw-management daemon.
pub const HW_MGMT_THERMAL_ROOT: &str = "/var/run/hw-management/thermal/";

const INDEX_PLACEHOLDER: &str = "{}";

/// Resolves sensor file paths from a root directory and the per-category
/// file name templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileLayout {
    root: PathBuf,
}

impl FileLayout {
    /// Creates a layout rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the file name template for a category and API.
    ///
    /// Ambient has no category-wide template; its files are per kind.
    pub const fn file_template(category: SensorCategory, api: ThermalApi) -> Option<&'static str> {
        match (category, api) {
            (SensorCategory::CpuCore, ThermalApi::Temperature) => Some("cpu_core{}"),
            (SensorCategory::CpuCore, ThermalApi::HighThreshold) => Some("cpu_core{}_max"),
            (SensorCategory::CpuPack, ThermalApi::Temperature) => Some("cpu_pack"),
            (SensorCategory::CpuPack, ThermalApi::HighThreshold) => Some("cpu_pack_max"),
            (SensorCategory::Module, ThermalApi::Temperature) => Some("module{}_temp_input"),
            (SensorCategory::Module, ThermalApi::HighThreshold) => Some("module{}_temp_crit"),
            (SensorCategory::Psu, ThermalApi::Temperature) => Some("psu{}_temp"),
            (SensorCategory::Psu, ThermalApi::HighThreshold) => Some("psu{}_temp_max"),
            (SensorCategory::Gearbox, ThermalApi::Temperature) => Some("gearbox{}_temp_input"),
            (SensorCategory::Gearbox, ThermalApi::HighThreshold) => None,
            (SensorCategory::Ambient, _) => None,
        }
    }

    /// Returns the file name backing `api` for one sensor, or `None` if the
    /// category has no such file.
    pub fn file_name(
        category: SensorCategory,
        index: SensorIndex,
        api: ThermalApi,
    ) -> Option<String> {
        match (category, index) {
            (SensorCategory::Ambient, SensorIndex::Ambient(kind)) => match api {
                ThermalApi::Temperature => Some(kind.file_name().to_string()),
                ThermalApi::HighThreshold => None,
            },
            (SensorCategory::Ambient, SensorIndex::Numeric(_)) => None,
            (_, index) => {
                let template = Self::file_template(category, api)?;
                if category.is_singleton() {
                    Some(template.to_string())
                } else {
                    Some(template.replace(INDEX_PLACEHOLDER, &index.to_string()))
                }
            }
        }
    }

    /// Resolves the absolute path backing `api` for one sensor.
    pub fn resolve(
        &self,
        category: SensorCategory,
        index: SensorIndex,
        api: ThermalApi,
    ) -> Option<PathBuf> {
        Self::file_name(category, index, api).map(|name| self.root.join(name))
    }
}

impl Default for FileLayout {
    fn default() -> Self {
        Self::new(HW_MGMT_THERMAL_ROOT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::AmbientKind;
    use pretty_assertions::assert_eq;

    fn name(category: SensorCategory, index: SensorIndex, api: ThermalApi) -> Option<String> {
        FileLayout::file_name(category, index, api)
    }

    #[test]
    fn test_indexed_templates() {
        let idx = SensorIndex::Numeric(3);
        assert_eq!(
            name(SensorCategory::CpuCore, idx, ThermalApi::Temperature).as_deref(),
            Some("cpu_core3")
        );
        assert_eq!(
            name(SensorCategory::CpuCore, idx, ThermalApi::HighThreshold).as_deref(),
            Some("cpu_core3_max")
        );
        assert_eq!(
            name(SensorCategory::Module, idx, ThermalApi::Temperature).as_deref(),
            Some("module3_temp_input")
        );
        assert_eq!(
            name(SensorCategory::Module, idx, ThermalApi::HighThreshold).as_deref(),
            Some("module3_temp_crit")
        );
        assert_eq!(
            name(SensorCategory::Psu, idx, ThermalApi::Temperature).as_deref(),
            Some("psu3_temp")
        );
        assert_eq!(
            name(SensorCategory::Psu, idx, ThermalApi::HighThreshold).as_deref(),
            Some("psu3_temp_max")
        );
        assert_eq!(
            name(SensorCategory::Gearbox, idx, ThermalApi::Temperature).as_deref(),
            Some("gearbox3_temp_input")
        );
    }

    #[test]
    fn test_singleton_templates() {
        let idx = SensorIndex::Numeric(0);
        assert_eq!(
            name(SensorCategory::CpuPack, idx, ThermalApi::Temperature).as_deref(),
            Some("cpu_pack")
        );
        assert_eq!(
            name(SensorCategory::CpuPack, idx, ThermalApi::HighThreshold).as_deref(),
            Some("cpu_pack_max")
        );
    }

    #[test]
    fn test_no_threshold_file() {
        assert_eq!(
            name(SensorCategory::Gearbox, SensorIndex::Numeric(1), ThermalApi::HighThreshold),
            None
        );
        for kind in AmbientKind::ALL {
            let index = SensorIndex::Ambient(kind);
            assert_eq!(name(SensorCategory::Ambient, index, ThermalApi::HighThreshold), None);
        }
    }

    #[test]
    fn test_ambient_files() {
        let files: Vec<_> = AmbientKind::ALL
            .iter()
            .map(|kind| {
                name(SensorCategory::Ambient, SensorIndex::Ambient(*kind), ThermalApi::Temperature)
                    .unwrap()
            })
            .collect();
        assert_eq!(files, vec!["asic", "port_amb", "fan_amb", "comex_amb", "board_amb"]);
    }

    #[test]
    fn test_resolve_joins_root() {
        let layout = FileLayout::default();
        assert_eq!(
            layout.resolve(SensorCategory::Psu, SensorIndex::Numeric(2), ThermalApi::Temperature),
            Some(PathBuf::from("/var/run/hw-management/thermal/psu2_temp"))
        );

        let layout = FileLayout::new("/tmp/thermal");
        assert_eq!(
            layout.resolve(
                SensorCategory::Ambient,
                SensorIndex::Ambient(AmbientKind::Port),
                ThermalApi::Temperature
            ),
            Some(PathBuf::from("/tmp/thermal/port_amb"))
        );
    }
}
