//! Sensor categories and ambient sensor kinds.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ThermalError;

/// Category of a thermal sensor.
///
/// Determines the file name template and whether the category has one
/// instance or an indexed set of instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorCategory {
    /// Per-core CPU temperature.
    CpuCore,
    /// CPU package temperature.
    CpuPack,
    /// xSFP transceiver module temperature.
    Module,
    /// Power supply temperature.
    Psu,
    /// Gearbox (retimer) temperature.
    Gearbox,
    /// Chassis ambient temperature.
    Ambient,
}

impl SensorCategory {
    /// Order in which sensors are enumerated. The resulting list is indexed
    /// positionally by the platform layer, so this order must not change.
    pub const ENUMERATION_ORDER: [SensorCategory; 6] = [
        SensorCategory::CpuCore,
        SensorCategory::CpuPack,
        SensorCategory::Module,
        SensorCategory::Psu,
        SensorCategory::Ambient,
        SensorCategory::Gearbox,
    ];

    /// Returns true if the category's file names carry no index.
    pub const fn is_singleton(&self) -> bool {
        matches!(self, SensorCategory::CpuPack | SensorCategory::Ambient)
    }

    /// Returns the display name template; `{}` is replaced by the index.
    ///
    /// Ambient sensors are named per kind, see [`AmbientKind::display_name`].
    pub const fn name_template(&self) -> Option<&'static str> {
        match self {
            SensorCategory::CpuCore => Some("CPU Core {} Temp"),
            SensorCategory::CpuPack => Some("CPU Pack Temp"),
            SensorCategory::Module => Some("xSFP module {} Temp"),
            SensorCategory::Psu => Some("PSU-{} Temp"),
            SensorCategory::Gearbox => Some("Gearbox {} Temp"),
            SensorCategory::Ambient => None,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            SensorCategory::CpuCore => "cpu_core",
            SensorCategory::CpuPack => "cpu_pack",
            SensorCategory::Module => "module",
            SensorCategory::Psu => "psu",
            SensorCategory::Gearbox => "gearbox",
            SensorCategory::Ambient => "ambient",
        }
    }
}

impl fmt::Display for SensorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SensorCategory {
    type Err = ThermalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cpu_core" => Ok(SensorCategory::CpuCore),
            "cpu_pack" => Ok(SensorCategory::CpuPack),
            "module" => Ok(SensorCategory::Module),
            "psu" => Ok(SensorCategory::Psu),
            "gearbox" => Ok(SensorCategory::Gearbox),
            "ambient" => Ok(SensorCategory::Ambient),
            _ => Err(ThermalError::InvalidName {
                kind: "sensor category",
                value: s.to_string(),
            }),
        }
    }
}

/// Location of a chassis ambient sensor.
///
/// Each kind has a unique display name and backing file; ambient sensors
/// are never indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmbientKind {
    Asic,
    Port,
    Fan,
    Comex,
    Board,
}

impl AmbientKind {
    pub const ALL: [AmbientKind; 5] = [
        AmbientKind::Asic,
        AmbientKind::Port,
        AmbientKind::Fan,
        AmbientKind::Comex,
        AmbientKind::Board,
    ];

    pub const fn display_name(&self) -> &'static str {
        match self {
            AmbientKind::Asic => "Ambient ASIC Temp",
            AmbientKind::Port => "Ambient Port Side Temp",
            AmbientKind::Fan => "Ambient Fan Side Temp",
            AmbientKind::Comex => "Ambient COMEX Temp",
            AmbientKind::Board => "Ambient Board Temp",
        }
    }

    /// File name under the thermal root holding the temperature.
    pub const fn file_name(&self) -> &'static str {
        match self {
            AmbientKind::Asic => "asic",
            AmbientKind::Port => "port_amb",
            AmbientKind::Fan => "fan_amb",
            AmbientKind::Comex => "comex_amb",
            AmbientKind::Board => "board_amb",
        }
    }

    /// Identifier used by hw-management profiles (e.g. `port_amb`).
    pub const fn as_str(&self) -> &'static str {
        match self {
            AmbientKind::Asic => "asic_amb",
            AmbientKind::Port => "port_amb",
            AmbientKind::Fan => "fan_amb",
            AmbientKind::Comex => "comex_amb",
            AmbientKind::Board => "board_amb",
        }
    }
}

impl fmt::Display for AmbientKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AmbientKind {
    type Err = ThermalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AmbientKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ThermalError::InvalidName {
                kind: "ambient sensor",
                value: s.to_string(),
            })
    }
}

/// Which instance of a category a sensor is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SensorIndex {
    /// Position within a numeric category (0 for singletons).
    Numeric(u32),
    /// Ambient sensor location.
    Ambient(AmbientKind),
}

impl fmt::Display for SensorIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensorIndex::Numeric(index) => write!(f, "{}", index),
            SensorIndex::Ambient(kind) => write!(f, "{}", kind),
        }
    }
}

/// Thermal API whose backing file is being resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThermalApi {
    Temperature,
    HighThreshold,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_enumeration_order() {
        let names: Vec<_> = SensorCategory::ENUMERATION_ORDER
            .iter()
            .map(|c| c.to_string())
            .collect();
        assert_eq!(
            names,
            vec!["cpu_core", "cpu_pack", "module", "psu", "ambient", "gearbox"]
        );
    }

    #[test]
    fn test_singleton_categories() {
        assert!(SensorCategory::CpuPack.is_singleton());
        assert!(SensorCategory::Ambient.is_singleton());
        assert!(!SensorCategory::CpuCore.is_singleton());
        assert!(!SensorCategory::Gearbox.is_singleton());
    }

    #[test]
    fn test_category_parse() {
        assert_eq!(
            "cpu_core".parse::<SensorCategory>().unwrap(),
            SensorCategory::CpuCore
        );
        assert_eq!("PSU".parse::<SensorCategory>().unwrap(), SensorCategory::Psu);
        assert!("fan".parse::<SensorCategory>().is_err());
    }

    #[test]
    fn test_ambient_kind_names() {
        assert_eq!(AmbientKind::Asic.file_name(), "asic");
        assert_eq!(AmbientKind::Asic.as_str(), "asic_amb");
        assert_eq!(AmbientKind::Fan.display_name(), "Ambient Fan Side Temp");
        assert_eq!("comex_amb".parse::<AmbientKind>().unwrap(), AmbientKind::Comex);
        assert!("asic".parse::<AmbientKind>().is_err());
    }
}
