//! Mellanox platform API: thermal sensors.
//!
//! Exposes the temperature sensors of a Mellanox switch to the SONiC
//! platform monitoring daemons. The readings come from files that the
//! hw-management daemon keeps under `/var/run/hw-management/thermal/`.
//!
//! - [`TopologyCatalog`]: Which sensors each hardware SKU has
//! - [`FileLayout`]: Where each sensor's files live
//! - [`ThermalFactory`]: Builds the ordered sensor list for a SKU
//! - [`Thermal`]: One sensor, implementing [`ThermalBase`]
//!
//! # Example
//!
//! ```ignore
//! use sonic_platform_mlnx::{ThermalFactory, ThermalBase};
//!
//! let mut thermals = Vec::new();
//! ThermalFactory::default().initialize("ACS-MSN2700", &chassis.psus(), &mut thermals)?;
//! for thermal in &thermals {
//!     println!("{}: {:?}", thermal.name(), thermal.temperature());
//! }
//! ```

pub mod catalog;
pub mod category;
pub mod config;
pub mod error;
pub mod factory;
pub mod layout;
pub mod psu;
pub mod thermal;

pub use catalog::{CategorySpan, TopologyCatalog, TopologyProfile};
pub use category::{AmbientKind, SensorCategory, SensorIndex, ThermalApi};
pub use config::ThermalConfig;
pub use error::{ThermalError, ThermalResult};
pub use factory::{initialize_thermals, ThermalFactory, PSU_POWER_OFF_HINT};
pub use layout::{FileLayout, HW_MGMT_THERMAL_ROOT};
pub use psu::SysfsPsuStatus;
pub use thermal::{read_milli_celsius, Thermal, ThermalReading};

pub use sonic_platform_base::{PsuBase, ReadinessDependency, ThermalBase};
