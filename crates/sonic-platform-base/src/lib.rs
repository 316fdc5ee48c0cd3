//! Platform abstraction base contracts for SONiC.
//!
//! Vendor platform crates implement these traits so that the monitoring
//! daemons (thermalctld, psud, ...) can consume device objects generically:
//!
//! - [`ThermalBase`]: A temperature sensor with name, reading and thresholds
//! - [`PsuBase`]: Power supply status as seen by other platform devices
//! - [`Readiness`]: Narrow "is this device usable right now" capability
//! - [`ReadinessDependency`]: A readiness source paired with a hint for logs
//!
//! # Example
//!
//! ```ignore
//! use sonic_platform_base::ThermalBase;
//!
//! fn dump(thermals: &[impl ThermalBase]) {
//!     for thermal in thermals {
//!         match thermal.temperature() {
//!             Some(t) => println!("{}: {:.3} C", thermal.name(), t),
//!             None => println!("{}: N/A", thermal.name()),
//!         }
//!     }
//! }
//! ```

mod psu;
mod readiness;
mod thermal;

pub use psu::PsuBase;
pub use readiness::{PowerGood, Readiness, ReadinessDependency, UNKNOWN_REASON_HINT};
pub use thermal::ThermalBase;
