//! Error types for the Mellanox platform API.
//!
//! Initialization errors (unknown SKU, missing PSU providers, bad config)
//! are fatal for platform bring-up. Read errors are per-call: the thermal
//! objects log them and report the value as unavailable.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for platform operations.
pub type ThermalResult<T> = Result<T, ThermalError>;

/// Errors that can occur while building or reading thermal sensors.
#[derive(Debug, Error)]
pub enum ThermalError {
    /// The hardware SKU has no registered thermal topology.
    #[error("Unknown hardware SKU '{sku}': no thermal profile registered")]
    UnknownSku {
        /// The SKU that was looked up.
        sku: String,
    },

    /// Fewer PSU status providers were supplied than the profile declares.
    #[error("PSU index {index} out of range: only {available} PSU status providers supplied")]
    PsuIndexOutOfRange {
        /// Zero-based position of the missing provider.
        index: usize,
        /// Number of providers supplied by the caller.
        available: usize,
    },

    /// A sensor file could not be read.
    #[error("Fail to read file {} due to {source}", .path.display())]
    FileRead {
        /// The file that was read.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: io::Error,
    },

    /// A sensor file did not contain a number.
    #[error("Fail to parse file {} content {content:?} as a number", .path.display())]
    Parse {
        /// The file that was read.
        path: PathBuf,
        /// The trimmed file content.
        content: String,
    },

    /// A category or ambient identifier did not parse.
    #[error("Invalid {kind}: {value}")]
    InvalidName {
        /// What was being parsed (e.g. "sensor category").
        kind: &'static str,
        /// The rejected input.
        value: String,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl ThermalError {
    /// Creates an unknown SKU error.
    pub fn unknown_sku(sku: impl Into<String>) -> Self {
        Self::UnknownSku { sku: sku.into() }
    }

    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Returns true if this error should stop platform initialization.
    ///
    /// Read and parse failures are transient: the monitoring loop polls again.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            ThermalError::FileRead { .. } | ThermalError::Parse { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ThermalError::unknown_sku("ACS-MSN9999");
        assert_eq!(
            err.to_string(),
            "Unknown hardware SKU 'ACS-MSN9999': no thermal profile registered"
        );
    }

    #[test]
    fn test_psu_out_of_range_display() {
        let err = ThermalError::PsuIndexOutOfRange {
            index: 1,
            available: 1,
        };
        assert_eq!(
            err.to_string(),
            "PSU index 1 out of range: only 1 PSU status providers supplied"
        );
    }

    #[test]
    fn test_is_fatal() {
        assert!(ThermalError::unknown_sku("x").is_fatal());
        assert!(ThermalError::config("bad").is_fatal());

        let read = ThermalError::FileRead {
            path: PathBuf::from("/var/run/hw-management/thermal/asic"),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        assert!(!read.is_fatal());
        assert!(read.to_string().contains("thermal/asic"));

        let parse = ThermalError::Parse {
            path: PathBuf::from("cpu_pack"),
            content: "N/A".to_string(),
        };
        assert!(!parse.is_fatal());
    }
}
