//! Thermal device contract.

/// Base trait for all thermal sensors exposed by a platform.
///
/// Temperatures are in degrees Celsius. `None` means the value is not
/// available right now (device powered off, file missing, unparseable
/// content), which is distinct from a reading of `0.0`.
///
/// Implementations must be `Send + Sync`: the monitoring daemon may poll
/// distinct sensors from different threads.
pub trait ThermalBase: Send + Sync {
    /// Returns the display name of the sensor.
    fn name(&self) -> &str;

    /// Returns the current temperature, up to the nearest thousandth of a degree.
    fn temperature(&self) -> Option<f64>;

    /// Returns the high threshold temperature.
    fn high_threshold(&self) -> Option<f64>;

    /// Returns the low threshold temperature.
    fn low_threshold(&self) -> Option<f64> {
        None
    }

    /// Returns the high critical threshold temperature.
    fn high_critical_threshold(&self) -> Option<f64> {
        None
    }

    /// Returns the low critical threshold temperature.
    fn low_critical_threshold(&self) -> Option<f64> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed;

    impl ThermalBase for Fixed {
        fn name(&self) -> &str {
            "Fixed Temp"
        }

        fn temperature(&self) -> Option<f64> {
            Some(30.125)
        }

        fn high_threshold(&self) -> Option<f64> {
            None
        }
    }

    #[test]
    fn test_optional_thresholds_default_to_none() {
        let thermal = Fixed;
        assert_eq!(thermal.name(), "Fixed Temp");
        assert_eq!(thermal.temperature(), Some(30.125));
        assert!(thermal.low_threshold().is_none());
        assert!(thermal.high_critical_threshold().is_none());
        assert!(thermal.low_critical_threshold().is_none());
    }
}
