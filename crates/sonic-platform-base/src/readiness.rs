//! Readiness capability used to gate reads on dependent devices.

use std::fmt;
use std::sync::Arc;

use crate::PsuBase;

/// Hint logged when a dependency reports not-ready without its own hint.
pub const UNKNOWN_REASON_HINT: &str = "unknown reason";

/// A source that can tell whether a dependent device is usable right now.
pub trait Readiness: Send + Sync {
    /// Returns true if the device backed by this source can be read.
    fn is_ready(&self) -> bool;
}

/// Adapts a PSU status provider into a [`Readiness`] source.
///
/// The PSU is shared, not owned: the PSU objects are created and kept by
/// the chassis, this only queries them.
#[derive(Clone)]
pub struct PowerGood(Arc<dyn PsuBase>);

impl PowerGood {
    /// Creates a readiness source backed by the power-good state of `psu`.
    pub fn new(psu: Arc<dyn PsuBase>) -> Self {
        Self(psu)
    }
}

impl Readiness for PowerGood {
    fn is_ready(&self) -> bool {
        self.0.powergood_status()
    }
}

impl fmt::Debug for PowerGood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PowerGood")
    }
}

/// A readiness source plus the human readable reason reported when it is
/// not ready (e.g. "power off").
#[derive(Clone)]
pub struct ReadinessDependency {
    source: Arc<dyn Readiness>,
    hint: Option<String>,
}

impl ReadinessDependency {
    /// Creates a dependency on `source` with an unavailability hint.
    pub fn new(source: Arc<dyn Readiness>, hint: impl Into<String>) -> Self {
        Self {
            source,
            hint: Some(hint.into()),
        }
    }

    /// Creates a dependency on `source` without a hint.
    pub fn without_hint(source: Arc<dyn Readiness>) -> Self {
        Self { source, hint: None }
    }

    /// Creates a dependency on the power-good state of a PSU.
    pub fn power_good(psu: Arc<dyn PsuBase>, hint: impl Into<String>) -> Self {
        Self::new(Arc::new(PowerGood::new(psu)), hint)
    }

    /// Returns true if the underlying source is ready.
    pub fn is_ready(&self) -> bool {
        self.source.is_ready()
    }

    /// Returns the unavailability hint, or [`UNKNOWN_REASON_HINT`].
    pub fn hint(&self) -> &str {
        self.hint.as_deref().unwrap_or(UNKNOWN_REASON_HINT)
    }
}

impl fmt::Debug for ReadinessDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadinessDependency")
            .field("hint", &self.hint())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicBool, Ordering};

    struct Switchable(AtomicBool);

    impl PsuBase for Switchable {
        fn powergood_status(&self) -> bool {
            self.0.load(Ordering::Relaxed)
        }
    }

    #[test]
    fn test_power_good_follows_psu() {
        let psu = Arc::new(Switchable(AtomicBool::new(true)));
        let dependency = ReadinessDependency::power_good(psu.clone(), "power off");

        assert!(dependency.is_ready());
        psu.0.store(false, Ordering::Relaxed);
        assert!(!dependency.is_ready());
        assert_eq!(dependency.hint(), "power off");
    }

    #[test]
    fn test_missing_hint_falls_back() {
        let psu: Arc<dyn PsuBase> = Arc::new(Switchable(AtomicBool::new(false)));
        let dependency = ReadinessDependency::without_hint(Arc::new(PowerGood::new(psu)));
        assert_eq!(dependency.hint(), UNKNOWN_REASON_HINT);
    }

    #[test]
    fn test_debug_shows_hint() {
        let psu: Arc<dyn PsuBase> = Arc::new(Switchable(AtomicBool::new(true)));
        let dependency = ReadinessDependency::power_good(psu, "power off");
        assert!(format!("{:?}", dependency).contains("power off"));
    }
}
