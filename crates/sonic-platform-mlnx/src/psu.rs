//! PSU power-good status read from hw-management.
//!
//! The real PSU objects live in the PSU module of the platform API; this
//! minimal provider reads the same `psu{N}_pwr_status` file so the thermal
//! tooling can run on its own.

use sonic_platform_base::PsuBase;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

use crate::layout::FileLayout;

/// Power-good status of one PSU, read from `psu{index}_pwr_status`.
#[derive(Debug, Clone)]
pub struct SysfsPsuStatus {
    index: u32,
    path: PathBuf,
}

impl SysfsPsuStatus {
    pub fn new(index: u32, layout: &FileLayout) -> Self {
        Self {
            index,
            path: layout.root().join(format!("psu{}_pwr_status", index)),
        }
    }

    pub fn index(&self) -> u32 {
        self.index
    }
}

impl PsuBase for SysfsPsuStatus {
    /// The file holds `1` when the PSU output is good.
    fn powergood_status(&self) -> bool {
        match fs::read_to_string(&self.path) {
            Ok(content) => content.trim() == "1",
            Err(e) => {
                debug!("PSU {} status unavailable: {}", self.index, e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_powergood_status() {
        let dir = TempDir::new().unwrap();
        let layout = FileLayout::new(dir.path());
        let psu = SysfsPsuStatus::new(1, &layout);

        assert!(!psu.powergood_status());
        fs::write(dir.path().join("psu1_pwr_status"), "1\n").unwrap();
        assert!(psu.powergood_status());
        fs::write(dir.path().join("psu1_pwr_status"), "0\n").unwrap();
        assert!(!psu.powergood_status());
        assert_eq!(psu.index(), 1);
    }
}
