//! Per-SKU thermal sensor topology.
//!
//! Each Mellanox switch SKU maps to a topology profile that tells how many
//! sensors of each category exist and where their numbering starts. The
//! catalog is plain data: it is built once at start-up and handed to the
//! [`ThermalFactory`](crate::ThermalFactory).

use std::collections::BTreeMap;
use std::ops::Range;

use crate::category::{AmbientKind, SensorCategory};
use crate::error::{ThermalError, ThermalResult};

/// First index and number of instances of a sensor category.
///
/// `count == 0` means absent, `count == 1` a single unindexed instance and
/// `count > 1` instances `start..start + count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CategorySpan {
    pub start: u32,
    pub count: u32,
}

impl CategorySpan {
    pub const ABSENT: CategorySpan = CategorySpan::new(0, 0);

    pub const fn new(start: u32, count: u32) -> Self {
        Self { start, count }
    }

    pub const fn is_absent(&self) -> bool {
        self.count == 0
    }

    /// Indices of the instances, in enumeration order. The range stops at
    /// `u32::MAX`.
    pub fn indices(&self) -> Range<u32> {
        self.start..self.start.saturating_add(self.count)
    }
}

/// Sensor topology of one hardware platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopologyProfile {
    name: String,
    cpu_core: CategorySpan,
    cpu_pack: CategorySpan,
    module: CategorySpan,
    psu: CategorySpan,
    gearbox: CategorySpan,
    ambient: Vec<AmbientKind>,
}

impl TopologyProfile {
    /// Creates a profile with every category absent.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cpu_core: CategorySpan::ABSENT,
            cpu_pack: CategorySpan::ABSENT,
            module: CategorySpan::ABSENT,
            psu: CategorySpan::ABSENT,
            gearbox: CategorySpan::ABSENT,
            ambient: Vec::new(),
        }
    }

    /// Sets the span of a numeric category.
    ///
    /// Ambient sensors are listed by kind, use [`Self::with_ambient`].
    pub fn with_span(mut self, category: SensorCategory, span: CategorySpan) -> Self {
        match category {
            SensorCategory::CpuCore => self.cpu_core = span,
            SensorCategory::CpuPack => self.cpu_pack = span,
            SensorCategory::Module => self.module = span,
            SensorCategory::Psu => self.psu = span,
            SensorCategory::Gearbox => self.gearbox = span,
            SensorCategory::Ambient => {}
        }
        self
    }

    /// Sets the ambient sensors present, in enumeration order.
    pub fn with_ambient(mut self, ambient: impl IntoIterator<Item = AmbientKind>) -> Self {
        self.ambient = ambient.into_iter().collect();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the span of a category. For ambient the count is the number
    /// of ambient sensors listed.
    pub fn span(&self, category: SensorCategory) -> CategorySpan {
        match category {
            SensorCategory::CpuCore => self.cpu_core,
            SensorCategory::CpuPack => self.cpu_pack,
            SensorCategory::Module => self.module,
            SensorCategory::Psu => self.psu,
            SensorCategory::Gearbox => self.gearbox,
            SensorCategory::Ambient => CategorySpan::new(0, self.ambient.len() as u32),
        }
    }

    pub fn ambient(&self) -> &[AmbientKind] {
        &self.ambient
    }

    /// Total number of sensors this profile yields.
    pub fn sensor_count(&self) -> usize {
        SensorCategory::ENUMERATION_ORDER
            .iter()
            .map(|category| self.span(*category).count as usize)
            .sum()
    }
}

struct BuiltinProfile {
    name: &'static str,
    cpu_core: CategorySpan,
    module: CategorySpan,
    psu: CategorySpan,
    cpu_pack: CategorySpan,
    gearbox: CategorySpan,
    ambient: &'static [AmbientKind],
}

const AMBIENT_SN2000: &[AmbientKind] = &[AmbientKind::Asic, AmbientKind::Port, AmbientKind::Fan];
const AMBIENT_SN3000: &[AmbientKind] = &[
    AmbientKind::Asic,
    AmbientKind::Comex,
    AmbientKind::Port,
    AmbientKind::Fan,
];

const BUILTIN_PROFILES: [BuiltinProfile; 8] = [
    BuiltinProfile {
        name: "2700",
        cpu_core: CategorySpan::new(0, 2),
        module: CategorySpan::new(1, 32),
        psu: CategorySpan::new(1, 2),
        cpu_pack: CategorySpan::new(0, 1),
        gearbox: CategorySpan::ABSENT,
        ambient: AMBIENT_SN2000,
    },
    BuiltinProfile {
        name: "2100",
        cpu_core: CategorySpan::new(0, 4),
        module: CategorySpan::new(1, 16),
        psu: CategorySpan::ABSENT,
        cpu_pack: CategorySpan::ABSENT,
        gearbox: CategorySpan::ABSENT,
        ambient: AMBIENT_SN2000,
    },
    BuiltinProfile {
        name: "2410",
        cpu_core: CategorySpan::new(0, 2),
        module: CategorySpan::new(1, 56),
        psu: CategorySpan::new(1, 2),
        cpu_pack: CategorySpan::new(0, 1),
        gearbox: CategorySpan::ABSENT,
        ambient: AMBIENT_SN2000,
    },
    BuiltinProfile {
        name: "2740",
        cpu_core: CategorySpan::new(0, 4),
        module: CategorySpan::new(1, 32),
        psu: CategorySpan::new(1, 2),
        cpu_pack: CategorySpan::ABSENT,
        gearbox: CategorySpan::ABSENT,
        ambient: AMBIENT_SN2000,
    },
    BuiltinProfile {
        name: "2010",
        cpu_core: CategorySpan::new(0, 4),
        module: CategorySpan::new(1, 22),
        psu: CategorySpan::ABSENT,
        cpu_pack: CategorySpan::ABSENT,
        gearbox: CategorySpan::ABSENT,
        ambient: AMBIENT_SN2000,
    },
    BuiltinProfile {
        name: "3700",
        cpu_core: CategorySpan::new(0, 4),
        module: CategorySpan::new(1, 32),
        psu: CategorySpan::new(1, 2),
        cpu_pack: CategorySpan::new(0, 1),
        gearbox: CategorySpan::ABSENT,
        ambient: AMBIENT_SN3000,
    },
    BuiltinProfile {
        name: "3700C",
        cpu_core: CategorySpan::new(0, 2),
        module: CategorySpan::new(1, 32),
        psu: CategorySpan::new(1, 2),
        cpu_pack: CategorySpan::new(0, 1),
        gearbox: CategorySpan::ABSENT,
        ambient: AMBIENT_SN3000,
    },
    BuiltinProfile {
        name: "3800",
        cpu_core: CategorySpan::new(0, 4),
        module: CategorySpan::new(1, 64),
        psu: CategorySpan::new(1, 2),
        cpu_pack: CategorySpan::new(0, 1),
        gearbox: CategorySpan::new(1, 32),
        ambient: AMBIENT_SN3000,
    },
];

/// SKU to profile name. Keep in sync with [`BUILTIN_PROFILES`].
const BUILTIN_SKUS: [(&str, &str); 11] = [
    ("ACS-MSN2700", "2700"),
    ("LS-SN2700", "2700"),
    ("Mellanox-SN2700", "2700"),
    ("Mellanox-SN2700-D48C8", "2700"),
    ("ACS-MSN2740", "2740"),
    ("ACS-MSN2100", "2100"),
    ("ACS-MSN2410", "2410"),
    ("ACS-MSN2010", "2010"),
    ("ACS-MSN3700", "3700"),
    ("ACS-MSN3700C", "3700C"),
    ("ACS-MSN3800", "3800"),
];

impl BuiltinProfile {
    fn to_profile(&self) -> TopologyProfile {
        TopologyProfile::new(self.name)
            .with_span(SensorCategory::CpuCore, self.cpu_core)
            .with_span(SensorCategory::CpuPack, self.cpu_pack)
            .with_span(SensorCategory::Module, self.module)
            .with_span(SensorCategory::Psu, self.psu)
            .with_span(SensorCategory::Gearbox, self.gearbox)
            .with_ambient(self.ambient.iter().copied())
    }
}

/// Lookup table from hardware SKU to [`TopologyProfile`].
#[derive(Debug, Clone, Default)]
pub struct TopologyCatalog {
    profiles: Vec<TopologyProfile>,
    skus: BTreeMap<String, usize>,
}

impl TopologyCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the catalog of supported Mellanox platforms.
    pub fn mellanox() -> Self {
        let mut catalog = Self::new();
        for builtin in &BUILTIN_PROFILES {
            catalog.register_profile(builtin.to_profile());
        }
        for (sku, profile) in BUILTIN_SKUS {
            // Both tables are static; a mismatch is caught by the catalog tests.
            if let Err(e) = catalog.register_sku(sku, profile) {
                tracing::error!("Built-in SKU {} skipped: {}", sku, e);
            }
        }
        catalog
    }

    /// Adds a profile, replacing any profile with the same name.
    pub fn register_profile(&mut self, profile: TopologyProfile) {
        match self.profiles.iter().position(|p| p.name == profile.name) {
            Some(pos) => self.profiles[pos] = profile,
            None => self.profiles.push(profile),
        }
    }

    /// Maps `sku` to the profile named `profile`.
    pub fn register_sku(&mut self, sku: impl Into<String>, profile: &str) -> ThermalResult<()> {
        let pos = self
            .profiles
            .iter()
            .position(|p| p.name == profile)
            .ok_or_else(|| ThermalError::config(format!("unknown thermal profile '{}'", profile)))?;
        self.skus.insert(sku.into(), pos);
        Ok(())
    }

    /// Returns the topology of `sku`.
    pub fn lookup(&self, sku: &str) -> ThermalResult<&TopologyProfile> {
        self.skus
            .get(sku)
            .map(|pos| &self.profiles[*pos])
            .ok_or_else(|| ThermalError::unknown_sku(sku))
    }

    pub fn contains_sku(&self, sku: &str) -> bool {
        self.skus.contains_key(sku)
    }

    /// Registered SKUs, sorted.
    pub fn skus(&self) -> impl Iterator<Item = &str> {
        self.skus.keys().map(String::as_str)
    }

    pub fn profiles(&self) -> &[TopologyProfile] {
        &self.profiles
    }
}
