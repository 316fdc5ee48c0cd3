//! Builds the thermal sensor list of a platform from its topology.

use sonic_platform_base::{PsuBase, ReadinessDependency};
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::catalog::{TopologyCatalog, TopologyProfile};
use crate::category::SensorCategory;
use crate::error::{ThermalError, ThermalResult};
use crate::layout::FileLayout;
use crate::thermal::Thermal;

/// Hint logged when a PSU sensor is skipped because the PSU is not powered.
pub const PSU_POWER_OFF_HINT: &str = "power off";

/// Creates [`Thermal`] objects for every sensor a SKU has.
///
/// Sensors are produced category by category in
/// [`SensorCategory::ENUMERATION_ORDER`] and by ascending index within a
/// category. Callers index the resulting list positionally.
#[derive(Debug, Clone)]
pub struct ThermalFactory {
    catalog: TopologyCatalog,
    layout: FileLayout,
}

impl ThermalFactory {
    pub fn new(catalog: TopologyCatalog, layout: FileLayout) -> Self {
        Self { catalog, layout }
    }

    pub fn catalog(&self) -> &TopologyCatalog {
        &self.catalog
    }

    pub fn layout(&self) -> &FileLayout {
        &self.layout
    }

    /// Appends the sensors of `sku` to `thermals`.
    ///
    /// `psus` must hold at least as many PSU status providers as the
    /// profile declares PSU sensors; PSU sensor `n` of the profile is gated
    /// on `psus[n]`. On error, sensors of categories already processed
    /// stay in `thermals`.
    #[instrument(skip(self, psus, thermals), fields(psu_count = psus.len()))]
    pub fn initialize(
        &self,
        sku: &str,
        psus: &[Arc<dyn PsuBase>],
        thermals: &mut Vec<Thermal>,
    ) -> ThermalResult<()> {
        let profile = self.catalog.lookup(sku)?;
        let before = thermals.len();

        for category in SensorCategory::ENUMERATION_ORDER {
            self.append_category(profile, category, psus, thermals)?;
        }

        info!(
            "Initialized {} thermals for {} (profile {})",
            thermals.len() - before,
            sku,
            profile.name()
        );
        Ok(())
    }

    fn append_category(
        &self,
        profile: &TopologyProfile,
        category: SensorCategory,
        psus: &[Arc<dyn PsuBase>],
        thermals: &mut Vec<Thermal>,
    ) -> ThermalResult<()> {
        if category == SensorCategory::Ambient {
            for kind in profile.ambient() {
                thermals.push(Thermal::ambient(*kind, &self.layout));
            }
            debug!("{}: {} sensors", category, profile.ambient().len());
            return Ok(());
        }

        let span = profile.span(category);
        if span.is_absent() {
            debug!("{}: absent", category);
            return Ok(());
        }

        if category == SensorCategory::Psu && psus.len() < span.count as usize {
            return Err(ThermalError::PsuIndexOutOfRange {
                index: psus.len(),
                available: psus.len(),
            });
        }

        if span.count == 1 {
            let thermal = Thermal::singleton(category, &self.layout)?;
            thermals.push(bind_psu_dependency(category, 0, thermal, psus));
        } else {
            for (position, index) in span.indices().enumerate() {
                let thermal = Thermal::indexed(category, index, &self.layout)?;
                thermals.push(bind_psu_dependency(category, position, thermal, psus));
            }
        }

        debug!("{}: {} sensors from index {}", category, span.count, span.start);
        Ok(())
    }
}

/// PSU sensor `position` reads only while `psus[position]` reports power good.
fn bind_psu_dependency(
    category: SensorCategory,
    position: usize,
    thermal: Thermal,
    psus: &[Arc<dyn PsuBase>],
) -> Thermal {
    match (category, psus.get(position)) {
        (SensorCategory::Psu, Some(psu)) => thermal.with_dependency(
            ReadinessDependency::power_good(Arc::clone(psu), PSU_POWER_OFF_HINT),
        ),
        _ => thermal,
    }
}

impl Default for ThermalFactory {
    fn default() -> Self {
        Self::new(TopologyCatalog::mellanox(), FileLayout::default())
    }
}

/// Builds the sensors of `sku` with the built-in Mellanox catalog under the
/// default hw-management root.
pub fn initialize_thermals(sku: &str, psus: &[Arc<dyn PsuBase>]) -> ThermalResult<Vec<Thermal>> {
    let mut thermals = Vec::new();
    ThermalFactory::default().initialize(sku, psus, &mut thermals)?;
    Ok(thermals)
}
