//! # Material and Labor Estimator
//!
//! Maps total floor area to line items using the rate catalog. Every
//! quantity is `ceil(area × multiplier)` since partial bags, tons or tiles
//! cannot be purchased.
//!
//! Output is fully determined by the area and the catalog: identifiers come
//! from the catalog rows, so two calls with the same area are identical and
//! a zero area still yields one row per catalog entry (with zero quantity).
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::calculations::estimate_materials;
//! use estimate_core::units::SqMeters;
//!
//! let materials = estimate_materials(SqMeters(12.0));
//! let quantities: Vec<f64> = materials.iter().map(|m| m.quantity).collect();
//! assert_eq!(quantities, [2.0, 14.0, 5.0, 960.0, 1.0, 1.0]);
//! ```

use crate::catalog::{Catalog, LaborRate, MaterialRate, STANDARD_LABOR, STANDARD_MATERIALS};
use crate::line_items::{Labor, Material};
use crate::units::SqMeters;

/// Material line items for `area` using the standard catalog.
pub fn estimate_materials(area: SqMeters) -> Vec<Material> {
    materials_from_rates(&STANDARD_MATERIALS, area)
}

/// Default labor line items for `area` using the standard catalog.
///
/// Not applied automatically on room edits; see
/// [`crate::project::ProjectData::populate_default_labor`].
pub fn estimate_default_labor(area: SqMeters) -> Vec<Labor> {
    labor_from_rates(&STANDARD_LABOR, area)
}

/// Material line items for `area` using a project-specific catalog.
pub fn estimate_materials_with(catalog: &Catalog, area: SqMeters) -> Vec<Material> {
    materials_from_rates(&catalog.materials, area)
}

/// Labor line items for `area` using a project-specific catalog.
pub fn estimate_labor_with(catalog: &Catalog, area: SqMeters) -> Vec<Labor> {
    labor_from_rates(&catalog.labor, area)
}

fn materials_from_rates(rates: &[MaterialRate], area: SqMeters) -> Vec<Material> {
    rates
        .iter()
        .map(|rate| Material {
            id: rate.id.to_string(),
            name: rate.name.to_string(),
            unit: rate.unit.to_string(),
            unit_cost: rate.unit_cost,
            quantity: ceil_units(area, rate.per_sq_m),
        })
        .collect()
}

fn labor_from_rates(rates: &[LaborRate], area: SqMeters) -> Vec<Labor> {
    rates
        .iter()
        .map(|rate| Labor {
            id: rate.id.to_string(),
            description: rate.description.to_string(),
            hours: ceil_units(area, rate.hours_per_sq_m),
            rate: rate.hourly_rate,
        })
        .collect()
}

/// Whole units needed to cover `area` at `per_sq_m`
fn ceil_units(area: SqMeters, per_sq_m: f64) -> f64 {
    (area.value() * per_sq_m).ceil()
}
