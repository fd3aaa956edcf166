//! # Rate Catalog
//!
//! The per-square-meter multipliers and unit prices that drive the estimator,
//! kept as data rather than inline formulas.
//!
//! The standard catalog is compiled in as two immutable tables
//! ([`STANDARD_MATERIALS`], [`STANDARD_LABOR`]). A project can carry an
//! overridden catalog loaded from TOML:
//!
//! ```toml
//! [[materials]]
//! id = "mat-1"
//! name = "Cement (5kg bags)"
//! unit = "bags"
//! unit_cost = 16.5
//! per_sq_m = 0.15
//! ```
//!
//! Omitted tables fall back to the standard ones.
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::catalog::Catalog;
//!
//! let catalog = Catalog::standard();
//! assert_eq!(catalog.materials.len(), 6);
//! assert_eq!(catalog.material("mat-4").unwrap().per_sq_m, 80.0);
//! ```

use std::borrow::Cow;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::errors::{EstimateError, EstimateResult};

/// One material row: unit price and how much is needed per m² of floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialRate {
    /// Fixed identifier carried onto generated line items (e.g., "mat-1")
    pub id: Cow<'static, str>,
    /// Display name
    pub name: Cow<'static, str>,
    /// Purchase unit label (bags, tons, pieces...)
    pub unit: Cow<'static, str>,
    /// Price per unit
    pub unit_cost: f64,
    /// Units required per square meter of floor area
    pub per_sq_m: f64,
}

/// One labor row: hours needed per m² and the hourly rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaborRate {
    /// Fixed identifier carried onto generated line items (e.g., "labor-1")
    pub id: Cow<'static, str>,
    /// Trade / task description
    pub description: Cow<'static, str>,
    /// Hours required per square meter of floor area
    pub hours_per_sq_m: f64,
    /// Price per hour
    pub hourly_rate: f64,
}

const fn material(
    id: &'static str,
    name: &'static str,
    unit: &'static str,
    unit_cost: f64,
    per_sq_m: f64,
) -> MaterialRate {
    MaterialRate {
        id: Cow::Borrowed(id),
        name: Cow::Borrowed(name),
        unit: Cow::Borrowed(unit),
        unit_cost,
        per_sq_m,
    }
}

const fn labor(id: &'static str, description: &'static str, hours_per_sq_m: f64, hourly_rate: f64) -> LaborRate {
    LaborRate {
        id: Cow::Borrowed(id),
        description: Cow::Borrowed(description),
        hours_per_sq_m,
        hourly_rate,
    }
}

/// Standard material table. Tiles include 10% wastage.
pub static STANDARD_MATERIALS: [MaterialRate; 6] = [
    material("mat-1", "Cement (5kg bags)", "bags", 15.0, 0.15),
    material("mat-2", "Tiles", "m²", 25.0, 1.1),
    material("mat-3", "Paint", "liters", 8.0, 0.4),
    material("mat-4", "Bricks", "pieces", 0.5, 80.0),
    material("mat-5", "Sand", "tons", 30.0, 0.08),
    material("mat-6", "Gravel", "tons", 35.0, 0.07),
];

/// Standard labor table
pub static STANDARD_LABOR: [LaborRate; 5] = [
    labor("labor-1", "Masonry Work", 2.0, 20.0),
    labor("labor-2", "Tiling", 1.5, 25.0),
    labor("labor-3", "Painting", 1.0, 18.0),
    labor("labor-4", "Electrical Work", 0.5, 30.0),
    labor("labor-5", "Plumbing", 0.5, 28.0),
];

/// A complete rate card: material rows and labor rows, in output order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Catalog {
    pub materials: Vec<MaterialRate>,
    pub labor: Vec<LaborRate>,
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::standard()
    }
}

impl Catalog {
    /// The built-in rate card.
    pub fn standard() -> Self {
        Catalog {
            materials: STANDARD_MATERIALS.to_vec(),
            labor: STANDARD_LABOR.to_vec(),
        }
    }

    /// Parse and validate a catalog from TOML text.
    pub fn from_toml_str(text: &str) -> EstimateResult<Self> {
        let catalog: Catalog =
            toml::from_str(text).map_err(|e| EstimateError::serialization(format!("Invalid catalog TOML: {}", e)))?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Look up a material row by id
    pub fn material(&self, id: &str) -> Option<&MaterialRate> {
        self.materials.iter().find(|m| m.id == id)
    }

    /// Look up a labor row by id
    pub fn labor_rate(&self, id: &str) -> Option<&LaborRate> {
        self.labor.iter().find(|l| l.id == id)
    }

    /// Check ids are present and unique and every number is finite and non-negative.
    pub fn validate(&self) -> EstimateResult<()> {
        let mut seen = HashSet::new();
        for row in &self.materials {
            check_id("materials.id", &row.id, &mut seen)?;
            check_non_negative(&format!("materials.{}.unit_cost", row.id), row.unit_cost)?;
            check_non_negative(&format!("materials.{}.per_sq_m", row.id), row.per_sq_m)?;
        }

        let mut seen = HashSet::new();
        for row in &self.labor {
            check_id("labor.id", &row.id, &mut seen)?;
            check_non_negative(&format!("labor.{}.hours_per_sq_m", row.id), row.hours_per_sq_m)?;
            check_non_negative(&format!("labor.{}.hourly_rate", row.id), row.hourly_rate)?;
        }

        Ok(())
    }
}

fn check_id<'a>(field: &str, id: &'a str, seen: &mut HashSet<&'a str>) -> EstimateResult<()> {
    if id.trim().is_empty() {
        return Err(EstimateError::invalid_input(field, id, "Identifier must not be empty"));
    }
    if !seen.insert(id) {
        return Err(EstimateError::invalid_input(field, id, "Duplicate identifier"));
    }
    Ok(())
}

fn check_non_negative(field: &str, value: f64) -> EstimateResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(EstimateError::invalid_input(
            field,
            value.to_string(),
            "Must be a finite, non-negative number",
        ));
    }
    Ok(())
}
