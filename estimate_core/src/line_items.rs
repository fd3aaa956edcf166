//! # Line Items
//!
//! Material and labor rows of an estimate. Materials are normally produced by
//! the estimator and replaced wholesale on every room change; labor rows are
//! managed by the user (or populated once from the default labor rates).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{EstimateError, EstimateResult};

/// A material line: `quantity × unit_cost`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub id: String,
    pub name: String,
    /// Purchase unit label
    pub unit: String,
    /// Price per unit (>= 0)
    pub unit_cost: f64,
    /// Number of units (>= 0)
    pub quantity: f64,
}

impl Material {
    /// A manually added material with a fresh identifier
    pub fn custom(name: impl Into<String>, unit: impl Into<String>, unit_cost: f64, quantity: f64) -> Self {
        Material {
            id: format!("mat-{}", Uuid::new_v4()),
            name: name.into(),
            unit: unit.into(),
            unit_cost,
            quantity,
        }
    }

    /// Line total
    pub fn line_total(&self) -> f64 {
        self.quantity * self.unit_cost
    }

    pub(crate) fn validate(&self) -> EstimateResult<()> {
        validate_positive("quantity", self.quantity)?;
        validate_non_negative("unit_cost", self.unit_cost)
    }
}

/// A labor line: `hours × rate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Labor {
    pub id: String,
    pub description: String,
    /// Hours of work (>= 0)
    pub hours: f64,
    /// Hourly rate (>= 0)
    pub rate: f64,
}

impl Labor {
    /// A manually added labor line with a fresh identifier
    pub fn custom(description: impl Into<String>, hours: f64, rate: f64) -> Self {
        Labor {
            id: format!("labor-{}", Uuid::new_v4()),
            description: description.into(),
            hours,
            rate,
        }
    }

    /// Line total
    pub fn line_total(&self) -> f64 {
        self.hours * self.rate
    }

    pub(crate) fn validate(&self) -> EstimateResult<()> {
        validate_positive("hours", self.hours)?;
        validate_non_negative("rate", self.rate)
    }
}

/// Partial update for a material line
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialUpdate {
    pub name: Option<String>,
    pub unit: Option<String>,
    pub unit_cost: Option<f64>,
    pub quantity: Option<f64>,
}

impl MaterialUpdate {
    /// Apply to a copy of `material`, validating the result
    pub(crate) fn applied_to(&self, material: &Material) -> EstimateResult<Material> {
        let mut updated = material.clone();
        if let Some(name) = &self.name {
            updated.name = name.clone();
        }
        if let Some(unit) = &self.unit {
            updated.unit = unit.clone();
        }
        if let Some(unit_cost) = self.unit_cost {
            validate_non_negative("unit_cost", unit_cost)?;
            updated.unit_cost = unit_cost;
        }
        if let Some(quantity) = self.quantity {
            validate_positive("quantity", quantity)?;
            updated.quantity = quantity;
        }
        Ok(updated)
    }
}

/// Partial update for a labor line
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaborUpdate {
    pub description: Option<String>,
    pub hours: Option<f64>,
    pub rate: Option<f64>,
}

impl LaborUpdate {
    /// Apply to a copy of `labor`, validating the result
    pub(crate) fn applied_to(&self, labor: &Labor) -> EstimateResult<Labor> {
        let mut updated = labor.clone();
        if let Some(description) = &self.description {
            updated.description = description.clone();
        }
        if let Some(hours) = self.hours {
            validate_positive("hours", hours)?;
            updated.hours = hours;
        }
        if let Some(rate) = self.rate {
            validate_non_negative("rate", rate)?;
            updated.rate = rate;
        }
        Ok(updated)
    }
}

fn validate_positive(field: &str, value: f64) -> EstimateResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(EstimateError::invalid_input(field, value.to_string(), "Must be greater than zero"));
    }
    Ok(())
}

pub(crate) fn validate_non_negative(field: &str, value: f64) -> EstimateResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(EstimateError::invalid_input(field, value.to_string(), "Must not be negative"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_totals() {
        let cement = Material::custom("Cement", "bags", 15.0, 4.0);
        assert_eq!(cement.line_total(), 60.0);
        assert!(cement.id.starts_with("mat-"));

        let tiling = Labor::custom("Tiling", 6.0, 25.0);
        assert_eq!(tiling.line_total(), 150.0);
        assert!(tiling.id.starts_with("labor-"));
    }

    #[test]
    fn test_material_update_rejects_zero_quantity() {
        let paint = Material::custom("Paint", "liters", 8.0, 5.0);
        let update = MaterialUpdate {
            quantity: Some(0.0),
            ..Default::default()
        };
        assert!(update.applied_to(&paint).is_err());
    }

    #[test]
    fn test_material_update_allows_free_item() {
        let paint = Material::custom("Paint", "liters", 8.0, 5.0);
        let update = MaterialUpdate {
            unit_cost: Some(0.0),
            name: Some("Donated paint".into()),
            ..Default::default()
        };
        let updated = update.applied_to(&paint).unwrap();
        assert_eq!(updated.unit_cost, 0.0);
        assert_eq!(updated.name, "Donated paint");
        assert_eq!(updated.quantity, 5.0);
    }

    #[test]
    fn test_labor_update_validation() {
        let plumbing = Labor::custom("Plumbing", 6.0, 28.0);
        let bad_rate = LaborUpdate {
            rate: Some(-5.0),
            ..Default::default()
        };
        assert!(bad_rate.applied_to(&plumbing).is_err());

        let bad_hours = LaborUpdate {
            hours: Some(f64::NAN),
            ..Default::default()
        };
        assert!(bad_hours.applied_to(&plumbing).is_err());

        let ok = LaborUpdate {
            hours: Some(7.5),
            ..Default::default()
        };
        assert_eq!(ok.applied_to(&plumbing).unwrap().hours, 7.5);
    }
}
