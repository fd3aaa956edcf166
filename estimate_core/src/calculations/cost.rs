//! # Cost Aggregation
//!
//! Subtotals, tax, discount and total for a project. Nothing is clamped or
//! rounded here: a discount above 100% yields a negative total, and currency
//! rounding happens only when formatting for display.

use serde::{Deserialize, Serialize};

use crate::line_items::{Labor, Material};
use crate::project::ProjectData;

/// The six summary values of an estimate.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CostSummary {
    pub materials_subtotal: f64,
    pub labor_subtotal: f64,
    /// materials + labor
    pub subtotal: f64,
    pub tax_amount: f64,
    pub discount_amount: f64,
    /// subtotal + tax - discount
    pub total: f64,
}

/// Σ quantity × unit cost
pub fn materials_subtotal(materials: &[Material]) -> f64 {
    materials.iter().map(Material::line_total).sum()
}

/// Σ hours × rate
pub fn labor_subtotal(labor: &[Labor]) -> f64 {
    labor.iter().map(Labor::line_total).sum()
}

/// Apply tax and discount percentages to the two subtotals.
pub fn summarize(materials_subtotal: f64, labor_subtotal: f64, tax_percent: f64, discount_percent: f64) -> CostSummary {
    let subtotal = materials_subtotal + labor_subtotal;
    let tax_amount = subtotal * (tax_percent / 100.0);
    let discount_amount = subtotal * (discount_percent / 100.0);

    CostSummary {
        materials_subtotal,
        labor_subtotal,
        subtotal,
        tax_amount,
        discount_amount,
        total: subtotal + tax_amount - discount_amount,
    }
}

/// Compute the full cost summary for a project.
///
/// # Example
///
/// ```rust
/// use estimate_core::calculations::calculate_total_cost;
/// use estimate_core::line_items::Labor;
/// use estimate_core::project::ProjectData;
///
/// let mut project = ProjectData::default();
/// project.labor.push(Labor::custom("Site cleanup", 10.0, 50.0));
/// project.tax_percent = 10.0;
///
/// let summary = calculate_total_cost(&project);
/// assert_eq!(summary.subtotal, 500.0);
/// assert_eq!(summary.total, 550.0);
/// ```
pub fn calculate_total_cost(project: &ProjectData) -> CostSummary {
    summarize(
        materials_subtotal(&project.materials),
        labor_subtotal(&project.labor),
        project.tax_percent,
        project.discount_percent,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project_with(materials: Vec<Material>, labor: Vec<Labor>, tax: f64, discount: f64) -> ProjectData {
        ProjectData {
            materials,
            labor,
            tax_percent: tax,
            discount_percent: discount,
            ..ProjectData::default()
        }
    }

    #[test]
    fn test_tax_without_discount() {
        let project = project_with(
            vec![Material::custom("Lot", "lot", 1000.0, 1.0)],
            vec![Labor::custom("Crew", 10.0, 50.0)],
            10.0,
            0.0,
        );
        let summary = calculate_total_cost(&project);
        assert_eq!(summary.materials_subtotal, 1000.0);
        assert_eq!(summary.labor_subtotal, 500.0);
        assert_eq!(summary.subtotal, 1500.0);
        assert!((summary.tax_amount - 150.0).abs() < 1e-9);
        assert_eq!(summary.discount_amount, 0.0);
        assert!((summary.total - 1650.0).abs() < 1e-9);
    }

    #[test]
    fn test_discount_without_tax() {
        let project = project_with(vec![Material::custom("Lot", "lot", 250.0, 4.0)], vec![], 0.0, 20.0);
        let summary = calculate_total_cost(&project);
        assert_eq!(summary.subtotal, 1000.0);
        assert_eq!(summary.tax_amount, 0.0);
        assert!((summary.discount_amount - 200.0).abs() < 1e-9);
        assert!((summary.total - 800.0).abs() < 1e-9);
    }

    #[test]
    fn test_discount_over_100_goes_negative() {
        let summary = summarize(100.0, 0.0, 0.0, 150.0);
        assert!(summary.total < 0.0);
        assert!((summary.total + 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_negative_percent_propagates() {
        let summary = summarize(100.0, 0.0, -10.0, 0.0);
        assert!((summary.tax_amount + 10.0).abs() < 1e-9);
        assert!((summary.total - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_project_is_zero() {
        let summary = calculate_total_cost(&ProjectData::default());
        assert_eq!(summary, CostSummary::default());
    }

    #[test]
    fn test_identities_hold_exactly() {
        let summary = summarize(1234.56, 789.01, 12.0, 3.5);
        assert_eq!(summary.subtotal, summary.materials_subtotal + summary.labor_subtotal);
        assert_eq!(summary.tax_amount, summary.subtotal * (12.0 / 100.0));
        assert_eq!(summary.discount_amount, summary.subtotal * (3.5 / 100.0));
        assert_eq!(summary.total, summary.subtotal + summary.tax_amount - summary.discount_amount);
    }
}
