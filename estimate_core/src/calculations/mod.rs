//! # Estimate Calculations
//!
//! The three pure functions behind every estimate:
//!
//! - [`area`] - rooms to total floor area
//! - [`estimator`] - floor area to material (and default labor) line items
//! - [`cost`] - line items, tax and discount to the cost summary
//!
//! None of them hold state, perform I/O or fail; callers recompute from the
//! latest project snapshot whenever they need a value.

pub mod area;
pub mod cost;
pub mod estimator;

// Re-export commonly used items
pub use area::{floor_area, total_area};
pub use cost::{calculate_total_cost, labor_subtotal, materials_subtotal, summarize, CostSummary};
pub use estimator::{estimate_default_labor, estimate_labor_with, estimate_materials, estimate_materials_with};
