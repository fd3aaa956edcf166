//! # estimate_core - Floor-Plan Cost Estimation Engine
//!
//! `estimate_core` turns a floor plan (floors and rectangular rooms) into a
//! construction cost estimate: total floor area, material quantities derived
//! from a rate catalog, labor line items and a cost summary with tax and
//! discount. All inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Pure engine**: area, material estimation and cost aggregation are
//!   plain functions over immutable inputs
//! - **Derived, not stored**: totals are recomputed from the latest project
//!   snapshot and never cached
//! - **Rich Errors**: rejected edits return structured errors and leave the
//!   project unchanged
//!
//! ## Quick Start
//!
//! ```rust
//! use estimate_core::project::{ProjectData, GROUND_FLOOR_ID};
//! use estimate_core::rooms::RoomType;
//!
//! let mut project = ProjectData::default();
//! let room = project.new_room(RoomType::Bedroom, GROUND_FLOOR_ID);
//! project.add_room(room).unwrap();
//!
//! // One 3 m x 4 m room
//! assert_eq!(project.total_area().value(), 12.0);
//! let bricks = project.materials.iter().find(|m| m.name == "Bricks").unwrap();
//! assert_eq!(bricks.quantity, 960.0);
//!
//! let summary = project.cost_summary();
//! assert_eq!(summary.total, summary.subtotal + summary.tax_amount - summary.discount_amount);
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Area aggregator, estimator and cost aggregator
//! - [`catalog`] - Material and labor rate tables
//! - [`project`] - Project state container and its edit operations
//! - [`session`] - The process-scoped current project
//! - [`settings`] - Defaults for new projects, loaded from TOML
//! - [`pdf`] - Estimate document rendering
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod catalog;
pub mod currency;
pub mod errors;
pub mod line_items;
pub mod pdf;
pub mod project;
pub mod rooms;
pub mod session;
pub mod settings;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{calculate_total_cost, estimate_materials, total_area, CostSummary};
pub use catalog::Catalog;
pub use currency::CurrencyStyle;
pub use errors::{EstimateError, EstimateResult};
pub use line_items::{Labor, Material};
pub use project::{ClientInfo, Floor, ProjectData};
pub use rooms::{Room, RoomType};
pub use settings::EstimatorSettings;
