//! # Estimator Settings
//!
//! Defaults applied to new projects plus presentation options. Settings are
//! optional: every field has a default and a TOML file only needs to mention
//! what it changes.
//!
//! ```toml
//! default_tax_percent = 12.0
//! due_in_days = 14
//!
//! [currency]
//! code = "USD"
//! symbol = "$"
//!
//! [[catalog.materials]]
//! id = "mat-1"
//! name = "Cement (40kg bags)"
//! unit = "bags"
//! unit_cost = 9.5
//! per_sq_m = 0.2
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::currency::CurrencyStyle;
use crate::errors::{EstimateError, EstimateResult};
use crate::line_items::validate_non_negative;

/// Default tax applied to new projects (%)
pub const DEFAULT_TAX_PERCENT: f64 = 10.0;

/// Default days between issue date and due date
pub const DEFAULT_DUE_IN_DAYS: i64 = 30;

/// Settings for new projects and for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorSettings {
    /// Tax percentage for new projects
    pub default_tax_percent: f64,
    /// Discount percentage for new projects
    pub default_discount_percent: f64,
    /// Days from today until the estimate is due
    pub due_in_days: i64,
    /// Currency used for display
    pub currency: CurrencyStyle,
    /// Rate catalog used to derive line items
    pub catalog: Catalog,
}

impl Default for EstimatorSettings {
    fn default() -> Self {
        EstimatorSettings {
            default_tax_percent: DEFAULT_TAX_PERCENT,
            default_discount_percent: 0.0,
            due_in_days: DEFAULT_DUE_IN_DAYS,
            currency: CurrencyStyle::default(),
            catalog: Catalog::standard(),
        }
    }
}

impl EstimatorSettings {
    /// Parse and validate settings from TOML text.
    pub fn from_toml_str(text: &str) -> EstimateResult<Self> {
        let settings: EstimatorSettings =
            toml::from_str(text).map_err(|e| EstimateError::serialization(format!("Invalid settings TOML: {}", e)))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a TOML file.
    pub fn load(path: &Path) -> EstimateResult<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| EstimateError::file_error("read settings", path.display().to_string(), e.to_string()))?;
        Self::from_toml_str(&text)
    }

    /// Reject negative percentages, negative due offsets and invalid catalogs.
    pub fn validate(&self) -> EstimateResult<()> {
        validate_non_negative("default_tax_percent", self.default_tax_percent)?;
        validate_non_negative("default_discount_percent", self.default_discount_percent)?;
        if self.due_in_days < 0 {
            return Err(EstimateError::invalid_input(
                "due_in_days",
                self.due_in_days.to_string(),
                "Due date offset must not be negative",
            ));
        }
        self.catalog.validate()
    }
}
