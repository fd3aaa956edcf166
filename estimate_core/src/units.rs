//! # Unit Types
//!
//! Type-safe wrappers for the few physical units the estimator deals with.
//! These are plain f64 newtypes that serialize as bare numbers.
//!
//! ## Metric Units
//!
//! Floor plans are drawn in meters and areas are reported in square meters,
//! which is also the basis of every multiplier in the rate catalog.
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::units::{Meters, SqMeters};
//!
//! let area: SqMeters = Meters(3.0) * Meters(4.0);
//! assert_eq!(area.value(), 12.0);
//!
//! let total: SqMeters = [area, SqMeters(8.0)].into_iter().sum();
//! assert_eq!(total, SqMeters(20.0));
//! ```

use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::{Add, Div, Mul, Sub};

// ============================================================================
// Length and Area
// ============================================================================

/// Length in meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

/// Area in square meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqMeters(pub f64);

impl Mul<Meters> for Meters {
    type Output = SqMeters;
    fn mul(self, rhs: Meters) -> SqMeters {
        SqMeters(self.0 * rhs.0)
    }
}

impl Sum for SqMeters {
    fn sum<I: Iterator<Item = SqMeters>>(iter: I) -> Self {
        iter.fold(SqMeters(0.0), |acc, a| acc + a)
    }
}

impl std::fmt::Display for SqMeters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match f.precision() {
            Some(p) => write!(f, "{:.*} m²", p, self.0),
            None => write!(f, "{} m²", self.0),
        }
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

impl_arithmetic!(Meters);
impl_arithmetic!(SqMeters);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meters_product_is_area() {
        let area = Meters(2.5) * Meters(4.0);
        assert_eq!(area, SqMeters(10.0));
    }

    #[test]
    fn test_arithmetic() {
        let a = SqMeters(10.0);
        let b = SqMeters(5.0);
        assert_eq!((a + b).0, 15.0);
        assert_eq!((a - b).0, 5.0);
        assert_eq!((a * 2.0).0, 20.0);
        assert_eq!((a / 2.0).0, 5.0);
    }

    #[test]
    fn test_empty_sum_is_zero() {
        let total: SqMeters = Vec::<SqMeters>::new().into_iter().sum();
        assert_eq!(total.value(), 0.0);
    }

    #[test]
    fn test_display_precision() {
        assert_eq!(format!("{:.1}", SqMeters(12.04)), "12.0 m²");
    }

    #[test]
    fn test_serialization() {
        let len = Meters(3.5);
        let json = serde_json::to_string(&len).unwrap();
        assert_eq!(json, "3.5");

        let roundtrip: Meters = serde_json::from_str(&json).unwrap();
        assert_eq!(len, roundtrip);
    }
}
