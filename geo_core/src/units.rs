//! # Unit Types
//!
//! Type-safe wrappers for the SI units used in soil mechanics. These are plain
//! f64 newtypes: cheap to copy and serialized as bare numbers.
//!
//! ## Units
//!
//! - Length: millimetres (mm) for grain diameters
//! - Stress: kilopascals (kPa)
//! - Index properties: percent (%)
//!
//! ## Example
//!
//! ```rust
//! use geo_core::units::KiloPascals;
//!
//! // Effective stress from total stress and pore pressure
//! let sigma_v_eff = KiloPascals(90.0) - KiloPascals(29.43);
//! assert!((sigma_v_eff.value() - 60.57).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// Standard gravitational acceleration used throughout (m/s²)
pub const STANDARD_GRAVITY: f64 = 9.81;

/// Length in millimetres (grain diameters)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

/// Stress in kilopascals
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KiloPascals(pub f64);

/// Percentage (0-100)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percent(pub f64);

impl Percent {
    /// True when the value lies in [0, 100]
    pub fn in_range(self) -> bool {
        (0.0..=100.0).contains(&self.0)
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

impl_arithmetic!(Millimeters);
impl_arithmetic!(KiloPascals);
impl_arithmetic!(Percent);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arithmetic() {
        let a = KiloPascals(90.0);
        let b = KiloPascals(29.43);
        assert!(((a - b).0 - 60.57).abs() < 1e-9);
        assert!(((a + b).0 - 119.43).abs() < 1e-9);
        assert_eq!((a * 2.0).0, 180.0);
        assert_eq!((a / 2.0).0, 45.0);
    }

    #[test]
    fn test_percent_range() {
        assert!(Percent(0.0).in_range());
        assert!(Percent(100.0).in_range());
        assert!(!Percent(100.5).in_range());
        assert!(!Percent(f64::NAN).in_range());
    }

    #[test]
    fn test_serialization() {
        let d10 = Millimeters(0.075);
        let json = serde_json::to_string(&d10).unwrap();
        assert_eq!(json, "0.075");

        let roundtrip: Millimeters = serde_json::from_str(&json).unwrap();
        assert_eq!(d10, roundtrip);
    }
}
