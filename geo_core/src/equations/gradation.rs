//! # Index Property and Gradation Formulas
//!
//! Atterberg-limit and particle-size-distribution quantities used by soil
//! classification.
//!
//! ## Notation
//!
//! - `LL` = Liquid limit (%)
//! - `PL` = Plastic limit (%)
//! - `PI` = Plasticity index (%)
//! - `D10`, `D30`, `D60` = Grain diameters at 10/30/60 % finer (mm)
//! - `Cu` = Coefficient of uniformity
//! - `Cc` = Coefficient of curvature
//!
//! ## References
//!
//! - ASTM D2487: Unified Soil Classification System
//! - ASTM D4318: Liquid Limit, Plastic Limit, and Plasticity Index of Soils

/// Plasticity index PI = LL − PL
///
/// A PL above LL yields a negative PI; callers treat that as non-plastic.
#[inline]
pub fn plasticity_index(ll: f64, pl: f64) -> f64 {
    ll - pl
}

/// Coefficient of uniformity
///
/// # Formula
/// Cu = D60 / D10
///
/// # Example
/// ```rust
/// use geo_core::equations::gradation::uniformity_coefficient;
///
/// let cu = uniformity_coefficient(0.1, 0.3);
/// assert!((cu - 3.0).abs() < 1e-9);
/// ```
#[inline]
pub fn uniformity_coefficient(d10: f64, d60: f64) -> f64 {
    d60 / d10
}

/// Coefficient of curvature
///
/// # Formula
/// Cc = D30² / (D10 × D60)
#[inline]
pub fn curvature_coefficient(d10: f64, d30: f64, d60: f64) -> f64 {
    (d30 * d30) / (d10 * d60)
}

/// Well-graded criterion shared by the sand and gravel families:
/// Cu > 4 and 1 < Cc < 3 (all strict).
#[inline]
pub fn is_well_graded(cu: f64, cc: f64) -> bool {
    cu > 4.0 && cc > 1.0 && cc < 3.0
}
