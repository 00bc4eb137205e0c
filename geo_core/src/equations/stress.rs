//! # In-Situ Stress and Seismic Demand Formulas
//!
//! Vertical stress at depth and the simplified-procedure terms that turn a
//! peak ground acceleration into a cyclic stress ratio.
//!
//! ## Notation
//!
//! - `γ` = Total unit weight of soil (kN/m³)
//! - `z` = Depth below ground surface (m)
//! - `zw` = Depth to water table (m)
//! - `σv` = Total vertical stress (kPa)
//! - `σv'` = Effective vertical stress (kPa)
//! - `rd` = Stress reduction factor
//! - `Cn` = Overburden correction for SPT blow count
//! - `CSR` = Cyclic stress ratio
//!
//! ## References
//!
//! - Seed & Idriss (1971), simplified procedure
//! - Youd et al. (2001), NCEER/NSF workshop summary report

use crate::units::STANDARD_GRAVITY;

/// Unit weight of water (kN/m³)
pub const UNIT_WEIGHT_WATER: f64 = 9.81;

/// Reference atmospheric pressure for overburden normalization (kPa)
pub const ATMOSPHERIC_PRESSURE_KPA: f64 = 100.0;

/// Linear decrease of rd per metre of depth
pub const RD_SLOPE: f64 = 0.00765;

/// Lower bound on rd
pub const RD_FLOOR: f64 = 0.5;

/// Ratio of equivalent uniform cyclic stress to peak stress
pub const CSR_SCALING: f64 = 0.65;

/// Total vertical stress σv = γ·z
#[inline]
pub fn total_vertical_stress(unit_weight: f64, depth: f64) -> f64 {
    unit_weight * depth
}

/// Hydrostatic pore pressure u = γw·max(0, z − zw)
#[inline]
pub fn pore_pressure(depth: f64, water_table_depth: f64) -> f64 {
    UNIT_WEIGHT_WATER * (depth - water_table_depth).max(0.0)
}

/// Effective vertical stress σv' = σv − u
///
/// May be zero or negative for unrealistic inputs; see
/// [`overburden_correction`] for why callers must check before continuing.
#[inline]
pub fn effective_vertical_stress(total_stress: f64, depth: f64, water_table_depth: f64) -> f64 {
    total_stress - pore_pressure(depth, water_table_depth)
}

/// Stress reduction factor
///
/// # Formula
/// rd = max(0.5, 1 − 0.00765·z)
///
/// The floor engages at z ≈ 65.36 m.
///
/// # Example
/// ```rust
/// use geo_core::equations::stress::stress_reduction_factor;
///
/// assert!((stress_reduction_factor(5.0) - 0.96175).abs() < 1e-9);
/// assert_eq!(stress_reduction_factor(80.0), 0.5);
/// ```
#[inline]
pub fn stress_reduction_factor(depth: f64) -> f64 {
    (1.0 - RD_SLOPE * depth).max(RD_FLOOR)
}

/// Overburden correction Cn = √(Pa/σv')
///
/// Undefined for σv' ≤ 0; the caller must guard.
#[inline]
pub fn overburden_correction(effective_stress: f64) -> f64 {
    (ATMOSPHERIC_PRESSURE_KPA / effective_stress).sqrt()
}

/// Cyclic stress ratio
///
/// # Formula
/// CSR = 0.65 · (amax/g) · (σv/σv') · rd
#[inline]
pub fn cyclic_stress_ratio(amax_g: f64, total_stress: f64, effective_stress: f64, rd: f64) -> f64 {
    CSR_SCALING * amax_g * (total_stress / effective_stress) * rd
}

/// Peak ground acceleration in m/s² from zone factor and soil amplification
#[inline]
pub fn peak_ground_acceleration(zone_factor: f64, amplification: f64) -> f64 {
    zone_factor * amplification * STANDARD_GRAVITY
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn test_stresses_below_water_table() {
        // γ = 18, z = 5, zw = 2
        let sv = total_vertical_stress(18.0, 5.0);
        assert!(approx_eq(sv, 90.0, 1e-9));
        let sv_eff = effective_vertical_stress(sv, 5.0, 2.0);
        assert!(approx_eq(sv_eff, 60.57, 1e-9), "σv' = {}", sv_eff);
    }

    #[test]
    fn test_no_pore_pressure_above_water_table() {
        assert_eq!(pore_pressure(3.0, 8.0), 0.0);
        assert_eq!(effective_vertical_stress(54.0, 3.0, 8.0), 54.0);
    }

    #[test]
    fn test_rd_floor() {
        assert!(approx_eq(stress_reduction_factor(0.0), 1.0, 1e-12));
        assert_eq!(stress_reduction_factor(65.36), RD_FLOOR);
        assert_eq!(stress_reduction_factor(200.0), RD_FLOOR);
        assert!(stress_reduction_factor(65.0) > RD_FLOOR);
    }

    #[test]
    fn test_overburden_correction() {
        assert!(approx_eq(overburden_correction(100.0), 1.0, 1e-12));
        assert!(approx_eq(overburden_correction(60.57), 1.28491, 1e-4));
    }

    #[test]
    fn test_csr() {
        let csr = cyclic_stress_ratio(0.288, 90.0, 60.57, 0.96175);
        assert!(approx_eq(csr, 0.26752, 1e-4), "CSR = {}", csr);
    }

    #[test]
    fn test_pga() {
        assert!(approx_eq(peak_ground_acceleration(0.24, 1.2), 2.82528, 1e-9));
    }
}
