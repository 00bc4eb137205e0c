//! # Cyclic Resistance Ratio Correlations
//!
//! Two SPT-based CRR correlations, selected explicitly through [`CrrModel`].
//! They give different factors of safety for the same input and are never
//! blended.
//!
//! ## Models
//!
//! - [`CrrModel::IdrissBoulanger`] (default): closed-form clean-sand curve for
//!   M7.5 evaluated on the overburden-corrected N1_60:
//!
//!   ```text
//!   CRR = 1/(34 − N1_60) + N1_60/135 + 50/(10·N1_60 + 45)² − 1/200
//!   ```
//!
//!   The expression is evaluated as written for every N1_60 < 34, where it
//!   blows up. At and beyond the pole the soil is treated as non-liquefiable
//!   and CRR is capped.
//!
//! - [`CrrModel::SeedIdriss`]: three-branch chart fit keyed off the field
//!   blow count read as N60 (no overburden correction):
//!
//!   ```text
//!   N60 ≤ 15       CRR = 0.05 + 0.01·N60
//!   15 < N60 ≤ 30  CRR = 0.20 + 0.0008·(N60 − 15)²
//!   N60 > 30       CRR = 1.2
//!   ```
//!
//! ## Example
//!
//! ```rust
//! use geo_core::equations::crr::CrrModel;
//!
//! let value = CrrModel::IdrissBoulanger.evaluate(19.27, 15.0);
//! assert!((value.crr - 0.2065).abs() < 1e-3);
//! assert!(!value.capped);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// CRR assigned to soil too dense to liquefy
pub const CRR_CAP: f64 = 1.2;

/// Pole of the closed-form curve; at and above it CRR is [`CRR_CAP`]
pub const DENSE_SOIL_N1_60: f64 = 34.0;

/// Upper blow count of the linear branch of the three-branch fit
pub const SEED_IDRISS_LOOSE_LIMIT: f64 = 15.0;

/// Upper blow count of the quadratic branch of the three-branch fit
pub const SEED_IDRISS_DENSE_LIMIT: f64 = 30.0;

/// Most points [`crr_curve`] will generate
pub const MAX_CURVE_POINTS: usize = 10_000;

/// CRR correlation selected by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CrrModel {
    /// Closed-form curve on N1_60, capped for N1_60 ≥ 34
    #[default]
    IdrissBoulanger,
    /// Three-branch linear/quadratic fit on N60, capped for N60 > 30
    SeedIdriss,
}

/// Which blow count a model reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlowCountBasis {
    /// Overburden-corrected N1_60
    CorrectedN160,
    /// Field blow count taken as N60
    FieldN60,
}

/// A CRR value and whether the dense-soil cap produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrrValue {
    pub crr: f64,
    pub capped: bool,
}

impl CrrModel {
    /// All models, in display order
    pub const ALL: [CrrModel; 2] = [CrrModel::IdrissBoulanger, CrrModel::SeedIdriss];

    /// Short identifier used in files and on the command line
    pub fn id(&self) -> &'static str {
        match self {
            CrrModel::IdrissBoulanger => "idriss-boulanger",
            CrrModel::SeedIdriss => "seed-idriss",
        }
    }

    pub fn blow_count_basis(&self) -> BlowCountBasis {
        match self {
            CrrModel::IdrissBoulanger => BlowCountBasis::CorrectedN160,
            CrrModel::SeedIdriss => BlowCountBasis::FieldN60,
        }
    }

    /// Evaluate CRR. Both blow counts are passed; each model reads the one
    /// named by [`blow_count_basis`](Self::blow_count_basis).
    pub fn evaluate(&self, n1_60: f64, n60: f64) -> CrrValue {
        match self {
            CrrModel::IdrissBoulanger => closed_form_crr(n1_60),
            CrrModel::SeedIdriss => three_branch_crr(n60),
        }
    }
}

impl fmt::Display for CrrModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrrModel::IdrissBoulanger => write!(f, "Idriss-Boulanger"),
            CrrModel::SeedIdriss => write!(f, "Seed-Idriss"),
        }
    }
}

impl FromStr for CrrModel {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        CrrModel::ALL
            .into_iter()
            .find(|m| m.id() == key || m.to_string().to_ascii_lowercase() == key)
            .ok_or_else(|| {
                CalcError::invalid_input("crr_model", s, "Expected 'idriss-boulanger' or 'seed-idriss'")
            })
    }
}

/// Closed-form clean-sand curve. Negative blow counts are read as zero.
pub fn closed_form_crr(n1_60: f64) -> CrrValue {
    let n = n1_60.max(0.0);
    if n >= DENSE_SOIL_N1_60 {
        return CrrValue { crr: CRR_CAP, capped: true };
    }
    let crr = 1.0 / (34.0 - n) + n / 135.0 + 50.0 / (10.0 * n + 45.0).powi(2) - 1.0 / 200.0;
    CrrValue { crr, capped: false }
}

/// Three-branch linear/quadratic fit. Negative blow counts are read as zero.
pub fn three_branch_crr(n60: f64) -> CrrValue {
    let n = n60.max(0.0);
    if n <= SEED_IDRISS_LOOSE_LIMIT {
        CrrValue {
            crr: 0.05 + 0.01 * n,
            capped: false,
        }
    } else if n <= SEED_IDRISS_DENSE_LIMIT {
        let excess = n - SEED_IDRISS_LOOSE_LIMIT;
        CrrValue {
            crr: 0.20 + 0.0008 * excess * excess,
            capped: false,
        }
    } else {
        CrrValue { crr: CRR_CAP, capped: true }
    }
}

/// One point of a CRR-vs-blow-count series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub blow_count: f64,
    pub crr: f64,
    pub capped: bool,
}

/// Sample a model's CRR curve from 0 to `max_n` in increments of `step`.
///
/// The blow count is fed to both arguments of [`CrrModel::evaluate`], so the
/// x-axis is whatever the model reads.
pub fn crr_curve(model: CrrModel, max_n: f64, step: f64) -> CalcResult<Vec<CurvePoint>> {
    if !max_n.is_finite() || max_n <= 0.0 {
        return Err(CalcError::invalid_input("max_n", max_n.to_string(), "Must be a positive number"));
    }
    if !step.is_finite() || step <= 0.0 {
        return Err(CalcError::invalid_input("step", step.to_string(), "Must be a positive number"));
    }

    let intervals = (max_n / step).floor();
    if intervals >= MAX_CURVE_POINTS as f64 {
        return Err(CalcError::invalid_input(
            "step",
            step.to_string(),
            format!("Too fine for max_n = {} (limit {} points)", max_n, MAX_CURVE_POINTS),
        ));
    }

    let points = (0..=intervals as usize)
        .map(|i| {
            let n = i as f64 * step;
            let value = model.evaluate(n, n);
            CurvePoint {
                blow_count: n,
                crr: value.crr,
                capped: value.capped,
            }
        })
        .collect();
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn test_closed_form_reference_point() {
        let v = closed_form_crr(19.2736);
        assert!(approx_eq(v.crr, 0.20656, 1e-4), "CRR = {}", v.crr);
        assert!(!v.capped);
    }

    fn formula(n: f64) -> f64 {
        1.0 / (34.0 - n) + n / 135.0 + 50.0 / (10.0 * n + 45.0).powi(2) - 1.0 / 200.0
    }

    #[test]
    fn test_closed_form_follows_curve_up_to_pole() {
        for n in [30.0, 32.053, 33.0, 33.9] {
            let v = closed_form_crr(n);
            assert!(approx_eq(v.crr, formula(n), 1e-12), "N1_60 = {}: CRR = {}", n, v.crr);
            assert!(!v.capped);
        }
        assert!(approx_eq(closed_form_crr(32.053).crr, 0.7464, 1e-3));
        assert!(closed_form_crr(33.0).crr > CRR_CAP);
    }

    #[test]
    fn test_closed_form_capped_at_pole() {
        for n in [34.0, 50.0] {
            let v = closed_form_crr(n);
            assert_eq!(v.crr, CRR_CAP);
            assert!(v.capped);
        }
    }

    #[test]
    fn test_closed_form_negative_blow_count_is_finite() {
        let v = closed_form_crr(-4.5);
        assert!(v.crr.is_finite());
        assert_eq!(v, closed_form_crr(0.0));
    }

    #[test]
    fn test_three_branch_is_continuous_at_15() {
        let below = three_branch_crr(15.0).crr;
        let above = three_branch_crr(15.0 + 1e-9).crr;
        assert!(approx_eq(below, 0.20, 1e-12));
        assert!(approx_eq(above, below, 1e-6));
    }

    #[test]
    fn test_three_branch_quadratic_and_cap() {
        assert!(approx_eq(three_branch_crr(30.0).crr, 0.38, 1e-9));
        let dense = three_branch_crr(31.0);
        assert_eq!(dense.crr, CRR_CAP);
        assert!(dense.capped);
    }

    #[test]
    fn test_models_are_not_equivalent() {
        let a = CrrModel::IdrissBoulanger.evaluate(19.27, 15.0);
        let b = CrrModel::SeedIdriss.evaluate(19.27, 15.0);
        assert!((a.crr - b.crr).abs() > 1e-3);
    }

    #[test]
    fn test_model_reads_its_own_blow_count() {
        // Seed-Idriss ignores N1_60
        let a = CrrModel::SeedIdriss.evaluate(5.0, 20.0);
        let b = CrrModel::SeedIdriss.evaluate(25.0, 20.0);
        assert_eq!(a, b);
        assert_eq!(CrrModel::SeedIdriss.blow_count_basis(), BlowCountBasis::FieldN60);
    }

    #[test]
    fn test_model_parsing() {
        assert_eq!("idriss-boulanger".parse::<CrrModel>().unwrap(), CrrModel::IdrissBoulanger);
        assert_eq!("Seed-Idriss".parse::<CrrModel>().unwrap(), CrrModel::SeedIdriss);
        assert_eq!("seed_idriss".parse::<CrrModel>().unwrap(), CrrModel::SeedIdriss);
        assert!("robertson".parse::<CrrModel>().is_err());
    }

    #[test]
    fn test_model_serialization() {
        let json = serde_json::to_string(&CrrModel::SeedIdriss).unwrap();
        assert_eq!(json, "\"SeedIdriss\"");
        assert_eq!(CrrModel::default(), CrrModel::IdrissBoulanger);
    }

    #[test]
    fn test_curve_sampling() {
        let curve = crr_curve(CrrModel::SeedIdriss, 40.0, 5.0).unwrap();
        assert_eq!(curve.len(), 9);
        assert_eq!(curve[0].blow_count, 0.0);
        assert_eq!(curve[8].blow_count, 40.0);
        assert!(curve[8].capped);
        assert!(curve.windows(2).all(|w| w[1].crr >= w[0].crr));
    }

    #[test]
    fn test_curve_rejects_bad_arguments() {
        assert!(crr_curve(CrrModel::IdrissBoulanger, 0.0, 1.0).is_err());
        assert!(crr_curve(CrrModel::IdrissBoulanger, 30.0, 0.0).is_err());
        assert!(crr_curve(CrrModel::IdrissBoulanger, 30.0, f64::NAN).is_err());
        assert!(crr_curve(CrrModel::IdrissBoulanger, 1e9, 1e-3).is_err());
    }
}
