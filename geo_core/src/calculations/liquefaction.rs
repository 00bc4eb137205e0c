//! # Liquefaction Check
//!
//! Third stage: SPT-based simplified procedure giving a factor of safety
//! against liquefaction for one layer.
//!
//! ## Procedure
//!
//! 1. σv = γ·z
//! 2. σv' = σv − 9.81·max(0, z − zw)
//! 3. rd = max(0.5, 1 − 0.00765·z)
//! 4. σv' ≤ 0 → stop with [`Verdict::InvalidEffectiveStress`]
//! 5. Cn = √(100/σv'), N1_60 = N·Cn
//! 6. CSR = 0.65·(amax/g)·(σv/σv')·rd
//! 7. CRR from the selected [`CrrModel`]
//! 8. FS = CRR/CSR
//! 9. FS < 1 → liquefaction likely
//!
//! The evaluation never fails and never divides by zero. It does not apply
//! the input ranges in [`SubsurfaceLayer::validate_ranges`]; that is left to
//! whoever collects the inputs.
//!
//! ## Example
//!
//! ```rust
//! use geo_core::calculations::liquefaction::{evaluate_liquefaction, SubsurfaceLayer, Verdict};
//! use geo_core::equations::CrrModel;
//!
//! let layer = SubsurfaceLayer {
//!     depth_m: 5.0,
//!     unit_weight_knm3: 18.0,
//!     water_table_depth_m: 2.0,
//!     spt_n: 15.0,
//! };
//!
//! let result = evaluate_liquefaction(0.288, &layer, CrrModel::IdrissBoulanger);
//! assert_eq!(result.verdict, Verdict::LiquefactionLikely);
//! println!("FS = {:.2}", result.factor_of_safety.unwrap());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::equations::crr::CrrModel;
use crate::equations::stress::{
    cyclic_stress_ratio, effective_vertical_stress, overburden_correction, stress_reduction_factor,
    total_vertical_stress,
};
use crate::errors::{CalcError, CalcResult};
use crate::units::KiloPascals;

/// Documented input ranges for a layer, as (min, max)
pub const DEPTH_RANGE_M: (f64, f64) = (0.5, 50.0);
pub const UNIT_WEIGHT_RANGE_KNM3: (f64, f64) = (10.0, 25.0);
pub const WATER_TABLE_RANGE_M: (f64, f64) = (0.0, 50.0);
pub const SPT_N_RANGE: (f64, f64) = (1.0, 100.0);

/// Layer geometry and field data for one liquefaction check.
///
/// ## JSON Example
///
/// ```json
/// {
///   "depth_m": 5.0,
///   "unit_weight_knm3": 18.0,
///   "water_table_depth_m": 2.0,
///   "spt_n": 15.0
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubsurfaceLayer {
    /// Depth of the point of interest below ground (m)
    pub depth_m: f64,

    /// Total unit weight of the overlying soil (kN/m³)
    pub unit_weight_knm3: f64,

    /// Depth to the groundwater table (m)
    pub water_table_depth_m: f64,

    /// SPT blow count
    pub spt_n: f64,
}

impl SubsurfaceLayer {
    /// Check the layer against the documented input ranges.
    ///
    /// Used by input collectors; [`evaluate_liquefaction`] does not call it.
    pub fn validate_ranges(&self) -> CalcResult<()> {
        let checks = [
            ("depth_m", self.depth_m, DEPTH_RANGE_M, "m"),
            ("unit_weight_knm3", self.unit_weight_knm3, UNIT_WEIGHT_RANGE_KNM3, "kN/m³"),
            ("water_table_depth_m", self.water_table_depth_m, WATER_TABLE_RANGE_M, "m"),
            ("spt_n", self.spt_n, SPT_N_RANGE, "blows"),
        ];
        for (field, value, (min, max), unit) in checks {
            if !(min..=max).contains(&value) {
                return Err(CalcError::invalid_input(
                    field,
                    value.to_string(),
                    format!("Must be between {} and {} {}", min, max, unit),
                ));
            }
        }
        Ok(())
    }

    /// Total vertical stress σv = γ·z
    pub fn total_stress(&self) -> KiloPascals {
        KiloPascals(total_vertical_stress(self.unit_weight_knm3, self.depth_m))
    }

    /// Effective vertical stress σv' = σv − u
    pub fn effective_stress(&self) -> KiloPascals {
        KiloPascals(effective_vertical_stress(
            self.total_stress().value(),
            self.depth_m,
            self.water_table_depth_m,
        ))
    }
}

/// Outcome of a liquefaction check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    /// FS < 1
    LiquefactionLikely,
    /// FS ≥ 1
    NotLikely,
    /// σv' ≤ 0, nothing past rd was computed
    InvalidEffectiveStress,
}

impl Verdict {
    /// User-facing explanation
    pub fn message(&self) -> &'static str {
        match self {
            Verdict::LiquefactionLikely => "Liquefaction is likely at this location (FS < 1).",
            Verdict::NotLikely => "Liquefaction is not likely at this location (FS >= 1).",
            Verdict::InvalidEffectiveStress => {
                "Invalid effective stress (σv' <= 0). Check depth, unit weight and water table depth."
            }
        }
    }

    pub fn is_valid(&self) -> bool {
        !matches!(self, Verdict::InvalidEffectiveStress)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Verdict::LiquefactionLikely => "LIQUEFACTION LIKELY",
            Verdict::NotLikely => "NOT LIKELY",
            Verdict::InvalidEffectiveStress => "INVALID EFFECTIVE STRESS",
        };
        f.write_str(s)
    }
}

/// Results from a liquefaction check.
///
/// Fields after `stress_reduction_factor` are `None` when the verdict is
/// [`Verdict::InvalidEffectiveStress`].
///
/// ## JSON Example
///
/// ```json
/// {
///   "verdict": "LiquefactionLikely",
///   "crr_model": "IdrissBoulanger",
///   "total_stress_kpa": 90.0,
///   "effective_stress_kpa": 60.57,
///   "stress_reduction_factor": 0.962,
///   "overburden_correction": 1.285,
///   "n1_60": 19.27,
///   "csr": 0.268,
///   "crr": 0.207,
///   "crr_capped": false,
///   "factor_of_safety": 0.77
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LiquefactionResult {
    pub verdict: Verdict,

    /// Correlation used for CRR
    pub crr_model: CrrModel,

    /// Total vertical stress σv (kPa)
    pub total_stress_kpa: f64,

    /// Effective vertical stress σv' (kPa)
    pub effective_stress_kpa: f64,

    /// Stress reduction factor rd
    pub stress_reduction_factor: f64,

    /// Overburden correction Cn
    pub overburden_correction: Option<f64>,

    /// Corrected blow count N1_60
    pub n1_60: Option<f64>,

    /// Cyclic stress ratio
    pub csr: Option<f64>,

    /// Cyclic resistance ratio
    pub crr: Option<f64>,

    /// CRR came from the dense-soil cap rather than the correlation
    pub crr_capped: bool,

    /// FS = CRR/CSR
    pub factor_of_safety: Option<f64>,
}

impl LiquefactionResult {
    /// True when liquefaction is likely
    pub fn liquefies(&self) -> bool {
        self.verdict == Verdict::LiquefactionLikely
    }
}

/// Evaluate liquefaction potential at one layer.
///
/// # Arguments
///
/// * `amax_g` - Peak ground acceleration as a fraction of g
/// * `layer` - Depth, unit weight, water table and SPT N
/// * `model` - CRR correlation
pub fn evaluate_liquefaction(amax_g: f64, layer: &SubsurfaceLayer, model: CrrModel) -> LiquefactionResult {
    let total_stress = layer.total_stress().value();
    let effective_stress = layer.effective_stress().value();
    let rd = stress_reduction_factor(layer.depth_m);

    // Also catches NaN
    if !(effective_stress > 0.0) {
        return LiquefactionResult {
            verdict: Verdict::InvalidEffectiveStress,
            crr_model: model,
            total_stress_kpa: total_stress,
            effective_stress_kpa: effective_stress,
            stress_reduction_factor: rd,
            overburden_correction: None,
            n1_60: None,
            csr: None,
            crr: None,
            crr_capped: false,
            factor_of_safety: None,
        };
    }

    let cn = overburden_correction(effective_stress);
    let n1_60 = layer.spt_n * cn;
    let csr = cyclic_stress_ratio(amax_g, total_stress, effective_stress, rd);
    let crr = model.evaluate(n1_60, layer.spt_n);
    let fs = crr.crr / csr;

    // amax = 0 gives FS = +inf, which is correctly "not likely"
    let verdict = if fs < 1.0 {
        Verdict::LiquefactionLikely
    } else {
        Verdict::NotLikely
    };

    LiquefactionResult {
        verdict,
        crr_model: model,
        total_stress_kpa: total_stress,
        effective_stress_kpa: effective_stress,
        stress_reduction_factor: rd,
        overburden_correction: Some(cn),
        n1_60: Some(n1_60),
        csr: Some(csr),
        crr: Some(crr.crr),
        crr_capped: crr.capped,
        factor_of_safety: Some(fs),
    }
}
