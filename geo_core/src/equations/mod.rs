//! # Soil Mechanics Equations
//!
//! Every closed-form formula used by the calculations lives here, one function
//! per formula, so each can be checked against its reference on its own.
//!
//! ## Modules
//!
//! - [`gradation`] - Plasticity index and grain-size coefficients (Cu, Cc)
//! - [`stress`] - Vertical stresses, rd, Cn and the cyclic stress ratio
//! - [`crr`] - Cyclic resistance ratio correlations and curve sampling
//!
//! ## Units
//!
//! - Stresses in kPa, unit weights in kN/m³, depths in m
//! - Grain diameters in mm
//! - Accelerations as a fraction of g unless the name says otherwise
//!
//! ## References
//!
//! - ASTM D2487: Unified Soil Classification System
//! - Seed & Idriss (1971): Simplified procedure for evaluating soil liquefaction potential
//! - Youd et al. (2001): Liquefaction resistance of soils, NCEER/NSF workshops

pub mod crr;
pub mod gradation;
pub mod stress;

pub use crr::{crr_curve, BlowCountBasis, CrrModel, CrrValue, CurvePoint, CRR_CAP};

pub use gradation::{
    curvature_coefficient,
    is_well_graded,
    plasticity_index,
    uniformity_coefficient,
};

pub use stress::{
    cyclic_stress_ratio,
    effective_vertical_stress,
    overburden_correction,
    peak_ground_acceleration,
    pore_pressure,
    stress_reduction_factor,
    total_vertical_stress,
};
