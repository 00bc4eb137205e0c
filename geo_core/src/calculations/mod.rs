//! # Geotechnical Calculations
//!
//! The three stages of a site analysis, applied in order. Each stage follows
//! the same pattern:
//!
//! - an input type (JSON-serializable)
//! - a result type (JSON-serializable)
//! - a pure function from one to the other
//!
//! ## Stages
//!
//! - [`classification`] - `SoilSample` → `SoilClassification`
//! - [`seismic`] - `SoilClass` → `SeismicDemand`
//! - [`liquefaction`] - `SeismicDemand.amax_g` + `SubsurfaceLayer` → `LiquefactionResult`
//!
//! Stages hold no state; see [`crate::analysis`] for stepping through them.

pub mod classification;
pub mod liquefaction;
pub mod seismic;

// Re-export commonly used types
pub use classification::{classify_soil, ClassificationScheme, SoilClass, SoilClassification, SoilSample};
pub use liquefaction::{evaluate_liquefaction, LiquefactionResult, SubsurfaceLayer, Verdict};
pub use seismic::{derive_seismic_demand, SeismicDemand, SeismicZone};
