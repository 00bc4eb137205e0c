//! # geo_core - Soil Liquefaction Calculation Engine
//!
//! `geo_core` is the computational heart of Liquefy. It classifies a soil
//! sample, maps the class to a seismic demand, and checks a layer for
//! liquefaction with the SPT-based simplified procedure. All inputs and
//! outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Explicit methods**: CRR correlation and classification rule set are
//!   always chosen by the caller, never inferred
//!
//! ## Quick Start
//!
//! ```rust
//! use geo_core::analysis::{run_pipeline, AnalysisSettings, SiteInput};
//! use geo_core::calculations::{SoilClass, SoilSample, SubsurfaceLayer, Verdict};
//!
//! let site = SiteInput {
//!     label: "BH-1".to_string(),
//!     sample: SoilSample {
//!         liquid_limit: 30.0,
//!         plastic_limit: 20.0,
//!         fines_percent: 35.0,
//!         d10_mm: 0.1,
//!         d30_mm: 0.2,
//!         d60_mm: 0.3,
//!     },
//!     layer: SubsurfaceLayer {
//!         depth_m: 5.0,
//!         unit_weight_knm3: 18.0,
//!         water_table_depth_m: 2.0,
//!         spt_n: 15.0,
//!     },
//! };
//!
//! let report = run_pipeline(&site, &AnalysisSettings::default())?;
//! assert_eq!(report.classification.soil_class, SoilClass::SM);
//! assert_eq!(report.liquefaction.verdict, Verdict::LiquefactionLikely);
//!
//! let json = serde_json::to_string_pretty(&report).unwrap();
//! # Ok::<(), geo_core::errors::CalcError>(())
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - The three stages: classification, seismic demand, liquefaction
//! - [`equations`] - Closed-form formulas and CRR correlations
//! - [`analysis`] - Stage state machine and one-call pipeline
//! - [`project`] - Project container, metadata, and settings
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types
//! - [`file_io`] - File operations with atomic saves and locking

pub mod analysis;
pub mod calculations;
pub mod equations;
pub mod errors;
pub mod file_io;
pub mod project;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use analysis::{run_pipeline, AnalysisSettings, AnalysisState, PipelineReport, SiteInput};
pub use calculations::{
    classify_soil, derive_seismic_demand, evaluate_liquefaction, ClassificationScheme, LiquefactionResult,
    SeismicDemand, SoilClass, SoilClassification, SoilSample, SubsurfaceLayer, Verdict,
};
pub use equations::CrrModel;
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_project, save_project, FileLock};
pub use project::{Project, ProjectMetadata};
