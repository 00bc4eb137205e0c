//! # Site Analysis Workflow
//!
//! Steps a single site through classification, seismic demand and the
//! liquefaction check. [`AnalysisState`] is a value: each transition consumes
//! the current state and returns the next one, so there is no shared
//! "step complete" flag to keep in sync.
//!
//! ```text
//! AwaitingClassification
//!     └─ classify ──▶ AwaitingSeismicDemand
//!                         └─ derive_demand ──▶ AwaitingLiquefactionInputs
//!                                                  └─ evaluate ──▶ Complete
//! reset (any state) ──▶ AwaitingClassification
//! ```
//!
//! `classify` may be called from any state and starts over with the new
//! sample. `evaluate` may be repeated from `Complete` with a different layer.
//!
//! ## Example
//!
//! ```rust
//! use geo_core::analysis::{AnalysisSettings, AnalysisState};
//! use geo_core::calculations::{SoilSample, SubsurfaceLayer, Verdict};
//!
//! let settings = AnalysisSettings::default();
//! let sample = SoilSample {
//!     liquid_limit: 30.0,
//!     plastic_limit: 20.0,
//!     fines_percent: 35.0,
//!     d10_mm: 0.1,
//!     d30_mm: 0.2,
//!     d60_mm: 0.3,
//! };
//! let layer = SubsurfaceLayer {
//!     depth_m: 5.0,
//!     unit_weight_knm3: 18.0,
//!     water_table_depth_m: 2.0,
//!     spt_n: 15.0,
//! };
//!
//! let state = AnalysisState::new()
//!     .classify(&sample, settings.classification_scheme)?
//!     .derive_demand()?
//!     .evaluate(&layer, settings.crr_model)?;
//!
//! assert_eq!(state.liquefaction().unwrap().verdict, Verdict::LiquefactionLikely);
//! # Ok::<(), geo_core::errors::CalcError>(())
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::calculations::classification::{classify_soil, ClassificationScheme, SoilClassification, SoilSample};
use crate::calculations::liquefaction::{evaluate_liquefaction, LiquefactionResult, SubsurfaceLayer};
use crate::calculations::seismic::{derive_seismic_demand, SeismicDemand};
use crate::equations::crr::CrrModel;
use crate::errors::{CalcError, CalcResult};

/// Method choices applied to every analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AnalysisSettings {
    /// CRR correlation
    #[serde(default)]
    pub crr_model: CrrModel,

    /// Rule set for coarse-grained soils
    #[serde(default)]
    pub classification_scheme: ClassificationScheme,
}

/// Everything needed to run all three stages for one location.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "BH-1 @ 5 m",
///   "sample": {
///     "liquid_limit": 30.0, "plastic_limit": 20.0, "fines_percent": 35.0,
///     "d10_mm": 0.1, "d30_mm": 0.2, "d60_mm": 0.3
///   },
///   "layer": {
///     "depth_m": 5.0, "unit_weight_knm3": 18.0,
///     "water_table_depth_m": 2.0, "spt_n": 15.0
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteInput {
    /// User label (e.g., "BH-1 @ 5 m")
    pub label: String,
    pub sample: SoilSample,
    pub layer: SubsurfaceLayer,
}

/// All three stage outputs for one location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineReport {
    pub label: String,
    pub settings: AnalysisSettings,
    pub classification: SoilClassification,
    pub demand: SeismicDemand,
    pub liquefaction: LiquefactionResult,
}

/// Where an analysis stands.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "state")]
pub enum AnalysisState {
    #[default]
    AwaitingClassification,
    AwaitingSeismicDemand {
        classification: SoilClassification,
    },
    AwaitingLiquefactionInputs {
        classification: SoilClassification,
        demand: SeismicDemand,
    },
    Complete {
        classification: SoilClassification,
        demand: SeismicDemand,
        result: LiquefactionResult,
    },
}

impl AnalysisState {
    pub fn new() -> Self {
        AnalysisState::AwaitingClassification
    }

    /// Classify a sample. Allowed from any state; discards later stages.
    pub fn classify(self, sample: &SoilSample, scheme: ClassificationScheme) -> CalcResult<Self> {
        let classification = classify_soil(sample, scheme)?;
        Ok(AnalysisState::AwaitingSeismicDemand { classification })
    }

    /// Derive the seismic demand from the stored classification.
    pub fn derive_demand(self) -> CalcResult<Self> {
        match self {
            AnalysisState::AwaitingSeismicDemand { classification } => {
                let demand = derive_seismic_demand(&classification.soil_class);
                Ok(AnalysisState::AwaitingLiquefactionInputs {
                    classification,
                    demand,
                })
            }
            other => Err(CalcError::stage_out_of_order("derive seismic demand", other.to_string())),
        }
    }

    /// Run the liquefaction check. Repeatable once complete.
    pub fn evaluate(self, layer: &SubsurfaceLayer, model: CrrModel) -> CalcResult<Self> {
        match self {
            AnalysisState::AwaitingLiquefactionInputs {
                classification,
                demand,
            }
            | AnalysisState::Complete {
                classification,
                demand,
                ..
            } => {
                let result = evaluate_liquefaction(demand.amax_g, layer, model);
                Ok(AnalysisState::Complete {
                    classification,
                    demand,
                    result,
                })
            }
            other => Err(CalcError::stage_out_of_order("evaluate liquefaction", other.to_string())),
        }
    }

    /// Drop all derived data.
    pub fn reset(self) -> Self {
        AnalysisState::AwaitingClassification
    }

    pub fn classification(&self) -> Option<&SoilClassification> {
        match self {
            AnalysisState::AwaitingClassification => None,
            AnalysisState::AwaitingSeismicDemand { classification }
            | AnalysisState::AwaitingLiquefactionInputs { classification, .. }
            | AnalysisState::Complete { classification, .. } => Some(classification),
        }
    }

    pub fn demand(&self) -> Option<&SeismicDemand> {
        match self {
            AnalysisState::AwaitingLiquefactionInputs { demand, .. } | AnalysisState::Complete { demand, .. } => {
                Some(demand)
            }
            _ => None,
        }
    }

    pub fn liquefaction(&self) -> Option<&LiquefactionResult> {
        match self {
            AnalysisState::Complete { result, .. } => Some(result),
            _ => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, AnalysisState::Complete { .. })
    }
}

impl fmt::Display for AnalysisState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AnalysisState::AwaitingClassification => "awaiting classification",
            AnalysisState::AwaitingSeismicDemand { .. } => "awaiting seismic demand",
            AnalysisState::AwaitingLiquefactionInputs { .. } => "awaiting liquefaction inputs",
            AnalysisState::Complete { .. } => "complete",
        };
        f.write_str(s)
    }
}

/// Run all three stages for one site.
pub fn run_pipeline(input: &SiteInput, settings: &AnalysisSettings) -> CalcResult<PipelineReport> {
    let state = AnalysisState::new()
        .classify(&input.sample, settings.classification_scheme)?
        .derive_demand()?
        .evaluate(&input.layer, settings.crr_model)?;

    match state {
        AnalysisState::Complete {
            classification,
            demand,
            result,
        } => Ok(PipelineReport {
            label: input.label.clone(),
            settings: *settings,
            classification,
            demand,
            liquefaction: result,
        }),
        other => Err(CalcError::stage_out_of_order("build report", other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::{SoilClass, Verdict};

    fn site() -> SiteInput {
        SiteInput {
            label: "BH-1".to_string(),
            sample: SoilSample {
                liquid_limit: 30.0,
                plastic_limit: 20.0,
                fines_percent: 35.0,
                d10_mm: 0.1,
                d30_mm: 0.2,
                d60_mm: 0.3,
            },
            layer: SubsurfaceLayer {
                depth_m: 5.0,
                unit_weight_knm3: 18.0,
                water_table_depth_m: 2.0,
                spt_n: 15.0,
            },
        }
    }

    #[test]
    fn test_linear_progression() {
        let input = site();
        let state = AnalysisState::new();
        assert!(state.classification().is_none());

        let state = state.classify(&input.sample, ClassificationScheme::FinesThreshold).unwrap();
        assert_eq!(state.classification().unwrap().soil_class, SoilClass::SM);
        assert!(state.demand().is_none());

        let state = state.derive_demand().unwrap();
        assert!((state.demand().unwrap().amax_g - 0.288).abs() < 1e-9);
        assert!(!state.is_complete());

        let state = state.evaluate(&input.layer, CrrModel::IdrissBoulanger).unwrap();
        assert!(state.is_complete());
        assert_eq!(state.liquefaction().unwrap().verdict, Verdict::LiquefactionLikely);
    }

    #[test]
    fn test_out_of_order_transitions() {
        let input = site();
        let err = AnalysisState::new().derive_demand().unwrap_err();
        assert_eq!(err.error_code(), "STAGE_OUT_OF_ORDER");

        let err = AnalysisState::new()
            .evaluate(&input.layer, CrrModel::IdrissBoulanger)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Cannot evaluate liquefaction while awaiting classification"
        );

        let classified = AnalysisState::new()
            .classify(&input.sample, ClassificationScheme::FinesThreshold)
            .unwrap();
        assert!(classified.evaluate(&input.layer, CrrModel::IdrissBoulanger).is_err());
    }

    #[test]
    fn test_demand_cannot_be_rederived_after_completion() {
        let input = site();
        let complete = run_state(&input);
        assert!(complete.derive_demand().is_err());
    }

    #[test]
    fn test_reevaluate_and_reclassify() {
        let input = site();
        let complete = run_state(&input);

        let deeper = SubsurfaceLayer { depth_m: 10.0, ..input.layer };
        let again = complete.evaluate(&deeper, CrrModel::IdrissBoulanger).unwrap();
        assert_eq!(again.liquefaction().unwrap().total_stress_kpa, 180.0);

        let restarted = again.classify(&input.sample, ClassificationScheme::GravelFamily).unwrap();
        assert_eq!(restarted.classification().unwrap().soil_class, SoilClass::ScSm);
        assert!(restarted.liquefaction().is_none());
    }

    #[test]
    fn test_reset() {
        let complete = run_state(&site());
        assert_eq!(complete.reset(), AnalysisState::AwaitingClassification);
    }

    #[test]
    fn test_failed_classification_keeps_error() {
        let mut input = site();
        input.sample.d10_mm = 0.0;
        let err = run_pipeline(&input, &AnalysisSettings::default()).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_run_pipeline() {
        let report = run_pipeline(&site(), &AnalysisSettings::default()).unwrap();
        assert_eq!(report.label, "BH-1");
        assert_eq!(report.classification.soil_class, SoilClass::SM);
        assert_eq!(report.demand.soil_class, SoilClass::SM);
        assert_eq!(report.liquefaction.crr_model, CrrModel::IdrissBoulanger);
    }

    #[test]
    fn test_state_serialization() {
        let state = run_state(&site());
        let json = serde_json::to_string(&state).unwrap();
        assert!(json.contains("\"state\":\"Complete\""));
        let roundtrip: AnalysisState = serde_json::from_str(&json).unwrap();
        assert!(roundtrip.is_complete());
    }

    #[test]
    fn test_settings_default_from_empty_json() {
        let settings: AnalysisSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, AnalysisSettings::default());
    }

    fn run_state(input: &SiteInput) -> AnalysisState {
        AnalysisState::new()
            .classify(&input.sample, ClassificationScheme::FinesThreshold)
            .and_then(AnalysisState::derive_demand)
            .and_then(|s| s.evaluate(&input.layer, CrrModel::IdrissBoulanger))
            .unwrap()
    }
}
