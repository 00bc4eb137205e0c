//! # Soil Classification
//!
//! First stage of the analysis: assigns a USCS-style group symbol from the
//! Atterberg limits, fines content and grain-size percentiles.
//!
//! ## Rules (simplified USCS)
//!
//! Rules are tried in order; the first match wins.
//!
//! | Scheme            | Fines > 50 %           | 12 % < Fines ≤ 50 % | Fines ≤ 12 %                 |
//! |-------------------|------------------------|---------------------|------------------------------|
//! | `FinesThreshold`  | CL if PI > 7, else ML  | SM                  | SW if well graded, else SP   |
//! | `GravelFamily`    | CL if PI > 7, else ML  | SC/SM               | GW if well graded, else GP   |
//!
//! "Well graded" means Cu > 4 and 1 < Cc < 3.
//!
//! ## Example
//!
//! ```rust
//! use geo_core::calculations::classification::{classify_soil, ClassificationScheme, SoilClass, SoilSample};
//!
//! let sample = SoilSample {
//!     liquid_limit: 30.0,
//!     plastic_limit: 20.0,
//!     fines_percent: 35.0,
//!     d10_mm: 0.1,
//!     d30_mm: 0.2,
//!     d60_mm: 0.3,
//! };
//!
//! let result = classify_soil(&sample, ClassificationScheme::FinesThreshold).unwrap();
//! assert_eq!(result.soil_class, SoilClass::SM);
//! assert!((result.cu - 3.0).abs() < 1e-9);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::equations::gradation::{
    curvature_coefficient, is_well_graded, plasticity_index, uniformity_coefficient,
};
use crate::errors::{CalcError, CalcResult};
use crate::units::{Millimeters, Percent};

/// Fines content above which a soil is fine-grained (%)
pub const FINE_GRAINED_FINES_PERCENT: f64 = 50.0;

/// Fines content above which a coarse soil is classed as silty/clayey (%)
pub const DIRTY_COARSE_FINES_PERCENT: f64 = 12.0;

/// PI above which a fine-grained soil is a clay rather than a silt (%)
pub const CLAY_PLASTICITY_INDEX: f64 = 7.0;

/// Laboratory index properties of a soil sample.
///
/// ## JSON Example
///
/// ```json
/// {
///   "liquid_limit": 30.0,
///   "plastic_limit": 20.0,
///   "fines_percent": 35.0,
///   "d10_mm": 0.1,
///   "d30_mm": 0.2,
///   "d60_mm": 0.3
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SoilSample {
    /// Liquid limit LL (%)
    pub liquid_limit: f64,

    /// Plastic limit PL (%)
    pub plastic_limit: f64,

    /// Percent passing the 75 µm sieve
    pub fines_percent: f64,

    /// Diameter at 10 % finer (mm)
    pub d10_mm: f64,

    /// Diameter at 30 % finer (mm)
    pub d30_mm: f64,

    /// Diameter at 60 % finer (mm)
    pub d60_mm: f64,
}

impl SoilSample {
    /// Validate input parameters.
    ///
    /// Rejects non-finite values, percentages outside [0, 100] and
    /// non-positive grain diameters (Cu and Cc divide by D10 and D60).
    pub fn validate(&self) -> CalcResult<()> {
        let percents = [
            ("liquid_limit", self.liquid_limit),
            ("plastic_limit", self.plastic_limit),
            ("fines_percent", self.fines_percent),
        ];
        for (field, value) in percents {
            if !Percent(value).in_range() {
                return Err(CalcError::invalid_input(
                    field,
                    value.to_string(),
                    "Must be between 0 and 100 %",
                ));
            }
        }

        let diameters = [
            ("d10_mm", self.d10_mm),
            ("d30_mm", self.d30_mm),
            ("d60_mm", self.d60_mm),
        ];
        for (field, value) in diameters {
            if !value.is_finite() || value <= 0.0 {
                return Err(CalcError::invalid_input(
                    field,
                    value.to_string(),
                    "Grain diameter must be a positive number of millimetres",
                ));
            }
        }
        Ok(())
    }

    pub fn fines(&self) -> Percent {
        Percent(self.fines_percent)
    }

    pub fn d10(&self) -> Millimeters {
        Millimeters(self.d10_mm)
    }

    pub fn d30(&self) -> Millimeters {
        Millimeters(self.d30_mm)
    }

    pub fn d60(&self) -> Millimeters {
        Millimeters(self.d60_mm)
    }
}

/// USCS group symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoilClass {
    /// Lean clay
    CL,
    /// Silt
    ML,
    /// Silty sand
    SM,
    /// Well-graded sand
    SW,
    /// Poorly graded sand
    SP,
    /// Well-graded gravel
    GW,
    /// Poorly graded gravel
    GP,
    /// Clayey or silty sand
    #[serde(rename = "SC/SM")]
    ScSm,
    /// Label not recognised
    Unclassified,
}

impl SoilClass {
    /// Group symbol, e.g. "SM" or "SC/SM"
    pub fn code(&self) -> &'static str {
        match self {
            SoilClass::CL => "CL",
            SoilClass::ML => "ML",
            SoilClass::SM => "SM",
            SoilClass::SW => "SW",
            SoilClass::SP => "SP",
            SoilClass::GW => "GW",
            SoilClass::GP => "GP",
            SoilClass::ScSm => "SC/SM",
            SoilClass::Unclassified => "Unclassified",
        }
    }

    /// Group name
    pub fn description(&self) -> &'static str {
        match self {
            SoilClass::CL => "Clay with low plasticity",
            SoilClass::ML => "Silt with low plasticity",
            SoilClass::SM => "Silty sand or sandy silt",
            SoilClass::SW => "Well-graded sand",
            SoilClass::SP => "Poorly graded sand",
            SoilClass::GW => "Well-graded gravel",
            SoilClass::GP => "Poorly graded gravel",
            SoilClass::ScSm => "Clayey or silty sand",
            SoilClass::Unclassified => "Unclassified soil",
        }
    }

    pub fn is_fine_grained(&self) -> bool {
        matches!(self, SoilClass::CL | SoilClass::ML)
    }
}

impl fmt::Display for SoilClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.code(), self.description())
    }
}

/// Parses a group symbol. Unknown labels become [`SoilClass::Unclassified`].
impl FromStr for SoilClass {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let class = match s.trim().to_ascii_uppercase().as_str() {
            "CL" => SoilClass::CL,
            "ML" => SoilClass::ML,
            "SM" => SoilClass::SM,
            "SW" => SoilClass::SW,
            "SP" => SoilClass::SP,
            "GW" => SoilClass::GW,
            "GP" => SoilClass::GP,
            "SC/SM" | "SC-SM" | "SCSM" => SoilClass::ScSm,
            _ => SoilClass::Unclassified,
        };
        Ok(class)
    }
}

/// Rule set used to pick a group symbol for coarse soils.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ClassificationScheme {
    /// Sand family for coarse soils (SM / SW / SP)
    #[default]
    FinesThreshold,
    /// Gravel family for coarse soils (SC/SM / GW / GP)
    GravelFamily,
}

impl ClassificationScheme {
    pub const ALL: [ClassificationScheme; 2] = [
        ClassificationScheme::FinesThreshold,
        ClassificationScheme::GravelFamily,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            ClassificationScheme::FinesThreshold => "fines-threshold",
            ClassificationScheme::GravelFamily => "gravel-family",
        }
    }
}

impl fmt::Display for ClassificationScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ClassificationScheme {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('_', "-");
        ClassificationScheme::ALL
            .into_iter()
            .find(|scheme| scheme.id() == key)
            .ok_or_else(|| {
                CalcError::invalid_input(
                    "classification_scheme",
                    s,
                    "Expected 'fines-threshold' or 'gravel-family'",
                )
            })
    }
}

/// Output of the classification stage.
///
/// ## JSON Example
///
/// ```json
/// {
///   "soil_class": "SM",
///   "plasticity_index": 10.0,
///   "cu": 3.0,
///   "cc": 1.333,
///   "scheme": "FinesThreshold"
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SoilClassification {
    pub soil_class: SoilClass,

    /// PI = LL − PL (%)
    pub plasticity_index: f64,

    /// Coefficient of uniformity D60/D10
    pub cu: f64,

    /// Coefficient of curvature D30²/(D10·D60)
    pub cc: f64,

    /// Rule set that produced `soil_class`
    pub scheme: ClassificationScheme,
}

/// Classify a soil sample.
///
/// # Returns
///
/// * `Ok(SoilClassification)` - Group symbol and derived coefficients
/// * `Err(CalcError::InvalidInput)` - Non-positive diameter, percentage out of range or NaN
pub fn classify_soil(sample: &SoilSample, scheme: ClassificationScheme) -> CalcResult<SoilClassification> {
    sample.validate()?;

    let pi = plasticity_index(sample.liquid_limit, sample.plastic_limit);
    let cu = uniformity_coefficient(sample.d10().value(), sample.d60().value());
    let cc = curvature_coefficient(
        sample.d10().value(),
        sample.d30().value(),
        sample.d60().value(),
    );
    let fines = sample.fines().value();

    let soil_class = if fines > FINE_GRAINED_FINES_PERCENT {
        if pi > CLAY_PLASTICITY_INDEX {
            SoilClass::CL
        } else {
            SoilClass::ML
        }
    } else if fines > DIRTY_COARSE_FINES_PERCENT {
        match scheme {
            ClassificationScheme::FinesThreshold => SoilClass::SM,
            ClassificationScheme::GravelFamily => SoilClass::ScSm,
        }
    } else {
        let well_graded = is_well_graded(cu, cc);
        match (scheme, well_graded) {
            (ClassificationScheme::FinesThreshold, true) => SoilClass::SW,
            (ClassificationScheme::FinesThreshold, false) => SoilClass::SP,
            (ClassificationScheme::GravelFamily, true) => SoilClass::GW,
            (ClassificationScheme::GravelFamily, false) => SoilClass::GP,
        }
    };

    Ok(SoilClassification {
        soil_class,
        plasticity_index: pi,
        cu,
        cc,
        scheme,
    })
}
