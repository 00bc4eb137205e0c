//! # Seismic Demand
//!
//! Second stage: maps a soil class to a seismic zone and a site amplification
//! factor, and from those to a peak ground acceleration.
//!
//! ## Lookup Table
//!
//! | Soil class contains | Zone | Z    | S   |
//! |---------------------|------|------|-----|
//! | "CL"                | III  | 0.16 | 1.5 |
//! | "ML"                | IV   | 0.24 | 1.5 |
//! | "SM"                | IV   | 0.24 | 1.2 |
//! | anything else       | II   | 0.10 | 1.0 |
//!
//! amax = Z·S·g and amax/g = Z·S. The lookup has no failure path.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::calculations::classification::SoilClass;
use crate::equations::stress::peak_ground_acceleration;

/// Seismic zone (IS 1893 style)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeismicZone {
    II,
    III,
    IV,
    V,
}

impl SeismicZone {
    /// Zone factor Z
    pub fn zone_factor(&self) -> f64 {
        match self {
            SeismicZone::II => 0.10,
            SeismicZone::III => 0.16,
            SeismicZone::IV => 0.24,
            SeismicZone::V => 0.36,
        }
    }
}

impl fmt::Display for SeismicZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let roman = match self {
            SeismicZone::II => "II",
            SeismicZone::III => "III",
            SeismicZone::IV => "IV",
            SeismicZone::V => "V",
        };
        write!(f, "Zone {}", roman)
    }
}

/// Output of the seismic demand stage.
///
/// ## JSON Example
///
/// ```json
/// {
///   "soil_class": "SM",
///   "zone": "IV",
///   "zone_factor": 0.24,
///   "amplification": 1.2,
///   "amax_mps2": 2.825,
///   "amax_g": 0.288
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeismicDemand {
    pub soil_class: SoilClass,
    pub zone: SeismicZone,

    /// Zone factor Z
    pub zone_factor: f64,

    /// Soil amplification factor S
    pub amplification: f64,

    /// Peak ground acceleration (m/s²)
    pub amax_mps2: f64,

    /// Peak ground acceleration as a fraction of g
    pub amax_g: f64,
}

/// Seismic zone and amplification for a soil class.
///
/// Matching is on the group symbol text, in table order, so "SC/SM" picks
/// up the "SM" row.
pub fn zone_and_amplification(soil_class: &SoilClass) -> (SeismicZone, f64) {
    let code = soil_class.code();
    if code.contains("CL") {
        (SeismicZone::III, 1.5)
    } else if code.contains("ML") {
        (SeismicZone::IV, 1.5)
    } else if code.contains("SM") {
        (SeismicZone::IV, 1.2)
    } else {
        (SeismicZone::II, 1.0)
    }
}

/// Derive the seismic demand for a classified soil.
///
/// # Example
///
/// ```rust
/// use geo_core::calculations::classification::SoilClass;
/// use geo_core::calculations::seismic::{derive_seismic_demand, SeismicZone};
///
/// let demand = derive_seismic_demand(&SoilClass::SM);
/// assert_eq!(demand.zone, SeismicZone::IV);
/// assert!((demand.amax_g - 0.288).abs() < 1e-9);
/// ```
pub fn derive_seismic_demand(soil_class: &SoilClass) -> SeismicDemand {
    let (zone, amplification) = zone_and_amplification(soil_class);
    let zone_factor = zone.zone_factor();

    SeismicDemand {
        soil_class: *soil_class,
        zone,
        zone_factor,
        amplification,
        amax_mps2: peak_ground_acceleration(zone_factor, amplification),
        amax_g: zone_factor * amplification,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::STANDARD_GRAVITY;

    #[test]
    fn test_silty_sand_demand() {
        let demand = derive_seismic_demand(&SoilClass::SM);
        assert_eq!(demand.zone, SeismicZone::IV);
        assert_eq!(demand.zone_factor, 0.24);
        assert_eq!(demand.amplification, 1.2);
        assert!((demand.amax_mps2 - 2.825).abs() < 1e-3, "amax = {}", demand.amax_mps2);
        assert!((demand.amax_g - 0.288).abs() < 1e-9);
    }

    #[test]
    fn test_lookup_table() {
        let cases = [
            (SoilClass::CL, SeismicZone::III, 0.16, 1.5),
            (SoilClass::ML, SeismicZone::IV, 0.24, 1.5),
            (SoilClass::SM, SeismicZone::IV, 0.24, 1.2),
            (SoilClass::ScSm, SeismicZone::IV, 0.24, 1.2),
            (SoilClass::SW, SeismicZone::II, 0.10, 1.0),
            (SoilClass::SP, SeismicZone::II, 0.10, 1.0),
            (SoilClass::GW, SeismicZone::II, 0.10, 1.0),
            (SoilClass::GP, SeismicZone::II, 0.10, 1.0),
            (SoilClass::Unclassified, SeismicZone::II, 0.10, 1.0),
        ];
        for (class, zone, z, s) in cases {
            let demand = derive_seismic_demand(&class);
            assert_eq!(demand.zone, zone, "{:?}", class);
            assert_eq!(demand.zone_factor, z, "{:?}", class);
            assert_eq!(demand.amplification, s, "{:?}", class);
        }
    }

    #[test]
    fn test_amax_is_fraction_times_gravity() {
        let demand = derive_seismic_demand(&SoilClass::CL);
        assert!((demand.amax_g * STANDARD_GRAVITY - demand.amax_mps2).abs() < 1e-12);
    }

    #[test]
    fn test_zone_display() {
        assert_eq!(SeismicZone::IV.to_string(), "Zone IV");
        assert_eq!(SeismicZone::V.zone_factor(), 0.36);
    }
}
