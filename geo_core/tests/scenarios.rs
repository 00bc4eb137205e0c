//! End-to-end checks through all three stages with hand-worked numbers.

use geo_core::analysis::AnalysisState;
use geo_core::calculations::{
    classify_soil, derive_seismic_demand, evaluate_liquefaction, ClassificationScheme, SeismicZone, SoilClass,
    SoilSample, SubsurfaceLayer, Verdict,
};
use geo_core::equations::CrrModel;

fn approx(actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() < tol,
        "expected {} ± {}, got {}",
        expected,
        tol,
        actual
    );
}

fn silty_sand() -> SoilSample {
    SoilSample {
        liquid_limit: 30.0,
        plastic_limit: 20.0,
        fines_percent: 35.0,
        d10_mm: 0.1,
        d30_mm: 0.2,
        d60_mm: 0.3,
    }
}

#[test]
fn classification_of_silty_sand() {
    let c = classify_soil(&silty_sand(), ClassificationScheme::FinesThreshold).unwrap();
    approx(c.plasticity_index, 10.0, 1e-9);
    approx(c.cu, 3.0, 1e-9);
    approx(c.cc, 1.33, 0.01);
    assert_eq!(c.soil_class, SoilClass::SM);
}

#[test]
fn seismic_demand_for_silty_sand() {
    let d = derive_seismic_demand(&SoilClass::SM);
    assert_eq!(d.zone, SeismicZone::IV);
    approx(d.zone_factor, 0.24, 1e-12);
    approx(d.amplification, 1.2, 1e-12);
    // 0.24 · 1.2 · 9.81
    approx(d.amax_mps2, 2.825, 1e-3);
    approx(d.amax_g, 0.288, 1e-9);
}

#[test]
fn liquefaction_of_loose_saturated_sand() {
    let layer = SubsurfaceLayer {
        depth_m: 5.0,
        unit_weight_knm3: 18.0,
        water_table_depth_m: 2.0,
        spt_n: 15.0,
    };
    let r = evaluate_liquefaction(0.288, &layer, CrrModel::IdrissBoulanger);

    approx(r.total_stress_kpa, 90.0, 1e-9);
    approx(r.effective_stress_kpa, 60.57, 1e-9);
    approx(r.stress_reduction_factor, 0.9617, 1e-3);
    approx(r.overburden_correction.unwrap(), 1.285, 1e-3);
    approx(r.n1_60.unwrap(), 19.27, 0.01);
    approx(r.csr.unwrap(), 0.2675, 1e-3);
    approx(r.crr.unwrap(), 0.2066, 1e-3);
    approx(r.factor_of_safety.unwrap(), 0.772, 1e-3);
    assert_eq!(r.verdict, Verdict::LiquefactionLikely);
}

#[test]
fn effective_stress_guard_at_zero() {
    // Water table at the surface and γ equal to γw: σv' = 0
    let layer = SubsurfaceLayer {
        depth_m: 5.0,
        unit_weight_knm3: 9.81,
        water_table_depth_m: 0.0,
        spt_n: 15.0,
    };
    let r = evaluate_liquefaction(0.288, &layer, CrrModel::IdrissBoulanger);
    assert_eq!(r.verdict, Verdict::InvalidEffectiveStress);
    assert!(r.factor_of_safety.is_none());
    assert!(!r.verdict.message().is_empty());
}

#[test]
fn water_table_at_layer_depth_is_still_valid() {
    // z = zw = 5 m, γ = 10: no pore pressure, σv' = σv = 50 kPa
    let layer = SubsurfaceLayer {
        depth_m: 5.0,
        unit_weight_knm3: 10.0,
        water_table_depth_m: 5.0,
        spt_n: 15.0,
    };
    let r = evaluate_liquefaction(0.288, &layer, CrrModel::IdrissBoulanger);
    approx(r.effective_stress_kpa, 50.0, 1e-9);
    assert!(r.verdict.is_valid());
}

#[test]
fn state_machine_walkthrough_matches_direct_calls() {
    let layer = SubsurfaceLayer {
        depth_m: 5.0,
        unit_weight_knm3: 18.0,
        water_table_depth_m: 2.0,
        spt_n: 15.0,
    };
    let state = AnalysisState::new()
        .classify(&silty_sand(), ClassificationScheme::FinesThreshold)
        .and_then(AnalysisState::derive_demand)
        .and_then(|s| s.evaluate(&layer, CrrModel::SeedIdriss))
        .unwrap();

    let direct = evaluate_liquefaction(0.24 * 1.2, &layer, CrrModel::SeedIdriss);
    assert_eq!(state.liquefaction(), Some(&direct));
    assert_eq!(state.reset(), AnalysisState::AwaitingClassification);
}
