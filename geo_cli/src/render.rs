//! Plain-text report blocks for each stage.

use geo_core::calculations::{LiquefactionResult, SeismicDemand, SoilClassification};
use geo_core::equations::CurvePoint;
use geo_core::{CalcError, PipelineReport};

const RULE: &str = "═══════════════════════════════════════";

pub fn banner(title: &str) {
    println!("{}", RULE);
    println!("  {}", title);
    println!("{}", RULE);
}

pub fn classification(c: &SoilClassification) {
    println!("Soil Classification ({}):", c.scheme);
    println!("  PI = {:.2} %", c.plasticity_index);
    println!("  Cu = {:.3}", c.cu);
    println!("  Cc = {:.3}", c.cc);
    println!("  Soil type: {}", c.soil_class);
}

pub fn demand(d: &SeismicDemand) {
    println!("Peak Ground Acceleration:");
    println!("  Soil type: {}, mapped {}", d.soil_class.code(), d.zone);
    println!("  Z = {:.2}, S = {:.2}", d.zone_factor, d.amplification);
    println!("  amax = {:.2} m/s²  →  amax/g = {:.3}", d.amax_mps2, d.amax_g);
}

pub fn liquefaction(r: &LiquefactionResult) {
    println!("Liquefaction Check ({}):", r.crr_model);
    println!("  Total vertical stress σv      = {:.2} kPa", r.total_stress_kpa);
    println!("  Effective vertical stress σv' = {:.2} kPa", r.effective_stress_kpa);
    println!("  Stress reduction factor rd    = {:.3}", r.stress_reduction_factor);

    if let (Some(cn), Some(n1_60), Some(csr), Some(crr), Some(fs)) = (
        r.overburden_correction,
        r.n1_60,
        r.csr,
        r.crr,
        r.factor_of_safety,
    ) {
        println!("  Overburden correction Cn      = {:.3}", cn);
        println!("  Corrected N-value N1_60       = {:.2}", n1_60);
        println!("  CSR                           = {:.3}", csr);
        println!(
            "  CRR                           = {:.3}{}",
            crr,
            if r.crr_capped { " (dense soil cap)" } else { "" }
        );
        println!("  Factor of Safety              = {:.2}", fs);
    }

    println!();
    println!("  {} {}", status_icon(r.verdict.is_valid() && !r.liquefies()), r.verdict.message());
}

pub fn report(report: &PipelineReport) {
    banner(&format!("SITE: {}", report.label));
    println!();
    classification(&report.classification);
    println!();
    demand(&report.demand);
    println!();
    liquefaction(&report.liquefaction);
    println!();
}

pub fn curve(points: &[CurvePoint]) {
    println!("{:>8}  {:>8}", "N", "CRR");
    for p in points {
        println!(
            "{:>8.1}  {:>8.3}{}",
            p.blow_count,
            p.crr,
            if p.capped { "  cap" } else { "" }
        );
    }
}

pub fn error(e: &CalcError) {
    eprintln!("Error: {}", e);
    if let Ok(json) = serde_json::to_string_pretty(e) {
        eprintln!();
        eprintln!("Error JSON:");
        eprintln!("{}", json);
    }
}

fn status_icon(pass: bool) -> &'static str {
    if pass { "[OK]" } else { "[FAIL]" }
}
