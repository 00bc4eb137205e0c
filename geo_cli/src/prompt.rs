//! Interactive three-step walkthrough on stdin/stdout.
//!
//! Each step only runs once the previous one has produced output; an
//! invalid entry at step 1 sends the user back to re-enter the sample.

use std::io::{self, BufRead, Write};

use geo_core::analysis::{AnalysisSettings, AnalysisState};
use geo_core::calculations::{SoilSample, SubsurfaceLayer};
use geo_core::CalcResult;

use crate::render;

fn prompt_line(prompt: &str) -> Option<String> {
    print!("{}", prompt);
    io::stdout().flush().ok()?;

    let mut input = String::new();
    match io::stdin().lock().read_line(&mut input) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(input.trim().to_string()),
    }
}

/// Empty input takes the default; anything else must parse as a finite number.
fn parse_or_default(input: &str, default: f64) -> Option<f64> {
    if input.is_empty() {
        return Some(default);
    }
    input.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Ask until the answer is empty or a number. End of input takes the default.
fn prompt_f64(prompt: &str, default: f64) -> f64 {
    loop {
        let Some(line) = prompt_line(prompt) else {
            return default;
        };
        match parse_or_default(&line, default) {
            Some(value) => return value,
            None => println!("    '{}' is not a number, try again.", line),
        }
    }
}

fn prompt_yes(prompt: &str) -> bool {
    matches!(
        prompt_line(prompt).as_deref().map(str::to_ascii_lowercase).as_deref(),
        Some("y") | Some("yes")
    )
}

fn read_sample() -> SoilSample {
    println!("Provide Atterberg limits and grain size data:");
    SoilSample {
        liquid_limit: prompt_f64("  Liquid Limit LL (0-100 %) [30.0]: ", 30.0),
        plastic_limit: prompt_f64("  Plastic Limit PL (0-100 %) [20.0]: ", 20.0),
        fines_percent: prompt_f64("  Fines content, % passing 75 µm (0-100) [35.0]: ", 35.0),
        d10_mm: prompt_f64("  D10 (mm) [0.1]: ", 0.1),
        d30_mm: prompt_f64("  D30 (mm) [0.2]: ", 0.2),
        d60_mm: prompt_f64("  D60 (mm) [0.3]: ", 0.3),
    }
}

fn read_layer() -> SubsurfaceLayer {
    SubsurfaceLayer {
        depth_m: prompt_f64("  Depth of soil layer (0.5-50 m) [5.0]: ", 5.0),
        unit_weight_knm3: prompt_f64("  Unit weight (10-25 kN/m³) [18.0]: ", 18.0),
        water_table_depth_m: prompt_f64("  Water table depth (0-50 m) [2.0]: ", 2.0),
        spt_n: prompt_f64("  SPT N-value (1-100) [15]: ", 15.0),
    }
}

/// Run the walkthrough until the user declines to continue.
pub fn run(settings: AnalysisSettings) -> CalcResult<()> {
    let mut state = AnalysisState::new();

    loop {
        render::banner("STEP 1: SOIL CLASSIFICATION");
        let sample = read_sample();
        state = match state.classify(&sample, settings.classification_scheme) {
            Ok(next) => next,
            Err(e) => {
                render::error(&e);
                println!();
                state = AnalysisState::new();
                continue;
            }
        };
        println!();
        if let Some(c) = state.classification() {
            render::classification(c);
        }
        println!();

        render::banner("STEP 2: PEAK GROUND ACCELERATION");
        state = state.derive_demand()?;
        if let Some(d) = state.demand() {
            render::demand(d);
        }
        println!();

        render::banner("STEP 3: LIQUEFACTION CHECK");
        loop {
            let layer = read_layer();
            if let Err(e) = layer.validate_ranges() {
                render::error(&e);
                println!();
                continue;
            }
            state = state.evaluate(&layer, settings.crr_model)?;
            println!();
            if let Some(r) = state.liquefaction() {
                render::liquefaction(r);
            }
            println!();
            if !prompt_yes("Check another layer for this soil? [y/N]: ") {
                break;
            }
        }

        if !prompt_yes("Reset and start a new analysis? [y/N]: ") {
            return Ok(());
        }
        state = state.reset();
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_takes_default() {
        assert_eq!(parse_or_default("", 15.0), Some(15.0));
    }

    #[test]
    fn test_number_is_parsed() {
        assert_eq!(parse_or_default("0.25", 0.1), Some(0.25));
        assert_eq!(parse_or_default("-3", 0.0), Some(-3.0));
    }

    #[test]
    fn test_typo_is_rejected_not_defaulted() {
        assert_eq!(parse_or_default("0..1", 0.1), None);
        assert_eq!(parse_or_default("1S", 15.0), None);
        assert_eq!(parse_or_default("NaN", 15.0), None);
        assert_eq!(parse_or_default("inf", 15.0), None);
    }
}
