//! # Liquefy CLI
//!
//! Terminal front end for geo_core: run any single stage, the whole
//! pipeline, an interactive walkthrough, or a saved project.
//!
//! Human-readable output goes to stdout; `--json` prints the structured
//! result instead. Errors go to stderr together with their JSON form.

mod prompt;
mod render;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use geo_core::analysis::{run_pipeline, AnalysisSettings, PipelineReport, SiteInput};
use geo_core::calculations::{
    classify_soil, derive_seismic_demand, evaluate_liquefaction, ClassificationScheme, SoilClass, SoilSample,
    SubsurfaceLayer,
};
use geo_core::equations::{crr_curve, CrrModel};
use geo_core::file_io::{load_project_with_lock_check, load_site_inputs, save_project, FileLock};
use geo_core::project::Project;
use geo_core::{CalcError, CalcResult};

#[derive(Parser, Debug)]
#[command(name = "liquefy", version, about = "Soil classification and liquefaction checks")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify a soil sample from Atterberg limits and grain sizes.
    Classify {
        #[command(flatten)]
        sample: SampleArgs,
        #[command(flatten)]
        method: MethodArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Look up the seismic demand for a soil class (e.g. SM, CL, "SC/SM").
    Demand {
        /// USCS group symbol; unknown symbols use the default zone
        #[arg(long)]
        soil_class: SoilClass,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Check one layer for liquefaction at a given amax/g.
    Check {
        /// Peak ground acceleration as a fraction of g
        #[arg(long)]
        amax_g: f64,
        #[command(flatten)]
        layer: LayerArgs,
        #[command(flatten)]
        method: MethodArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Run all three stages, from flags or from a JSON file of sites.
    Run {
        /// JSON file with one site object or an array of them
        #[arg(long)]
        input: Option<PathBuf>,
        #[command(flatten)]
        sample: SampleArgs,
        #[command(flatten)]
        layer: LayerArgs,
        #[command(flatten)]
        method: MethodArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Step through the three stages interactively.
    Interactive {
        #[command(flatten)]
        method: MethodArgs,
    },
    /// Tabulate a CRR correlation against blow count.
    Curve {
        #[arg(long, default_value_t = CrrModel::IdrissBoulanger)]
        model: CrrModel,
        /// Largest blow count to sample
        #[arg(long, default_value_t = 40.0)]
        max_n: f64,
        #[arg(long, default_value_t = 1.0)]
        step: f64,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Manage `.geo` project files.
    #[command(subcommand)]
    Project(ProjectCommand),
}

#[derive(Subcommand, Debug)]
enum ProjectCommand {
    /// Create an empty project file.
    New {
        path: PathBuf,
        #[arg(long, default_value = "")]
        engineer: String,
        #[arg(long, default_value = "")]
        job: String,
        #[arg(long, default_value = "")]
        client: String,
        #[command(flatten)]
        method: MethodArgs,
    },
    /// Add the sites in a JSON file to a project.
    Add {
        path: PathBuf,
        /// JSON file with one site object or an array of them
        #[arg(long)]
        input: PathBuf,
        /// Name recorded in the lock file while editing
        #[arg(long, default_value = "unknown")]
        user: String,
    },
    /// Evaluate every site in a project with the project's settings.
    Evaluate {
        path: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Args, Debug, Clone, Copy)]
struct SampleArgs {
    /// Liquid limit LL (%)
    #[arg(long, default_value_t = 30.0)]
    ll: f64,
    /// Plastic limit PL (%)
    #[arg(long, default_value_t = 20.0)]
    pl: f64,
    /// Fines content, % passing 75 µm
    #[arg(long, default_value_t = 35.0)]
    fines: f64,
    /// D10 (mm)
    #[arg(long, default_value_t = 0.1)]
    d10: f64,
    /// D30 (mm)
    #[arg(long, default_value_t = 0.2)]
    d30: f64,
    /// D60 (mm)
    #[arg(long, default_value_t = 0.3)]
    d60: f64,
}

impl From<SampleArgs> for SoilSample {
    fn from(a: SampleArgs) -> Self {
        SoilSample {
            liquid_limit: a.ll,
            plastic_limit: a.pl,
            fines_percent: a.fines,
            d10_mm: a.d10,
            d30_mm: a.d30,
            d60_mm: a.d60,
        }
    }
}

#[derive(Args, Debug, Clone, Copy)]
struct LayerArgs {
    /// Depth of the layer (m)
    #[arg(long, default_value_t = 5.0)]
    depth: f64,
    /// Unit weight of soil (kN/m³)
    #[arg(long, default_value_t = 18.0)]
    unit_weight: f64,
    /// Depth to the water table (m)
    #[arg(long, default_value_t = 2.0)]
    water_table: f64,
    /// SPT N-value
    #[arg(long, default_value_t = 15.0)]
    spt_n: f64,
    /// Skip the documented input range checks
    #[arg(long)]
    allow_out_of_range: bool,
}

impl LayerArgs {
    fn layer(&self) -> CalcResult<SubsurfaceLayer> {
        let layer = SubsurfaceLayer {
            depth_m: self.depth,
            unit_weight_knm3: self.unit_weight,
            water_table_depth_m: self.water_table,
            spt_n: self.spt_n,
        };
        if !self.allow_out_of_range {
            layer.validate_ranges()?;
        }
        Ok(layer)
    }
}

#[derive(Args, Debug, Clone, Copy)]
struct MethodArgs {
    /// CRR correlation: idriss-boulanger or seed-idriss
    #[arg(long)]
    model: Option<CrrModel>,
    /// Classification rules: fines-threshold or gravel-family
    #[arg(long)]
    scheme: Option<ClassificationScheme>,
}

impl MethodArgs {
    /// Flags override the given base settings.
    fn apply(&self, base: AnalysisSettings) -> AnalysisSettings {
        AnalysisSettings {
            crr_model: self.model.unwrap_or(base.crr_model),
            classification_scheme: self.scheme.unwrap_or(base.classification_scheme),
        }
    }
}

#[derive(Args, Debug, Clone, Copy)]
struct OutputArgs {
    /// Print JSON instead of the text report
    #[arg(long)]
    json: bool,
}

fn print_json<T: Serialize>(value: &T) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(value).map_err(CalcError::serialization)?;
    println!("{}", json);
    Ok(())
}

/// Run the pipeline for each site independently; one bad site does not stop
/// the rest.
fn evaluate_sites(
    sites: Vec<SiteInput>,
    settings: &AnalysisSettings,
    allow_out_of_range: bool,
) -> Vec<(String, CalcResult<PipelineReport>)> {
    sites
        .into_iter()
        .map(|site| {
            let result = if allow_out_of_range {
                run_pipeline(&site, settings)
            } else {
                site.layer.validate_ranges().and_then(|()| run_pipeline(&site, settings))
            };
            (site.label, result)
        })
        .collect()
}

fn run(cli: Cli) -> CalcResult<()> {
    match cli.command {
        Command::Classify { sample, method, output } => {
            let settings = method.apply(AnalysisSettings::default());
            let result = classify_soil(&SoilSample::from(sample), settings.classification_scheme)?;
            if output.json {
                return print_json(&result);
            }
            render::classification(&result);
        }
        Command::Demand { soil_class, output } => {
            let demand = derive_seismic_demand(&soil_class);
            if output.json {
                return print_json(&demand);
            }
            render::demand(&demand);
        }
        Command::Check {
            amax_g,
            layer,
            method,
            output,
        } => {
            let settings = method.apply(AnalysisSettings::default());
            let result = evaluate_liquefaction(amax_g, &layer.layer()?, settings.crr_model);
            if output.json {
                return print_json(&result);
            }
            render::liquefaction(&result);
        }
        Command::Run {
            input,
            sample,
            layer,
            method,
            output,
        } => {
            let settings = method.apply(AnalysisSettings::default());
            let sites = match input {
                Some(path) => load_site_inputs(&path)?,
                None => vec![SiteInput {
                    label: "CLI".to_string(),
                    sample: sample.into(),
                    layer: layer.layer()?,
                }],
            };
            let results = evaluate_sites(sites, &settings, layer.allow_out_of_range);

            if output.json {
                let entries: Vec<serde_json::Value> = results
                    .iter()
                    .map(|(label, result)| match result {
                        Ok(report) => serde_json::json!({ "label": label, "report": report }),
                        Err(e) => serde_json::json!({ "label": label, "error": e }),
                    })
                    .collect();
                return print_json(&entries);
            }

            for (label, result) in &results {
                match result {
                    Ok(report) => render::report(report),
                    Err(e) => {
                        println!("Site {}: skipped", label);
                        render::error(e);
                        println!();
                    }
                }
            }
        }
        Command::Interactive { method } => {
            println!("Liquefy - Soil Classification & Liquefaction Analysis");
            println!("=====================================================");
            println!();
            prompt::run(method.apply(AnalysisSettings::default()))?;
        }
        Command::Curve {
            model,
            max_n,
            step,
            output,
        } => {
            let points = crr_curve(model, max_n, step)?;
            if output.json {
                return print_json(&points);
            }
            println!("CRR curve: {}", model);
            render::curve(&points);
        }
        Command::Project(cmd) => run_project(cmd)?,
    }
    Ok(())
}

fn run_project(cmd: ProjectCommand) -> CalcResult<()> {
    match cmd {
        ProjectCommand::New {
            path,
            engineer,
            job,
            client,
            method,
        } => {
            let mut project = Project::new(engineer, job, client);
            project.set_settings(method.apply(project.settings));
            save_project(&project, &path)?;
            println!("Created project {} ({})", path.display(), project.meta.job_id);
        }
        ProjectCommand::Add { path, input, user } => {
            let lock = FileLock::acquire(&path, user)?;
            let (mut project, _) = load_project_with_lock_check(&path)?;
            let sites = load_site_inputs(&input)?;
            for site in sites {
                let label = site.label.clone();
                let id = project.add_item(site);
                println!("Added {} ({})", label, id);
            }
            save_project(&project, lock.project_path())?;
        }
        ProjectCommand::Evaluate { path, output } => {
            let (project, lock) = load_project_with_lock_check(&path)?;
            if let Some(info) = lock {
                eprintln!(
                    "Note: {} is being edited by {} since {}",
                    path.display(),
                    info.user_id,
                    info.locked_at.to_rfc3339()
                );
            }
            let results = project.evaluate_all();

            if output.json {
                let entries: Vec<serde_json::Value> = results
                    .iter()
                    .map(|(id, result)| match result {
                        Ok(report) => serde_json::json!({ "id": id, "report": report }),
                        Err(e) => serde_json::json!({ "id": id, "error": e }),
                    })
                    .collect();
                return print_json(&entries);
            }

            println!(
                "Project {} | {} | {} sites | CRR: {}",
                project.meta.job_id,
                project.meta.client,
                project.item_count(),
                project.settings.crr_model
            );
            println!();
            for (id, result) in &results {
                match result {
                    Ok(report) => render::report(report),
                    Err(e) => {
                        println!("Site {} ({}): skipped", project.items[id].label, id);
                        render::error(e);
                        println!();
                    }
                }
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            render::error(&e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_method_flags_parse() {
        let cli = Cli::try_parse_from(["liquefy", "run", "--model", "seed-idriss", "--scheme", "gravel-family"]).unwrap();
        match cli.command {
            Command::Run { method, .. } => {
                let settings = method.apply(AnalysisSettings::default());
                assert_eq!(settings.crr_model, CrrModel::SeedIdriss);
                assert_eq!(settings.classification_scheme, ClassificationScheme::GravelFamily);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_unknown_model_rejected() {
        assert!(Cli::try_parse_from(["liquefy", "check", "--amax-g", "0.2", "--model", "robertson"]).is_err());
    }

    #[test]
    fn test_layer_range_check_can_be_skipped() {
        let cli = Cli::try_parse_from([
            "liquefy", "check", "--amax-g", "0.288", "--unit-weight", "9.81", "--water-table", "0",
        ])
        .unwrap();
        let Command::Check { layer, .. } = cli.command else {
            panic!("expected check");
        };
        assert!(layer.layer().is_err());

        let relaxed = LayerArgs { allow_out_of_range: true, ..layer };
        assert_eq!(relaxed.layer().unwrap().unit_weight_knm3, 9.81);
    }

    fn site(label: &str, unit_weight_knm3: f64) -> SiteInput {
        SiteInput {
            label: label.to_string(),
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
                unit_weight_knm3,
                water_table_depth_m: 2.0,
                spt_n: 15.0,
            },
        }
    }

    #[test]
    fn test_file_sites_are_range_checked_per_site() {
        let sites = vec![site("B-1", 18.0), site("B-2", 8.0), site("B-3", 20.0)];
        let results = evaluate_sites(sites, &AnalysisSettings::default(), false);

        assert_eq!(results.len(), 3);
        assert!(results[0].1.is_ok());
        assert_eq!(results[1].0, "B-2");
        assert!(matches!(
            results[1].1,
            Err(CalcError::InvalidInput { ref field, .. }) if field == "unit_weight_knm3"
        ));
        assert!(results[2].1.is_ok());
    }

    #[test]
    fn test_file_sites_range_check_can_be_skipped() {
        let results = evaluate_sites(vec![site("B-2", 8.0)], &AnalysisSettings::default(), true);
        assert!(results[0].1.is_ok());
    }

    #[test]
    fn test_soil_class_flag() {
        let cli = Cli::try_parse_from(["liquefy", "demand", "--soil-class", "SC/SM"]).unwrap();
        let Command::Demand { soil_class, .. } = cli.command else {
            panic!("expected demand");
        };
        assert_eq!(soil_class, SoilClass::ScSm);
    }
}
