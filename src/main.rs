//! pv-estimator entry point: CLI wiring, scenario loading and output.

use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::info;

use pv_estimator::cli::{Args, OutputFormat};
use pv_estimator::config::ScenarioConfig;
use pv_estimator::controller::Controller;
use pv_estimator::estimator::{EstimatorInput, EstimatorOutput};
use pv_estimator::io::export::export_csv;
use pv_estimator::logging::{LogTarget, init_logging};
use pv_estimator::report::Report;
use pv_estimator::view::Dashboard;

/// JSON document emitted by `--format json`.
#[derive(Serialize)]
struct Estimate<'a> {
    input: &'a EstimatorInput,
    output: &'a EstimatorOutput,
    dashboard: &'a Dashboard,
}

fn load_scenario(args: &Args) -> Result<ScenarioConfig> {
    let scenario = match &args.scenario {
        Some(path) => ScenarioConfig::from_toml_file(path)?,
        None => ScenarioConfig::from_preset(args.preset_name())?,
    };
    Ok(scenario)
}

fn main() -> Result<()> {
    let args = Args::parse();

    let target = match (&args.log_file, args.tui) {
        (Some(path), _) => LogTarget::File(path),
        (None, true) => LogTarget::Off,
        (None, false) => LogTarget::Stderr,
    };
    init_logging(args.verbose, target)?;

    let scenario = load_scenario(&args)?;
    let errors = scenario.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    let mut controller = Controller::new(scenario.input(), scenario.heuristics.build());
    for update in args.overrides() {
        controller.apply(update);
    }
    info!(
        production_kwh = controller.output().pv_production_kwh,
        savings = controller.output().savings,
        "estimate ready"
    );

    if args.tui {
        return run_tui(&args, controller);
    }

    match args.format {
        OutputFormat::Text => print!("{}", Report::from_controller(&controller)),
        OutputFormat::Json => {
            let doc = Estimate {
                input: controller.input(),
                output: controller.output(),
                dashboard: controller.dashboard(),
            };
            let json = serde_json::to_string_pretty(&doc).context("failed to encode JSON")?;
            println!("{json}");
        }
    }

    if let Some(path) = &args.export {
        export_csv(&[(*controller.input(), *controller.output())], path)
            .with_context(|| format!("failed to write CSV to '{}'", path.display()))?;
        eprintln!("Estimate written to {}", path.display());
    }

    if let Some(path) = &args.print_to {
        Report::from_controller(&controller)
            .write_to_path(path)
            .with_context(|| format!("failed to write report to '{}'", path.display()))?;
        eprintln!("Report written to {}", path.display());
    }

    Ok(())
}

#[cfg(feature = "tui")]
fn run_tui(args: &Args, controller: Controller) -> Result<()> {
    use std::path::PathBuf;

    use pv_estimator::tui::{self, runtime::App};

    // Where the print action writes when `--print-to` is absent.
    const DEFAULT_PRINT_PATH: &str = "pv-estimate.txt";

    let print_path = args
        .print_to
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_PRINT_PATH));
    let preset = match &args.scenario {
        Some(path) => path.display().to_string(),
        None => args.preset_name().to_string(),
    };
    let mut app = App::new(controller, &preset, print_path);
    tui::run(&mut app)
}

#[cfg(not(feature = "tui"))]
fn run_tui(_args: &Args, _controller: Controller) -> Result<()> {
    anyhow::bail!("this build has no terminal dashboard; rebuild with `--features tui`")
}
