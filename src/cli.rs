//! Command-line arguments.

use std::path::PathBuf;

use clap::{ArgGroup, Parser, ValueEnum};

use crate::controller::{FieldId, FieldUpdate};
use crate::estimator::{Orientation, Policy};

/// Output format of the one-shot estimate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Estimate yearly PV production, self-consumption, autarky and electricity cost.
#[derive(Parser, Debug)]
#[command(name = "pv-estimator", version, about, long_about = None)]
#[command(group(ArgGroup::new("source").args(["scenario", "preset"])))]
pub struct Args {
    /// Load the scenario from a TOML file
    #[arg(long, value_name = "PATH")]
    pub scenario: Option<PathBuf>,

    /// Use a built-in preset (default, no_battery, small_home, east_west)
    #[arg(long, value_name = "NAME")]
    pub preset: Option<String>,

    /// Heuristic variant, overriding the scenario's
    #[arg(long, value_parser = parse_policy)]
    pub policy: Option<Policy>,

    /// Annual consumption in kWh
    #[arg(long, value_name = "KWH")]
    pub consumption: Option<String>,

    /// PV peak power in kWp
    #[arg(long = "pv-kwp", value_name = "KWP")]
    pub pv_kwp: Option<String>,

    /// Array orientation (south, south-east, south-west, east, west, north)
    #[arg(long)]
    pub orientation: Option<String>,

    /// Battery capacity in kWh
    #[arg(long, value_name = "KWH")]
    pub battery: Option<String>,

    /// Electricity price per kWh
    #[arg(long)]
    pub price: Option<String>,

    /// Feed-in tariff per kWh
    #[arg(long = "feed-in")]
    pub feed_in: Option<String>,

    /// Output format of the estimate
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Write inputs and results to a CSV file
    #[arg(long, value_name = "PATH")]
    pub export: Option<PathBuf>,

    /// Write the printable report to a file
    #[arg(long = "print-to", value_name = "PATH")]
    pub print_to: Option<PathBuf>,

    /// Open the interactive terminal dashboard
    #[arg(long)]
    pub tui: bool,

    /// Append log records to this file instead of stderr
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

fn parse_policy(s: &str) -> Result<Policy, String> {
    s.parse()
        .map_err(|_| format!("unknown policy \"{s}\" (expected uncapped or capped)"))
}

impl Args {
    /// Preset to load when no scenario file is given.
    pub fn preset_name(&self) -> &str {
        self.preset.as_deref().unwrap_or("default")
    }

    /// Per-field overrides as controller updates, entered as number-box text.
    pub fn overrides(&self) -> Vec<FieldUpdate> {
        let numbers = [
            (FieldId::Consumption, &self.consumption),
            (FieldId::PvPower, &self.pv_kwp),
            (FieldId::Battery, &self.battery),
            (FieldId::Price, &self.price),
            (FieldId::FeedIn, &self.feed_in),
        ];
        let mut updates: Vec<FieldUpdate> = numbers
            .into_iter()
            .filter_map(|(id, text)| text.clone().map(|t| FieldUpdate::Number(id, t)))
            .collect();
        if let Some(name) = &self.orientation {
            updates.push(FieldUpdate::Orientation(Orientation::lookup(name)));
        }
        if let Some(policy) = self.policy {
            updates.push(FieldUpdate::Policy(policy));
        }
        updates
    }
}
