//! Plain-text rendering of the dashboard, used for CLI output and printing.

use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::controller::{Controller, FieldId};
use crate::view::{Dashboard, Donut};

/// Printable snapshot of one estimator state.
#[derive(Debug, Clone)]
pub struct Report {
    inputs: Vec<(String, String)>,
    policy: String,
    dashboard: Dashboard,
}

impl Report {
    /// Captures the controller's current inputs and dashboard.
    pub fn from_controller(c: &Controller) -> Self {
        let mut inputs: Vec<(String, String)> = FieldId::all()
            .map(|id| {
                (
                    id.to_string(),
                    format!("{} {}", c.display_value(id), id.unit()),
                )
            })
            .collect();
        inputs.insert(
            2,
            ("Orientation".to_string(), c.input().orientation.to_string()),
        );
        let policy = c
            .heuristics()
            .policy()
            .map_or_else(|| "custom".to_string(), |p| p.to_string());
        Self {
            inputs,
            policy,
            dashboard: c.dashboard().clone(),
        }
    }

    /// Writes the report to `path`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns an `io::Error` if the file cannot be created or written.
    pub fn write_to_path(&self, path: &Path) -> io::Result<()> {
        let mut w = BufWriter::new(File::create(path)?);
        write!(w, "{self}")?;
        w.flush()?;
        info!(path = %path.display(), "report written");
        Ok(())
    }
}

fn write_donut(f: &mut fmt::Formatter<'_>, donut: &Donut, center: &str) -> fmt::Result {
    writeln!(f, "{} ({center} {})", donut.title, donut.center_label)?;
    for (slice, frac) in donut.slices.iter().zip(donut.fractions()) {
        writeln!(
            f,
            "  {:<20} {:>9.0} kWh  {:>5.1}%",
            slice.label,
            slice.kwh,
            frac * 100.0
        )?;
    }
    Ok(())
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let k = &self.dashboard.kpis;
        writeln!(f, "--- PV Estimate ---")?;
        for (label, value) in &self.inputs {
            writeln!(f, "{:<22} {value}", format!("{label}:"))?;
        }
        writeln!(f, "{:<22} {}", "Policy:", self.policy)?;
        writeln!(f)?;
        writeln!(f, "Cost without PV:       {}", k.cost_without_pv)?;
        writeln!(f, "Savings:               {}", k.savings)?;
        writeln!(f, "Remaining grid cost:   {}", k.remaining_grid_cost)?;
        writeln!(f, "Export revenue:        {}", k.revenue_from_export)?;
        writeln!(f, "Cost with PV:          {}", k.cost_with_pv)?;
        writeln!(f)?;
        write_donut(f, &self.dashboard.production, "self-consumption")?;
        write_donut(f, &self.dashboard.consumption, "autarky")?;
        writeln!(f)?;
        write!(
            f,
            "Electricity cost: without PV {:.0} | with PV {:.0}",
            self.dashboard.costs.without_pv, self.dashboard.costs.with_pv
        )
    }
}
