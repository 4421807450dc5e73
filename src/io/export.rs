//! CSV export of estimates.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::estimator::{EstimatorInput, EstimatorOutput};

/// Column header: the six inputs followed by the derived figures.
const HEADER: &str = "annual_consumption_kwh,pv_power_kwp,orientation,battery_kwh,\
                      electricity_price,feed_in_tariff,orientation_factor,\
                      pv_production_kwh,self_consumption_kwh,self_consumption_share,\
                      autarky_share,grid_purchase_kwh,export_kwh,pv_direct_use_kwh,\
                      pv_to_battery_charge_kwh,pv_export_kwh,direct_use_to_load_kwh,\
                      battery_discharge_to_load_kwh,cost_without_pv,savings,\
                      remaining_grid_cost,revenue_from_export,cost_with_pv";

/// Exports estimates to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(estimates: &[(EstimatorInput, EstimatorOutput)], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(estimates, buf)
}

/// Writes estimates as CSV to any writer, one row per estimate.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(
    estimates: &[(EstimatorInput, EstimatorOutput)],
    writer: impl Write,
) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(',').map(str::trim))?;

    for (i, m) in estimates {
        wtr.write_record(&[
            format!("{:.0}", i.annual_consumption_kwh),
            format!("{:.2}", i.pv_power_kwp),
            i.orientation.to_string(),
            format!("{:.2}", i.battery_kwh),
            format!("{:.4}", i.electricity_price),
            format!("{:.4}", i.feed_in_tariff),
            format!("{:.2}", m.orientation_factor),
            format!("{:.2}", m.pv_production_kwh),
            format!("{:.2}", m.self_consumption_kwh),
            format!("{:.4}", m.self_consumption_share),
            format!("{:.4}", m.autarky_share),
            format!("{:.2}", m.grid_purchase_kwh),
            format!("{:.2}", m.export_kwh),
            format!("{:.2}", m.pv_direct_use_kwh),
            format!("{:.2}", m.pv_to_battery_charge_kwh),
            format!("{:.2}", m.pv_export_kwh),
            format!("{:.2}", m.direct_use_to_load_kwh),
            format!("{:.2}", m.battery_discharge_to_load_kwh),
            format!("{:.2}", m.cost_without_pv),
            format!("{:.2}", m.savings),
            format!("{:.2}", m.remaining_grid_cost),
            format!("{:.2}", m.revenue_from_export),
            format!("{:.2}", m.cost_with_pv),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
