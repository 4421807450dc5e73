//! Estimator input and output records.

use serde::{Deserialize, Serialize};

use super::orientation::Orientation;

/// Household and system parameters for one estimate.
///
/// Numeric fields are expected to be non-negative and finite. The estimator
/// does not check this; [`crate::controller::Controller`] keeps every field
/// inside its slider bounds before an estimate is made.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EstimatorInput {
    /// Yearly household electricity use (kWh).
    pub annual_consumption_kwh: f64,
    /// Installed PV peak power (kWp).
    pub pv_power_kwp: f64,
    /// Compass direction of the array.
    pub orientation: Orientation,
    /// Installed battery capacity (kWh).
    pub battery_kwh: f64,
    /// Price paid per kWh bought from the grid.
    pub electricity_price: f64,
    /// Price received per kWh exported to the grid.
    pub feed_in_tariff: f64,
}

impl Default for EstimatorInput {
    fn default() -> Self {
        Self {
            annual_consumption_kwh: 9500.0,
            pv_power_kwp: 8.0,
            orientation: Orientation::South,
            battery_kwh: 20.0,
            electricity_price: 0.25,
            feed_in_tariff: 0.0,
        }
    }
}

/// Everything derived from one [`EstimatorInput`].
///
/// Energies are yearly kWh, costs are yearly currency units, shares are
/// fractions in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EstimatorOutput {
    pub orientation_factor: f64,
    pub pv_production_kwh: f64,
    /// `consumption / production`, 0 without production.
    pub consumption_to_pv: f64,
    /// Clamped heuristic self-consumption share before any capping.
    pub base_self_share: f64,
    pub self_consumption_kwh: f64,
    /// Fraction of production used by the household.
    pub self_consumption_share: f64,
    /// Fraction of consumption covered without buying from the grid.
    pub autarky_share: f64,
    pub grid_purchase_kwh: f64,
    pub export_kwh: f64,
    pub cost_without_pv: f64,
    pub remaining_grid_cost: f64,
    pub revenue_from_export: f64,
    /// Remaining grid cost minus export revenue; negative when export pays more.
    pub cost_with_pv: f64,
    pub savings: f64,
    /// Share of self-consumed energy that passes through the battery.
    pub battery_load_share: f64,
    // Load side: where the self-consumed energy reaches the household from.
    pub battery_discharge_to_load_kwh: f64,
    pub direct_use_to_load_kwh: f64,
    // PV side: where the produced energy goes.
    pub pv_to_battery_charge_kwh: f64,
    pub pv_direct_use_kwh: f64,
    pub pv_export_kwh: f64,
}
