use tracing::trace;

use super::heuristics::Heuristics;
use super::types::{EstimatorInput, EstimatorOutput};

/// Computes the yearly estimate for `input` under `h`.
///
/// Pure and O(1). Every ratio is guarded, so zero production or zero
/// consumption yields zero shares instead of NaN.
pub fn calculate(input: &EstimatorInput, h: &Heuristics) -> EstimatorOutput {
    let consumption = input.annual_consumption_kwh;
    let battery = input.battery_kwh;

    let orientation_factor = input.orientation.factor();
    let pv_production_kwh =
        input.pv_power_kwp * h.specific_yield_kwh_per_kwp * orientation_factor;

    let consumption_to_pv = ratio(consumption, pv_production_kwh);
    let base_self_share = (h.self_share_base
        + h.self_share_per_battery_kwh * battery
        + h.self_share_consumption_weight * consumption_to_pv.min(1.0))
    .clamp(h.self_share_min, h.self_share_max);

    let uncapped_self_kwh = pv_production_kwh * base_self_share;
    let self_consumption_kwh = if h.cap_self_consumption {
        consumption.min(uncapped_self_kwh)
    } else {
        uncapped_self_kwh
    };

    let self_consumption_share = ratio(self_consumption_kwh, pv_production_kwh);
    let autarky_share = ratio(self_consumption_kwh, consumption).clamp(0.0, 1.0);

    let grid_purchase_kwh = (consumption - self_consumption_kwh).max(0.0);
    let export_kwh = (pv_production_kwh - self_consumption_kwh).max(0.0);

    let cost_without_pv = consumption * input.electricity_price;
    let remaining_grid_cost = grid_purchase_kwh * input.electricity_price;
    let revenue_from_export = export_kwh * input.feed_in_tariff;
    let cost_with_pv = remaining_grid_cost - revenue_from_export;
    let savings = cost_without_pv - cost_with_pv;

    let battery_load_share = if h.zero_load_share_without_battery && battery <= 0.0 {
        0.0
    } else {
        (h.battery_load_share_base + h.battery_load_share_per_kwh * battery)
            .clamp(h.battery_load_share_min, h.battery_load_share_max)
    };
    let battery_discharge_to_load_kwh = self_consumption_kwh * battery_load_share;
    let direct_use_to_load_kwh = (self_consumption_kwh - battery_discharge_to_load_kwh).max(0.0);

    let pv_to_battery_charge_kwh = if battery_discharge_to_load_kwh > 0.0 {
        battery_discharge_to_load_kwh / h.round_trip_efficiency
    } else {
        0.0
    };
    let pv_direct_use_kwh = direct_use_to_load_kwh;
    let pv_export_kwh = (pv_production_kwh - pv_direct_use_kwh - pv_to_battery_charge_kwh).max(0.0);

    trace!(
        pv_production_kwh,
        self_consumption_kwh,
        autarky_share,
        savings,
        "estimate computed"
    );

    EstimatorOutput {
        orientation_factor,
        pv_production_kwh,
        consumption_to_pv,
        base_self_share,
        self_consumption_kwh,
        self_consumption_share,
        autarky_share,
        grid_purchase_kwh,
        export_kwh,
        cost_without_pv,
        remaining_grid_cost,
        revenue_from_export,
        cost_with_pv,
        savings,
        battery_load_share,
        battery_discharge_to_load_kwh,
        direct_use_to_load_kwh,
        pv_to_battery_charge_kwh,
        pv_direct_use_kwh,
        pv_export_kwh,
    }
}

/// `num / den`, or 0 when `den` is not positive.
fn ratio(num: f64, den: f64) -> f64 {
    if den > 0.0 { num / den } else { 0.0 }
}
