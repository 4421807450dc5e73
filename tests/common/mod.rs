//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use pv_estimator::estimator::{EstimatorInput, Orientation};

/// Absolute tolerance for kWh and currency comparisons.
pub const EPS: f64 = 1e-9;

/// The reference household (9500 kWh, 8 kWp south, 20 kWh, 0.25 price, no feed-in).
pub fn reference_input() -> EstimatorInput {
    EstimatorInput::default()
}

/// Small consumer with a large array and no battery.
///
/// The uncapped policy credits more self-consumption than the household
/// uses here; the capped policy does not.
pub fn surplus_input() -> EstimatorInput {
    EstimatorInput {
        annual_consumption_kwh: 3000.0,
        pv_power_kwp: 10.0,
        orientation: Orientation::South,
        battery_kwh: 0.0,
        electricity_price: 0.30,
        feed_in_tariff: 0.08,
    }
}

/// Builds an input from the five numeric fields, facing south.
pub fn input(consumption: f64, kwp: f64, battery: f64, price: f64, feed_in: f64) -> EstimatorInput {
    EstimatorInput {
        annual_consumption_kwh: consumption,
        pv_power_kwp: kwp,
        orientation: Orientation::South,
        battery_kwh: battery,
        electricity_price: price,
        feed_in_tariff: feed_in,
    }
}

/// Unique path in the system temp directory for files a test writes.
pub fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("pv-estimator-{}-{name}", std::process::id()))
}
