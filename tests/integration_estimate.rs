//! Integration tests for the yearly estimate: pinned values and invariants.

mod common;

use approx::{assert_abs_diff_eq, assert_relative_eq};
use rstest::rstest;

use pv_estimator::estimator::{EstimatorInput, Heuristics, Orientation, Policy, calculate};
use pv_estimator::view::Dashboard;

#[rstest]
#[case::uncapped(Policy::Uncapped)]
#[case::capped(Policy::Capped)]
fn reference_household_is_pinned(#[case] policy: Policy) {
    let out = calculate(&common::reference_input(), &Heuristics::for_policy(policy));

    assert_relative_eq!(out.orientation_factor, 0.93);
    assert_relative_eq!(out.pv_production_kwh, 7440.0, max_relative = 1e-12);
    assert_relative_eq!(out.base_self_share, 0.80, max_relative = 1e-12);
    assert_relative_eq!(out.self_consumption_kwh, 5952.0, max_relative = 1e-12);
    assert_relative_eq!(out.self_consumption_share, 0.80, max_relative = 1e-12);
    assert_relative_eq!(out.autarky_share, 5952.0 / 9500.0, max_relative = 1e-12);
    assert_relative_eq!(out.grid_purchase_kwh, 3548.0, max_relative = 1e-12);
    assert_relative_eq!(out.export_kwh, 1488.0, max_relative = 1e-12);
    assert_relative_eq!(out.cost_without_pv, 2375.0, max_relative = 1e-12);
    assert_relative_eq!(out.remaining_grid_cost, 887.0, max_relative = 1e-12);
    assert_abs_diff_eq!(out.revenue_from_export, 0.0);
    assert_relative_eq!(out.cost_with_pv, 887.0, max_relative = 1e-12);
    assert_relative_eq!(out.savings, 1488.0, max_relative = 1e-12);
    assert_relative_eq!(out.battery_load_share, 0.39, max_relative = 1e-12);
    assert_relative_eq!(out.battery_discharge_to_load_kwh, 2321.28, max_relative = 1e-12);
    assert_relative_eq!(out.direct_use_to_load_kwh, 3630.72, max_relative = 1e-12);
    assert_relative_eq!(out.pv_to_battery_charge_kwh, 2579.2, max_relative = 1e-12);
    assert_relative_eq!(out.pv_direct_use_kwh, 3630.72, max_relative = 1e-12);
    assert_relative_eq!(out.pv_export_kwh, 1230.08, max_relative = 1e-12);
}

#[test]
fn reference_dashboard_figures() {
    let out = calculate(&common::reference_input(), &Heuristics::default());
    let dash = Dashboard::project(&out);

    assert_eq!(dash.kpis.cost_without_pv, 2375);
    assert_eq!(dash.kpis.savings, 1488);
    assert_eq!(dash.kpis.remaining_grid_cost, 887);
    assert_eq!(dash.kpis.revenue_from_export, 0);
    assert_eq!(dash.kpis.cost_with_pv, 887);
    assert_eq!(dash.production.center_label, "80%");
    assert_eq!(dash.consumption.center_label, "63%");
}

#[test]
fn surplus_household_uncapped_overstates_self_consumption() {
    let out = calculate(&common::surplus_input(), &Heuristics::uncapped());

    assert_relative_eq!(out.pv_production_kwh, 9300.0, max_relative = 1e-12);
    assert_relative_eq!(out.self_consumption_kwh, 3336.0, max_relative = 1e-12);
    assert!(out.self_consumption_kwh > 3000.0);
    // Autarky would exceed 100% without the clamp.
    assert_abs_diff_eq!(out.autarky_share, 1.0);
    assert_abs_diff_eq!(out.grid_purchase_kwh, 0.0);
    assert_relative_eq!(out.export_kwh, 5964.0, max_relative = 1e-12);
    assert_relative_eq!(out.revenue_from_export, 477.12, max_relative = 1e-12);
    assert_relative_eq!(out.cost_with_pv, -477.12, max_relative = 1e-12);
    assert_relative_eq!(out.savings, 1377.12, max_relative = 1e-12);
    // No battery, yet the floor share still applies.
    assert_relative_eq!(out.battery_load_share, 0.15, max_relative = 1e-12);
    assert_relative_eq!(out.battery_discharge_to_load_kwh, 500.4, max_relative = 1e-12);
    assert_relative_eq!(out.pv_to_battery_charge_kwh, 556.0, max_relative = 1e-12);
    assert_relative_eq!(out.pv_export_kwh, 5908.4, max_relative = 1e-12);
}

#[test]
fn surplus_household_capped_stays_physical() {
    let out = calculate(&common::surplus_input(), &Heuristics::capped());

    assert_relative_eq!(out.self_consumption_kwh, 3000.0, max_relative = 1e-12);
    assert_relative_eq!(out.self_consumption_share, 3000.0 / 9300.0, max_relative = 1e-12);
    assert_abs_diff_eq!(out.autarky_share, 1.0);
    assert_relative_eq!(out.export_kwh, 6300.0, max_relative = 1e-12);
    assert_relative_eq!(out.savings, 1404.0, max_relative = 1e-12);
    assert_abs_diff_eq!(out.battery_load_share, 0.0);
    assert_abs_diff_eq!(out.battery_discharge_to_load_kwh, 0.0);
    assert_abs_diff_eq!(out.pv_to_battery_charge_kwh, 0.0);
    assert_relative_eq!(out.direct_use_to_load_kwh, 3000.0, max_relative = 1e-12);
    assert_relative_eq!(out.pv_export_kwh, 6300.0, max_relative = 1e-12);

    let dash = Dashboard::project(&out);
    assert_eq!(dash.kpis.cost_with_pv, -504);
    assert_eq!(dash.consumption.center_label, "100%");
}

#[test]
fn orientation_orders_production() {
    let produce = |orientation| {
        let input = EstimatorInput {
            orientation,
            ..common::reference_input()
        };
        calculate(&input, &Heuristics::default()).pv_production_kwh
    };
    let south = produce(Orientation::South);
    let south_east = produce(Orientation::SouthEast);
    let east = produce(Orientation::East);
    let north = produce(Orientation::North);

    assert!(south > south_east);
    assert!(south_east > east);
    assert!(east > north);
    assert_relative_eq!(south_east, produce(Orientation::SouthWest));
    assert_relative_eq!(east, produce(Orientation::West));
}

#[rstest]
fn invariants_hold_across_inputs(
    #[values(0.0, 500.0, 3000.0, 9500.0, 20_000.0)] consumption: f64,
    #[values(0.0, 0.1, 4.0, 8.0, 30.0)] kwp: f64,
    #[values(0.0, 5.0, 30.0)] battery: f64,
    #[values(0.0, 0.08)] feed_in: f64,
    #[values(Policy::Uncapped, Policy::Capped)] policy: Policy,
) {
    let input = common::input(consumption, kwp, battery, 0.30, feed_in);
    let h = Heuristics::for_policy(policy);
    let out = calculate(&input, &h);

    for (name, v) in [
        ("production", out.pv_production_kwh),
        ("self", out.self_consumption_kwh),
        ("grid", out.grid_purchase_kwh),
        ("export", out.export_kwh),
        ("discharge", out.battery_discharge_to_load_kwh),
        ("direct", out.direct_use_to_load_kwh),
        ("charge", out.pv_to_battery_charge_kwh),
        ("pv_export", out.pv_export_kwh),
        ("savings", out.savings),
    ] {
        assert!(v.is_finite() && v >= 0.0, "{name} = {v} for {input:?}");
    }
    for (name, v) in [
        ("self share", out.self_consumption_share),
        ("autarky", out.autarky_share),
        ("battery share", out.battery_load_share),
    ] {
        assert!((0.0..=1.0).contains(&v), "{name} = {v} for {input:?}");
    }
    assert!(out.base_self_share >= h.self_share_min - common::EPS);
    assert!(out.base_self_share <= h.self_share_max + common::EPS);

    assert_relative_eq!(out.savings, out.cost_without_pv - out.cost_with_pv, epsilon = 1e-6);
    assert_relative_eq!(
        out.direct_use_to_load_kwh + out.battery_discharge_to_load_kwh,
        out.self_consumption_kwh,
        epsilon = 1e-6
    );
    assert_relative_eq!(
        out.self_consumption_kwh + out.export_kwh,
        out.pv_production_kwh.max(out.self_consumption_kwh),
        epsilon = 1e-6
    );

    if policy == Policy::Capped {
        assert!(out.self_consumption_kwh <= consumption + common::EPS);
    }
    if kwp == 0.0 {
        assert_abs_diff_eq!(out.self_consumption_share, 0.0);
        assert_abs_diff_eq!(out.pv_export_kwh, 0.0);
    }
    if consumption == 0.0 {
        assert_abs_diff_eq!(out.autarky_share, 0.0);
    }

    let dash = Dashboard::project(&out);
    for donut in [&dash.production, &dash.consumption] {
        assert!(donut.slices.iter().all(|s| s.kwh >= 0.0));
        let total: f64 = donut.fractions().iter().sum();
        assert!(total == 0.0 || (total - 1.0).abs() < 1e-9);
    }
}

#[test]
fn more_battery_never_lowers_self_consumption() {
    let h = Heuristics::default();
    let mut previous = 0.0;
    for battery in [0.0, 2.5, 5.0, 10.0, 20.0, 30.0] {
        let out = calculate(&common::input(9500.0, 8.0, battery, 0.25, 0.0), &h);
        assert!(out.self_consumption_kwh >= previous);
        previous = out.self_consumption_kwh;
    }
}
