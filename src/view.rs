//! Projection of an estimate onto what the dashboard shows.
//!
//! The projection is pure: the same [`EstimatorOutput`] always yields the
//! same [`Dashboard`]. Renderers (terminal UI, text report, JSON) only read
//! from it.

use serde::Serialize;

use crate::estimator::EstimatorOutput;

/// Rounds half-way cases toward positive infinity, the way displayed KPI
/// figures are rounded.
///
/// Only exact halves round up; `value + 0.5` is never formed, so values just
/// below a half stay below it.
pub fn round_half_up(value: f64) -> i64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor as i64 + 1
    } else {
        floor as i64
    }
}

/// The five headline cost figures, rounded to whole currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Kpis {
    pub cost_without_pv: i64,
    pub savings: i64,
    pub remaining_grid_cost: i64,
    pub revenue_from_export: i64,
    pub cost_with_pv: i64,
}

/// One labelled segment of a donut.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slice {
    pub label: &'static str,
    /// Segment size in kWh, never negative.
    pub kwh: f64,
}

/// A three-segment proportion display with a percentage in its centre.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Donut {
    pub title: &'static str,
    /// Centre share as a fraction, before rounding.
    pub share: f64,
    /// Centre text, e.g. `"80%"`.
    pub center_label: String,
    pub slices: [Slice; 3],
}

impl Donut {
    fn new(title: &'static str, share: f64, slices: [(&'static str, f64); 3]) -> Self {
        Self {
            title,
            share,
            center_label: format!("{}%", round_half_up(share * 100.0)),
            slices: slices.map(|(label, kwh)| Slice {
                label,
                kwh: kwh.max(0.0),
            }),
        }
    }

    /// Sum of all segments.
    pub fn total_kwh(&self) -> f64 {
        self.slices.iter().map(|s| s.kwh).sum()
    }

    /// Fraction of the ring covered by each segment; all zero for an empty ring.
    pub fn fractions(&self) -> [f64; 3] {
        let total = self.total_kwh();
        self.slices
            .each_ref()
            .map(|s| if total > 0.0 { s.kwh / total } else { 0.0 })
    }
}

/// Yearly electricity cost with and without PV, side by side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostBars {
    pub without_pv: f64,
    pub with_pv: f64,
}

/// Everything a renderer needs to draw one state of the estimator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub kpis: Kpis,
    /// Where PV production goes; centre shows the self-consumption share.
    pub production: Donut,
    /// Where household consumption comes from; centre shows autarky.
    pub consumption: Donut,
    pub costs: CostBars,
}

impl Dashboard {
    /// Projects an estimate onto dashboard figures.
    pub fn project(m: &EstimatorOutput) -> Self {
        Self {
            kpis: Kpis {
                cost_without_pv: round_half_up(m.cost_without_pv),
                savings: round_half_up(m.savings),
                remaining_grid_cost: round_half_up(m.remaining_grid_cost),
                revenue_from_export: round_half_up(m.revenue_from_export),
                cost_with_pv: round_half_up(m.cost_with_pv),
            },
            production: Donut::new(
                "PV production",
                m.self_consumption_share,
                [
                    ("Direct use", m.pv_direct_use_kwh),
                    ("Battery charge", m.pv_to_battery_charge_kwh),
                    ("Grid export", m.pv_export_kwh),
                ],
            ),
            consumption: Donut::new(
                "Household consumption",
                m.autarky_share,
                [
                    ("Direct use", m.direct_use_to_load_kwh),
                    ("Battery discharge", m.battery_discharge_to_load_kwh),
                    ("Grid purchase", m.grid_purchase_kwh),
                ],
            ),
            costs: CostBars {
                without_pv: m.cost_without_pv,
                with_pv: m.cost_with_pv,
            },
        }
    }
}
