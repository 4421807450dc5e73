//! Explicit estimator state and the update-then-render cycle.
//!
//! A [`Controller`] owns the current input record, the heuristic
//! coefficients and the field bounds. Every change goes through
//! [`Controller::apply`], which normalizes the value, recomputes the
//! estimate and re-projects the [`Dashboard`]. Slider and number box of a
//! field share one value, so there is nothing to keep in sync.

pub mod field;

use tracing::{debug, warn};

use crate::estimator::{EstimatorInput, EstimatorOutput, Heuristics, Orientation, Policy, calculate};
use crate::view::Dashboard;

pub use field::{FieldId, FieldSpec};

/// One user edit.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldUpdate {
    /// Slider moved; the value is clamped to the field's bounds but not snapped.
    Slider(FieldId, f64),
    /// Number box edited; the text is parsed, clamped and snapped.
    Number(FieldId, String),
    /// Orientation picked from the selector.
    Orientation(Orientation),
    /// Orientation slider moved to a position.
    OrientationSlider(usize),
    /// Heuristic variant switched.
    Policy(Policy),
}

/// Holds estimator state; rendering is a projection of it.
#[derive(Debug, Clone)]
pub struct Controller {
    input: EstimatorInput,
    heuristics: Heuristics,
    specs: [FieldSpec; 5],
    output: EstimatorOutput,
    dashboard: Dashboard,
}

impl Controller {
    /// Builds a controller, normalizing every field of `input` to its slider.
    pub fn new(input: EstimatorInput, heuristics: Heuristics) -> Self {
        let specs = [
            FieldSpec::for_field(FieldId::Consumption),
            FieldSpec::for_field(FieldId::PvPower),
            FieldSpec::for_field(FieldId::Battery),
            FieldSpec::for_field(FieldId::Price),
            FieldSpec::for_field(FieldId::FeedIn),
        ];
        let mut input = input;
        for (id, spec) in FieldId::all().zip(specs.iter()) {
            let raw = id.get(&input);
            let value = spec.normalize(raw);
            if value != raw {
                warn!(field = %id, raw, value, "scenario value moved onto slider range");
            }
            id.set(&mut input, value);
        }
        let output = calculate(&input, &heuristics);
        let dashboard = Dashboard::project(&output);
        Self {
            input,
            heuristics,
            specs,
            output,
            dashboard,
        }
    }

    /// Runs one update-then-render cycle and returns the new dashboard.
    pub fn apply(&mut self, update: FieldUpdate) -> &Dashboard {
        match update {
            FieldUpdate::Slider(id, value) => {
                let value = self.spec(id).clamp(value);
                id.set(&mut self.input, value);
            }
            FieldUpdate::Number(id, text) => {
                let value = self.spec(id).parse(&text);
                id.set(&mut self.input, value);
            }
            FieldUpdate::Orientation(o) => self.input.orientation = o,
            FieldUpdate::OrientationSlider(index) => {
                self.input.orientation = Orientation::from_slider_index(index);
            }
            FieldUpdate::Policy(policy) => self.heuristics = Heuristics::for_policy(policy),
        }
        self.refresh();
        &self.dashboard
    }

    /// Moves a field's slider by `delta` steps.
    pub fn nudge(&mut self, id: FieldId, delta: i32) -> &Dashboard {
        let value = self.spec(id).nudge(id.get(&self.input), delta);
        self.apply(FieldUpdate::Slider(id, value))
    }

    /// Replaces the heuristic coefficients, e.g. with tuned overrides.
    pub fn set_heuristics(&mut self, heuristics: Heuristics) -> &Dashboard {
        self.heuristics = heuristics;
        self.refresh();
        &self.dashboard
    }

    fn refresh(&mut self) {
        self.output = calculate(&self.input, &self.heuristics);
        self.dashboard = Dashboard::project(&self.output);
        debug!(
            savings = self.dashboard.kpis.savings,
            autarky = %self.dashboard.consumption.center_label,
            "dashboard refreshed"
        );
    }

    pub fn input(&self) -> &EstimatorInput {
        &self.input
    }

    pub fn heuristics(&self) -> &Heuristics {
        &self.heuristics
    }

    pub fn output(&self) -> &EstimatorOutput {
        &self.output
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    /// Bounds of a field's slider.
    pub fn spec(&self, id: FieldId) -> &FieldSpec {
        let idx = FieldId::all().position(|f| f == id).unwrap_or_default();
        &self.specs[idx]
    }

    /// Current value of a field (what both slider and number box show).
    pub fn value(&self, id: FieldId) -> f64 {
        id.get(&self.input)
    }

    /// Number-box text of a field.
    pub fn display_value(&self, id: FieldId) -> String {
        self.spec(id).format(self.value(id))
    }

    /// Orientation slider position; always agrees with the selector.
    pub fn orientation_slider(&self) -> usize {
        self.input.orientation.slider_index()
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new(EstimatorInput::default(), Heuristics::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_update_clamps_and_snaps() {
        let mut c = Controller::default();
        c.apply(FieldUpdate::Number(FieldId::Battery, "42".into()));
        assert_eq!(c.value(FieldId::Battery), 30.0);

        c.apply(FieldUpdate::Number(FieldId::Battery, "7.3".into()));
        assert_eq!(c.value(FieldId::Battery), 7.5);

        c.apply(FieldUpdate::Number(FieldId::PvPower, "-3".into()));
        assert_eq!(c.value(FieldId::PvPower), 0.0);
    }

    #[test]
    fn slider_update_mirrors_exactly() {
        let mut c = Controller::default();
        c.apply(FieldUpdate::Slider(FieldId::PvPower, 9.7));
        assert_eq!(c.value(FieldId::PvPower), 9.7);
        assert_eq!(c.display_value(FieldId::PvPower), "9.7");
    }

    #[test]
    fn slider_update_clamps_out_of_range_values() {
        let mut c = Controller::default();
        c.apply(FieldUpdate::Slider(FieldId::Battery, -50.0));
        assert_eq!(c.value(FieldId::Battery), 0.0);
        c.apply(FieldUpdate::Slider(FieldId::PvPower, f64::NAN));
        assert_eq!(c.value(FieldId::PvPower), 0.0);
        assert_eq!(c.output().pv_production_kwh, 0.0);
        assert_eq!(c.dashboard().kpis.savings, 0);
    }

    #[test]
    fn moved_scenario_values_are_logged_as_warnings() {
        use std::io::{self, Write};
        use std::sync::{Arc, Mutex};

        #[derive(Clone, Default)]
        struct Captured(Arc<Mutex<Vec<u8>>>);

        impl Write for Captured {
            fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
                if let Ok(mut v) = self.0.lock() {
                    v.extend_from_slice(buf);
                }
                Ok(buf.len())
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let input = EstimatorInput {
            annual_consumption_kwh: 0.0,
            ..EstimatorInput::default()
        };
        let c = tracing::subscriber::with_default(subscriber, || {
            Controller::new(input, Heuristics::default())
        });

        assert_eq!(c.value(FieldId::Consumption), 500.0);
        let logged = captured
            .0
            .lock()
            .map(|v| String::from_utf8_lossy(&v).into_owned())
            .unwrap_or_default();
        assert!(logged.contains("WARN"), "no warning in: {logged}");
        assert!(logged.contains("scenario value moved onto slider range"));
    }

    #[test]
    fn unparseable_number_counts_as_zero() {
        let mut c = Controller::default();
        c.apply(FieldUpdate::Number(FieldId::FeedIn, "eight cents".into()));
        assert_eq!(c.value(FieldId::FeedIn), 0.0);
        c.apply(FieldUpdate::Number(FieldId::Consumption, "".into()));
        assert_eq!(c.value(FieldId::Consumption), 500.0);
    }

    #[test]
    fn orientation_selector_and_slider_agree() {
        let mut c = Controller::default();
        c.apply(FieldUpdate::Orientation(Orientation::West));
        assert_eq!(c.orientation_slider(), 4);

        c.apply(FieldUpdate::OrientationSlider(0));
        assert_eq!(c.input().orientation, Orientation::East);
        assert_eq!(c.output().orientation_factor, 0.85);
    }

    #[test]
    fn every_update_refreshes_dashboard() {
        let mut c = Controller::default();
        let before = c.dashboard().kpis.cost_without_pv;
        let after = c
            .apply(FieldUpdate::Number(FieldId::Price, "0.50".into()))
            .kpis
            .cost_without_pv;
        assert_eq!(before, 2375);
        assert_eq!(after, 4750);
    }

    #[test]
    fn nudge_moves_one_step() {
        let mut c = Controller::default();
        c.nudge(FieldId::Consumption, 1);
        assert_eq!(c.value(FieldId::Consumption), 9600.0);
        c.nudge(FieldId::Battery, -2);
        assert_eq!(c.value(FieldId::Battery), 19.0);
    }

    #[test]
    fn new_normalizes_out_of_range_input() {
        let input = EstimatorInput {
            pv_power_kwp: 80.0,
            battery_kwh: 3.2,
            ..EstimatorInput::default()
        };
        let c = Controller::new(input, Heuristics::default());
        assert_eq!(c.value(FieldId::PvPower), 30.0);
        assert_eq!(c.value(FieldId::Battery), 3.0);
    }

    #[test]
    fn policy_switch_recomputes() {
        let input = EstimatorInput {
            annual_consumption_kwh: 3000.0,
            pv_power_kwp: 10.0,
            battery_kwh: 0.0,
            ..EstimatorInput::default()
        };
        let mut c = Controller::new(input, Heuristics::uncapped());
        assert!(c.output().self_consumption_kwh > 3000.0);
        c.apply(FieldUpdate::Policy(Policy::Capped));
        assert_eq!(c.output().self_consumption_kwh, 3000.0);
        assert_eq!(c.heuristics().policy(), Some(Policy::Capped));
    }
}
