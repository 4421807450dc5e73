//! Slider/number field pairs and their clamping rules.

use strum::{Display, EnumIter, IntoEnumIterator};
use tracing::debug;

use crate::estimator::EstimatorInput;

/// The five numeric inputs, each shown as a slider plus a number box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum FieldId {
    #[strum(to_string = "Annual consumption")]
    Consumption,
    #[strum(to_string = "PV power")]
    PvPower,
    #[strum(to_string = "Battery")]
    Battery,
    #[strum(to_string = "Electricity price")]
    Price,
    #[strum(to_string = "Feed-in tariff")]
    FeedIn,
}

impl FieldId {
    /// Unit shown next to the value.
    pub fn unit(self) -> &'static str {
        match self {
            Self::Consumption => "kWh/yr",
            Self::PvPower => "kWp",
            Self::Battery => "kWh",
            Self::Price | Self::FeedIn => "/kWh",
        }
    }

    /// Reads this field from an input record.
    pub fn get(self, input: &EstimatorInput) -> f64 {
        match self {
            Self::Consumption => input.annual_consumption_kwh,
            Self::PvPower => input.pv_power_kwp,
            Self::Battery => input.battery_kwh,
            Self::Price => input.electricity_price,
            Self::FeedIn => input.feed_in_tariff,
        }
    }

    /// Writes this field into an input record.
    pub fn set(self, input: &mut EstimatorInput, value: f64) {
        let slot = match self {
            Self::Consumption => &mut input.annual_consumption_kwh,
            Self::PvPower => &mut input.pv_power_kwp,
            Self::Battery => &mut input.battery_kwh,
            Self::Price => &mut input.electricity_price,
            Self::FeedIn => &mut input.feed_in_tariff,
        };
        *slot = value;
    }

    /// All fields in display order.
    pub fn all() -> impl Iterator<Item = Self> {
        Self::iter()
    }
}

/// Bounds and step increment of one slider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl FieldSpec {
    pub const fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }

    /// Default bounds for a field.
    pub fn for_field(id: FieldId) -> Self {
        match id {
            FieldId::Consumption => Self::new(500.0, 20_000.0, 100.0),
            FieldId::PvPower => Self::new(0.0, 30.0, 0.1),
            FieldId::Battery => Self::new(0.0, 30.0, 0.5),
            FieldId::Price => Self::new(0.0, 1.0, 0.01),
            FieldId::FeedIn => Self::new(0.0, 0.5, 0.001),
        }
    }

    /// Clamps to `[min, max]` without snapping.
    ///
    /// Non-finite values are treated as 0 before clamping.
    pub fn clamp(&self, value: f64) -> f64 {
        let value = if value.is_finite() { value } else { 0.0 };
        value.clamp(self.min, self.max)
    }

    /// Clamps to `[min, max]` and snaps to the nearest step counted from `min`.
    ///
    /// Non-finite values are treated as 0 before clamping.
    pub fn normalize(&self, value: f64) -> f64 {
        let clamped = self.clamp(value);
        if self.step <= 0.0 {
            return clamped;
        }
        let steps = ((clamped - self.min) / self.step).round();
        let snapped = self.min + steps * self.step;
        // A snapped value may land one step past max when max is off-grid.
        let snapped = if snapped > self.max { snapped - self.step } else { snapped };
        self.strip_noise(snapped)
    }

    /// Parses number-box text, then normalizes it.
    ///
    /// Unparseable text counts as 0.
    pub fn parse(&self, text: &str) -> f64 {
        let raw = text.trim().parse::<f64>().unwrap_or_else(|_| {
            debug!(text, "number field text is not a number, using 0");
            0.0
        });
        self.normalize(raw)
    }

    /// Steps the slider by `delta` increments, staying in bounds.
    pub fn nudge(&self, value: f64, delta: i32) -> f64 {
        self.normalize(value + f64::from(delta) * self.step)
    }

    /// Decimal places implied by the step, for display.
    pub fn decimals(&self) -> usize {
        let mut step = self.step;
        let mut places = 0;
        while places < 6 && (step - step.round()).abs() > 1e-9 {
            step *= 10.0;
            places += 1;
        }
        places
    }

    /// Formats a value with the step's precision.
    pub fn format(&self, value: f64) -> String {
        format!("{value:.*}", self.decimals())
    }

    /// Position of `value` on the slider track, in `[0, 1]`.
    pub fn position(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if span > 0.0 {
            ((value - self.min) / span).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    fn strip_noise(&self, value: f64) -> f64 {
        let scale = 10f64.powi(self.decimals() as i32);
        (value * scale).round() / scale
    }
}
