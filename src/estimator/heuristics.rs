use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Which of the two heuristic variants drives the estimate.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Policy {
    /// Self-consumption is `production * share`, even when that exceeds the
    /// household's consumption. The battery load share never drops below
    /// its floor, with or without a battery.
    #[default]
    Uncapped,
    /// Self-consumption is capped at the annual consumption, and the battery
    /// load share is zero when no battery is installed.
    Capped,
}

/// Named coefficients of the estimate.
///
/// None of these come from a physical model; they are tuned constants and
/// are kept together so either policy can be selected and tested on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heuristics {
    /// Yearly yield per installed kWp (kWh/kWp).
    pub specific_yield_kwh_per_kwp: f64,
    /// Self-consumption share before battery and load-ratio bonuses.
    pub self_share_base: f64,
    /// Self-consumption share added per kWh of battery capacity.
    pub self_share_per_battery_kwh: f64,
    /// Weight of `min(1, consumption / production)` in the share.
    pub self_share_consumption_weight: f64,
    /// Lower clamp of the self-consumption share.
    pub self_share_min: f64,
    /// Upper clamp of the self-consumption share.
    pub self_share_max: f64,
    /// Cap self-consumption at the annual consumption.
    pub cap_self_consumption: bool,
    /// Share of self-consumed energy routed through the battery, before slope.
    pub battery_load_share_base: f64,
    /// Battery load share added per kWh of battery capacity.
    pub battery_load_share_per_kwh: f64,
    pub battery_load_share_min: f64,
    pub battery_load_share_max: f64,
    /// Force the battery load share to zero when `battery_kwh <= 0`.
    pub zero_load_share_without_battery: bool,
    /// Fraction of stored energy recovered on discharge.
    pub round_trip_efficiency: f64,
}

impl Heuristics {
    /// Coefficients of the given policy.
    pub fn for_policy(policy: Policy) -> Self {
        match policy {
            Policy::Uncapped => Self::uncapped(),
            Policy::Capped => Self::capped(),
        }
    }

    /// Coefficients of [`Policy::Uncapped`].
    pub fn uncapped() -> Self {
        Self {
            specific_yield_kwh_per_kwp: 1000.0,
            self_share_base: 0.32,
            self_share_per_battery_kwh: 0.018,
            self_share_consumption_weight: 0.12,
            self_share_min: 0.15,
            self_share_max: 0.95,
            cap_self_consumption: false,
            battery_load_share_base: 0.15,
            battery_load_share_per_kwh: 0.012,
            battery_load_share_min: 0.15,
            battery_load_share_max: 0.55,
            zero_load_share_without_battery: false,
            round_trip_efficiency: 0.9,
        }
    }

    /// Same coefficients with both [`Policy::Capped`] rules switched on.
    pub fn capped() -> Self {
        Self {
            cap_self_consumption: true,
            zero_load_share_without_battery: true,
            ..Self::uncapped()
        }
    }

    /// The policy these coefficients correspond to, if they are unmodified.
    pub fn policy(&self) -> Option<Policy> {
        [Policy::Uncapped, Policy::Capped]
            .into_iter()
            .find(|&p| Self::for_policy(p) == *self)
    }
}

impl Default for Heuristics {
    fn default() -> Self {
        Self::for_policy(Policy::default())
    }
}
