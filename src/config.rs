//! TOML-based scenario configuration and preset definitions.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::estimator::{EstimatorInput, Heuristics, Orientation, Policy};

/// Top-level scenario configuration parsed from TOML.
///
/// All sections have defaults matching the reference household. Load from
/// TOML with [`ScenarioConfig::from_toml_file`] or pick a named preset with
/// [`ScenarioConfig::from_preset`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Household consumption.
    #[serde(default)]
    pub household: HouseholdConfig,
    /// PV array size and orientation.
    #[serde(default)]
    pub pv: PvConfig,
    /// Battery storage.
    #[serde(default)]
    pub battery: BatteryConfig,
    /// Grid purchase price and feed-in tariff.
    #[serde(default)]
    pub tariff: TariffConfig,
    /// Heuristic policy and coefficient overrides.
    #[serde(default)]
    pub heuristics: HeuristicsConfig,
}

/// Household consumption.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HouseholdConfig {
    /// Yearly electricity use (kWh).
    pub annual_consumption_kwh: f64,
}

impl Default for HouseholdConfig {
    fn default() -> Self {
        Self {
            annual_consumption_kwh: 9500.0,
        }
    }
}

/// PV array parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PvConfig {
    /// Installed peak power (kWp).
    pub power_kwp: f64,
    /// Orientation name; unknown names fall back to `"south"`.
    pub orientation: String,
}

impl Default for PvConfig {
    fn default() -> Self {
        Self {
            power_kwp: 8.0,
            orientation: Orientation::South.to_string(),
        }
    }
}

/// Battery storage parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BatteryConfig {
    /// Usable capacity (kWh); 0 for no battery.
    pub capacity_kwh: f64,
}

impl Default for BatteryConfig {
    fn default() -> Self {
        Self { capacity_kwh: 20.0 }
    }
}

/// Grid prices.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TariffConfig {
    /// Price per kWh bought from the grid.
    pub electricity_price: f64,
    /// Price per kWh fed into the grid.
    pub feed_in_tariff: f64,
}

impl Default for TariffConfig {
    fn default() -> Self {
        Self {
            electricity_price: 0.25,
            feed_in_tariff: 0.0,
        }
    }
}

/// Heuristic policy with optional per-coefficient overrides.
///
/// Unset overrides keep the policy's value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeuristicsConfig {
    /// `"uncapped"` or `"capped"`.
    pub policy: Policy,
    pub specific_yield_kwh_per_kwp: Option<f64>,
    pub self_share_base: Option<f64>,
    pub self_share_per_battery_kwh: Option<f64>,
    pub self_share_consumption_weight: Option<f64>,
    pub self_share_min: Option<f64>,
    pub self_share_max: Option<f64>,
    pub battery_load_share_base: Option<f64>,
    pub battery_load_share_per_kwh: Option<f64>,
    pub battery_load_share_min: Option<f64>,
    pub battery_load_share_max: Option<f64>,
    pub round_trip_efficiency: Option<f64>,
}

impl HeuristicsConfig {
    /// Resolves the policy and applies overrides.
    pub fn build(&self) -> Heuristics {
        let mut h = Heuristics::for_policy(self.policy);
        let overrides = [
            (self.specific_yield_kwh_per_kwp, &mut h.specific_yield_kwh_per_kwp),
            (self.self_share_base, &mut h.self_share_base),
            (self.self_share_per_battery_kwh, &mut h.self_share_per_battery_kwh),
            (self.self_share_consumption_weight, &mut h.self_share_consumption_weight),
            (self.self_share_min, &mut h.self_share_min),
            (self.self_share_max, &mut h.self_share_max),
            (self.battery_load_share_base, &mut h.battery_load_share_base),
            (self.battery_load_share_per_kwh, &mut h.battery_load_share_per_kwh),
            (self.battery_load_share_min, &mut h.battery_load_share_min),
            (self.battery_load_share_max, &mut h.battery_load_share_max),
            (self.round_trip_efficiency, &mut h.round_trip_efficiency),
        ];
        for (value, slot) in overrides {
            if let Some(v) = value {
                *slot = v;
            }
        }
        h
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"battery.capacity_kwh"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl ScenarioConfig {
    /// The reference household: 9500 kWh, 8 kWp south, 20 kWh battery.
    pub fn reference() -> Self {
        Self::default()
    }

    /// Same household and array without a battery.
    pub fn no_battery() -> Self {
        Self {
            battery: BatteryConfig { capacity_kwh: 0.0 },
            ..Self::default()
        }
    }

    /// Small flat with a balcony-sized array, paid feed-in, capped policy.
    pub fn small_home() -> Self {
        Self {
            household: HouseholdConfig {
                annual_consumption_kwh: 2500.0,
            },
            pv: PvConfig {
                power_kwp: 4.0,
                ..PvConfig::default()
            },
            battery: BatteryConfig { capacity_kwh: 5.0 },
            tariff: TariffConfig {
                electricity_price: 0.32,
                feed_in_tariff: 0.08,
            },
            heuristics: HeuristicsConfig {
                policy: Policy::Capped,
                ..HeuristicsConfig::default()
            },
        }
    }

    /// Larger array split east/west, modelled as east-facing.
    pub fn east_west() -> Self {
        Self {
            pv: PvConfig {
                power_kwp: 12.0,
                orientation: Orientation::East.to_string(),
            },
            battery: BatteryConfig { capacity_kwh: 10.0 },
            tariff: TariffConfig {
                electricity_price: 0.30,
                feed_in_tariff: 0.08,
            },
            ..Self::default()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["default", "no_battery", "small_home", "east_west"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "default" => Ok(Self::reference()),
            "no_battery" => Ok(Self::no_battery()),
            "small_home" => Ok(Self::small_home()),
            "east_west" => Ok(Self::east_west()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("scenario", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        let cfg = Self::from_toml_str(&content)?;
        info!(path = %path.display(), "scenario loaded");
        Ok(cfg)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// The estimator input described by this scenario.
    pub fn input(&self) -> EstimatorInput {
        EstimatorInput {
            annual_consumption_kwh: self.household.annual_consumption_kwh,
            pv_power_kwp: self.pv.power_kwp,
            orientation: Orientation::lookup(&self.pv.orientation),
            battery_kwh: self.battery.capacity_kwh,
            electricity_price: self.tariff.electricity_price,
            feed_in_tariff: self.tariff.feed_in_tariff,
        }
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let amounts = [
            ("household.annual_consumption_kwh", self.household.annual_consumption_kwh),
            ("pv.power_kwp", self.pv.power_kwp),
            ("battery.capacity_kwh", self.battery.capacity_kwh),
            ("tariff.electricity_price", self.tariff.electricity_price),
            ("tariff.feed_in_tariff", self.tariff.feed_in_tariff),
        ];
        for (field, value) in amounts {
            if !value.is_finite() || value < 0.0 {
                errors.push(ConfigError::new(field, "must be a finite number >= 0"));
            }
        }

        let h = self.heuristics.build();
        if !(h.specific_yield_kwh_per_kwp.is_finite() && h.specific_yield_kwh_per_kwp >= 0.0) {
            errors.push(ConfigError::new(
                "heuristics.specific_yield_kwh_per_kwp",
                "must be a finite number >= 0",
            ));
        }
        let bounds = [
            ("heuristics.self_share_min", h.self_share_min),
            ("heuristics.self_share_max", h.self_share_max),
            ("heuristics.battery_load_share_min", h.battery_load_share_min),
            ("heuristics.battery_load_share_max", h.battery_load_share_max),
        ];
        for (field, value) in bounds {
            if !(0.0..=1.0).contains(&value) {
                errors.push(ConfigError::new(field, "must be in [0.0, 1.0]"));
            }
        }
        if h.self_share_min > h.self_share_max {
            errors.push(ConfigError::new(
                "heuristics.self_share_min",
                "must be <= heuristics.self_share_max",
            ));
        }
        if h.battery_load_share_min > h.battery_load_share_max {
            errors.push(ConfigError::new(
                "heuristics.battery_load_share_min",
                "must be <= heuristics.battery_load_share_max",
            ));
        }
        if !(h.round_trip_efficiency > 0.0 && h.round_trip_efficiency <= 1.0) {
            errors.push(ConfigError::new(
                "heuristics.round_trip_efficiency",
                "must be in (0.0, 1.0]",
            ));
        }

        errors
    }
}
