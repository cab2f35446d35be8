//! TOML-based scenario configuration and preset definitions.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::building::occupancy::OccupancyProfile;
use crate::building::types::{Environment, SubsystemKind, SubsystemSpec};
use crate::impact::policy::ReductionPolicy;
use crate::impact::simulator::OptimizationAction;
use crate::window::score::{ScoreReferences, ScoreWeights};

/// Top-level scenario configuration parsed from TOML.
///
/// All fields have defaults matching the baseline scenario. Load from TOML
/// with [`ScenarioConfig::from_toml_file`] or use
/// [`ScenarioConfig::baseline`] for the built-in default.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Evaluation timing, horizon, and seeding.
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Building identity and subsystem topology.
    #[serde(default)]
    pub building: BuildingConfig,
    /// Occupancy regime bounds.
    #[serde(default)]
    pub occupancy: OccupancyProfile,
    /// Outdoor conditions at the evaluation time.
    #[serde(default)]
    pub environment: Environment,
    /// Window scoring weights.
    #[serde(default)]
    pub weights: ScoreWeights,
    /// Normalization references for the scorer.
    #[serde(default)]
    pub references: ScoreReferences,
    /// Per-kind load reduction limits.
    #[serde(default)]
    pub policy: ReductionPolicy,
    /// Tariff and projection constants.
    #[serde(default)]
    pub tariff: TariffConfig,
    /// Synthetic market-forecast baselines.
    #[serde(default)]
    pub forecast: ForecastConfig,
    /// Action plan applied at the evaluation hour.
    #[serde(default)]
    pub actions: Vec<OptimizationAction>,
}

/// Evaluation timing, horizon, and seeding.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Master random seed.
    pub seed: u64,
    /// Forecast horizon length in one-hour slots (must be > 0).
    pub horizon_hours: usize,
    /// Hour of day (0–23) the building is evaluated at.
    pub evaluation_hour: u8,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            horizon_hours: 24,
            evaluation_hour: 11,
        }
    }
}

/// Building identity and subsystem topology.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildingConfig {
    pub id: String,
    pub floor_area_sqm: f64,
    pub subsystems: Vec<SubsystemSpec>,
}

impl Default for BuildingConfig {
    fn default() -> Self {
        Self {
            id: "office_tower_1".to_string(),
            floor_area_sqm: 5000.0,
            subsystems: vec![
                SubsystemSpec {
                    id: "hvac_main".to_string(),
                    kind: SubsystemKind::Hvac,
                    max_capacity_kw: 800.0,
                    efficiency_rating: 0.85,
                    controllable: true,
                },
                SubsystemSpec {
                    id: "lighting_general".to_string(),
                    kind: SubsystemKind::Lighting,
                    max_capacity_kw: 200.0,
                    efficiency_rating: 0.90,
                    controllable: true,
                },
                SubsystemSpec {
                    id: "trading_compute".to_string(),
                    kind: SubsystemKind::Compute,
                    max_capacity_kw: 600.0,
                    efficiency_rating: 0.75,
                    controllable: false,
                },
                SubsystemSpec {
                    id: "general_compute".to_string(),
                    kind: SubsystemKind::Compute,
                    max_capacity_kw: 300.0,
                    efficiency_rating: 0.80,
                    controllable: true,
                },
                SubsystemSpec {
                    id: "building_services".to_string(),
                    kind: SubsystemKind::Other,
                    max_capacity_kw: 150.0,
                    efficiency_rating: 0.70,
                    controllable: false,
                },
            ],
        }
    }
}

/// Tariff and projection constants.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TariffConfig {
    /// Retail electricity price per kWh.
    pub price_per_kwh: f64,
    /// Grid carbon intensity used for savings accounting.
    pub carbon_kg_per_kwh: f64,
    /// Building count used for the fleet projection.
    pub fleet_buildings: u32,
}

impl Default for TariffConfig {
    fn default() -> Self {
        Self {
            price_per_kwh: 0.35,
            carbon_kg_per_kwh: 0.75,
            fleet_buildings: 50_000,
        }
    }
}

/// Synthetic market-forecast baselines.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ForecastConfig {
    /// Renewable share at the midday peak (0–100).
    pub peak_renewable_pct: f64,
    /// Renewable share floor during the night (0–100).
    pub night_renewable_pct: f64,
    /// Mean wholesale price per MWh.
    pub base_price_per_mwh: f64,
    /// Mean secondary-market price per hour.
    pub base_spot_price: f64,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            peak_renewable_pct: 70.0,
            night_renewable_pct: 25.0,
            base_price_per_mwh: 75.0,
            base_spot_price: 0.032,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"simulation.horizon_hours"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {} — {}", self.field, self.message)
    }
}

/// The three demo actions from the standing office scenario.
fn office_actions() -> Vec<OptimizationAction> {
    vec![
        OptimizationAction {
            name: "optimize_hvac_schedule".to_string(),
            target: SubsystemKind::Hvac,
            expected_savings_kwh: 150.0,
            reasoning: "Pre-cool the building while solar generation is high".to_string(),
        },
        OptimizationAction {
            name: "optimize_lighting_zones".to_string(),
            target: SubsystemKind::Lighting,
            expected_savings_kwh: 80.0,
            reasoning: "Dim zones with strong natural light".to_string(),
        },
        OptimizationAction {
            name: "shift_batch_compute".to_string(),
            target: SubsystemKind::Compute,
            expected_savings_kwh: 60.0,
            reasoning: "Move non-critical processing into the next green window".to_string(),
        },
    ]
}

impl ScenarioConfig {
    /// Returns the baseline scenario: a mid-size office tower with a mixed
    /// topology and the standing action plan.
    pub fn baseline() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            building: BuildingConfig::default(),
            occupancy: OccupancyProfile::default(),
            environment: Environment::default(),
            weights: ScoreWeights::default(),
            references: ScoreReferences::default(),
            policy: ReductionPolicy::default(),
            tariff: TariffConfig::default(),
            forecast: ForecastConfig::default(),
            actions: office_actions(),
        }
    }

    /// Returns the compute-heavy preset: a data-hall topology with
    /// spot-price-tilted scoring and a compute-shifting action plan.
    pub fn compute_heavy() -> Self {
        Self {
            building: BuildingConfig {
                id: "exchange_data_hall".to_string(),
                floor_area_sqm: 2500.0,
                subsystems: vec![
                    SubsystemSpec {
                        id: "hvac_crac".to_string(),
                        kind: SubsystemKind::Hvac,
                        max_capacity_kw: 400.0,
                        efficiency_rating: 0.80,
                        controllable: true,
                    },
                    SubsystemSpec {
                        id: "lighting_hall".to_string(),
                        kind: SubsystemKind::Lighting,
                        max_capacity_kw: 60.0,
                        efficiency_rating: 0.92,
                        controllable: true,
                    },
                    SubsystemSpec {
                        id: "matching_engines".to_string(),
                        kind: SubsystemKind::Compute,
                        max_capacity_kw: 900.0,
                        efficiency_rating: 0.75,
                        controllable: false,
                    },
                    SubsystemSpec {
                        id: "batch_cluster".to_string(),
                        kind: SubsystemKind::Compute,
                        max_capacity_kw: 500.0,
                        efficiency_rating: 0.80,
                        controllable: true,
                    },
                ],
            },
            occupancy: OccupancyProfile {
                max_occupancy: 200,
                typical: 120,
                variation: 30,
                business_min: 20,
                transition_lo: 40,
                transition_hi: 100,
                after_lo: 5,
                after_hi: 30,
            },
            weights: ScoreWeights {
                renewable: 0.30,
                carbon: 0.20,
                price: 0.15,
                spot: 0.35,
            },
            actions: vec![OptimizationAction {
                name: "shift_batch_compute".to_string(),
                target: SubsystemKind::Compute,
                expected_savings_kwh: 120.0,
                reasoning: "Defer the batch cluster to the cheapest spot window".to_string(),
            }],
            ..Self::baseline()
        }
    }

    /// Returns the carbon-focus preset: baseline topology scored with
    /// renewable- and carbon-dominated weights on a hot afternoon.
    pub fn carbon_focus() -> Self {
        Self {
            weights: ScoreWeights {
                renewable: 0.40,
                carbon: 0.35,
                price: 0.15,
                spot: 0.10,
            },
            environment: Environment {
                outdoor_temp_c: 31.0,
                solar_irradiance_wm2: 850.0,
                wind_speed_kmh: 15.0,
            },
            simulation: SimulationConfig {
                evaluation_hour: 14,
                ..SimulationConfig::default()
            },
            ..Self::baseline()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["baseline", "compute_heavy", "carbon_focus"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "compute_heavy" => Ok(Self::compute_heavy()),
            "carbon_focus" => Ok(Self::carbon_focus()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "scenario".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if the configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let s = &self.simulation;
        if s.horizon_hours == 0 {
            errors.push(ConfigError {
                field: "simulation.horizon_hours".into(),
                message: "must be > 0".into(),
            });
        }
        if s.evaluation_hour > 23 {
            errors.push(ConfigError {
                field: "simulation.evaluation_hour".into(),
                message: format!("must be 0-23, got {}", s.evaluation_hour),
            });
        }

        let b = &self.building;
        if b.floor_area_sqm <= 0.0 {
            errors.push(ConfigError {
                field: "building.floor_area_sqm".into(),
                message: "must be > 0".into(),
            });
        }
        for (i, sub) in b.subsystems.iter().enumerate() {
            if sub.max_capacity_kw <= 0.0 {
                errors.push(ConfigError {
                    field: format!("building.subsystems[{i}].max_capacity_kw"),
                    message: "must be > 0".into(),
                });
            }
            if sub.efficiency_rating <= 0.0 || sub.efficiency_rating > 1.0 {
                errors.push(ConfigError {
                    field: format!("building.subsystems[{i}].efficiency_rating"),
                    message: "must be in (0.0, 1.0]".into(),
                });
            }
        }

        let o = &self.occupancy;
        if o.max_occupancy == 0 {
            errors.push(ConfigError {
                field: "occupancy.max_occupancy".into(),
                message: "must be > 0".into(),
            });
        }
        if o.typical > o.max_occupancy {
            errors.push(ConfigError {
                field: "occupancy.typical".into(),
                message: "must be <= occupancy.max_occupancy".into(),
            });
        }
        if o.transition_lo > o.transition_hi {
            errors.push(ConfigError {
                field: "occupancy.transition_lo".into(),
                message: "must be <= occupancy.transition_hi".into(),
            });
        }
        if o.after_lo > o.after_hi {
            errors.push(ConfigError {
                field: "occupancy.after_lo".into(),
                message: "must be <= occupancy.after_hi".into(),
            });
        }

        if let Err(e) = self.weights.validate() {
            errors.push(ConfigError {
                field: "weights".into(),
                message: e.to_string(),
            });
        }
        if let Err(e) = self.references.validate() {
            errors.push(ConfigError {
                field: "references".into(),
                message: e.to_string(),
            });
        }

        let kinds = [
            ("policy.hvac", self.policy.hvac),
            ("policy.lighting", self.policy.lighting),
            ("policy.compute", self.policy.compute),
            ("policy.other", self.policy.other),
        ];
        for (field, reduction) in kinds {
            if reduction.cap_pct < 0.0 {
                errors.push(ConfigError {
                    field: format!("{field}.cap_pct"),
                    message: "must be >= 0".into(),
                });
            }
            if !(0.0..=1.0).contains(&reduction.fraction) {
                errors.push(ConfigError {
                    field: format!("{field}.fraction"),
                    message: "must be in [0.0, 1.0]".into(),
                });
            }
        }

        let t = &self.tariff;
        if t.price_per_kwh < 0.0 {
            errors.push(ConfigError {
                field: "tariff.price_per_kwh".into(),
                message: "must be >= 0".into(),
            });
        }
        if t.carbon_kg_per_kwh < 0.0 {
            errors.push(ConfigError {
                field: "tariff.carbon_kg_per_kwh".into(),
                message: "must be >= 0".into(),
            });
        }

        let f = &self.forecast;
        if !(0.0..=100.0).contains(&f.peak_renewable_pct) {
            errors.push(ConfigError {
                field: "forecast.peak_renewable_pct".into(),
                message: "must be in [0, 100]".into(),
            });
        }
        if !(0.0..=100.0).contains(&f.night_renewable_pct) {
            errors.push(ConfigError {
                field: "forecast.night_renewable_pct".into(),
                message: "must be in [0, 100]".into(),
            });
        }
        if f.base_price_per_mwh < 0.0 {
            errors.push(ConfigError {
                field: "forecast.base_price_per_mwh".into(),
                message: "must be >= 0".into(),
            });
        }
        if f.base_spot_price < 0.0 {
            errors.push(ConfigError {
                field: "forecast.base_spot_price".into(),
                message: "must be >= 0".into(),
            });
        }

        for (i, action) in self.actions.iter().enumerate() {
            if action.expected_savings_kwh < 0.0 {
                errors.push(ConfigError {
                    field: format!("actions[{i}].expected_savings_kwh"),
                    message: "must be >= 0".into(),
                });
            }
        }

        errors
    }
}
