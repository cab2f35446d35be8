//! Core building types: subsystem kinds, topology specs, state, and the
//! shared consumption formula.

use serde::{Deserialize, Serialize};

/// Category of building or compute load a subsystem belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubsystemKind {
    Hvac,
    Lighting,
    Compute,
    Other,
}

impl SubsystemKind {
    /// Lowest load percentage a subsystem of this kind can be driven to.
    pub fn min_floor_pct(self) -> f64 {
        match self {
            SubsystemKind::Hvac => 20.0,
            SubsystemKind::Lighting => 10.0,
            SubsystemKind::Compute => 30.0,
            SubsystemKind::Other => 15.0,
        }
    }

    /// Highest load percentage a subsystem of this kind can reach.
    pub fn max_ceiling_pct(self) -> f64 {
        match self {
            SubsystemKind::Hvac | SubsystemKind::Lighting => 100.0,
            SubsystemKind::Compute => 95.0,
            SubsystemKind::Other => 60.0,
        }
    }

    /// Clamps a raw load percentage into this kind's operating band.
    pub fn clamp_load_pct(self, pct: f64) -> f64 {
        pct.clamp(self.min_floor_pct(), self.max_ceiling_pct())
    }

    /// Lowercase name, matching the scenario-file spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            SubsystemKind::Hvac => "hvac",
            SubsystemKind::Lighting => "lighting",
            SubsystemKind::Compute => "compute",
            SubsystemKind::Other => "other",
        }
    }
}

/// Static description of one controllable or fixed load in the topology.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubsystemSpec {
    pub id: String,
    pub kind: SubsystemKind,
    /// Rated capacity in kW; draw at 100 % load.
    pub max_capacity_kw: f64,
    /// Relative efficiency in (0, 1].
    pub efficiency_rating: f64,
    /// Whether the impact simulator may shed load here.
    pub controllable: bool,
}

/// One subsystem's operating point within a [`BuildingState`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Subsystem {
    pub id: String,
    pub kind: SubsystemKind,
    /// Always within the kind's `[min_floor_pct, max_ceiling_pct]` band.
    pub current_load_pct: f64,
    pub max_capacity_kw: f64,
    pub efficiency_rating: f64,
    pub controllable: bool,
    pub status: String,
}

impl Subsystem {
    /// Instantiates a live subsystem from its topology spec at a given load.
    ///
    /// The load is clamped into the kind's operating band.
    pub fn from_spec(spec: &SubsystemSpec, load_pct: f64) -> Self {
        Self {
            id: spec.id.clone(),
            kind: spec.kind,
            current_load_pct: spec.kind.clamp_load_pct(load_pct),
            max_capacity_kw: spec.max_capacity_kw,
            efficiency_rating: spec.efficiency_rating,
            controllable: spec.controllable,
            status: "active".to_string(),
        }
    }

    /// Instantaneous draw of this subsystem in kW.
    pub fn consumption_kw(&self) -> f64 {
        self.current_load_pct / 100.0 * self.max_capacity_kw
    }
}

/// Outdoor conditions at an evaluation time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Environment {
    pub outdoor_temp_c: f64,
    pub solar_irradiance_wm2: f64,
    pub wind_speed_kmh: f64,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            outdoor_temp_c: 22.0,
            solar_irradiance_wm2: 400.0,
            wind_speed_kmh: 12.0,
        }
    }
}

/// Point-in-time snapshot of a building's loads.
///
/// Constructed fresh per evaluation call and never mutated: an optimized
/// state is a new value derived from a base state plus an action set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildingState {
    pub building_id: String,
    /// Hour of day (0–23) this state was evaluated for.
    pub hour: u8,
    pub occupancy_count: u32,
    pub subsystems: Vec<Subsystem>,
    pub environment: Environment,
}

impl BuildingState {
    /// Total building draw in kW, derived on demand rather than stored.
    pub fn total_consumption_kw(&self) -> f64 {
        total_consumption_kw(&self.subsystems)
    }
}

/// Sums subsystem draws into a building total.
///
/// The single source of the consumption formula; every component that needs
/// a total goes through here.
pub fn total_consumption_kw(subsystems: &[Subsystem]) -> f64 {
    subsystems.iter().map(Subsystem::consumption_kw).sum()
}

/// Inputs shared by every subsystem load model for one evaluation.
#[derive(Debug, Clone, Copy)]
pub struct LoadContext {
    /// Hour of day, 0–23.
    pub hour: u8,
    /// Occupancy as a fraction of building capacity (0.0–1.0).
    pub occupancy_ratio: f64,
    pub environment: Environment,
}

/// A load model mapping an evaluation context to a load percentage.
///
/// Implementations return values already clamped to their operating band.
/// Models that draw from an RNG own it, seeded at construction, so repeated
/// runs with one seed reproduce exactly.
pub trait LoadModel {
    /// Load percentage for this context.
    fn load_pct(&mut self, context: &LoadContext) -> f64;

    /// Kind of subsystem this model drives.
    fn kind(&self) -> SubsystemKind;
}
