//! Building state assembly from topology, occupancy, and environment.

use crate::building::compute::{CriticalComputeLoad, GeneralComputeLoad};
use crate::building::hvac::HvacLoad;
use crate::building::lighting::LightingLoad;
use crate::building::occupancy::{OccupancyModel, OccupancyProfile};
use crate::building::other::OtherLoad;
use crate::building::types::{
    BuildingState, Environment, LoadContext, LoadModel, Subsystem, SubsystemKind, SubsystemSpec,
};

/// Seed offset for the critical-compute RNG so its draws stay uncorrelated
/// with the occupancy stream.
const COMPUTE_SEED_OFFSET: u64 = 11;

/// Simulates per-subsystem load and aggregate consumption for a building.
///
/// Owns the stochastic parts (occupancy draw, critical-compute draw); the
/// per-kind load formulas are deterministic. Topology is borrowed per call
/// and never retained, so independent simulators can evaluate the same
/// topology concurrently.
#[derive(Debug, Clone)]
pub struct LoadSimulator {
    building_id: String,
    occupancy: OccupancyModel,
    hvac: HvacLoad,
    lighting: LightingLoad,
    critical_compute: CriticalComputeLoad,
    general_compute: GeneralComputeLoad,
    other: OtherLoad,
}

impl LoadSimulator {
    /// Creates a simulator for one building.
    pub fn new(building_id: impl Into<String>, profile: OccupancyProfile, seed: u64) -> Self {
        Self {
            building_id: building_id.into(),
            occupancy: OccupancyModel::new(profile, seed),
            hvac: HvacLoad,
            lighting: LightingLoad,
            critical_compute: CriticalComputeLoad::new(seed.wrapping_add(COMPUTE_SEED_OFFSET)),
            general_compute: GeneralComputeLoad,
            other: OtherLoad,
        }
    }

    /// Draws an occupancy for `hour` and simulates the building state.
    pub fn simulate(
        &mut self,
        topology: &[SubsystemSpec],
        hour: u8,
        environment: Environment,
    ) -> BuildingState {
        let occupancy = self.occupancy.sample(hour);
        self.simulate_with_occupancy(topology, occupancy, hour, environment)
    }

    /// Simulates the building state for a fixed occupancy count.
    ///
    /// Occupancy is clamped to the profile's capacity. An empty topology
    /// yields a valid state with zero consumption.
    pub fn simulate_with_occupancy(
        &mut self,
        topology: &[SubsystemSpec],
        occupancy: u32,
        hour: u8,
        environment: Environment,
    ) -> BuildingState {
        let max = self.occupancy.max_occupancy();
        let occupancy = occupancy.min(max);
        let occupancy_ratio = if max > 0 {
            f64::from(occupancy) / f64::from(max)
        } else {
            0.0
        };
        let context = LoadContext {
            hour,
            occupancy_ratio,
            environment,
        };

        let subsystems = topology
            .iter()
            .map(|spec| {
                let pct = match spec.kind {
                    SubsystemKind::Hvac => self.hvac.load_pct(&context),
                    SubsystemKind::Lighting => self.lighting.load_pct(&context),
                    SubsystemKind::Compute if spec.controllable => {
                        self.general_compute.load_pct(&context)
                    }
                    SubsystemKind::Compute => self.critical_compute.load_pct(&context),
                    SubsystemKind::Other => self.other.load_pct(&context),
                };
                Subsystem::from_spec(spec, pct)
            })
            .collect();

        BuildingState {
            building_id: self.building_id.clone(),
            hour,
            occupancy_count: occupancy,
            subsystems,
            environment,
        }
    }
}
