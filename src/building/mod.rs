//! Building subsystem load models and state assembly.

pub mod compute;
pub mod hvac;
pub mod lighting;
/// Building-level efficiency metrics.
pub mod metrics;
/// Stochastic occupancy model.
pub mod occupancy;
pub mod other;
pub mod simulator;
pub mod types;

// Re-export the main types for convenience
pub use occupancy::{OccupancyModel, OccupancyProfile};
pub use simulator::LoadSimulator;
pub use types::{
    BuildingState, Environment, LoadContext, LoadModel, Subsystem, SubsystemKind, SubsystemSpec,
};
