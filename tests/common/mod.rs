//! Shared test fixtures for integration tests.

use loadshift::building::occupancy::OccupancyProfile;
use loadshift::building::simulator::LoadSimulator;
use loadshift::building::types::{SubsystemKind, SubsystemSpec};
use loadshift::forecast::{ForecastSlot, SyntheticForecast};
use loadshift::window::score::WindowScorer;

/// Default office topology: HVAC, lighting, critical and general compute,
/// and fixed building services.
pub fn office_topology() -> Vec<SubsystemSpec> {
    vec![
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
    ]
}

/// Default simulator over the office profile (seed 42).
pub fn default_simulator() -> LoadSimulator {
    LoadSimulator::new("test_office", OccupancyProfile::default(), 42)
}

/// Default scorer with the standing weights and references.
pub fn default_scorer() -> WindowScorer {
    WindowScorer::with_defaults()
}

/// A 24-slot synthetic forecast with the standing baselines (seed 42).
pub fn default_forecast() -> Vec<ForecastSlot> {
    SyntheticForecast::new(70.0, 25.0, 75.0, 0.032, 42).generate(24)
}
