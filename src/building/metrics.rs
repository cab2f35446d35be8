//! Building-level efficiency metrics.

use std::fmt;

use serde::Serialize;

use crate::building::types::{BuildingState, SubsystemKind};

/// Benchmark draw for an efficient office, in kWh per m² per hour.
const BENCHMARK_KWH_PER_SQM: f64 = 0.48;

/// Point-in-time efficiency metrics derived from a building state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnergyMetrics {
    pub kwh_per_person: f64,
    pub kwh_per_sqm: f64,
    pub hvac_share_pct: f64,
    pub lighting_share_pct: f64,
    pub compute_share_pct: f64,
    /// 0–100 score against the benchmark; 100 at or below benchmark draw.
    pub efficiency_score: f64,
}

impl EnergyMetrics {
    /// Computes metrics for `state` in a building of `floor_area_sqm`.
    ///
    /// An unoccupied building is treated as having one occupant for the
    /// per-person figure; a zero floor area yields zero intensity and a
    /// full efficiency score only when nothing is drawing.
    pub fn from_state(state: &BuildingState, floor_area_sqm: f64) -> Self {
        let total_kw = state.total_consumption_kw();
        let occupants = f64::from(state.occupancy_count.max(1));

        let kind_share = |kind: SubsystemKind| {
            if total_kw > 0.0 {
                let kind_kw: f64 = state
                    .subsystems
                    .iter()
                    .filter(|s| s.kind == kind)
                    .map(|s| s.consumption_kw())
                    .sum();
                kind_kw / total_kw * 100.0
            } else {
                0.0
            }
        };

        let kwh_per_sqm = if floor_area_sqm > 0.0 {
            total_kw / floor_area_sqm
        } else {
            0.0
        };

        let benchmark_kw = floor_area_sqm * BENCHMARK_KWH_PER_SQM;
        let efficiency_score = if total_kw <= benchmark_kw {
            100.0
        } else {
            (benchmark_kw / total_kw * 100.0).clamp(0.0, 100.0)
        };

        Self {
            kwh_per_person: total_kw / occupants,
            kwh_per_sqm,
            hvac_share_pct: kind_share(SubsystemKind::Hvac),
            lighting_share_pct: kind_share(SubsystemKind::Lighting),
            compute_share_pct: kind_share(SubsystemKind::Compute),
            efficiency_score,
        }
    }
}

impl fmt::Display for EnergyMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Building Metrics ---")?;
        writeln!(f, "Consumption per person: {:.2} kWh", self.kwh_per_person)?;
        writeln!(f, "Consumption per m2:     {:.3} kWh", self.kwh_per_sqm)?;
        writeln!(f, "HVAC share:             {:.1}%", self.hvac_share_pct)?;
        writeln!(f, "Lighting share:         {:.1}%", self.lighting_share_pct)?;
        writeln!(f, "Compute share:          {:.1}%", self.compute_share_pct)?;
        write!(f, "Efficiency score:       {:.1}/100", self.efficiency_score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::building::types::{Environment, Subsystem, SubsystemSpec};

    fn state_with(loads: &[(SubsystemKind, f64, f64)], occupancy: u32) -> BuildingState {
        let subsystems = loads
            .iter()
            .enumerate()
            .map(|(i, &(kind, capacity, load))| {
                Subsystem::from_spec(
                    &SubsystemSpec {
                        id: format!("s{i}"),
                        kind,
                        max_capacity_kw: capacity,
                        efficiency_rating: 0.85,
                        controllable: true,
                    },
                    load,
                )
            })
            .collect();
        BuildingState {
            building_id: "test".to_string(),
            hour: 12,
            occupancy_count: occupancy,
            subsystems,
            environment: Environment::default(),
        }
    }

    #[test]
    fn shares_partition_the_total() {
        let state = state_with(
            &[
                (SubsystemKind::Hvac, 800.0, 65.0),
                (SubsystemKind::Lighting, 200.0, 45.0),
                (SubsystemKind::Compute, 600.0, 80.0),
            ],
            450,
        );
        let metrics = EnergyMetrics::from_state(&state, 5000.0);
        let sum =
            metrics.hvac_share_pct + metrics.lighting_share_pct + metrics.compute_share_pct;
        assert!((sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn per_person_guards_an_empty_building() {
        let state = state_with(&[(SubsystemKind::Hvac, 800.0, 65.0)], 0);
        let metrics = EnergyMetrics::from_state(&state, 5000.0);
        assert!((metrics.kwh_per_person - 520.0).abs() < 1e-9);
    }

    #[test]
    fn efficient_building_scores_full_marks() {
        // 520 kW over 5000 m2 is well under the 0.48 kWh/m2 benchmark (2400 kW).
        let state = state_with(&[(SubsystemKind::Hvac, 800.0, 65.0)], 450);
        let metrics = EnergyMetrics::from_state(&state, 5000.0);
        assert_eq!(metrics.efficiency_score, 100.0);
    }

    #[test]
    fn score_decays_above_the_benchmark() {
        // 3600 kW over 5000 m2 exceeds the 2400 kW benchmark: 2400/3600.
        let state = state_with(&[(SubsystemKind::Compute, 4000.0, 90.0)], 450);
        let metrics = EnergyMetrics::from_state(&state, 5000.0);
        assert!((metrics.efficiency_score - 2400.0 / 3600.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn display_renders_every_line() {
        let state = state_with(&[(SubsystemKind::Hvac, 800.0, 65.0)], 450);
        let rendered = EnergyMetrics::from_state(&state, 5000.0).to_string();
        assert!(rendered.contains("Efficiency score"));
        assert!(rendered.contains("HVAC share"));
    }
}
