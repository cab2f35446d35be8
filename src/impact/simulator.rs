//! Bounded action application against a building state.

use serde::{Deserialize, Serialize};

use crate::building::types::{BuildingState, SubsystemKind};
use crate::error::EngineError;
use crate::impact::policy::ReductionPolicy;

/// A proposed intervention produced by a rule engine or planning agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OptimizationAction {
    pub name: String,
    /// Subsystem kind this action sheds load from.
    pub target: SubsystemKind,
    /// Caller's estimate; recorded for comparison, never trusted.
    pub expected_savings_kwh: f64,
    pub reasoning: String,
}

/// How a single action landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionStatus {
    /// At least one subsystem shed load.
    Applied,
    /// The topology has no subsystem of the targeted kind.
    NoTarget,
    /// Candidates exist but none had controllable headroom: they are
    /// non-controllable or already at their floor.
    Skipped,
}

/// Per-action application record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionOutcome {
    pub action: String,
    pub target: SubsystemKind,
    pub status: ActionStatus,
    /// Load actually shed by this action, in kWh.
    pub realized_savings_kwh: f64,
}

/// Result of applying an action set to a building state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImpactReport {
    /// Building state after all reductions; the input state is untouched.
    pub state: BuildingState,
    pub baseline_consumption_kw: f64,
    pub optimized_consumption_kw: f64,
    /// Sum of per-action realized savings.
    pub realized_savings_kwh: f64,
    pub outcomes: Vec<ActionOutcome>,
}

/// Applies `actions` to `state` under `policy` and returns the derived state
/// with its realized savings.
///
/// Pure transformation; the caller decides whether to commit the result.
/// Each reduction is bounded by the policy cap, the proportional fraction,
/// and the kind floor. Non-controllable subsystems are never touched. A
/// target kind absent from the topology is a zero-impact no-op, not an
/// error. The optimized total never exceeds the baseline total.
///
/// # Errors
///
/// Returns `EngineError::InvalidInput` if any action carries negative
/// expected savings.
pub fn apply_actions(
    state: &BuildingState,
    actions: &[OptimizationAction],
    policy: &ReductionPolicy,
) -> Result<ImpactReport, EngineError> {
    for action in actions {
        if action.expected_savings_kwh < 0.0 {
            return Err(EngineError::InvalidInput(format!(
                "action \"{}\" has negative expected savings ({} kWh)",
                action.name, action.expected_savings_kwh
            )));
        }
    }

    let baseline_consumption_kw = state.total_consumption_kw();
    let mut next = state.clone();
    let mut outcomes = Vec::with_capacity(actions.len());
    let mut realized_savings_kwh = 0.0;

    for action in actions {
        let limits = policy.for_kind(action.target);
        let mut candidates = 0usize;
        let mut savings = 0.0;

        for subsystem in next
            .subsystems
            .iter_mut()
            .filter(|s| s.kind == action.target)
        {
            candidates += 1;
            if !subsystem.controllable {
                continue;
            }

            let headroom = subsystem.current_load_pct - subsystem.kind.min_floor_pct();
            let reduction = (subsystem.current_load_pct * limits.fraction)
                .min(limits.cap_pct)
                .min(headroom)
                .max(0.0);
            if reduction <= 0.0 {
                continue;
            }

            subsystem.current_load_pct -= reduction;
            savings += reduction / 100.0 * subsystem.max_capacity_kw;
        }

        let status = if candidates == 0 {
            ActionStatus::NoTarget
        } else if savings > 0.0 {
            ActionStatus::Applied
        } else {
            ActionStatus::Skipped
        };
        realized_savings_kwh += savings;
        outcomes.push(ActionOutcome {
            action: action.name.clone(),
            target: action.target,
            status,
            realized_savings_kwh: savings,
        });
    }

    let optimized_consumption_kw = next.total_consumption_kw();
    Ok(ImpactReport {
        state: next,
        baseline_consumption_kw,
        optimized_consumption_kw,
        realized_savings_kwh,
        outcomes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::building::types::{Environment, Subsystem, SubsystemSpec};

    fn subsystem(
        id: &str,
        kind: SubsystemKind,
        capacity: f64,
        load: f64,
        controllable: bool,
    ) -> Subsystem {
        Subsystem::from_spec(
            &SubsystemSpec {
                id: id.to_string(),
                kind,
                max_capacity_kw: capacity,
                efficiency_rating: 0.85,
                controllable,
            },
            load,
        )
    }

    fn state(subsystems: Vec<Subsystem>) -> BuildingState {
        BuildingState {
            building_id: "test".to_string(),
            hour: 11,
            occupancy_count: 450,
            subsystems,
            environment: Environment::default(),
        }
    }

    fn action(name: &str, target: SubsystemKind) -> OptimizationAction {
        OptimizationAction {
            name: name.to_string(),
            target,
            expected_savings_kwh: 100.0,
            reasoning: "test".to_string(),
        }
    }

    #[test]
    fn worked_example_savings_are_exact() {
        // HVAC 800 kW at 65 % plus lighting 200 kW at 45 %: 610 kW baseline.
        let base = state(vec![
            subsystem("hvac_main", SubsystemKind::Hvac, 800.0, 65.0, true),
            subsystem("lighting_general", SubsystemKind::Lighting, 200.0, 45.0, true),
        ]);
        assert!((base.total_consumption_kw() - 610.0).abs() < 1e-9);

        let actions = vec![
            action("optimize_hvac_schedule", SubsystemKind::Hvac),
            action("optimize_lighting_zones", SubsystemKind::Lighting),
        ];
        let report = apply_actions(&base, &actions, &ReductionPolicy::default()).unwrap();

        // HVAC sheds min(20, 65*0.15) = 9.75 pts -> 78 kW; lighting sheds
        // min(30, 45*0.25) = 11.25 pts -> 22.5 kW.
        assert!((report.outcomes[0].realized_savings_kwh - 78.0).abs() < 1e-9);
        assert!((report.outcomes[1].realized_savings_kwh - 22.5).abs() < 1e-9);
        assert!((report.realized_savings_kwh - 100.5).abs() < 1e-9);
        assert!((report.optimized_consumption_kw - 509.5).abs() < 1e-9);
        assert!((report.state.subsystems[0].current_load_pct - 55.25).abs() < 1e-9);
        assert!((report.state.subsystems[1].current_load_pct - 33.75).abs() < 1e-9);
    }

    #[test]
    fn consumption_never_increases() {
        let base = state(vec![
            subsystem("hvac_main", SubsystemKind::Hvac, 800.0, 65.0, true),
            subsystem("trading", SubsystemKind::Compute, 600.0, 85.0, false),
        ]);
        let actions = vec![
            action("a", SubsystemKind::Hvac),
            action("b", SubsystemKind::Compute),
            action("c", SubsystemKind::Hvac),
        ];
        let report = apply_actions(&base, &actions, &ReductionPolicy::default()).unwrap();
        assert!(report.optimized_consumption_kw <= base.total_consumption_kw());
    }

    #[test]
    fn non_controllable_subsystems_are_untouched() {
        let base = state(vec![subsystem(
            "trading",
            SubsystemKind::Compute,
            600.0,
            85.0,
            false,
        )]);
        let report = apply_actions(
            &base,
            &[action("shift_batch", SubsystemKind::Compute)],
            &ReductionPolicy::default(),
        )
        .unwrap();
        assert_eq!(report.outcomes[0].status, ActionStatus::Skipped);
        assert_eq!(report.outcomes[0].realized_savings_kwh, 0.0);
        assert_eq!(report.state.subsystems[0].current_load_pct, 85.0);
    }

    #[test]
    fn controllable_compute_is_reduced_alongside_critical() {
        let base = state(vec![
            subsystem("trading", SubsystemKind::Compute, 600.0, 85.0, false),
            subsystem("batch", SubsystemKind::Compute, 300.0, 60.0, true),
        ]);
        let report = apply_actions(
            &base,
            &[action("shift_batch", SubsystemKind::Compute)],
            &ReductionPolicy::default(),
        )
        .unwrap();
        assert_eq!(report.outcomes[0].status, ActionStatus::Applied);
        // min(15, 60*0.10) = 6 pts of 300 kW -> 18 kW.
        assert!((report.outcomes[0].realized_savings_kwh - 18.0).abs() < 1e-9);
        assert_eq!(report.state.subsystems[0].current_load_pct, 85.0);
        assert!((report.state.subsystems[1].current_load_pct - 54.0).abs() < 1e-9);
    }

    #[test]
    fn absent_kind_is_a_zero_impact_no_op() {
        let base = state(vec![subsystem(
            "hvac_main",
            SubsystemKind::Hvac,
            800.0,
            65.0,
            true,
        )]);
        let report = apply_actions(
            &base,
            &[action("dim_lights", SubsystemKind::Lighting)],
            &ReductionPolicy::default(),
        )
        .unwrap();
        assert_eq!(report.outcomes[0].status, ActionStatus::NoTarget);
        assert_eq!(report.realized_savings_kwh, 0.0);
        assert_eq!(report.optimized_consumption_kw, report.baseline_consumption_kw);
    }

    #[test]
    fn reductions_stop_at_the_kind_floor() {
        // Lighting at 12 % has only 2 points of headroom above its 10 % floor.
        let base = state(vec![subsystem(
            "lighting_general",
            SubsystemKind::Lighting,
            200.0,
            12.0,
            true,
        )]);
        let report = apply_actions(
            &base,
            &[action("dim_lights", SubsystemKind::Lighting)],
            &ReductionPolicy::default(),
        )
        .unwrap();
        assert!((report.state.subsystems[0].current_load_pct - 10.0).abs() < 1e-9);
        assert!((report.outcomes[0].realized_savings_kwh - 4.0).abs() < 1e-9);
    }

    #[test]
    fn at_floor_subsystem_yields_a_skip() {
        let base = state(vec![subsystem(
            "hvac_main",
            SubsystemKind::Hvac,
            800.0,
            20.0,
            true,
        )]);
        let report = apply_actions(
            &base,
            &[action("trim_hvac", SubsystemKind::Hvac)],
            &ReductionPolicy::default(),
        )
        .unwrap();
        assert_eq!(report.outcomes[0].status, ActionStatus::Skipped);
        assert_eq!(report.state.subsystems[0].current_load_pct, 20.0);
    }

    #[test]
    fn negative_expected_savings_are_rejected() {
        let base = state(vec![subsystem(
            "hvac_main",
            SubsystemKind::Hvac,
            800.0,
            65.0,
            true,
        )]);
        let mut bad = action("bogus", SubsystemKind::Hvac);
        bad.expected_savings_kwh = -5.0;
        let err = apply_actions(&base, &[bad], &ReductionPolicy::default()).unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput(_)));
    }

    #[test]
    fn input_state_is_never_mutated() {
        let base = state(vec![subsystem(
            "hvac_main",
            SubsystemKind::Hvac,
            800.0,
            65.0,
            true,
        )]);
        let before = base.clone();
        let _ = apply_actions(
            &base,
            &[action("trim_hvac", SubsystemKind::Hvac)],
            &ReductionPolicy::default(),
        )
        .unwrap();
        assert_eq!(base, before);
    }

    #[test]
    fn empty_action_set_is_the_identity() {
        let base = state(vec![subsystem(
            "hvac_main",
            SubsystemKind::Hvac,
            800.0,
            65.0,
            true,
        )]);
        let report = apply_actions(&base, &[], &ReductionPolicy::default()).unwrap();
        assert_eq!(report.state, base);
        assert!(report.outcomes.is_empty());
        assert_eq!(report.realized_savings_kwh, 0.0);
    }
}
