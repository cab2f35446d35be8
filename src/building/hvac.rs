//! HVAC load model.

use crate::building::types::{LoadContext, LoadModel, SubsystemKind};

/// Indoor setpoint the plant holds, in °C.
const SETPOINT_C: f64 = 22.0;
/// Load points added per degree of outdoor deviation from the setpoint.
const TEMP_PENALTY_PCT_PER_C: f64 = 2.0;
/// Extra load during the morning pre-conditioning window (06:00–08:00).
const PRECONDITION_BOOST_PCT: f64 = 15.0;
/// Load multiplier during the evening wind-down (18:00–22:00).
const AFTER_HOURS_FACTOR: f64 = 0.7;

/// Occupancy- and weather-driven HVAC load.
///
/// Base load scales linearly with the occupancy ratio; outdoor temperature
/// deviation from the setpoint adds a penalty; early-morning hours carry a
/// pre-conditioning boost and evening hours a reduction.
#[derive(Debug, Clone, Copy, Default)]
pub struct HvacLoad;

impl LoadModel for HvacLoad {
    fn load_pct(&mut self, context: &LoadContext) -> f64 {
        let mut pct = 40.0 + context.occupancy_ratio * 40.0;
        pct += (context.environment.outdoor_temp_c - SETPOINT_C).abs() * TEMP_PENALTY_PCT_PER_C;

        if (6..=8).contains(&context.hour) {
            pct += PRECONDITION_BOOST_PCT;
        } else if (18..=22).contains(&context.hour) {
            pct *= AFTER_HOURS_FACTOR;
        }

        SubsystemKind::Hvac.clamp_load_pct(pct)
    }

    fn kind(&self) -> SubsystemKind {
        SubsystemKind::Hvac
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::building::types::Environment;

    fn ctx(hour: u8, occupancy_ratio: f64, outdoor_temp_c: f64) -> LoadContext {
        LoadContext {
            hour,
            occupancy_ratio,
            environment: Environment {
                outdoor_temp_c,
                ..Environment::default()
            },
        }
    }

    #[test]
    fn midday_full_occupancy_at_setpoint() {
        let mut hvac = HvacLoad;
        // 40 + 1.0 * 40, no temperature penalty, no hour adjustment.
        assert_eq!(hvac.load_pct(&ctx(12, 1.0, 22.0)), 80.0);
    }

    #[test]
    fn temperature_deviation_adds_penalty() {
        let mut hvac = HvacLoad;
        let mild = hvac.load_pct(&ctx(12, 0.5, 22.0));
        let hot = hvac.load_pct(&ctx(12, 0.5, 32.0));
        assert!((hot - mild - 20.0).abs() < 1e-9);

        let cold = hvac.load_pct(&ctx(12, 0.5, 12.0));
        assert_eq!(hot, cold);
    }

    #[test]
    fn preconditioning_boost_applies_in_the_morning() {
        let mut hvac = HvacLoad;
        let early = hvac.load_pct(&ctx(7, 0.2, 22.0));
        let midday = hvac.load_pct(&ctx(12, 0.2, 22.0));
        assert!((early - midday - 15.0).abs() < 1e-9);
    }

    #[test]
    fn evening_reduction_applies_after_hours() {
        let mut hvac = HvacLoad;
        let evening = hvac.load_pct(&ctx(20, 0.5, 22.0));
        let midday = hvac.load_pct(&ctx(12, 0.5, 22.0));
        assert!((evening - midday * 0.7).abs() < 1e-9);
    }

    #[test]
    fn load_never_leaves_the_band() {
        let mut hvac = HvacLoad;
        // Extreme heat pushes past 100 before clamping.
        assert_eq!(hvac.load_pct(&ctx(12, 1.0, 50.0)), 100.0);
        // Deep evening reduction with no occupants still respects the floor.
        let quiet = hvac.load_pct(&ctx(20, 0.0, 22.0));
        assert!(quiet >= 20.0);
    }
}
