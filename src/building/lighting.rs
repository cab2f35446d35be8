//! Lighting load model.

use crate::building::types::{LoadContext, LoadModel, SubsystemKind};

/// Multiplier during daylight hours (10:00–16:00), when harvesting dims zones.
const DAYLIGHT_DISCOUNT: f64 = 0.7;
/// Multiplier during dark hours (before 07:00 and from 20:00).
const DARK_PREMIUM: f64 = 1.2;

/// Occupancy-driven lighting load with a daylight discount.
#[derive(Debug, Clone, Copy, Default)]
pub struct LightingLoad;

impl LoadModel for LightingLoad {
    fn load_pct(&mut self, context: &LoadContext) -> f64 {
        let mut pct = 20.0 + context.occupancy_ratio * 60.0;

        if (10..=16).contains(&context.hour) {
            pct *= DAYLIGHT_DISCOUNT;
        } else if context.hour <= 6 || context.hour >= 20 {
            pct *= DARK_PREMIUM;
        }

        SubsystemKind::Lighting.clamp_load_pct(pct)
    }

    fn kind(&self) -> SubsystemKind {
        SubsystemKind::Lighting
    }
}
