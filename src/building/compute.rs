//! Compute load models: critical (market-hours bound) and general purpose.

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::building::types::{LoadContext, LoadModel, SubsystemKind};

/// Market-hours window during which critical compute runs hot (inclusive).
const MARKET_OPEN_HR: u8 = 9;
const MARKET_CLOSE_HR: u8 = 16;

/// In-market load band for critical compute, in percent.
const MARKET_BAND: (f64, f64) = (80.0, 95.0);
/// Off-market load band for critical compute, in percent.
const OFF_MARKET_BAND: (f64, f64) = (60.0, 80.0);

/// General-compute ceiling, below the kind ceiling.
const GENERAL_CEILING_PCT: f64 = 90.0;

/// Critical compute load (trading platforms, market data).
///
/// Time-of-day bound: a high band during market hours, a moderate band
/// outside them. Never a function of occupancy. The in-band draw comes from
/// an owned seeded RNG so runs are reproducible.
#[derive(Debug, Clone)]
pub struct CriticalComputeLoad {
    rng: StdRng,
}

impl CriticalComputeLoad {
    /// Creates a model seeded with `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl LoadModel for CriticalComputeLoad {
    fn load_pct(&mut self, context: &LoadContext) -> f64 {
        let (lo, hi) = if (MARKET_OPEN_HR..=MARKET_CLOSE_HR).contains(&context.hour) {
            MARKET_BAND
        } else {
            OFF_MARKET_BAND
        };
        let pct = lo + self.rng.random::<f64>() * (hi - lo);
        SubsystemKind::Compute.clamp_load_pct(pct)
    }

    fn kind(&self) -> SubsystemKind {
        SubsystemKind::Compute
    }
}

/// General-purpose compute load (office IT, batch capacity).
///
/// Scales with occupancy under a bounded ceiling.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeneralComputeLoad;

impl LoadModel for GeneralComputeLoad {
    fn load_pct(&mut self, context: &LoadContext) -> f64 {
        let pct = 40.0 + context.occupancy_ratio * 40.0;
        pct.clamp(SubsystemKind::Compute.min_floor_pct(), GENERAL_CEILING_PCT)
    }

    fn kind(&self) -> SubsystemKind {
        SubsystemKind::Compute
    }
}
