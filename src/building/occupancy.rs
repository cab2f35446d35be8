//! Three-regime stochastic occupancy model.

use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

/// First hour of the business regime (inclusive).
const BUSINESS_START_HR: u8 = 9;
/// Last hour of the business regime (inclusive).
const BUSINESS_END_HR: u8 = 17;
/// First hour of the morning transition (inclusive).
const TRANSITION_START_HR: u8 = 7;
/// Last hour of the evening transition (inclusive).
const TRANSITION_END_HR: u8 = 19;

/// Occupancy bounds for each daily regime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OccupancyProfile {
    /// Building capacity; samples never exceed it.
    pub max_occupancy: u32,
    /// Typical headcount during business hours.
    pub typical: u32,
    /// Half-width of the business-hours variation band.
    pub variation: u32,
    /// Business-hours headcount never drops below this.
    pub business_min: u32,
    /// Transition-hours range (inclusive).
    pub transition_lo: u32,
    pub transition_hi: u32,
    /// After-hours range (inclusive): security, cleaning, late workers.
    pub after_lo: u32,
    pub after_hi: u32,
}

impl Default for OccupancyProfile {
    fn default() -> Self {
        Self {
            max_occupancy: 500,
            typical: 450,
            variation: 50,
            business_min: 50,
            transition_lo: 100,
            transition_hi: 300,
            after_lo: 10,
            after_hi: 80,
        }
    }
}

/// Hour-of-day occupancy draw with an owned seeded RNG.
///
/// The regime for an hour is deterministic; only the draw within the
/// regime's bounds is stochastic, so a fixed seed reproduces a run exactly.
#[derive(Debug, Clone)]
pub struct OccupancyModel {
    profile: OccupancyProfile,
    rng: StdRng,
}

impl OccupancyModel {
    /// Creates a model over `profile` seeded with `seed`.
    pub fn new(profile: OccupancyProfile, seed: u64) -> Self {
        Self {
            profile,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Draws an occupancy count for `hour`, clamped to `[0, max_occupancy]`.
    pub fn sample(&mut self, hour: u8) -> u32 {
        let p = self.profile;
        let drawn: i64 = if (BUSINESS_START_HR..=BUSINESS_END_HR).contains(&hour) {
            let spread = i64::from(p.variation);
            let offset = self.rng.random_range(-spread..=spread);
            (i64::from(p.typical) + offset).max(i64::from(p.business_min))
        } else if (TRANSITION_START_HR..=TRANSITION_END_HR).contains(&hour) {
            i64::from(self.rng.random_range(p.transition_lo..=p.transition_hi))
        } else {
            i64::from(self.rng.random_range(p.after_lo..=p.after_hi))
        };

        drawn.clamp(0, i64::from(p.max_occupancy)) as u32
    }

    /// Building capacity this model draws against.
    pub fn max_occupancy(&self) -> u32 {
        self.profile.max_occupancy
    }
}
