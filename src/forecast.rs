//! Market/environmental forecast slots and synthetic generation.

use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::Serialize;

use crate::error::EngineError;

/// Tolerance when checking slot contiguity, in hours.
const CONTIGUITY_EPS_HR: f64 = 1e-9;

/// One discrete time interval's market and environmental observation.
///
/// Times are hours from the beginning of the forecast horizon; the engine is
/// agnostic to wall-clock anchoring, which belongs to the feed that produced
/// the series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastSlot {
    /// Slot start (inclusive).
    pub start_hr: f64,
    /// Slot end (exclusive).
    pub end_hr: f64,
    /// Renewable generation share of the grid mix (0–100).
    pub renewable_pct: f64,
    /// Grid carbon intensity in kg CO₂ per kWh.
    pub carbon_intensity_kg_per_kwh: f64,
    /// Wholesale energy price per MWh.
    pub price_per_mwh: f64,
    /// Secondary-market price per hour (e.g. compute spot capacity).
    pub spot_price_per_hr: f64,
}

impl ForecastSlot {
    /// Slot duration in hours.
    pub fn duration_hr(&self) -> f64 {
        self.end_hr - self.start_hr
    }
}

/// Validates that `slots` form an ordered, contiguous, non-overlapping series.
///
/// An empty series is valid. Each slot must have positive duration, and each
/// slot's end must meet the next slot's start within 1e-9 hours.
///
/// # Errors
///
/// Returns `EngineError::InvalidInput` naming the first offending slot pair.
pub fn validate_series(slots: &[ForecastSlot]) -> Result<(), EngineError> {
    for (i, slot) in slots.iter().enumerate() {
        if slot.end_hr <= slot.start_hr {
            return Err(EngineError::InvalidInput(format!(
                "slot {i} has non-positive duration ({:.3} h to {:.3} h)",
                slot.start_hr, slot.end_hr
            )));
        }
    }

    for (i, pair) in slots.windows(2).enumerate() {
        let step = pair[1].start_hr - pair[0].end_hr;
        if step > CONTIGUITY_EPS_HR {
            return Err(EngineError::InvalidInput(format!(
                "gap of {step:.3} h between slot {i} and slot {}",
                i + 1
            )));
        }
        if step < -CONTIGUITY_EPS_HR {
            return Err(EngineError::InvalidInput(format!(
                "slot {} overlaps slot {i} by {:.3} h",
                i + 1,
                -step
            )));
        }
    }

    Ok(())
}

/// Spot-price multiplier for an hour of day.
///
/// Business hours run higher, the evening peak higher still, off-hours lower.
fn spot_multiplier(hour: u8) -> f64 {
    if (9..=17).contains(&hour) {
        1.15
    } else if (18..=22).contains(&hour) {
        1.25
    } else {
        0.85
    }
}

/// Seeded synthetic day-ahead forecast generator.
///
/// Stands in for a live market feed when none is wired up: renewable share
/// follows a daylight half-sine between 06:00 and 18:00, carbon intensity is
/// derived from the renewable share, wholesale price moves inversely to
/// renewables, and the spot price follows business-hour and evening-peak
/// multipliers. All jitter comes from an owned seeded RNG.
#[derive(Debug, Clone)]
pub struct SyntheticForecast {
    /// Renewable share at the midday peak (0–100).
    pub peak_renewable_pct: f64,
    /// Renewable share floor during the night (0–100).
    pub night_renewable_pct: f64,
    /// Mean wholesale price per MWh.
    pub base_price_per_mwh: f64,
    /// Mean secondary-market price per hour.
    pub base_spot_price: f64,
    rng: StdRng,
}

impl SyntheticForecast {
    /// Creates a generator with the given market baselines and seed.
    pub fn new(
        peak_renewable_pct: f64,
        night_renewable_pct: f64,
        base_price_per_mwh: f64,
        base_spot_price: f64,
        seed: u64,
    ) -> Self {
        Self {
            peak_renewable_pct: peak_renewable_pct.clamp(0.0, 100.0),
            night_renewable_pct: night_renewable_pct.clamp(0.0, 100.0),
            base_price_per_mwh: base_price_per_mwh.max(0.0),
            base_spot_price: base_spot_price.max(0.0),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Produces `horizon_hours` contiguous one-hour slots starting at hour 0.
    pub fn generate(&mut self, horizon_hours: usize) -> Vec<ForecastSlot> {
        let mut slots = Vec::with_capacity(horizon_hours);
        for i in 0..horizon_hours {
            let hour = (i % 24) as u8;

            let daylight = if (6..18).contains(&hour) {
                (std::f64::consts::PI * (f64::from(hour) - 6.0) / 12.0).sin()
            } else {
                0.0
            };
            let jitter = (self.rng.random::<f64>() - 0.5) * 8.0;
            let renewable_pct = (self.night_renewable_pct
                + (self.peak_renewable_pct - self.night_renewable_pct) * daylight
                + jitter)
                .clamp(0.0, 100.0);

            // Dirtier mix when renewables are low: 0.8 down to 0.2 kg/kWh.
            let carbon = (0.8 - renewable_pct / 100.0 * 0.6).max(0.0);

            let price_noise = 1.0 + (self.rng.random::<f64>() - 0.5) * 0.10;
            let price =
                (self.base_price_per_mwh * (1.5 - renewable_pct / 100.0) * price_noise).max(0.0);

            let spot_noise = 1.0 + (self.rng.random::<f64>() - 0.5) * 0.08;
            let spot = (self.base_spot_price * spot_multiplier(hour) * spot_noise).max(0.0);

            slots.push(ForecastSlot {
                start_hr: i as f64,
                end_hr: (i + 1) as f64,
                renewable_pct,
                carbon_intensity_kg_per_kwh: carbon,
                price_per_mwh: price,
                spot_price_per_hr: spot,
            });
        }
        slots
    }
}
