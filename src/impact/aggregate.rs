//! Savings aggregation and projection scaling.

use std::fmt;

use serde::Serialize;

use crate::error::EngineError;

/// Realized savings expressed across energy, cost, and carbon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Metrics {
    pub energy_kwh: f64,
    pub cost: f64,
    pub carbon_kg: f64,
}

/// Converts realized energy savings into combined metrics at the given
/// tariff and grid carbon intensity.
pub fn aggregate(
    savings_kwh: f64,
    price_per_kwh: f64,
    carbon_intensity_kg_per_kwh: f64,
) -> Metrics {
    Metrics {
        energy_kwh: savings_kwh,
        cost: savings_kwh * price_per_kwh,
        carbon_kg: savings_kwh * carbon_intensity_kg_per_kwh,
    }
}

/// Scales metrics linearly, e.g. daily to annual or per-building to fleet.
///
/// # Errors
///
/// Returns `EngineError::InvalidInput` if `multiplier` is negative.
pub fn scale(metrics: &Metrics, multiplier: f64) -> Result<Metrics, EngineError> {
    if multiplier < 0.0 {
        return Err(EngineError::InvalidInput(format!(
            "scale multiplier must be >= 0, got {multiplier}"
        )));
    }
    Ok(Metrics {
        energy_kwh: metrics.energy_kwh * multiplier,
        cost: metrics.cost * multiplier,
        carbon_kg: metrics.carbon_kg * multiplier,
    })
}

impl fmt::Display for Metrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.1} kWh, ${:.2}, {:.1} kg CO2",
            self.energy_kwh, self.cost, self.carbon_kg
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregate_multiplies_out_each_dimension() {
        let metrics = aggregate(100.5, 0.35, 0.75);
        assert!((metrics.energy_kwh - 100.5).abs() < 1e-9);
        assert!((metrics.cost - 35.175).abs() < 1e-9);
        assert!((metrics.carbon_kg - 75.375).abs() < 1e-9);
    }

    #[test]
    fn zero_savings_yield_zero_metrics() {
        let metrics = aggregate(0.0, 0.35, 0.75);
        assert_eq!(metrics.energy_kwh, 0.0);
        assert_eq!(metrics.cost, 0.0);
        assert_eq!(metrics.carbon_kg, 0.0);
    }

    #[test]
    fn scale_chains_daily_to_annual_to_fleet() {
        let daily = aggregate(100.0, 0.35, 0.75);
        let annual = scale(&daily, 365.0).unwrap();
        assert!((annual.energy_kwh - 36_500.0).abs() < 1e-9);

        let fleet = scale(&annual, 50_000.0).unwrap();
        assert!((fleet.energy_kwh - 1.825e9).abs() < 1e-3);
        assert!((fleet.cost - 1.825e9 * 0.35).abs() < 1e-2);
    }

    #[test]
    fn zero_multiplier_is_allowed() {
        let metrics = aggregate(10.0, 0.35, 0.75);
        let scaled = scale(&metrics, 0.0).unwrap();
        assert_eq!(scaled.energy_kwh, 0.0);
    }

    #[test]
    fn negative_multiplier_is_rejected() {
        let metrics = aggregate(10.0, 0.35, 0.75);
        let err = scale(&metrics, -1.0).unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput(_)));
    }
}
