//! Multi-criteria slot scoring.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::forecast::ForecastSlot;

/// Tolerance when checking that weights sum to one.
const WEIGHT_SUM_EPS: f64 = 1e-6;

/// Relative importance of each scoring criterion.
///
/// Weights must be non-negative and sum to 1.0 within 1e-6. Invalid
/// configurations are rejected outright, never renormalized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScoreWeights {
    pub renewable: f64,
    pub carbon: f64,
    pub price: f64,
    pub spot: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            renewable: 0.35,
            carbon: 0.30,
            price: 0.20,
            spot: 0.15,
        }
    }
}

impl ScoreWeights {
    /// Checks non-negativity and the unit-sum constraint.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Configuration` naming the offending weight or
    /// the off-unit sum.
    pub fn validate(&self) -> Result<(), EngineError> {
        let components = [
            ("renewable", self.renewable),
            ("carbon", self.carbon),
            ("price", self.price),
            ("spot", self.spot),
        ];
        for (name, weight) in components {
            if weight < 0.0 {
                return Err(EngineError::Configuration(format!(
                    "{name} weight must be >= 0, got {weight}"
                )));
            }
        }

        let sum = self.renewable + self.carbon + self.price + self.spot;
        if (sum - 1.0).abs() > WEIGHT_SUM_EPS {
            return Err(EngineError::Configuration(format!(
                "weights must sum to 1.0, got {sum}"
            )));
        }
        Ok(())
    }
}

/// Reference ceilings used to normalize raw market signals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScoreReferences {
    /// Wholesale price that maps to a price score of zero.
    pub price_per_mwh: f64,
    /// Secondary-market price that maps to a spot score of zero.
    pub spot_price_per_hr: f64,
    /// Carbon intensity treated as the dirtiest expected grid mix.
    pub carbon_ceiling_kg_per_kwh: f64,
}

impl Default for ScoreReferences {
    fn default() -> Self {
        Self {
            price_per_mwh: 100.0,
            spot_price_per_hr: 0.10,
            carbon_ceiling_kg_per_kwh: 1.0,
        }
    }
}

impl ScoreReferences {
    /// Checks that every reference is strictly positive.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Configuration` naming the offending reference.
    pub fn validate(&self) -> Result<(), EngineError> {
        let references = [
            ("price reference", self.price_per_mwh),
            ("spot price reference", self.spot_price_per_hr),
            ("carbon ceiling", self.carbon_ceiling_kg_per_kwh),
        ];
        for (name, value) in references {
            if value <= 0.0 {
                return Err(EngineError::Configuration(format!(
                    "{name} must be > 0, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Desirability tier attached to a scored window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Recommendation {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl Recommendation {
    /// Tier for a composite score. Thresholds are fixed at 80 / 60 / 40.
    pub fn for_score(score: f64) -> Self {
        if score >= 80.0 {
            Recommendation::Excellent
        } else if score >= 60.0 {
            Recommendation::Good
        } else if score >= 40.0 {
            Recommendation::Fair
        } else {
            Recommendation::Poor
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Recommendation::Excellent => "excellent",
            Recommendation::Good => "good",
            Recommendation::Fair => "fair",
            Recommendation::Poor => "poor",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A forecast slot with its composite desirability score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredWindow {
    pub slot: ForecastSlot,
    /// Composite score in [0, 100]; higher is better.
    pub score: f64,
    pub recommendation: Recommendation,
}

/// Normalized per-criterion scores for one slot, each in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreComponents {
    pub renewable: f64,
    pub carbon: f64,
    pub price: f64,
    pub spot: f64,
}

/// Validated slot scorer.
///
/// Construction checks the weight and reference configuration once; scoring
/// is then an infallible pure function of the slot.
#[derive(Debug, Clone)]
pub struct WindowScorer {
    weights: ScoreWeights,
    references: ScoreReferences,
}

impl WindowScorer {
    /// Creates a scorer from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Configuration` for negative weights, a weight
    /// sum off unity by more than 1e-6, or non-positive references.
    pub fn new(weights: ScoreWeights, references: ScoreReferences) -> Result<Self, EngineError> {
        weights.validate()?;
        references.validate()?;
        Ok(Self {
            weights,
            references,
        })
    }

    /// Scorer with the standing default weights and references.
    pub fn with_defaults() -> Self {
        Self {
            weights: ScoreWeights::default(),
            references: ScoreReferences::default(),
        }
    }

    /// Normalizes one slot's raw signals into per-criterion scores.
    pub fn components(&self, slot: &ForecastSlot) -> ScoreComponents {
        let r = &self.references;
        ScoreComponents {
            renewable: slot.renewable_pct.clamp(0.0, 100.0),
            carbon: (1.0
                - (slot.carbon_intensity_kg_per_kwh / r.carbon_ceiling_kg_per_kwh)
                    .clamp(0.0, 1.0))
                * 100.0,
            price: ((r.price_per_mwh - slot.price_per_mwh) / r.price_per_mwh * 100.0)
                .clamp(0.0, 100.0),
            spot: ((r.spot_price_per_hr - slot.spot_price_per_hr) / r.spot_price_per_hr * 100.0)
                .clamp(0.0, 100.0),
        }
    }

    /// Weighted composite of normalized components, clamped to [0, 100].
    pub fn composite(&self, components: &ScoreComponents) -> f64 {
        let w = &self.weights;
        (components.renewable * w.renewable
            + components.carbon * w.carbon
            + components.price * w.price
            + components.spot * w.spot)
            .clamp(0.0, 100.0)
    }

    /// Scores one forecast slot.
    pub fn score(&self, slot: &ForecastSlot) -> ScoredWindow {
        let score = self.composite(&self.components(slot));
        ScoredWindow {
            slot: slot.clone(),
            score,
            recommendation: Recommendation::for_score(score),
        }
    }

    pub fn weights(&self) -> &ScoreWeights {
        &self.weights
    }

    pub fn references(&self) -> &ScoreReferences {
        &self.references
    }
}
