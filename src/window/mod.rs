//! Forecast-window scoring and ranking.

pub mod rank;
pub mod score;

pub use rank::RankedWindows;
pub use score::{Recommendation, ScoreReferences, ScoreWeights, ScoredWindow, WindowScorer};
