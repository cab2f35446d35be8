//! Series-wide ranking and sustained-block queries.

use serde::Serialize;

use crate::error::EngineError;
use crate::forecast::{self, ForecastSlot};
use crate::window::score::{Recommendation, ScoreComponents, ScoredWindow, WindowScorer};

/// Best and worst windows across a forecast series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedWindows {
    /// Highest-scoring windows, best first.
    pub best: Vec<ScoredWindow>,
    /// Lowest-scoring windows, worst first.
    pub worst: Vec<ScoredWindow>,
}

/// Descending by score, ties broken by earliest start.
fn best_first(a: &ScoredWindow, b: &ScoredWindow) -> std::cmp::Ordering {
    b.score
        .total_cmp(&a.score)
        .then(a.slot.start_hr.total_cmp(&b.slot.start_hr))
}

/// Ascending by score, ties broken by earliest start.
fn worst_first(a: &ScoredWindow, b: &ScoredWindow) -> std::cmp::Ordering {
    a.score
        .total_cmp(&b.score)
        .then(a.slot.start_hr.total_cmp(&b.slot.start_hr))
}

impl WindowScorer {
    /// Scores every slot and returns the top and bottom of the ranking.
    ///
    /// Each slot is scored independently; ties break on the earliest start,
    /// so re-ranking the same series is always identical. `top_n` and
    /// `bottom_n` are clamped to the series length; asking for more than is
    /// available returns everything.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidInput` if the series is out of order or
    /// has gaps or overlaps.
    pub fn rank(
        &self,
        slots: &[ForecastSlot],
        top_n: usize,
        bottom_n: usize,
    ) -> Result<RankedWindows, EngineError> {
        forecast::validate_series(slots)?;

        let scored: Vec<ScoredWindow> = slots.iter().map(|slot| self.score(slot)).collect();

        let mut best = scored.clone();
        best.sort_by(best_first);
        best.truncate(top_n.min(best.len()));

        let mut worst = scored;
        worst.sort_by(worst_first);
        worst.truncate(bottom_n.min(worst.len()));

        Ok(RankedWindows { best, worst })
    }

    /// Scores every contiguous `block_len`-slot window and returns the top
    /// `top_n`, best first.
    ///
    /// Per-criterion scores are averaged across the block and the averaged
    /// components are composited like a single slot; the reported slot spans
    /// the whole block and carries block-average raw signals. Used to place
    /// long-running work that needs several good hours in a row.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidInput` for an invalid series, a zero
    /// block length, or a block longer than the series.
    pub fn rank_blocks(
        &self,
        slots: &[ForecastSlot],
        block_len: usize,
        top_n: usize,
    ) -> Result<Vec<ScoredWindow>, EngineError> {
        forecast::validate_series(slots)?;
        if block_len == 0 {
            return Err(EngineError::InvalidInput(
                "block length must be > 0".to_string(),
            ));
        }
        if block_len > slots.len() {
            return Err(EngineError::InvalidInput(format!(
                "block length {block_len} exceeds series length {}",
                slots.len()
            )));
        }

        let n = block_len as f64;
        let mut blocks: Vec<ScoredWindow> = slots
            .windows(block_len)
            .map(|block| {
                let mut components = ScoreComponents {
                    renewable: 0.0,
                    carbon: 0.0,
                    price: 0.0,
                    spot: 0.0,
                };
                let mut raw = ForecastSlot {
                    start_hr: block[0].start_hr,
                    end_hr: block[block.len() - 1].end_hr,
                    renewable_pct: 0.0,
                    carbon_intensity_kg_per_kwh: 0.0,
                    price_per_mwh: 0.0,
                    spot_price_per_hr: 0.0,
                };
                for slot in block {
                    let c = self.components(slot);
                    components.renewable += c.renewable;
                    components.carbon += c.carbon;
                    components.price += c.price;
                    components.spot += c.spot;
                    raw.renewable_pct += slot.renewable_pct;
                    raw.carbon_intensity_kg_per_kwh += slot.carbon_intensity_kg_per_kwh;
                    raw.price_per_mwh += slot.price_per_mwh;
                    raw.spot_price_per_hr += slot.spot_price_per_hr;
                }
                components.renewable /= n;
                components.carbon /= n;
                components.price /= n;
                components.spot /= n;
                raw.renewable_pct /= n;
                raw.carbon_intensity_kg_per_kwh /= n;
                raw.price_per_mwh /= n;
                raw.spot_price_per_hr /= n;

                let score = self.composite(&components);
                ScoredWindow {
                    slot: raw,
                    score,
                    recommendation: Recommendation::for_score(score),
                }
            })
            .collect();

        blocks.sort_by(best_first);
        blocks.truncate(top_n.min(blocks.len()));
        Ok(blocks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(start_hr: f64, renewable: f64, price: f64) -> ForecastSlot {
        ForecastSlot {
            start_hr,
            end_hr: start_hr + 1.0,
            renewable_pct: renewable,
            carbon_intensity_kg_per_kwh: 0.8 - renewable / 100.0 * 0.6,
            price_per_mwh: price,
            spot_price_per_hr: 0.03,
        }
    }

    fn series() -> Vec<ForecastSlot> {
        vec![
            slot(0.0, 20.0, 90.0),
            slot(1.0, 40.0, 70.0),
            slot(2.0, 80.0, 40.0),
            slot(3.0, 60.0, 55.0),
        ]
    }

    #[test]
    fn best_and_worst_are_ordered() {
        let scorer = WindowScorer::with_defaults();
        let ranked = scorer.rank(&series(), 2, 2).unwrap();
        assert_eq!(ranked.best.len(), 2);
        assert_eq!(ranked.worst.len(), 2);
        assert_eq!(ranked.best[0].slot.start_hr, 2.0);
        assert_eq!(ranked.worst[0].slot.start_hr, 0.0);
        assert!(ranked.best[0].score >= ranked.best[1].score);
        assert!(ranked.worst[0].score <= ranked.worst[1].score);
    }

    #[test]
    fn counts_are_clamped_to_series_length() {
        let scorer = WindowScorer::with_defaults();
        let ranked = scorer.rank(&series(), 100, 100).unwrap();
        assert_eq!(ranked.best.len(), 4);
        assert_eq!(ranked.worst.len(), 4);
    }

    #[test]
    fn gapped_series_is_rejected() {
        let scorer = WindowScorer::with_defaults();
        let slots = vec![slot(0.0, 50.0, 70.0), slot(1.0, 50.0, 70.0), slot(3.0, 50.0, 70.0)];
        let err = scorer.rank(&slots, 1, 1).unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput(_)));
    }

    #[test]
    fn equal_scores_rank_by_earliest_start() {
        let scorer = WindowScorer::with_defaults();
        let slots = vec![slot(0.0, 50.0, 70.0), slot(1.0, 50.0, 70.0), slot(2.0, 50.0, 70.0)];
        let ranked = scorer.rank(&slots, 3, 3).unwrap();
        assert_eq!(ranked.best[0].slot.start_hr, 0.0);
        assert_eq!(ranked.best[1].slot.start_hr, 1.0);
        assert_eq!(ranked.worst[0].slot.start_hr, 0.0);
    }

    #[test]
    fn ranking_is_idempotent() {
        let scorer = WindowScorer::with_defaults();
        let first = scorer.rank(&series(), 4, 4).unwrap();
        let second = scorer.rank(&series(), 4, 4).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn empty_series_ranks_to_empty_lists() {
        let scorer = WindowScorer::with_defaults();
        let ranked = scorer.rank(&[], 3, 3).unwrap();
        assert!(ranked.best.is_empty());
        assert!(ranked.worst.is_empty());
    }

    #[test]
    fn block_ranking_averages_and_spans() {
        let scorer = WindowScorer::with_defaults();
        let blocks = scorer.rank_blocks(&series(), 2, 10).unwrap();
        // 4 slots give 3 two-slot blocks.
        assert_eq!(blocks.len(), 3);
        // The (2.0, 3.0) pair has the highest renewables and lowest prices.
        assert_eq!(blocks[0].slot.start_hr, 2.0);
        assert_eq!(blocks[0].slot.end_hr, 4.0);
        assert!((blocks[0].slot.renewable_pct - 70.0).abs() < 1e-9);
    }

    #[test]
    fn block_score_equals_mean_of_member_scores() {
        // With all signals inside their clamp ranges the composite is linear,
        // so a block scores the mean of its member slots.
        let scorer = WindowScorer::with_defaults();
        let slots = series();
        let blocks = scorer.rank_blocks(&slots, 2, 10).unwrap();
        let singles: Vec<f64> = slots.iter().map(|s| scorer.score(s).score).collect();
        let block_02 = blocks
            .iter()
            .find(|b| b.slot.start_hr == 0.0)
            .expect("block starting at 0 should exist");
        assert!((block_02.score - (singles[0] + singles[1]) / 2.0).abs() < 1e-9);
    }

    #[test]
    fn bad_block_lengths_are_rejected() {
        let scorer = WindowScorer::with_defaults();
        assert!(scorer.rank_blocks(&series(), 0, 1).is_err());
        assert!(scorer.rank_blocks(&series(), 5, 1).is_err());
    }
}
