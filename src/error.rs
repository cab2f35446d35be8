//! Engine error taxonomy.

use std::error::Error;
use std::fmt;

/// Errors returned by the optimization engine.
///
/// Every failure is synchronous and atomic: a call either produces a full
/// result or fails with one of these variants. No-op actions (absent or
/// non-controllable targets) are not errors; they are reported per-action
/// with zero impact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Invalid scoring configuration: weights not summing to one, a negative
    /// weight, or a non-positive reference value. Never silently repaired.
    Configuration(String),
    /// Malformed caller input: a gapped or out-of-order forecast series,
    /// negative expected savings, a negative scale multiplier, or a bad
    /// block length.
    InvalidInput(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Configuration(msg) => write!(f, "configuration error: {msg}"),
            EngineError::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
        }
    }
}

impl Error for EngineError {}
