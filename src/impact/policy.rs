//! Per-kind load reduction policy.

use serde::{Deserialize, Serialize};

use crate::building::types::SubsystemKind;

/// Bounded proportional reduction applied to one subsystem kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Reduction {
    /// Hard cap on the reduction, in load percentage points.
    pub cap_pct: f64,
    /// Fraction of the current load shed, before capping.
    pub fraction: f64,
}

/// Reduction limits per subsystem kind.
///
/// Policy defaults, not protocol constants: scenario files may override any
/// kind's limits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReductionPolicy {
    pub hvac: Reduction,
    pub lighting: Reduction,
    pub compute: Reduction,
    pub other: Reduction,
}

impl Default for ReductionPolicy {
    fn default() -> Self {
        Self {
            hvac: Reduction {
                cap_pct: 20.0,
                fraction: 0.15,
            },
            lighting: Reduction {
                cap_pct: 30.0,
                fraction: 0.25,
            },
            compute: Reduction {
                cap_pct: 15.0,
                fraction: 0.10,
            },
            other: Reduction {
                cap_pct: 10.0,
                fraction: 0.10,
            },
        }
    }
}

impl ReductionPolicy {
    /// Reduction limits for `kind`.
    pub fn for_kind(&self, kind: SubsystemKind) -> Reduction {
        match kind {
            SubsystemKind::Hvac => self.hvac,
            SubsystemKind::Lighting => self.lighting,
            SubsystemKind::Compute => self.compute,
            SubsystemKind::Other => self.other,
        }
    }
}
