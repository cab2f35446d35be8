//! Residual building services load: lifts, security, plant room.

use crate::building::types::{LoadContext, LoadModel, SubsystemKind};

/// Weakly occupancy-coupled load for everything outside the named kinds.
#[derive(Debug, Clone, Copy, Default)]
pub struct OtherLoad;

impl LoadModel for OtherLoad {
    fn load_pct(&mut self, context: &LoadContext) -> f64 {
        let pct = 25.0 + context.occupancy_ratio * 20.0;
        SubsystemKind::Other.clamp_load_pct(pct)
    }

    fn kind(&self) -> SubsystemKind {
        SubsystemKind::Other
    }
}
