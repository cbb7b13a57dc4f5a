//! Region - one coarse world partition and the hordes it owns

use serde::{Deserialize, Serialize};

use crate::aggregate::registry::HordeRegistry;
use crate::core::types::{CoarsePos, RegionId};

/// A coarse region (REGION_SIZE x REGION_SIZE coarse tiles)
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub id: RegionId,
    pub hordes: HordeRegistry,
}

impl Region {
    pub fn new(id: RegionId) -> Self {
        Self {
            id,
            hordes: HordeRegistry::new(),
        }
    }

    /// Absolute position of the horde at `idx`
    pub fn horde_position(&self, idx: usize) -> Option<CoarsePos> {
        self.hordes.get(idx).map(|h| h.position.to_absolute(self.id))
    }

    /// Whether any horde lies within `radius` of an absolute position
    pub fn has_horde_near(&self, pos: CoarsePos, radius: i32) -> bool {
        self.hordes.any_within(self.id.to_local(pos), radius)
    }
}
