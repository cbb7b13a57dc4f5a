//! Region resolver: which coarse region owns a coordinate
//!
//! Only the 3x3 block of regions around the current one is tracked. That
//! block always covers every region the loaded window straddles, plus one
//! ring of slack for hordes wandering just past it.

use crate::core::error::{HordeError, Result};
use crate::core::types::{CoarsePos, LocalPos, RegionId};
use crate::spatial::window::LoadedWindow;

/// Regions tracked in each direction around the current one
const TRACKED_RING: i32 = 1;

/// Pure lookup from absolute coarse coordinates to an owning region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionResolver {
    current: RegionId,
}

impl RegionResolver {
    pub fn new(current: RegionId) -> Self {
        Self { current }
    }

    /// Resolver centered on the region under the observer
    pub fn for_window(window: &LoadedWindow) -> Self {
        Self::new(RegionId::containing(window.center()))
    }

    pub fn current(&self) -> RegionId {
        self.current
    }

    pub fn is_tracked(&self, region: RegionId) -> bool {
        self.current.ring_distance(&region) <= TRACKED_RING
    }

    /// Owning region and local frame coordinate, or `OutOfReach`
    pub fn resolve(&self, pos: CoarsePos) -> Result<(RegionId, LocalPos)> {
        let region = RegionId::containing(pos);
        if !self.is_tracked(region) {
            return Err(HordeError::OutOfReach { x: pos.x, y: pos.y });
        }
        Ok((region, region.to_local(pos)))
    }

    /// Every tracked region, row by row
    pub fn tracked_regions(&self) -> impl Iterator<Item = RegionId> {
        ring_around(self.current, TRACKED_RING)
    }

    /// A region and its immediate neighbors, limited to tracked ones
    pub fn neighborhood(self, region: RegionId) -> impl Iterator<Item = RegionId> {
        ring_around(region, 1).filter(move |r| self.is_tracked(*r))
    }
}

fn ring_around(center: RegionId, radius: i32) -> impl Iterator<Item = RegionId> {
    (-radius..=radius).flat_map(move |dy| {
        (-radius..=radius).map(move |dx| RegionId::new(center.x + dx, center.y + dy))
    })
}
