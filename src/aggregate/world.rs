//! Overworld - the coarse regions near the observer and the loaded window

use ahash::AHashMap;

use crate::aggregate::record::HordeRecord;
use crate::aggregate::region::Region;
use crate::core::error::Result;
use crate::core::types::{CoarsePos, RegionId};
use crate::spatial::{LoadedWindow, RegionResolver};

/// Store of coarse regions plus the window simulated at fine resolution
///
/// Regions are created on first touch; a region that was never touched
/// simply has no hordes.
#[derive(Clone, Debug)]
pub struct Overworld {
    regions: AHashMap<RegionId, Region>,
    window: LoadedWindow,
}

impl Overworld {
    pub fn new(window: LoadedWindow) -> Self {
        Self {
            regions: AHashMap::new(),
            window,
        }
    }

    pub fn window(&self) -> &LoadedWindow {
        &self.window
    }

    pub fn set_window(&mut self, window: LoadedWindow) {
        self.window = window;
    }

    pub fn resolver(&self) -> RegionResolver {
        RegionResolver::for_window(&self.window)
    }

    pub fn region(&self, id: RegionId) -> Option<&Region> {
        self.regions.get(&id)
    }

    /// Mutable region, created empty if it was never touched
    pub fn region_mut(&mut self, id: RegionId) -> &mut Region {
        self.regions.entry(id).or_insert_with(|| Region::new(id))
    }

    /// Tracked regions that currently exist, in resolver order
    pub fn tracked_ids(&self) -> Vec<RegionId> {
        self.resolver()
            .tracked_regions()
            .filter(|id| self.regions.contains_key(id))
            .collect()
    }

    /// Place a horde at an absolute position; its target is reset to it
    pub fn place(&mut self, pos: CoarsePos, mut horde: HordeRecord) -> Result<(RegionId, usize)> {
        let (region, local) = self.resolver().resolve(pos)?;
        horde.position = local;
        horde.target = local;
        let idx = self.region_mut(region).hordes.insert(horde);
        Ok((region, idx))
    }

    /// Whether a horde in `pos`'s region or its tracked neighbors is within `radius`
    pub fn is_horde_near(&self, pos: CoarsePos, radius: i32) -> bool {
        self.resolver()
            .neighborhood(RegionId::containing(pos))
            .filter_map(|id| self.regions.get(&id))
            .any(|region| region.has_horde_near(pos, radius))
    }

    /// Number of hordes across tracked regions
    pub fn horde_count(&self) -> usize {
        self.tracked_ids()
            .iter()
            .filter_map(|id| self.regions.get(id))
            .map(|r| r.hordes.len())
            .sum()
    }

    /// Population summed across tracked regions
    pub fn total_population(&self) -> u32 {
        self.tracked_ids()
            .iter()
            .filter_map(|id| self.regions.get(id))
            .map(|r| r.hordes.total_population())
            .sum()
    }

    /// Every tracked horde with its absolute position
    pub fn hordes(&self) -> Vec<(CoarsePos, &HordeRecord)> {
        self.tracked_ids()
            .iter()
            .filter_map(|id| self.regions.get(id))
            .flat_map(|r| r.hordes.iter().map(move |h| (h.position.to_absolute(r.id), h)))
            .collect()
    }
}
