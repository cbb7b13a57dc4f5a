//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Game tick counter (one tick per turn)
pub type Tick = u64;

/// Fine-grained cells along one edge of the area a single coarse tile covers
pub const SUBMAP_SIZE: i32 = 12;

/// Most creatures one coarse tile can hold once materialized
pub const TILE_CAPACITY: u32 = (SUBMAP_SIZE * SUBMAP_SIZE) as u32;

/// Coarse tiles along one edge of a coarse region
pub const REGION_SIZE: i32 = 360;

/// The only z-level hordes live on
pub const SURFACE_Z: i32 = 0;

/// Coarse tiles along one edge of the loaded (fine-grained) window
pub const LOADED_SPAN: i32 = 11;

/// Absolute coarse coordinate, unbounded across regions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CoarsePos {
    pub x: i32,
    pub y: i32,
}

impl CoarsePos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Steps needed to walk between two tiles when diagonals count as one
    pub fn chebyshev(&self, other: &CoarsePos) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }

    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Coordinate inside one region's frame
///
/// `x`/`y` are normally in `[0, REGION_SIZE)`, but a target or a freshly
/// stepped position may sit outside until the record migrates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocalPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl LocalPos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y, z: SURFACE_Z }
    }

    pub fn in_bounds(&self) -> bool {
        (0..REGION_SIZE).contains(&self.x) && (0..REGION_SIZE).contains(&self.y)
    }

    pub fn to_absolute(&self, region: RegionId) -> CoarsePos {
        let origin = region.origin();
        CoarsePos::new(origin.x + self.x, origin.y + self.y)
    }

    pub fn chebyshev(&self, other: &LocalPos) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }
}

/// Identifier of a coarse region (region grid coordinates)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RegionId {
    pub x: i32,
    pub y: i32,
}

impl RegionId {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Region that owns an absolute coarse coordinate
    pub fn containing(pos: CoarsePos) -> Self {
        Self::new(pos.x.div_euclid(REGION_SIZE), pos.y.div_euclid(REGION_SIZE))
    }

    /// Absolute coordinate of the region's local `(0, 0)`
    pub fn origin(&self) -> CoarsePos {
        CoarsePos::new(self.x * REGION_SIZE, self.y * REGION_SIZE)
    }

    /// Rewrite an absolute coordinate into this region's frame
    pub fn to_local(&self, pos: CoarsePos) -> LocalPos {
        let origin = self.origin();
        LocalPos::new(pos.x - origin.x, pos.y - origin.y)
    }

    /// Chebyshev distance in region steps
    pub fn ring_distance(&self, other: &RegionId) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }
}

/// Fine-grained cell relative to the loaded window's top-left corner
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocalCell {
    pub x: i32,
    pub y: i32,
}

impl LocalCell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Identifier of a creature-type distribution ("monster group")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupId(pub String);

impl GroupId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for GroupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Concrete creature type id
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CreatureKind(pub String);

impl CreatureKind {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for CreatureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_containing_negative_coords() {
        assert_eq!(RegionId::containing(CoarsePos::new(0, 0)), RegionId::new(0, 0));
        assert_eq!(RegionId::containing(CoarsePos::new(359, 359)), RegionId::new(0, 0));
        assert_eq!(RegionId::containing(CoarsePos::new(360, 0)), RegionId::new(1, 0));
        assert_eq!(RegionId::containing(CoarsePos::new(-1, -360)), RegionId::new(-1, -1));
        assert_eq!(RegionId::containing(CoarsePos::new(-361, 5)), RegionId::new(-2, 0));
    }

    #[test]
    fn test_local_absolute_translation() {
        let region = RegionId::new(-1, 2);
        let abs = CoarsePos::new(-5, 725);
        let local = region.to_local(abs);
        assert_eq!(local, LocalPos::new(355, 5));
        assert!(local.in_bounds());
        assert_eq!(local.to_absolute(region), abs);
    }

    #[test]
    fn test_chebyshev_distance() {
        let a = CoarsePos::new(0, 0);
        assert_eq!(a.chebyshev(&CoarsePos::new(3, -7)), 7);
        assert_eq!(a.chebyshev(&a), 0);
    }

    #[test]
    fn test_tile_capacity() {
        assert_eq!(TILE_CAPACITY, 144);
    }
}
