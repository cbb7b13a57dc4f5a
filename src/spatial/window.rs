//! The loaded window: the square of coarse tiles simulated cell by cell

use serde::{Deserialize, Serialize};

use crate::core::types::{CoarsePos, LocalCell, LOADED_SPAN, SUBMAP_SIZE, SURFACE_Z};

/// Bounded window of coarse tiles currently materialized at fine resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadedWindow {
    /// Absolute coarse coordinate of the top-left tile
    pub origin: CoarsePos,
    /// Coarse tiles along each edge
    pub span: i32,
    /// z-level being simulated
    pub z: i32,
}

impl LoadedWindow {
    pub fn new(origin: CoarsePos, z: i32) -> Self {
        Self {
            origin,
            span: LOADED_SPAN,
            z,
        }
    }

    /// Surface window with the observer on its center tile
    pub fn centered_on(observer: CoarsePos) -> Self {
        Self::new(observer.offset(-LOADED_SPAN / 2, -LOADED_SPAN / 2), SURFACE_Z)
    }

    /// Coarse tile the observer stands on
    pub fn center(&self) -> CoarsePos {
        self.origin.offset(self.span / 2, self.span / 2)
    }

    pub fn on_surface(&self) -> bool {
        self.z == SURFACE_Z
    }

    #[inline]
    pub fn contains(&self, pos: CoarsePos) -> bool {
        pos.x >= self.origin.x
            && pos.x < self.origin.x + self.span
            && pos.y >= self.origin.y
            && pos.y < self.origin.y + self.span
    }

    /// Coarse tile a fine cell belongs to
    ///
    /// Cells outside the window (negative or past the far edge) map to the
    /// neighboring tiles, which is what a creature stepping off the edge needs.
    #[inline]
    pub fn cell_to_coarse(&self, cell: LocalCell) -> CoarsePos {
        self.origin.offset(
            cell.x.div_euclid(SUBMAP_SIZE),
            cell.y.div_euclid(SUBMAP_SIZE),
        )
    }

    /// Top-left fine cell of a coarse tile
    #[inline]
    pub fn coarse_to_cell(&self, pos: CoarsePos) -> LocalCell {
        LocalCell::new(
            (pos.x - self.origin.x) * SUBMAP_SIZE,
            (pos.y - self.origin.y) * SUBMAP_SIZE,
        )
    }

    /// Edge length of the window in fine cells
    pub fn cell_span(&self) -> i32 {
        self.span * SUBMAP_SIZE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_window() {
        let window = LoadedWindow::centered_on(CoarsePos::new(100, 100));
        assert_eq!(window.origin, CoarsePos::new(95, 95));
        assert_eq!(window.center(), CoarsePos::new(100, 100));
        assert!(window.contains(CoarsePos::new(95, 105)));
        assert!(!window.contains(CoarsePos::new(106, 100)));
        assert!(!window.contains(CoarsePos::new(94, 100)));
    }

    #[test]
    fn test_cell_conversion() {
        let window = LoadedWindow::new(CoarsePos::new(10, 20), SURFACE_Z);
        assert_eq!(window.cell_to_coarse(LocalCell::new(0, 0)), CoarsePos::new(10, 20));
        assert_eq!(window.cell_to_coarse(LocalCell::new(25, 11)), CoarsePos::new(12, 20));
        assert_eq!(window.cell_to_coarse(LocalCell::new(-1, 132)), CoarsePos::new(9, 31));
        assert_eq!(window.coarse_to_cell(CoarsePos::new(12, 21)), LocalCell::new(24, 12));
    }
}
