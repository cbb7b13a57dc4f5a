//! HordeRegistry - the hordes one coarse region owns

use serde::{Deserialize, Serialize};

use crate::aggregate::record::HordeRecord;
use crate::core::types::LocalPos;

/// Ordered list of hordes
///
/// Order carries no meaning of its own, but sweeps rely on it staying put
/// while they run: merges always fold a record into an earlier index.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HordeRegistry {
    hordes: Vec<HordeRecord>,
}

impl HordeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.hordes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hordes.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&HordeRecord> {
        self.hordes.get(idx)
    }

    pub fn get_mut(&mut self, idx: usize) -> Option<&mut HordeRecord> {
        self.hordes.get_mut(idx)
    }

    pub fn iter(&self) -> impl Iterator<Item = &HordeRecord> {
        self.hordes.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut HordeRecord> {
        self.hordes.iter_mut()
    }

    /// Append a horde, returning its index
    pub fn insert(&mut self, horde: HordeRecord) -> usize {
        self.hordes.push(horde);
        self.hordes.len() - 1
    }

    /// Take a horde out, shifting later ones down by one
    pub fn remove_at(&mut self, idx: usize) -> HordeRecord {
        self.hordes.remove(idx)
    }

    /// Two hordes at once, mutably; `None` unless `a < b` and both exist
    pub fn pair_mut(&mut self, a: usize, b: usize) -> Option<(&mut HordeRecord, &mut HordeRecord)> {
        if a >= b || b >= self.hordes.len() {
            return None;
        }
        let (head, tail) = self.hordes.split_at_mut(b);
        Some((&mut head[a], &mut tail[0]))
    }

    /// First horde within `radius` (Chebyshev) of `pos` matching `accept`
    pub fn find_near(
        &self,
        pos: LocalPos,
        radius: i32,
        accept: impl Fn(&HordeRecord) -> bool,
    ) -> Option<usize> {
        self.hordes
            .iter()
            .position(|h| h.position.chebyshev(&pos) <= radius && accept(h))
    }

    pub fn any_within(&self, pos: LocalPos, radius: i32) -> bool {
        self.find_near(pos, radius, |_| true).is_some()
    }

    pub fn total_population(&self) -> u32 {
        self.hordes.iter().map(|h| h.population()).sum()
    }
}
