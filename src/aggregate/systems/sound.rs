//! Sound attraction: loud noises pull hordes toward their source

use crate::aggregate::record::HordeRecord;
use crate::core::types::{LocalPos, SUBMAP_SIZE};

/// Coarse tiles a sound of `volume` carries
///
/// Volume is measured in fine cells, so anything quieter than one coarse
/// tile reaches no horde at all.
pub fn effective_range(volume: i32) -> i32 {
    if volume < SUBMAP_SIZE {
        return 0;
    }
    volume / SUBMAP_SIZE
}

/// Point a horde at a sound, replacing whatever target it had
///
/// `origin` must be in the horde's region frame. Returns true if the horde
/// heard it.
pub fn attract(horde: &mut HordeRecord, origin: LocalPos, range: i32) -> bool {
    if range <= 0 || horde.position.z != origin.z {
        return false;
    }
    let dist = horde.position.chebyshev(&origin);
    if dist > range || dist == 0 {
        return false;
    }
    horde.target = origin;
    horde.wander_timer = range as u32;
    true
}
