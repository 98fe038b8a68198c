//! Per-prim dirty bit bookkeeping

use super::dirty::DirtyBits;
use super::path::PrimPath;
use std::collections::HashMap;

/// Tracks which categories of each prim changed since its last sync
#[derive(Debug, Clone, Default)]
pub struct ChangeTracker {
    bits: HashMap<PrimPath, DirtyBits>,
}

impl ChangeTracker {
    /// Create an empty tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking a prim with its initial dirty bits
    pub fn insert(&mut self, path: PrimPath, initial: DirtyBits) {
        self.bits.insert(path, initial);
    }

    /// Stop tracking a prim
    pub fn remove(&mut self, path: &PrimPath) {
        self.bits.remove(path);
    }

    /// Mark categories dirty; untracked prims are ignored
    pub fn mark_dirty(&mut self, path: &PrimPath, bits: DirtyBits) {
        match self.bits.get_mut(path) {
            Some(current) => *current |= bits,
            None => log::trace!("Ignoring dirty bits for untracked prim {}", path),
        }
    }

    /// Clear categories
    pub fn mark_clean(&mut self, path: &PrimPath, bits: DirtyBits) {
        if let Some(current) = self.bits.get_mut(path) {
            current.remove(bits);
        }
    }

    /// Current dirty bits of a prim
    pub fn dirty_bits(&self, path: &PrimPath) -> DirtyBits {
        self.bits.get(path).copied().unwrap_or(DirtyBits::CLEAN)
    }

    /// Overwrite the dirty bits of a tracked prim after it was synced
    pub fn set_dirty_bits(&mut self, path: &PrimPath, bits: DirtyBits) {
        if let Some(current) = self.bits.get_mut(path) {
            *current = bits;
        }
    }

    /// Prims with any light category dirty, in path order
    pub fn dirty_paths(&self) -> Vec<PrimPath> {
        let mut paths: Vec<PrimPath> = self
            .bits
            .iter()
            .filter(|(_, bits)| bits.is_light_dirty())
            .map(|(path, _)| path.clone())
            .collect();
        paths.sort();
        paths
    }
}
