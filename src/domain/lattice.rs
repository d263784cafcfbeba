//! Sparse storage for a cubic lattice.
//!
//! Only living cells and the dead cells touching them are stored. A lattice of
//! side N has N³ positions, but a generation only needs to look at positions
//! that are alive or could become alive, so the map stays O(alive + boundary).

use std::collections::HashMap;

use super::{Coordinate, Marker};

/// Sparse map from coordinate to marker, bounded to `[0, bound)` on every axis.
///
/// Invariant: every in-bounds, non-alive neighbor of an `Alive` entry is
/// stored as `ActiveZone`, and every `ActiveZone` entry touches at least one
/// `Alive` entry. `resize` is the one operation allowed to break this.
#[derive(Clone, Debug, Default)]
pub struct LatticeStore {
    bound: i32,
    cells: HashMap<Coordinate, Marker>,
    alive: usize,
}

impl LatticeStore {
    /// Create an empty lattice of side `bound`
    pub fn new(bound: i32) -> Self {
        Self {
            bound: bound.max(0),
            cells: HashMap::new(),
            alive: 0,
        }
    }

    pub const fn bound(&self) -> i32 {
        self.bound
    }

    /// Total number of positions in the lattice (N³)
    pub fn volume(&self) -> usize {
        let n = self.bound as usize;
        n.saturating_mul(n).saturating_mul(n)
    }

    pub fn contains(&self, position: Coordinate) -> bool {
        position.within(self.bound)
    }

    /// Mark a position alive and track its in-bounds neighbors.
    /// Out-of-bounds or already-alive positions are ignored.
    pub fn set_alive(&mut self, position: Coordinate) {
        if !self.contains(position) || self.is_alive(position) {
            return;
        }

        self.cells.insert(position, Marker::Alive);
        self.alive += 1;

        for neighbor in position.neighbors() {
            if self.contains(neighbor) {
                self.cells.entry(neighbor).or_insert(Marker::ActiveZone);
            }
        }
    }

    /// Drop a tracked position and prune the active zone around it.
    ///
    /// Each neighbor in the active zone is re-checked against its own 26
    /// neighbors and removed once nothing alive touches it. The removed
    /// position itself stays tracked as active zone while it still borders a
    /// living cell.
    pub fn remove_cell(&mut self, position: Coordinate) {
        let Some(marker) = self.cells.remove(&position) else {
            return;
        };
        if marker.is_alive() {
            self.alive -= 1;
        }

        for neighbor in position.neighbors() {
            if self.cells.get(&neighbor) == Some(&Marker::ActiveZone)
                && !self.borders_alive(neighbor)
            {
                self.cells.remove(&neighbor);
            }
        }

        if self.borders_alive(position) {
            self.cells.insert(position, Marker::ActiveZone);
        }
    }

    pub fn is_alive(&self, position: Coordinate) -> bool {
        self.contains(position) && self.cells.get(&position) == Some(&Marker::Alive)
    }

    /// Marker stored for a position, `None` meaning dead and untracked
    pub fn marker(&self, position: Coordinate) -> Option<Marker> {
        self.cells.get(&position).copied()
    }

    /// Count living cells among the 26 neighbors.
    /// The queried position itself may sit outside the bounds.
    pub fn count_alive_neighbors(&self, position: Coordinate) -> u8 {
        position
            .neighbors()
            .filter(|neighbor| self.cells.get(neighbor) == Some(&Marker::Alive))
            .count() as u8
    }

    fn borders_alive(&self, position: Coordinate) -> bool {
        position
            .neighbors()
            .any(|neighbor| self.cells.get(&neighbor) == Some(&Marker::Alive))
    }

    /// Copy of every tracked entry. Safe to hold while mutating the store.
    pub fn tracked_cells(&self) -> Vec<(Coordinate, Marker)> {
        self.cells.iter().map(|(&c, &m)| (c, m)).collect()
    }

    /// Borrowing iteration over tracked entries, in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (Coordinate, Marker)> + '_ {
        self.cells.iter().map(|(&c, &m)| (c, m))
    }

    pub fn alive_cells(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.iter()
            .filter(|(_, marker)| marker.is_alive())
            .map(|(c, _)| c)
    }

    pub const fn alive_count(&self) -> usize {
        self.alive
    }

    /// Number of tracked entries (alive + active zone)
    pub fn tracked_count(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn clear(&mut self) {
        self.cells.clear();
        self.alive = 0;
    }

    /// Change the bound and evict every entry that falls outside it.
    ///
    /// The active zone is not re-derived: alive cells left on a grown edge
    /// miss their new neighbors, and active entries whose only living
    /// neighbor was evicted stay behind.
    pub fn resize(&mut self, bound: i32) {
        self.bound = bound.max(0);
        let bound = self.bound;
        self.cells.retain(|position, _| position.within(bound));
        self.alive = self.cells.values().filter(|m| m.is_alive()).count();
    }
}

#[cfg(test)]
pub(crate) fn assert_sparsity_invariant(lattice: &LatticeStore) {
    for (position, marker) in lattice.iter() {
        assert!(lattice.contains(position), "{position} stored out of bounds");
        match marker {
            Marker::ActiveZone => assert!(
                lattice.borders_alive(position),
                "active zone {position} has no living neighbor"
            ),
            Marker::Alive => {
                for neighbor in position.neighbors().filter(|n| lattice.contains(*n)) {
                    assert!(
                        lattice.marker(neighbor).is_some(),
                        "neighbor {neighbor} of living {position} is untracked"
                    );
                }
            }
        }
    }
}
