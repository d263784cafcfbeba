//! One generation step over a sparse lattice.
//!
//! Every tracked position is evaluated against the lattice as it stood when
//! the step began; transitions are committed only after all evaluations
//! are done, so no cell sees a neighbor's change from the same tick.

use rayon::prelude::*;

use super::{Algorithm, Cell, Coordinate, LatticeStore, Marker, ThresholdRule};

/// Positions that changed state during one step, each sorted ascending.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Generation {
    pub born: Vec<Coordinate>,
    pub died: Vec<Coordinate>,
}

impl Generation {
    pub fn is_unchanged(&self) -> bool {
        self.born.is_empty() && self.died.is_empty()
    }
}

fn transition(
    lattice: &LatticeStore,
    rule: &ThresholdRule,
    position: Coordinate,
    marker: Marker,
) -> Option<(Coordinate, Cell)> {
    let neighbors = lattice.count_alive_neighbors(position);
    let next = rule.next_state(marker, neighbors);
    (next != marker.as_cell()).then_some((position, next))
}

/// Compute the transitions for the current lattice without touching it
pub fn evaluate(lattice: &LatticeStore, rule: &ThresholdRule, algorithm: Algorithm) -> Generation {
    let snapshot = lattice.tracked_cells();

    let changes: Vec<(Coordinate, Cell)> = match algorithm {
        Algorithm::Serial => snapshot
            .iter()
            .filter_map(|&(position, marker)| transition(lattice, rule, position, marker))
            .collect(),
        Algorithm::Parallel => snapshot
            .par_iter()
            .filter_map(|&(position, marker)| transition(lattice, rule, position, marker))
            .collect(),
    };

    let (mut born, mut died): (Vec<_>, Vec<_>) = changes
        .into_iter()
        .partition(|(_, next)| next.is_alive());

    born.sort_unstable_by_key(|(c, _)| *c);
    died.sort_unstable_by_key(|(c, _)| *c);

    Generation {
        born: born.into_iter().map(|(c, _)| c).collect(),
        died: died.into_iter().map(|(c, _)| c).collect(),
    }
}

/// Apply evaluated transitions to the lattice
pub fn commit(lattice: &mut LatticeStore, generation: &Generation) {
    for &position in &generation.died {
        lattice.remove_cell(position);
    }
    for &position in &generation.born {
        lattice.set_alive(position);
    }
}

/// Evaluate and commit in one call
pub fn advance(lattice: &mut LatticeStore, rule: &ThresholdRule, algorithm: Algorithm) -> Generation {
    let generation = evaluate(lattice, rule, algorithm);
    commit(lattice, &generation);
    generation
}
