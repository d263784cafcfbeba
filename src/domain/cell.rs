/// Outcome of evaluating a lattice position for the next generation.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Cell {
    Dead,
    Alive,
}

impl Cell {
    /// Check if the cell is currently alive
    pub const fn is_alive(self) -> bool {
        matches!(self, Cell::Alive)
    }
}

/// What the lattice stores for a tracked position.
/// Untracked positions are dead; there is no stored `Dead` marker.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Marker {
    Alive,
    /// Dead, but adjacent to at least one living cell
    ActiveZone,
}

impl Marker {
    pub const fn is_alive(self) -> bool {
        matches!(self, Marker::Alive)
    }

    /// The rule-level state this marker stands for
    pub const fn as_cell(self) -> Cell {
        match self {
            Marker::Alive => Cell::Alive,
            Marker::ActiveZone => Cell::Dead,
        }
    }
}
