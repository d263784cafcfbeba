use rand::Rng;

use super::{Coordinate, LatticeStore};

/// Represents a 3D pattern that can be placed on the lattice
#[derive(Clone, Debug)]
pub struct Pattern {
    pub name: &'static str,
    pub description: &'static str,
    /// Extent on each axis
    pub size: (i32, i32, i32),
    pub cells: Vec<(i32, i32, i32)>, // Relative coordinates of alive cells
}

impl Pattern {
    /// Create a new pattern from alive cell coordinates
    pub fn new(name: &'static str, description: &'static str, cells: Vec<(i32, i32, i32)>) -> Self {
        let extent = |axis: fn(&(i32, i32, i32)) -> i32| cells.iter().map(axis).max().unwrap_or(0) + 1;
        let size = (extent(|c| c.0), extent(|c| c.1), extent(|c| c.2));
        Self { name, description, size, cells }
    }

    /// Absolute positions of the pattern's cells with its middle on `center`
    pub fn positions_around(&self, center: Coordinate) -> impl Iterator<Item = Coordinate> + '_ {
        let origin = center.offset(-self.size.0 / 2, -self.size.1 / 2, -self.size.2 / 2);
        self.cells
            .iter()
            .map(move |&(dx, dy, dz)| origin.offset(dx, dy, dz))
    }

    /// Place pattern so that its middle lands on `center`.
    /// Cells falling outside the lattice are dropped.
    pub fn place_centered(&self, lattice: &mut LatticeStore, center: Coordinate) {
        for position in self.positions_around(center) {
            lattice.set_alive(position);
        }
    }
}

/// Make every in-bounds position alive with probability `density`
pub fn seed_random<R: Rng + ?Sized>(lattice: &mut LatticeStore, density: f64, rng: &mut R) {
    if density.is_nan() {
        return;
    }
    let density = density.clamp(0.0, 1.0);
    let n = lattice.bound();

    for x in 0..n {
        for y in 0..n {
            for z in 0..n {
                if rng.random_bool(density) {
                    lattice.set_alive(Coordinate::new(x, y, z));
                }
            }
        }
    }
}

/// 3D seed patterns
pub mod presets {
    use super::*;

    /// 2x2x2 block, still life under 5766
    pub fn cube() -> Pattern {
        Pattern::new(
            "Cube",
            "2x2x2 block",
            vec![
                (0, 0, 0), (1, 0, 0), (0, 1, 0), (1, 1, 0),
                (0, 0, 1), (1, 0, 1), (0, 1, 1), (1, 1, 1),
            ],
        )
    }

    /// Three-axis cross around an empty center
    pub fn cross() -> Pattern {
        Pattern::new(
            "Cross",
            "Six arms around a hole",
            vec![
                (0, 1, 1), (2, 1, 1),
                (1, 0, 1), (1, 2, 1),
                (1, 1, 0), (1, 1, 2),
            ],
        )
    }

    /// Flat 3x3 slab, one layer thick
    pub fn slab() -> Pattern {
        Pattern::new(
            "Slab",
            "3x3 plate",
            (0..3).flat_map(|x| (0..3).map(move |z| (x, 0, z))).collect(),
        )
    }

    /// Two stacked bars, a common 4555 seed
    pub fn bars() -> Pattern {
        Pattern::new(
            "Bars",
            "Two parallel 3-bars",
            vec![
                (0, 0, 0), (1, 0, 0), (2, 0, 0),
                (0, 1, 1), (1, 1, 1), (2, 1, 1),
            ],
        )
    }

    pub fn all_patterns() -> Vec<Pattern> {
        vec![cube(), cross(), slab(), bars()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_pattern_size() {
        assert_eq!(presets::cube().size, (2, 2, 2));
        assert_eq!(presets::slab().size, (3, 1, 3));
        assert_eq!(presets::cross().size, (3, 3, 3));
    }

    #[test]
    fn test_place_centered() {
        let mut lattice = LatticeStore::new(6);
        presets::cross().place_centered(&mut lattice, Coordinate::new(3, 3, 3));

        assert_eq!(lattice.alive_count(), 6);
        assert!(lattice.is_alive(Coordinate::new(2, 3, 3)));
        assert!(lattice.is_alive(Coordinate::new(4, 3, 3)));
        assert!(!lattice.is_alive(Coordinate::new(3, 3, 3)));
    }

    #[test]
    fn test_place_clips_to_bounds() {
        let mut lattice = LatticeStore::new(3);
        presets::cube().place_centered(&mut lattice, Coordinate::new(3, 3, 3));

        assert_eq!(lattice.alive_count(), 1);
        assert!(lattice.is_alive(Coordinate::new(2, 2, 2)));
    }

    #[test]
    fn test_seed_random_is_reproducible() {
        let mut a = LatticeStore::new(8);
        let mut b = LatticeStore::new(8);
        seed_random(&mut a, 0.25, &mut StdRng::seed_from_u64(11));
        seed_random(&mut b, 0.25, &mut StdRng::seed_from_u64(11));

        let mut cells_a: Vec<_> = a.alive_cells().collect();
        let mut cells_b: Vec<_> = b.alive_cells().collect();
        cells_a.sort();
        cells_b.sort();
        assert_eq!(cells_a, cells_b);
        assert!(a.alive_count() > 0 && a.alive_count() < a.volume());
    }

    #[test]
    fn test_seed_random_extremes() {
        let mut empty = LatticeStore::new(4);
        seed_random(&mut empty, 0.0, &mut StdRng::seed_from_u64(1));
        assert!(empty.is_empty());

        let mut full = LatticeStore::new(4);
        seed_random(&mut full, 1.5, &mut StdRng::seed_from_u64(1));
        assert_eq!(full.alive_count(), 64);
    }
}
