/// Integer lattice position. Validity is always relative to a lattice bound.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

/// The 26 Chebyshev offsets around a coordinate, in lexicographic order.
pub const NEIGHBOR_OFFSETS: [(i32, i32, i32); 26] = build_offsets();

const fn build_offsets() -> [(i32, i32, i32); 26] {
    let mut offsets = [(0, 0, 0); 26];
    let mut i = 0;
    let mut dx = -1;
    while dx <= 1 {
        let mut dy = -1;
        while dy <= 1 {
            let mut dz = -1;
            while dz <= 1 {
                if dx != 0 || dy != 0 || dz != 0 {
                    offsets[i] = (dx, dy, dz);
                    i += 1;
                }
                dz += 1;
            }
            dy += 1;
        }
        dx += 1;
    }
    offsets
}

impl Coordinate {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Shifted coordinate, saturating at the `i32` range
    pub const fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self::new(
            self.x.saturating_add(dx),
            self.y.saturating_add(dy),
            self.z.saturating_add(dz),
        )
    }

    /// Shifted coordinate, or `None` if any axis leaves the `i32` range
    pub const fn checked_offset(self, dx: i32, dy: i32, dz: i32) -> Option<Self> {
        match (
            self.x.checked_add(dx),
            self.y.checked_add(dy),
            self.z.checked_add(dz),
        ) {
            (Some(x), Some(y), Some(z)) => Some(Self::new(x, y, z)),
            _ => None,
        }
    }

    /// True if every axis lies in `[0, bound)`
    pub const fn within(self, bound: i32) -> bool {
        self.x >= 0 && self.x < bound
            && self.y >= 0 && self.y < bound
            && self.z >= 0 && self.z < bound
    }

    /// The 26-neighborhood, with no bounds filtering.
    /// Neighbors past the edge of the `i32` range are skipped.
    pub fn neighbors(self) -> impl Iterator<Item = Coordinate> {
        NEIGHBOR_OFFSETS
            .iter()
            .filter_map(move |&(dx, dy, dz)| self.checked_offset(dx, dy, dz))
    }
}

impl From<(i32, i32, i32)> for Coordinate {
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        Self::new(x, y, z)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_offsets_are_unique_and_exclude_origin() {
        let unique: HashSet<_> = NEIGHBOR_OFFSETS.iter().collect();
        assert_eq!(unique.len(), 26);
        assert!(!unique.contains(&(0, 0, 0)));
        assert!(NEIGHBOR_OFFSETS.iter().all(|&(x, y, z)| x.abs() <= 1 && y.abs() <= 1 && z.abs() <= 1));
    }

    #[test]
    fn test_within_bounds() {
        assert!(Coordinate::new(0, 0, 0).within(3));
        assert!(Coordinate::new(2, 2, 2).within(3));
        assert!(!Coordinate::new(3, 0, 0).within(3));
        assert!(!Coordinate::new(0, -1, 0).within(3));
        assert!(!Coordinate::new(0, 0, 0).within(0));
    }

    #[test]
    fn test_neighbors_of_corner() {
        let in_bounds = Coordinate::new(0, 0, 0)
            .neighbors()
            .filter(|c| c.within(3))
            .count();
        assert_eq!(in_bounds, 7);
    }

    #[test]
    fn test_neighbors_at_i32_edge() {
        assert_eq!(Coordinate::new(i32::MAX, 0, 0).neighbors().count(), 17);
        assert_eq!(Coordinate::new(i32::MIN, i32::MIN, i32::MIN).neighbors().count(), 7);
        assert_eq!(
            Coordinate::new(i32::MAX, 0, 0).offset(1, 0, 0),
            Coordinate::new(i32::MAX, 0, 0)
        );
    }
}
