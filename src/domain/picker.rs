//! Map a pointer ray to the lattice position it points at.
//!
//! The lattice is centred on the world origin, so with side N and cell size
//! s it spans `[-N*s/2, N*s/2]` on every axis. The ray is clipped against
//! that box with the slab method and then marched in small fixed steps;
//! the first sample that lands in bounds and inside the visible layer
//! window wins.

use macroquad::math::Vec3;

use super::Coordinate;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit direction, or zero for a degenerate ray
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Ray from `origin` through `target`
    pub fn towards(origin: Vec3, target: Vec3) -> Self {
        Self::new(origin, target - origin)
    }

    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Which horizontal layers (y values) are currently pickable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerWindow {
    /// Only `y == layer`
    Single(i32),
    /// Every layer from 0 up to and including `layer`
    UpTo(i32),
}

impl LayerWindow {
    pub const fn contains(self, y: i32) -> bool {
        match self {
            LayerWindow::Single(layer) => y == layer,
            LayerWindow::UpTo(layer) => y >= 0 && y <= layer,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellPicker {
    /// World size of one lattice cell
    pub cell_size: f32,
    /// March step in grid units
    pub step: f32,
    /// Direction components smaller than this count as parallel
    pub epsilon: f32,
}

impl Default for CellPicker {
    fn default() -> Self {
        Self {
            cell_size: 1.0,
            step: 0.1,
            epsilon: 1e-4,
        }
    }
}

impl CellPicker {
    pub fn new(cell_size: f32, step: f32) -> Self {
        Self {
            cell_size,
            step,
            ..Default::default()
        }
    }

    /// World-space bounding box of a lattice of side `bound`
    pub fn bounds(&self, bound: i32) -> (Vec3, Vec3) {
        let half = bound as f32 * self.cell_size / 2.0;
        (Vec3::splat(-half), Vec3::splat(half))
    }

    /// World-space centre of a lattice cell
    pub fn cell_center(&self, position: Coordinate, bound: i32) -> Vec3 {
        let (min, _) = self.bounds(bound);
        let local = Vec3::new(position.x as f32, position.y as f32, position.z as f32) + 0.5;
        min + local * self.cell_size
    }

    /// Lattice position containing a world point, not bounds-checked
    pub fn world_to_cell(&self, point: Vec3, bound: i32) -> Coordinate {
        let (min, _) = self.bounds(bound);
        let local = ((point - min) / self.cell_size).floor();
        Coordinate::new(local.x as i32, local.y as i32, local.z as i32)
    }

    /// Entry and exit distances of the ray through the box, if it hits.
    /// A direction component below `epsilon` on any axis is a miss.
    pub fn slab_intersection(&self, ray: &Ray, min: Vec3, max: Vec3) -> Option<(f32, f32)> {
        let mut t_near = f32::NEG_INFINITY;
        let mut t_far = f32::INFINITY;

        for axis in 0..3 {
            let direction = ray.direction[axis];
            if direction.abs() < self.epsilon {
                return None;
            }
            let t1 = (min[axis] - ray.origin[axis]) / direction;
            let t2 = (max[axis] - ray.origin[axis]) / direction;
            t_near = t_near.max(t1.min(t2));
            t_far = t_far.min(t1.max(t2));
        }

        (t_near <= t_far && t_far >= 0.0).then_some((t_near, t_far))
    }

    /// First in-bounds, in-window lattice position along the ray
    pub fn resolve(&self, ray: &Ray, bound: i32, window: LayerWindow) -> Option<Coordinate> {
        if bound <= 0 {
            return None;
        }
        let (min, max) = self.bounds(bound);
        let (t_near, t_far) = self.slab_intersection(ray, min, max)?;

        let step = (self.step * self.cell_size).max(1e-3);
        let mut t = t_near.max(0.0);
        while t <= t_far {
            let position = self.world_to_cell(ray.point_at(t), bound);
            if position.within(bound) && window.contains(position.y) {
                return Some(position);
            }
            t += step;
        }
        None
    }
}
