//! Tunable parameters for the simulation and its collaborators.

use crate::domain::{Algorithm, CellPicker, RulePreset};

/// Master configuration
#[derive(Clone, Debug, Default)]
pub struct SimulationConfig {
    pub lattice: LatticeConfig,
    pub scheduler: SchedulerConfig,
    pub picking: PickingConfig,
}

#[derive(Clone, Debug)]
pub struct LatticeConfig {
    /// Side of the lattice at start-up
    pub initial_bound: i32,
    pub min_bound: i32,
    pub max_bound: i32,
    /// World size of one cell
    pub cell_size: f32,
    /// Chance of a cell being alive when randomizing
    pub random_density: f64,
    pub rule: RulePreset,
}

impl Default for LatticeConfig {
    fn default() -> Self {
        Self {
            initial_bound: 10,
            min_bound: 5,
            max_bound: 50,
            cell_size: 1.0,
            random_density: 0.2,
            rule: RulePreset::default(),
        }
    }
}

impl LatticeConfig {
    pub fn clamp_bound(&self, bound: i32) -> i32 {
        bound.clamp(self.min_bound, self.max_bound)
    }
}

#[derive(Clone, Debug)]
pub struct SchedulerConfig {
    /// Seconds between generations
    pub interval: f32,
    pub min_interval: f32,
    pub max_interval: f32,
    /// Interval change per speed up / slow down
    pub speed_step: f32,
    pub algorithm: Algorithm,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            interval: 1.0,
            min_interval: 0.1,
            max_interval: 10.0,
            speed_step: 0.1,
            algorithm: Algorithm::default(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct PickingConfig {
    /// March step in grid units
    pub step: f32,
    /// Minimum seconds between two highlight updates
    pub throttle: f64,
    /// Direction components below this are treated as parallel
    pub epsilon: f32,
}

impl Default for PickingConfig {
    fn default() -> Self {
        Self {
            step: 0.1,
            throttle: 0.05,
            epsilon: 1e-4,
        }
    }
}

impl SimulationConfig {
    pub fn picker(&self) -> CellPicker {
        CellPicker {
            cell_size: self.lattice.cell_size,
            step: self.picking.step,
            epsilon: self.picking.epsilon,
        }
    }
}

/// Lattice sides offered by the size selector
pub const LATTICE_SIZES: &[i32] = &[5, 10, 15, 20, 30, 40, 50];
