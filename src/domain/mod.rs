mod coordinate;
mod cell;
mod lattice;
mod rules;
mod algorithm;
pub mod error;
pub mod generation;
pub mod patterns;
pub mod pool;
pub mod picker;

pub use coordinate::{Coordinate, NEIGHBOR_OFFSETS};
pub use cell::{Cell, Marker};
pub use lattice::LatticeStore;
pub use rules::{RulePreset, ThresholdRule};
pub use algorithm::Algorithm;
pub use error::{PoolError, PoolResult};
pub use generation::Generation;
pub use patterns::{Pattern, presets};
pub use pool::{PoolSizing, Proxy, ProxyHandle, ProxyPool};
pub use picker::{CellPicker, LayerWindow, Ray};

#[cfg(test)]
pub(crate) use lattice::assert_sparsity_invariant;
