// Domain layer - lattice, rules, pool and picking
pub mod domain;

// Application layer - Use cases and coordination
pub mod application;

// Infrastructure layer - UI, rendering, input
pub mod ui;
pub mod rendering;
pub mod input;

// Re-exports for convenience
pub use domain::{Algorithm, Coordinate, LatticeStore, Pattern, RulePreset, presets};
pub use application::{Camera, GameState, SimulationConfig};
pub use ui::Button;
