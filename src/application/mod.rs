pub mod camera;
pub mod config;
pub mod game_state;
pub mod layers;
pub mod proxy;
pub mod scheduler;
pub mod stats;

pub use camera::Camera;
pub use config::{LatticeConfig, PickingConfig, SchedulerConfig, SimulationConfig, LATTICE_SIZES};
pub use game_state::GameState;
pub use layers::{LayerMode, LayerView};
pub use proxy::CellProxy;
pub use scheduler::{GenerationScheduler, RunState, SchedulerEvent};
pub use stats::SimulationStats;
