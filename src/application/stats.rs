use super::scheduler::{RunState, SchedulerEvent};

/// Frame rate under which a frame counts as a drop
const TARGET_FPS: f32 = 60.0;

/// Counters shown in the side panel, fed from scheduler events
#[derive(Clone, Debug)]
pub struct SimulationStats {
    pub generation: u64,
    pub alive_cells: usize,
    pub total_cells: usize,
    /// Seconds spent running
    pub simulation_time: f32,
    pub fps: f32,
    pub min_fps: f32,
    pub max_fps: f32,
    pub drop_count: u32,
    pub paused: bool,
}

impl SimulationStats {
    pub fn new(total_cells: usize) -> Self {
        Self {
            generation: 0,
            alive_cells: 0,
            total_cells,
            simulation_time: 0.0,
            fps: 0.0,
            min_fps: f32::MAX,
            max_fps: 0.0,
            drop_count: 0,
            paused: true,
        }
    }

    /// Zero everything except the lattice volume
    pub fn reset(&mut self, total_cells: usize, alive_cells: usize) {
        *self = Self {
            alive_cells,
            ..Self::new(total_cells)
        };
    }

    pub fn dead_cells(&self) -> usize {
        self.total_cells.saturating_sub(self.alive_cells)
    }

    pub fn apply(&mut self, event: &SchedulerEvent) {
        match *event {
            SchedulerEvent::CycleComplete { generation, alive, .. } => {
                self.generation = generation;
                self.alive_cells = alive;
            }
            SchedulerEvent::RunStateChanged(state) => {
                self.paused = state == RunState::Idle;
            }
        }
    }

    /// Frame timing, only counted while the simulation runs
    pub fn record_frame(&mut self, delta_time: f32) {
        if self.paused || delta_time <= 0.0 {
            return;
        }
        self.simulation_time += delta_time;
        self.fps = 1.0 / delta_time;
        self.min_fps = self.min_fps.min(self.fps);
        self.max_fps = self.max_fps.max(self.fps);
        if self.fps < TARGET_FPS {
            self.drop_count += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_event_updates_counts() {
        let mut stats = SimulationStats::new(1000);
        stats.apply(&SchedulerEvent::CycleComplete { generation: 4, alive: 30, born: 2, died: 1 });

        assert_eq!(stats.generation, 4);
        assert_eq!(stats.alive_cells, 30);
        assert_eq!(stats.dead_cells(), 970);
    }

    #[test]
    fn test_frames_ignored_while_paused() {
        let mut stats = SimulationStats::new(8);
        stats.record_frame(0.1);
        assert_eq!(stats.simulation_time, 0.0);

        stats.apply(&SchedulerEvent::RunStateChanged(RunState::Running));
        stats.record_frame(0.5);
        stats.record_frame(0.01);

        assert!((stats.simulation_time - 0.51).abs() < 1e-5);
        assert_eq!(stats.drop_count, 1);
        assert!((stats.min_fps - 2.0).abs() < 1e-5);
        assert!((stats.max_fps - 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_reset_keeps_volume() {
        let mut stats = SimulationStats::new(125);
        stats.apply(&SchedulerEvent::CycleComplete { generation: 9, alive: 3, born: 0, died: 0 });
        stats.reset(1000, 0);

        assert_eq!(stats.generation, 0);
        assert_eq!(stats.total_cells, 1000);
        assert!(stats.paused);
    }
}
