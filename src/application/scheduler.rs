use std::collections::VecDeque;

use log::{debug, info};

use crate::application::config::SchedulerConfig;
use crate::domain::{generation, Algorithm, Generation, LatticeStore, ThresholdRule};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Idle,
    Running,
}

/// Notifications queued by the scheduler and drained once per frame
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SchedulerEvent {
    /// Exactly one per committed generation
    CycleComplete {
        generation: u64,
        alive: usize,
        born: usize,
        died: usize,
    },
    RunStateChanged(RunState),
}

/// Fixed-interval generation stepper.
/// Leftover time after a step is dropped, so a stall never causes a burst
/// of catch-up generations.
pub struct GenerationScheduler {
    state: RunState,
    interval: f32,
    min_interval: f32,
    max_interval: f32,
    accumulator: f32,
    generation: u64,
    algorithm: Algorithm,
    last_step_ms: f32,
    events: VecDeque<SchedulerEvent>,
}

impl GenerationScheduler {
    pub fn new(config: &SchedulerConfig) -> Self {
        let mut scheduler = Self {
            state: RunState::Idle,
            interval: config.interval,
            min_interval: config.min_interval,
            max_interval: config.max_interval,
            accumulator: 0.0,
            generation: 0,
            algorithm: config.algorithm,
            last_step_ms: 0.0,
            events: VecDeque::new(),
        };
        scheduler.set_interval(config.interval);
        scheduler
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    pub fn set_running(&mut self, running: bool) {
        let state = if running { RunState::Running } else { RunState::Idle };
        if state == self.state {
            return;
        }
        self.state = state;
        self.accumulator = 0.0;
        self.events.push_back(SchedulerEvent::RunStateChanged(state));
        info!("{}", if running { "Simulation resumed" } else { "Simulation paused" });
    }

    pub fn toggle(&mut self) {
        self.set_running(!self.is_running());
    }

    pub fn interval(&self) -> f32 {
        self.interval
    }

    /// Set seconds between generations, clamped to the configured range.
    /// Returns whether the interval actually changed.
    pub fn set_interval(&mut self, interval: f32) -> bool {
        if interval.is_nan() {
            return false;
        }
        let old = self.interval;
        self.interval = interval.clamp(self.min_interval, self.max_interval);
        if old == self.interval {
            return false;
        }
        debug!("Interval changed - old: {:.2}s, new: {:.2}s", old, self.interval);
        true
    }

    pub fn adjust_interval(&mut self, delta: f32) -> bool {
        self.set_interval(self.interval + delta)
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn set_algorithm(&mut self, algorithm: Algorithm) {
        self.algorithm = algorithm;
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Wall time of the most recent step in milliseconds
    pub fn last_step_ms(&self) -> f32 {
        self.last_step_ms
    }

    /// Advance the clock; runs one generation once the interval has elapsed
    pub fn tick(
        &mut self,
        delta_time: f32,
        lattice: &mut LatticeStore,
        rule: &ThresholdRule,
    ) -> Option<Generation> {
        if !self.is_running() {
            return None;
        }

        self.accumulator += delta_time;
        if self.accumulator < self.interval {
            return None;
        }

        self.accumulator = 0.0;
        Some(self.step(lattice, rule))
    }

    /// Run exactly one generation, regardless of run state
    pub fn step(&mut self, lattice: &mut LatticeStore, rule: &ThresholdRule) -> Generation {
        let start = std::time::Instant::now();
        let changes = generation::advance(lattice, rule, self.algorithm);
        self.last_step_ms = start.elapsed().as_secs_f32() * 1000.0;
        self.generation += 1;

        debug!(
            "Generation {} - born: {}, died: {}, alive: {}, {:.2}ms",
            self.generation,
            changes.born.len(),
            changes.died.len(),
            lattice.alive_count(),
            self.last_step_ms
        );

        self.events.push_back(SchedulerEvent::CycleComplete {
            generation: self.generation,
            alive: lattice.alive_count(),
            born: changes.born.len(),
            died: changes.died.len(),
        });
        changes
    }

    /// Take every queued event, oldest first
    pub fn drain_events(&mut self) -> Vec<SchedulerEvent> {
        self.events.drain(..).collect()
    }

    /// Back to generation zero, paused
    pub fn reset(&mut self) {
        self.set_running(false);
        self.generation = 0;
        self.accumulator = 0.0;
        self.last_step_ms = 0.0;
    }
}
