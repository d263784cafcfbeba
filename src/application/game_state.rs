use std::collections::{BTreeSet, HashMap};

use log::{debug, info};
use rand::Rng;

use crate::application::config::SimulationConfig;
use crate::application::layers::LayerView;
use crate::application::proxy::CellProxy;
use crate::application::scheduler::GenerationScheduler;
use crate::application::stats::SimulationStats;
use crate::domain::{
    patterns, CellPicker, Coordinate, Generation, LatticeStore, Pattern, ProxyHandle, ProxyPool,
    Ray, RulePreset,
};

/// Game state - owns the lattice and everything that mirrors it on screen
pub struct GameState {
    pub config: SimulationConfig,
    pub lattice: LatticeStore,
    pub pool: ProxyPool<CellProxy>,
    pub scheduler: GenerationScheduler,
    pub rule: RulePreset,
    pub stats: SimulationStats,
    pub layers: LayerView,
    /// Cell currently under the cursor
    pub highlight: Option<Coordinate>,
    /// Pattern being placed (None = normal mode)
    pub pending_pattern_index: Option<usize>,
    pub last_render_time_ms: f32,
    picker: CellPicker,
    proxies: HashMap<Coordinate, ProxyHandle>,
    /// Alive cells still waiting for a proxy
    pending: BTreeSet<Coordinate>,
    last_pick: Option<f64>,
}

impl GameState {
    pub fn new(config: SimulationConfig) -> Self {
        let bound = config.lattice.clamp_bound(config.lattice.initial_bound);
        let lattice = LatticeStore::new(bound);
        let mut pool = ProxyPool::new();
        pool.initialize(bound);

        Self {
            scheduler: GenerationScheduler::new(&config.scheduler),
            rule: config.lattice.rule,
            stats: SimulationStats::new(lattice.volume()),
            layers: LayerView::default(),
            highlight: None,
            pending_pattern_index: None,
            last_render_time_ms: 0.0,
            picker: config.picker(),
            proxies: HashMap::new(),
            pending: BTreeSet::new(),
            last_pick: None,
            lattice,
            pool,
            config,
        }
    }

    pub fn bound(&self) -> i32 {
        self.lattice.bound()
    }

    pub fn picker(&self) -> &CellPicker {
        &self.picker
    }

    pub fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    /// Cells that currently have a proxy on screen
    pub fn proxy_count(&self) -> usize {
        self.proxies.len()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn has_proxy(&self, position: Coordinate) -> bool {
        self.proxies.contains_key(&position)
    }

    /// Make a cell alive and give it a proxy
    pub fn create_cell(&mut self, position: Coordinate) -> bool {
        if !self.lattice.contains(position) || self.lattice.is_alive(position) {
            return false;
        }
        self.lattice.set_alive(position);
        self.attach(position);
        self.stats.alive_cells = self.lattice.alive_count();
        true
    }

    /// Kill a cell and hand its proxy back
    pub fn destroy_cell(&mut self, position: Coordinate) -> bool {
        if !self.lattice.is_alive(position) {
            return false;
        }
        self.lattice.remove_cell(position);
        self.detach(position);
        self.stats.alive_cells = self.lattice.alive_count();
        true
    }

    fn attach(&mut self, position: Coordinate) -> bool {
        if self.proxies.contains_key(&position) {
            return true;
        }
        let center = self.picker.cell_center(position, self.lattice.bound());
        match self.pool.borrow(center) {
            Ok(handle) => {
                self.proxies.insert(position, handle);
                self.pending.remove(&position);
                true
            }
            Err(err) => {
                debug!("No proxy for {}: {}", position, err);
                self.pending.insert(position);
                false
            }
        }
    }

    fn detach(&mut self, position: Coordinate) {
        self.pending.remove(&position);
        if let Some(handle) = self.proxies.remove(&position) {
            if let Err(err) = self.pool.release(handle) {
                debug!("Dropping proxy for {}: {}", position, err);
            }
        }
    }

    /// Attach proxies in order; once the pool refuses, the rest wait
    fn attach_all(&mut self, positions: impl IntoIterator<Item = Coordinate>) {
        let mut refused = false;
        for position in positions {
            if refused {
                self.pending.insert(position);
            } else {
                refused = !self.attach(position);
            }
        }
    }

    fn pool_has_room(&self) -> bool {
        self.pool.is_ready()
            && (self.pool.inactive_count() > 0 || self.pool.total_count() < self.pool.soft_max())
    }

    /// Retry cells that are alive but have no proxy yet
    fn fill_pending(&mut self) {
        if self.pending.is_empty() || !self.pool_has_room() {
            return;
        }
        let lattice = &self.lattice;
        self.pending.retain(|position| lattice.is_alive(*position));
        let waiting: Vec<Coordinate> = self.pending.iter().copied().collect();
        self.attach_all(waiting);
    }

    fn apply_generation(&mut self, changes: &Generation) {
        if changes.is_unchanged() {
            return;
        }
        for &position in &changes.died {
            self.detach(position);
        }
        self.attach_all(changes.born.iter().copied());
    }

    /// Update by one frame: warm the pool, run the scheduler, mirror changes
    pub fn tick(&mut self, delta_time: f32) {
        if !self.pool.is_ready() && self.pool.prewarm_step() {
            self.fill_pending();
        }

        let rule = self.rule.rule();
        if let Some(changes) = self.scheduler.tick(delta_time, &mut self.lattice, &rule) {
            self.apply_generation(&changes);
        }
        self.fill_pending();

        for event in self.scheduler.drain_events() {
            self.stats.apply(&event);
        }
        self.stats.record_frame(delta_time);
    }

    /// Run one generation while paused
    pub fn step_once(&mut self) {
        let rule = self.rule.rule();
        let changes = self.scheduler.step(&mut self.lattice, &rule);
        self.apply_generation(&changes);
        self.fill_pending();
        for event in self.scheduler.drain_events() {
            self.stats.apply(&event);
        }
    }

    pub fn toggle_running(&mut self) {
        self.scheduler.toggle();
    }

    /// Positive delta shortens the interval between generations
    pub fn adjust_speed(&mut self, delta: f32) {
        self.scheduler.adjust_interval(-delta);
    }

    pub fn speed_up(&mut self) {
        self.adjust_speed(self.config.scheduler.speed_step);
    }

    pub fn slow_down(&mut self) {
        self.adjust_speed(-self.config.scheduler.speed_step);
    }

    pub fn set_interval(&mut self, interval: f32) {
        self.scheduler.set_interval(interval);
    }

    pub fn select_rule(&mut self, rule: RulePreset) {
        if rule != self.rule {
            info!("Rule changed - old: {}, new: {}", self.rule.name(), rule.name());
            self.rule = rule;
        }
    }

    pub fn cycle_rule(&mut self) {
        self.select_rule(self.rule.next());
    }

    /// Kill every cell and return to generation zero
    pub fn reset(&mut self) {
        self.pool.release_all();
        self.proxies.clear();
        self.pending.clear();
        self.lattice.clear();
        self.scheduler.reset();
        self.scheduler.drain_events();
        self.stats.reset(self.lattice.volume(), 0);
        self.highlight = None;
        self.last_pick = None;
    }

    /// Switch to a lattice of side `bound` (clamped), starting from empty
    pub fn resize_lattice(&mut self, bound: i32) {
        let bound = self.config.lattice.clamp_bound(bound);
        info!("Resizing lattice - old: {}, new: {}", self.lattice.bound(), bound);

        self.lattice.resize(bound);
        self.proxies.clear();
        self.pending.clear();
        self.pool.initialize(bound);
        self.layers = LayerView::default();
        self.picker = self.config.picker();
        self.reset();
    }

    /// Reset and seed with the configured density
    pub fn randomize(&mut self) {
        self.randomize_with(&mut rand::rng());
    }

    pub fn randomize_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.reset();
        patterns::seed_random(&mut self.lattice, self.config.lattice.random_density, rng);

        let mut alive: Vec<Coordinate> = self.lattice.alive_cells().collect();
        alive.sort_unstable();
        self.attach_all(alive);
        self.stats.alive_cells = self.lattice.alive_count();
        info!("Randomized lattice - {} alive cells", self.lattice.alive_count());
    }

    /// Stamp a pattern centred on `center`; returns how many cells were created
    pub fn place_pattern(&mut self, pattern: &Pattern, center: Coordinate) -> usize {
        let positions: Vec<Coordinate> = pattern.positions_around(center).collect();
        positions
            .into_iter()
            .filter(|&position| self.create_cell(position))
            .count()
    }

    pub fn show_layer(&mut self) {
        self.layers.show_next(self.lattice.bound());
        self.last_pick = None;
    }

    pub fn hide_layer(&mut self) {
        self.layers.hide_top();
        self.last_pick = None;
    }

    pub fn toggle_layer_mode(&mut self) {
        self.layers.toggle_mode();
        self.last_pick = None;
    }

    /// Re-resolve the cell under `ray`, at most once per throttle period.
    /// `now` is in seconds.
    pub fn update_highlight(&mut self, ray: &Ray, now: f64) -> Option<Coordinate> {
        if let Some(last) = self.last_pick {
            if now - last < self.config.picking.throttle {
                return self.highlight;
            }
        }
        self.last_pick = Some(now);
        self.highlight = self
            .picker
            .resolve(ray, self.lattice.bound(), self.layers.window());
        self.highlight
    }

    pub fn clear_highlight(&mut self) {
        self.highlight = None;
    }

    pub fn place_at_highlight(&mut self) -> bool {
        match self.highlight {
            Some(position) => self.create_cell(position),
            None => false,
        }
    }

    pub fn remove_at_highlight(&mut self) -> bool {
        match self.highlight {
            Some(position) => self.destroy_cell(position),
            None => false,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(SimulationConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{assert_sparsity_invariant, presets};
    use macroquad::math::vec3;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn ready_state(bound: i32) -> GameState {
        let mut config = SimulationConfig::default();
        config.lattice.initial_bound = bound;
        let mut state = GameState::new(config);
        state.pool.prewarm_all();
        state
    }

    fn assert_every_alive_cell_mirrored(state: &GameState) {
        for position in state.lattice.alive_cells() {
            assert!(
                state.has_proxy(position) || state.pending.contains(&position),
                "{} has neither proxy nor pending entry",
                position
            );
        }
        assert_eq!(state.proxy_count(), state.pool.active_count());
    }

    #[test]
    fn test_create_and_destroy_cell() {
        let mut state = ready_state(10);
        let position = Coordinate::new(1, 2, 3);

        assert!(state.create_cell(position));
        assert!(!state.create_cell(position));
        assert!(state.has_proxy(position));
        assert_eq!(state.pool.active_count(), 1);

        assert!(state.destroy_cell(position));
        assert!(!state.destroy_cell(position));
        assert_eq!(state.pool.active_count(), 0);
        assert_eq!(state.lattice.alive_count(), 0);
    }

    #[test]
    fn test_create_outside_lattice_is_ignored() {
        let mut state = ready_state(5);
        assert!(!state.create_cell(Coordinate::new(5, 0, 0)));
        assert!(!state.create_cell(Coordinate::new(-1, 0, 0)));
        assert!(state.lattice.is_empty());
    }

    #[test]
    fn test_cells_wait_for_warmup() {
        let mut state = GameState::default();
        state.create_cell(Coordinate::new(0, 0, 0));

        assert_eq!(state.proxy_count(), 0);
        assert_eq!(state.pending_count(), 1);

        for _ in 0..100 {
            state.tick(0.016);
        }
        assert!(state.pool.is_ready());
        assert_eq!(state.proxy_count(), 1);
        assert_eq!(state.pending_count(), 0);
    }

    #[test]
    fn test_proxy_sits_on_cell_center() {
        let mut state = ready_state(10);
        let position = Coordinate::new(0, 0, 0);
        state.create_cell(position);

        let handle = state.proxies[&position];
        let proxy = state.pool.get(handle).unwrap();
        assert!(proxy.visible);
        assert_eq!(proxy.position, vec3(-4.5, -4.5, -4.5));
    }

    #[test]
    fn test_generations_keep_proxies_in_sync() {
        let mut state = ready_state(10);
        state.select_rule(RulePreset::Dense4644);
        state.place_pattern(&presets::cube(), Coordinate::new(5, 5, 5));

        for _ in 0..5 {
            state.step_once();
            assert_every_alive_cell_mirrored(&state);
            assert_sparsity_invariant(&state.lattice);
        }
        assert_eq!(state.stats.generation, 5);
        assert_eq!(state.stats.alive_cells, state.lattice.alive_count());
    }

    #[test]
    fn test_running_tick_steps_once_per_interval() {
        let mut state = ready_state(10);
        state.place_pattern(&presets::cube(), Coordinate::new(5, 5, 5));
        state.toggle_running();

        state.tick(0.5);
        assert_eq!(state.scheduler.generation(), 0);
        state.tick(0.5);
        assert_eq!(state.scheduler.generation(), 1);
        assert!(!state.stats.paused);
        assert_eq!(state.proxy_count(), 8);
    }

    #[test]
    fn test_exhausted_pool_defers_proxies() {
        let mut config = SimulationConfig::default();
        config.lattice.random_density = 1.0;
        let mut state = GameState::new(config);
        state.pool.prewarm_all();

        state.randomize_with(&mut StdRng::seed_from_u64(7));
        assert_eq!(state.lattice.alive_count(), 1000);
        assert_eq!(state.proxy_count(), 492);
        assert_eq!(state.pending_count(), 508);
        assert_eq!(state.pool.exhausted_count(), 1);

        state.tick(0.0);
        assert_eq!(state.proxy_count(), 592);
        state.tick(0.0);
        assert_eq!(state.proxy_count(), 656);
        state.tick(0.0);
        assert_eq!(state.proxy_count(), 656);
        assert_eq!(state.pool.exhausted_count(), 3);
        assert_every_alive_cell_mirrored(&state);

        // Freed proxies go to waiting cells
        for x in 0..10 {
            state.destroy_cell(Coordinate::new(x, 0, 0));
        }
        state.tick(0.0);
        assert_eq!(state.proxy_count(), 656);
        assert_eq!(state.pending_count(), 1000 - 10 - 656);
    }

    #[test]
    fn test_reset_returns_every_proxy() {
        let mut state = ready_state(10);
        state.place_pattern(&presets::slab(), Coordinate::new(5, 5, 5));
        assert!(state.pool.active_count() > 0);

        state.reset();
        assert_eq!(state.pool.active_count(), 0);
        assert_eq!(state.proxy_count(), 0);
        assert!(state.lattice.is_empty());
        assert_eq!(state.stats.alive_cells, 0);
    }

    #[test]
    fn test_resize_clamps_and_rebuilds_pool() {
        let mut state = ready_state(10);
        state.create_cell(Coordinate::new(1, 1, 1));

        state.resize_lattice(500);
        assert_eq!(state.bound(), 50);
        assert!(!state.pool.is_ready());
        assert!(state.lattice.is_empty());
        assert_eq!(state.stats.total_cells, 125_000);

        state.resize_lattice(1);
        assert_eq!(state.bound(), 5);
    }

    #[test]
    fn test_rule_cycle_wraps() {
        let mut state = GameState::default();
        let first = state.rule;
        for _ in 0..RulePreset::all().len() {
            state.cycle_rule();
        }
        assert_eq!(state.rule, first);
    }

    #[test]
    fn test_speed_changes_interval() {
        let mut state = GameState::default();
        state.speed_up();
        assert!((state.scheduler.interval() - 0.9).abs() < 1e-5);
        state.slow_down();
        state.slow_down();
        assert!((state.scheduler.interval() - 1.1).abs() < 1e-5);
    }

    #[test]
    fn test_highlight_is_throttled() {
        let mut state = ready_state(10);
        for _ in 0..3 {
            state.show_layer();
        }
        let ray = Ray::new(vec3(0.2, 20.0, 0.2), vec3(0.01, -1.0, 0.01));

        assert_eq!(state.update_highlight(&ray, 0.0), Some(Coordinate::new(5, 3, 5)));

        let away = Ray::new(vec3(100.0, 100.0, 100.0), vec3(0.0, 1.0, 0.0));
        assert_eq!(state.update_highlight(&away, 0.01), Some(Coordinate::new(5, 3, 5)));
        assert_eq!(state.update_highlight(&away, 0.1), None);
    }

    #[test]
    fn test_layer_change_bypasses_throttle() {
        let mut state = ready_state(10);
        let ray = Ray::new(vec3(0.2, 20.0, 0.2), vec3(0.01, -1.0, 0.01));
        assert_eq!(state.update_highlight(&ray, 0.0), Some(Coordinate::new(5, 0, 5)));

        state.show_layer();
        assert_eq!(state.update_highlight(&ray, 0.01), Some(Coordinate::new(5, 1, 5)));
    }

    #[test]
    fn test_place_and_remove_at_highlight() {
        let mut state = ready_state(10);
        assert!(!state.place_at_highlight());

        let ray = Ray::new(vec3(0.2, 20.0, 0.2), vec3(0.01, -1.0, 0.01));
        state.update_highlight(&ray, 0.0);
        assert!(state.place_at_highlight());
        assert!(state.lattice.is_alive(Coordinate::new(5, 0, 5)));

        assert!(state.remove_at_highlight());
        assert!(state.lattice.is_empty());
    }
}
