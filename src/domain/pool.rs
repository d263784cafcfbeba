//! Bounded pool of renderable proxies, one per living cell.
//!
//! The pool is sized from the lattice volume, filled in small batches over
//! several frames, and then hands proxies out and takes them back without
//! allocating. A soft maximum lets it grow past the warm-up size when a
//! burst of births outruns the estimate, up to twice the baseline.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};

use log::{error, info, warn};
use macroquad::math::Vec3;

use super::error::{PoolError, PoolResult};

static NEXT_POOL_ID: AtomicU32 = AtomicU32::new(1);

/// A renderable stand-in for one living cell
pub trait Proxy: Default {
    /// Move the proxy to `position` and make it visible
    fn place(&mut self, position: Vec3);

    /// Hide the proxy until it is borrowed again
    fn deactivate(&mut self);
}

/// Ticket for a borrowed proxy. Only valid for the pool that issued it,
/// and only until that pool is re-initialized.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ProxyHandle {
    pool: u32,
    slot: u32,
}

/// Capacity figures derived from the lattice bound
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PoolSizing {
    /// Number of proxies created during warm-up
    pub baseline: usize,
    /// Initial growth ceiling (1.5x baseline)
    pub soft_max: usize,
    /// Absolute ceiling the soft max can grow to (2x baseline)
    pub hard_max: usize,
    /// Proxies created per warm-up step
    pub batch: usize,
}

impl PoolSizing {
    pub const BASE: usize = 100;
    pub const MIN_BASELINE: usize = 100;
    pub const MAX_BASELINE: usize = 3000;
    pub const GROWTH_STEP: usize = 100;

    /// Baseline is 100 plus a share of the volume that shrinks from 25% at
    /// side 5 to 5% at side 50, clamped to [100, 3000].
    pub fn for_bound(bound: i32) -> Self {
        let n = bound.max(0) as f64;
        let t = ((n - 5.0) / 45.0).clamp(0.0, 1.0);
        let share = 0.25 + (0.05 - 0.25) * t;
        let scaled = (n * n * n * share).ceil() as usize;
        Self::with_baseline(Self::BASE + scaled)
    }

    pub fn with_baseline(baseline: usize) -> Self {
        let baseline = baseline.clamp(Self::MIN_BASELINE, Self::MAX_BASELINE);
        let soft_max = (baseline * 3).div_ceil(2);
        let batch = baseline.div_ceil(10).clamp(10, 50);
        Self {
            baseline,
            soft_max,
            hard_max: baseline * 2,
            batch,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Warmup {
    Uninitialized,
    Warming { created: usize },
    Ready,
}

struct Slot<P> {
    proxy: P,
    in_use: bool,
}

pub struct ProxyPool<P: Proxy> {
    id: u32,
    sizing: PoolSizing,
    soft_max: usize,
    slots: Vec<Slot<P>>,
    inactive: VecDeque<u32>,
    active: usize,
    warmup: Warmup,
    exhausted: u64,
}

impl<P: Proxy> Default for ProxyPool<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Proxy> ProxyPool<P> {
    /// Create an empty pool. Nothing can be borrowed until it has been
    /// initialized and warmed up.
    pub fn new() -> Self {
        Self {
            id: 0,
            sizing: PoolSizing::with_baseline(0),
            soft_max: 0,
            slots: Vec::new(),
            inactive: VecDeque::new(),
            active: 0,
            warmup: Warmup::Uninitialized,
            exhausted: 0,
        }
    }

    /// Size the pool for a lattice of side `bound` and start warming up
    pub fn initialize(&mut self, bound: i32) {
        self.initialize_with(PoolSizing::for_bound(bound));
    }

    /// Start over with explicit sizing. Handles from before are invalidated.
    pub fn initialize_with(&mut self, sizing: PoolSizing) {
        self.id = NEXT_POOL_ID.fetch_add(1, Ordering::Relaxed);
        self.sizing = sizing;
        self.soft_max = sizing.soft_max;
        self.slots = Vec::with_capacity(sizing.baseline);
        self.inactive = VecDeque::with_capacity(sizing.baseline);
        self.active = 0;
        self.exhausted = 0;
        self.warmup = Warmup::Warming { created: 0 };
        info!(
            "Proxy pool initialized - baseline: {}, soft max: {}, hard max: {}",
            sizing.baseline, sizing.soft_max, sizing.hard_max
        );
    }

    /// Create one batch of warm-up proxies. Returns true once the pool is ready.
    pub fn prewarm_step(&mut self) -> bool {
        let Warmup::Warming { created } = self.warmup else {
            return self.is_ready();
        };

        let target = self.sizing.baseline;
        let count = self.sizing.batch.min(target - created);
        for _ in 0..count {
            let slot = self.create_slot();
            self.inactive.push_back(slot);
        }

        let created = created + count;
        if created >= target {
            self.warmup = Warmup::Ready;
            info!(
                "Proxy pool ready with {} proxies (batch size {})",
                created, self.sizing.batch
            );
        } else {
            self.warmup = Warmup::Warming { created };
        }
        self.is_ready()
    }

    /// Run warm-up to completion in one go
    pub fn prewarm_all(&mut self) {
        while matches!(self.warmup, Warmup::Warming { .. }) {
            self.prewarm_step();
        }
    }

    pub fn is_ready(&self) -> bool {
        self.warmup == Warmup::Ready
    }

    fn create_slot(&mut self) -> u32 {
        let mut proxy = P::default();
        proxy.deactivate();
        self.slots.push(Slot { proxy, in_use: false });
        (self.slots.len() - 1) as u32
    }

    fn handle(&self, slot: u32) -> ProxyHandle {
        ProxyHandle { pool: self.id, slot }
    }

    /// Hand out a proxy placed at `position`.
    ///
    /// Reuses an idle proxy first, then creates one while the total stays
    /// under the soft max. When both fail the borrow is refused and the soft
    /// max is raised one step (never past the hard max) for later borrows.
    pub fn borrow(&mut self, position: Vec3) -> PoolResult<ProxyHandle> {
        if !self.is_ready() {
            return Err(PoolError::NotReady);
        }

        let slot = match self.inactive.pop_front() {
            Some(slot) => slot,
            None if self.total_count() < self.soft_max => self.create_slot(),
            None => {
                self.exhausted += 1;
                let capacity = self.soft_max;
                self.soft_max = (self.soft_max + PoolSizing::GROWTH_STEP).min(self.sizing.hard_max);
                if capacity == self.sizing.hard_max {
                    warn!("Proxy pool has reached its absolute max size of {}", capacity);
                } else {
                    warn!("Proxy pool exhausted at {}, soft max raised to {}", capacity, self.soft_max);
                }
                return Err(PoolError::Exhausted { capacity });
            }
        };

        let entry = &mut self.slots[slot as usize];
        entry.proxy.place(position);
        entry.in_use = true;
        self.active += 1;
        Ok(self.handle(slot))
    }

    fn owns(&self, handle: ProxyHandle) -> bool {
        handle.pool == self.id
            && self
                .slots
                .get(handle.slot as usize)
                .is_some_and(|entry| entry.in_use)
    }

    /// Take a proxy back and queue it for reuse
    pub fn release(&mut self, handle: ProxyHandle) -> PoolResult<()> {
        if !self.is_ready() {
            return Err(PoolError::NotReady);
        }
        if !self.owns(handle) {
            error!("Trying to return proxy {:?} that isn't from this pool", handle);
            return Err(PoolError::ForeignHandle(handle));
        }

        let entry = &mut self.slots[handle.slot as usize];
        entry.proxy.deactivate();
        entry.in_use = false;
        self.active -= 1;
        self.inactive.push_back(handle.slot);
        Ok(())
    }

    /// Return every borrowed proxy
    pub fn release_all(&mut self) {
        if !self.is_ready() {
            return;
        }
        for (slot, entry) in self.slots.iter_mut().enumerate() {
            if entry.in_use {
                entry.proxy.deactivate();
                entry.in_use = false;
                self.inactive.push_back(slot as u32);
            }
        }
        self.active = 0;
    }

    pub fn get(&self, handle: ProxyHandle) -> Option<&P> {
        self.owns(handle)
            .then(|| &self.slots[handle.slot as usize].proxy)
    }

    /// Proxies currently handed out
    pub fn active_proxies(&self) -> impl Iterator<Item = &P> + '_ {
        self.slots
            .iter()
            .filter(|entry| entry.in_use)
            .map(|entry| &entry.proxy)
    }

    pub fn active_count(&self) -> usize {
        self.active
    }

    pub fn inactive_count(&self) -> usize {
        self.inactive.len()
    }

    pub fn total_count(&self) -> usize {
        self.slots.len()
    }

    /// Share of created proxies currently borrowed, in percent
    pub fn usage_percent(&self) -> f32 {
        match self.total_count() {
            0 => 0.0,
            total => self.active as f32 / total as f32 * 100.0,
        }
    }

    pub fn sizing(&self) -> PoolSizing {
        self.sizing
    }

    pub fn soft_max(&self) -> usize {
        self.soft_max
    }

    /// Number of refused borrows since the last initialize
    pub fn exhausted_count(&self) -> u64 {
        self.exhausted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct TestProxy {
        position: Vec3,
        visible: bool,
    }

    impl Proxy for TestProxy {
        fn place(&mut self, position: Vec3) {
            self.position = position;
            self.visible = true;
        }

        fn deactivate(&mut self) {
            self.visible = false;
        }
    }

    fn ready_pool(baseline: usize) -> ProxyPool<TestProxy> {
        let mut pool = ProxyPool::new();
        pool.initialize_with(PoolSizing::with_baseline(baseline));
        pool.prewarm_all();
        pool
    }

    #[test]
    fn test_sizing_for_bound() {
        let small = PoolSizing::for_bound(5);
        // 100 + ceil(125 * 0.25)
        assert_eq!(small.baseline, 132);
        assert_eq!(small.soft_max, 198);
        assert_eq!(small.hard_max, 264);

        let large = PoolSizing::for_bound(50);
        assert_eq!(large.baseline, PoolSizing::MAX_BASELINE);
        assert_eq!(large.batch, 50);
    }

    #[test]
    fn test_sizing_baseline_clamped() {
        assert_eq!(PoolSizing::with_baseline(10).baseline, 100);
        let sizing = PoolSizing::with_baseline(100);
        assert_eq!(sizing.soft_max, 150);
        assert_eq!(sizing.hard_max, 200);
        assert_eq!(sizing.batch, 10);
    }

    #[test]
    fn test_warmup_is_incremental() {
        let mut pool: ProxyPool<TestProxy> = ProxyPool::new();
        pool.initialize_with(PoolSizing::with_baseline(100));

        assert!(!pool.is_ready());
        assert_eq!(pool.borrow(Vec3::ZERO), Err(PoolError::NotReady));

        let mut steps = 0;
        while !pool.prewarm_step() {
            steps += 1;
            assert!(pool.inactive_count() < 100);
        }
        assert_eq!(steps, 9);
        assert_eq!(pool.inactive_count(), 100);
        assert_eq!(pool.active_count(), 0);
    }

    #[test]
    fn test_borrow_places_proxy() {
        let mut pool = ready_pool(100);
        let handle = pool.borrow(Vec3::new(1.0, 2.0, 3.0)).unwrap();

        let proxy = pool.get(handle).unwrap();
        assert!(proxy.visible);
        assert_eq!(proxy.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(pool.active_count(), 1);
        assert_eq!(pool.inactive_count(), 99);
    }

    #[test]
    fn test_borrow_then_release_restores_counts() {
        let mut pool = ready_pool(100);
        let before = (pool.active_count(), pool.inactive_count());

        let handle = pool.borrow(Vec3::ZERO).unwrap();
        pool.release(handle).unwrap();

        assert_eq!((pool.active_count(), pool.inactive_count()), before);
        assert!(pool.get(handle).is_none());
    }

    #[test]
    fn test_growth_up_to_soft_max_then_refused() {
        let mut pool = ready_pool(100);

        for i in 0..150 {
            assert!(pool.borrow(Vec3::ZERO).is_ok(), "borrow {} failed", i + 1);
            assert!(pool.total_count() <= pool.soft_max());
        }
        assert_eq!(pool.total_count(), 150);

        assert_eq!(
            pool.borrow(Vec3::ZERO),
            Err(PoolError::Exhausted { capacity: 150 })
        );
        assert_eq!(pool.exhausted_count(), 1);
        assert_eq!(pool.soft_max(), 200);
    }

    #[test]
    fn test_soft_max_never_passes_hard_max() {
        let mut pool = ready_pool(100);
        let mut granted = 0;
        for _ in 0..400 {
            if pool.borrow(Vec3::ZERO).is_ok() {
                granted += 1;
            }
            assert!(pool.total_count() <= pool.soft_max());
        }

        assert_eq!(granted, 200);
        assert_eq!(pool.soft_max(), 200);
        assert_eq!(pool.total_count(), 200);
    }

    #[test]
    fn test_release_reuses_before_growing() {
        let mut pool = ready_pool(100);
        let handles: Vec<_> = (0..100).map(|_| pool.borrow(Vec3::ZERO).unwrap()).collect();
        pool.release(handles[3]).unwrap();

        let again = pool.borrow(Vec3::ONE).unwrap();
        assert_eq!(again, handles[3]);
        assert_eq!(pool.total_count(), 100);
    }

    #[test]
    fn test_foreign_handle_rejected() {
        let mut pool = ready_pool(100);
        let mut other = ready_pool(100);
        let foreign = other.borrow(Vec3::ZERO).unwrap();

        assert_eq!(pool.release(foreign), Err(PoolError::ForeignHandle(foreign)));
        assert_eq!(pool.active_count(), 0);
        assert_eq!(pool.inactive_count(), 100);
    }

    #[test]
    fn test_double_release_rejected() {
        let mut pool = ready_pool(100);
        let handle = pool.borrow(Vec3::ZERO).unwrap();
        pool.release(handle).unwrap();

        assert_eq!(pool.release(handle), Err(PoolError::ForeignHandle(handle)));
        assert_eq!(pool.inactive_count(), 100);
    }

    #[test]
    fn test_reinitialize_invalidates_handles() {
        let mut pool = ready_pool(100);
        let stale = pool.borrow(Vec3::ZERO).unwrap();
        pool.initialize_with(PoolSizing::with_baseline(100));
        pool.prewarm_all();
        pool.borrow(Vec3::ZERO).unwrap();

        assert!(pool.get(stale).is_none());
        assert!(pool.release(stale).is_err());
    }

    #[test]
    fn test_release_all() {
        let mut pool = ready_pool(100);
        for _ in 0..120 {
            pool.borrow(Vec3::ZERO).unwrap();
        }
        pool.release_all();

        assert_eq!(pool.active_count(), 0);
        assert_eq!(pool.inactive_count(), 120);
        assert_eq!(pool.active_proxies().count(), 0);
        assert_eq!(pool.usage_percent(), 0.0);
    }

    #[test]
    fn test_usage_percent() {
        let mut pool = ready_pool(100);
        for _ in 0..25 {
            pool.borrow(Vec3::ZERO).unwrap();
        }
        assert!((pool.usage_percent() - 25.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_release_is_refused_during_warmup() {
        let mut pool = ready_pool(100);
        let handle = pool.borrow(Vec3::ZERO).unwrap();

        pool.initialize_with(PoolSizing::with_baseline(100));
        pool.prewarm_step();
        let before = (pool.active_count(), pool.inactive_count(), pool.total_count());

        assert_eq!(pool.release(handle), Err(PoolError::NotReady));
        pool.release_all();

        assert!(!pool.is_ready());
        assert_eq!(
            (pool.active_count(), pool.inactive_count(), pool.total_count()),
            before
        );
        assert_eq!(before, (0, 10, 10));
    }
}
