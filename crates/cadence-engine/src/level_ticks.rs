//! World-level scheduling coordinator.
//!
//! [`LevelTicks`] owns one [`ChunkTicks`] per loaded chunk and merges
//! their pending actions into a single globally ordered stream, bounded
//! by a per-call budget.
//!
//! # Per-call phases
//!
//! 1. **Collect**: visit only chunks whose cached next tick is due; move
//!    tickable chunks with a due minimum into a ready heap keyed by the
//!    intra-tick order `(priority, order)` of that minimum.
//! 2. **Drain**: repeatedly pop the most urgent ready chunk and take
//!    actions from it until its next action is no longer due or another
//!    ready chunk's minimum is more urgent.
//! 3. **Leftover**: chunks still ready when the budget runs out get their
//!    next tick written back to the cache.
//! 4. **Execute**: hand each batch entry to the callback, in order. The
//!    callback receives the coordinator and may schedule, query, or edit
//!    areas; nothing it schedules joins the running batch.
//! 5. **Cleanup**: all per-call state is cleared; only the cache persists.

use std::cmp::Reverse;
use std::collections::hash_map::Entry;
use std::collections::{BinaryHeap, HashMap, VecDeque};

use cadence_core::{
    ActionKey, BlockOffset, BlockPos, ChunkPos, OrderCounter, Priority, ScheduleError,
    ScheduledAction, TickId, TickKind,
};
use cadence_space::{BoundingBox, ChunkList};
use indexmap::IndexMap;

use crate::chunk_ticks::{ChunkTicks, ScheduleOutcome};
use crate::config::{ConfigError, SchedulerConfig};
use crate::metrics::TickMetrics;

/// A chunk whose minimum is due, keyed by that minimum's intra-tick order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct ReadyChunk {
    key: (Priority, u64),
    chunk: ChunkPos,
}

impl ReadyChunk {
    fn new<K: TickKind>(chunk: ChunkPos, top: &ScheduledAction<K>) -> Self {
        Self {
            key: top.intra_tick_key(),
            chunk,
        }
    }
}

/// Global coordinator for deferred actions across all loaded chunks.
///
/// Single-threaded: every method takes `&mut self` or `&self` and runs
/// to completion. Callers that schedule from other threads must wrap the
/// coordinator in their own lock.
///
/// # Examples
///
/// ```
/// use cadence_core::{BlockPos, ChunkPos, Priority, TickId};
/// use cadence_engine::{LevelTicks, SchedulerConfig};
///
/// let mut level: LevelTicks<&'static str> = LevelTicks::new(SchedulerConfig::default()).unwrap();
/// level.add_container(ChunkPos::new(0, 0), level.new_container());
///
/// let pos = BlockPos::new(3, 64, 5);
/// level.schedule_at("redstone", pos, TickId(10), Priority::Normal).unwrap();
///
/// let mut fired = Vec::new();
/// level.tick(TickId(9), 16, |_| true, |_, p, k| fired.push((p, k)));
/// assert!(fired.is_empty());
/// level.tick(TickId(10), 16, |_| true, |_, p, k| fired.push((p, k)));
/// assert_eq!(fired, vec![(pos, "redstone")]);
/// ```
#[derive(Debug)]
pub struct LevelTicks<K: TickKind> {
    config: SchedulerConfig,
    containers: IndexMap<ChunkPos, ChunkTicks<K>>,
    next_tick_for_container: IndexMap<ChunkPos, TickId>,
    orders: OrderCounter,
    routing_failures: u64,
    last_metrics: TickMetrics,

    // ── per-call state, empty between calls ──
    ready: BinaryHeap<Reverse<ReadyChunk>>,
    to_run_this_tick: VecDeque<ScheduledAction<K>>,
    to_run_set: HashMap<ActionKey<K>, u32>,
    already_run: Vec<ScheduledAction<K>>,
    ticking: bool,
}

impl<K: TickKind> LevelTicks<K> {
    /// Construct an empty coordinator.
    pub fn new(config: SchedulerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            containers: IndexMap::new(),
            next_tick_for_container: IndexMap::new(),
            orders: OrderCounter::new(),
            routing_failures: 0,
            last_metrics: TickMetrics::default(),
            ready: BinaryHeap::new(),
            to_run_this_tick: VecDeque::new(),
            to_run_set: HashMap::new(),
            already_run: Vec::new(),
            ticking: false,
        })
    }

    /// The configuration this coordinator was built with.
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// An empty container using the configured coalescing policy.
    pub fn new_container(&self) -> ChunkTicks<K> {
        ChunkTicks::with_policy(self.config.coalesce)
    }

    // ── container lifecycle ─────────────────────────────────────────

    /// Register `container` as the storage for `chunk`.
    ///
    /// Seeds the next-tick cache from the container's minimum and makes
    /// sure future order values sort after everything it holds. Returns
    /// the container previously registered for the chunk, if any.
    pub fn add_container(&mut self, chunk: ChunkPos, container: ChunkTicks<K>) -> Option<ChunkTicks<K>> {
        match container.peek() {
            Some(top) => {
                self.next_tick_for_container.insert(chunk, top.trigger_tick);
            }
            None => {
                self.next_tick_for_container.swap_remove(&chunk);
            }
        }
        if let Some(max) = container.max_order() {
            self.orders.advance_past(max);
        }
        tracing::debug!(%chunk, pending = container.len(), "chunk container added");
        self.containers.insert(chunk, container)
    }

    /// Deregister the container for `chunk` and hand it back.
    ///
    /// Pending actions are not drained or persisted here; the caller
    /// saves the returned container or lets it drop.
    pub fn remove_container(&mut self, chunk: ChunkPos) -> Option<ChunkTicks<K>> {
        self.next_tick_for_container.swap_remove(&chunk);
        let removed = self.containers.swap_remove(&chunk);
        if let Some(container) = &removed {
            tracing::debug!(%chunk, pending = container.len(), "chunk container removed");
        }
        removed
    }

    /// Whether a container is registered for `chunk`.
    pub fn is_chunk_loaded(&self, chunk: ChunkPos) -> bool {
        self.containers.contains_key(&chunk)
    }

    /// The container registered for `chunk`.
    pub fn container(&self, chunk: ChunkPos) -> Option<&ChunkTicks<K>> {
        self.containers.get(&chunk)
    }

    /// Registered chunks, in registration order.
    pub fn loaded_chunks(&self) -> impl Iterator<Item = ChunkPos> + '_ {
        self.containers.keys().copied()
    }

    /// Cached earliest trigger tick for `chunk`, if it has one.
    ///
    /// The cache may lag behind the container (it is refreshed lazily
    /// during collect) but is never later than the container's minimum.
    pub fn next_tick_for(&self, chunk: ChunkPos) -> Option<TickId> {
        self.next_tick_for_container.get(&chunk).copied()
    }

    // ── scheduling ──────────────────────────────────────────────────

    /// Issue the next sub-tick order value.
    pub fn next_order(&mut self) -> u64 {
        self.orders.next_order()
    }

    /// Mutable access to the order counter, for loaders that build
    /// containers before registering them.
    pub fn orders_mut(&mut self) -> &mut OrderCounter {
        &mut self.orders
    }

    /// Route a fully built action to its chunk's container.
    ///
    /// An action whose chunk has no container is dropped, logged, and
    /// counted; the error is returned for callers that care.
    pub fn schedule(&mut self, action: ScheduledAction<K>) -> Result<(), ScheduleError> {
        let chunk = action.chunk();
        let Some(container) = self.containers.get_mut(&chunk) else {
            self.routing_failures += 1;
            tracing::warn!(
                %chunk,
                pos = %action.pos,
                kind = ?action.kind,
                "dropping action scheduled into unloaded chunk"
            );
            return Err(ScheduleError::ChunkNotLoaded {
                chunk,
                pos: action.pos,
            });
        };

        self.orders.advance_past(action.order);
        if container.schedule(action) == ScheduleOutcome::NewMinimum {
            self.next_tick_for_container.insert(chunk, action.trigger_tick);
        }
        Ok(())
    }

    /// Schedule `kind` at `pos` for `trigger_tick`, assigning a fresh order.
    pub fn schedule_at(
        &mut self,
        kind: K,
        pos: BlockPos,
        trigger_tick: TickId,
        priority: Priority,
    ) -> Result<(), ScheduleError> {
        let order = self.orders.next_order();
        self.schedule(ScheduledAction::new(kind, pos, trigger_tick, priority, order))
    }

    /// Schedule `kind` at `pos`, `delay` ticks after `current_tick`.
    pub fn schedule_in(
        &mut self,
        kind: K,
        pos: BlockPos,
        current_tick: TickId,
        delay: i64,
        priority: Priority,
    ) -> Result<(), ScheduleError> {
        self.schedule_at(kind, pos, current_tick + delay, priority)
    }

    // ── queries ─────────────────────────────────────────────────────

    /// Whether a `(pos, kind)` action is pending in its chunk's container.
    ///
    /// Actions already pulled into the running batch are not pending.
    pub fn has_scheduled(&self, pos: BlockPos, kind: K) -> bool {
        self.containers
            .get(&pos.chunk())
            .is_some_and(|c| c.has_scheduled(pos, kind))
    }

    /// Whether `(pos, kind)` is in the running batch and has not run yet.
    ///
    /// Only meaningful from inside a `tick()` callback; always false
    /// otherwise.
    pub fn will_tick_this_call(&mut self, pos: BlockPos, kind: K) -> bool {
        self.calculate_tick_set_if_needed();
        self.to_run_set.contains_key(&ActionKey::new(pos, kind))
    }

    /// Whether a `tick()` call is executing right now.
    pub fn is_ticking(&self) -> bool {
        self.ticking
    }

    /// Total pending actions across all containers.
    pub fn count(&self) -> usize {
        self.containers.values().map(ChunkTicks::len).sum()
    }

    /// Metrics from the most recent `tick()` call.
    pub fn last_metrics(&self) -> &TickMetrics {
        &self.last_metrics
    }

    /// Cumulative number of actions dropped for targeting unloaded chunks.
    pub fn routing_failures(&self) -> u64 {
        self.routing_failures
    }

    // ── tick ────────────────────────────────────────────────────────

    /// [`tick`](Self::tick) with the configured default budget.
    pub fn tick_default<P, F>(&mut self, current_tick: TickId, is_tickable: P, callback: F) -> TickMetrics
    where
        P: FnMut(ChunkPos) -> bool,
        F: FnMut(&mut Self, BlockPos, K),
    {
        self.tick(current_tick, self.config.default_budget, is_tickable, callback)
    }

    /// Run at most `budget` due actions.
    ///
    /// `is_tickable` is asked once per chunk with a due minimum whether
    /// that chunk may run actions now. `callback` performs each action.
    /// Callers must pass a non-decreasing `current_tick` across calls.
    ///
    /// A nested call from inside `callback` is refused and returns
    /// empty metrics.
    pub fn tick<P, F>(
        &mut self,
        current_tick: TickId,
        budget: usize,
        mut is_tickable: P,
        mut callback: F,
    ) -> TickMetrics
    where
        P: FnMut(ChunkPos) -> bool,
        F: FnMut(&mut Self, BlockPos, K),
    {
        if self.ticking {
            tracing::warn!(tick = %current_tick, "nested tick call ignored");
            return TickMetrics {
                tick: current_tick,
                routing_failures: self.routing_failures,
                ..TickMetrics::default()
            };
        }

        let _span = tracing::trace_span!("scheduled_ticks", tick = current_tick.0).entered();
        let mut metrics = TickMetrics {
            tick: current_tick,
            ..TickMetrics::default()
        };

        self.collect_ready(current_tick, &mut is_tickable, &mut metrics);
        metrics.leftover_containers = self.drain_ready(current_tick, budget);
        metrics.leftover_containers += self.reschedule_leftovers();

        metrics.budget_exhausted = metrics.leftover_containers > 0;
        if metrics.budget_exhausted {
            tracing::debug!(
                budget,
                leftover = metrics.leftover_containers,
                "tick budget exhausted"
            );
        }

        metrics.executed = self.run_collected(&mut callback);
        self.cleanup_after_tick();

        metrics.pending_after = self.count();
        metrics.routing_failures = self.routing_failures;
        self.last_metrics = metrics.clone();
        metrics
    }

    fn collect_ready<P>(&mut self, current_tick: TickId, is_tickable: &mut P, metrics: &mut TickMetrics)
    where
        P: FnMut(ChunkPos) -> bool,
    {
        let containers = &self.containers;
        let ready = &mut self.ready;
        self.next_tick_for_container.retain(|&chunk, cached| {
            if *cached > current_tick {
                return true;
            }
            metrics.candidates_scanned += 1;
            let Some(top) = containers.get(&chunk).and_then(ChunkTicks::peek) else {
                return false;
            };
            if top.is_due(current_tick) && is_tickable(chunk) {
                ready.push(Reverse(ReadyChunk::new(chunk, top)));
                metrics.containers_ready += 1;
                false
            } else {
                *cached = top.trigger_tick;
                true
            }
        });
    }

    /// Fill the batch from the ready heap. Returns the number of chunks
    /// cut short by the budget with a due action still queued.
    fn drain_ready(&mut self, current_tick: TickId, budget: usize) -> usize {
        let mut cut_short = 0;
        while self.to_run_this_tick.len() < budget {
            let Some(Reverse(entry)) = self.ready.pop() else {
                break;
            };
            let chunk = entry.chunk;
            let Some(container) = self.containers.get_mut(&chunk) else {
                continue;
            };
            let Some(first) = container.poll() else {
                continue;
            };
            self.to_run_this_tick.push_back(first);

            // Keep taking from this chunk until another ready chunk is more urgent.
            let next_ready = self.ready.peek().map(|Reverse(r)| r.key);
            while self.to_run_this_tick.len() < budget {
                let takes_next = container.peek().is_some_and(|next| {
                    next.is_due(current_tick)
                        && next_ready.is_none_or(|key| next.intra_tick_key() <= key)
                });
                if !takes_next {
                    break;
                }
                match container.poll() {
                    Some(action) => self.to_run_this_tick.push_back(action),
                    None => break,
                }
            }

            if let Some(next) = container.peek() {
                if !next.is_due(current_tick) {
                    self.next_tick_for_container.insert(chunk, next.trigger_tick);
                } else if self.to_run_this_tick.len() < budget {
                    self.ready.push(Reverse(ReadyChunk::new(chunk, next)));
                } else {
                    self.next_tick_for_container.insert(chunk, next.trigger_tick);
                    cut_short += 1;
                }
            }
        }
        cut_short
    }

    fn reschedule_leftovers(&mut self) -> usize {
        let mut leftover = 0;
        for Reverse(entry) in self.ready.drain() {
            if let Some(top) = self.containers.get(&entry.chunk).and_then(ChunkTicks::peek) {
                self.next_tick_for_container.insert(entry.chunk, top.trigger_tick);
                leftover += 1;
            }
        }
        leftover
    }

    fn run_collected<F>(&mut self, callback: &mut F) -> usize
    where
        F: FnMut(&mut Self, BlockPos, K),
    {
        self.ticking = true;
        let mut executed = 0;
        while let Some(action) = self.to_run_this_tick.pop_front() {
            if !self.to_run_set.is_empty() {
                remove_one(&mut self.to_run_set, action.key());
            }
            self.already_run.push(action);
            callback(self, action.pos, action.kind);
            executed += 1;
        }
        self.ticking = false;
        executed
    }

    fn cleanup_after_tick(&mut self) {
        self.to_run_this_tick.clear();
        self.ready.clear();
        self.already_run.clear();
        self.to_run_set.clear();
    }

    fn calculate_tick_set_if_needed(&mut self) {
        if self.to_run_set.is_empty() && !self.to_run_this_tick.is_empty() {
            for action in &self.to_run_this_tick {
                *self.to_run_set.entry(action.key()).or_insert(0) += 1;
            }
        }
    }

    // ── area edits ──────────────────────────────────────────────────

    /// Remove every pending action inside `area`.
    ///
    /// Also purges the running batch and the already-executed record so
    /// an edit made from inside a callback stays consistent. Returns the
    /// number of not-yet-executed actions removed.
    pub fn clear_area(&mut self, area: &BoundingBox) -> usize {
        let mut removed = 0;
        for chunk in self.chunks_in_area(area) {
            let Some(container) = self.containers.get_mut(&chunk) else {
                continue;
            };
            let before = container.peek().map(ScheduledAction::drain_key);
            removed += container.remove_if(|a| area.contains(a.pos));
            let after = container.peek();
            if before != after.map(ScheduledAction::drain_key) {
                match after {
                    Some(top) => {
                        self.next_tick_for_container.insert(chunk, top.trigger_tick);
                    }
                    None => {
                        self.next_tick_for_container.swap_remove(&chunk);
                    }
                }
            }
        }

        let batch_before = self.to_run_this_tick.len();
        self.to_run_this_tick.retain(|a| !area.contains(a.pos));
        let batch_removed = batch_before - self.to_run_this_tick.len();
        if batch_removed > 0 {
            // Rebuilt lazily on the next query.
            self.to_run_set.clear();
        }
        self.already_run.retain(|a| !area.contains(a.pos));

        removed + batch_removed
    }

    /// Duplicate every action inside `area` at `pos + offset`.
    ///
    /// See [`copy_area_from`](Self::copy_area_from).
    pub fn copy_area(&mut self, area: &BoundingBox, offset: BlockOffset) -> usize {
        let gathered = self.gather_in_area(area);
        self.schedule_copies(gathered, offset)
    }

    /// Duplicate every action of `source` inside `area` into `self` at
    /// `pos + offset`.
    ///
    /// Gathers from `source`'s containers and from its running batch and
    /// executed record. Copies keep kind, trigger tick and priority; their
    /// orders are `max_order + 1 + (order - min_order)` over the gathered
    /// set, preserving relative order while sorting after the originals.
    /// Copies landing in unloaded chunks are routing failures. Returns the
    /// number of copies scheduled.
    pub fn copy_area_from(&mut self, source: &LevelTicks<K>, area: &BoundingBox, offset: BlockOffset) -> usize {
        let gathered = source.gather_in_area(area);
        self.schedule_copies(gathered, offset)
    }

    fn gather_in_area(&self, area: &BoundingBox) -> Vec<ScheduledAction<K>> {
        let inside = |a: &&ScheduledAction<K>| area.contains(a.pos);
        let mut gathered: Vec<ScheduledAction<K>> = self.already_run.iter().filter(inside).copied().collect();
        gathered.extend(self.to_run_this_tick.iter().filter(inside).copied());
        for chunk in self.chunks_in_area(area) {
            if let Some(container) = self.containers.get(&chunk) {
                gathered.extend(container.iter().filter(inside).copied());
            }
        }
        gathered
    }

    fn schedule_copies(&mut self, gathered: Vec<ScheduledAction<K>>, offset: BlockOffset) -> usize {
        let (Some(min_order), Some(max_order)) = (
            gathered.iter().map(|a| a.order).min(),
            gathered.iter().map(|a| a.order).max(),
        ) else {
            return 0;
        };

        let mut copied = 0;
        for action in gathered {
            let order = max_order
                .saturating_add(1)
                .saturating_add(action.order - min_order);
            let copy = ScheduledAction::new(
                action.kind,
                action.pos.offset(offset),
                action.trigger_tick,
                action.priority,
                order,
            );
            if self.schedule(copy).is_ok() {
                copied += 1;
            }
        }
        copied
    }

    /// Registered chunks overlapping `area`'s horizontal projection.
    fn chunks_in_area(&self, area: &BoundingBox) -> ChunkList {
        if area.chunk_count() > self.containers.len() as u64 {
            self.containers
                .keys()
                .copied()
                .filter(|&c| area.intersects_chunk(c))
                .collect()
        } else {
            area.chunks()
                .into_iter()
                .filter(|c| self.containers.contains_key(c))
                .collect()
        }
    }
}

fn remove_one<K: TickKind>(set: &mut HashMap<ActionKey<K>, u32>, key: ActionKey<K>) {
    if let Entry::Occupied(mut slot) = set.entry(key) {
        *slot.get_mut() -= 1;
        if *slot.get() == 0 {
            slot.remove();
        }
    }
}
