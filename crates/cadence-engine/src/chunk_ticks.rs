//! Per-chunk pending action storage.
//!
//! [`ChunkTicks`] is the leaf container of the scheduler: one per loaded
//! chunk column, holding that chunk's actions in drain order
//! `(trigger_tick, priority, order)`. It knows nothing about other
//! chunks or about the current tick; the coordinator decides when its
//! minimum is due.
//!
//! # Coalescing
//!
//! Scheduling the same `(pos, kind)` pair twice is legal. Under
//! [`CoalescePolicy::AllowDuplicates`] both entries stay pending and fire
//! independently; under [`CoalescePolicy::KeepExisting`] the second call
//! is ignored while the first is still pending.

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap};
use std::mem;

use cadence_core::{ActionKey, BlockPos, ScheduledAction, TickKind};
use serde::{Deserialize, Serialize};

/// What a container does when `(pos, kind)` is already pending.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoalescePolicy {
    /// Queue every request; duplicates fire independently.
    #[default]
    AllowDuplicates,
    /// Ignore a request whose `(pos, kind)` is already pending.
    KeepExisting,
}

/// Result of [`ChunkTicks::schedule`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScheduleOutcome {
    /// Dropped by [`CoalescePolicy::KeepExisting`].
    Coalesced,
    /// Queued behind the current minimum.
    Queued,
    /// Queued and is now the container's minimum.
    NewMinimum,
}

/// Heap entry ordered by drain key only.
#[derive(Clone, Copy, Debug)]
struct Queued<K>(ScheduledAction<K>);

impl<K: TickKind> PartialEq for Queued<K> {
    fn eq(&self, other: &Self) -> bool {
        self.0.drain_key() == other.0.drain_key()
    }
}

impl<K: TickKind> Eq for Queued<K> {}

impl<K: TickKind> PartialOrd for Queued<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: TickKind> Ord for Queued<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.drain_key().cmp(&other.0.drain_key())
    }
}

/// Pending actions for one chunk column.
///
/// Backed by a min-heap on drain order plus a `(pos, kind)`
/// multiplicity index, so `peek`/`has_scheduled` are O(1) and
/// `schedule`/`poll` are O(log n).
#[derive(Clone, Debug)]
pub struct ChunkTicks<K: TickKind> {
    queue: BinaryHeap<Reverse<Queued<K>>>,
    per_position: HashMap<ActionKey<K>, u32>,
    policy: CoalescePolicy,
}

impl<K: TickKind> ChunkTicks<K> {
    /// An empty container that allows duplicates.
    pub fn new() -> Self {
        Self::with_policy(CoalescePolicy::default())
    }

    /// An empty container with the given coalescing policy.
    pub fn with_policy(policy: CoalescePolicy) -> Self {
        Self {
            queue: BinaryHeap::new(),
            per_position: HashMap::new(),
            policy,
        }
    }

    /// The coalescing policy this container was built with.
    pub fn policy(&self) -> CoalescePolicy {
        self.policy
    }

    /// Insert an action.
    ///
    /// Reports [`ScheduleOutcome::NewMinimum`] when the action is now the
    /// container's first entry in drain order; the coordinator uses this
    /// to refresh its cached next tick without rescanning.
    pub fn schedule(&mut self, action: ScheduledAction<K>) -> ScheduleOutcome {
        let count = self.per_position.entry(action.key()).or_insert(0);
        if *count > 0 && self.policy == CoalescePolicy::KeepExisting {
            return ScheduleOutcome::Coalesced;
        }
        *count += 1;
        self.queue.push(Reverse(Queued(action)));

        match self.peek() {
            Some(top) if top.drain_key() == action.drain_key() => ScheduleOutcome::NewMinimum,
            _ => ScheduleOutcome::Queued,
        }
    }

    /// The first action in drain order, if any.
    pub fn peek(&self) -> Option<&ScheduledAction<K>> {
        self.queue.peek().map(|Reverse(q)| &q.0)
    }

    /// Remove and return the first action in drain order.
    pub fn poll(&mut self) -> Option<ScheduledAction<K>> {
        let Reverse(Queued(action)) = self.queue.pop()?;
        self.forget(action.key());
        Some(action)
    }

    /// Whether at least one `(pos, kind)` action is pending.
    pub fn has_scheduled(&self, pos: BlockPos, kind: K) -> bool {
        self.per_position.contains_key(&ActionKey::new(pos, kind))
    }

    /// Remove every action matching `predicate`. Returns how many went.
    pub fn remove_if<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(&ScheduledAction<K>) -> bool,
    {
        let old = mem::take(&mut self.queue).into_vec();
        let mut kept = Vec::with_capacity(old.len());
        let mut removed = 0;
        for Reverse(Queued(action)) in old {
            if predicate(&action) {
                self.forget(action.key());
                removed += 1;
            } else {
                kept.push(Reverse(Queued(action)));
            }
        }
        self.queue = BinaryHeap::from(kept);
        removed
    }

    /// Every pending action, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &ScheduledAction<K>> + '_ {
        self.queue.iter().map(|Reverse(q)| &q.0)
    }

    /// Every pending action, in drain order.
    pub fn to_sorted_vec(&self) -> Vec<ScheduledAction<K>> {
        let mut all: Vec<ScheduledAction<K>> = self.iter().copied().collect();
        all.sort_unstable_by_key(|a| a.drain_key());
        all
    }

    /// Largest `order` among pending actions.
    pub fn max_order(&self) -> Option<u64> {
        self.iter().map(|a| a.order).max()
    }

    /// Number of pending actions.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Drop every pending action.
    pub fn clear(&mut self) {
        self.queue.clear();
        self.per_position.clear();
    }

    fn forget(&mut self, key: ActionKey<K>) {
        if let Some(count) = self.per_position.get_mut(&key) {
            *count -= 1;
            if *count == 0 {
                self.per_position.remove(&key);
            }
        }
    }
}

impl<K: TickKind> Default for ChunkTicks<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: TickKind> FromIterator<ScheduledAction<K>> for ChunkTicks<K> {
    fn from_iter<I: IntoIterator<Item = ScheduledAction<K>>>(iter: I) -> Self {
        let mut ticks = Self::new();
        for action in iter {
            ticks.schedule(action);
        }
        ticks
    }
}
