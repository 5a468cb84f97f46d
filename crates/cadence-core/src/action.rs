//! The scheduled action record and its identity key.

use std::fmt;
use std::hash::Hash;

use crate::id::TickId;
use crate::pos::{BlockPos, ChunkPos};
use crate::priority::Priority;

/// Bound for action kinds.
///
/// A kind is an opaque handle naming *what* should happen. The scheduler
/// only compares and hashes it; names for persistence come from an
/// injected table. Blanket-implemented for every qualifying type.
pub trait TickKind: Copy + Eq + Hash + fmt::Debug {}

impl<T: Copy + Eq + Hash + fmt::Debug> TickKind for T {}

/// One pending action: run `kind` at `pos` no earlier than `trigger_tick`.
///
/// Actions are ordered two ways:
///
/// - **intra-tick order** `(priority, order)`, used to merge the minima
///   of several chunks once they are all eligible;
/// - **drain order** `(trigger_tick, priority, order)`, used inside a
///   single chunk so earlier triggers always surface first.
///
/// # Examples
///
/// ```
/// use cadence_core::{BlockPos, Priority, ScheduledAction, TickId};
///
/// let a = ScheduledAction::new(1u8, BlockPos::new(0, 64, 0), TickId(5), Priority::High, 7);
/// assert_eq!(a.intra_tick_key(), (Priority::High, 7));
/// assert_eq!(a.drain_key(), (TickId(5), Priority::High, 7));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ScheduledAction<K> {
    /// What should happen.
    pub kind: K,
    /// Where it should happen.
    pub pos: BlockPos,
    /// First tick on which the action may run.
    pub trigger_tick: TickId,
    /// Tie-break among actions eligible on the same tick.
    pub priority: Priority,
    /// Scheduling sequence number; final tie-break.
    pub order: u64,
}

impl<K: TickKind> ScheduledAction<K> {
    /// Construct an action from all of its parts.
    pub fn new(kind: K, pos: BlockPos, trigger_tick: TickId, priority: Priority, order: u64) -> Self {
        Self {
            kind,
            pos,
            trigger_tick,
            priority,
            order,
        }
    }

    /// `(priority, order)`.
    pub fn intra_tick_key(&self) -> (Priority, u64) {
        (self.priority, self.order)
    }

    /// `(trigger_tick, priority, order)`.
    pub fn drain_key(&self) -> (TickId, Priority, u64) {
        (self.trigger_tick, self.priority, self.order)
    }

    /// The `(pos, kind)` identity used for existence checks.
    pub fn key(&self) -> ActionKey<K> {
        ActionKey {
            pos: self.pos,
            kind: self.kind,
        }
    }

    /// The chunk this action is routed to.
    pub fn chunk(&self) -> ChunkPos {
        self.pos.chunk()
    }

    /// Whether the action may run on `current_tick`.
    pub fn is_due(&self, current_tick: TickId) -> bool {
        self.trigger_tick <= current_tick
    }
}

/// Identity of an action ignoring timing: the `(pos, kind)` pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ActionKey<K> {
    /// Block position.
    pub pos: BlockPos,
    /// Action kind.
    pub kind: K,
}

impl<K> ActionKey<K> {
    /// Construct a probe key.
    pub fn new(pos: BlockPos, kind: K) -> Self {
        Self { pos, kind }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(trigger: i64, priority: Priority, order: u64) -> ScheduledAction<u8> {
        ScheduledAction::new(0, BlockPos::new(0, 0, 0), TickId(trigger), priority, order)
    }

    #[test]
    fn drain_key_puts_trigger_first() {
        let early_low = at(1, Priority::Low, 9);
        let late_high = at(2, Priority::ExtremelyHigh, 0);
        assert!(early_low.drain_key() < late_high.drain_key());
        assert!(early_low.intra_tick_key() > late_high.intra_tick_key());
    }

    #[test]
    fn order_breaks_ties() {
        assert!(at(3, Priority::Normal, 1).drain_key() < at(3, Priority::Normal, 2).drain_key());
    }

    #[test]
    fn due_is_inclusive() {
        let a = at(5, Priority::Normal, 0);
        assert!(!a.is_due(TickId(4)));
        assert!(a.is_due(TickId(5)));
        assert!(a.is_due(TickId(6)));
    }

    #[test]
    fn key_ignores_timing() {
        assert_eq!(at(1, Priority::Low, 1).key(), at(9, Priority::High, 4).key());
    }
}
