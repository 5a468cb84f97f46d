//! Tick counter and the sub-tick order counter.

use std::fmt;
use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// Absolute simulation step counter.
///
/// An action with `trigger_tick = t` becomes eligible on the first
/// `tick()` call whose current tick is `>= t`. Signed so that saved
/// delays may be negative (overdue at save time).
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct TickId(pub i64);

impl TickId {
    /// The largest representable tick. Used as "never".
    pub const MAX: TickId = TickId(i64::MAX);

    /// Add a relative delay, saturating at the numeric bounds.
    pub fn saturating_add(self, delay: i64) -> Self {
        Self(self.0.saturating_add(delay))
    }

    /// Signed distance from `earlier` to `self`, saturating.
    pub fn since(self, earlier: TickId) -> i64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl fmt::Display for TickId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for TickId {
    fn from(v: i64) -> Self {
        Self(v)
    }
}

impl Add<i64> for TickId {
    type Output = TickId;

    fn add(self, rhs: i64) -> Self::Output {
        self.saturating_add(rhs)
    }
}

impl Sub<TickId> for TickId {
    type Output = i64;

    fn sub(self, rhs: TickId) -> Self::Output {
        self.since(rhs)
    }
}

/// Monotonic source of sub-tick `order` values.
///
/// Every action receives an order at the moment it is scheduled; the
/// value only breaks ties between actions of equal trigger tick and
/// priority. A coordinator owns one counter; loaders borrow it so that
/// reloaded actions sort after everything already pending.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OrderCounter {
    next: u64,
}

impl OrderCounter {
    /// A counter starting at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// A counter whose first issued value is `next`.
    pub fn starting_at(next: u64) -> Self {
        Self { next }
    }

    /// Issue the next order value.
    pub fn next_order(&mut self) -> u64 {
        let order = self.next;
        self.next = self.next.wrapping_add(1);
        order
    }

    /// The value the next call to [`next_order`](Self::next_order) returns.
    pub fn peek(&self) -> u64 {
        self.next
    }

    /// Make sure every future value is strictly greater than `order`.
    pub fn advance_past(&mut self, order: u64) {
        if order >= self.next {
            self.next = order.saturating_add(1);
        }
    }
}
