//! Intra-tick priority levels.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter};

/// Rank used to order actions that become eligible on the same tick.
///
/// Variants are declared from most to least urgent, so the derived
/// `Ord` sorts `ExtremelyHigh` first. The numeric [`value`](Self::value)
/// is the persisted form.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    EnumIter,
    AsRefStr,
)]
#[repr(i8)]
#[strum(serialize_all = "snake_case")]
pub enum Priority {
    /// -3
    ExtremelyHigh = -3,
    /// -2
    VeryHigh = -2,
    /// -1
    High = -1,
    /// 0
    #[default]
    Normal = 0,
    /// 1
    Low = 1,
    /// 2
    VeryLow = 2,
    /// 3
    ExtremelyLow = 3,
}

impl Priority {
    /// Signed rank; lower is more urgent.
    pub const fn value(self) -> i8 {
        self as i8
    }

    /// Inverse of [`value`](Self::value).
    ///
    /// Out-of-range values clamp to the nearest level, so a record
    /// written by a build with wider priorities still loads.
    pub const fn from_value(value: i8) -> Self {
        match value {
            i8::MIN..=-3 => Self::ExtremelyHigh,
            -2 => Self::VeryHigh,
            -1 => Self::High,
            0 => Self::Normal,
            1 => Self::Low,
            2 => Self::VeryLow,
            _ => Self::ExtremelyLow,
        }
    }
}
