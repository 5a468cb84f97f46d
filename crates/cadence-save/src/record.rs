//! Saved tick records and conversion to and from chunk containers.

use cadence_core::{BlockPos, ChunkPos, OrderCounter, Priority, ScheduledAction, TickId, TickKind};
use cadence_engine::{ChunkTicks, CoalescePolicy};
use serde::{Deserialize, Serialize};

use crate::names::KindNames;

/// One pending action as persisted.
///
/// `delay` is the trigger tick minus the save tick. Field names are
/// kept short because a chunk can hold thousands of these.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedTick {
    /// Persisted name of the action kind.
    #[serde(rename = "i")]
    pub kind_name: String,
    /// Block x.
    pub x: i32,
    /// Block y.
    pub y: i32,
    /// Block z.
    pub z: i32,
    /// Ticks remaining at save time; negative when already overdue.
    #[serde(rename = "t")]
    pub delay: i32,
    /// Intra-tick priority.
    #[serde(rename = "p")]
    pub priority: Priority,
}

impl SavedTick {
    /// Block position of the record.
    pub fn pos(&self) -> BlockPos {
        BlockPos::new(self.x, self.y, self.z)
    }
}

/// A chunk's saved records together with the chunk they belong to.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedChunk {
    /// The chunk the records were saved from.
    pub chunk: ChunkPos,
    /// Records in drain order.
    pub ticks: Vec<SavedTick>,
}

/// Output of [`save_chunk_ticks`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SaveReport {
    /// Records in drain order.
    pub records: Vec<SavedTick>,
    /// Pending actions left out because their kind has no name.
    pub unnamed: usize,
}

/// Output of [`load_chunk_ticks`].
#[derive(Debug)]
pub struct LoadedTicks<K: TickKind> {
    /// Container holding every record that resolved.
    pub ticks: ChunkTicks<K>,
    /// Names that did not resolve, one entry per skipped record.
    pub skipped: Vec<String>,
}

/// Convert a container's pending actions into records relative to `save_tick`.
///
/// Records come out in drain order so that reloading them with fresh,
/// increasing orders keeps ties in the same relative order. Delays that
/// do not fit in an `i32` are clamped.
pub fn save_chunk_ticks<K, N>(ticks: &ChunkTicks<K>, save_tick: TickId, names: &N) -> SaveReport
where
    K: TickKind,
    N: KindNames<K> + ?Sized,
{
    let mut report = SaveReport::default();
    for action in ticks.to_sorted_vec() {
        let Some(name) = names.name_of(action.kind) else {
            tracing::debug!(kind = ?action.kind, pos = %action.pos, "skipping unnamed kind on save");
            report.unnamed += 1;
            continue;
        };
        let delay = (action.trigger_tick - save_tick).clamp(i32::MIN as i64, i32::MAX as i64) as i32;
        report.records.push(SavedTick {
            kind_name: name.to_owned(),
            x: action.pos.x,
            y: action.pos.y,
            z: action.pos.z,
            delay,
            priority: action.priority,
        });
    }
    report
}

/// Rebuild a container from records, rebasing delays onto `load_tick`.
///
/// Each record gets a fresh order from `orders`, in record order.
/// Records whose name does not resolve are skipped and reported; the
/// rest load normally.
pub fn load_chunk_ticks<K, N>(
    records: &[SavedTick],
    names: &N,
    load_tick: TickId,
    orders: &mut OrderCounter,
    policy: CoalescePolicy,
) -> LoadedTicks<K>
where
    K: TickKind,
    N: KindNames<K> + ?Sized,
{
    let mut ticks = ChunkTicks::with_policy(policy);
    let mut skipped = Vec::new();
    for record in records {
        let Some(kind) = names.resolve(&record.kind_name) else {
            tracing::debug!(name = %record.kind_name, pos = %record.pos(), "skipping unknown kind on load");
            skipped.push(record.kind_name.clone());
            continue;
        };
        ticks.schedule(ScheduledAction::new(
            kind,
            record.pos(),
            load_tick + i64::from(record.delay),
            record.priority,
            orders.next_order(),
        ));
    }
    LoadedTicks { ticks, skipped }
}
