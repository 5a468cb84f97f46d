//! Reusable scheduling fixtures.
//!
//! - [`TestKind`]: four action kinds with stable snake_case names.
//! - [`block_in_chunk`]: the `n`-th block of a chunk's y=64 layer.
//! - [`Recorder`]: collects `(tick, pos, kind)` triples from callbacks.

use cadence_core::{BlockPos, ChunkPos, Priority, ScheduledAction, TickId, CHUNK_SIZE};
use cadence_space::BoundingBox;
use strum::{AsRefStr, EnumIter, EnumString};

/// Action kinds used throughout the test suites.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, AsRefStr, EnumIter, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum TestKind {
    Wire,
    Piston,
    Fluid,
    Observer,
}

/// Layer the fixtures place blocks on.
pub const FIXTURE_Y: i32 = 64;

/// The `n`-th block of `chunk` at y=64, x-major within the chunk.
///
/// `n` wraps at 256, so every value lands inside the chunk.
pub fn block_in_chunk(chunk: ChunkPos, n: u32) -> BlockPos {
    let n = (n % (CHUNK_SIZE * CHUNK_SIZE) as u32) as i32;
    BlockPos::new(
        chunk.min_block_x() + n % CHUNK_SIZE,
        FIXTURE_Y,
        chunk.min_block_z() + n / CHUNK_SIZE,
    )
}

/// The full column box of `chunk` between y=0 and y=255.
pub fn chunk_box(chunk: ChunkPos) -> BoundingBox {
    let min = BlockPos::new(chunk.min_block_x(), 0, chunk.min_block_z());
    let max = BlockPos::new(
        chunk.min_block_x() + CHUNK_SIZE - 1,
        255,
        chunk.min_block_z() + CHUNK_SIZE - 1,
    );
    BoundingBox::from_corners(min, max)
}

/// Shorthand for building an action with explicit fields.
pub fn action(
    kind: TestKind,
    pos: BlockPos,
    trigger: i64,
    priority: Priority,
    order: u64,
) -> ScheduledAction<TestKind> {
    ScheduledAction::new(kind, pos, TickId(trigger), priority, order)
}

/// Captures everything handed to a tick callback.
#[derive(Debug, Default)]
pub struct Recorder {
    fired: Vec<(TickId, BlockPos, TestKind)>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, tick: TickId, pos: BlockPos, kind: TestKind) {
        self.fired.push((tick, pos, kind));
    }

    pub fn fired(&self) -> &[(TickId, BlockPos, TestKind)] {
        &self.fired
    }

    pub fn positions(&self) -> Vec<BlockPos> {
        self.fired.iter().map(|&(_, pos, _)| pos).collect()
    }

    pub fn len(&self) -> usize {
        self.fired.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fired.is_empty()
    }

    pub fn clear(&mut self) {
        self.fired.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn blocks_stay_in_their_chunk() {
        let chunk = ChunkPos::new(-3, 7);
        for n in [0, 1, 15, 16, 255, 256, 1000] {
            assert_eq!(block_in_chunk(chunk, n).chunk(), chunk);
        }
    }

    #[test]
    fn chunk_box_covers_fixture_blocks() {
        let chunk = ChunkPos::new(2, -1);
        let area = chunk_box(chunk);
        assert!(area.contains(block_in_chunk(chunk, 0)));
        assert!(area.contains(block_in_chunk(chunk, 255)));
        assert!(!area.contains(block_in_chunk(ChunkPos::new(3, -1), 0)));
    }

    #[test]
    fn kind_names_parse_back() {
        let name: &str = TestKind::Observer.as_ref();
        assert_eq!(name, "observer");
        for kind in TestKind::iter() {
            assert_eq!(TestKind::from_str(kind.as_ref()), Ok(kind));
        }
        assert!(TestKind::from_str("gravel").is_err());
    }
}
