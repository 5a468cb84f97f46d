//! Inclusive block-space bounding boxes.

use cadence_core::{BlockOffset, BlockPos, ChunkPos, CHUNK_SHIFT};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Chunk columns touched by a box. Inline for boxes spanning up to 3x3 chunks.
pub type ChunkList = SmallVec<[ChunkPos; 9]>;

/// Axis-aligned box in block coordinates. Both corners are inclusive.
///
/// # Examples
///
/// ```
/// use cadence_core::BlockPos;
/// use cadence_space::BoundingBox;
///
/// let b = BoundingBox::from_corners(BlockPos::new(4, 70, 4), BlockPos::new(-2, 60, 20));
/// assert!(b.contains(BlockPos::new(0, 64, 16)));
/// assert!(!b.contains(BlockPos::new(0, 71, 16)));
/// assert_eq!(b.chunks().len(), 4);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoundingBox {
    min: BlockPos,
    max: BlockPos,
}

impl BoundingBox {
    /// Box spanning two arbitrary opposite corners.
    pub fn from_corners(a: BlockPos, b: BlockPos) -> Self {
        Self {
            min: BlockPos::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: BlockPos::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    /// Box covering exactly one block.
    pub fn single(pos: BlockPos) -> Self {
        Self { min: pos, max: pos }
    }

    /// Smallest corner (inclusive).
    pub fn min(&self) -> BlockPos {
        self.min
    }

    /// Largest corner (inclusive).
    pub fn max(&self) -> BlockPos {
        self.max
    }

    /// Whether `pos` lies inside the box.
    pub fn contains(&self, pos: BlockPos) -> bool {
        pos.x >= self.min.x
            && pos.x <= self.max.x
            && pos.y >= self.min.y
            && pos.y <= self.max.y
            && pos.z >= self.min.z
            && pos.z <= self.max.z
    }

    /// The box translated by `offset`.
    pub fn offset(&self, offset: BlockOffset) -> Self {
        Self::from_corners(self.min.offset(offset), self.max.offset(offset))
    }

    /// Inclusive range of chunk columns overlapped by the box's
    /// horizontal projection, as `(min_chunk, max_chunk)`.
    pub fn chunk_range(&self) -> (ChunkPos, ChunkPos) {
        (
            ChunkPos::new(self.min.x >> CHUNK_SHIFT, self.min.z >> CHUNK_SHIFT),
            ChunkPos::new(self.max.x >> CHUNK_SHIFT, self.max.z >> CHUNK_SHIFT),
        )
    }

    /// Number of chunk columns the box overlaps.
    pub fn chunk_count(&self) -> u64 {
        let (lo, hi) = self.chunk_range();
        let w = (i64::from(hi.x) - i64::from(lo.x) + 1) as u64;
        let d = (i64::from(hi.z) - i64::from(lo.z) + 1) as u64;
        w.saturating_mul(d)
    }

    /// Whether the box's horizontal projection overlaps `chunk`.
    pub fn intersects_chunk(&self, chunk: ChunkPos) -> bool {
        let (lo, hi) = self.chunk_range();
        chunk.x >= lo.x && chunk.x <= hi.x && chunk.z >= lo.z && chunk.z <= hi.z
    }

    /// Every chunk column overlapped, x-major.
    ///
    /// Allocates one entry per chunk; prefer
    /// [`intersects_chunk`](Self::intersects_chunk) when filtering a
    /// smaller set of known chunks.
    pub fn chunks(&self) -> ChunkList {
        let (lo, hi) = self.chunk_range();
        let mut out = ChunkList::new();
        for x in lo.x..=hi.x {
            for z in lo.z..=hi.z {
                out.push(ChunkPos::new(x, z));
            }
        }
        out
    }
}
