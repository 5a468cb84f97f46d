//! Block and chunk coordinates.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Log2 of the chunk edge length in blocks.
pub const CHUNK_SHIFT: u32 = 4;

/// Chunk edge length in blocks (16).
pub const CHUNK_SIZE: i32 = 1 << CHUNK_SHIFT;

/// Integer position of a single block in the world.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct BlockPos {
    /// East-west axis.
    pub x: i32,
    /// Vertical axis.
    pub y: i32,
    /// North-south axis.
    pub z: i32,
}

impl BlockPos {
    /// Construct a position from its three components.
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// The chunk column containing this block.
    pub const fn chunk(self) -> ChunkPos {
        ChunkPos::containing(self)
    }

    /// This position translated by `offset`, wrapping on overflow.
    pub const fn offset(self, offset: BlockOffset) -> Self {
        Self {
            x: self.x.wrapping_add(offset.dx),
            y: self.y.wrapping_add(offset.dy),
            z: self.z.wrapping_add(offset.dz),
        }
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl From<(i32, i32, i32)> for BlockPos {
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        Self { x, y, z }
    }
}

/// Translation applied to block positions by area copies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockOffset {
    /// Delta along x.
    pub dx: i32,
    /// Delta along y.
    pub dy: i32,
    /// Delta along z.
    pub dz: i32,
}

impl BlockOffset {
    /// Construct an offset from its three deltas.
    pub const fn new(dx: i32, dy: i32, dz: i32) -> Self {
        Self { dx, dy, dz }
    }
}

impl From<(i32, i32, i32)> for BlockOffset {
    fn from((dx, dy, dz): (i32, i32, i32)) -> Self {
        Self { dx, dy, dz }
    }
}

/// Horizontal coordinate of a 16x16 column of blocks.
///
/// Chunks shard all scheduling state. `to_key` packs the pair into a
/// single `u64` (x in the low 32 bits, z in the high 32 bits) for
/// persistence formats that key by integer.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ChunkPos {
    /// Chunk x (block x >> 4).
    pub x: i32,
    /// Chunk z (block z >> 4).
    pub z: i32,
}

impl ChunkPos {
    /// Construct a chunk coordinate.
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// The chunk containing block `pos`.
    pub const fn containing(pos: BlockPos) -> Self {
        Self {
            x: pos.x >> CHUNK_SHIFT,
            z: pos.z >> CHUNK_SHIFT,
        }
    }

    /// Pack into a single 64-bit key.
    pub const fn to_key(self) -> u64 {
        (self.x as u32 as u64) | ((self.z as u32 as u64) << 32)
    }

    /// Inverse of [`to_key`](Self::to_key).
    pub const fn from_key(key: u64) -> Self {
        Self {
            x: key as u32 as i32,
            z: (key >> 32) as u32 as i32,
        }
    }

    /// Smallest block x inside this chunk.
    pub const fn min_block_x(self) -> i32 {
        self.x << CHUNK_SHIFT
    }

    /// Smallest block z inside this chunk.
    pub const fn min_block_z(self) -> i32 {
        self.z << CHUNK_SHIFT
    }
}

impl fmt::Display for ChunkPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.x, self.z)
    }
}
