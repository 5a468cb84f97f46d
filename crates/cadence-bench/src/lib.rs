//! Benchmark profiles for the Cadence scheduling engine.
//!
//! Provides pre-populated coordinators for benchmarks:
//!
//! - [`reference_profile`]: 16x16 loaded chunks, 64 actions each
//! - [`stress_profile`]: 32x32 loaded chunks, 256 actions each
//! - [`populate`]: deterministic action placement via seed

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use cadence_core::{BlockPos, ChunkPos, Priority, TickId, CHUNK_SIZE};
use cadence_engine::{LevelTicks, SchedulerConfig};

/// Action kinds used by the benchmark profiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BenchKind {
    /// Short-delay kind, like a signal wire.
    Wire,
    /// Medium-delay kind.
    Piston,
    /// Long-delay kind, like slow fluid spread.
    Fluid,
}

/// Trigger ticks span `0..TRIGGER_SPREAD` relative to tick 0.
pub const TRIGGER_SPREAD: u64 = 64;

/// 16x16 chunks with 64 actions each (16K pending).
pub fn reference_profile(seed: u64) -> LevelTicks<BenchKind> {
    build(16, 64, seed)
}

/// 32x32 chunks with 256 actions each (~262K pending).
pub fn stress_profile(seed: u64) -> LevelTicks<BenchKind> {
    build(32, 256, seed)
}

fn build(side: i32, per_chunk: u32, seed: u64) -> LevelTicks<BenchKind> {
    let mut level = LevelTicks::new(SchedulerConfig::default())
        .unwrap_or_else(|e| panic!("default config rejected: {e}"));
    for x in 0..side {
        for z in 0..side {
            let container = level.new_container();
            level.add_container(ChunkPos::new(x, z), container);
        }
    }
    populate(&mut level, side, per_chunk, seed);
    level
}

/// Schedule `per_chunk` actions into each of the `side`x`side` chunks.
///
/// Positions, trigger ticks, priorities and kinds come from a simple
/// multiplicative hash of the seed, so runs are reproducible.
pub fn populate(level: &mut LevelTicks<BenchKind>, side: i32, per_chunk: u32, seed: u64) {
    let kinds = [BenchKind::Wire, BenchKind::Piston, BenchKind::Fluid];
    let mut state = seed | 1;
    for x in 0..side {
        for z in 0..side {
            let chunk = ChunkPos::new(x, z);
            for _ in 0..per_chunk {
                state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                let h = state >> 16;
                let pos = BlockPos::new(
                    chunk.min_block_x() + (h % CHUNK_SIZE as u64) as i32,
                    ((h >> 8) % 128) as i32,
                    chunk.min_block_z() + ((h >> 16) % CHUNK_SIZE as u64) as i32,
                );
                let trigger = TickId(((h >> 24) % TRIGGER_SPREAD) as i64);
                let priority = Priority::from_value(((h >> 32) % 7) as i8 - 3);
                let kind = kinds[((h >> 40) % 3) as usize];
                // Every target chunk is loaded above.
                let _ = level.schedule_at(kind, pos, trigger, priority);
            }
        }
    }
}
