//! Cadence: a deferred-action scheduling engine for chunked voxel worlds.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Cadence sub-crates. For most users, adding `cadence` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use cadence::prelude::*;
//!
//! #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
//! enum Kind { Wire, Lamp }
//!
//! let mut level: LevelTicks<Kind> = LevelTicks::new(SchedulerConfig::default()).unwrap();
//! level.add_container(ChunkPos::new(0, 0), level.new_container());
//!
//! let wire = BlockPos::new(1, 64, 1);
//! level.schedule_at(Kind::Wire, wire, TickId(2), Priority::Normal).unwrap();
//!
//! let mut lit = Vec::new();
//! for t in 0..5 {
//!     level.tick(TickId(t), 64, |_| true, |level, pos, kind| match kind {
//!         Kind::Wire => {
//!             let lamp = pos.offset(BlockOffset::new(1, 0, 0));
//!             level.schedule_in(Kind::Lamp, lamp, TickId(t), 1, Priority::High).unwrap();
//!         }
//!         Kind::Lamp => lit.push((t, pos)),
//!     });
//! }
//! assert_eq!(lit, vec![(3, BlockPos::new(2, 64, 1))]);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `cadence-core` | Tick IDs, positions, priorities, actions, errors |
//! | [`space`] | `cadence-space` | Bounding boxes and chunk coverage |
//! | [`engine`] | `cadence-engine` | Chunk containers and the tick coordinator |
//! | [`save`] | `cadence-save` | Saved tick records, kind names, binary codec |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core value types (`cadence-core`).
///
/// Contains [`types::TickId`], the position types, [`types::Priority`],
/// [`types::ScheduledAction`] and [`types::ScheduleError`].
pub use cadence_core as types;

/// Area math (`cadence-space`).
///
/// Provides [`space::BoundingBox`] for `clear_area` and `copy_area`.
pub use cadence_space as space;

/// Scheduling engine (`cadence-engine`).
///
/// [`engine::ChunkTicks`] stores one chunk's actions;
/// [`engine::LevelTicks`] runs them all under a per-call budget.
pub use cadence_engine as engine;

/// Persistence of pending actions (`cadence-save`).
///
/// Convert containers with [`save::save_chunk_ticks`] and
/// [`save::load_chunk_ticks`]; frame them with [`save::write_chunk_ticks`].
pub use cadence_save as save;

/// Common imports for typical Cadence usage.
///
/// ```rust
/// use cadence::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use cadence_core::{
        BlockOffset, BlockPos, ChunkPos, OrderCounter, Priority, ScheduledAction, TickId, TickKind,
    };

    // Errors
    pub use cadence_core::ScheduleError;
    pub use cadence_engine::ConfigError;
    pub use cadence_save::SaveError;

    // Space
    pub use cadence_space::BoundingBox;

    // Engine
    pub use cadence_engine::{ChunkTicks, CoalescePolicy, LevelTicks, SchedulerConfig, TickMetrics};

    // Persistence
    pub use cadence_save::{KindNames, NameTable, SavedTick};
}
