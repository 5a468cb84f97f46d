//! Core types for the Cadence deferred-action scheduler.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the value types shared by every other crate in the workspace: tick
//! counters, block and chunk positions, priorities, the scheduled action
//! record itself, and the error types.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod action;
pub mod error;
pub mod id;
pub mod pos;
pub mod priority;

pub use action::{ActionKey, ScheduledAction, TickKind};
pub use error::ScheduleError;
pub use id::{OrderCounter, TickId};
pub use pos::{BlockOffset, BlockPos, ChunkPos, CHUNK_SHIFT, CHUNK_SIZE};
pub use priority::Priority;
