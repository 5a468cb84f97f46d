//! Error types shared across the workspace.
//!
//! Subsystem-specific errors (configuration, persistence codec) live in
//! their own crates alongside the code that produces them.

use thiserror::Error;

use crate::pos::{BlockPos, ChunkPos};

/// Errors from routing an action to its chunk container.
///
/// These are fail-soft: the coordinator logs and counts them and drops
/// the action, and callers are free to ignore the returned value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ScheduleError {
    /// No container is registered for the chunk owning `pos`.
    #[error("cannot schedule at {pos}: chunk {chunk} is not loaded")]
    ChunkNotLoaded {
        /// The chunk that had no container.
        chunk: ChunkPos,
        /// The target block position.
        pos: BlockPos,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_chunk_and_block() {
        let err = ScheduleError::ChunkNotLoaded {
            chunk: ChunkPos::new(2, -1),
            pos: BlockPos::new(33, 70, -4),
        };
        assert_eq!(
            err.to_string(),
            "cannot schedule at (33, 70, -4): chunk [2, -1] is not loaded"
        );
    }
}
