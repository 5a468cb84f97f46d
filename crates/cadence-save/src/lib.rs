//! Persistence of pending scheduled actions for Cadence chunks.
//!
//! When a chunk unloads, its pending actions are written as
//! [`SavedTick`] records whose trigger is stored relative to the save
//! tick. Loading rebases them onto the load tick, so a chunk that sat
//! on disk for an hour resumes with the same remaining delays.
//!
//! # Architecture
//!
//! - [`KindNames`] maps opaque kinds to stable names and back;
//!   [`NameTable`] is the bundled implementation
//! - [`save_chunk_ticks`] and [`load_chunk_ticks`] convert between a
//!   [`ChunkTicks`](cadence_engine::ChunkTicks) and records
//! - [`write_chunk_ticks`] and [`read_chunk_ticks`] frame records in a
//!   compact binary form; records also derive serde for other framings
//!
//! # Format
//!
//! ```text
//! [MAGIC "CDNC"] [VERSION u8] [chunk key u64] [count u32]
//! [Record 1] [Record 2] ... [Record N]
//! ```
//!
//! Each record is a length-prefixed kind name, the block position as
//! three `i32`, the relative delay as `i32` and the priority as `i8`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod codec;
pub mod error;
pub mod names;
pub mod record;

pub use codec::{read_chunk_ticks, write_chunk_ticks};
pub use error::SaveError;
pub use names::{KindNames, NameTable};
pub use record::{load_chunk_ticks, save_chunk_ticks, LoadedTicks, SaveReport, SavedChunk, SavedTick};

/// Magic bytes at the start of every saved chunk tick list.
pub const MAGIC: [u8; 4] = *b"CDNC";

/// Current binary format version.
pub const FORMAT_VERSION: u8 = 1;
