//! Spatial helpers for the Cadence scheduler.
//!
//! Area edits (`clear_area`, `copy_area`) address pending actions by an
//! inclusive axis-aligned [`BoundingBox`]; this crate provides the box
//! and the mapping from a box to the chunk columns it touches.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod region;

pub use region::{BoundingBox, ChunkList};
