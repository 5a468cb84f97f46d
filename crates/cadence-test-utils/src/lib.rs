//! Test utilities for Cadence development.
//!
//! Provides a small closed set of action kinds ([`TestKind`]), helpers
//! for placing blocks inside a given chunk, and a [`Recorder`] sink for
//! capturing what a tick callback was handed.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{action, block_in_chunk, chunk_box, Recorder, TestKind};
