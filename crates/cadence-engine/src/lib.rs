//! Scheduling engine for deferred voxel-world actions.
//!
//! Provides the per-chunk [`ChunkTicks`] container and the world-level
//! [`LevelTicks`] coordinator that merges every loaded chunk's pending
//! actions into one globally ordered, budget-limited stream per step.
//!
//! # Architecture
//!
//! - [`ChunkTicks`] holds one chunk's actions in drain order
//! - [`LevelTicks`] owns all containers plus a sparse cache of each
//!   chunk's earliest trigger tick, so a step only visits chunks that
//!   may have due work
//! - [`SchedulerConfig`] carries the default budget and the coalescing
//!   policy for new containers
//! - [`TickMetrics`] reports what one `tick()` call did

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod chunk_ticks;
pub mod config;
pub mod level_ticks;
pub mod metrics;

pub use chunk_ticks::{ChunkTicks, CoalescePolicy, ScheduleOutcome};
pub use config::{ConfigError, SchedulerConfig};
pub use level_ticks::LevelTicks;
pub use metrics::TickMetrics;
