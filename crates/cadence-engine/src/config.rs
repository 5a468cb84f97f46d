//! Scheduler configuration, validation, and error types.
//!
//! [`SchedulerConfig`] is the builder-input for a [`LevelTicks`](crate::LevelTicks).
//! [`validate()`](SchedulerConfig::validate) checks structural invariants
//! at construction.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::chunk_ticks::CoalescePolicy;

/// Default number of actions one `tick()` call may execute.
pub const DEFAULT_BUDGET: usize = 65_536;

// ── SchedulerConfig ────────────────────────────────────────────────

/// Tunables for a [`LevelTicks`](crate::LevelTicks) coordinator.
///
/// Deserializable so embedders can read it from their own config files;
/// missing fields take their defaults.
///
/// # Examples
///
/// ```
/// use cadence_engine::{CoalescePolicy, SchedulerConfig};
///
/// let config: SchedulerConfig =
///     serde_json::from_str(r#"{ "coalesce": "keep_existing" }"#).unwrap();
/// assert_eq!(config.coalesce, CoalescePolicy::KeepExisting);
/// assert_eq!(config.default_budget, 65_536);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Budget used by [`tick_default`](crate::LevelTicks::tick_default). Default: 65536.
    pub default_budget: usize,
    /// Coalescing policy for containers created through
    /// [`new_container`](crate::LevelTicks::new_container). Default: allow duplicates.
    pub coalesce: CoalescePolicy,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            default_budget: DEFAULT_BUDGET,
            coalesce: CoalescePolicy::default(),
        }
    }
}

impl SchedulerConfig {
    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_budget == 0 {
            return Err(ConfigError::ZeroBudget);
        }
        Ok(())
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`SchedulerConfig::validate()`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// `default_budget` is zero, so `tick_default` could never run anything.
    #[error("default_budget must be at least 1")]
    ZeroBudget,
}
