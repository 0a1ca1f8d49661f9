//! Planner configuration.

use serde::Deserialize;

use crate::domain::Time;

/// Configuration parameters for the scan engine and query orchestrators.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Maximum number of rounds (legs) a single scan may run.
    /// A scan that reaches this stops early and logs a warning.
    pub max_rounds: usize,

    /// Number of service days a group station query searches before
    /// giving up.
    pub max_search_days: usize,

    /// First departure time considered by a range query.
    pub range_start_time: Time,

    /// Range queries stop once the next departure time reaches this.
    pub range_end_time: Time,
}

impl PlannerConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        max_rounds: usize,
        max_search_days: usize,
        range_start_time: Time,
        range_end_time: Time,
    ) -> Self {
        Self {
            max_rounds,
            max_search_days,
            range_start_time,
            range_end_time,
        }
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_rounds: 32,
            max_search_days: 3,
            range_start_time: 1,
            range_end_time: 86400, // end of the service day
        }
    }
}
