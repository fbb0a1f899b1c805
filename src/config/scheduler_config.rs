use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DurationMilliSeconds};
use std::time::Duration;

/// Configuration for the reminders dispatch scheduler.
#[serde_as]
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Indicates whether the dispatch loop should be started at all.
    pub enabled: bool,
    /// Fixed period between two consequent dispatch ticks (default is 1 minute).
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    pub tick_period: Duration,
    /// The maximum number of reminders dispatched in parallel within a single tick.
    pub dispatch_concurrency: usize,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            tick_period: Duration::from_secs(60),
            dispatch_concurrency: 4,
        }
    }
}
