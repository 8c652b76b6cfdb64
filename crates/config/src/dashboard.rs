#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use std::time::Duration;

#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Dashboard {
    /// Initial date range preset, in days back from today.
    pub lookback_days: u32,

    /// Trailing window used for smoothed series.
    pub moving_average_window: u32,

    /// How often the engine refreshes every domain, in seconds.
    #[serde_as(as = "serde_with::DurationSeconds")]
    pub refresh_interval: Duration,

    /// Number of countries kept in ranked bar charts.
    pub top_countries: usize,

    /// Number of named slices in pie charts before "Others".
    pub pie_slices: usize,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self {
            lookback_days: 30,
            moving_average_window: 7,
            refresh_interval: Duration::from_secs(60 * 60),
            top_countries: 10,
            pie_slices: 10,
        }
    }
}
