#![forbid(unsafe_code)]

use crate::fallback_mode::FallbackMode;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://disease.sh/v3/covid-19/";

#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Source {
    /// Root of the statistics API. Endpoint paths are joined onto it.
    pub base_url: String,

    /// Hard timeout for a single request attempt, in seconds.
    #[serde_as(as = "serde_with::DurationSeconds")]
    pub timeout: Duration,

    pub fallback: FallbackMode,
}

impl Default for Source {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: Duration::from_secs(15),
            fallback: FallbackMode::default(),
        }
    }
}
