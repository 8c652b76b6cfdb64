#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use std::time::Duration;

const MAX_RETRIES: u32 = 10;
const MAX_BASE_DELAY: Duration = Duration::from_secs(60);

#[serde_as]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RetryPolicy {
    /// Additional attempts after the first one (clamped to 0..=10).
    pub max_retries: u32,
    /// Delay before the first retry, in milliseconds (clamped to 60s).
    #[serde_as(as = "serde_with::DurationMilliSeconds<u64>")]
    pub base_delay: Duration,
    /// Growth factor applied to the delay after every retry (clamped to 1.0..=10.0).
    pub multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_delay: Duration::from_secs(1),
            multiplier: 1.5,
        }
    }
}

impl RetryPolicy {
    pub fn clamp(self) -> Self {
        let multiplier = if self.multiplier.is_finite() {
            self.multiplier.clamp(1.0, 10.0)
        } else {
            1.0
        };
        Self {
            max_retries: self.max_retries.min(MAX_RETRIES),
            base_delay: self.base_delay.min(MAX_BASE_DELAY),
            multiplier,
        }
    }

    /// Delay to wait before retry number `retry` (zero-based).
    pub fn delay_for(&self, retry: u32) -> Duration {
        let policy = self.clamp();
        let factor = policy.multiplier.powi(retry.min(MAX_RETRIES) as i32);
        policy.base_delay.mul_f64(factor)
    }

    /// Total number of attempts including the first one.
    pub fn attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }
}
