#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

/// What the data source does when live data cannot be obtained.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum FallbackMode {
    /// Surface the error to the caller.
    #[default]
    Never,
    /// Serve the bundled dataset once retries are exhausted.
    OnFailure,
    /// Never touch the network; always serve the bundled dataset.
    Always,
}
