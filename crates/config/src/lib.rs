#![forbid(unsafe_code)]

mod dashboard;
mod error;
mod fallback_mode;
mod retry_policy;
mod source;

pub use dashboard::Dashboard;
pub use error::Error;
pub use fallback_mode::FallbackMode;
pub use retry_policy::RetryPolicy;
pub use source::{DEFAULT_BASE_URL, Source};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Prefix of environment variables that override file settings.
///
/// Nested keys are separated by a double underscore, e.g.
/// `COVIDASH_SOURCE__BASE_URL` or `COVIDASH_SOURCE__FALLBACK=always`.
pub const ENV_PREFIX: &str = "COVIDASH_";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub source: Source,
    pub retry: RetryPolicy,
    pub dashboard: Dashboard,
}

impl Config {
    /// Built-in defaults with no file or environment applied.
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by `COVIDASH_*` environment variables.
    pub fn from_env() -> Result<Self, Error> {
        Self::extract(Self::base())
    }

    /// Load a TOML file, then apply environment overrides on top of it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::InvalidPath(path.to_path_buf()));
        }
        Self::extract(Self::base().merge(Toml::file(path)))
    }

    /// Render the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, Error> {
        Ok(toml_edit::ser::to_string_pretty(self)?)
    }

    fn base() -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
    }

    fn extract(figment: Figment) -> Result<Self, Error> {
        let mut config: Self = figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;
        config.retry = config.retry.clamp();
        Ok(config)
    }
}
