use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use config::{Config, FallbackMode};
use kernel::Metric;
use orchestrator::source::Scope;
use std::path::{Path, PathBuf};

/// Covidash: headless COVID-19 dashboard data service
///
/// Keeps global, per-country, historical and vaccination statistics fresh
/// from the disease.sh API and logs dashboard summaries. Send SIGUSR1 to
/// refresh immediately and SIGUSR2 to log the current state.
#[derive(Debug, Parser, Clone)]
#[command(about, long_about, version)]
pub struct Cli {
    /// Path to configuration file.
    ///
    /// Without one, built-in defaults and `COVIDASH_*` environment variables
    /// are used.
    #[arg(short, long, value_parser = validate_file)]
    pub conffile: Option<PathBuf>,

    /// Country to show instead of worldwide figures.
    #[arg(short = 'C', long)]
    pub country: Option<String>,

    /// Days of history to show. 0 means all time.
    #[arg(short, long, value_parser = validate_days)]
    pub days: Option<u32>,

    /// Metric to chart, e.g. `cases`, `deaths` or `todayCases`.
    #[arg(short, long, value_parser = parse_metric)]
    pub metric: Option<Metric>,

    /// Serve bundled data only, never touch the network.
    #[arg(long)]
    pub offline: bool,

    /// Fetch one dashboard bundle, log it and exit.
    #[arg(long)]
    pub once: bool,

    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,
}

impl Cli {
    /// Fold command line overrides into the loaded configuration.
    pub fn apply(&self, config: &mut Config) {
        if self.offline {
            config.source.fallback = FallbackMode::Always;
        }
        if let Some(days) = self.days {
            config.dashboard.lookback_days = days;
        }
    }

    pub fn scope(&self) -> Scope {
        self.country.as_deref().map(Scope::parse).unwrap_or_default()
    }
}

/// Check if the file exists.
#[inline(always)]
fn validate_file(file: &str) -> Result<PathBuf, String> {
    let path = Path::new(file);
    if path.exists() {
        Ok(path.to_owned())
    } else {
        Err(format!("File not found: {:?}", path))
    }
}

/// Data starts in January 2020; anything longer than that is a typo.
const MAX_DAYS: u32 = 3650;

#[inline(always)]
fn validate_days(days: &str) -> Result<u32, String> {
    let days: u32 = days
        .parse()
        .map_err(|_| format!("`{days}` is not a valid number of days"))?;
    if days <= MAX_DAYS {
        Ok(days)
    } else {
        Err(format!("Days must be between 0 and {MAX_DAYS}"))
    }
}

fn parse_metric(metric: &str) -> Result<Metric, String> {
    metric.parse().map_err(|err: kernel::Error| err.to_string())
}
