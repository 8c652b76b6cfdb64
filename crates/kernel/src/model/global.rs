use crate::Metric;
use crate::lenient::Lenient;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use serde_with::formats::Flexible;

/// Worldwide totals at one point in time.
///
/// Counts default to zero, but `updated` must be present (it may be `null`):
/// an object without it is not a snapshot.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawGlobalSnapshot {
    #[serde_as(as = "Lenient")]
    #[serde(default)]
    pub cases: f64,
    #[serde_as(as = "Lenient")]
    #[serde(default)]
    pub deaths: f64,
    #[serde_as(as = "Lenient")]
    #[serde(default)]
    pub recovered: f64,
    #[serde_as(as = "Lenient")]
    #[serde(default)]
    pub active: f64,
    #[serde_as(as = "Lenient")]
    #[serde(default)]
    pub critical: f64,
    #[serde_as(as = "Lenient")]
    #[serde(default)]
    pub today_cases: f64,
    #[serde_as(as = "Lenient")]
    #[serde(default)]
    pub today_deaths: f64,
    #[serde_as(as = "Lenient")]
    #[serde(default)]
    pub today_recovered: f64,
    #[serde_as(as = "Lenient")]
    #[serde(default)]
    pub tests: f64,
    #[serde_as(as = "Lenient")]
    #[serde(default)]
    pub population: f64,
    #[serde_as(as = "Option<serde_with::TimestampMilliSeconds<i64, Flexible>>", no_default)]
    pub updated: Option<DateTime<Utc>>,
}

impl RawGlobalSnapshot {
    pub fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Cases => self.cases,
            Metric::Deaths => self.deaths,
            Metric::Recovered => self.recovered,
            Metric::Active => self.active,
            Metric::Critical => self.critical,
            Metric::Tests => self.tests,
            Metric::Population => self.population,
            Metric::TodayCases => self.today_cases,
            Metric::TodayDeaths => self.today_deaths,
            Metric::TodayRecovered => self.today_recovered,
            Metric::Vaccinated => 0.0,
        }
    }
}
