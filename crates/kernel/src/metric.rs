use crate::Error;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// A numeric field that can be charted.
///
/// Names match the API's JSON field names, so a metric doubles as the key into
/// historical timelines (`cases`, `deaths`, `recovered`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Metric {
    #[default]
    Cases,
    Deaths,
    Recovered,
    Active,
    Critical,
    Tests,
    Population,
    TodayCases,
    TodayDeaths,
    TodayRecovered,
    Vaccinated,
}

impl Metric {
    pub const ALL: [Metric; 11] = [
        Metric::Cases,
        Metric::Deaths,
        Metric::Recovered,
        Metric::Active,
        Metric::Critical,
        Metric::Tests,
        Metric::Population,
        Metric::TodayCases,
        Metric::TodayDeaths,
        Metric::TodayRecovered,
        Metric::Vaccinated,
    ];

    /// Metrics present in historical timelines.
    pub const HISTORICAL: [Metric; 3] = [Metric::Cases, Metric::Deaths, Metric::Recovered];

    pub fn as_str(self) -> &'static str {
        match self {
            Metric::Cases => "cases",
            Metric::Deaths => "deaths",
            Metric::Recovered => "recovered",
            Metric::Active => "active",
            Metric::Critical => "critical",
            Metric::Tests => "tests",
            Metric::Population => "population",
            Metric::TodayCases => "todayCases",
            Metric::TodayDeaths => "todayDeaths",
            Metric::TodayRecovered => "todayRecovered",
            Metric::Vaccinated => "vaccinated",
        }
    }

    /// Human-readable label for legends and cards.
    pub fn label(self) -> &'static str {
        match self {
            Metric::Cases => "Cases",
            Metric::Deaths => "Deaths",
            Metric::Recovered => "Recovered",
            Metric::Active => "Active Cases",
            Metric::Critical => "Critical",
            Metric::Tests => "Tests",
            Metric::Population => "Population",
            Metric::TodayCases => "Daily Cases",
            Metric::TodayDeaths => "Daily Deaths",
            Metric::TodayRecovered => "Daily Recovered",
            Metric::Vaccinated => "Vaccinated",
        }
    }

    /// Whether a rise in this metric is bad news.
    pub fn rising_is_bad(self) -> bool {
        !matches!(
            self,
            Metric::Recovered | Metric::TodayRecovered | Metric::Tests | Metric::Vaccinated
        )
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Metric::ALL
            .into_iter()
            .find(|metric| metric.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownMetric(s.to_owned()))
    }
}
