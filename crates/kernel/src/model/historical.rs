use crate::Metric;
use crate::lenient::Lenient;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use std::collections::BTreeMap;

/// `(M/D/YY key, cumulative count)` pairs in payload order.
pub type DailyCounts = Vec<(String, f64)>;

/// Cumulative timelines keyed by metric name.
///
/// Entries keep the order and duplicates of the payload they came from, so
/// "last occurrence wins" is decided by the transformer rather than by a map.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawHistoricalSeries(
    #[serde_as(as = "BTreeMap<_, serde_with::Map<_, Lenient>>")] BTreeMap<String, DailyCounts>,
);

impl RawHistoricalSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// A series holding a single timeline.
    pub fn single(metric: Metric, counts: DailyCounts) -> Self {
        let mut series = Self::new();
        series.insert(metric, counts);
        series
    }

    pub fn insert(&mut self, metric: Metric, counts: DailyCounts) {
        self.0.insert(metric.as_str().to_owned(), counts);
    }

    pub fn get(&self, metric: Metric) -> Option<&[(String, f64)]> {
        self.0.get(metric.as_str()).map(Vec::as_slice)
    }

    pub fn metrics(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(Vec::is_empty)
    }
}

/// Timeline for one country, as returned by `/historical/{country}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CountryHistorical {
    pub country: String,
    #[serde(default)]
    pub province: Option<Vec<String>>,
    #[serde(default)]
    pub timeline: RawHistoricalSeries,
}

/// Either historical payload shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HistoricalPayload {
    Country(CountryHistorical),
    Global(RawHistoricalSeries),
}

impl HistoricalPayload {
    pub fn into_series(self) -> RawHistoricalSeries {
        match self {
            HistoricalPayload::Country(country) => country.timeline,
            HistoricalPayload::Global(series) => series,
        }
    }
}
