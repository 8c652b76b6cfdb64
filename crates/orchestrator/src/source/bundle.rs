use super::Scope;
use crate::error::FetchError;
use chrono::{DateTime, Utc};
use kernel::Metric;
use kernel::model::{RawCountryRecord, RawGlobalSnapshot, RawHistoricalSeries, RawVaccineTimeline};

/// Headline totals for a scope.
#[derive(Debug, Clone, PartialEq)]
pub enum Current {
    Global(RawGlobalSnapshot),
    Country(RawCountryRecord),
}

impl Current {
    pub fn value(&self, metric: Metric) -> f64 {
        match self {
            Current::Global(snapshot) => snapshot.value(metric),
            Current::Country(record) => record.value(metric),
        }
    }
}

/// Result of one composite dashboard fetch. Slots succeed or fail independently.
#[derive(Debug, Clone)]
pub struct DashboardBundle {
    pub scope: Scope,
    pub current: Result<Current, FetchError>,
    pub countries: Result<Vec<RawCountryRecord>, FetchError>,
    pub historical: Result<RawHistoricalSeries, FetchError>,
    pub vaccine: Result<RawVaccineTimeline, FetchError>,
    pub fetched_at: DateTime<Utc>,
}

impl DashboardBundle {
    /// Names and errors of the slots that failed.
    pub fn errors(&self) -> Vec<(&'static str, &FetchError)> {
        [
            ("current", self.current.as_ref().err()),
            ("countries", self.countries.as_ref().err()),
            ("historical", self.historical.as_ref().err()),
            ("vaccine", self.vaccine.as_ref().err()),
        ]
        .into_iter()
        .filter_map(|(slot, err)| err.map(|err| (slot, err)))
        .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.errors().is_empty()
    }
}
