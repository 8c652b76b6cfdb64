use super::Scope;
use crate::error::FetchError;
use kernel::model::{
    RawContinentRecord, RawCountryRecord, RawGlobalSnapshot, RawHistoricalSeries,
    RawVaccineTimeline,
};
use kernel::Metric;
use serde::Deserialize;

const BUNDLED: &str = include_str!("../../data/fallback.json");

/// Static data served when the API is unreachable or disabled.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FallbackDataset {
    global_snapshot: RawGlobalSnapshot,
    countries: Vec<RawCountryRecord>,
    historical: RawHistoricalSeries,
    vaccine: RawVaccineTimeline,
}

impl FallbackDataset {
    pub fn bundled() -> Result<Self, FetchError> {
        Self::from_json(BUNDLED)
    }

    pub fn from_json(json: &str) -> Result<Self, FetchError> {
        serde_json::from_str(json).map_err(|err| FetchError::Parse {
            endpoint: "fallback dataset".into(),
            message: err.to_string(),
        })
    }

    pub fn global(&self) -> RawGlobalSnapshot {
        self.global_snapshot.clone()
    }

    pub fn countries(&self) -> Vec<RawCountryRecord> {
        self.countries.clone()
    }

    /// Country by name or code, or the first bundled country when none matches.
    pub fn country(&self, needle: &str) -> RawCountryRecord {
        self.countries
            .iter()
            .find(|record| record.matches(needle))
            .or_else(|| self.countries.first())
            .cloned()
            .unwrap_or_default()
    }

    /// The bundled timeline stands in for every scope.
    pub fn historical(&self, _scope: &Scope) -> RawHistoricalSeries {
        self.historical.clone()
    }

    pub fn vaccine(&self, _scope: &Scope) -> RawVaccineTimeline {
        self.vaccine.clone()
    }

    pub fn continents(&self) -> Vec<RawContinentRecord> {
        RawContinentRecord::aggregate(&self.countries)
    }

    /// Bundled countries ordered by `metric`, largest first.
    pub fn top_countries(&self, limit: usize, metric: Metric) -> Vec<RawCountryRecord> {
        let mut countries = self.countries();
        countries.sort_by(|a, b| b.value(metric).total_cmp(&a.value(metric)));
        countries.truncate(limit);
        countries
    }
}
