use crate::Metric;
use crate::lenient::{Lenient, LenientOption};
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use std::collections::HashMap;
use tracing::warn;

#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CountryInfo {
    pub iso2: Option<String>,
    pub iso3: Option<String>,
    #[serde_as(as = "LenientOption")]
    pub lat: Option<f64>,
    #[serde_as(as = "LenientOption")]
    pub long: Option<f64>,
    pub flag: Option<String>,
}

/// Per-country totals at one point in time.
///
/// Only `country` is required; everything else tolerates absence.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCountryRecord {
    pub country: String,
    #[serde(default)]
    pub country_info: CountryInfo,
    #[serde(default)]
    pub continent: Option<String>,
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
    pub population: f64,
    #[serde_as(as = "LenientOption")]
    #[serde(default)]
    pub tests: Option<f64>,
}

impl RawCountryRecord {
    /// Value of `metric`, zero when the record does not carry it.
    pub fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Cases => self.cases,
            Metric::Deaths => self.deaths,
            Metric::Recovered => self.recovered,
            Metric::Active => self.active,
            Metric::Critical => self.critical,
            Metric::Tests => self.tests.unwrap_or_default(),
            Metric::Population => self.population,
            Metric::TodayCases => self.today_cases,
            Metric::TodayDeaths => self.today_deaths,
            Metric::TodayRecovered => self.today_recovered,
            Metric::Vaccinated => 0.0,
        }
    }

    pub fn iso3(&self) -> Option<&str> {
        self.country_info.iso3.as_deref().filter(|code| !code.is_empty())
    }

    /// Both coordinates, if the record has them.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.country_info.lat?, self.country_info.long?))
    }

    /// Case-insensitive match on country name, ISO2 or ISO3 code.
    pub fn matches(&self, needle: &str) -> bool {
        let needle = needle.trim();
        self.country.eq_ignore_ascii_case(needle)
            || self.iso3().is_some_and(|code| code.eq_ignore_ascii_case(needle))
            || self
                .country_info
                .iso2
                .as_deref()
                .is_some_and(|code| code.eq_ignore_ascii_case(needle))
    }
}

/// Country records in API order plus an ISO3 index.
///
/// Every record with an ISO3 code is reachable through [`CountryTable::by_iso3`].
/// If a payload repeats a code, the later record owns the index entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CountryTable {
    records: Vec<RawCountryRecord>,
    by_iso3: HashMap<String, usize>,
}

impl CountryTable {
    pub fn new(records: Vec<RawCountryRecord>) -> Self {
        let mut by_iso3 = HashMap::with_capacity(records.len());
        for (ix, record) in records.iter().enumerate() {
            let Some(code) = record.iso3() else {
                continue;
            };
            if let Some(previous) = by_iso3.insert(code.to_ascii_uppercase(), ix) {
                warn!(
                    iso3 = code,
                    previous = %records[previous].country,
                    replacement = %record.country,
                    "duplicate ISO3 code in country list"
                );
            }
        }
        Self { records, by_iso3 }
    }

    pub fn records(&self) -> &[RawCountryRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn by_iso3(&self, code: &str) -> Option<&RawCountryRecord> {
        self.by_iso3
            .get(&code.trim().to_ascii_uppercase())
            .and_then(|ix| self.records.get(*ix))
    }

    /// Look up by ISO3 first, then by name or ISO2.
    pub fn find(&self, needle: &str) -> Option<&RawCountryRecord> {
        self.by_iso3(needle)
            .or_else(|| self.records.iter().find(|record| record.matches(needle)))
    }
}

impl From<Vec<RawCountryRecord>> for CountryTable {
    fn from(records: Vec<RawCountryRecord>) -> Self {
        Self::new(records)
    }
}
