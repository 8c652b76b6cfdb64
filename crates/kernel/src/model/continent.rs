use super::RawCountryRecord;
use crate::Metric;
use crate::lenient::Lenient;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;

pub const UNKNOWN_CONTINENT: &str = "Unknown";

#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawContinentRecord {
    pub continent: String,
    #[serde_as(as = "Lenient")]
    pub cases: f64,
    #[serde_as(as = "Lenient")]
    pub deaths: f64,
    #[serde_as(as = "Lenient")]
    pub recovered: f64,
    #[serde_as(as = "Lenient")]
    pub active: f64,
    #[serde_as(as = "Lenient")]
    pub population: f64,
    pub countries: Vec<String>,
}

impl RawContinentRecord {
    /// Roll country records up into continents, in first-seen order.
    pub fn aggregate(records: &[RawCountryRecord]) -> Vec<Self> {
        let mut continents: Vec<Self> = Vec::new();
        for record in records {
            let name = continent_of(record);
            let ix = match continents.iter().position(|c| c.continent == name) {
                Some(ix) => ix,
                None => {
                    continents.push(Self {
                        continent: name.to_owned(),
                        ..Default::default()
                    });
                    continents.len() - 1
                }
            };
            let entry = &mut continents[ix];
            entry.cases += record.value(Metric::Cases);
            entry.deaths += record.value(Metric::Deaths);
            entry.recovered += record.value(Metric::Recovered);
            entry.active += record.value(Metric::Active);
            entry.population += record.value(Metric::Population);
            entry.countries.push(record.country.clone());
        }
        continents
    }
}

/// Continent name of a record, `"Unknown"` when missing or blank.
pub fn continent_of(record: &RawCountryRecord) -> &str {
    record
        .continent
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(UNKNOWN_CONTINENT)
}
