use super::{DailyCounts, RawHistoricalSeries};
use crate::Metric;
use crate::date::parse_series_date;
use crate::lenient::Lenient;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_with::serde_as;

/// Cumulative doses administered, keyed by `M/D/YY`.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawVaccineTimeline(#[serde_as(as = "serde_with::Map<_, Lenient>")] pub DailyCounts);

impl RawVaccineTimeline {
    /// View as a single-metric historical series keyed `vaccinated`.
    pub fn to_series(&self) -> RawHistoricalSeries {
        RawHistoricalSeries::single(Metric::Vaccinated, self.0.clone())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The vaccine coverage endpoints answer in three shapes depending on the
/// scope and on `fullData`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VaccinePayload {
    Country {
        country: String,
        timeline: RawVaccineTimeline,
    },
    Wrapped {
        timeline: RawVaccineTimeline,
    },
    Flat(#[serde(deserialize_with = "dated_timeline")] RawVaccineTimeline),
}

/// A bare object only counts as a timeline when every key is a date.
fn dated_timeline<'de, D>(deserializer: D) -> Result<RawVaccineTimeline, D::Error>
where
    D: Deserializer<'de>,
{
    let timeline = RawVaccineTimeline::deserialize(deserializer)?;
    if let Some((key, _)) = timeline.0.iter().find(|(key, _)| parse_series_date(key).is_err()) {
        return Err(D::Error::custom(format!("`{key}` is not a timeline date")));
    }
    Ok(timeline)
}

impl VaccinePayload {
    pub fn into_timeline(self) -> RawVaccineTimeline {
        match self {
            VaccinePayload::Country { timeline, .. }
            | VaccinePayload::Wrapped { timeline }
            | VaccinePayload::Flat(timeline) => timeline,
        }
    }
}
