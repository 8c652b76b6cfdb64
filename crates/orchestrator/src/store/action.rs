use super::Domain;
use crate::error::FetchError;
use crate::source::Scope;
use chrono::{DateTime, Utc};
use kernel::model::{
    RawContinentRecord, RawCountryRecord, RawGlobalSnapshot, RawHistoricalSeries,
    RawVaccineTimeline,
};
use kernel::{DateRange, Metric};

/// Identity of an issued request: which domain, in which order, for which
/// selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTag {
    pub domain: Domain,
    pub seq: u64,
    pub scope: Scope,
    pub range: DateRange,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Global(RawGlobalSnapshot),
    Countries(Vec<RawCountryRecord>),
    Historical(RawHistoricalSeries),
    Vaccine(RawVaccineTimeline),
    Continents(Vec<RawContinentRecord>),
}

impl Payload {
    pub fn domain(&self) -> Domain {
        match self {
            Payload::Global(_) => Domain::Global,
            Payload::Countries(_) => Domain::Countries,
            Payload::Historical(_) => Domain::Historical,
            Payload::Vaccine(_) => Domain::Vaccine,
            Payload::Continents(_) => Domain::Continents,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    FetchStarted(RequestTag),
    FetchSucceeded {
        tag: RequestTag,
        payload: Payload,
        at: DateTime<Utc>,
    },
    FetchFailed {
        tag: RequestTag,
        error: FetchError,
    },
    SelectCountry(Scope),
    SetDateRange(DateRange),
    SetMetric(Metric),
    TogglePerCapita,
    ToggleShowAverage,
    ToggleCompareMode,
    AddComparedCountry(String),
    RemoveComparedCountry(String),
}

/// What a dispatched action did to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// State changed.
    Applied,
    /// A completion for a superseded request; nothing changed.
    Stale,
    /// The action was well formed but had no effect.
    Unchanged,
    /// The payload does not belong to the tagged domain.
    Mismatched,
}
