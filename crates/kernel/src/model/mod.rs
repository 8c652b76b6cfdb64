//! Raw payload shapes of the statistics API.

mod continent;
mod country;
mod global;
mod historical;
mod vaccine;

pub use continent::{RawContinentRecord, UNKNOWN_CONTINENT, continent_of};
pub use country::{CountryInfo, CountryTable, RawCountryRecord};
pub use global::RawGlobalSnapshot;
pub use historical::{CountryHistorical, DailyCounts, HistoricalPayload, RawHistoricalSeries};
pub use vaccine::{RawVaccineTimeline, VaccinePayload};
