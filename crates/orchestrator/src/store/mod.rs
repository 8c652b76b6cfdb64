//! Single owner of dashboard state.
//!
//! Raw payloads, the user's selection and one [`FetchStatus`] per [`Domain`]
//! live here. Every mutation is an [`Action`] passed to [`Store::dispatch`];
//! read views in [`views`] derive chart data from raw state on each call.
//!
//! Each fetch is tagged by [`Store::begin_fetch`]. A completion is applied
//! only while its tag is the newest issued for the domain and, for
//! selection-dependent domains, while the selection it was issued for is
//! still current.

mod action;
mod selection;
mod status;
mod views;

pub use action::{Action, Dispatch, Payload, RequestTag};
pub use selection::{SelectionState, ViewFilters};
pub use status::{Domain, FetchStatus};
pub use views::Summary;

use crate::error::FetchError;
use crate::source::Scope;
use chrono::{DateTime, Utc};
use kernel::model::{CountryTable, RawContinentRecord, RawGlobalSnapshot, RawHistoricalSeries, RawVaccineTimeline};
use std::collections::HashMap;
use tracing::{debug, warn};

const DOMAINS: usize = Domain::ALL.len();

#[derive(Debug, Clone)]
pub struct Store {
    selection: SelectionState,
    statuses: [FetchStatus; DOMAINS],
    issued: [u64; DOMAINS],
    next_seq: u64,
    global: Option<RawGlobalSnapshot>,
    countries: Option<CountryTable>,
    historical: HashMap<Scope, RawHistoricalSeries>,
    vaccine: HashMap<Scope, RawVaccineTimeline>,
    continents: Option<Vec<RawContinentRecord>>,
}

impl Store {
    pub fn new(selection: SelectionState) -> Self {
        Self {
            selection,
            statuses: Default::default(),
            issued: [0; DOMAINS],
            next_seq: 0,
            global: None,
            countries: None,
            historical: HashMap::new(),
            vaccine: HashMap::new(),
            continents: None,
        }
    }

    /// Tag a new request for `domain` against the current selection and mark
    /// the domain as loading.
    pub fn begin_fetch(&mut self, domain: Domain) -> RequestTag {
        self.next_seq += 1;
        let tag = RequestTag {
            domain,
            seq: self.next_seq,
            scope: self.selection.selected_country.clone(),
            range: self.selection.date_range,
        };
        self.dispatch(Action::FetchStarted(tag.clone()));
        tag
    }

    /// Apply the outcome of a tagged request.
    pub fn complete(
        &mut self,
        tag: RequestTag,
        result: Result<Payload, FetchError>,
        at: DateTime<Utc>,
    ) -> Dispatch {
        match result {
            Ok(payload) => self.dispatch(Action::FetchSucceeded { tag, payload, at }),
            Err(error) => self.dispatch(Action::FetchFailed { tag, error }),
        }
    }

    pub fn dispatch(&mut self, action: Action) -> Dispatch {
        match action {
            Action::FetchStarted(tag) => {
                let issued = &mut self.issued[tag.domain.index()];
                if tag.seq < *issued {
                    return Dispatch::Stale;
                }
                *issued = tag.seq;
                self.next_seq = self.next_seq.max(tag.seq);
                self.status_mut(tag.domain).start();
                Dispatch::Applied
            }
            Action::FetchSucceeded { tag, payload, at } => {
                if payload.domain() != tag.domain {
                    warn!(tag = %tag.domain, payload = %payload.domain(), "payload does not match request");
                    return Dispatch::Mismatched;
                }
                if self.discard_if_stale(&tag) {
                    debug!(domain = %tag.domain, seq = tag.seq, "discarding stale response");
                    return Dispatch::Stale;
                }
                self.store_payload(tag.scope, payload);
                self.status_mut(tag.domain).succeed(at);
                Dispatch::Applied
            }
            Action::FetchFailed { tag, error } => {
                if self.discard_if_stale(&tag) {
                    debug!(domain = %tag.domain, seq = tag.seq, %error, "discarding stale failure");
                    return Dispatch::Stale;
                }
                self.status_mut(tag.domain).fail(error.to_string());
                Dispatch::Applied
            }
            Action::SelectCountry(scope) => {
                Self::replace(&mut self.selection.selected_country, scope)
            }
            Action::SetDateRange(range) => Self::replace(&mut self.selection.date_range, range),
            Action::SetMetric(metric) => Self::replace(&mut self.selection.active_metric, metric),
            Action::TogglePerCapita => {
                self.selection.filters.per_capita ^= true;
                Dispatch::Applied
            }
            Action::ToggleShowAverage => {
                self.selection.filters.show_average ^= true;
                Dispatch::Applied
            }
            Action::ToggleCompareMode => {
                self.selection.filters.compare_mode ^= true;
                Dispatch::Applied
            }
            Action::AddComparedCountry(name) => {
                let name = name.trim();
                let compared = &mut self.selection.filters.compared_countries;
                if name.is_empty() || compared.iter().any(|c| c == name) {
                    return Dispatch::Unchanged;
                }
                compared.push(name.to_owned());
                Dispatch::Applied
            }
            Action::RemoveComparedCountry(name) => {
                let compared = &mut self.selection.filters.compared_countries;
                let before = compared.len();
                compared.retain(|c| c != name.trim());
                if compared.len() == before {
                    Dispatch::Unchanged
                } else {
                    Dispatch::Applied
                }
            }
        }
    }

    fn replace<V: PartialEq>(slot: &mut V, value: V) -> Dispatch {
        if *slot == value {
            Dispatch::Unchanged
        } else {
            *slot = value;
            Dispatch::Applied
        }
    }

    /// True when `tag` must not be applied. A superseded request changes
    /// nothing; the newest request for an outdated selection ends `loading`.
    fn discard_if_stale(&mut self, tag: &RequestTag) -> bool {
        if tag.seq < self.issued[tag.domain.index()] {
            return true;
        }
        let off_selection = tag.domain.depends_on_selection()
            && (tag.scope != self.selection.selected_country
                || tag.range != self.selection.date_range);
        if off_selection {
            self.status_mut(tag.domain).settle();
        }
        off_selection
    }

    fn status_mut(&mut self, domain: Domain) -> &mut FetchStatus {
        &mut self.statuses[domain.index()]
    }

    fn store_payload(&mut self, scope: Scope, payload: Payload) {
        match payload {
            Payload::Global(snapshot) => self.global = Some(snapshot),
            Payload::Countries(records) => self.countries = Some(CountryTable::new(records)),
            Payload::Historical(series) => {
                self.historical.insert(scope, series);
            }
            Payload::Vaccine(timeline) => {
                self.vaccine.insert(scope, timeline);
            }
            Payload::Continents(records) => self.continents = Some(records),
        }
    }
}
