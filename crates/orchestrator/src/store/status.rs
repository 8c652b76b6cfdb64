use chrono::{DateTime, Utc};
use std::fmt;

/// Independently fetched slices of store state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Domain {
    Global,
    Countries,
    Historical,
    Vaccine,
    Continents,
}

impl Domain {
    pub const ALL: [Domain; 5] = [
        Domain::Global,
        Domain::Countries,
        Domain::Historical,
        Domain::Vaccine,
        Domain::Continents,
    ];

    /// Domains whose request depends on the selected country and date range.
    pub const SELECTION_DEPENDENT: [Domain; 2] = [Domain::Historical, Domain::Vaccine];

    pub fn depends_on_selection(self) -> bool {
        Self::SELECTION_DEPENDENT.contains(&self)
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Domain::Global => "global",
            Domain::Countries => "countries",
            Domain::Historical => "historical",
            Domain::Vaccine => "vaccine",
            Domain::Continents => "continents",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Load state of one domain.
///
/// `idle` is the default; a fetch moves it to `loading`, and the fetch
/// outcome to success (`last_updated` set, `error` cleared) or failure
/// (`error` set, previous data and `last_updated` kept).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchStatus {
    pub loading: bool,
    pub error: Option<String>,
    pub last_updated: Option<DateTime<Utc>>,
}

impl FetchStatus {
    pub fn is_idle(&self) -> bool {
        !self.loading && self.error.is_none() && self.last_updated.is_none()
    }

    pub(crate) fn start(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub(crate) fn succeed(&mut self, at: DateTime<Utc>) {
        self.loading = false;
        self.error = None;
        self.last_updated = Some(at);
    }

    /// Leave `loading` without an outcome; data, error and timestamp stay.
    pub(crate) fn settle(&mut self) {
        self.loading = false;
    }

    pub(crate) fn fail(&mut self, message: String) {
        self.loading = false;
        self.error = Some(message);
    }
}
