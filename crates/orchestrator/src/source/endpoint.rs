use crate::error::FetchError;
use chrono::NaiveDate;
use kernel::DateRange;
use std::fmt;
use url::Url;

/// Which slice of the data a request covers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Scope {
    #[default]
    All,
    Country(String),
}

impl Scope {
    /// `"all"` (any case) or blank selects [`Scope::All`], anything else a country.
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        if input.is_empty() || input.eq_ignore_ascii_case("all") {
            Scope::All
        } else {
            Scope::Country(input.to_owned())
        }
    }

    pub fn country(&self) -> Option<&str> {
        match self {
            Scope::All => None,
            Scope::Country(name) => Some(name),
        }
    }

    fn path_segment(&self) -> &str {
        match self {
            Scope::All => "all",
            Scope::Country(name) => name,
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_segment())
    }
}

/// Value of the `lastdays` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lookback {
    Days(u32),
    All,
}

impl Lookback {
    /// Smallest lookback that covers `range` as seen from `today`.
    pub fn for_range(range: &DateRange, today: NaiveDate) -> Self {
        match range.lookback_from(today) {
            Some(days) => Lookback::Days(days.max(1)),
            None => Lookback::All,
        }
    }
}

impl fmt::Display for Lookback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lookback::Days(days) => write!(f, "{days}"),
            Lookback::All => f.write_str("all"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Global,
    Countries,
    Country(String),
    Historical { scope: Scope, lastdays: Lookback },
    Vaccine { scope: Scope, lastdays: Lookback },
    Continents,
}

impl Endpoint {
    /// Reject requests that could only fail, before any I/O.
    pub fn validate(&self) -> Result<(), FetchError> {
        let country = match self {
            Endpoint::Country(name) => Some(name.as_str()),
            Endpoint::Historical { scope, .. } | Endpoint::Vaccine { scope, .. } => scope.country(),
            _ => None,
        };
        match country {
            Some(name) if name.trim().is_empty() => Err(FetchError::InvalidInput(
                "country parameter is required".into(),
            )),
            _ => Ok(()),
        }
    }

    /// Resolve against `base`. Country names are percent-encoded as one path segment.
    pub fn url(&self, base: &Url) -> Result<Url, FetchError> {
        let mut url = base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| FetchError::InvalidInput(format!("{base} cannot be a base url")))?;
            segments.pop_if_empty();
            match self {
                Endpoint::Global => {
                    segments.push("all");
                }
                Endpoint::Countries => {
                    segments.push("countries");
                }
                Endpoint::Country(name) => {
                    segments.extend(["countries", name.trim()]);
                }
                Endpoint::Historical { scope, .. } => {
                    segments.extend(["historical", scope.path_segment().trim()]);
                }
                Endpoint::Vaccine { scope, .. } => {
                    segments.extend(["vaccine", "coverage"]);
                    if let Scope::Country(name) = scope {
                        segments.extend(["countries", name.trim()]);
                    }
                }
                Endpoint::Continents => {
                    segments.push("continents");
                }
            }
        }

        url.set_query(None);
        if let Endpoint::Historical { lastdays, .. } | Endpoint::Vaccine { lastdays, .. } = self {
            url.query_pairs_mut()
                .append_pair("lastdays", &lastdays.to_string());
        }
        Ok(url)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Global => f.write_str("global"),
            Endpoint::Countries => f.write_str("countries"),
            Endpoint::Country(name) => write!(f, "country({name})"),
            Endpoint::Historical { scope, lastdays } => write!(f, "historical({scope}, {lastdays})"),
            Endpoint::Vaccine { scope, lastdays } => write!(f, "vaccine({scope}, {lastdays})"),
            Endpoint::Continents => f.write_str("continents"),
        }
    }
}
