#![allow(dead_code)]

use chrono::{DateTime, NaiveDate, Utc};
use config::{Config, FallbackMode};
use orchestrator::{Clock, FetchError};
use orchestrator::source::Transport;
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use url::Url;

pub const BASE_URL: &str = "http://fake.test/api/";

pub fn config(fallback: FallbackMode) -> Config {
    let mut config = Config::new();
    config.source.base_url = BASE_URL.into();
    config.source.fallback = fallback;
    config
}

/// Wall clock pinned to the end of April 2024; sleeps on tokio time.
pub struct FixedClock;

#[async_trait::async_trait]
impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        NaiveDate::from_ymd_opt(2024, 4, 30)
            .and_then(|day| day.and_hms_opt(12, 0, 0))
            .map(|at| at.and_utc())
            .unwrap_or_default()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Holds responses for one path until released.
pub struct Gate {
    pub path: String,
    pub entered: Arc<Notify>,
    pub release: Arc<Notify>,
}

#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    pub fn len(&self) -> usize {
        self.0.lock().len()
    }

    pub fn count(&self, path: &str) -> usize {
        self.0.lock().iter().filter(|p| *p == path).count()
    }
}

/// Answers by URL path relative to [`BASE_URL`]. Each path serves its queued
/// responses in order and keeps repeating the last one.
#[derive(Default)]
pub struct FakeTransport {
    routes: Mutex<HashMap<String, VecDeque<Result<String, FetchError>>>>,
    calls: CallLog,
    gate: Option<Gate>,
    hang: Mutex<Vec<String>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_gate(mut self, gate: Gate) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn route(self, path: &str, response: Result<&str, FetchError>) -> Self {
        self.routes
            .lock()
            .entry(path.to_owned())
            .or_default()
            .push_back(response.map(str::to_owned));
        self
    }

    /// Requests for `path` never complete.
    pub fn hang(self, path: &str) -> Self {
        self.hang.lock().push(path.to_owned());
        self
    }

    /// Shared view of the requests made, usable after the transport moves.
    pub fn log(&self) -> CallLog {
        self.calls.clone()
    }

    fn respond(&self, path: &str) -> Result<String, FetchError> {
        let mut routes = self.routes.lock();
        let Some(queue) = routes.get_mut(path) else {
            return Err(FetchError::Status {
                status: 404,
                url: path.to_owned(),
            });
        };
        if queue.len() > 1 {
            queue.pop_front().unwrap_or_else(|| Err(FetchError::Network("empty".into())))
        } else {
            queue
                .front()
                .cloned()
                .unwrap_or_else(|| Err(FetchError::Network("empty".into())))
        }
    }
}

#[async_trait::async_trait]
impl Transport for FakeTransport {
    async fn get(&self, url: &Url) -> Result<String, FetchError> {
        let path = url.path().trim_start_matches("/api/").to_owned();
        self.calls.0.lock().push(path.clone());

        if self.hang.lock().contains(&path) {
            tokio::time::sleep(Duration::from_secs(24 * 3600)).await;
        }
        if let Some(gate) = &self.gate
            && gate.path == path
        {
            gate.entered.notify_one();
            gate.release.notified().await;
        }
        self.respond(&path)
    }
}

pub const GLOBAL: &str = r#"{
    "updated": 1714435200000,
    "cases": 1000, "deaths": 10, "recovered": 900, "active": 90,
    "todayCases": 100, "todayDeaths": 1, "tests": 5000, "population": 8000000000
}"#;

pub const COUNTRIES: &str = r#"[
    {"country": "France", "countryInfo": {"iso2": "FR", "iso3": "FRA", "lat": 46, "long": 2},
     "continent": "Europe", "cases": 600, "deaths": 6, "population": 60000000},
    {"country": "India", "countryInfo": {"iso2": "IN", "iso3": "IND", "lat": 20, "long": 77},
     "continent": "Asia", "cases": 300, "deaths": "3", "population": 1400000000},
    {"country": "MS Zaandam", "countryInfo": {"iso3": null, "lat": null, "long": null},
     "continent": null, "cases": 9, "deaths": 2, "population": 0}
]"#;

pub const HISTORICAL_ALL: &str = r#"{
    "cases": {"4/26/24": 900, "4/27/24": 930, "4/28/24": 925, "4/29/24": 990, "4/30/24": 1000},
    "deaths": {"4/26/24": 8, "4/27/24": 9, "4/28/24": 9, "4/29/24": 10, "4/30/24": 10},
    "recovered": {}
}"#;

pub fn historical_country(country: &str, cases: u32) -> String {
    format!(
        r#"{{"country": "{country}", "province": ["mainland"],
            "timeline": {{"cases": {{"4/29/24": {cases}, "4/30/24": {}}}}}}}"#,
        cases + 10
    )
}

pub const VACCINE_ALL: &str = r#"{"4/28/24": 100, "4/29/24": 150, "4/30/24": 210}"#;

pub fn vaccine_country(country: &str) -> String {
    format!(r#"{{"country": "{country}", "timeline": {{"4/29/24": 5, "4/30/24": 7}}}}"#)
}

pub const CONTINENTS: &str = r#"[
    {"continent": "Europe", "cases": 600, "deaths": 6, "countries": ["France"]},
    {"continent": "Asia", "cases": 300, "deaths": 3, "countries": ["India"]}
]"#;

/// A transport answering every endpoint for the global scope.
pub fn healthy() -> FakeTransport {
    FakeTransport::new()
        .route("all", Ok(GLOBAL))
        .route("countries", Ok(COUNTRIES))
        .route("historical/all", Ok(HISTORICAL_ALL))
        .route("vaccine/coverage", Ok(VACCINE_ALL))
        .route("continents", Ok(CONTINENTS))
}
