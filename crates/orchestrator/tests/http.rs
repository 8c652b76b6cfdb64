#![forbid(unsafe_code)]

mod common;

use config::{Config, FallbackMode};
use kernel::Metric;
use mockito::{Matcher, Server};
use orchestrator::source::{ApiClient, Lookback, Scope};
use orchestrator::{FetchError, SystemClock};
use std::sync::Arc;
use std::time::Duration;

fn config_for(server: &Server) -> Config {
    let mut config = Config::new();
    config.source.base_url = server.url();
    config.source.fallback = FallbackMode::Never;
    config.retry.base_delay = Duration::from_millis(5);
    config
}

#[tokio::test]
async fn fetches_and_decodes_over_http() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/all")
        .match_header("accept", "application/json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(common::GLOBAL)
        .expect(1)
        .create_async()
        .await;

    let client = ApiClient::from_config(&config_for(&server), Arc::new(SystemClock)).unwrap();
    let global = client.global().await.unwrap();
    assert_eq!(global.value(Metric::Tests), 5000.0);
    mock.assert_async().await;
}

#[tokio::test]
async fn sends_lookback_as_query() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/historical/all")
        .match_query(Matcher::UrlEncoded("lastdays".into(), "30".into()))
        .with_status(200)
        .with_body(common::HISTORICAL_ALL)
        .create_async()
        .await;

    let client = ApiClient::from_config(&config_for(&server), Arc::new(SystemClock)).unwrap();
    let series = client.historical(&Scope::All, Lookback::Days(30)).await.unwrap();
    assert_eq!(series.get(Metric::Deaths).map(<[_]>::len), Some(5));
    mock.assert_async().await;
}

#[tokio::test]
async fn server_errors_are_retried_until_exhausted() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/countries")
        .with_status(502)
        .expect(3)
        .create_async()
        .await;

    let client = ApiClient::from_config(&config_for(&server), Arc::new(SystemClock)).unwrap();
    let err = client.countries().await.unwrap_err();
    assert!(matches!(err, FetchError::Exhausted { attempts: 3, .. }), "{err}");
    assert!(matches!(err.root(), FetchError::Status { status: 502, .. }));
    mock.assert_async().await;
}

#[tokio::test]
async fn not_found_is_reported_once() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/countries/Atlantis")
        .with_status(404)
        .with_body(r#"{"message": "Country not found or doesn't have any cases"}"#)
        .expect(1)
        .create_async()
        .await;

    let client = ApiClient::from_config(&config_for(&server), Arc::new(SystemClock)).unwrap();
    let err = client.country("Atlantis").await.unwrap_err();
    assert!(matches!(err, FetchError::Status { status: 404, .. }), "{err}");
    mock.assert_async().await;
}

#[tokio::test]
async fn unreachable_server_falls_back_when_allowed() {
    let server = Server::new_async().await;
    let mut config = config_for(&server);
    // Nothing listens on the discard port.
    config.source.base_url = "http://127.0.0.1:9/".into();
    config.source.fallback = FallbackMode::OnFailure;
    config.retry.max_retries = 0;

    let client = ApiClient::from_config(&config, Arc::new(SystemClock)).unwrap();
    let countries = client.countries().await.unwrap();
    assert!(!countries.is_empty());
}
