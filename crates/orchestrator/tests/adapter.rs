#![forbid(unsafe_code)]

mod common;

use common::{FakeTransport, FixedClock, config, healthy};
use config::FallbackMode;
use kernel::Metric;
use orchestrator::FetchError;
use orchestrator::source::{ApiClient, Current, FallbackDataset, Lookback, Scope};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::time::Duration;

fn client(transport: FakeTransport, fallback: FallbackMode) -> ApiClient<FakeTransport> {
    ApiClient::new(transport, &config(fallback), Arc::new(FixedClock)).unwrap()
}

fn unavailable() -> FetchError {
    FetchError::Status {
        status: 503,
        url: "all".into(),
    }
}

#[tokio::test(start_paused = true)]
async fn decodes_every_endpoint() {
    let client = client(healthy(), FallbackMode::Never);

    let global = client.global().await.unwrap();
    assert_eq!(global.cases, 1000.0);
    assert!(global.updated.is_some());

    let countries = client.countries().await.unwrap();
    assert_eq!(countries.len(), 3);
    assert_eq!(countries[1].deaths, 3.0);
    assert_eq!(countries[2].coordinates(), None);

    let historical = client.historical(&Scope::All, Lookback::Days(5)).await.unwrap();
    assert_eq!(historical.get(Metric::Cases).map(<[_]>::len), Some(5));
    assert_eq!(historical.get(Metric::Recovered).map(<[_]>::len), Some(0));

    let vaccine = client.vaccine(&Scope::All, Lookback::All).await.unwrap();
    assert_eq!(vaccine.0.len(), 3);

    let continents = client.continents().await.unwrap();
    assert_eq!(continents[0].continent, "Europe");
}

#[tokio::test(start_paused = true)]
async fn decodes_country_shapes() {
    let transport = FakeTransport::new()
        .route("historical/France", Ok(common::historical_country("France", 5).as_str()))
        .route("vaccine/coverage/countries/France", Ok(common::vaccine_country("France").as_str()));
    let client = client(transport, FallbackMode::Never);
    let france = Scope::Country("France".into());

    let historical = client.historical(&france, Lookback::Days(2)).await.unwrap();
    assert_eq!(
        historical.get(Metric::Cases),
        Some(&[("4/29/24".to_owned(), 5.0), ("4/30/24".to_owned(), 15.0)][..])
    );
    let vaccine = client.vaccine(&france, Lookback::Days(2)).await.unwrap();
    assert_eq!(vaccine.0.len(), 2);
}

#[tokio::test(start_paused = true)]
async fn transient_failures_are_retried_then_succeed() {
    let transport = FakeTransport::new()
        .route("all", Err(unavailable()))
        .route("all", Err(FetchError::Network("reset".into())))
        .route("all", Ok(common::GLOBAL));
    let log = transport.log();
    let client = client(transport, FallbackMode::Never);

    let started = tokio::time::Instant::now();
    let global = client.global().await.unwrap();
    assert_eq!(global.deaths, 10.0);
    assert_eq!(log.count("all"), 3);
    // 1s then 1.5s of backoff.
    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_millis(2500), "{elapsed:?}");
    assert!(elapsed < Duration::from_millis(2600), "{elapsed:?}");
}

#[tokio::test(start_paused = true)]
async fn exhausted_retries_report_attempts() {
    let transport = FakeTransport::new().route("countries", Err(unavailable()));
    let log = transport.log();
    let client = client(transport, FallbackMode::Never);

    let err = client.countries().await.unwrap_err();
    assert_eq!(log.count("countries"), 3);
    match &err {
        FetchError::Exhausted { attempts, .. } => assert_eq!(*attempts, 3),
        other => panic!("expected exhausted, got {other:?}"),
    }
    assert_eq!(err.root(), &unavailable());
}

#[tokio::test(start_paused = true)]
async fn parse_errors_are_not_retried() {
    let transport = FakeTransport::new().route("all", Ok("<html>maintenance</html>"));
    let log = transport.log();
    let client = client(transport, FallbackMode::Never);

    let err = client.global().await.unwrap_err();
    assert!(matches!(err, FetchError::Parse { .. }));
    assert_eq!(log.len(), 1);
}

const NOT_FOUND: &str = r#"{"message": "Country not found or doesn't have any cases"}"#;

#[tokio::test(start_paused = true)]
async fn error_objects_with_ok_status_are_parse_errors() {
    let transport = FakeTransport::new()
        .route("all", Ok(NOT_FOUND))
        .route("countries/Atlantis", Ok(NOT_FOUND))
        .route("vaccine/coverage/countries/Atlantis", Ok(NOT_FOUND));
    let log = transport.log();
    let client = client(transport, FallbackMode::Never);
    let atlantis = Scope::Country("Atlantis".into());

    let err = client.global().await.unwrap_err();
    assert!(matches!(err, FetchError::Parse { .. }), "{err}");
    let err = client.country("Atlantis").await.unwrap_err();
    assert!(matches!(err, FetchError::Parse { .. }), "{err}");
    let err = client.vaccine(&atlantis, Lookback::All).await.unwrap_err();
    assert!(matches!(err, FetchError::Parse { .. }), "{err}");

    assert_eq!(log.count("all"), 1);
    assert_eq!(log.count("countries/Atlantis"), 1);
    assert_eq!(log.count("vaccine/coverage/countries/Atlantis"), 1);
}

#[tokio::test(start_paused = true)]
async fn error_objects_trigger_fallback_when_allowed() {
    let transport = FakeTransport::new().route("all", Ok(NOT_FOUND));
    let client = client(transport, FallbackMode::OnFailure);

    let global = client.global().await.unwrap();
    assert_eq!(global, FallbackDataset::bundled().unwrap().global());
}

#[tokio::test(start_paused = true)]
async fn client_errors_are_not_retried() {
    let transport = FakeTransport::new();
    let log = transport.log();
    let client = client(transport, FallbackMode::Never);

    let err = client.country("Atlantis").await.unwrap_err();
    assert!(matches!(err, FetchError::Status { status: 404, .. }));
    assert_eq!(log.count("countries/Atlantis"), 1);
}

#[tokio::test(start_paused = true)]
async fn hanging_requests_time_out_per_attempt() {
    let transport = FakeTransport::new().hang("all");
    let client = client(transport, FallbackMode::Never);

    let started = tokio::time::Instant::now();
    let err = client.global().await.unwrap_err();
    assert_eq!(err.root(), &FetchError::Timeout(Duration::from_secs(15)));
    // Three 15s attempts plus 2.5s of backoff.
    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_millis(47_500), "{elapsed:?}");
    assert!(elapsed < Duration::from_secs(48), "{elapsed:?}");
}

#[tokio::test(start_paused = true)]
async fn empty_country_is_rejected_without_io() {
    let transport = FakeTransport::new();
    let log = transport.log();
    let client = client(transport, FallbackMode::OnFailure);

    let err = client.country("  ").await.unwrap_err();
    assert!(matches!(err, FetchError::InvalidInput(_)));
    let err = client
        .historical(&Scope::Country(String::new()), Lookback::All)
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::InvalidInput(_)));
    assert_eq!(log.len(), 0);
}

#[tokio::test(start_paused = true)]
async fn always_fallback_never_touches_the_network() {
    let transport = healthy();
    let log = transport.log();
    let client = client(transport, FallbackMode::Always);
    let dataset = FallbackDataset::bundled().unwrap();

    assert_eq!(client.global().await.unwrap(), dataset.global());
    assert_eq!(client.country("india").await.unwrap().country, "India");
    assert_eq!(client.country("Atlantis").await.unwrap(), dataset.countries()[0]);
    assert!(!client.continents().await.unwrap().is_empty());
    assert!(!client.vaccine(&Scope::All, Lookback::All).await.unwrap().is_empty());
    assert_eq!(log.len(), 0);
}

#[tokio::test(start_paused = true)]
async fn on_failure_fallback_serves_bundled_data() {
    let transport = FakeTransport::new()
        .route("all", Ok(common::GLOBAL))
        .route("countries", Err(unavailable()));
    let client = client(transport, FallbackMode::OnFailure);

    assert_eq!(client.global().await.unwrap().cases, 1000.0);
    let countries = client.countries().await.unwrap();
    assert_eq!(countries, FallbackDataset::bundled().unwrap().countries());
}

#[tokio::test(start_paused = true)]
async fn top_countries_sorts_by_metric() {
    let client = client(healthy(), FallbackMode::Never);
    let top = client.top_countries(2, Metric::Deaths).await.unwrap();
    let names: Vec<_> = top.iter().map(|r| r.country.as_str()).collect();
    assert_eq!(names, vec!["France", "India"]);
}

#[tokio::test(start_paused = true)]
async fn bundle_keeps_partial_results() {
    let down = FetchError::Status {
        status: 503,
        url: "vaccine/coverage".into(),
    };
    let transport = FakeTransport::new()
        .route("all", Ok(common::GLOBAL))
        .route("countries", Ok(common::COUNTRIES))
        .route("historical/all", Ok(common::HISTORICAL_ALL))
        .route("vaccine/coverage", Err(down.clone()));
    let log = transport.log();
    let client = client(transport, FallbackMode::Never);

    let bundle = client.fetch_dashboard_bundle(&Scope::All, Lookback::Days(30)).await;
    assert!(matches!(bundle.current, Ok(Current::Global(_))));
    assert_eq!(bundle.countries.as_ref().map(Vec::len), Ok(3));
    assert!(bundle.historical.is_ok());
    assert!(!bundle.is_complete());

    match &bundle.vaccine {
        Err(err @ FetchError::Exhausted { attempts: 3, .. }) => assert_eq!(err.root(), &down),
        other => panic!("expected exhausted retries, got {other:?}"),
    }
    assert_eq!(log.count("vaccine/coverage"), 3);
    assert_eq!(log.count("all"), 1);

    let failed: Vec<_> = bundle.errors().into_iter().map(|(slot, _)| slot).collect();
    assert_eq!(failed, vec!["vaccine"]);
}

#[tokio::test(start_paused = true)]
async fn bundle_for_a_country_fetches_its_record() {
    let transport = healthy()
        .route("countries/India", Ok(r#"{"country": "India", "cases": 300}"#))
        .route("historical/India", Ok(common::historical_country("India", 1).as_str()))
        .route("vaccine/coverage/countries/India", Ok(common::vaccine_country("India").as_str()));
    let client = client(transport, FallbackMode::Never);

    let bundle = client
        .fetch_dashboard_bundle(&Scope::Country("India".into()), Lookback::Days(2))
        .await;
    assert!(bundle.is_complete());
    match bundle.current {
        Ok(Current::Country(record)) => assert_eq!(record.cases, 300.0),
        other => panic!("expected a country record, got {other:?}"),
    }
}

#[test]
fn invalid_base_url_is_rejected() {
    let mut config = config(FallbackMode::Never);
    config.source.base_url = "not a url".into();
    let result = ApiClient::new(FakeTransport::new(), &config, Arc::new(FixedClock));
    assert!(matches!(result, Err(orchestrator::Error::InvalidBaseUrl { .. })));
}
