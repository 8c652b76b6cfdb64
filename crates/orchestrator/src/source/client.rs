use super::bundle::{Current, DashboardBundle};
use super::retry::with_backoff;
use super::{Endpoint, FallbackDataset, HttpTransport, Lookback, Scope, Transport};
use crate::clock::Clock;
use crate::error::{Error, FetchError};
use config::{Config, FallbackMode, RetryPolicy};
use kernel::Metric;
use kernel::model::{
    HistoricalPayload, RawContinentRecord, RawCountryRecord, RawGlobalSnapshot,
    RawHistoricalSeries, RawVaccineTimeline, VaccinePayload,
};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Typed access to the statistics API.
///
/// Every call goes through the same pipeline: validation, a hard per-attempt
/// timeout, the retry policy, JSON decoding, then the configured fallback.
pub struct ApiClient<T = HttpTransport> {
    transport: T,
    base: Url,
    timeout: Duration,
    retry: RetryPolicy,
    fallback_mode: FallbackMode,
    fallback: FallbackDataset,
    clock: Arc<dyn Clock>,
}

impl ApiClient<HttpTransport> {
    pub fn from_config(config: &Config, clock: Arc<dyn Clock>) -> Result<Self, Error> {
        let transport = HttpTransport::new(config.source.timeout)?;
        Self::new(transport, config, clock)
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T, config: &Config, clock: Arc<dyn Clock>) -> Result<Self, Error> {
        let base = Url::parse(&config.source.base_url).map_err(|err| Error::InvalidBaseUrl {
            url: config.source.base_url.clone(),
            reason: err.to_string(),
        })?;
        if base.cannot_be_a_base() {
            return Err(Error::InvalidBaseUrl {
                url: config.source.base_url.clone(),
                reason: "not a hierarchical url".into(),
            });
        }

        Ok(Self {
            transport,
            base,
            timeout: config.source.timeout,
            retry: config.retry.clamp(),
            fallback_mode: config.source.fallback,
            fallback: FallbackDataset::bundled().map_err(Error::Fallback)?,
            clock,
        })
    }

    pub fn fallback_mode(&self) -> FallbackMode {
        self.fallback_mode
    }

    pub async fn global(&self) -> Result<RawGlobalSnapshot, FetchError> {
        self.fetch_or_fallback(Endpoint::Global, |data| data.global())
            .await
    }

    pub async fn countries(&self) -> Result<Vec<RawCountryRecord>, FetchError> {
        self.fetch_or_fallback(Endpoint::Countries, |data| data.countries())
            .await
    }

    pub async fn country(&self, name: &str) -> Result<RawCountryRecord, FetchError> {
        self.fetch_or_fallback(Endpoint::Country(name.to_owned()), |data| data.country(name))
            .await
    }

    pub async fn historical(
        &self,
        scope: &Scope,
        lastdays: Lookback,
    ) -> Result<RawHistoricalSeries, FetchError> {
        let endpoint = Endpoint::Historical {
            scope: scope.clone(),
            lastdays,
        };
        self.fetch_or_fallback(endpoint, |data| {
            HistoricalPayload::Global(data.historical(scope))
        })
        .await
        .map(HistoricalPayload::into_series)
    }

    pub async fn vaccine(
        &self,
        scope: &Scope,
        lastdays: Lookback,
    ) -> Result<RawVaccineTimeline, FetchError> {
        let endpoint = Endpoint::Vaccine {
            scope: scope.clone(),
            lastdays,
        };
        self.fetch_or_fallback(endpoint, |data| VaccinePayload::Flat(data.vaccine(scope)))
            .await
            .map(VaccinePayload::into_timeline)
    }

    pub async fn continents(&self) -> Result<Vec<RawContinentRecord>, FetchError> {
        self.fetch_or_fallback(Endpoint::Continents, |data| data.continents())
            .await
    }

    /// The `limit` countries with the highest `metric`.
    pub async fn top_countries(
        &self,
        limit: usize,
        metric: Metric,
    ) -> Result<Vec<RawCountryRecord>, FetchError> {
        let mut countries = self.countries().await?;
        countries.sort_by(|a, b| b.value(metric).total_cmp(&a.value(metric)));
        countries.truncate(limit);
        Ok(countries)
    }

    /// Global snapshot or a single country's record, depending on `scope`.
    pub async fn current(&self, scope: &Scope) -> Result<Current, FetchError> {
        match scope {
            Scope::All => self.global().await.map(Current::Global),
            Scope::Country(name) => self.country(name).await.map(Current::Country),
        }
    }

    /// Everything a dashboard page needs, fetched concurrently.
    ///
    /// Each slot holds its own result; one failing sub-fetch leaves the
    /// others intact.
    pub async fn fetch_dashboard_bundle(&self, scope: &Scope, lastdays: Lookback) -> DashboardBundle {
        let (current, countries, historical, vaccine) = tokio::join!(
            self.current(scope),
            self.countries(),
            self.historical(scope, lastdays),
            self.vaccine(scope, lastdays),
        );
        DashboardBundle {
            scope: scope.clone(),
            current,
            countries,
            historical,
            vaccine,
            fetched_at: self.clock.now(),
        }
    }

    async fn fetch_or_fallback<P, F>(&self, endpoint: Endpoint, fallback: F) -> Result<P, FetchError>
    where
        P: DeserializeOwned,
        F: FnOnce(&FallbackDataset) -> P,
    {
        endpoint.validate()?;

        match self.fallback_mode {
            FallbackMode::Always => {
                debug!(%endpoint, "serving fallback data");
                Ok(fallback(&self.fallback))
            }
            FallbackMode::OnFailure => match self.fetch(&endpoint).await {
                Ok(payload) => Ok(payload),
                Err(err) => {
                    warn!(%endpoint, %err, "fetch failed, serving fallback data");
                    Ok(fallback(&self.fallback))
                }
            },
            FallbackMode::Never => self.fetch(&endpoint).await,
        }
    }

    async fn fetch<P: DeserializeOwned>(&self, endpoint: &Endpoint) -> Result<P, FetchError> {
        let url = endpoint.url(&self.base)?;
        let what = endpoint.to_string();
        debug!(%url, "fetching");

        let (transport, timeout, url) = (&self.transport, self.timeout, &url);
        let body = with_backoff(&self.retry, self.clock.as_ref(), &what, || async move {
            match tokio::time::timeout(timeout, transport.get(url)).await {
                Ok(result) => result,
                Err(_) => Err(FetchError::Timeout(timeout)),
            }
        })
        .await?;

        serde_json::from_str(&body).map_err(|err| FetchError::Parse {
            endpoint: what,
            message: err.to_string(),
        })
    }
}
