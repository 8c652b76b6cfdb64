#![forbid(unsafe_code)]

use crate::clock::Clock;
use crate::error::{Error, FetchError};
use crate::source::{ApiClient, HttpTransport, Lookback, Scope, Transport};
use crate::store::{Action, Dispatch, Domain, Payload, SelectionState, Store};
use config::Config;
use futures::future::join_all;
use kernel::format::{format_number, format_percentage, format_relative};
use kernel::transform::CategoryOptions;
use kernel::{DateRange, Metric};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, debug_span, info, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum ControlEvent {
    Refresh,
    Select(Scope),
    SetDateRange(DateRange),
    SetMetric(Metric),
    /// Log a summary of the current state.
    Dump,
}

/// Per-domain outcome of one refresh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RefreshReport {
    pub outcomes: Vec<(Domain, Dispatch)>,
}

impl RefreshReport {
    pub fn outcome(&self, domain: Domain) -> Option<Dispatch> {
        self.outcomes
            .iter()
            .find_map(|(d, outcome)| (*d == domain).then_some(*outcome))
    }

    pub fn stale(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| *outcome == Dispatch::Stale)
            .count()
    }
}

/// Drives the adapter and applies results to the store.
///
/// The store lock is only taken in synchronous sections, never across a
/// fetch.
pub struct DashboardEngine<T = HttpTransport> {
    config: Config,
    client: ApiClient<T>,
    store: Mutex<Store>,
    clock: Arc<dyn Clock>,
}

impl DashboardEngine<HttpTransport> {
    pub fn from_config(config: Config, clock: Arc<dyn Clock>) -> Result<Self, Error> {
        let client = ApiClient::from_config(&config, clock.clone())?;
        Ok(Self::new(config, client, clock))
    }
}

impl<T: Transport> DashboardEngine<T> {
    /// Start with an empty store showing the configured lookback.
    pub fn new(config: Config, client: ApiClient<T>, clock: Arc<dyn Clock>) -> Self {
        let selection = SelectionState::starting(clock.today(), config.dashboard.lookback_days);
        Self {
            config,
            client,
            store: Mutex::new(Store::new(selection)),
            clock,
        }
    }

    pub fn client(&self) -> &ApiClient<T> {
        &self.client
    }

    /// Run `f` against the store.
    pub fn read<R>(&self, f: impl FnOnce(&Store) -> R) -> R {
        f(&self.store.lock())
    }

    pub fn dispatch(&self, action: Action) -> Dispatch {
        self.store.lock().dispatch(action)
    }

    /// Fetch every domain concurrently.
    pub async fn refresh(&self) -> RefreshReport {
        self.refresh_domains(&Domain::ALL).await
    }

    pub async fn refresh_domains(&self, domains: &[Domain]) -> RefreshReport {
        let outcomes = join_all(domains.iter().map(|domain| async move {
            (*domain, self.fetch_domain(*domain).await)
        }))
        .await;
        let report = RefreshReport { outcomes };
        debug!(?report, "refresh finished");
        report
    }

    /// Switch scope and reload what depends on it.
    pub async fn select_country(&self, scope: Scope) -> RefreshReport {
        self.dispatch(Action::SelectCountry(scope));
        self.refresh_domains(&Domain::SELECTION_DEPENDENT).await
    }

    pub async fn set_date_range(&self, range: DateRange) -> RefreshReport {
        self.dispatch(Action::SetDateRange(range));
        self.refresh_domains(&Domain::SELECTION_DEPENDENT).await
    }

    async fn fetch_domain(&self, domain: Domain) -> Dispatch {
        let tag = self.store.lock().begin_fetch(domain);
        let span = debug_span!("fetch", %domain, seq = tag.seq, scope = %tag.scope);

        async {
            let lookback = Lookback::for_range(&tag.range, self.clock.today());
            let result: Result<Payload, FetchError> = match domain {
                Domain::Global => self.client.global().await.map(Payload::Global),
                Domain::Countries => self.client.countries().await.map(Payload::Countries),
                Domain::Historical => self
                    .client
                    .historical(&tag.scope, lookback)
                    .await
                    .map(Payload::Historical),
                Domain::Vaccine => self
                    .client
                    .vaccine(&tag.scope, lookback)
                    .await
                    .map(Payload::Vaccine),
                Domain::Continents => self.client.continents().await.map(Payload::Continents),
            };
            if let Err(err) = &result {
                warn!(%err, "fetch failed");
            }
            let outcome = self.store.lock().complete(tag, result, self.clock.now());
            debug!(?outcome, "applied");
            outcome
        }
        .instrument(span)
        .await
    }

    /// Refresh on the configured interval until `cancel` fires, handling
    /// control events in between.
    pub async fn run_until(
        &self,
        cancel: CancellationToken,
        mut control_rx: mpsc::UnboundedReceiver<ControlEvent>,
    ) -> Result<(), Error> {
        let mut ticker = tokio::time::interval(self.config.dashboard.refresh_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    info!("shutdown requested");
                    break;
                }
                Some(event) = control_rx.recv() => {
                    self.handle_control(event).await;
                }
                _ = ticker.tick() => {
                    let report = self.refresh().await;
                    info!(stale = report.stale(), "periodic refresh done");
                }
            }
        }

        Ok(())
    }

    async fn handle_control(&self, event: ControlEvent) {
        debug!(?event, "control event");
        match event {
            ControlEvent::Refresh => {
                self.refresh().await;
            }
            ControlEvent::Select(scope) => {
                self.select_country(scope).await;
            }
            ControlEvent::SetDateRange(range) => {
                self.set_date_range(range).await;
            }
            ControlEvent::SetMetric(metric) => {
                self.dispatch(Action::SetMetric(metric));
            }
            ControlEvent::Dump => self.dump(),
        }
    }

    /// Log the headline figures and per-domain status.
    pub fn dump(&self) {
        let now = self.clock.now();
        let dashboard = &self.config.dashboard;
        let (top, slices) = (dashboard.top_countries, dashboard.pie_slices);
        let window = usize::try_from(dashboard.moving_average_window).unwrap_or(usize::MAX);
        self.read(|store| {
            let selection = store.selection();
            match store.summary() {
                Some(summary) => info!(
                    scope = %summary.scope,
                    cases = %format_number(summary.cases, false),
                    deaths = %format_number(summary.deaths, false),
                    today = %format_number(summary.today_cases, true),
                    fatality = %summary.case_fatality_rate.map_or_else(|| "N/A".into(), |rate| format_percentage(rate, 2)),
                    updated = %summary.updated.map_or_else(|| "never".into(), |at| format_relative(at, now)),
                    "summary"
                ),
                None => info!(scope = %selection.selected_country, "no data yet"),
            }

            let series = store.time_series();
            info!(
                metric = selection.active_metric.label(),
                from = %selection.date_range.start,
                to = %selection.date_range.end,
                points = series.len(),
                latest = %series.last().map_or_else(|| "N/A".into(), |p| format_number(p.value, true)),
                "series"
            );

            if selection.filters.show_average {
                let average = store.average_series(window);
                info!(
                    window,
                    latest = %average.last().map_or_else(|| "N/A".into(), |p| format_number(p.value, true)),
                    "daily average"
                );
            }

            for point in store.category_series(CategoryOptions::top(top)) {
                info!(country = %point.label, value = %format_number(point.value, true), "top");
            }
            for slice in store.pie_slices(slices) {
                debug!(label = %slice.label, value = %format_number(slice.value, true), "share");
            }
            for point in store.comparison() {
                info!(country = %point.label, value = %format_number(point.value, true), "compared");
            }

            for domain in Domain::ALL {
                let status = store.status(domain);
                if let Some(error) = &status.error {
                    warn!(%domain, %error, "domain failed");
                }
            }
        });
    }
}
