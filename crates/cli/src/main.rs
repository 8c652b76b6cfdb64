use clap::Parser;
use config::Config;
use covidash::{cli::Cli, error::Error, report::log_bundle, signals::wait_for_signal};
use flume::bounded;
use kernel::DateRange;
use orchestrator::source::Lookback;
use orchestrator::store::Action;
use orchestrator::{Clock, DashboardEngine, SystemClock};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

#[cfg(feature = "jemalloc")]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(cli.verbosity.tracing_level_filter())
        .with_level(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    debug!(config = ?cli);

    let mut config = match &cli.conffile {
        Some(path) => Config::load(path)?,
        _ => Config::from_env()?,
    };
    cli.apply(&mut config);
    debug!(effective = %config.to_toml()?, "configuration");

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let today = clock.today();
    let window = usize::try_from(config.dashboard.moving_average_window)?;
    let lookback_days = config.dashboard.lookback_days;
    let engine = Arc::new(DashboardEngine::from_config(config, clock)?);

    let scope = cli.scope();
    let metric = cli.metric.unwrap_or_default();

    if cli.once {
        let range = DateRange::last_days(lookback_days, today);
        let bundle = engine
            .client()
            .fetch_dashboard_bundle(&scope, Lookback::for_range(&range, today))
            .await;
        log_bundle(&bundle, metric, &range, window);
        return Ok(());
    }

    engine.dispatch(Action::SelectCountry(scope));
    engine.dispatch(Action::SetMetric(metric));

    let cancel = CancellationToken::new();
    let (control_tx, control_rx) = mpsc::unbounded_channel();
    let mut runner = tokio::spawn({
        let engine = engine.clone();
        let cancel = cancel.clone();
        async move { engine.run_until(cancel, control_rx).await }
    });

    let (events_tx, events_rx) = bounded(8);
    let mut signals = tokio::spawn(async move { wait_for_signal(&events_tx).await });

    loop {
        tokio::select! {
            res = &mut signals => {
                let err = res?;
                tracing::error!(error = ?err, "Error while waiting for signal");
                cancel.cancel();
                err?;
                break;
            }
            res = events_rx.recv_async() => {
                let event = res?;
                debug!(?event, "Received signal event");
                match event.control() {
                    Some(control) => control_tx.send(control).map_err(Error::from)?,
                    None => {
                        info!(?event, "shutting down");
                        cancel.cancel();
                        break;
                    }
                }
            }
            res = &mut runner => {
                res??;
                return Ok(());
            }
        }
    }

    runner.await??;
    Ok(())
}
