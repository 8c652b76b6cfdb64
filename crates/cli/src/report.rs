use kernel::format::{Trend, format_number, format_percentage, percentage_change};
use kernel::transform::{moving_average, to_daily_deltas, to_time_series};
use kernel::{DateRange, Metric};
use orchestrator::source::{Current, DashboardBundle};
use tracing::{info, warn};

/// Log what a one-shot bundle fetch produced, slot by slot.
pub fn log_bundle(bundle: &DashboardBundle, metric: Metric, range: &DateRange, window: usize) {
    if let Ok(current) = &bundle.current {
        let label = match current {
            Current::Global(_) => "worldwide".to_owned(),
            Current::Country(record) => record.country.clone(),
        };
        info!(
            scope = %label,
            metric = metric.label(),
            value = %format_number(current.value(metric), false),
            today = %format_number(current.value(Metric::TodayCases), true),
            "current"
        );
    }

    if let Ok(countries) = &bundle.countries {
        info!(countries = countries.len(), "country list");
    }

    if let Ok(historical) = &bundle.historical {
        let series = to_time_series(Some(historical), metric, range);
        let daily = to_daily_deltas(&series);
        let average = moving_average(&daily, window);
        if let [.., previous, last] = average.as_slice() {
            let change = percentage_change(last.value, previous.value);
            let trend = Trend::of(change.unwrap_or_default());
            info!(
                points = series.len(),
                daily = %format_number(last.value, true),
                change = %change.map_or_else(|| "N/A".into(), |c| format_percentage(c, 1)),
                trend = trend.arrow(),
                tone = ?trend.tone(metric.rising_is_bad()),
                "trend"
            );
        } else {
            info!(points = series.len(), "not enough history for a trend");
        }
    }

    if let Ok(vaccine) = &bundle.vaccine {
        let doses = to_time_series(Some(&vaccine.to_series()), Metric::Vaccinated, range);
        if let Some(last) = doses.last() {
            info!(date = %last.date, doses = %format_number(last.value, true), "vaccination");
        }
    }

    for (slot, err) in bundle.errors() {
        warn!(slot, %err, "fetch failed");
    }
}
