use super::TimePoint;
use crate::Metric;
use crate::date::{DateRange, parse_series_date};
use crate::model::RawHistoricalSeries;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::trace;

/// Extract `metric` from `raw` as a sorted series limited to `range`.
///
/// Keys that are not valid `M/D/YY` dates are skipped. When several keys name
/// the same day, the one appearing last in the payload wins.
pub fn to_time_series(
    raw: Option<&RawHistoricalSeries>,
    metric: Metric,
    range: &DateRange,
) -> Vec<TimePoint> {
    let Some(counts) = raw.and_then(|raw| raw.get(metric)) else {
        return Vec::new();
    };

    let mut by_date: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for (key, value) in counts {
        match parse_series_date(key) {
            Ok(date) if range.contains(date) => {
                by_date.insert(date, *value);
            }
            Ok(_) => {}
            Err(err) => trace!(%err, "skipping timeline entry"),
        }
    }

    let series = metric.as_str();
    by_date
        .into_iter()
        .map(|(date, value)| TimePoint {
            date,
            value,
            series: series.to_owned(),
        })
        .collect()
}

/// Day-over-day differences of a cumulative series.
///
/// Negative differences come from upstream corrections and are clamped to
/// zero. The first point has no predecessor and is dropped.
pub fn to_daily_deltas(series: &[TimePoint]) -> Vec<TimePoint> {
    series
        .windows(2)
        .map(|pair| TimePoint {
            date: pair[1].date,
            value: (pair[1].value - pair[0].value).max(0.0),
            series: format!("daily_{}", pair[1].series),
        })
        .collect()
}

/// Trailing mean over `window_days` points.
///
/// Early points average over the shorter window available to them. A window
/// of zero behaves like a window of one.
pub fn moving_average(series: &[TimePoint], window_days: usize) -> Vec<TimePoint> {
    let window = window_days.max(1);
    series
        .iter()
        .enumerate()
        .map(|(ix, point)| {
            let start = (ix + 1).saturating_sub(window);
            let slice = &series[start..=ix];
            let sum: f64 = slice.iter().map(|p| p.value).sum();
            TimePoint {
                date: point.date,
                value: sum / slice.len() as f64,
                series: point.series.clone(),
            }
        })
        .collect()
}

/// Axis domain for a set of values: the minimum and 5% above the maximum.
pub fn value_domain(values: impl IntoIterator<Item = f64>) -> (f64, f64) {
    let bounds = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc: Option<(f64, f64)>, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        });
    match bounds {
        Some((min, max)) => (min, max * 1.05),
        None => (0.0, 100.0),
    }
}
