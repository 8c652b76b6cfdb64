//! Display helpers for cards, tooltips and axis ticks.

use chrono::{DateTime, Utc};

/// Format a count for display.
///
/// ```
/// # use kernel::format::format_number;
/// assert_eq!(format_number(1234567.0, false), "1,234,567");
/// assert_eq!(format_number(1234567.0, true), "1.2M");
/// assert_eq!(format_number(f64::NAN, true), "N/A");
/// ```
pub fn format_number(value: f64, abbreviate: bool) -> String {
    if !value.is_finite() {
        return "N/A".to_owned();
    }

    if abbreviate {
        const UNITS: [(f64, &str); 3] = [(1e9, "B"), (1e6, "M"), (1e3, "K")];
        let magnitude = value.abs();
        for (scale, suffix) in UNITS {
            if magnitude >= scale {
                return format!("{:.1}{suffix}", value / scale);
            }
        }
        return trim_fraction(format!("{value:.3}"));
    }

    let rendered = trim_fraction(format!("{:.3}", value.abs()));
    let (whole, fraction) = rendered.split_once('.').unwrap_or((&rendered, ""));
    let mut out = String::with_capacity(rendered.len() + whole.len() / 3 + 1);
    if value < 0.0 && rendered != "0" {
        out.push('-');
    }
    for (ix, digit) in whole.chars().enumerate() {
        if ix > 0 && (whole.len() - ix) % 3 == 0 {
            out.push(',');
        }
        out.push(digit);
    }
    if !fraction.is_empty() {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

fn trim_fraction(mut rendered: String) -> String {
    if rendered.contains('.') {
        let trimmed = rendered.trim_end_matches('0').trim_end_matches('.').len();
        rendered.truncate(trimmed);
    }
    if rendered == "-0" {
        rendered.remove(0);
    }
    rendered
}

pub fn format_percentage(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return "N/A".to_owned();
    }
    format!("{value:.decimals$}%")
}

/// Relative change from `previous` to `current`, in percent.
/// `None` when there is no baseline to compare against.
pub fn percentage_change(current: f64, previous: f64) -> Option<f64> {
    if previous == 0.0 || !previous.is_finite() || !current.is_finite() {
        return None;
    }
    Some((current - previous) / previous * 100.0)
}

/// Deaths as a share of cases, in percent.
pub fn case_fatality_rate(deaths: f64, cases: f64) -> Option<f64> {
    if cases <= 0.0 {
        return None;
    }
    Some(deaths / cases * 100.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
    Flat,
}

/// Whether a trend is good or bad news for the metric shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Good,
    Bad,
    Neutral,
}

impl Trend {
    pub fn of(change: f64) -> Self {
        if change > 0.0 {
            Trend::Up
        } else if change < 0.0 {
            Trend::Down
        } else {
            Trend::Flat
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            Trend::Up => "↑",
            Trend::Down => "↓",
            Trend::Flat => "→",
        }
    }

    /// `rising_is_bad` is true for cases and deaths, false for recoveries.
    pub fn tone(self, rising_is_bad: bool) -> Tone {
        match (self, rising_is_bad) {
            (Trend::Flat, _) => Tone::Neutral,
            (Trend::Up, true) | (Trend::Down, false) => Tone::Bad,
            (Trend::Up, false) | (Trend::Down, true) => Tone::Good,
        }
    }
}

/// "3 hours ago" style rendering of `then` relative to `now`.
pub fn format_relative(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = now.signed_duration_since(then).num_seconds().max(0);

    let plural = |n: i64, unit: &str| {
        let s = if n == 1 { "" } else { "s" };
        format!("{n} {unit}{s} ago")
    };

    if seconds < 60 {
        return plural(seconds, "second");
    }
    let minutes = seconds / 60;
    if minutes < 60 {
        return plural(minutes, "minute");
    }
    let hours = minutes / 60;
    if hours < 24 {
        return plural(hours, "hour");
    }
    let days = hours / 24;
    if days < 30 {
        return plural(days, "day");
    }
    let months = days / 30;
    if months < 12 {
        return plural(months, "month");
    }
    plural(months / 12, "year")
}
