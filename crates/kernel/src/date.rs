//! Series date keys and date ranges.
//!
//! Timeline keys use the upstream `M/D/YY` form. Only years 2020–2099 are
//! accepted; anything else is reported as unsupported instead of guessed.

use crate::Error;
use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Earliest date covered by the upstream data.
pub fn first_reported() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 22).unwrap_or_default()
}

/// Parse an `M/D/YY` key. Two-digit years mean `20YY`.
///
/// ```
/// # use kernel::date::parse_series_date;
/// # use chrono::NaiveDate;
/// assert_eq!(parse_series_date("1/3/21"), Ok(NaiveDate::from_ymd_opt(2021, 1, 3).unwrap()));
/// assert!(parse_series_date("2021-01-03").is_err());
/// assert!(parse_series_date("1/3/19").is_err());
/// ```
pub fn parse_series_date(input: &str) -> Result<NaiveDate, Error> {
    let unsupported = |reason| Error::UnsupportedDate {
        input: input.to_owned(),
        reason,
    };

    let mut parts = input.trim().split('/');
    let (Some(month), Some(day), Some(year), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(unsupported("expected M/D/YY"));
    };

    let is_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !is_digits(month) || !is_digits(day) || !is_digits(year) {
        return Err(unsupported("expected M/D/YY"));
    }
    if month.len() > 2 || day.len() > 2 {
        return Err(unsupported("month and day take at most two digits"));
    }
    if year.len() != 2 {
        return Err(unsupported("year must have exactly two digits"));
    }

    let month: u32 = month.parse().map_err(|_| unsupported("bad month"))?;
    let day: u32 = day.parse().map_err(|_| unsupported("bad day"))?;
    let year: i32 = year.parse().map_err(|_| unsupported("bad year"))?;
    if year < 20 {
        return Err(unsupported("years before 2020 are not supported"));
    }

    NaiveDate::from_ymd_opt(2000 + year, month, day)
        .ok_or_else(|| unsupported("no such calendar date"))
}

/// Inverse of [`parse_series_date`].
pub fn format_series_date(date: NaiveDate) -> String {
    format!("{}/{}/{:02}", date.month(), date.day(), date.year().rem_euclid(100))
}

/// Inclusive date window applied to time series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Preset the range was built from, in days. `Some(0)` means all time;
    /// `None` means the bounds were picked by hand.
    pub preset: Option<u32>,
}

impl DateRange {
    /// A hand-picked range. Bounds are swapped if given in reverse.
    pub fn custom(start: NaiveDate, end: NaiveDate) -> Self {
        let (start, end) = if start <= end { (start, end) } else { (end, start) };
        Self {
            start,
            end,
            preset: None,
        }
    }

    /// The `days` days before `today`, up to and including `today`.
    /// Zero days selects [`DateRange::all_time`].
    pub fn last_days(days: u32, today: NaiveDate) -> Self {
        if days == 0 {
            return Self::all_time(today);
        }
        Self {
            start: today
                .checked_sub_days(Days::new(days.into()))
                .unwrap_or_else(first_reported),
            end: today,
            preset: Some(days),
        }
    }

    pub fn all_time(today: NaiveDate) -> Self {
        Self {
            start: first_reported(),
            end: today.max(first_reported()),
            preset: Some(0),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of days between `start` and `today`, for lookback queries.
    /// `None` when the range reaches back to the first reported day.
    pub fn lookback_from(&self, today: NaiveDate) -> Option<u32> {
        if self.preset == Some(0) || self.start <= first_reported() {
            return None;
        }
        let days = today.signed_duration_since(self.start).num_days().max(0);
        Some(u32::try_from(days).unwrap_or(u32::MAX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_short_and_padded_keys() {
        assert_eq!(parse_series_date("4/9/24"), Ok(ymd(2024, 4, 9)));
        assert_eq!(parse_series_date("04/09/24"), Ok(ymd(2024, 4, 9)));
        assert_eq!(parse_series_date("12/31/99"), Ok(ymd(2099, 12, 31)));
    }

    #[test]
    fn rejects_unsupported_forms() {
        for input in ["", "1/2", "1/2/3/4", "2024-04-09", "4/9/2024", "4/9/19", "13/1/21", "2/30/21", "a/b/cc", "4/9/-1"] {
            assert!(
                matches!(parse_series_date(input), Err(Error::UnsupportedDate { .. })),
                "{input} should be rejected"
            );
        }
    }

    #[test]
    fn format_is_inverse_of_parse() {
        let date = ymd(2021, 1, 3);
        assert_eq!(format_series_date(date), "1/3/21");
        assert_eq!(parse_series_date(&format_series_date(date)), Ok(date));
    }

    #[test]
    fn last_days_presets() {
        let today = ymd(2024, 4, 9);
        let range = DateRange::last_days(30, today);
        assert_eq!(range.start, ymd(2024, 3, 10));
        assert_eq!(range.end, today);
        assert_eq!(range.preset, Some(30));
        assert_eq!(range.lookback_from(today), Some(30));

        let all = DateRange::last_days(0, today);
        assert_eq!(all.start, first_reported());
        assert_eq!(all.preset, Some(0));
        assert_eq!(all.lookback_from(today), None);
    }

    #[test]
    fn custom_range_orders_bounds() {
        let range = DateRange::custom(ymd(2021, 2, 1), ymd(2021, 1, 1));
        assert_eq!(range.start, ymd(2021, 1, 1));
        assert!(range.contains(ymd(2021, 2, 1)));
        assert!(!range.contains(ymd(2021, 2, 2)));
        assert_eq!(range.preset, None);
    }
}
