//! Read views. Nothing here is cached: every call derives its output from
//! the raw payloads and the selection as they are now.

use super::{Domain, FetchStatus, SelectionState, Store};
use crate::source::{Current, Scope};
use chrono::{DateTime, Utc};
use kernel::format::{case_fatality_rate, percentage_change};
use kernel::model::{
    CountryTable, RawContinentRecord, RawCountryRecord, RawGlobalSnapshot, RawHistoricalSeries,
};
use kernel::transform::{
    self, CategoryOptions, CategoryPoint, MapPoint, TimePoint, group_by_continent,
    moving_average, to_category_series, to_daily_deltas, to_map_data, to_pie_slices,
    to_time_series,
};
use kernel::Metric;

/// Headline figures for the current scope.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub scope: Scope,
    pub cases: f64,
    pub deaths: f64,
    pub recovered: f64,
    pub active: f64,
    pub today_cases: f64,
    pub today_deaths: f64,
    /// Deaths per hundred cases.
    pub case_fatality_rate: Option<f64>,
    /// Growth of cumulative cases over the last day, in percent.
    pub cases_change: Option<f64>,
    pub updated: Option<DateTime<Utc>>,
}

impl Store {
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn status(&self, domain: Domain) -> &FetchStatus {
        &self.statuses[domain.index()]
    }

    pub fn is_loading(&self) -> bool {
        self.statuses.iter().any(|status| status.loading)
    }

    /// Most recent successful fetch of any domain.
    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.statuses.iter().filter_map(|status| status.last_updated).max()
    }

    /// Domains whose last fetch failed, with their messages.
    pub fn errors(&self) -> Vec<(Domain, &str)> {
        Domain::ALL
            .into_iter()
            .filter_map(|domain| Some((domain, self.status(domain).error.as_deref()?)))
            .collect()
    }

    pub fn global(&self) -> Option<&RawGlobalSnapshot> {
        self.global.as_ref()
    }

    pub fn countries(&self) -> Option<&CountryTable> {
        self.countries.as_ref()
    }

    pub fn continents(&self) -> &[RawContinentRecord] {
        self.continents.as_deref().unwrap_or_default()
    }

    /// Raw timeline of the selected scope, if one has been fetched.
    pub fn historical(&self) -> Option<&RawHistoricalSeries> {
        self.historical.get(&self.selection.selected_country)
    }

    /// Totals for the selected scope: the global snapshot, or the selected
    /// country's record from the country list.
    pub fn current_snapshot(&self) -> Option<Current> {
        match &self.selection.selected_country {
            Scope::All => self.global.clone().map(Current::Global),
            Scope::Country(name) => self
                .countries
                .as_ref()?
                .find(name)
                .cloned()
                .map(Current::Country),
        }
    }

    /// Cumulative series of the active metric over the selected range.
    pub fn time_series(&self) -> Vec<TimePoint> {
        self.series_for(self.selection.active_metric)
    }

    pub fn series_for(&self, metric: Metric) -> Vec<TimePoint> {
        if metric == Metric::Vaccinated {
            return self.vaccine_series();
        }
        to_time_series(self.historical(), metric, &self.selection.date_range)
    }

    /// New cases (or deaths, ...) per day.
    pub fn daily_series(&self) -> Vec<TimePoint> {
        to_daily_deltas(&self.time_series())
    }

    /// Trailing average of the daily series.
    pub fn average_series(&self, window_days: usize) -> Vec<TimePoint> {
        moving_average(&self.daily_series(), window_days)
    }

    pub fn vaccine_series(&self) -> Vec<TimePoint> {
        let series = self
            .vaccine
            .get(&self.selection.selected_country)
            .map(|timeline| timeline.to_series());
        to_time_series(series.as_ref(), Metric::Vaccinated, &self.selection.date_range)
    }

    /// `(min, max)` axis bounds for the active metric's series.
    pub fn value_domain(&self) -> (f64, f64) {
        transform::value_domain(self.time_series().iter().map(|point| point.value))
    }

    pub fn category_series(&self, options: CategoryOptions) -> Vec<CategoryPoint> {
        to_category_series(self.country_records(), self.selection.active_metric, options)
    }

    pub fn continent_series(&self) -> Vec<CategoryPoint> {
        group_by_continent(self.country_records(), self.selection.active_metric)
    }

    /// Honors the per-capita filter.
    pub fn map_points(&self) -> Vec<MapPoint> {
        to_map_data(
            self.country_records(),
            self.selection.active_metric,
            self.selection.filters.per_capita,
        )
    }

    pub fn pie_slices(&self, max_slices: usize) -> Vec<CategoryPoint> {
        to_pie_slices(self.country_records(), self.selection.active_metric, max_slices)
    }

    /// Active metric for each compared country found in the country list,
    /// in comparison order. Empty unless compare mode is on.
    pub fn comparison(&self) -> Vec<CategoryPoint> {
        let filters = &self.selection.filters;
        if !filters.compare_mode {
            return Vec::new();
        }
        let Some(table) = self.countries.as_ref() else {
            return Vec::new();
        };
        let metric = self.selection.active_metric;
        filters
            .compared_countries
            .iter()
            .filter_map(|name| table.find(name))
            .map(|record| CategoryPoint {
                label: record.country.clone(),
                value: record.value(metric),
                series: metric.to_string(),
            })
            .collect()
    }

    pub fn summary(&self) -> Option<Summary> {
        let current = self.current_snapshot()?;
        let updated = match &current {
            Current::Global(snapshot) => snapshot.updated,
            Current::Country(_) => self.status(Domain::Countries).last_updated,
        };
        let cases = current.value(Metric::Cases);
        let today_cases = current.value(Metric::TodayCases);
        Some(Summary {
            scope: self.selection.selected_country.clone(),
            cases,
            deaths: current.value(Metric::Deaths),
            recovered: current.value(Metric::Recovered),
            active: current.value(Metric::Active),
            today_cases,
            today_deaths: current.value(Metric::TodayDeaths),
            case_fatality_rate: case_fatality_rate(current.value(Metric::Deaths), cases),
            cases_change: percentage_change(cases, cases - today_cases),
            updated,
        })
    }

    fn country_records(&self) -> &[RawCountryRecord] {
        self.countries.as_ref().map(CountryTable::records).unwrap_or_default()
    }
}
