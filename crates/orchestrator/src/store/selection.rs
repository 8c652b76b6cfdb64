use crate::source::Scope;
use chrono::NaiveDate;
use kernel::{DateRange, Metric};

/// Presentation toggles that shape the read views.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewFilters {
    pub per_capita: bool,
    pub show_average: bool,
    pub compare_mode: bool,
    /// Insertion ordered, without duplicates.
    pub compared_countries: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    pub selected_country: Scope,
    pub date_range: DateRange,
    pub active_metric: Metric,
    pub filters: ViewFilters,
}

impl SelectionState {
    /// Everything worldwide over the last `lookback_days`, showing cases.
    pub fn starting(today: NaiveDate, lookback_days: u32) -> Self {
        Self {
            selected_country: Scope::All,
            date_range: DateRange::last_days(lookback_days, today),
            active_metric: Metric::Cases,
            filters: ViewFilters::default(),
        }
    }
}
