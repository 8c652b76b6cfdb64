//! Conversion of raw payloads into chart-ready series.
//!
//! Everything here is pure: no I/O, no errors. Missing or malformed inputs
//! degrade to zero values or empty output so that consumers only ever branch
//! on emptiness.

mod category;
mod map;
mod time_series;

pub use category::{
    CategoryOptions, SortOrder, group_by_continent, to_category_series, to_pie_slices,
};
pub use map::to_map_data;
pub use time_series::{moving_average, to_daily_deltas, to_time_series, value_domain};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One dated value of a time series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimePoint {
    pub date: NaiveDate,
    pub value: f64,
    pub series: String,
}

/// One labelled value for bar and pie charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryPoint {
    pub label: String,
    pub value: f64,
    pub series: String,
}

/// One country placed on the choropleth map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapPoint {
    pub iso3: Option<String>,
    pub name: String,
    pub value: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub series: String,
}
