use super::CategoryPoint;
use crate::model::{RawCountryRecord, continent_of};
use crate::{Error, Metric};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, str::FromStr};

pub const OTHERS_LABEL: &str = "Others";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortOrder {
    /// Keep input order.
    #[default]
    #[serde(rename = "none")]
    None,
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl FromStr for SortOrder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "" => Ok(SortOrder::None),
            "asc" | "ascending" => Ok(SortOrder::Ascending),
            "desc" | "descending" => Ok(SortOrder::Descending),
            _ => Err(Error::UnknownSortOrder(s.to_owned())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CategoryOptions {
    pub sort_order: SortOrder,
    /// Keep only the first `limit` points after sorting.
    pub limit: Option<usize>,
}

impl CategoryOptions {
    /// Descending by value, truncated to `limit`.
    pub fn top(limit: usize) -> Self {
        Self {
            sort_order: SortOrder::Descending,
            limit: Some(limit),
        }
    }
}

fn sort_points(points: &mut [CategoryPoint], order: SortOrder) {
    // `sort_by` is stable: equal values keep their input order.
    match order {
        SortOrder::None => {}
        SortOrder::Ascending => points.sort_by(|a, b| a.value.total_cmp(&b.value)),
        SortOrder::Descending => points.sort_by(|a, b| b.value.total_cmp(&a.value)),
    }
}

/// One point per country for bar charts.
pub fn to_category_series(
    records: &[RawCountryRecord],
    metric: Metric,
    options: CategoryOptions,
) -> Vec<CategoryPoint> {
    let mut points: Vec<CategoryPoint> = records
        .iter()
        .map(|record| CategoryPoint {
            label: record.country.clone(),
            value: record.value(metric),
            series: metric.to_string(),
        })
        .collect();

    sort_points(&mut points, options.sort_order);
    if let Some(limit) = options.limit {
        points.truncate(limit);
    }
    points
}

/// Sum `metric` per continent, largest first.
///
/// Records without a continent are counted under `"Unknown"`.
pub fn group_by_continent(records: &[RawCountryRecord], metric: Metric) -> Vec<CategoryPoint> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut points: Vec<CategoryPoint> = Vec::new();

    for record in records {
        let continent = continent_of(record);
        let ix = *index.entry(continent).or_insert_with(|| {
            points.push(CategoryPoint {
                label: continent.to_owned(),
                value: 0.0,
                series: metric.to_string(),
            });
            points.len() - 1
        });
        points[ix].value += record.value(metric);
    }

    sort_points(&mut points, SortOrder::Descending);
    points
}

/// Largest `max_slices` countries plus an `"Others"` slice for the rest.
pub fn to_pie_slices(
    records: &[RawCountryRecord],
    metric: Metric,
    max_slices: usize,
) -> Vec<CategoryPoint> {
    let mut sorted = records
        .iter()
        .map(|record| (record.country.as_str(), record.value(metric)))
        .sorted_by(|a, b| b.1.total_cmp(&a.1));

    let mut slices: Vec<CategoryPoint> = sorted
        .by_ref()
        .take(max_slices)
        .map(|(label, value)| CategoryPoint {
            label: label.to_owned(),
            value,
            series: metric.to_string(),
        })
        .collect();

    let rest: Vec<f64> = sorted.map(|(_, value)| value).collect();
    if !rest.is_empty() {
        slices.push(CategoryPoint {
            label: OTHERS_LABEL.to_owned(),
            value: rest.iter().sum(),
            series: metric.to_string(),
        });
    }
    slices
}
