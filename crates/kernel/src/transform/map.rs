use super::MapPoint;
use crate::Metric;
use crate::model::RawCountryRecord;

const PER_MILLION: f64 = 1_000_000.0;

/// Place countries on the map.
///
/// Records without both coordinates are dropped. With `per_capita`, values
/// are scaled per million inhabitants and records without a population are
/// dropped rather than divided by zero.
pub fn to_map_data(records: &[RawCountryRecord], metric: Metric, per_capita: bool) -> Vec<MapPoint> {
    records
        .iter()
        .filter_map(|record| {
            let (latitude, longitude) = record.coordinates()?;
            let raw = record.value(metric);
            let value = if per_capita {
                let population = record.value(Metric::Population);
                if population <= 0.0 {
                    return None;
                }
                raw / population * PER_MILLION
            } else {
                raw
            };
            Some(MapPoint {
                iso3: record.iso3().map(str::to_owned),
                name: record.country.clone(),
                value,
                latitude,
                longitude,
                series: metric.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CountryInfo;
    use pretty_assertions::assert_eq;

    fn record(name: &str, coords: Option<(f64, f64)>, cases: f64, population: f64) -> RawCountryRecord {
        RawCountryRecord {
            country: name.into(),
            country_info: CountryInfo {
                iso3: Some(name.to_ascii_uppercase()),
                lat: coords.map(|c| c.0),
                long: coords.map(|c| c.1),
                ..Default::default()
            },
            cases,
            population,
            ..Default::default()
        }
    }

    #[test]
    fn drops_records_without_coordinates() {
        let records = [
            record("fra", Some((46.0, 2.0)), 10.0, 0.0),
            record("ship", None, 700.0, 3_700.0),
        ];
        let points = to_map_data(&records, Metric::Cases, false);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].iso3.as_deref(), Some("FRA"));
        assert_eq!(points[0].value, 10.0);
        assert_eq!((points[0].latitude, points[0].longitude), (46.0, 2.0));
    }

    #[test]
    fn per_capita_scales_and_skips_zero_population() {
        let records = [
            record("a", Some((1.0, 1.0)), 50.0, 2_000_000.0),
            record("b", Some((2.0, 2.0)), 50.0, 0.0),
        ];
        let points = to_map_data(&records, Metric::Cases, true);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].name, "a");
        assert_eq!(points[0].value, 25.0);
    }
}
