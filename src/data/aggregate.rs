use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, NaiveDateTime};

use super::model::{AirQualityTable, Observation, Pollutant};

// ---------------------------------------------------------------------------
// Station filtering
// ---------------------------------------------------------------------------

/// Return indices of observations belonging to one station.
///
/// The table itself is never mutated; consumers work on index sets and
/// allocate their own output.
pub fn station_indices(table: &AirQualityTable, station: &str) -> Vec<usize> {
    table
        .observations
        .iter()
        .enumerate()
        .filter(|(_, obs)| obs.station == station)
        .map(|(i, _)| i)
        .collect()
}

// ---------------------------------------------------------------------------
// Means – nulls are excluded from aggregation, never counted as zero
// ---------------------------------------------------------------------------

/// Mean of a pollutant over the given rows, skipping null cells.
/// `None` when no row has a value.
pub fn mean_of(table: &AirQualityTable, indices: &[usize], pollutant: Pollutant) -> Option<f64> {
    let mut sum = 0.0;
    let mut count = 0usize;
    for &i in indices {
        if let Some(value) = pollutant.value(&table.observations[i]) {
            sum += value;
            count += 1;
        }
    }
    (count > 0).then(|| sum / count as f64)
}

/// Per-station means of the six criteria pollutants, for the metric cards.
#[derive(Debug, Clone, PartialEq)]
pub struct StationSummary {
    pub station: String,
    pub means: Vec<(Pollutant, Option<f64>)>,
}

pub fn station_summary(table: &AirQualityTable, station: &str) -> StationSummary {
    let indices = station_indices(table, station);
    let means = Pollutant::ALL
        .iter()
        .map(|&p| (p, mean_of(table, &indices, p)))
        .collect();
    StationSummary {
        station: station.to_string(),
        means,
    }
}

// ---------------------------------------------------------------------------
// Monthly resampling
// ---------------------------------------------------------------------------

/// One month bucket of the resampled series, labeled with its month-end date.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyPoint {
    pub bucket: NaiveDateTime,
    pub mean: f64,
}

/// Resample a pollutant to monthly means across all stations.
///
/// Rows with a null timestamp or a null value are dropped before bucketing,
/// so the series covers exactly the observed date range, in ascending order.
pub fn monthly_mean(table: &AirQualityTable, pollutant: Pollutant) -> Vec<MonthlyPoint> {
    let mut buckets: BTreeMap<(i32, u32), (f64, usize)> = BTreeMap::new();

    for obs in &table.observations {
        let (Some(ts), Some(value)) = (obs.timestamp, pollutant.value(obs)) else {
            continue;
        };
        let entry = buckets.entry((ts.year(), ts.month())).or_insert((0.0, 0));
        entry.0 += value;
        entry.1 += 1;
    }

    buckets
        .into_iter()
        .filter_map(|((year, month), (sum, count))| {
            let bucket = month_end(year, month)?.and_hms_opt(0, 0, 0)?;
            Some(MonthlyPoint {
                bucket,
                mean: sum / count as f64,
            })
        })
        .collect()
}

/// Last calendar day of the given month.
fn month_end(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()
}

// ---------------------------------------------------------------------------
// Dataset queries for the info readout
// ---------------------------------------------------------------------------

/// Earliest and latest non-null timestamp in the table.
pub fn observed_range(table: &AirQualityTable) -> Option<(NaiveDateTime, NaiveDateTime)> {
    let mut timestamps = table.observations.iter().filter_map(|obs| obs.timestamp);
    let first = timestamps.next()?;
    let (min, max) = timestamps.fold((first, first), |(lo, hi), ts| {
        (lo.min(ts), hi.max(ts))
    });
    Some((min, max))
}

/// Null-cell counts per derived or coerced field. These are the rows where a
/// source value could not be converted (or was absent to begin with).
pub fn conversion_gaps(table: &AirQualityTable) -> Vec<(&'static str, usize)> {
    let fields: [(&'static str, fn(&Observation) -> Option<f64>); 11] = [
        ("PM2.5", |o| o.pm2_5),
        ("PM10", |o| o.pm10),
        ("SO2", |o| o.so2),
        ("NO2", |o| o.no2),
        ("CO", |o| o.co),
        ("O3", |o| o.o3),
        ("TEMP", |o| o.temp),
        ("PRES", |o| o.pres),
        ("DEWP", |o| o.dewp),
        ("RAIN", |o| o.rain),
        ("WSPM", |o| o.wspm),
    ];

    let mut gaps = Vec::with_capacity(fields.len() + 1);
    gaps.push((
        "timestamp",
        table
            .observations
            .iter()
            .filter(|obs| obs.timestamp.is_none())
            .count(),
    ));
    for (name, get) in fields {
        let nulls = table
            .observations
            .iter()
            .filter(|obs| get(obs).is_none())
            .count();
        gaps.push((name, nulls));
    }
    gaps
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn obs(station: &str, ymdh: (i32, u32, u32, u32), pm2_5: Option<f64>) -> Observation {
        let (year, month, day, hour) = ymdh;
        Observation {
            station: station.to_string(),
            year: Some(year),
            month: Some(month),
            day: Some(day),
            hour: Some(hour),
            timestamp: NaiveDate::from_ymd_opt(year, month, day)
                .and_then(|d| d.and_hms_opt(hour, 0, 0)),
            pm2_5,
            pm10: None,
            so2: None,
            no2: None,
            co: None,
            o3: None,
            temp: None,
            pres: None,
            dewp: None,
            rain: None,
            wspm: None,
            wd: None,
        }
    }

    #[test]
    fn mean_excludes_nulls() {
        let table = AirQualityTable::from_observations(vec![
            obs("Tiantan", (2016, 1, 1, 0), Some(10.0)),
            obs("Tiantan", (2016, 1, 1, 1), None),
            obs("Tiantan", (2016, 1, 1, 2), Some(20.0)),
        ]);
        let indices = station_indices(&table, "Tiantan");
        assert_eq!(mean_of(&table, &indices, Pollutant::Pm25), Some(15.0));
        assert_eq!(mean_of(&table, &indices, Pollutant::Pm10), None);
    }

    #[test]
    fn station_indices_pick_only_that_station() {
        let table = AirQualityTable::from_observations(vec![
            obs("Tiantan", (2016, 1, 1, 0), Some(1.0)),
            obs("Changping", (2016, 1, 1, 0), Some(2.0)),
            obs("Tiantan", (2016, 1, 1, 1), Some(3.0)),
        ]);
        assert_eq!(station_indices(&table, "Tiantan"), vec![0, 2]);
        let summary = station_summary(&table, "Tiantan");
        assert_eq!(summary.means[0], (Pollutant::Pm25, Some(2.0)));
    }

    #[test]
    fn monthly_mean_buckets_by_calendar_month() {
        let table = AirQualityTable::from_observations(vec![
            obs("Tiantan", (2016, 1, 5, 0), Some(10.0)),
            obs("Tiantan", (2016, 1, 20, 0), Some(30.0)),
            obs("Changping", (2016, 3, 1, 0), Some(50.0)),
            // null timestamp: excluded from resampling
            obs("Tiantan", (2016, 2, 30, 0), Some(99.0)),
            // null value: excluded from resampling
            obs("Tiantan", (2016, 3, 2, 0), None),
        ]);
        let series = monthly_mean(&table, Pollutant::Pm25);
        assert_eq!(
            series,
            vec![
                MonthlyPoint {
                    bucket: NaiveDate::from_ymd_opt(2016, 1, 31)
                        .unwrap()
                        .and_hms_opt(0, 0, 0)
                        .unwrap(),
                    mean: 20.0,
                },
                MonthlyPoint {
                    bucket: NaiveDate::from_ymd_opt(2016, 3, 31)
                        .unwrap()
                        .and_hms_opt(0, 0, 0)
                        .unwrap(),
                    mean: 50.0,
                },
            ]
        );
    }

    #[test]
    fn month_end_handles_december_and_leap_february() {
        assert_eq!(
            month_end(2016, 12),
            NaiveDate::from_ymd_opt(2016, 12, 31)
        );
        assert_eq!(month_end(2016, 2), NaiveDate::from_ymd_opt(2016, 2, 29));
        assert_eq!(month_end(2015, 2), NaiveDate::from_ymd_opt(2015, 2, 28));
    }

    #[test]
    fn observed_range_skips_null_timestamps() {
        let table = AirQualityTable::from_observations(vec![
            obs("Tiantan", (2016, 2, 30, 0), Some(1.0)),
            obs("Tiantan", (2016, 5, 1, 3), Some(1.0)),
            obs("Tiantan", (2016, 1, 2, 9), Some(1.0)),
        ]);
        let (min, max) = observed_range(&table).unwrap();
        assert_eq!(min.date(), NaiveDate::from_ymd_opt(2016, 1, 2).unwrap());
        assert_eq!(max.date(), NaiveDate::from_ymd_opt(2016, 5, 1).unwrap());
    }

    #[test]
    fn conversion_gaps_count_null_cells() {
        let table = AirQualityTable::from_observations(vec![
            obs("Tiantan", (2016, 2, 30, 0), Some(1.0)),
            obs("Tiantan", (2016, 3, 1, 0), None),
        ]);
        let gaps = conversion_gaps(&table);
        assert_eq!(gaps[0], ("timestamp", 1));
        assert_eq!(gaps[1], ("PM2.5", 1));
        assert_eq!(gaps[2], ("PM10", 2));
    }
}
