use crate::analyzers::labels::weather_label;
use crate::analyzers::types::{
    DayType, DayTypeAggregate, DayTypeShare, DayTypeTotal, RawRecord, Summary, WeatherAggregate,
    WeatherTrendPoint,
};
use crate::analyzers::utility::{mean, pct};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};

/// Sums `cnt` per `(workingday, holiday)` pair, labels each pair, then sums
/// again per [`DayType`].
///
/// Both tables come back in ascending key order. The `cnt` total of either
/// table equals the `cnt` total of `records`, which must fit in a `u64`
/// (guaranteed for rows from [`crate::dataset::read_records`]).
pub fn aggregate_by_day_type(records: &[RawRecord]) -> (Vec<DayTypeAggregate>, Vec<DayTypeTotal>) {
    let mut by_flags: BTreeMap<(i64, i64), u64> = BTreeMap::new();
    for record in records {
        *by_flags
            .entry((record.workingday, record.holiday))
            .or_default() += record.cnt;
    }

    let aggregates: Vec<DayTypeAggregate> = by_flags
        .into_iter()
        .map(|((workingday, holiday), cnt)| DayTypeAggregate {
            workingday,
            holiday,
            cnt,
            day_type: DayType::classify(workingday, holiday),
        })
        .collect();

    let mut by_label: BTreeMap<DayType, u64> = BTreeMap::new();
    for aggregate in &aggregates {
        *by_label.entry(aggregate.day_type).or_default() += aggregate.cnt;
    }

    let totals = by_label
        .into_iter()
        .map(|(day_type, cnt)| DayTypeTotal { day_type, cnt })
        .collect();

    debug!(groups = aggregates.len(), "Aggregated rentals by day type");

    (aggregates, totals)
}

/// Sums `cnt` per `weathersit` code and attaches the display label.
///
/// Codes outside the lookup are logged and kept with no label. Same `cnt`
/// bound as [`aggregate_by_day_type`].
pub fn aggregate_by_weather(records: &[RawRecord]) -> Vec<WeatherAggregate> {
    let mut by_code: BTreeMap<i64, u64> = BTreeMap::new();
    for record in records {
        *by_code.entry(record.weathersit).or_default() += record.cnt;
    }

    by_code
        .into_iter()
        .map(|(weathersit, cnt)| {
            let weather_label = match weather_label(weathersit) {
                Ok(label) => Some(label.to_string()),
                Err(e) => {
                    warn!(weathersit, cnt, error = %e, "Keeping weather group without a label");
                    None
                }
            };
            WeatherAggregate {
                weathersit,
                cnt,
                weather_label,
            }
        })
        .collect()
}

/// Splits day-type totals into percentages of all rentals.
pub fn day_type_shares(totals: &[DayTypeTotal]) -> Vec<DayTypeShare> {
    let total: u64 = totals.iter().map(|t| t.cnt).sum();

    totals
        .iter()
        .map(|t| DayTypeShare {
            day_type: t.day_type,
            cnt: t.cnt,
            share_percent: pct(t.cnt, total),
        })
        .collect()
}

/// Mean daily rentals per `weathersit` code, ascending by code.
pub fn weather_trend(records: &[RawRecord]) -> Vec<WeatherTrendPoint> {
    let mut series: BTreeMap<i64, Vec<f64>> = BTreeMap::new();
    for record in records {
        series
            .entry(record.weathersit)
            .or_default()
            .push(record.cnt as f64);
    }

    series
        .into_iter()
        .map(|(weathersit, counts)| WeatherTrendPoint {
            weathersit,
            days: counts.len(),
            mean_cnt: mean(&counts),
        })
        .collect()
}

/// Builds the headline numbers from the raw rows and the two aggregations.
///
/// Ties for "busiest" go to the earliest row in table order.
pub fn summarize(
    records: &[RawRecord],
    totals: &[DayTypeTotal],
    weather: &[WeatherAggregate],
) -> Summary {
    let busiest_day_type = totals
        .iter()
        .fold(None::<&DayTypeTotal>, |best, t| match best {
            Some(b) if b.cnt >= t.cnt => Some(b),
            _ => Some(t),
        })
        .map(|t| t.day_type);

    let busiest_weather = weather
        .iter()
        .filter(|w| w.weather_label.is_some())
        .fold(None::<&WeatherAggregate>, |best, w| match best {
            Some(b) if b.cnt >= w.cnt => Some(b),
            _ => Some(w),
        })
        .and_then(|w| w.weather_label.clone());

    let unmapped_codes: BTreeSet<i64> = weather
        .iter()
        .filter(|w| w.weather_label.is_none())
        .map(|w| w.weathersit)
        .collect();

    Summary {
        total_rentals: records.iter().map(|r| r.cnt).sum(),
        days: records.len(),
        busiest_day_type,
        busiest_weather,
        unmapped_weather_rows: records
            .iter()
            .filter(|r| unmapped_codes.contains(&r.weathersit))
            .count(),
    }
}
