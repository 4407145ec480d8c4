//! Data types used by the aggregation pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Columns the dataset header must contain.
pub const REQUIRED_COLUMNS: [&str; 4] = ["workingday", "holiday", "weathersit", "cnt"];

/// A single row deserialized from the daily rentals CSV.
///
/// Only the columns the aggregations need are kept; everything else in the
/// file (`dteday`, `temp`, `casual`, ...) is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct RawRecord {
    pub workingday: i64,
    pub holiday: i64,
    pub weathersit: i64,
    pub cnt: u64,
}

/// Day classification derived from the `workingday` / `holiday` flags.
///
/// Declaration order is the output order of every day-type table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DayType {
    #[serde(rename = "Working Day")]
    WorkingDay,
    #[serde(rename = "Weekend")]
    Weekend,
    #[serde(rename = "Holiday")]
    Holiday,
}

impl DayType {
    pub fn as_str(self) -> &'static str {
        match self {
            DayType::WorkingDay => "Working Day",
            DayType::Weekend => "Weekend",
            DayType::Holiday => "Holiday",
        }
    }
}

impl fmt::Display for DayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rentals summed per exact `(workingday, holiday)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayTypeAggregate {
    pub workingday: i64,
    pub holiday: i64,
    pub cnt: u64,
    pub day_type: DayType,
}

/// Rentals summed per [`DayType`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayTypeTotal {
    pub day_type: DayType,
    pub cnt: u64,
}

/// A [`DayTypeTotal`] with its percentage of all rentals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayTypeShare {
    pub day_type: DayType,
    pub cnt: u64,
    pub share_percent: f64,
}

/// Rentals summed per `weathersit` code.
///
/// `weather_label` is `None` when the code is outside the lookup table; the
/// row is still kept so totals are preserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeatherAggregate {
    pub weathersit: i64,
    pub cnt: u64,
    pub weather_label: Option<String>,
}

/// Mean daily rentals for one weather code.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherTrendPoint {
    pub weathersit: i64,
    pub days: usize,
    pub mean_cnt: f64,
}

/// Headline numbers for the summary view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total_rentals: u64,
    pub days: usize,
    pub busiest_day_type: Option<DayType>,
    pub busiest_weather: Option<String>,
    pub unmapped_weather_rows: usize,
}

/// Both day-type tables plus the shares derived from the totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayTypeReport {
    pub by_flags: Vec<DayTypeAggregate>,
    pub totals: Vec<DayTypeTotal>,
    pub shares: Vec<DayTypeShare>,
}

/// Weather tables: summed counts and the per-code mean trend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherReport {
    pub by_code: Vec<WeatherAggregate>,
    pub trend: Vec<WeatherTrendPoint>,
}

/// Everything computed from one load of the dataset, handed to a presenter.
#[derive(Debug, Clone, Serialize)]
pub struct InsightsReport {
    pub schema_version: u8,
    pub source: String,
    pub generated_at: DateTime<Utc>,
    pub summary: Summary,
    pub day_type: DayTypeReport,
    pub weather: WeatherReport,
}
