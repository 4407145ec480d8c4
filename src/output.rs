//! Presentation adapters for computed insight tables.
//!
//! The aggregation pipeline hands an [`InsightsReport`] to a [`Presenter`];
//! what happens next (logging, JSON, CSV) is up to the implementation.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::analyzers::types::{
    DayTypeAggregate, DayTypeShare, DayTypeTotal, InsightsReport, Summary, WeatherAggregate,
    WeatherTrendPoint,
};

/// Which part of the report to present. Mirrors the dashboard's tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    DayType,
    Weather,
    Summary,
    All,
}

/// Consumer of a finished report.
pub trait Presenter {
    fn present(&mut self, report: &InsightsReport, view: View) -> Result<()>;
}

/// Emits each table row as a structured `tracing` event.
#[derive(Debug, Default)]
pub struct LogPresenter;

impl Presenter for LogPresenter {
    fn present(&mut self, report: &InsightsReport, view: View) -> Result<()> {
        debug!("{:#?}", report);

        if matches!(view, View::DayType | View::All) {
            for row in &report.day_type.by_flags {
                info!(
                    workingday = row.workingday,
                    holiday = row.holiday,
                    day_type = %row.day_type,
                    cnt = row.cnt,
                    "Rentals by day flags"
                );
            }
            for row in &report.day_type.shares {
                info!(
                    day_type = %row.day_type,
                    cnt = row.cnt,
                    share = %format!("{:.1}%", row.share_percent),
                    "Rentals by day type"
                );
            }
        }

        if matches!(view, View::Weather | View::All) {
            for row in &report.weather.by_code {
                match &row.weather_label {
                    Some(label) => info!(
                        weathersit = row.weathersit,
                        weather = %label,
                        cnt = row.cnt,
                        "Rentals by weather"
                    ),
                    None => warn!(
                        weathersit = row.weathersit,
                        cnt = row.cnt,
                        "Rentals by weather (unmapped code)"
                    ),
                }
            }
            for point in &report.weather.trend {
                info!(
                    weathersit = point.weathersit,
                    days = point.days,
                    mean_cnt = %format!("{:.1}", point.mean_cnt),
                    "Daily rentals trend"
                );
            }
        }

        if matches!(view, View::Summary | View::All) {
            let summary = &report.summary;
            info!(
                total_rentals = summary.total_rentals,
                days = summary.days,
                busiest_day_type = summary
                    .busiest_day_type
                    .map(|d| d.as_str())
                    .unwrap_or("-"),
                busiest_weather = summary.busiest_weather.as_deref().unwrap_or("-"),
                unmapped_weather_rows = summary.unmapped_weather_rows,
                "Summary"
            );
        }

        Ok(())
    }
}

/// Writes the selected view as pretty-printed JSON to a single file.
#[derive(Debug)]
pub struct JsonPresenter {
    path: PathBuf,
}

impl JsonPresenter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Presenter for JsonPresenter {
    fn present(&mut self, report: &InsightsReport, view: View) -> Result<()> {
        let file = create_file(&self.path)?;

        match view {
            View::DayType => serde_json::to_writer_pretty(file, &report.day_type)?,
            View::Weather => serde_json::to_writer_pretty(file, &report.weather)?,
            View::Summary => serde_json::to_writer_pretty(file, &report.summary)?,
            View::All => serde_json::to_writer_pretty(file, report)?,
        }

        info!(path = %self.path.display(), ?view, "JSON report written");
        Ok(())
    }
}

/// Writes each table of the selected view to its own CSV file in a directory.
#[derive(Debug)]
pub struct CsvPresenter {
    dir: PathBuf,
}

impl CsvPresenter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl Presenter for CsvPresenter {
    fn present(&mut self, report: &InsightsReport, view: View) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create {}", self.dir.display()))?;

        if matches!(view, View::DayType | View::All) {
            write_table(&self.dir.join("day_type_agg.csv"), &report.day_type.by_flags)?;
            write_table(&self.dir.join("day_type_total.csv"), &report.day_type.totals)?;
            write_table(&self.dir.join("day_type_share.csv"), &report.day_type.shares)?;
        }
        if matches!(view, View::Weather | View::All) {
            write_table(&self.dir.join("weather_agg.csv"), &report.weather.by_code)?;
            write_table(&self.dir.join("weather_trend.csv"), &report.weather.trend)?;
        }
        if matches!(view, View::Summary | View::All) {
            write_table(
                &self.dir.join("summary.csv"),
                std::slice::from_ref(&report.summary),
            )?;
        }

        info!(dir = %self.dir.display(), ?view, "CSV tables written");
        Ok(())
    }
}

fn create_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    File::create(path).with_context(|| format!("failed to create {}", path.display()))
}

/// A row type with a fixed CSV header, in field order.
pub trait CsvTable: Serialize {
    const COLUMNS: &'static [&'static str];
}

impl CsvTable for DayTypeAggregate {
    const COLUMNS: &'static [&'static str] = &["workingday", "holiday", "cnt", "day_type"];
}

impl CsvTable for DayTypeTotal {
    const COLUMNS: &'static [&'static str] = &["day_type", "cnt"];
}

impl CsvTable for DayTypeShare {
    const COLUMNS: &'static [&'static str] = &["day_type", "cnt", "share_percent"];
}

impl CsvTable for WeatherAggregate {
    const COLUMNS: &'static [&'static str] = &["weathersit", "cnt", "weather_label"];
}

impl CsvTable for WeatherTrendPoint {
    const COLUMNS: &'static [&'static str] = &["weathersit", "days", "mean_cnt"];
}

impl CsvTable for Summary {
    const COLUMNS: &'static [&'static str] = &[
        "total_rentals",
        "days",
        "busiest_day_type",
        "busiest_weather",
        "unmapped_weather_rows",
    ];
}

/// Writes `rows` to a fresh CSV file at `path`.
///
/// The header is always written, so an empty table still yields a header line.
pub fn write_table<T: CsvTable>(path: &Path, rows: &[T]) -> Result<()> {
    debug!(path = %path.display(), rows = rows.len(), "Writing CSV table");

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(create_file(path)?);
    writer.write_record(T::COLUMNS)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(())
}
