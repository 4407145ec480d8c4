use crate::analyzers::aggregate::{
    aggregate_by_day_type, aggregate_by_weather, day_type_shares, summarize, weather_trend,
};
use crate::analyzers::types::{DayTypeReport, InsightsReport, RawRecord, WeatherReport};
use crate::dataset::load_records;
use crate::error::LabelMappingError;
use crate::output::{Presenter, View};
use anyhow::Result;
use chrono::Utc;
use std::path::Path;
use tracing::info;

pub const SCHEMA_VERSION: u8 = 1;

/// Knobs for [`analyze`].
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyzeOptions {
    /// Fail instead of warning when a weather code has no label.
    pub strict: bool,
}

/// Computes every table from already-loaded rows.
///
/// Pure apart from the `generated_at` timestamp.
pub fn build_report(source: &str, records: &[RawRecord]) -> InsightsReport {
    let (by_flags, totals) = aggregate_by_day_type(records);
    let shares = day_type_shares(&totals);
    let by_code = aggregate_by_weather(records);
    let trend = weather_trend(records);
    let summary = summarize(records, &totals, &by_code);

    InsightsReport {
        schema_version: SCHEMA_VERSION,
        source: source.to_string(),
        generated_at: Utc::now(),
        summary,
        day_type: DayTypeReport {
            by_flags,
            totals,
            shares,
        },
        weather: WeatherReport { by_code, trend },
    }
}

/// Loads the dataset at `path`, aggregates it and hands the result to `presenter`.
///
/// Returns the report so callers can inspect what was presented.
#[tracing::instrument(skip(path, presenter), fields(path = %path.display()))]
pub fn analyze<P: Presenter + ?Sized>(
    path: &Path,
    view: View,
    options: AnalyzeOptions,
    presenter: &mut P,
) -> Result<InsightsReport> {
    let records = load_records(path)?;
    let report = build_report(&path.display().to_string(), &records);

    if options.strict {
        if let Some(row) = report
            .weather
            .by_code
            .iter()
            .find(|w| w.weather_label.is_none())
        {
            return Err(LabelMappingError::UnknownWeatherCode(row.weathersit).into());
        }
    }

    presenter.present(&report, view)?;

    info!(
        rows = records.len(),
        total_rentals = report.summary.total_rentals,
        "Analysis complete"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::types::DayType;
    use crate::error::DataLoadError;
    use std::io::Write;

    /// Records what it was asked to present.
    #[derive(Default)]
    struct Recorder {
        calls: Vec<(View, u64)>,
    }

    impl Presenter for Recorder {
        fn present(&mut self, report: &InsightsReport, view: View) -> Result<()> {
            self.calls.push((view, report.summary.total_rentals));
            Ok(())
        }
    }

    fn write_csv(rows: &[&str]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "workingday,holiday,weathersit,cnt").unwrap();
        for row in rows {
            writeln!(file, "{row}").unwrap();
        }
        file
    }

    #[test]
    fn test_analyze_presents_report_once() {
        let file = write_csv(&["1,0,1,100", "0,0,2,50", "0,1,3,10"]);
        let mut recorder = Recorder::default();

        let report = analyze(
            file.path(),
            View::All,
            AnalyzeOptions::default(),
            &mut recorder,
        )
        .unwrap();

        assert_eq!(recorder.calls, vec![(View::All, 160)]);
        assert_eq!(report.summary.busiest_day_type, Some(DayType::WorkingDay));
        assert_eq!(report.schema_version, SCHEMA_VERSION);
    }

    #[test]
    fn test_analyze_unknown_weather_code_is_warning_by_default() {
        let file = write_csv(&["1,0,1,100", "1,0,6,5"]);
        let mut recorder = Recorder::default();

        let report = analyze(
            file.path(),
            View::Weather,
            AnalyzeOptions::default(),
            &mut recorder,
        )
        .unwrap();

        assert_eq!(report.weather.by_code.len(), 2);
        assert_eq!(report.weather.by_code[1].weather_label, None);
        assert_eq!(report.summary.total_rentals, 105);
        assert_eq!(recorder.calls.len(), 1);
    }

    #[test]
    fn test_analyze_strict_rejects_unknown_weather_code() {
        let file = write_csv(&["1,0,1,100", "1,0,6,5"]);
        let mut recorder = Recorder::default();

        let err = analyze(
            file.path(),
            View::Weather,
            AnalyzeOptions { strict: true },
            &mut recorder,
        )
        .unwrap_err();

        assert_eq!(
            err.downcast_ref::<LabelMappingError>(),
            Some(&LabelMappingError::UnknownWeatherCode(6))
        );
        assert!(recorder.calls.is_empty());
    }

    #[test]
    fn test_analyze_missing_file_is_not_presented() {
        let dir = tempfile::tempdir().unwrap();
        let mut recorder = Recorder::default();

        let err = analyze(
            &dir.path().join("absent.csv"),
            View::All,
            AnalyzeOptions::default(),
            &mut recorder,
        )
        .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<DataLoadError>(),
            Some(DataLoadError::Open { .. })
        ));
        assert!(recorder.calls.is_empty());
    }

    #[test]
    fn test_analyze_empty_table_still_presents() {
        let file = write_csv(&[]);
        let mut recorder = Recorder::default();

        let report = analyze(
            file.path(),
            View::Summary,
            AnalyzeOptions::default(),
            &mut recorder,
        )
        .unwrap();

        assert!(report.day_type.totals.is_empty());
        assert!(report.weather.by_code.is_empty());
        assert_eq!(recorder.calls, vec![(View::Summary, 0)]);
    }

    #[test]
    fn test_build_report_is_repeatable() {
        let records = vec![
            RawRecord {
                workingday: 1,
                holiday: 0,
                weathersit: 2,
                cnt: 30,
            },
            RawRecord {
                workingday: 0,
                holiday: 0,
                weathersit: 1,
                cnt: 12,
            },
        ];

        let first = build_report("a.csv", &records);
        let second = build_report("a.csv", &records);

        assert_eq!(first.summary, second.summary);
        assert_eq!(first.day_type, second.day_type);
        assert_eq!(first.weather, second.weather);
    }
}
