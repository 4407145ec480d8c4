use bike_rental_insights::analyzers::aggregate::{aggregate_by_day_type, aggregate_by_weather};
use bike_rental_insights::analyzers::analyzer::{AnalyzeOptions, analyze};
use bike_rental_insights::analyzers::types::DayType;
use bike_rental_insights::dataset::load_records;
use bike_rental_insights::output::{CsvPresenter, JsonPresenter, View};
use std::path::Path;

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/day_sample.csv");

#[test]
fn test_full_pipeline() {
    let records = load_records(Path::new(FIXTURE)).expect("Failed to load fixture");
    assert_eq!(records.len(), 14);

    let input_total: u64 = records.iter().map(|r| r.cnt).sum();
    assert_eq!(input_total, 15234);

    let (by_flags, totals) = aggregate_by_day_type(&records);
    assert_eq!(by_flags.iter().map(|a| a.cnt).sum::<u64>(), input_total);
    assert_eq!(totals.iter().map(|t| t.cnt).sum::<u64>(), input_total);

    let lookup = |day_type: DayType| totals.iter().find(|t| t.day_type == day_type).unwrap().cnt;
    assert_eq!(lookup(DayType::WorkingDay), 10062);
    assert_eq!(lookup(DayType::Weekend), 4172);
    assert_eq!(lookup(DayType::Holiday), 1000);

    let weather = aggregate_by_weather(&records);
    assert_eq!(weather.iter().map(|w| w.cnt).sum::<u64>(), input_total);
    let labels: Vec<_> = weather
        .iter()
        .map(|w| (w.weathersit, w.cnt, w.weather_label.as_deref()))
        .collect();
    assert_eq!(
        labels,
        vec![
            (1, 8691, Some("Clear/Few Clouds")),
            (2, 5938, Some("Mist/Cloudy")),
            (3, 605, Some("Light Rain/Snow")),
        ]
    );
}

#[test]
fn test_report_to_json_and_csv() {
    let dir = tempfile::tempdir().unwrap();
    let json_path = dir.path().join("report.json");

    let report = analyze(
        Path::new(FIXTURE),
        View::All,
        AnalyzeOptions { strict: true },
        &mut JsonPresenter::new(&json_path),
    )
    .unwrap();

    assert_eq!(report.summary.days, 14);
    assert_eq!(report.summary.busiest_day_type, Some(DayType::WorkingDay));
    assert_eq!(
        report.summary.busiest_weather.as_deref(),
        Some("Clear/Few Clouds")
    );
    assert_eq!(report.summary.unmapped_weather_rows, 0);

    let share_sum: f64 = report.day_type.shares.iter().map(|s| s.share_percent).sum();
    assert!((share_sum - 100.0).abs() < 1e-9);

    let trend = &report.weather.trend;
    assert_eq!(trend.len(), 3);
    assert_eq!(trend[2].days, 1);
    assert_eq!(trend[2].mean_cnt, 605.0);

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(json["summary"]["total_rentals"], 15234);

    let csv_dir = dir.path().join("tables");
    analyze(
        Path::new(FIXTURE),
        View::All,
        AnalyzeOptions::default(),
        &mut CsvPresenter::new(&csv_dir),
    )
    .unwrap();

    for name in [
        "day_type_agg.csv",
        "day_type_total.csv",
        "day_type_share.csv",
        "weather_agg.csv",
        "weather_trend.csv",
        "summary.csv",
    ] {
        assert!(csv_dir.join(name).exists(), "{name} was not written");
    }

    let totals = std::fs::read_to_string(csv_dir.join("day_type_total.csv")).unwrap();
    assert_eq!(
        totals,
        "day_type,cnt\nWorking Day,10062\nWeekend,4172\nHoliday,1000\n"
    );

    let weather = std::fs::read_to_string(csv_dir.join("weather_agg.csv")).unwrap();
    assert_eq!(
        weather,
        "weathersit,cnt,weather_label\n\
         1,8691,Clear/Few Clouds\n\
         2,5938,Mist/Cloudy\n\
         3,605,Light Rain/Snow\n"
    );
}
