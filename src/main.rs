//! CLI entry point for the bike rental insights tool.
//!
//! Each subcommand corresponds to one view of the rentals dataset: totals by
//! day type, totals by weather condition, a headline summary, or all of them.

use anyhow::Result;
use bike_rental_insights::analyzers::analyzer::{AnalyzeOptions, analyze};
use bike_rental_insights::output::{CsvPresenter, JsonPresenter, LogPresenter, Presenter, View};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "bike_rental_insights")]
#[command(about = "Bike rental totals by day type and weather condition", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rentals on working days, weekends and holidays
    DayType(CommonArgs),
    /// Rentals per weather condition, with the mean daily trend
    Weather(CommonArgs),
    /// Headline numbers across both breakdowns
    Summary(CommonArgs),
    /// Every table and the summary in one go
    Report(CommonArgs),
}

#[derive(Args)]
struct CommonArgs {
    /// Daily rentals CSV (needs workingday, holiday, weathersit and cnt columns)
    #[arg(short, long, env = "BIKE_RENTAL_DATA", default_value = "day.csv")]
    data: PathBuf,

    /// How to present the result
    #[arg(short, long, value_enum, default_value_t = Format::Log)]
    format: Format,

    /// JSON file or CSV directory to write to
    #[arg(short, long, env = "BIKE_RENTAL_OUTPUT")]
    output: Option<PathBuf>,

    /// Treat an unknown weather code as an error instead of a warning
    #[arg(long, default_value_t = false)]
    strict: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Log,
    Json,
    Csv,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/bike_rental_insights.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("bike_rental_insights.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    let (view, args) = match cli.command {
        Commands::DayType(args) => (View::DayType, args),
        Commands::Weather(args) => (View::Weather, args),
        Commands::Summary(args) => (View::Summary, args),
        Commands::Report(args) => (View::All, args),
    };

    let mut presenter = presenter_for(args.format, args.output, view);
    analyze(
        &args.data,
        view,
        AnalyzeOptions {
            strict: args.strict,
        },
        presenter.as_mut(),
    )?;

    Ok(())
}

/// Picks the presenter for `format`, defaulting the destination when none is given.
fn presenter_for(format: Format, output: Option<PathBuf>, view: View) -> Box<dyn Presenter> {
    match format {
        Format::Log => Box::new(LogPresenter),
        Format::Json => {
            let path = output.unwrap_or_else(|| PathBuf::from(default_json_name(view)));
            info!(path = %path.display(), "Writing JSON output");
            Box::new(JsonPresenter::new(path))
        }
        Format::Csv => {
            let dir = output.unwrap_or_else(|| PathBuf::from("out"));
            info!(dir = %dir.display(), "Writing CSV output");
            Box::new(CsvPresenter::new(dir))
        }
    }
}

fn default_json_name(view: View) -> &'static str {
    match view {
        View::DayType => "day_type.json",
        View::Weather => "weather.json",
        View::Summary => "summary.json",
        View::All => "report.json",
    }
}
