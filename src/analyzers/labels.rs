use crate::analyzers::types::DayType;
use crate::error::LabelMappingError;

impl DayType {
    /// Classifies a `(workingday, holiday)` pair.
    ///
    /// | holiday | workingday | Day type    |
    /// |---------|------------|-------------|
    /// | 1       | any        | Holiday     |
    /// | other   | 1          | Working Day |
    /// | other   | other      | Weekend     |
    pub fn classify(workingday: i64, holiday: i64) -> DayType {
        match (workingday, holiday) {
            (_, 1) => DayType::Holiday,
            (1, _) => DayType::WorkingDay,
            _ => DayType::Weekend,
        }
    }
}

/// Maps a `weathersit` code to its display label.
///
/// | Code | Label            |
/// |------|------------------|
/// | 1    | Clear/Few Clouds |
/// | 2    | Mist/Cloudy      |
/// | 3    | Light Rain/Snow  |
/// | 4    | Heavy Rain/Snow  |
pub fn weather_label(code: i64) -> Result<&'static str, LabelMappingError> {
    match code {
        1 => Ok("Clear/Few Clouds"),
        2 => Ok("Mist/Cloudy"),
        3 => Ok("Light Rain/Snow"),
        4 => Ok("Heavy Rain/Snow"),
        other => Err(LabelMappingError::UnknownWeatherCode(other)),
    }
}
