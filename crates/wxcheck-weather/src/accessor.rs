//! Section lookups over a fetched report.

use crate::error::ReportError;
use crate::types::{
    CurrentConditions, Entry, ForecastPeriod, SectionKind, WarningsAndWatches, WeatherForecast,
    WeatherReport,
};

/// First current conditions entry in the report
///
/// # Errors
///
/// [`ReportError::SectionMissing`] if the report has no current conditions.
pub fn current_conditions(report: &WeatherReport) -> Result<&CurrentConditions, ReportError> {
    report
        .entries
        .iter()
        .find_map(|entry| match entry {
            Entry::CurrentConditions(conditions) => Some(conditions),
            _ => None,
        })
        .ok_or(ReportError::SectionMissing(SectionKind::CurrentConditions))
}

/// First warnings and watches entry in the report
///
/// # Errors
///
/// [`ReportError::SectionMissing`] if the report has no warnings entry.
pub fn warnings_and_watches(report: &WeatherReport) -> Result<&WarningsAndWatches, ReportError> {
    report
        .entries
        .iter()
        .find_map(|entry| match entry {
            Entry::WarningsAndWatches(warnings) => Some(warnings),
            _ => None,
        })
        .ok_or(ReportError::SectionMissing(SectionKind::WarningsAndWatches))
}

/// Forecast entries covering `period`, in report order
pub fn forecasts(
    report: &WeatherReport,
    period: ForecastPeriod,
) -> impl Iterator<Item = &WeatherForecast> {
    report
        .entries
        .iter()
        .filter_map(|entry| match entry {
            Entry::WeatherForecast(forecast) => Some(forecast),
            _ => None,
        })
        .filter(move |forecast| forecast.period() == period)
}
