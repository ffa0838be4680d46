//! The five weather checks and their fixed evaluation order.
//!
//! Forecast figures are read out of free-text summaries: an optional minus
//! sign and exactly two digits right after `Low `, `High ` or `Humidex `.
//! A day forecast without a humidex figure counts as humidex `0`; a forecast
//! without a Low/High figure is left out of that check entirely.

use regex::Regex;
use std::sync::OnceLock;

use crate::accessor::{current_conditions, forecasts, warnings_and_watches};
use crate::error::ReportError;
use crate::inquiry::{Inquiry, InquiryResult, Verdict};
use crate::types::{ForecastPeriod, WeatherReport, AIR_QUALITY_HEALTH_INDEX};

/// Humidex used for day forecasts that don't report one
pub const HUMIDEX_SENTINEL: i32 = 0;

pub const FREEZING_POINT: i32 = 0;
pub const HIGH_LIMIT: i32 = 30;
pub const HUMIDEX_LIMIT: i32 = 35;
pub const AIR_QUALITY_LIMIT: f64 = 5.0;

/// A named check over a report
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub check: fn(&WeatherReport) -> Result<Verdict, ReportError>,
}

/// Checks in display order
pub const RULES: [Rule; 5] = [
    Rule {
        name: "forecast_above_zero",
        check: forecast_above_zero,
    },
    Rule {
        name: "forecast_above_30",
        check: forecast_above_30,
    },
    Rule {
        name: "humidex_above_35",
        check: humidex_above_35,
    },
    Rule {
        name: "check_warnings",
        check: check_warnings,
    },
    Rule {
        name: "air_quality_below_5",
        check: air_quality_below_5,
    },
];

/// Run every rule against `report`.
///
/// # Errors
///
/// The first [`ReportError`] raised by any rule; no partial result is returned.
pub fn evaluate(report: &WeatherReport) -> Result<InquiryResult, ReportError> {
    let mut inquiry = Inquiry::subject(report);
    for rule in RULES {
        inquiry = inquiry.inquire(rule.check)?;
    }
    Ok(inquiry.join())
}

#[derive(Debug, Clone, Copy)]
enum Label {
    Low,
    High,
    Humidex,
}

#[allow(clippy::expect_used)]
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid figure regex")
}

impl Label {
    fn pattern(self) -> &'static Regex {
        static LOW: OnceLock<Regex> = OnceLock::new();
        static HIGH: OnceLock<Regex> = OnceLock::new();
        static HUMIDEX: OnceLock<Regex> = OnceLock::new();

        match self {
            Self::Low => LOW.get_or_init(|| compile(r"Low (-?[0-9][0-9])")),
            Self::High => HIGH.get_or_init(|| compile(r"High (-?[0-9][0-9])")),
            Self::Humidex => HUMIDEX.get_or_init(|| compile(r"Humidex (-?[0-9][0-9])")),
        }
    }
}

/// First figure following `label` in `summary`
fn extract(summary: &str, label: Label) -> Option<i32> {
    label
        .pattern()
        .captures(summary)
        .and_then(|caps| caps[1].parse().ok())
}

fn lows(report: &WeatherReport) -> impl Iterator<Item = i32> + '_ {
    forecasts(report, ForecastPeriod::Night).filter_map(|f| extract(&f.summary, Label::Low))
}

fn highs(report: &WeatherReport) -> impl Iterator<Item = i32> + '_ {
    forecasts(report, ForecastPeriod::Day).filter_map(|f| extract(&f.summary, Label::High))
}

fn humidexes(report: &WeatherReport) -> impl Iterator<Item = i32> + '_ {
    forecasts(report, ForecastPeriod::Day)
        .map(|f| extract(&f.summary, Label::Humidex).unwrap_or(HUMIDEX_SENTINEL))
}

pub fn forecast_above_zero(report: &WeatherReport) -> Result<Verdict, ReportError> {
    Ok(if lows(report).any(|low| low <= FREEZING_POINT) {
        Verdict::fail("❄️Freezing temperatures are present in forecast")
    } else {
        Verdict::pass("😎All forecasts above freezing")
    })
}

pub fn forecast_above_30(report: &WeatherReport) -> Result<Verdict, ReportError> {
    Ok(if highs(report).any(|high| high > HIGH_LIMIT) {
        Verdict::fail("🔥Temperatures above 30°C in the forecast")
    } else {
        Verdict::pass("😌No forecasts above 30°C")
    })
}

pub fn humidex_above_35(report: &WeatherReport) -> Result<Verdict, ReportError> {
    Ok(if humidexes(report).any(|humidex| humidex > HUMIDEX_LIMIT) {
        Verdict::fail("😓Humidex above 35 in the forecast")
    } else {
        Verdict::pass("😌No humidex above 35 in the forecast")
    })
}

pub fn check_warnings(report: &WeatherReport) -> Result<Verdict, ReportError> {
    let warnings = warnings_and_watches(report)?;
    Ok(if warnings.in_effect {
        Verdict::fail(format!("⚠️{}", warnings.summary))
    } else {
        Verdict::pass("👍No watches or warnings in effect")
    })
}

pub fn air_quality_below_5(report: &WeatherReport) -> Result<Verdict, ReportError> {
    let raw = current_conditions(report)?
        .air_quality_health_index()
        .unwrap_or_default();
    let malformed = || ReportError::MalformedNumericField {
        field: AIR_QUALITY_HEALTH_INDEX,
        value: raw.to_string(),
    };
    let index: f64 = raw.trim().parse().map_err(|_| malformed())?;
    // f64 parsing accepts NaN and infinities; no index reading looks like that.
    if !index.is_finite() {
        return Err(malformed());
    }

    Ok(if index < AIR_QUALITY_LIMIT {
        Verdict::pass("👍Air quality index is below 5, generally fine for most individuals")
    } else {
        Verdict::fail(
            "👎Air quality index is 5 or higher, reduce outdoor activity levels if in an at-risk group",
        )
    })
}
