use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Field key of the air quality health index inside current conditions
pub const AIR_QUALITY_HEALTH_INDEX: &str = "airQualityHealthIndex";

/// Title token that marks an overnight forecast period
pub const NIGHT_MARKER: &str = "night";

/// Report section kinds, named by their feed category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    CurrentConditions,
    WarningsAndWatches,
    WeatherForecast,
}

impl SectionKind {
    /// Category term used by the provider feed
    pub fn category(&self) -> &'static str {
        match self {
            Self::CurrentConditions => "Current Conditions",
            Self::WarningsAndWatches => "Warnings and Watches",
            Self::WeatherForecast => "Weather Forecasts",
        }
    }

    pub fn from_category(term: &str) -> Option<Self> {
        match term.trim() {
            "Current Conditions" | "Conditions actuelles" => Some(Self::CurrentConditions),
            "Warnings and Watches" | "Veilles et avertissements" => {
                Some(Self::WarningsAndWatches)
            }
            "Weather Forecasts" | "Prévisions météo" => Some(Self::WeatherForecast),
            _ => None,
        }
    }
}

impl std::fmt::Display for SectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.category())
    }
}

/// Current observations, keyed by camelCase field label
/// (e.g. `airQualityHealthIndex`, `temperature`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub title: String,
    pub fields: BTreeMap<String, String>,
}

impl CurrentConditions {
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Raw air quality health index as reported (numeric string)
    pub fn air_quality_health_index(&self) -> Option<&str> {
        self.field(AIR_QUALITY_HEALTH_INDEX)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WarningsAndWatches {
    pub title: String,
    pub summary: String,
    pub in_effect: bool,
}

/// Which half of a day a forecast covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ForecastPeriod {
    /// Daytime periods carry highs and humidex
    Day,
    /// Overnight periods carry lows
    Night,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherForecast {
    pub title: String,
    pub summary: String,
}

impl WeatherForecast {
    pub fn period(&self) -> ForecastPeriod {
        if self.title.contains(NIGHT_MARKER) {
            ForecastPeriod::Night
        } else {
            ForecastPeriod::Day
        }
    }
}

/// One section of a weather report
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Entry {
    CurrentConditions(CurrentConditions),
    WarningsAndWatches(WarningsAndWatches),
    WeatherForecast(WeatherForecast),
}

impl Entry {
    pub fn kind(&self) -> SectionKind {
        match self {
            Self::CurrentConditions(_) => SectionKind::CurrentConditions,
            Self::WarningsAndWatches(_) => SectionKind::WarningsAndWatches,
            Self::WeatherForecast(_) => SectionKind::WeatherForecast,
        }
    }
}

/// A fetched city weather report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherReport {
    pub title: Option<String>,
    pub updated: Option<DateTime<Utc>>,
    pub entries: Vec<Entry>,
}

impl WeatherReport {
    pub fn new(entries: Vec<Entry>) -> Self {
        Self {
            title: None,
            updated: None,
            entries,
        }
    }
}
