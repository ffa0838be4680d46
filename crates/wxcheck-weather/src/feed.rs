//! Environment Canada city feed (Atom) parsing.

use chrono::{DateTime, Utc};
use quick_xml::escape::{resolve_html5_entity, unescape_with};
use regex::Regex;
use serde::Deserialize;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::error::FetchError;
use crate::types::{
    CurrentConditions, Entry, SectionKind, WarningsAndWatches, WeatherForecast, WeatherReport,
};

/// Title prefixes the provider uses when nothing is in effect
const NO_WARNINGS_PREFIXES: &[&str] = &[
    "No watches or warnings in effect",
    "Aucune veille ou alerte en vigueur",
];

#[derive(Debug, Deserialize)]
struct AtomFeed {
    #[serde(default)]
    title: Option<AtomText>,
    #[serde(default)]
    updated: Option<String>,
    #[serde(rename = "entry", default)]
    entries: Vec<AtomEntry>,
}

#[derive(Debug, Deserialize)]
struct AtomEntry {
    #[serde(default)]
    title: AtomText,
    category: AtomCategory,
    #[serde(default)]
    summary: AtomText,
}

#[derive(Debug, Deserialize)]
struct AtomCategory {
    #[serde(rename = "@term")]
    term: String,
}

#[derive(Debug, Default, Deserialize)]
struct AtomText {
    #[serde(rename = "$text", default)]
    text: String,
}

/// Parse a city feed document into a report
///
/// # Errors
///
/// Returns [`FetchError::Parse`] if the document is not an Atom feed or has
/// no entries.
pub fn parse_feed(xml: &str) -> Result<WeatherReport, FetchError> {
    let feed: AtomFeed =
        quick_xml::de::from_str(xml).map_err(|e| FetchError::Parse(e.to_string()))?;

    if feed.entries.is_empty() {
        return Err(FetchError::Parse("feed has no entries".to_string()));
    }

    let entries = feed
        .entries
        .into_iter()
        .filter_map(|entry| {
            let kind = SectionKind::from_category(&entry.category.term);
            if kind.is_none() {
                tracing::debug!("Skipping feed entry with category {:?}", entry.category.term);
            }
            kind.map(|kind| to_entry(kind, entry))
        })
        .collect();

    let updated = feed
        .updated
        .as_deref()
        .and_then(|s| DateTime::parse_from_rfc3339(s.trim()).ok())
        .map(|dt| dt.with_timezone(&Utc));

    Ok(WeatherReport {
        title: feed.title.map(|t| t.text.trim().to_string()),
        updated,
        entries,
    })
}

fn to_entry(kind: SectionKind, entry: AtomEntry) -> Entry {
    let title = entry.title.text.trim().to_string();
    let summary = entry.summary.text.trim().to_string();

    match kind {
        SectionKind::CurrentConditions => Entry::CurrentConditions(CurrentConditions {
            fields: parse_condition_fields(&summary),
            title,
        }),
        SectionKind::WarningsAndWatches => {
            let in_effect = !NO_WARNINGS_PREFIXES
                .iter()
                .any(|prefix| title.starts_with(prefix));
            Entry::WarningsAndWatches(WarningsAndWatches {
                title,
                summary,
                in_effect,
            })
        }
        SectionKind::WeatherForecast => Entry::WeatherForecast(WeatherForecast { title, summary }),
    }
}

#[allow(clippy::expect_used)]
fn field_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"<b>\s*([^<]+?)\s*:\s*</b>\s*([^<]*)").expect("valid condition field regex")
    })
}

/// Extract `<b>Label:</b> value` pairs from a current conditions summary
fn parse_condition_fields(summary: &str) -> BTreeMap<String, String> {
    field_pattern()
        .captures_iter(summary)
        .map(|caps| (camel_case(&caps[1]), decode_html(&caps[2])))
        .collect()
}

/// Resolve HTML entities in a field value. A value with a stray `&` is kept as is.
fn decode_html(value: &str) -> String {
    let decoded = unescape_with(value, resolve_html5_entity).unwrap_or(Cow::Borrowed(value));
    decoded.replace('\u{a0}', " ").trim().to_string()
}

/// "Air Quality Health Index" -> "airQualityHealthIndex"
fn camel_case(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    for (i, word) in label
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .enumerate()
    {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            if i == 0 {
                out.extend(first.to_lowercase());
            } else {
                out.extend(first.to_uppercase());
            }
            out.push_str(&chars.as_str().to_lowercase());
        }
    }
    out
}
