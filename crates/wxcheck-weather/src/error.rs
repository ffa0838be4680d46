//! Weather-specific error types.

use thiserror::Error;
use wxcheck_core::{NetworkError, ReqwestErrorExt};

use crate::types::SectionKind;

/// Failures while evaluating rules against a fetched report.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Report has no {0} section")]
    SectionMissing(SectionKind),

    #[error("Field {field} is not numeric: {value:?}")]
    MalformedNumericField { field: &'static str, value: String },
}

impl ReportError {
    /// User-friendly error message for display.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::SectionMissing(_) => "The weather report is missing a section the checks need.",
            Self::MalformedNumericField { .. } => {
                "The weather report contained a value that could not be read."
            }
        }
    }
}

/// Failures while retrieving a report from the provider.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Provider returned {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.into_network_error())
    }
}

impl FetchError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Network(e) => e.user_message(),
            Self::Status { status, .. } if *status == 404 => {
                "The weather service has no report for this place."
            }
            Self::Status { .. } => "The weather service rejected the request. Please try again.",
            Self::Parse(_) => "The weather service sent a report that could not be read.",
        }
    }
}
