//! Request-level errors and their HTTP rendering.

use askama::Template;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Json, Response};
use thiserror::Error;
use wxcheck_core::ConfigError;
use wxcheck_weather::{FetchError, ReportError};

/// Any failure of one fetch-and-check cycle, or of server setup.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Weather fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Weather report unusable: {0}")]
    Report(#[from] ReportError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

impl AppError {
    /// Returns a user-friendly message suitable for display on the page.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Fetch(e) => e.user_message(),
            AppError::Report(e) => e.user_message(),
            AppError::Config(e) => e.user_message(),
            AppError::Template(_) => "The page could not be rendered. Please try again.",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Fetch(_) => StatusCode::BAD_GATEWAY,
            AppError::Report(_) | AppError::Config(_) | AppError::Template(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

#[derive(Template)]
#[template(path = "error.html")]
struct ErrorTemplate<'a> {
    message: &'a str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!("Weather check failed: {}", self);

        let page = ErrorTemplate {
            message: self.user_message(),
        };
        let body = page
            .render()
            .unwrap_or_else(|_| self.user_message().to_string());
        (self.status(), Html(body)).into_response()
    }
}

/// [`AppError`] rendered as a JSON body, for API routes.
#[derive(Debug)]
pub struct JsonError(pub AppError);

impl From<AppError> for JsonError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for JsonError {
    fn into_response(self) -> Response {
        tracing::error!("Weather check failed: {}", self.0);

        let body = Json(serde_json::json!({
            "error": self.0.to_string(),
            "message": self.0.user_message(),
        }));
        (self.0.status(), body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wxcheck_core::NetworkError;
    use wxcheck_weather::SectionKind;

    #[test]
    fn test_fetch_errors_are_bad_gateway() {
        let err: AppError = FetchError::Network(NetworkError::Timeout).into();
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
        assert!(err.user_message().contains("timed out"));
    }

    #[test]
    fn test_report_errors_are_internal() {
        let err: AppError = ReportError::SectionMissing(SectionKind::CurrentConditions).into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_error_page_status() {
        let err: AppError = FetchError::Parse("bad".into()).into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
