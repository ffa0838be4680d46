//! Route handlers: one fetch, one evaluation, one render per request

use askama::Template;
use axum::extract::State;
use axum::response::{Html, IntoResponse, Json};
use serde::Serialize;
use wxcheck_weather::{evaluate, InquiryResult, RULES};

use crate::error::{AppError, JsonError};
use crate::AppState;

#[derive(Template)]
#[template(path = "weather.html")]
pub struct WeatherTemplate {
    pub place: String,
    pub data: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct RuleVerdict {
    pub rule: &'static str,
    pub passed: bool,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct VerdictsResponse {
    pub place: String,
    pub city: String,
    pub verdicts: Vec<RuleVerdict>,
}

async fn run_checks(state: &AppState) -> Result<InquiryResult, AppError> {
    let report = state.provider.fetch(&state.request).await?;
    let result = evaluate(&report)?;
    tracing::info!(
        "Evaluated {} checks for {}, all passed: {}",
        result.len(),
        state.place,
        result.all_passed()
    );
    Ok(result)
}

pub async fn weather_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let result = run_checks(&state).await?;

    let page = WeatherTemplate {
        place: state.place.to_string(),
        data: result.into_messages(),
    };
    Ok(Html(page.render()?))
}

pub async fn verdicts(State(state): State<AppState>) -> Result<Json<VerdictsResponse>, JsonError> {
    let result = run_checks(&state).await?;

    let verdicts = RULES
        .iter()
        .zip(result.verdicts())
        .map(|(rule, verdict)| RuleVerdict {
            rule: rule.name,
            passed: verdict.is_pass(),
            message: verdict.message().to_string(),
        })
        .collect();

    Ok(Json(VerdictsResponse {
        place: state.place.to_string(),
        city: state.request.city.clone(),
        verdicts,
    }))
}

pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}
