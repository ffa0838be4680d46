//! HTTP front end for wxcheck: fetches the configured city report on each
//! request, runs the weather checks and renders the verdicts.

pub mod error;
pub mod handlers;

use axum::{routing::get, Router};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{services::ServeDir, trace::TraceLayer};
use wxcheck_core::{Config, ConfigError};
use wxcheck_weather::{places, FeedRequest, WeatherProvider};

pub use error::{AppError, JsonError};

/// Shared, read-only per-process state. Each request builds its own report.
#[derive(Debug, Clone)]
pub struct AppState {
    pub provider: WeatherProvider,
    pub request: Arc<FeedRequest>,
    pub place: Arc<str>,
    pub static_dir: PathBuf,
}

impl AppState {
    pub fn new(
        provider: WeatherProvider,
        request: FeedRequest,
        place: &str,
        static_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            provider,
            request: Arc::new(request),
            place: Arc::from(place),
            static_dir: static_dir.into(),
        }
    }

    /// Build state from configuration, resolving the place to a city code.
    ///
    /// # Errors
    ///
    /// Unknown place, or an HTTP client that cannot be built.
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let place = config.weather.place.trim();
        let city = places::resolve_place(place)
            .ok_or_else(|| ConfigError::UnknownPlace(place.to_string()))?;

        let provider = WeatherProvider::with_base_url(
            &config.weather.feed_base_url,
            Duration::from_secs(config.weather.timeout_secs),
        )?;

        tracing::info!("Checking weather for {} ({})", place, city);

        Ok(Self::new(
            provider,
            FeedRequest {
                lang: config.weather.lang,
                city,
            },
            place,
            config.server.static_dir.clone(),
        ))
    }
}

pub fn create_router(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.static_dir);

    Router::new()
        .route("/", get(handlers::weather_page))
        .route("/api/verdicts", get(handlers::verdicts))
        .route("/health", get(handlers::health_check))
        .fallback_service(static_files)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
