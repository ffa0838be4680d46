//! Router tests against a mock Environment Canada feed.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::path::Path;
use std::time::Duration;
use tower::ServiceExt; // for oneshot
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use wxcheck_core::Lang;
use wxcheck_server::{create_router, AppState};
use wxcheck_weather::{FeedRequest, WeatherProvider};

const SAMPLE_FEED: &str = include_str!("../../wxcheck-weather/tests/fixtures/on-77_e.xml");

const STORMY_FEED: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Hamilton - Weather - Environment Canada</title>
  <entry>
    <title>HEAT WARNING IN EFFECT, Hamilton</title>
    <category term="Warnings and Watches"/>
    <summary type="html">Hot and humid conditions through Monday.</summary>
  </entry>
  <entry>
    <title>Current Conditions: 31.0&#xB0;C</title>
    <category term="Current Conditions"/>
    <summary type="html"><![CDATA[<b>Condition:</b> Sunny <br/>
<b>Air Quality Health Index:</b> 6 <br/>]]></summary>
  </entry>
  <entry>
    <title>Sunday: Sunny. High 34.</title>
    <category term="Weather Forecasts"/>
    <summary type="html">Sunny. High 34. Humidex 41.</summary>
  </entry>
  <entry>
    <title>Sunday night: Clear. Low 22.</title>
    <category term="Weather Forecasts"/>
    <summary type="html">Clear. Low 22.</summary>
  </entry>
</feed>"#;

async fn mock_feed(status: u16, body: &str) -> MockServer {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rss/city/on-77_e.xml"))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(&mock_server)
        .await;

    mock_server
}

fn test_app(mock_server: &MockServer, static_dir: &Path) -> Router {
    let provider =
        WeatherProvider::with_base_url(&mock_server.uri(), Duration::from_secs(5)).unwrap();
    let request = FeedRequest {
        lang: Lang::En,
        city: "on-77".to_string(),
    };
    create_router(AppState::new(provider, request, "Hamilton", static_dir))
}

async fn get(app: Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn test_weather_page_lists_all_verdicts_in_order() {
    let mock_server = mock_feed(200, SAMPLE_FEED).await;
    let static_dir = tempfile::tempdir().unwrap();

    let (status, body) = get(test_app(&mock_server, static_dir.path()), "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Weather check for Hamilton"));

    let expected = [
        "All forecasts above freezing",
        "No forecasts above 30°C",
        "No humidex above 35 in the forecast",
        "No watches or warnings in effect",
        "Air quality index is below 5",
    ];
    let positions: Vec<usize> = expected
        .iter()
        .map(|m| body.find(m).unwrap_or_else(|| panic!("missing {m:?} in page")))
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(body.matches("<li>").count(), 5);
}

#[tokio::test]
async fn test_weather_page_shows_failures() {
    let mock_server = mock_feed(200, STORMY_FEED).await;
    let static_dir = tempfile::tempdir().unwrap();

    let (status, body) = get(test_app(&mock_server, static_dir.path()), "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("All forecasts above freezing"));
    assert!(body.contains("Temperatures above 30°C in the forecast"));
    assert!(body.contains("Humidex above 35 in the forecast"));
    assert!(body.contains("Hot and humid conditions through Monday."));
    assert!(body.contains("Air quality index is 5 or higher"));
}

#[tokio::test]
async fn test_verdicts_api() {
    let mock_server = mock_feed(200, STORMY_FEED).await;
    let static_dir = tempfile::tempdir().unwrap();

    let (status, body) = get(test_app(&mock_server, static_dir.path()), "/api/verdicts").await;
    assert_eq!(status, StatusCode::OK);

    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["place"], "Hamilton");
    assert_eq!(json["city"], "on-77");

    let verdicts = json["verdicts"].as_array().unwrap();
    let summary: Vec<(&str, bool)> = verdicts
        .iter()
        .map(|v| (v["rule"].as_str().unwrap(), v["passed"].as_bool().unwrap()))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("forecast_above_zero", true),
            ("forecast_above_30", false),
            ("humidex_above_35", false),
            ("check_warnings", false),
            ("air_quality_below_5", false),
        ]
    );
}

#[tokio::test]
async fn test_provider_failure_is_bad_gateway() {
    let mock_server = mock_feed(503, "down for maintenance").await;
    let static_dir = tempfile::tempdir().unwrap();

    let (status, body) = get(test_app(&mock_server, static_dir.path()), "/").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body.contains("Weather check unavailable"));
    assert!(!body.contains("<li>"));

    let (status, body) = get(test_app(&mock_server, static_dir.path()), "/api/verdicts").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    let json: Value = serde_json::from_str(&body).unwrap();
    assert!(json["error"].as_str().unwrap().contains("503"));
}

#[tokio::test]
async fn test_missing_section_is_internal_error() {
    let feed = r#"<feed xmlns="http://www.w3.org/2005/Atom">
  <entry>
    <title>Sunday: Sunny. High 24.</title>
    <category term="Weather Forecasts"/>
    <summary type="html">Sunny. High 24.</summary>
  </entry>
</feed>"#;
    let mock_server = mock_feed(200, feed).await;
    let static_dir = tempfile::tempdir().unwrap();

    let (status, body) = get(test_app(&mock_server, static_dir.path()), "/").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!body.contains("<li>"));
}

#[tokio::test]
async fn test_health_check() {
    let mock_server = MockServer::start().await;
    let static_dir = tempfile::tempdir().unwrap();

    let (status, body) = get(test_app(&mock_server, static_dir.path()), "/health").await;
    assert_eq!(status, StatusCode::OK);

    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], "healthy");
}

#[tokio::test]
async fn test_static_files_are_served() {
    let mock_server = MockServer::start().await;
    let static_dir = tempfile::tempdir().unwrap();
    std::fs::write(static_dir.path().join("style.css"), "body { color: red; }").unwrap();

    let (status, body) = get(test_app(&mock_server, static_dir.path()), "/style.css").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "body { color: red; }");

    let (status, _) = get(test_app(&mock_server, static_dir.path()), "/missing.css").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
