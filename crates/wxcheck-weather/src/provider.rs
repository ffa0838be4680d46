//! Environment Canada city feed client.

use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;
use wxcheck_core::Lang;

use crate::error::FetchError;
use crate::feed::parse_feed;
use crate::types::WeatherReport;

const USER_AGENT: &str = concat!("wxcheck/", env!("CARGO_PKG_VERSION"));

/// What to fetch: locale and provider city code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedRequest {
    pub lang: Lang,
    pub city: String,
}

#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: Arc<Client>,
    base_url: String,
}

impl WeatherProvider {
    /// Client for the provider site at `base_url` (normally
    /// `weather.feed_base_url` from configuration)
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Network`] if the HTTP client cannot be built.
    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client: Arc::new(client),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn feed_url(&self, request: &FeedRequest) -> String {
        format!(
            "{}/rss/city/{}_{}.xml",
            self.base_url,
            request.city,
            request.lang.feed_suffix()
        )
    }

    /// Fetch and parse the city feed.
    ///
    /// # Errors
    ///
    /// [`FetchError::Network`] when the request cannot be completed,
    /// [`FetchError::Status`] for a non-success HTTP status, and
    /// [`FetchError::Parse`] when the body is not a usable feed.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch(&self, request: &FeedRequest) -> Result<WeatherReport, FetchError> {
        let url = self.feed_url(request);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Feed request to {} returned {}", url, status);
            return Err(FetchError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        let report = parse_feed(&body)?;
        tracing::debug!("Parsed {} report entries", report.entries.len());
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const SAMPLE_FEED: &str = include_str!("../tests/fixtures/on-77_e.xml");

    fn request(city: &str) -> FeedRequest {
        FeedRequest {
            lang: Lang::En,
            city: city.to_string(),
        }
    }

    #[test]
    fn test_feed_url() {
        let provider =
            WeatherProvider::with_base_url("http://example.test/", Duration::from_secs(1)).unwrap();
        assert_eq!(
            provider.feed_url(&request("on-77")),
            "http://example.test/rss/city/on-77_e.xml"
        );

        let french = FeedRequest {
            lang: Lang::Fr,
            city: "on-86".to_string(),
        };
        assert_eq!(
            provider.feed_url(&french),
            "http://example.test/rss/city/on-86_f.xml"
        );
    }

    #[tokio::test]
    async fn test_fetch_parses_feed() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rss/city/on-77_e.xml"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw(SAMPLE_FEED, "application/atom+xml; charset=utf-8"),
            )
            .mount(&mock_server)
            .await;

        let provider =
            WeatherProvider::with_base_url(&mock_server.uri(), Duration::from_secs(5)).unwrap();
        let report = provider.fetch(&request("on-77")).await.unwrap();

        assert_eq!(report.entries.len(), 4);
    }

    #[tokio::test]
    async fn test_fetch_not_found_is_status_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let provider =
            WeatherProvider::with_base_url(&mock_server.uri(), Duration::from_secs(5)).unwrap();
        let err = provider.fetch(&request("on-999")).await.unwrap_err();

        assert!(matches!(err, FetchError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_fetch_garbage_body_is_parse_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html><body>maintenance"))
            .mount(&mock_server)
            .await;

        let provider =
            WeatherProvider::with_base_url(&mock_server.uri(), Duration::from_secs(5)).unwrap();
        let err = provider.fetch(&request("on-77")).await.unwrap_err();

        assert!(matches!(err, FetchError::Parse(_)));
    }
}
