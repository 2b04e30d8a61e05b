//! Fetching the schedule page over HTTP

use bytes::Bytes;
use reqwest::Client;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, error, info, instrument};

use crate::error::AppError;

/// Something that can download a page's HTML.
///
/// The cache only talks to this trait, so tests can serve a fixture page
/// instead of hitting the network.
pub trait HtmlFetcher: Send + Sync {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<Bytes, AppError>> + Send;
}

/// Creates an HTTP client with a request timeout and a small connection pool.
pub fn create_http_client_with_timeout(timeout_seconds: u64) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .pool_max_idle_per_host(crate::constants::HTTP_POOL_MAX_IDLE_PER_HOST)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// [`HtmlFetcher`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn with_timeout(timeout_seconds: u64) -> Result<Self, AppError> {
        Ok(Self::new(create_http_client_with_timeout(timeout_seconds)?))
    }
}

/// Maps a non-success HTTP status to the matching error.
fn status_error(status_code: u16, reason: &str, url: &str) -> AppError {
    match status_code {
        404 => AppError::upstream_not_found(url),
        429 => AppError::upstream_rate_limit(reason, url),
        400..=499 => AppError::upstream_client_error(status_code, reason, url),
        502 | 503 => AppError::upstream_unavailable(status_code, reason, url),
        _ => AppError::upstream_server_error(status_code, reason, url),
    }
}

impl HtmlFetcher for HttpFetcher {
    #[instrument(skip(self))]
    async fn fetch(&self, url: &str) -> Result<Bytes, AppError> {
        info!("Fetching schedule page: {url}");

        let response = self.client.get(url).send().await.map_err(|e| {
            error!("Request failed for URL {}: {}", url, e);
            if e.is_timeout() {
                AppError::network_timeout(url)
            } else if e.is_connect() {
                AppError::network_connection(url, e.to_string())
            } else {
                AppError::Fetch(e)
            }
        })?;

        let status = response.status();
        debug!("Response status: {status}");

        if !status.is_success() {
            let reason = status.canonical_reason().unwrap_or("Unknown error");
            error!("HTTP {} - {} (URL: {})", status.as_u16(), reason, url);
            return Err(status_error(status.as_u16(), reason, url));
        }

        let body = response.bytes().await.map_err(|e| {
            error!("Failed to read response body from URL {}: {}", url, e);
            if e.is_timeout() {
                AppError::network_timeout(url)
            } else {
                AppError::Fetch(e)
            }
        })?;

        debug!("Response length: {} bytes", body.len());
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    fn create_test_fetcher() -> HttpFetcher {
        HttpFetcher::with_timeout(crate::constants::DEFAULT_HTTP_TIMEOUT_SECONDS)
            .expect("Failed to create test HTTP client")
    }

    #[tokio::test]
    async fn test_fetch_success_returns_body() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
            .mount(&mock_server)
            .await;

        let body = create_test_fetcher()
            .fetch(&format!("{}/", mock_server.uri()))
            .await
            .unwrap();
        assert_eq!(&body[..], b"<html>ok</html>");
    }

    #[tokio::test]
    async fn test_fetch_maps_status_codes() {
        let cases = [
            (404, "not-found"),
            (429, "rate-limit"),
            (403, "client"),
            (503, "unavailable"),
            (500, "server"),
        ];

        let mock_server = MockServer::start().await;
        for (status, route) in cases {
            Mock::given(method("GET"))
                .and(path(format!("/{route}")))
                .respond_with(ResponseTemplate::new(status))
                .mount(&mock_server)
                .await;
        }

        let fetcher = create_test_fetcher();
        let fetch = |route: &'static str| {
            let url = format!("{}/{route}", mock_server.uri());
            let fetcher = fetcher.clone();
            async move { fetcher.fetch(&url).await.unwrap_err() }
        };

        assert!(matches!(fetch("not-found").await, AppError::UpstreamNotFound { .. }));
        assert!(matches!(fetch("rate-limit").await, AppError::UpstreamRateLimit { .. }));
        assert!(matches!(
            fetch("client").await,
            AppError::UpstreamClientError { status: 403, .. }
        ));
        assert!(matches!(
            fetch("unavailable").await,
            AppError::UpstreamUnavailable { status: 503, .. }
        ));
        assert!(matches!(
            fetch("server").await,
            AppError::UpstreamServerError { status: 500, .. }
        ));
    }

    #[tokio::test]
    async fn test_fetch_timeout() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
            .mount(&mock_server)
            .await;

        let fetcher = HttpFetcher::with_timeout(1).unwrap();
        let error = fetcher.fetch(&mock_server.uri()).await.unwrap_err();
        assert!(matches!(error, AppError::NetworkTimeout { .. }));
        assert!(error.is_upstream());
    }

    #[tokio::test]
    async fn test_fetch_connection_refused() {
        // Nothing listens on port 9 (discard) in the test environment
        let fetcher = create_test_fetcher();
        let error = fetcher.fetch("http://127.0.0.1:9/").await.unwrap_err();
        assert!(error.is_upstream());
    }

    #[test]
    fn test_status_error_mapping() {
        assert!(matches!(
            status_error(502, "Bad Gateway", "u"),
            AppError::UpstreamUnavailable { status: 502, .. }
        ));
        assert!(matches!(
            status_error(418, "I'm a teapot", "u"),
            AppError::UpstreamClientError { status: 418, .. }
        ));
    }
}
