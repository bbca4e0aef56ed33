//! HTTP client setup and middleware configuration.
//!
//! One client is built per run and shared by every chapter task, so its
//! connection pool is sized from the concurrency limit. Requests are traced
//! through [`reqwest_tracing::TracingMiddleware`]; retries are handled by the
//! [`Fetcher`](super::Fetcher) itself so that it can classify failures.
//!
//! # Examples
//!
//! ```rust
//! use novella::http::{create_http_client, HttpClientConfig};
//! use reqwest::header::{HeaderMap, ACCEPT_LANGUAGE};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut headers = HeaderMap::new();
//! headers.insert(ACCEPT_LANGUAGE, "en".parse()?);
//!
//! let config = HttpClientConfig {
//!     headers: Some(headers),
//!     ..HttpClientConfig::default()
//! };
//! let client = create_http_client(config)?;
//! # Ok(())
//! # }
//! ```

use reqwest::{header::HeaderMap, Proxy};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;

/// User agent sent when none is configured.
pub const DEFAULT_USER_AGENT: &str = concat!(
    "Mozilla/5.0 (compatible; novella/",
    env!("CARGO_PKG_VERSION"),
    ")"
);

/// Configuration for HTTP client setup.
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// User agent identifying the tool to the server.
    pub user_agent: String,
    /// Optional proxy configuration.
    pub proxy: Option<Proxy>,
    /// Default headers to include with all requests.
    pub headers: Option<HeaderMap>,
    /// Idle connections kept per host.
    pub pool_max_idle_per_host: usize,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            proxy: None,
            headers: None,
            pool_max_idle_per_host: 12,
        }
    }
}

/// Creates an HTTP client with middleware configuration.
///
/// The client carries the configured user agent, default headers and proxy,
/// and traces every request.
pub fn create_http_client(
    config: HttpClientConfig,
) -> Result<ClientWithMiddleware, reqwest::Error> {
    let mut inner_client_builder = reqwest::Client::builder()
        .user_agent(config.user_agent)
        .pool_max_idle_per_host(config.pool_max_idle_per_host);

    if let Some(proxy) = config.proxy {
        inner_client_builder = inner_client_builder.proxy(proxy);
    }

    if let Some(headers) = config.headers {
        inner_client_builder = inner_client_builder.default_headers(headers);
    }

    let inner_client = inner_client_builder.build()?;

    let client = ClientBuilder::new(inner_client)
        // Trace HTTP requests. See the tracing crate to make use of these traces.
        .with(TracingMiddleware::default())
        .build();

    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::{HeaderValue, REFERER};

    #[test]
    fn test_default_config() {
        let config = HttpClientConfig::default();
        assert!(config.user_agent.starts_with("Mozilla/5.0 (compatible; novella/"));
        assert!(config.proxy.is_none());
        assert!(config.headers.is_none());
        assert_eq!(config.pool_max_idle_per_host, 12);
    }

    #[test]
    fn test_create_http_client_default() {
        let client = create_http_client(HttpClientConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_create_http_client_with_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(REFERER, HeaderValue::from_static("https://example.com/"));

        let config = HttpClientConfig {
            user_agent: "novella-test".into(),
            headers: Some(headers),
            ..HttpClientConfig::default()
        };

        assert!(create_http_client(config).is_ok());
    }
}
