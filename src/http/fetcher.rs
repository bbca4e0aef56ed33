//! Page fetching with timeout, retry and exponential backoff.
//!
//! A [`Fetcher`] turns a URL into page text or a classified [`FetchError`]:
//!
//! - `200` yields the body.
//! - `404` is terminal and never retried.
//! - Any other status, a connection error or a timeout is transient and
//!   retried until the attempt budget is spent, sleeping
//!   `unit * 2^(attempt-1)` plus up to one `unit` of random jitter between
//!   attempts.
//!
//! The coordinator only depends on the [`PageSource`] trait, so other
//! backends (a browser engine, a cache, a test double) can stand in for the
//! HTTP fetcher.
//!
//! # Examples
//!
//! ```rust,no_run
//! use novella::http::{create_http_client, FetchPolicy, Fetcher, HttpClientConfig, PageSource};
//! use reqwest::Url;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = create_http_client(HttpClientConfig::default())?;
//! let fetcher = Fetcher::new(client, FetchPolicy::default());
//! let html = fetcher.fetch(&Url::parse("https://example.com/novel/chapter-1")?).await?;
//! # Ok(())
//! # }
//! ```

use crate::error::{FetchError, Transient};

use async_trait::async_trait;
use reqwest::{Response, StatusCode, Url};
use reqwest_middleware::ClientWithMiddleware;
use reqwest_retry::{Retryable, RetryableStrategy};
use std::fmt;
use std::time::Duration;
use tracing::{debug, warn};

/// Anything that can turn a URL into page text.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetches the page at `url`.
    async fn fetch(&self, url: &Url) -> Result<String, FetchError>;
}

/// Timeout and retry settings of a [`Fetcher`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchPolicy {
    /// Timeout of a single attempt.
    pub timeout: Duration,
    /// Total number of attempts, including the first one.
    pub max_attempts: u32,
    /// Base backoff interval; also the upper bound of the jitter.
    pub backoff_unit: Duration,
}

impl Default for FetchPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(25),
            max_attempts: 5,
            backoff_unit: Duration::from_secs(1),
        }
    }
}

impl FetchPolicy {
    /// Delay before the attempt following `attempt`, without jitter.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 1u32
            .checked_shl(attempt.saturating_sub(1))
            .unwrap_or(u32::MAX);
        self.backoff_unit.saturating_mul(factor)
    }

    fn jitter(&self) -> Duration {
        self.backoff_unit.mul_f64(rand::random::<f64>())
    }
}

/// Status classification used between attempts.
///
/// `None` means the response is usable as is.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageRetryStrategy;

impl RetryableStrategy for PageRetryStrategy {
    fn handle(
        &self,
        res: &Result<Response, reqwest_middleware::Error>,
    ) -> Option<Retryable> {
        match res {
            Ok(response) if response.status() == StatusCode::OK => None,
            Ok(response) if response.status() == StatusCode::NOT_FOUND => {
                Some(Retryable::Fatal)
            }
            Ok(_) => Some(Retryable::Transient),
            Err(_) => Some(Retryable::Transient),
        }
    }
}

/// HTTP implementation of [`PageSource`].
#[derive(Clone)]
pub struct Fetcher {
    client: ClientWithMiddleware,
    policy: FetchPolicy,
}

impl fmt::Debug for Fetcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fetcher")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl Fetcher {
    /// Creates a fetcher over a shared client.
    pub fn new(client: ClientWithMiddleware, policy: FetchPolicy) -> Self {
        Self { client, policy }
    }

    /// Fetches `url` with an explicit timeout and attempt budget.
    pub async fn fetch_with(
        &self,
        url: &Url,
        timeout: Duration,
        max_attempts: u32,
    ) -> Result<String, FetchError> {
        let attempts = max_attempts.max(1);
        let mut last = Transient::Timeout;

        for attempt in 1..=attempts {
            match self.attempt(url, timeout).await {
                Ok(text) => return Ok(text),
                Err(FetchError::Transient(cause)) => last = cause,
                Err(fatal) => return Err(fatal),
            }

            if attempt == attempts {
                break;
            }

            let delay = self.policy.backoff(attempt) + self.policy.jitter();
            warn!(
                %url,
                attempt,
                error = %last,
                "transient failure, retrying in {:.1}s",
                delay.as_secs_f64()
            );
            tokio::time::sleep(delay).await;
        }

        Err(FetchError::ExhaustedRetries { attempts, last })
    }

    /// Performs a single request.
    async fn attempt(&self, url: &Url, timeout: Duration) -> Result<String, FetchError> {
        debug!("Fetching {}", url);
        let result = self.client.get(url.clone()).timeout(timeout).send().await;

        match PageRetryStrategy.handle(&result) {
            Some(Retryable::Fatal) => Err(FetchError::NotFound { url: url.clone() }),
            Some(Retryable::Transient) => Err(classify(&result).into()),
            None => match result {
                Ok(response) => response
                    .text()
                    .await
                    .map_err(|e| FetchError::from(from_reqwest(&e))),
                Err(e) => Err(from_middleware(&e).into()),
            },
        }
    }
}

#[async_trait]
impl PageSource for Fetcher {
    async fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        self.fetch_with(url, self.policy.timeout, self.policy.max_attempts)
            .await
    }
}

fn classify(result: &Result<Response, reqwest_middleware::Error>) -> Transient {
    match result {
        Ok(response) => Transient::Status(response.status()),
        Err(e) => from_middleware(e),
    }
}

fn from_middleware(error: &reqwest_middleware::Error) -> Transient {
    match error {
        reqwest_middleware::Error::Reqwest(e) => from_reqwest(e),
        reqwest_middleware::Error::Middleware(e) => Transient::Network(e.to_string()),
    }
}

fn from_reqwest(error: &reqwest::Error) -> Transient {
    if error.is_timeout() {
        Transient::Timeout
    } else {
        Transient::Network(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_doubles_from_unit() {
        let policy = FetchPolicy {
            backoff_unit: Duration::from_millis(100),
            ..FetchPolicy::default()
        };
        assert_eq!(policy.backoff(1), Duration::from_millis(100));
        assert_eq!(policy.backoff(2), Duration::from_millis(200));
        assert_eq!(policy.backoff(4), Duration::from_millis(800));
    }

    #[test]
    fn test_backoff_saturates() {
        let policy = FetchPolicy::default();
        assert!(policy.backoff(200) >= policy.backoff(31));
    }

    #[test]
    fn test_jitter_stays_below_one_unit() {
        let policy = FetchPolicy {
            backoff_unit: Duration::from_millis(10),
            ..FetchPolicy::default()
        };
        for _ in 0..100 {
            assert!(policy.jitter() <= Duration::from_millis(10));
        }
    }

    #[test]
    fn test_default_policy() {
        let policy = FetchPolicy::default();
        assert_eq!(policy.timeout, Duration::from_secs(25));
        assert_eq!(policy.max_attempts, 5);
        assert_eq!(policy.backoff_unit, Duration::from_secs(1));
    }
}
