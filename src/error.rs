//! Error handling for the novella library.
//!
//! Three layers of errors exist:
//!
//! - [`FetchError`] is what a [`PageSource`](crate::http::PageSource) returns
//!   for a single page, already classified as terminal or transient.
//! - [`ChapterError`] is the failure of one chapter task. It is caught at the
//!   task boundary, written to the error log and never stops sibling chapters.
//! - [`Error`] is returned by the public API. Only the index phase can make a
//!   whole run fail.

use reqwest::{StatusCode, Url};
use std::io;
use thiserror::Error;

/// Errors that can happen when using novella.
#[derive(Error, Debug)]
pub enum Error {
    /// Error from an underlying system.
    #[error("Internal error: {0}")]
    Internal(String),

    /// Error from the underlying URL parser or the expected URL format.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A CSS selector given to the content extractor could not be parsed.
    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    /// I/O Error.
    ///
    /// Raised when the output directory cannot be created or scanned.
    #[error("I/O error")]
    IOError {
        #[from]
        source: io::Error,
    },

    /// Error from the Reqwest library, typically while building the client.
    #[error("Reqwest Error")]
    Reqwest {
        #[from]
        source: reqwest::Error,
    },

    /// The index page could not be fetched, so no chapter was scheduled.
    #[error("failed to fetch the index page {url}: {source}")]
    IndexDiscovery {
        url: Url,
        #[source]
        source: FetchError,
    },
}

/// Result type alias for operations that can fail with a novella error.
pub type Result<T> = std::result::Result<T, Error>;

/// A failure that is worth retrying.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Transient {
    /// The request did not complete within its timeout.
    #[error("request timed out")]
    Timeout,
    /// The server answered with a status other than 200 or 404.
    #[error("HTTP {0}")]
    Status(StatusCode),
    /// Connection, protocol or body decoding failure.
    #[error("network error: {0}")]
    Network(String),
}

/// Classified failure of a page fetch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The page does not exist. Never retried.
    #[error("not found: {url}")]
    NotFound { url: Url },

    /// A single attempt failed in a retryable way.
    #[error(transparent)]
    Transient(#[from] Transient),

    /// Every attempt failed; carries the last observed failure.
    #[error("gave up after {attempts} attempt(s): {last}")]
    ExhaustedRetries { attempts: u32, last: Transient },
}

impl FetchError {
    /// Whether retrying the same request could succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, FetchError::Transient(_))
    }
}

/// Failure of a single chapter task.
#[derive(Error, Debug)]
pub enum ChapterError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("failed to write chapter: {0}")]
    Store(#[from] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exhausted_retries_message_carries_last_error() {
        let err = FetchError::ExhaustedRetries {
            attempts: 3,
            last: Transient::Status(StatusCode::SERVICE_UNAVAILABLE),
        };
        assert_eq!(
            err.to_string(),
            "gave up after 3 attempt(s): HTTP 503 Service Unavailable"
        );
    }

    #[test]
    fn test_only_single_attempt_failures_are_transient() {
        let url = Url::parse("https://example.com/novel/chapter-1").unwrap();
        assert!(FetchError::Transient(Transient::Timeout).is_transient());
        assert!(!FetchError::NotFound { url }.is_transient());
        assert!(!FetchError::ExhaustedRetries {
            attempts: 1,
            last: Transient::Timeout
        }
        .is_transient());
    }

    #[test]
    fn test_chapter_error_wraps_fetch_error_transparently() {
        let err = ChapterError::from(FetchError::Transient(Transient::Network(
            "connection reset".into(),
        )));
        assert_eq!(err.to_string(), "network error: connection reset");
    }
}
