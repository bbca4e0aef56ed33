//! HTTP module: client construction and page fetching.
//!
//! - [`client`] - HTTP client creation and middleware configuration
//! - [`fetcher`] - The [`PageSource`] trait and its retrying HTTP implementation

pub mod client;
pub mod fetcher;

pub use client::{create_http_client, HttpClientConfig, DEFAULT_USER_AGENT};
pub use fetcher::{FetchPolicy, Fetcher, PageRetryStrategy, PageSource};
