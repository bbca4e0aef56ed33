//! Configuration structures and defaults for the downloader.
//!
//! Everything a run needs is carried by [`DownloaderConfig`]; there is no
//! global state. The defaults download the first five chapters into
//! `chapters/`, six at a time, pausing 400 ms after each one.
//!
//! # Examples
//!
//! ```rust
//! use novella::chapter::Status;
//! use novella::downloader::ChapterCallback;
//!
//! let callback: ChapterCallback = Box::new(|summary| match summary.status() {
//!     Status::Saved => println!("✓ {}", summary.chapter()),
//!     Status::Skipped(reason) => println!("- {} ({})", summary.chapter(), reason),
//!     Status::Failed(reason) => println!("✗ {} ({})", summary.chapter(), reason),
//! });
//! ```

use crate::chapter::Summary;
use crate::http::{FetchPolicy, HttpClientConfig, DEFAULT_USER_AGENT};
use crate::progress::ProgressBarOpts;

use reqwest::header::HeaderMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Callback type for chapter completion events
pub type ChapterCallback = Box<dyn Fn(&Summary) + Send + Sync>;

/// Configuration structure for the downloader
#[derive(Clone)]
pub struct DownloaderConfig {
    /// Directory where to store the chapter files.
    pub directory: PathBuf,
    /// Number of chapters to download.
    pub chapters: usize,
    /// Number of maximum concurrent chapter downloads.
    pub concurrent_downloads: usize,
    /// Pause after each chapter, before its slot is released.
    pub delay: Duration,
    /// Timeout and retry settings of every request.
    pub fetch: FetchPolicy,
    /// User agent sent with every request.
    pub user_agent: String,
    /// Optional proxy configuration.
    pub proxy: Option<reqwest::Proxy>,
    /// Custom HTTP headers.
    pub headers: Option<HeaderMap>,
    /// Progress bar options.
    pub style_options: ProgressBarOpts,
    /// Callback for when each chapter completes.
    pub on_complete: Option<Arc<ChapterCallback>>,
}

impl DownloaderConfig {
    /// HTTP client settings, with a pool wide enough for two connections per slot.
    pub fn http_client_config(&self) -> HttpClientConfig {
        HttpClientConfig {
            user_agent: self.user_agent.clone(),
            proxy: self.proxy.clone(),
            headers: self.headers.clone(),
            pool_max_idle_per_host: self.concurrent_downloads.max(1) * 2,
        }
    }
}

impl std::fmt::Debug for DownloaderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DownloaderConfig")
            .field("directory", &self.directory)
            .field("chapters", &self.chapters)
            .field("concurrent_downloads", &self.concurrent_downloads)
            .field("delay", &self.delay)
            .field("fetch", &self.fetch)
            .field("user_agent", &self.user_agent)
            .field("proxy", &self.proxy)
            .field("headers", &self.headers)
            .field("style_options", &self.style_options)
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

impl Default for DownloaderConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("chapters"),
            chapters: 5,
            concurrent_downloads: 6,
            delay: Duration::from_millis(400),
            fetch: FetchPolicy::default(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            proxy: None,
            headers: None,
            style_options: ProgressBarOpts::default(),
            on_complete: None,
        }
    }
}
