//! Builder pattern implementation for creating Downloader instances.
//!
//! # Examples
//!
//! ```rust
//! use novella::downloader::DownloaderBuilder;
//! use std::time::Duration;
//!
//! let downloader = DownloaderBuilder::new()
//!     .directory("my-novel".into())
//!     .chapters(50)
//!     .concurrent_downloads(4)
//!     .delay(Duration::from_millis(750))
//!     .max_attempts(3)
//!     .build();
//! ```
//!
//! ```rust
//! use novella::downloader::DownloaderBuilder;
//! use reqwest::header::{self, HeaderValue};
//!
//! let downloader = DownloaderBuilder::hidden()
//!     .header(header::ACCEPT_LANGUAGE, HeaderValue::from_static("en"))
//!     .on_complete(|summary| println!("{:?}", summary.status()))
//!     .build();
//! ```

use super::{config::DownloaderConfig, downloader::Downloader};
use crate::chapter::Summary;
use crate::discover::LinkDiscoverer;
use crate::extract::ContentExtractor;
use crate::http::FetchPolicy;
use crate::progress::ProgressBarOpts;

use reqwest::header::{HeaderMap, HeaderValue, IntoHeaderName};
use std::{path::PathBuf, sync::Arc, time::Duration};

/// A builder used to create a [`Downloader`].
#[derive(Default)]
pub struct DownloaderBuilder {
    config: DownloaderConfig,
    discoverer: LinkDiscoverer,
    extractor: ContentExtractor,
}

impl DownloaderBuilder {
    /// Creates a builder with the default options.
    pub fn new() -> Self {
        DownloaderBuilder::default()
    }

    /// Convenience function to hide the progress bar.
    pub fn hidden() -> Self {
        let mut builder = DownloaderBuilder::default();
        builder.config.style_options = ProgressBarOpts::hidden();
        builder
    }

    /// Sets the directory where to store the chapters.
    pub fn directory(mut self, directory: PathBuf) -> Self {
        self.config.directory = directory;
        self
    }

    /// Set the number of chapters to download.
    pub fn chapters(mut self, chapters: usize) -> Self {
        self.config.chapters = chapters;
        self
    }

    /// Set the number of concurrent chapter downloads.
    pub fn concurrent_downloads(mut self, concurrent_downloads: usize) -> Self {
        self.config.concurrent_downloads = concurrent_downloads;
        self
    }

    /// Set the pause taken after each chapter.
    pub fn delay(mut self, delay: Duration) -> Self {
        self.config.delay = delay;
        self
    }

    /// Set the whole fetch policy at once.
    pub fn fetch_policy(mut self, policy: FetchPolicy) -> Self {
        self.config.fetch = policy;
        self
    }

    /// Set the timeout of a single request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.fetch.timeout = timeout;
        self
    }

    /// Set the number of attempts per page, including the first one.
    pub fn max_attempts(mut self, max_attempts: u32) -> Self {
        self.config.fetch.max_attempts = max_attempts;
        self
    }

    /// Set the base backoff interval between attempts.
    pub fn backoff_unit(mut self, unit: Duration) -> Self {
        self.config.fetch.backoff_unit = unit;
        self
    }

    /// Set the user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Route requests through a proxy.
    pub fn proxy(mut self, proxy: reqwest::Proxy) -> Self {
        self.config.proxy = Some(proxy);
        self
    }

    /// Set the progress bar options.
    pub fn style_options(mut self, style_options: ProgressBarOpts) -> Self {
        self.config.style_options = style_options;
        self
    }

    /// Set callback for when each chapter completes.
    ///
    /// The callback is called as soon as a chapter is saved, skipped or
    /// failed, while other chapters may still be in progress.
    pub fn on_complete<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Summary) + Send + Sync + 'static,
    {
        self.config.on_complete = Some(Arc::new(Box::new(callback)));
        self
    }

    /// Use a custom link discoverer.
    pub fn discoverer(mut self, discoverer: LinkDiscoverer) -> Self {
        self.discoverer = discoverer;
        self
    }

    /// Use a custom content extractor.
    pub fn extractor(mut self, extractor: ContentExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// Helper method to get or create a new HeaderMap.
    fn new_header(&self) -> HeaderMap {
        match self.config.headers {
            Some(ref h) => h.to_owned(),
            _ => HeaderMap::new(),
        }
    }

    /// Add the http headers.
    ///
    /// You can call `.headers()` multiple times and all `HeaderMap` will be merged into a single one.
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        let mut new = self.new_header();
        new.extend(headers);

        self.config.headers = Some(new);
        self
    }

    /// Add the http header
    pub fn header<K: IntoHeaderName>(mut self, name: K, value: HeaderValue) -> Self {
        let mut new = self.new_header();

        new.insert(name, value);

        self.config.headers = Some(new);
        self
    }

    /// Create the [`Downloader`] with the specified options.
    pub fn build(self) -> Downloader {
        Downloader::new(self.config, self.discoverer, self.extractor)
    }
}
