//! Core downloader implementation.
//!
//! A run has two strictly ordered phases:
//!
//! 1. **Index**: fetch the index page once and turn it into a chapter list.
//!    A failure here aborts the run before any chapter is scheduled.
//! 2. **Chapters**: one future per chapter (fetch, extract, save), at most
//!    `concurrent_downloads` in flight. A failed chapter is written to the
//!    error log and never affects the others. Every future sleeps for the
//!    configured delay after its work, before releasing its slot.
//!
//! # Examples
//!
//! ```rust,no_run
//! use novella::downloader::DownloaderBuilder;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let downloader = DownloaderBuilder::new()
//!     .directory("chapters".into())
//!     .chapters(20)
//!     .build();
//!
//! let summary = downloader.run("https://example.com/novel/my-novel").await?;
//! println!(
//!     "saved {}, skipped {}, failed {}",
//!     summary.saved(),
//!     summary.skipped(),
//!     summary.failed()
//! );
//! # Ok(())
//! # }
//! ```

use super::config::DownloaderConfig;
use crate::chapter::{ChapterRef, RunSummary, Summary};
use crate::discover::{fallback_chapters, LinkDiscoverer};
use crate::error::{ChapterError, Error, Result};
use crate::extract::ContentExtractor;
use crate::http::{create_http_client, FetchPolicy, Fetcher, PageSource};
use crate::progress::ProgressDisplay;
use crate::store::{ChapterStore, SaveOutcome};

use futures::stream::{self, StreamExt};
use reqwest::{header::HeaderMap, Url};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Represents the download controller.
///
/// A downloader can be created via its builder:
///
/// ```rust
/// # fn main()  {
/// use novella::downloader::DownloaderBuilder;
///
/// let d = DownloaderBuilder::new().build();
/// # }
/// ```
#[derive(Clone)]
pub struct Downloader {
    config: DownloaderConfig,
    discoverer: LinkDiscoverer,
    extractor: ContentExtractor,
}

impl fmt::Debug for Downloader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Downloader")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Downloader {
    /// Creates a new Downloader with the given configuration.
    pub(crate) fn new(
        config: DownloaderConfig,
        discoverer: LinkDiscoverer,
        extractor: ContentExtractor,
    ) -> Self {
        Self {
            config,
            discoverer,
            extractor,
        }
    }

    /// Gets the directory where chapters will be stored.
    pub fn directory(&self) -> &PathBuf {
        &self.config.directory
    }

    /// Gets the number of chapters to download.
    pub fn chapters(&self) -> usize {
        self.config.chapters
    }

    /// Gets the number of concurrent chapter downloads.
    pub fn concurrent_downloads(&self) -> usize {
        self.config.concurrent_downloads
    }

    /// Gets the pause taken after each chapter.
    pub fn delay(&self) -> Duration {
        self.config.delay
    }

    /// Gets the fetch policy.
    pub fn fetch_policy(&self) -> &FetchPolicy {
        &self.config.fetch
    }

    /// Gets the user agent.
    pub fn user_agent(&self) -> &str {
        &self.config.user_agent
    }

    /// Gets the custom headers.
    pub fn headers(&self) -> Option<&HeaderMap> {
        self.config.headers.as_ref()
    }

    /// Gets the full configuration.
    pub fn config(&self) -> &DownloaderConfig {
        &self.config
    }

    /// Downloads the novel whose table of contents is at `index_url`.
    ///
    /// Builds one HTTP client shared by every chapter.
    pub async fn run(&self, index_url: &str) -> Result<RunSummary> {
        let index_url = Url::parse(index_url).map_err(|e| {
            Error::InvalidUrl(format!("The url \"{}\" cannot be parsed: {}", index_url, e))
        })?;

        let client = create_http_client(self.config.http_client_config())?;
        let fetcher = Fetcher::new(client, self.config.fetch);

        self.run_with(&fetcher, &index_url).await
    }

    /// Downloads the novel at `index_url` through any [`PageSource`].
    pub async fn run_with<S>(&self, source: &S, index_url: &Url) -> Result<RunSummary>
    where
        S: PageSource + ?Sized,
    {
        info!(%index_url, "Fetching index page");
        let index_html = source
            .fetch(index_url)
            .await
            .map_err(|source| Error::IndexDiscovery {
                url: index_url.clone(),
                source,
            })?;

        let chapters = self.plan(&index_html, index_url);
        let store = ChapterStore::open(&self.config.directory).await?;

        let progress = ProgressDisplay::new(self.config.style_options.clone(), chapters.len());

        let summaries = stream::iter(&chapters)
            .map(|chapter| self.process(source, &store, chapter, &progress))
            .buffer_unordered(self.config.concurrent_downloads.max(1))
            .collect::<Vec<_>>()
            .await;

        progress.finish();

        let summary = RunSummary::new(summaries);
        info!(
            saved = summary.saved(),
            skipped = summary.skipped(),
            failed = summary.failed(),
            "Download complete"
        );
        Ok(summary)
    }

    /// Chapter list for an index page, capped at the configured count.
    ///
    /// Falls back to synthesized `chapter-{n}` URLs when the page has no
    /// chapter links.
    pub fn plan(&self, index_html: &str, index_url: &Url) -> Vec<ChapterRef> {
        let mut chapters = self.discoverer.discover(index_html, index_url);

        if chapters.is_empty() {
            warn!("No chapter links found on the index page, guessing the URL pattern");
            return fallback_chapters(index_url, self.config.chapters);
        }

        info!(
            found = chapters.len(),
            "Found chapter links, keeping the first {}", self.config.chapters
        );
        chapters.truncate(self.config.chapters);
        chapters
    }

    /// Runs one chapter to completion and reports its outcome.
    async fn process<S>(
        &self,
        source: &S,
        store: &ChapterStore,
        chapter: &ChapterRef,
        progress: &ProgressDisplay,
    ) -> Summary
    where
        S: PageSource + ?Sized,
    {
        if let Some(existing) = store.existing(chapter.index) {
            debug!("Chapter {} already downloaded at {:?}", chapter.label(), existing);
            let summary = Summary::new(chapter.clone())
                .with_path(existing)
                .skip("already downloaded");
            self.complete(&summary, progress);
            return summary;
        }

        let summary = match self.download_chapter(source, store, chapter).await {
            Ok((SaveOutcome::Saved(path), title)) => {
                info!("[OK] {} - {}", chapter.label(), title);
                Summary::new(chapter.clone())
                    .with_path(path)
                    .with_title(title)
            }
            Ok((SaveOutcome::Skipped(path), title)) => {
                debug!("Chapter {} already exists at {:?}", chapter.label(), path);
                Summary::new(chapter.clone())
                    .with_path(path)
                    .with_title(title)
                    .skip("file already exists")
            }
            Err(e) => {
                warn!("[ERR] {} ({})", chapter, e);
                if let Err(log_error) = store.log_error(chapter.index, &chapter.url, &e).await {
                    error!("Failed to append to the error log: {}", log_error);
                }
                Summary::new(chapter.clone()).fail(e)
            }
        };

        self.complete(&summary, progress);
        tokio::time::sleep(self.config.delay).await;

        summary
    }

    /// Fetch, extract and save.
    async fn download_chapter<S>(
        &self,
        source: &S,
        store: &ChapterStore,
        chapter: &ChapterRef,
    ) -> std::result::Result<(SaveOutcome, String), ChapterError>
    where
        S: PageSource + ?Sized,
    {
        let html = source.fetch(&chapter.url).await?;

        let content = self.extractor.extract(&html);
        if content.is_empty() {
            warn!(
                "No chapter text recognised in {}, saving the title only",
                chapter.url
            );
        }

        let outcome = store.save(chapter.index, &content).await?;
        Ok((outcome, content.title))
    }

    fn complete(&self, summary: &Summary, progress: &ProgressDisplay) {
        progress.advance(&summary.chapter().label());

        if let Some(ref callback) = self.config.on_complete {
            callback(summary);
        }
    }
}
