//! Novella is a crate aiming at providing a simple way to download the
//! chapters of a web novel into plain text files.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//! use novella::{downloader::DownloaderBuilder, Error};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Error> {
//! let downloader = DownloaderBuilder::new()
//!     .directory(PathBuf::from("output"))
//!     .chapters(10)
//!     .build();
//! let summary = downloader.run("https://example.com/novel/my-novel").await?;
//! println!("{} saved, {} failed", summary.saved(), summary.failed());
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! The novella crate is organized into several modules:
//!
//! - [`chapter`] - Chapter references, extracted content and run summaries
//! - [`discover`] - Chapter link discovery on an index page, with a URL pattern fallback
//! - [`downloader`] - The main `Downloader` and `DownloaderBuilder` for orchestrating runs
//! - [`error`] - Centralized error handling with the `Error` enum
//! - [`extract`] - Title and body text extraction from chapter pages
//! - [`http`] - HTTP client construction and the retrying page fetcher
//! - [`progress`] - Progress bar styling and display management
//! - [`store`] - Chapter files and the error log on disk

pub mod chapter;
pub mod discover;
pub mod downloader;
pub mod error;
pub mod extract;
pub mod http;
pub mod progress;
pub mod store;

pub use chapter::{ChapterContent, ChapterRef, RunSummary, Status, Summary};
pub use discover::{fallback_chapters, LinkDiscoverer, UrlTemplate};
pub use downloader::{Downloader, DownloaderBuilder};
pub use error::{ChapterError, Error, FetchError, Result, Transient};
pub use extract::{BodyRule, ContentExtractor};
pub use http::{create_http_client, FetchPolicy, Fetcher, HttpClientConfig, PageSource};
pub use progress::ProgressBarOpts;
pub use store::{ChapterStore, SaveOutcome};
