//! Downloader module: the chapter download coordinator.
//!
//! - `downloader` - [`Downloader`], which runs the index and chapter phases
//! - `builder` - [`DownloaderBuilder`] for flexible configuration
//! - `config` - [`DownloaderConfig`] and the completion callback type
//!
//! # Examples
//!
//! ```rust,no_run
//! use novella::downloader::DownloaderBuilder;
//! use novella::chapter::Status;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let downloader = DownloaderBuilder::new()
//!     .chapters(10)
//!     .concurrent_downloads(3)
//!     .on_complete(|summary| {
//!         if let Status::Failed(reason) = summary.status() {
//!             eprintln!("{}: {}", summary.chapter(), reason);
//!         }
//!     })
//!     .build();
//!
//! downloader.run("https://example.com/novel/my-novel").await?;
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod config;
pub mod downloader;

pub use builder::DownloaderBuilder;
pub use config::{ChapterCallback, DownloaderConfig};
pub use downloader::Downloader;
