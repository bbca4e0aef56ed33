//! Progress reporting for chapter runs.
//!
//! - `style` - Progress bar styling options and templates
//! - `display` - The bar advanced once per finished chapter
//!
//! ```rust
//! use novella::downloader::DownloaderBuilder;
//! use novella::progress::ProgressBarOpts;
//!
//! let downloader = DownloaderBuilder::new()
//!     .style_options(ProgressBarOpts::default())
//!     .build();
//! ```

pub(crate) mod display;
pub(crate) mod style;

pub use display::ProgressDisplay;
pub use style::ProgressBarOpts;
