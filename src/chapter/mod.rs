//! Chapter data model.
//!
//! A run works on three kinds of values:
//!
//! - [`ChapterRef`] - where a chapter lives and its position in reading order
//! - [`ChapterContent`] - what was extracted from a chapter page
//! - [`Summary`] / [`RunSummary`] - what happened to each chapter
//!
//! # Examples
//!
//! ```rust
//! use novella::chapter::{ChapterContent, ChapterRef};
//! use reqwest::Url;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let chapter = ChapterRef::new(1, Url::parse("https://example.com/novel/chapter-1")?);
//! assert_eq!(chapter.label(), "0001");
//!
//! let content = ChapterContent::new("Chapter 1", "");
//! assert!(content.is_empty());
//! # Ok(())
//! # }
//! ```

pub mod summary;

pub use summary::{RunSummary, Status, Summary};

use reqwest::Url;
use std::fmt;

/// Location of one chapter and its 1-based position in reading order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterRef {
    /// 1-based index, dense within a run.
    pub index: u32,
    /// Absolute URL of the chapter page.
    pub url: Url,
}

impl ChapterRef {
    /// Creates a new [`ChapterRef`].
    pub fn new(index: u32, url: Url) -> Self {
        Self { index, url }
    }

    /// Zero-padded index used in file names and the error log.
    pub fn label(&self) -> String {
        format!("{:04}", self.index)
    }
}

impl fmt::Display for ChapterRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.label(), self.url)
    }
}

/// Title and body text extracted from a chapter page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChapterContent {
    pub title: String,
    /// Paragraphs separated by a blank line.
    pub body: String,
}

impl ChapterContent {
    /// Creates a new [`ChapterContent`].
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    /// True when no body text was recognised on the page.
    pub fn is_empty(&self) -> bool {
        self.body.trim().is_empty()
    }

    /// File contents: the title, a blank line, then the body.
    pub fn to_text(&self) -> String {
        format!("{}\n\n{}\n", self.title, self.body)
    }
}
