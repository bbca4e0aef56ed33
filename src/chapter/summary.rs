//! Per-chapter outcomes and the run summary.
//!
//! Every scheduled chapter produces exactly one [`Summary`]. The
//! [`RunSummary`] collects them in reading order once the run is over.
//!
//! # Examples
//!
//! ```rust
//! use novella::chapter::{ChapterRef, RunSummary, Status, Summary};
//! use reqwest::Url;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let chapter = ChapterRef::new(1, Url::parse("https://example.com/chapter-1")?);
//! let summary = Summary::new(chapter).fail("HTTP 500");
//!
//! match summary.status() {
//!     Status::Saved => println!("saved"),
//!     Status::Skipped(reason) => println!("skipped: {}", reason),
//!     Status::Failed(reason) => println!("failed: {}", reason),
//! }
//!
//! let run = RunSummary::new(vec![summary]);
//! assert_eq!(run.failed(), 1);
//! # Ok(())
//! # }
//! ```

use super::ChapterRef;
use std::path::{Path, PathBuf};

/// Chapter outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// The chapter was written to the output directory.
    Saved,
    /// The chapter was already present, with the reason.
    Skipped(String),
    /// The chapter could not be downloaded, with the reason.
    Failed(String),
}

/// Represents a [`ChapterRef`] summary.
#[derive(Debug, Clone)]
pub struct Summary {
    /// Chapter the summary is about.
    chapter: ChapterRef,
    /// Outcome.
    status: Status,
    /// Path of the chapter file, when one exists.
    path: Option<PathBuf>,
    /// Extracted title, when the page was fetched.
    title: Option<String>,
}

impl Summary {
    /// Create a new [`Summary`], marked as saved until told otherwise.
    pub fn new(chapter: ChapterRef) -> Self {
        Self {
            chapter,
            status: Status::Saved,
            path: None,
            title: None,
        }
    }

    /// Attach the chapter file path.
    pub fn with_path(self, path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            ..self
        }
    }

    /// Attach the extracted title.
    pub fn with_title(self, title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..self
        }
    }

    /// Mark the summary as failed with a message.
    pub fn fail(self, msg: impl std::fmt::Display) -> Self {
        Self {
            status: Status::Failed(msg.to_string()),
            ..self
        }
    }

    /// Mark the summary as skipped with a message.
    pub fn skip(self, msg: impl std::fmt::Display) -> Self {
        Self {
            status: Status::Skipped(msg.to_string()),
            ..self
        }
    }

    /// Get a reference to the summary's chapter.
    pub fn chapter(&self) -> &ChapterRef {
        &self.chapter
    }

    /// Get a reference to the summary's status.
    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Get the chapter file path, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Get the extracted title, if any.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }
}

/// Outcome of a whole run, in reading order.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    chapters: Vec<Summary>,
}

impl RunSummary {
    /// Collects chapter summaries, sorting them by index.
    pub fn new(mut chapters: Vec<Summary>) -> Self {
        chapters.sort_by_key(|s| s.chapter.index);
        Self { chapters }
    }

    /// Per-chapter summaries sorted by index.
    pub fn chapters(&self) -> &[Summary] {
        &self.chapters
    }

    /// Number of scheduled chapters.
    pub fn total(&self) -> usize {
        self.chapters.len()
    }

    pub fn saved(&self) -> usize {
        self.count(|s| matches!(s, Status::Saved))
    }

    pub fn skipped(&self) -> usize {
        self.count(|s| matches!(s, Status::Skipped(_)))
    }

    pub fn failed(&self) -> usize {
        self.count(|s| matches!(s, Status::Failed(_)))
    }

    /// Summaries of the chapters that failed.
    pub fn failures(&self) -> impl Iterator<Item = &Summary> {
        self.chapters
            .iter()
            .filter(|s| matches!(s.status, Status::Failed(_)))
    }

    fn count(&self, pred: impl Fn(&Status) -> bool) -> usize {
        self.chapters.iter().filter(|s| pred(&s.status)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Url;

    fn create_test_chapter(index: u32) -> ChapterRef {
        let url = Url::parse(&format!("http://example.com/chapter-{index}")).unwrap();
        ChapterRef::new(index, url)
    }

    #[test]
    fn test_status_equality() {
        assert_eq!(Status::Saved, Status::Saved);
        assert_eq!(
            Status::Failed("error".to_string()),
            Status::Failed("error".to_string())
        );
        assert_ne!(
            Status::Skipped("reason".to_string()),
            Status::Failed("reason".to_string())
        );
    }

    #[test]
    fn test_summary_creation() {
        let summary = Summary::new(create_test_chapter(3));

        assert_eq!(summary.chapter().index, 3);
        assert_eq!(summary.status(), &Status::Saved);
        assert!(summary.path().is_none());
        assert!(summary.title().is_none());
    }

    #[test]
    fn test_summary_fail() {
        let summary = Summary::new(create_test_chapter(1)).fail("Network error");

        match summary.status() {
            Status::Failed(msg) => assert_eq!(msg, "Network error"),
            _ => panic!("Expected Failed status"),
        }
    }

    #[test]
    fn test_summary_skip_keeps_path() {
        let summary = Summary::new(create_test_chapter(1))
            .with_path("chapters/0001 - One.txt")
            .skip("already downloaded");

        assert_eq!(
            summary.status(),
            &Status::Skipped("already downloaded".to_string())
        );
        assert_eq!(summary.path(), Some(Path::new("chapters/0001 - One.txt")));
    }

    #[test]
    fn test_run_summary_counts_and_order() {
        let run = RunSummary::new(vec![
            Summary::new(create_test_chapter(3)).fail("boom"),
            Summary::new(create_test_chapter(1)),
            Summary::new(create_test_chapter(2)).skip("exists"),
        ]);

        let order: Vec<u32> = run.chapters().iter().map(|s| s.chapter().index).collect();
        assert_eq!(order, vec![1, 2, 3]);
        assert_eq!(run.total(), 3);
        assert_eq!(run.saved(), 1);
        assert_eq!(run.skipped(), 1);
        assert_eq!(run.failed(), 1);
        assert_eq!(run.failures().next().unwrap().chapter().index, 3);
    }

    #[test]
    fn test_empty_run_summary() {
        let run = RunSummary::default();
        assert_eq!(run.total(), 0);
        assert_eq!(run.saved() + run.skipped() + run.failed(), 0);
    }
}
