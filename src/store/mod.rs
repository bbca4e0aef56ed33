//! Chapter storage on the local filesystem.
//!
//! Each chapter lives in its own `NNNN - <title>.txt` file inside the output
//! directory, so chapters can complete in any order. The store remembers which
//! indices were already on disk when it was opened; saving one of those is a
//! no-op, which makes re-running a download resume where it stopped.
//!
//! Failed chapters are appended to `errors.log` in the same directory, one
//! line per failure:
//!
//! ```text
//! 0003 https://example.com/novel/chapter-3 ERROR: not found: https://example.com/novel/chapter-3
//! ```
//!
//! # Examples
//!
//! ```rust,no_run
//! use novella::chapter::ChapterContent;
//! use novella::store::{ChapterStore, SaveOutcome};
//!
//! # async fn example() -> std::io::Result<()> {
//! let store = ChapterStore::open("chapters").await?;
//! match store.save(1, &ChapterContent::new("Chapter 1", "It began.")).await? {
//!     SaveOutcome::Saved(path) => println!("wrote {}", path.display()),
//!     SaveOutcome::Skipped(path) => println!("kept {}", path.display()),
//! }
//! # Ok(())
//! # }
//! ```

pub mod filename;

pub use filename::{file_name, parse_index, sanitize_title};

use crate::chapter::ChapterContent;

use reqwest::Url;
use std::collections::HashMap;
use std::fmt::Display;
use std::io;
use std::path::{Path, PathBuf};
use tokio::{fs, fs::OpenOptions, io::AsyncWriteExt, sync::Mutex};
use tracing::debug;

/// Name of the failure log inside the output directory.
pub const ERROR_LOG: &str = "errors.log";

/// Result of [`ChapterStore::save`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The chapter was written to this path.
    Saved(PathBuf),
    /// A file for this chapter already existed at this path.
    Skipped(PathBuf),
}

/// Output directory holding chapter files and the error log.
#[derive(Debug)]
pub struct ChapterStore {
    directory: PathBuf,
    /// Chapter files present when the store was opened, by index.
    completed: HashMap<u32, PathBuf>,
    /// Serializes appends to the error log.
    error_log: Mutex<()>,
}

impl ChapterStore {
    /// Creates the directory if needed and indexes the chapters it holds.
    pub async fn open(directory: impl Into<PathBuf>) -> io::Result<Self> {
        let directory = directory.into();
        debug!("Creating output directory {:?}", directory);
        fs::create_dir_all(&directory).await?;

        let mut completed = HashMap::new();
        let mut entries = fs::read_dir(&directory).await?;
        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            let name = entry.file_name();
            if let Some(index) = name.to_str().and_then(parse_index) {
                completed.entry(index).or_insert_with(|| entry.path());
            }
        }
        debug!(chapters = completed.len(), "Indexed existing chapters");

        Ok(Self {
            directory,
            completed,
            error_log: Mutex::new(()),
        })
    }

    /// Gets the output directory.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Path of the error log.
    pub fn error_log_path(&self) -> PathBuf {
        self.directory.join(ERROR_LOG)
    }

    /// File of a chapter that was on disk when the store was opened.
    pub fn existing(&self, index: u32) -> Option<&Path> {
        self.completed.get(&index).map(PathBuf::as_path)
    }

    /// Number of chapters on disk when the store was opened.
    pub fn completed(&self) -> usize {
        self.completed.len()
    }

    /// Where a chapter with this index and title is stored.
    pub fn path_for(&self, index: u32, title: &str) -> PathBuf {
        self.directory.join(file_name(index, title))
    }

    /// Writes a chapter unless one with the same index already exists.
    ///
    /// The file holds the title, a blank line, then the body. A file that
    /// could not be fully written is removed again.
    pub async fn save(&self, index: u32, content: &ChapterContent) -> io::Result<SaveOutcome> {
        if let Some(existing) = self.existing(index) {
            return Ok(SaveOutcome::Skipped(existing.to_path_buf()));
        }

        let path = self.path_for(index, &content.title);
        let mut file = match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
        {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                return Ok(SaveOutcome::Skipped(path));
            }
            Err(e) => return Err(e),
        };

        if let Err(e) = write_chapter(&mut file, content).await {
            drop(file);
            let _ = fs::remove_file(&path).await;
            return Err(e);
        }

        Ok(SaveOutcome::Saved(path))
    }

    /// Appends `<index> <url> ERROR: <message>` to the error log.
    pub async fn log_error(&self, index: u32, url: &Url, message: impl Display) -> io::Result<()> {
        let message = message.to_string().replace(['\r', '\n'], " ");
        let line = format!("{index:04} {url} ERROR: {message}\n");

        let _guard = self.error_log.lock().await;
        let mut log = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.error_log_path())
            .await?;
        log.write_all(line.as_bytes()).await?;
        log.flush().await
    }
}

async fn write_chapter(file: &mut fs::File, content: &ChapterContent) -> io::Result<()> {
    file.write_all(content.to_text().as_bytes()).await?;
    file.flush().await
}
