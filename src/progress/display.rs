//! Progress bar for a chapter run.
//!
//! ```rust
//! use novella::progress::{ProgressBarOpts, ProgressDisplay};
//!
//! let display = ProgressDisplay::new(ProgressBarOpts::hidden(), 3);
//! display.advance("Chapter 1");
//! display.finish();
//! ```

use crate::progress::ProgressBarOpts;
use indicatif::ProgressBar;

/// One bar counting finished chapters.
pub struct ProgressDisplay {
    bar: ProgressBar,
    clear: bool,
}

impl ProgressDisplay {
    /// Create a bar for `total_chapters` chapters.
    pub fn new(opts: ProgressBarOpts, total_chapters: usize) -> Self {
        let clear = opts.clear;
        let bar = opts.to_progress_bar(total_chapters as u64);
        bar.tick();
        Self { bar, clear }
    }

    /// Count one finished chapter and show its label.
    pub fn advance(&self, label: &str) {
        self.bar.set_message(label.to_string());
        self.bar.inc(1);
    }

    /// Number of chapters counted so far.
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Whether nothing is drawn.
    pub fn is_hidden(&self) -> bool {
        self.bar.is_hidden()
    }

    /// Finish the bar, clearing it or leaving it based on configuration.
    pub fn finish(self) {
        if self.clear {
            self.bar.finish_and_clear();
        } else {
            self.bar.finish();
        }
    }
}
