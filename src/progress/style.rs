//! Progress bar styling options.
//!
//! # Examples
//!
//! ```rust
//! use novella::progress::ProgressBarOpts;
//!
//! // Default chapter counter.
//! let opts = ProgressBarOpts::default();
//!
//! // Custom template and characters.
//! let custom = ProgressBarOpts::new(
//!     Some("[{bar:40.cyan/blue}] {pos}/{len} {msg}".to_string()),
//!     Some(ProgressBarOpts::CHARS_FINE.to_string()),
//!     true,
//!     false,
//! );
//!
//! // No progress bar at all.
//! let hidden = ProgressBarOpts::hidden();
//! ```

use indicatif::{ProgressBar, ProgressStyle};

/// Define the options for a progress bar.
#[derive(Debug, Clone)]
pub struct ProgressBarOpts {
    /// Progress bar template string.
    template: Option<String>,
    /// Progression characters set.
    ///
    /// There must be at least 3 characters for the following states:
    /// "filled", "current", and "to do".
    progress_chars: Option<String>,
    /// Enable or disable the progress bar.
    pub(crate) enabled: bool,
    /// Clear the progress bar once completed.
    pub(crate) clear: bool,
}

impl Default for ProgressBarOpts {
    fn default() -> Self {
        Self {
            template: Some(ProgressBarOpts::TEMPLATE_CHAPTERS.into()),
            progress_chars: Some(ProgressBarOpts::CHARS_FINE.into()),
            enabled: true,
            clear: false,
        }
    }
}

impl ProgressBarOpts {
    /// Chapter counter with the title of the last finished chapter.
    ///
    /// `███████████████████░░░ 11/12 (91%) eta 00:00:02 Chapter 11`
    pub const TEMPLATE_CHAPTERS: &'static str =
        "{bar:40.blue} {pos:>}/{len} ({percent}%) eta {eta_precise:.blue} {wide_msg}";
    /// Use fine blocks as progress characters: `"█▉▊▋▌▍▎▏  "`.
    pub const CHARS_FINE: &'static str = "█▉▊▋▌▍▎▏  ";

    /// Create a new [`ProgressBarOpts`].
    pub fn new(
        template: Option<String>,
        progress_chars: Option<String>,
        enabled: bool,
        clear: bool,
    ) -> Self {
        Self {
            template,
            progress_chars,
            enabled,
            clear,
        }
    }

    /// Create a [`ProgressStyle`] based on the provided options.
    ///
    /// An invalid template falls back to the default bar.
    pub fn to_progress_style(self) -> ProgressStyle {
        let mut style = ProgressStyle::default_bar();
        if let Some(template) = self.template {
            match ProgressStyle::default_bar().template(&template) {
                Ok(templated) => style = templated,
                Err(e) => tracing::warn!("ignoring progress template {:?}: {}", template, e),
            }
        }
        if let Some(progress_chars) = self.progress_chars {
            style = style.progress_chars(&progress_chars);
        }
        style
    }

    /// Create a [`ProgressBar`] based on the provided options.
    pub fn to_progress_bar(self, len: u64) -> ProgressBar {
        // Return a hidden Progress bar if we disabled it.
        if !self.enabled {
            return ProgressBar::hidden();
        }

        let style = self.to_progress_style();
        ProgressBar::new(len).with_style(style)
    }

    /// Set to `true` to clear the progress bar upon completion.
    pub fn set_clear(&mut self, clear: bool) {
        self.clear = clear;
    }

    /// Whether the bar is drawn at all.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Create a new [`ProgressBarOpts`] which hides the progress bar.
    pub fn hidden() -> Self {
        Self {
            enabled: false,
            ..ProgressBarOpts::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_bar_is_hidden() {
        let opts = ProgressBarOpts::hidden();
        assert!(!opts.is_enabled());
        assert!(opts.to_progress_bar(3).is_hidden());
    }

    #[test]
    fn test_invalid_template_falls_back() {
        let opts = ProgressBarOpts::new(Some("{bar:40.nope".to_string()), None, true, true);
        let bar = ProgressBar::hidden().with_style(opts.to_progress_style());
        bar.inc(1);
        assert_eq!(bar.position(), 1);
    }

    #[test]
    fn test_set_clear() {
        let mut opts = ProgressBarOpts::default();
        assert!(!opts.clear);
        opts.set_clear(true);
        assert!(opts.clear);
    }
}
