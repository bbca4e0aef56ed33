//! Synthesized chapter URLs for index pages without usable links.

use crate::chapter::ChapterRef;

use regex::Regex;
use reqwest::Url;
use std::fmt;
use tracing::debug;

/// A chapter URL with a numeric placeholder, displayed as `<prefix>{n}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlTemplate {
    prefix: String,
}

impl UrlTemplate {
    /// Guesses a template from a known chapter link.
    ///
    /// A link ending in `chapter-<number>` (any of `-`, `_`, `/` or no
    /// separator) keeps everything before the number. Anything else falls back
    /// to `<base>/chapter-{n}`.
    pub fn guess(start_link: &str, base: &Url) -> Self {
        let tail = Regex::new(r"(?i)^(.*/chapter[-_/]?)(\d+)(/?)$").expect("valid regex");

        let prefix = match tail.captures(start_link).and_then(|caps| caps.get(1)) {
            Some(m) => base
                .join(m.as_str())
                .map(String::from)
                .unwrap_or_else(|_| m.as_str().to_string()),
            None => format!("{}/chapter-", root(base)),
        };

        Self { prefix }
    }

    /// The URL for chapter `n`.
    pub fn expand(&self, n: u32) -> Option<Url> {
        Url::parse(&format!("{}{}", self.prefix, n)).ok()
    }
}

impl fmt::Display for UrlTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{{n}}", self.prefix)
    }
}

/// Generates `count` chapters from `<base>/chapter-1` onwards.
pub fn fallback_chapters(base: &Url, count: usize) -> Vec<ChapterRef> {
    let start_link = format!("{}/chapter-1", root(base));
    let template = UrlTemplate::guess(&start_link, base);
    debug!(%template, count, "Using synthesized chapter pattern");

    (1..=chapter_count(count))
        .filter_map(|n| template.expand(n))
        .enumerate()
        .map(|(i, url)| ChapterRef::new((i + 1) as u32, url))
        .collect()
}

/// `count` as a chapter index bound, saturating at `u32::MAX`.
fn chapter_count(count: usize) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX)
}

/// The base URL without query, fragment or trailing slash.
fn root(base: &Url) -> String {
    let mut root = base.clone();
    root.set_query(None);
    root.set_fragment(None);
    root.as_str().trim_end_matches('/').to_string()
}
