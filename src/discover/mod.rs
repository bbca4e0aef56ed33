//! Chapter link discovery.
//!
//! [`LinkDiscoverer`] scans an index page for links that look like chapters,
//! either because their path carries a chapter number (`/chapter-12`,
//! `/chapter_12`, `/chapter/12`, `/chapter12`) or because their text is a
//! "start reading" style call to action. The result is deduplicated, sorted
//! by chapter number and numbered from 1.
//!
//! When an index page yields nothing, [`fallback_chapters`] synthesizes
//! `<base>/chapter-{n}` URLs instead.
//!
//! # Examples
//!
//! ```rust
//! use novella::discover::LinkDiscoverer;
//! use reqwest::Url;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let html = r#"<a href="/n/chapter-2">Two</a><a href="/n/chapter-1">One</a>"#;
//! let base = Url::parse("https://example.com/n")?;
//!
//! let chapters = LinkDiscoverer::default().discover(html, &base);
//! assert_eq!(chapters[0].url.as_str(), "https://example.com/n/chapter-1");
//! assert_eq!(chapters[1].index, 2);
//! # Ok(())
//! # }
//! ```

pub mod pattern;

pub use pattern::{fallback_chapters, UrlTemplate};

use crate::chapter::ChapterRef;

use regex::Regex;
use reqwest::Url;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use tracing::debug;

/// Link texts that point at the first chapter.
pub const START_READING_PHRASES: &[&str] = &["start reading", "read first chapter"];

/// Finds chapter links on an index page.
#[derive(Debug, Clone)]
pub struct LinkDiscoverer {
    anchors: Selector,
    chapter_number: Regex,
    start_phrases: Vec<String>,
}

impl Default for LinkDiscoverer {
    fn default() -> Self {
        Self {
            anchors: Selector::parse("a[href]").expect("valid selector"),
            chapter_number: Regex::new(r"(?i)chapter[-_/]?(\d+)").expect("valid regex"),
            start_phrases: START_READING_PHRASES.iter().map(|p| p.to_string()).collect(),
        }
    }
}

impl LinkDiscoverer {
    /// Creates a discoverer with the default heuristics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a case-insensitive link text that marks a chapter link.
    pub fn start_phrase(mut self, phrase: &str) -> Self {
        self.start_phrases.push(phrase.to_lowercase());
        self
    }

    /// Returns the ordered chapter list found on `index_html`.
    ///
    /// Relative links are resolved against `base`. The same input always
    /// yields the same list. Links without a chapter number come after every
    /// numbered link, in the order they appear on the page.
    pub fn discover(&self, index_html: &str, base: &Url) -> Vec<ChapterRef> {
        let candidates = self.candidate_links(index_html, base);
        let found = candidates.len();

        let mut seen = HashSet::new();
        let mut unique: Vec<Url> = candidates
            .into_iter()
            .filter(|url| seen.insert(url.clone()))
            .collect();

        unique.sort_by_key(|url| match self.chapter_number(url) {
            Some(n) => (0, n),
            None => (1, 0),
        });

        debug!(found, unique = unique.len(), "Discovered chapter links");

        unique
            .into_iter()
            .enumerate()
            .map(|(i, url)| ChapterRef::new((i + 1) as u32, url))
            .collect()
    }

    /// Chapter number carried by the URL path, if any.
    ///
    /// The last match wins so that `/chapter-book-2/chapter-15` yields 15.
    /// A number too large for `u64` counts as no number.
    pub fn chapter_number(&self, url: &Url) -> Option<u64> {
        self.chapter_number
            .captures_iter(url.path())
            .last()
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok())
    }

    fn candidate_links(&self, index_html: &str, base: &Url) -> Vec<Url> {
        let document = Html::parse_document(index_html);

        document
            .select(&self.anchors)
            .filter_map(|anchor| {
                let href = anchor.value().attr("href")?;
                let url = resolve(base, href)?;
                let is_chapter =
                    self.chapter_number.is_match(url.path()) || self.is_start_link(&anchor);
                is_chapter.then_some(url)
            })
            .collect()
    }

    fn is_start_link(&self, anchor: &ElementRef) -> bool {
        let text = anchor
            .text()
            .flat_map(str::split_whitespace)
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();
        self.start_phrases.iter().any(|p| text.contains(p.as_str()))
    }
}

/// Resolves `href` against `base`, keeping only web links.
fn resolve(base: &Url, href: &str) -> Option<Url> {
    let mut url = base.join(href.trim()).ok()?;
    if !matches!(url.scheme(), "http" | "https") {
        return None;
    }
    url.set_fragment(None);
    Some(url)
}
