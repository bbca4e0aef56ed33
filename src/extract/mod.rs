//! Chapter content extraction.
//!
//! Sites disagree on where chapter text lives, so the body is found by trying
//! an ordered list of [`BodyRule`]s. The most specific containers come first
//! because broad ones (`article`, `main`) tend to include navigation and ads.
//! The last rule gathers every paragraph on the page.
//!
//! Extraction never fails: a page without a heading gets the
//! [`PLACEHOLDER_TITLE`], and a page without any recognisable text gets an
//! empty body.
//!
//! # Examples
//!
//! ```rust
//! use novella::extract::ContentExtractor;
//!
//! let html = r#"<h2>Chapter 1</h2><div class="chapter-content"><p>It began.</p></div>"#;
//! let content = ContentExtractor::default().extract(html);
//! assert_eq!(content.title, "Chapter 1");
//! assert_eq!(content.body, "It began.");
//! ```
//!
//! Custom container selectors replace the defaults but keep the paragraph
//! fallback:
//!
//! ```rust
//! use novella::extract::ContentExtractor;
//!
//! # fn example() -> novella::Result<()> {
//! let extractor = ContentExtractor::with_containers(["#chapter-text", ".read-content"])?;
//! # Ok(())
//! # }
//! ```

pub mod text;

use crate::chapter::ChapterContent;
use crate::error::{Error, Result};

use scraper::{Html, Selector};
use text::{block_text, inline_text};

/// Title used when a page has no usable heading.
pub const PLACEHOLDER_TITLE: &str = "Chapter";

/// Content containers, most specific first.
pub const DEFAULT_CONTAINERS: &[&str] = &[
    ".chapter-content",
    ".entry-content",
    ".novel-body",
    ".content",
    "article",
    "main",
    "div#content",
    "div.chapter",
    "div.chapter-body",
    "div[itemprop='articleBody']",
];

/// One way of locating the chapter body.
#[derive(Debug, Clone)]
pub enum BodyRule {
    /// The first element matching the selector that has any text.
    Container(Selector),
    /// Every non-empty `<p>` on the page.
    Paragraphs,
}

impl BodyRule {
    /// Parses a container rule.
    pub fn container(selector: &str) -> Result<Self> {
        Selector::parse(selector)
            .map(BodyRule::Container)
            .map_err(|e| Error::InvalidSelector(format!("{selector}: {e}")))
    }

    /// Applies the rule, returning `None` when it finds no text.
    pub fn apply(&self, document: &Html) -> Option<String> {
        let text = match self {
            BodyRule::Container(selector) => document
                .select(selector)
                .map(block_text)
                .find(|text| !text.is_empty())?,
            BodyRule::Paragraphs => {
                let paragraphs = Selector::parse("p").expect("valid selector");
                document
                    .select(&paragraphs)
                    .map(block_text)
                    .filter(|text| !text.is_empty())
                    .collect::<Vec<_>>()
                    .join("\n\n")
            }
        };
        (!text.is_empty()).then_some(text)
    }
}

/// Extracts a [`ChapterContent`] from chapter pages.
#[derive(Debug, Clone)]
pub struct ContentExtractor {
    headings: Selector,
    rules: Vec<BodyRule>,
}

impl Default for ContentExtractor {
    fn default() -> Self {
        let mut rules: Vec<BodyRule> = DEFAULT_CONTAINERS
            .iter()
            .map(|s| BodyRule::Container(Selector::parse(s).expect("valid selector")))
            .collect();
        rules.push(BodyRule::Paragraphs);
        Self::from_rules(rules)
    }
}

impl ContentExtractor {
    /// Creates an extractor trying `rules` in order.
    pub fn from_rules(rules: Vec<BodyRule>) -> Self {
        Self {
            headings: Selector::parse("h1, h2").expect("valid selector"),
            rules,
        }
    }

    /// Creates an extractor from container selectors, followed by the
    /// paragraph fallback.
    pub fn with_containers<'a, I>(selectors: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut rules = selectors
            .into_iter()
            .map(BodyRule::container)
            .collect::<Result<Vec<_>>>()?;
        rules.push(BodyRule::Paragraphs);
        Ok(Self::from_rules(rules))
    }

    /// Gets the body rules in priority order.
    pub fn rules(&self) -> &[BodyRule] {
        &self.rules
    }

    /// Extracts the title and body of a chapter page.
    pub fn extract(&self, html: &str) -> ChapterContent {
        let document = Html::parse_document(html);

        let title = document
            .select(&self.headings)
            .next()
            .map(inline_text)
            .filter(|title| !title.is_empty())
            .unwrap_or_else(|| PLACEHOLDER_TITLE.to_string());

        let body = self
            .rules
            .iter()
            .find_map(|rule| rule.apply(&document))
            .unwrap_or_default();

        ChapterContent { title, body }
    }
}
