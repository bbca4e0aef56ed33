//! Plain-text rendering of HTML elements.

use scraper::{ElementRef, Node};

/// Tags that start a new paragraph.
const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt", "figcaption",
    "figure", "footer", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "main", "nav",
    "ol", "p", "pre", "section", "table", "td", "th", "tr", "ul",
];

/// Tags whose content is never text.
const SKIPPED_TAGS: &[&str] = &["script", "style", "noscript", "template"];

/// Text of `element` with one paragraph per block, separated by a blank line.
pub fn block_text(element: ElementRef) -> String {
    let mut paragraphs = Vec::new();
    let mut pending = String::new();

    walk(element, &mut paragraphs, &mut pending);
    flush(&mut pending, &mut paragraphs);

    paragraphs.join("\n\n")
}

/// Text of `element` on a single line.
pub fn inline_text(element: ElementRef) -> String {
    collapse_whitespace(&element.text().collect::<String>())
}

/// Collapses every whitespace run, non-breaking spaces included, to one space.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn walk(element: ElementRef, paragraphs: &mut Vec<String>, pending: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => pending.push_str(text),
            Node::Element(el) => {
                let name = el.name();
                if SKIPPED_TAGS.contains(&name) {
                    continue;
                }
                let Some(child) = ElementRef::wrap(child) else {
                    continue;
                };
                if BLOCK_TAGS.contains(&name) {
                    flush(pending, paragraphs);
                    walk(child, paragraphs, pending);
                    flush(pending, paragraphs);
                } else {
                    walk(child, paragraphs, pending);
                }
            }
            _ => {}
        }
    }
}

fn flush(pending: &mut String, paragraphs: &mut Vec<String>) {
    let line = collapse_whitespace(pending);
    if !line.is_empty() {
        paragraphs.push(line);
    }
    pending.clear();
}
