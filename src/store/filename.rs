//! Chapter file naming.

/// Longest sanitized title kept in a file name, in UTF-8 bytes.
///
/// With the index, separator and extension the name stays below the
/// 255 byte limit of common filesystems.
pub const MAX_TITLE_BYTES: usize = 200;

/// Extension of chapter files.
pub const EXTENSION: &str = "txt";

/// Separator between the zero-padded index and the title.
const SEPARATOR: &str = " - ";

/// File name for a chapter: `NNNN - <sanitized title>.txt`.
pub fn file_name(index: u32, title: &str) -> String {
    format!("{index:04}{SEPARATOR}{}.{EXTENSION}", sanitize_title(title))
}

/// Makes a title safe to use in a file name.
///
/// Keeps letters, digits, spaces, `.` and `-`; drops everything else,
/// collapses whitespace and caps the length. Never returns an empty string.
pub fn sanitize_title(title: &str) -> String {
    let kept: String = title
        .chars()
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '.' | '-'))
        .collect();

    let collapsed = kept.split_whitespace().collect::<Vec<_>>().join(" ");
    let capped = truncate_bytes(&collapsed, MAX_TITLE_BYTES);
    let trimmed = capped.trim_end_matches([' ', '.']).trim_start();

    if trimmed.is_empty() {
        crate::extract::PLACEHOLDER_TITLE.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Longest prefix of `text` within `max` bytes, cut on a char boundary.
fn truncate_bytes(text: &str, max: usize) -> &str {
    let end = text
        .char_indices()
        .map(|(i, c)| i + c.len_utf8())
        .take_while(|&end| end <= max)
        .last()
        .unwrap_or(0);
    &text[..end]
}

/// Index encoded at the start of a chapter file name, if it is one.
pub fn parse_index(file_name: &str) -> Option<u32> {
    let stem = file_name.strip_suffix(EXTENSION)?.strip_suffix('.')?;
    let (index, _) = stem.split_once(SEPARATOR)?;
    if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    index.parse().ok()
}
