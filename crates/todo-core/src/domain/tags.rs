//! Tag text conversion at the editor boundary.

/// Split comma-separated tag text into labels.
///
/// Each piece is trimmed and empty pieces are dropped. Order is kept and
/// duplicates are not removed.
pub fn parse_tags(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Inverse of [`parse_tags`] for pre-filling the editor.
pub fn format_tags(tags: &[String]) -> String {
    tags.join(", ")
}
