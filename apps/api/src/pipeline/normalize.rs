use std::sync::LazyLock;

use regex::Regex;

static RE_TAGS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());
static RE_NUMERIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]+").unwrap());

/// Normalizes raw extracted text for vectorization.
///
/// In order: strip tag-like `<...>` spans, strip digit runs, then split on
/// whitespace and rejoin with single spaces. Case and punctuation are
/// preserved; the vectorizer handles casing itself. Always returns a string,
/// possibly empty if the input was entirely markup/numeric.
pub fn normalize(raw: &str) -> String {
    let without_tags = RE_TAGS.replace_all(raw, "");
    let without_numbers = RE_NUMERIC.replace_all(&without_tags, "");
    without_numbers
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
