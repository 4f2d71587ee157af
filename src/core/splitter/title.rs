//! Best-effort title detection for layout elements.
//!
//! Advisory only: a missing title never prevents a chunk from
//! being emitted.

use once_cell::sync::Lazy;
use regex::Regex;

/// Texts at or above this many characters are never heading-like
pub const MAX_HEADING_CHARS: usize = 100;

/// Layout types that are titles by definition
const TITLE_LAYOUT_TYPES: [&str; 2] = ["title", "para_title"];

/// Heading-like line patterns, tested in order
static HEADING_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // 1. Overview
        r"^\d+\.\s*\S+",
        // 第3章 总则
        r"^第\d+章\s*\S+",
        // 第2节 范围
        r"^第\d+节\s*\S+",
        // 一、概述
        r"^[一二三四五六七八九十]+、\S+",
        // Label: value
        r"^\w+\s*:\s*\S+",
        // ## Heading
        r"^#+\s*\S+",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).unwrap())
    .collect()
});

/// Extract a title for a layout element.
///
/// Elements typed `title`/`para_title`, or whose subtype mentions
/// "title", are titles regardless of length. Otherwise a short text
/// (under [`MAX_HEADING_CHARS`]) matching a heading-like pattern is
/// its own title. Anything else yields an empty string.
///
/// # Example
///
/// ```
/// use semsplit::core::splitter::title::extract_title;
///
/// assert_eq!(extract_title("text", "", "1. Overview"), "1. Overview");
/// assert_eq!(extract_title("text", "", "plain sentence"), "");
/// ```
pub fn extract_title(layout_type: &str, subtype: &str, text: &str) -> String {
    let text = text.trim();

    if TITLE_LAYOUT_TYPES.contains(&layout_type) || subtype.to_lowercase().contains("title") {
        return text.to_string();
    }

    if text.is_empty() || text.chars().count() >= MAX_HEADING_CHARS {
        return String::new();
    }

    HEADING_PATTERNS
        .iter()
        .find(|pattern| pattern.is_match(text))
        .map(|_| text.to_string())
        .unwrap_or_default()
}
