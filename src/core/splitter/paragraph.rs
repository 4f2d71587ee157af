//! Paragraph-level splitting, the first stage for oversized content.

use once_cell::sync::Lazy;
use regex::Regex;

use super::packing::pack;
use super::sentence::split_sentences;

/// A blank line: newline, optional whitespace, newline
static BLANK_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").unwrap());

/// Separator used when paragraphs share a chunk
pub const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// Split `text` on blank lines and pack paragraphs into pieces.
///
/// Paragraphs sharing a piece are joined by a blank line and the
/// separator counts toward `max_chunk_size`. A paragraph longer
/// than the bound on its own is handed to the sentence splitter.
pub fn split_paragraphs(text: &str, max_chunk_size: usize, overlap: usize) -> Vec<String> {
    pack(
        BLANK_LINE.split(text),
        max_chunk_size,
        PARAGRAPH_SEPARATOR,
        |paragraph| {
            tracing::debug!(
                "Paragraph of {} chars exceeds {}, splitting by sentence",
                paragraph.chars().count(),
                max_chunk_size
            );
            split_sentences(paragraph, max_chunk_size, overlap)
        },
    )
}
