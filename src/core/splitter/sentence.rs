//! Sentence-level splitting for paragraphs that exceed the bound.

use once_cell::sync::Lazy;
use regex::Regex;

use super::packing::pack;
use super::window::hard_split;

/// CJK and Latin terminators, each with any trailing whitespace
static SENTENCE_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"[。！？.!?]\s*").unwrap());

/// Split `text` on sentence terminators and pack the sentences.
///
/// Terminators are discarded and sentences are concatenated
/// directly, so no separator counts toward the budget. A sentence
/// longer than `max_chunk_size` on its own goes to the hard splitter.
pub fn split_sentences(text: &str, max_chunk_size: usize, overlap: usize) -> Vec<String> {
    pack(SENTENCE_END.split(text), max_chunk_size, "", |sentence| {
        tracing::debug!(
            "Sentence of {} chars exceeds {}, using hard split",
            sentence.chars().count(),
            max_chunk_size
        );
        hard_split(sentence, max_chunk_size, overlap)
    })
}
