//! Semantic splitting of parsed documents into bounded chunks.
//!
//! Turns layout-parse output, markdown or plain text into chunks
//! of at most `max_chunk_size` characters, keeping semantic
//! boundaries wherever possible. Oversized units fall through a
//! fixed chain, each stage used only when the previous one still
//! leaves a unit too large:
//!
//! 1. [`paragraph`]: blank-line boundaries, greedy packing
//! 2. [`sentence`]: sentence terminators, greedy packing
//! 3. [`window`]: fixed windows with overlap
//!
//! Layout elements ([`layout`]) and markdown sections
//! ([`markdown`]) both enter this chain through
//! [`SemanticSplitter::refine`]. [`assemble`] turns the final
//! chunks into documents.
//!
//! Everything here is synchronous and pure: no I/O, no shared
//! state between calls. All lengths are in characters.
//!
//! # Example
//!
//! ```
//! use semsplit::core::splitter::SemanticSplitter;
//!
//! let splitter = SemanticSplitter::new(1000, 100).unwrap();
//! let chunks = splitter.split_markdown("# A\ncontent1\n## B\ncontent2");
//!
//! assert_eq!(chunks.len(), 2);
//! assert_eq!(chunks[0].title, "A");
//! assert_eq!(chunks[1].subtype, "level_2");
//! ```

pub mod assemble;
pub mod layout;
pub mod markdown;
mod packing;
pub mod paragraph;
pub mod sentence;
pub mod title;
pub mod window;

use serde::Deserialize;

use crate::core::error::{Result, SemsplitError};
use crate::core::types::{
    Chunk, Diagnostic, Document, LayoutElement, Metadata, ParseResult, SplitInput, SplitOutput,
};

/// Default maximum chunk size in characters
pub const DEFAULT_MAX_CHUNK_SIZE: usize = 1000;

/// Default hard-split overlap in characters
pub const DEFAULT_OVERLAP: usize = 100;

/// Base id for chunks cut from raw text
const TEXT_CHUNK_ID: &str = "text_chunk";

pub(crate) fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Splits documents into chunks bounded by `max_chunk_size` characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SemanticSplitter {
    max_chunk_size: usize,
    overlap: usize,
}

impl Default for SemanticSplitter {
    fn default() -> Self {
        Self {
            max_chunk_size: DEFAULT_MAX_CHUNK_SIZE,
            overlap: DEFAULT_OVERLAP,
        }
    }
}

impl SemanticSplitter {
    /// Create a splitter.
    ///
    /// `max_chunk_size` must be non-zero. `overlap` may be any value:
    /// when it is not smaller than `max_chunk_size` the hard splitter
    /// degrades to one-character steps instead of failing.
    pub fn new(max_chunk_size: usize, overlap: usize) -> Result<Self> {
        if max_chunk_size == 0 {
            return Err(SemsplitError::ConfigError(
                "max_chunk_size must be non-zero".to_string(),
            ));
        }

        let splitter = Self {
            max_chunk_size,
            overlap,
        };
        if splitter.is_degraded() {
            tracing::warn!(
                "Overlap {} >= max chunk size {}: hard splits will advance one character at a time",
                overlap,
                max_chunk_size
            );
        }
        Ok(splitter)
    }

    /// Maximum chunk size in characters
    pub fn max_chunk_size(&self) -> usize {
        self.max_chunk_size
    }

    /// Hard-split overlap in characters
    pub fn overlap(&self) -> usize {
        self.overlap
    }

    /// True when the overlap leaves no forward progress per window
    pub fn is_degraded(&self) -> bool {
        self.overlap >= self.max_chunk_size
    }

    /// Split any supported input.
    pub fn split(&self, input: &SplitInput) -> SplitOutput {
        let mut output = match input {
            SplitInput::Structured(result) => self.split_parse_result(result),
            SplitInput::Text(text) => SplitOutput {
                chunks: self.split_text(text),
                diagnostics: Vec::new(),
            },
            SplitInput::Markdown(markdown) => SplitOutput {
                chunks: self.split_markdown(markdown),
                diagnostics: Vec::new(),
            },
        };

        if self.is_degraded() {
            output.diagnostics.push(Diagnostic::DegradedOverlap {
                max_chunk_size: self.max_chunk_size,
                overlap: self.overlap,
            });
        }
        output
    }

    /// Split a structured parse result.
    ///
    /// Layout elements are processed in order. Elements that fail to
    /// convert or carry no text are skipped and reported as
    /// diagnostics. When no element yields a chunk and the result
    /// carries markdown, the markdown is split instead. The fallback
    /// is only taken when layouts produce nothing at all.
    ///
    /// Ids are distinct across the output: parser-supplied ids win, and
    /// a made-up id that clashes with one gets a `_<k>` suffix.
    pub fn split_parse_result(&self, result: &ParseResult) -> SplitOutput {
        let mut output = SplitOutput::default();

        let layouts: Vec<_> = result
            .layouts
            .iter()
            .map(LayoutElement::deserialize)
            .collect();
        let mut ids = layout::IdRegistry::new(
            layouts
                .iter()
                .filter_map(|layout| layout.as_ref().ok()?.unique_id.as_deref()),
        );

        for (index, layout) in layouts.iter().enumerate() {
            let layout = match layout {
                Ok(layout) => layout,
                Err(e) => {
                    tracing::debug!("Skipping layout element {}: {}", index, e);
                    output.diagnostics.push(Diagnostic::SkippedElement {
                        index,
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            let Some(chunk) = layout::build_layout_chunk(index, layout) else {
                output.diagnostics.push(Diagnostic::EmptyElement { index });
                continue;
            };
            for mut piece in self.refine(chunk) {
                let supplied = layout.unique_id.as_deref() == Some(piece.unique_id.as_str());
                piece.unique_id = ids.claim(piece.unique_id, supplied);
                output.chunks.push(piece);
            }
        }

        if output.chunks.is_empty() {
            if let Some(markdown) = result.markdown.as_deref().filter(|md| !md.trim().is_empty()) {
                tracing::debug!("No layout produced a chunk, falling back to markdown");
                output.diagnostics.push(Diagnostic::MarkdownFallback);
                output.chunks = self.split_markdown(markdown);
            }
        }

        output
    }

    /// Split plain text on paragraphs.
    ///
    /// Text that already fits is returned as a single trimmed chunk.
    /// Otherwise every chunk gets an id `text_chunk_<n>` from one
    /// continuous sequence.
    pub fn split_text(&self, text: &str) -> Vec<Chunk> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Vec::new();
        }

        let base = text_chunk(trimmed.to_string());
        if char_len(trimmed) <= self.max_chunk_size {
            return vec![base.derive(trimmed.to_string(), format!("{TEXT_CHUNK_ID}_0"))];
        }

        paragraph::split_paragraphs(trimmed, self.max_chunk_size, self.overlap)
            .into_iter()
            .enumerate()
            .map(|(n, piece)| base.derive(piece, format!("{TEXT_CHUNK_ID}_{n}")))
            .collect()
    }

    /// Split markdown into heading sections, refining oversized ones.
    pub fn split_markdown(&self, markdown: &str) -> Vec<Chunk> {
        markdown::sectionize(markdown)
            .iter()
            .flat_map(|(index, section)| self.refine(markdown::section_chunk(*index, section)))
            .collect()
    }

    /// Bring one candidate chunk within the size bound.
    ///
    /// A chunk that fits is returned unchanged. An oversized chunk is
    /// replaced by the paragraph, sentence and hard-split fallback
    /// pieces; each inherits the parent's fields and gets the id
    /// `<parent_id>_<n>`.
    pub fn refine(&self, chunk: Chunk) -> Vec<Chunk> {
        if chunk.char_len() <= self.max_chunk_size {
            return vec![chunk];
        }

        tracing::debug!(
            "Chunk {} has {} chars, splitting to fit {}",
            chunk.unique_id,
            chunk.char_len(),
            self.max_chunk_size
        );
        paragraph::split_paragraphs(&chunk.content, self.max_chunk_size, self.overlap)
            .into_iter()
            .enumerate()
            .map(|(n, piece)| chunk.derive(piece, format!("{}_{n}", chunk.unique_id)))
            .collect()
    }

    /// Map chunks to output documents with `base` metadata merged in.
    pub fn to_documents(&self, chunks: &[Chunk], base: &Metadata) -> Vec<Document> {
        assemble::to_documents(chunks, base)
    }
}

fn text_chunk(content: String) -> Chunk {
    Chunk {
        content,
        title: String::new(),
        chunk_type: "text".to_string(),
        subtype: "content".to_string(),
        page_number: 0,
        unique_id: TEXT_CHUNK_ID.to_string(),
        markdown_content: None,
        position: None,
    }
}
