//! Core data types for semsplit.
//!
//! This module defines the structures flowing through the
//! splitter: the layout-parse input contract, the transient
//! chunks produced by one splitting pass, the output documents
//! handed to an embedding/indexing collaborator, and the
//! diagnostics returned alongside them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Free-form document metadata (JSON object)
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// Bounding box of a layout element on its page
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// A bounded-size text unit produced by one splitting pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    /// Trimmed, non-empty text content
    pub content: String,

    /// Heuristic title, empty when none was detected
    pub title: String,

    /// Structural origin tag (e.g. "text", "table", "markdown_section")
    #[serde(rename = "type")]
    pub chunk_type: String,

    /// Structural sub-tag (e.g. "level_2", "content")
    pub subtype: String,

    /// Page the content came from, 0 when unknown
    pub page_number: i64,

    /// Identifier, unique within one splitting call
    pub unique_id: String,

    /// Verbatim markdown of the originating unit
    pub markdown_content: Option<String>,

    /// Bounding box, only for layout-derived chunks
    pub position: Option<Position>,
}

impl Chunk {
    /// Derive a sub-chunk that inherits every field except content and id.
    pub fn derive(&self, content: String, unique_id: String) -> Self {
        Self {
            content,
            unique_id,
            ..self.clone()
        }
    }

    /// Content length in characters
    pub fn char_len(&self) -> usize {
        self.content.chars().count()
    }

    /// True when the originating unit carried non-empty markdown
    pub fn has_markdown(&self) -> bool {
        self.markdown_content
            .as_deref()
            .is_some_and(|md| !md.is_empty())
    }
}

/// An output document: chunk body plus merged metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub body: String,
    pub metadata: Metadata,
}

/// Page number as delivered by the parsing service: a list or a scalar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PageNumber {
    Many(Vec<i64>),
    One(i64),
}

impl PageNumber {
    /// The page a chunk is attributed to.
    ///
    /// Only a list carries a page: its first entry, 0 when empty. A bare
    /// scalar is not attributed to any page.
    pub fn first(&self) -> i64 {
        match self {
            PageNumber::Many(pages) => pages.first().copied().unwrap_or(0),
            PageNumber::One(_) => 0,
        }
    }
}

/// One structural unit from a document-parsing service
///
/// Only `text` is strict: an element whose text is present but not a
/// string is rejected. Every other field is read leniently and falls
/// back to its default when it has an unexpected JSON type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutElement {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "lenient::string")]
    pub layout_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub sub_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::page_number")]
    pub page_num: Option<PageNumber>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub unique_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub markdown_content: Option<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub x: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub y: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub w: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub h: Option<f64>,
}

/// Tolerant readers for the side fields of a layout element
mod lenient {
    use super::PageNumber;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// Strings as-is, numbers and booleans in their JSON spelling
    pub fn string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        })
    }

    /// Numbers, or strings that parse as one
    pub fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(as_f64(&Value::deserialize(deserializer)?))
    }

    /// A list of pages or a scalar; list entries that are not numeric count as 0
    pub fn page_number<'de, D>(deserializer: D) -> Result<Option<PageNumber>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Array(items) => Some(PageNumber::Many(
                items.iter().map(|v| as_i64(v).unwrap_or(0)).collect(),
            )),
            other => as_i64(&other).map(PageNumber::One),
        })
    }

    fn as_f64(value: &Value) -> Option<f64> {
        match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    fn as_i64(value: &Value) -> Option<i64> {
        match value {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

/// Structured parse result: layout elements plus optional markdown rendering
///
/// Layout elements are kept as raw JSON so that a single malformed
/// element can be skipped without rejecting the whole result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParseResult {
    #[serde(default)]
    pub layouts: Vec<serde_json::Value>,

    #[serde(default)]
    pub markdown: Option<String>,
}

impl ParseResult {
    /// Build a parse result from typed layout elements
    pub fn from_layouts(layouts: impl IntoIterator<Item = LayoutElement>) -> Self {
        Self {
            layouts: layouts
                .into_iter()
                .filter_map(|layout| serde_json::to_value(layout).ok())
                .collect(),
            markdown: None,
        }
    }

    /// Attach a markdown rendering used when no layout yields a chunk
    pub fn with_markdown(mut self, markdown: impl Into<String>) -> Self {
        self.markdown = Some(markdown.into());
        self
    }
}

/// Entry path into the splitter
#[derive(Debug, Clone, PartialEq)]
pub enum SplitInput {
    /// Layout list with optional markdown fallback
    Structured(ParseResult),
    /// Plain text, split on paragraphs
    Text(String),
    /// Markdown, split on headings
    Markdown(String),
}

/// How input files are interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    /// Decide from the file extension
    #[default]
    Auto,
    /// JSON parse result with layouts
    Layout,
    /// Plain text
    Text,
    /// Markdown
    Markdown,
}

impl FromStr for InputMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(InputMode::Auto),
            "layout" => Ok(InputMode::Layout),
            "text" => Ok(InputMode::Text),
            "markdown" => Ok(InputMode::Markdown),
            other => Err(format!(
                "unknown input mode '{other}' (expected auto, layout, text or markdown)"
            )),
        }
    }
}

impl fmt::Display for InputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InputMode::Auto => "auto",
            InputMode::Layout => "layout",
            InputMode::Text => "text",
            InputMode::Markdown => "markdown",
        };
        f.write_str(name)
    }
}

/// Non-fatal event observed during a splitting pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// Layout element whose text was empty after trimming
    EmptyElement { index: usize },
    /// Layout element that could not be converted
    SkippedElement { index: usize, reason: String },
    /// No layout produced a chunk; markdown was split instead
    MarkdownFallback,
    /// Overlap is not smaller than the chunk size
    DegradedOverlap { max_chunk_size: usize, overlap: usize },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::EmptyElement { index } => write!(f, "layout {index} has no text"),
            Diagnostic::SkippedElement { index, reason } => {
                write!(f, "layout {index} skipped: {reason}")
            }
            Diagnostic::MarkdownFallback => f.write_str("no layout chunks, split markdown instead"),
            Diagnostic::DegradedOverlap {
                max_chunk_size,
                overlap,
            } => write!(
                f,
                "overlap {overlap} >= max chunk size {max_chunk_size}, windows advance by 1"
            ),
        }
    }
}

/// Result of one splitting pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SplitOutput {
    pub chunks: Vec<Chunk>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Documents produced from one source, handed to a sink
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentBatch {
    /// File the documents came from
    pub source: PathBuf,

    /// Documents in chunk order
    pub documents: Vec<Document>,

    /// Diagnostics reported while splitting this source
    pub diagnostics: Vec<Diagnostic>,
}

/// Statistics from an ingest run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IngestStats {
    /// Files split and delivered to the sink
    pub files_processed: usize,

    /// Files that failed to read, parse or deliver
    pub files_skipped: usize,

    /// Total documents delivered
    pub chunks_created: usize,

    /// Total diagnostics across all files
    pub diagnostics: usize,

    /// Run duration in milliseconds
    pub duration_ms: u64,
}
