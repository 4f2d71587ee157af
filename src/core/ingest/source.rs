//! Where split inputs come from.
//!
//! [`DocumentParser`] is the seam for whatever produces layout-parse
//! results (a document-intelligence service, a cache, a fixture).
//! [`FileInputReader`] is the local implementation: it reads files
//! that already contain a parse result, markdown or plain text.

use async_trait::async_trait;
use std::path::Path;

use crate::core::error::{Result, SemsplitError};
use crate::core::types::{InputMode, ParseResult, SplitInput};

/// An input ready for splitting, with the content type of its source
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedSource {
    pub input: SplitInput,
    pub content_type: String,
}

/// Produces splitter input for a source path
#[async_trait]
pub trait DocumentParser: Send + Sync {
    async fn parse(&self, path: &Path) -> Result<ParsedSource>;
}

/// Reads parse results, markdown or text from local files
#[derive(Debug, Clone, Copy, Default)]
pub struct FileInputReader {
    mode: InputMode,
}

impl FileInputReader {
    pub fn new(mode: InputMode) -> Self {
        Self { mode }
    }

    /// The concrete mode used for `path`.
    ///
    /// `Auto` picks `Layout` for `.json`, `Markdown` for `.md` and
    /// `.markdown`, and `Text` for everything else.
    pub fn resolve_mode(&self, path: &Path) -> InputMode {
        if self.mode != InputMode::Auto {
            return self.mode;
        }

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("json") => InputMode::Layout,
            Some("md") | Some("markdown") => InputMode::Markdown,
            _ => InputMode::Text,
        }
    }
}

#[async_trait]
impl DocumentParser for FileInputReader {
    async fn parse(&self, path: &Path) -> Result<ParsedSource> {
        let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::InvalidData {
                SemsplitError::InvalidInput(format!("Skipping non-UTF-8 file: {path:?}"))
            } else if e.kind() == std::io::ErrorKind::NotFound {
                SemsplitError::InputNotFound(path.display().to_string())
            } else {
                SemsplitError::IoError(e)
            }
        })?;

        let parsed = match self.resolve_mode(path) {
            InputMode::Layout => {
                let result: ParseResult = serde_json::from_str(&contents).map_err(|e| {
                    SemsplitError::InvalidInput(format!("{path:?} is not a parse result: {e}"))
                })?;
                ParsedSource {
                    input: SplitInput::Structured(result),
                    content_type: "application/json".to_string(),
                }
            }
            InputMode::Markdown => ParsedSource {
                input: SplitInput::Markdown(contents),
                content_type: "text/markdown".to_string(),
            },
            InputMode::Text | InputMode::Auto => ParsedSource {
                input: SplitInput::Text(contents),
                content_type: "text/plain".to_string(),
            },
        };

        Ok(parsed)
    }
}
