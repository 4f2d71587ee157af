//! Heading-delimited sections of a markdown document.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::types::Chunk;

/// A heading line: one or more `#` followed by whitespace
static HEADING_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(#+)\s").unwrap());

/// Chunk type of every markdown-derived chunk
pub const MARKDOWN_SECTION_TYPE: &str = "markdown_section";

/// A markdown span starting at a heading (or at the top of the document)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Number of leading `#`, `None` for content before the first heading
    pub level: Option<usize>,

    /// Heading text, empty for the leading section
    pub heading: String,

    /// Trimmed section text including its heading line
    pub content: String,
}

impl Section {
    /// `level_<n>`, or `content` for the leading section
    pub fn subtype(&self) -> String {
        match self.level {
            Some(level) => format!("level_{level}"),
            None => "content".to_string(),
        }
    }
}

/// Split markdown immediately before every heading line.
///
/// Returns `(section_index, section)` pairs; sections that are empty
/// after trimming are dropped but still consume an index so that ids
/// derived from it stay stable.
pub fn sectionize(markdown: &str) -> Vec<(usize, Section)> {
    let mut spans: Vec<String> = Vec::new();

    for line in markdown.split_inclusive('\n') {
        match spans.last_mut() {
            Some(current) if !is_heading(line) => current.push_str(line),
            _ => spans.push(line.to_string()),
        }
    }

    spans
        .iter()
        .enumerate()
        .filter_map(|(index, span)| {
            let content = span.trim();
            if content.is_empty() {
                return None;
            }
            let (level, heading) = parse_heading(content);
            Some((
                index,
                Section {
                    level,
                    heading,
                    content: content.to_string(),
                },
            ))
        })
        .collect()
}

/// Heading test on a line without its terminator, so a bare `#` is not one.
fn is_heading(line: &str) -> bool {
    HEADING_LINE.is_match(line.lines().next().unwrap_or_default())
}

/// Level and text of the heading on the first line of `section`.
fn parse_heading(section: &str) -> (Option<usize>, String) {
    let first_line = section.lines().next().unwrap_or_default();
    match HEADING_LINE.captures(first_line) {
        Some(caps) => {
            let hashes = caps.get(1).map_or(0, |m| m.len());
            (Some(hashes), first_line[hashes..].trim().to_string())
        }
        None => (None, String::new()),
    }
}

/// Candidate chunk for one section; oversized content is refined later.
pub fn section_chunk(index: usize, section: &Section) -> Chunk {
    Chunk {
        content: section.content.clone(),
        title: section.heading.clone(),
        chunk_type: MARKDOWN_SECTION_TYPE.to_string(),
        subtype: section.subtype(),
        page_number: 0,
        unique_id: format!("markdown_chunk_{index}"),
        markdown_content: Some(section.content.clone()),
        position: None,
    }
}
