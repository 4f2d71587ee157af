//! Mapping of layout elements to candidate chunks.

use std::collections::HashSet;

use crate::core::types::{Chunk, LayoutElement, Position};

use super::title::extract_title;

/// Default layout type when the element carries none
pub const DEFAULT_LAYOUT_TYPE: &str = "text";

/// Build the candidate chunk for the layout element at `index`.
///
/// Returns `None` when the element's text is empty after trimming.
/// The id is the element's own `uniqueId`, else `chunk_<index>`.
pub fn build_layout_chunk(index: usize, layout: &LayoutElement) -> Option<Chunk> {
    let raw_text = layout.text.as_deref().unwrap_or_default();
    let content = raw_text.trim();
    if content.is_empty() {
        return None;
    }

    let chunk_type = layout
        .layout_type
        .clone()
        .unwrap_or_else(|| DEFAULT_LAYOUT_TYPE.to_string());
    let subtype = layout.sub_type.clone().unwrap_or_default();
    let title = extract_title(&chunk_type, &subtype, raw_text);

    Some(Chunk {
        content: content.to_string(),
        title,
        chunk_type,
        subtype,
        page_number: layout.page_num.as_ref().map_or(0, |page| page.first()),
        unique_id: layout
            .unique_id
            .clone()
            .unwrap_or_else(|| format!("chunk_{index}")),
        markdown_content: layout.markdown_content.clone(),
        position: Some(Position {
            x: layout.x.unwrap_or_default(),
            y: layout.y.unwrap_or_default(),
            width: layout.w.unwrap_or_default(),
            height: layout.h.unwrap_or_default(),
        }),
    })
}

/// Keeps chunk ids distinct across one parse result.
///
/// Ids supplied by the parser are reserved up front, so an id the
/// splitter makes up (`chunk_<index>` or a `_<n>` sub-chunk id) never
/// takes one that a later element owns. A clashing id gets the
/// first free `_<k>` suffix.
#[derive(Debug, Default)]
pub struct IdRegistry {
    reserved: HashSet<String>,
    used: HashSet<String>,
}

impl IdRegistry {
    pub fn new<'a>(supplied: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            reserved: supplied.into_iter().map(str::to_string).collect(),
            used: HashSet::new(),
        }
    }

    /// Claim `id`, or a suffixed variant when it is taken.
    ///
    /// `supplied` marks an id carried verbatim from the parser; it may
    /// use its own reservation.
    pub fn claim(&mut self, id: String, supplied: bool) -> String {
        if !self.used.contains(&id) && (supplied || !self.reserved.contains(&id)) {
            self.used.insert(id.clone());
            return id;
        }

        let mut k = 1;
        loop {
            let candidate = format!("{id}_{k}");
            if !self.used.contains(&candidate) && !self.reserved.contains(&candidate) {
                tracing::debug!("Chunk id {} already taken, using {}", id, candidate);
                self.used.insert(candidate.clone());
                return candidate;
            }
            k += 1;
        }
    }
}
