//! Conversion of final chunks into output documents.

use serde_json::Value;

use crate::core::types::{Chunk, Document, Metadata};

/// Map chunks to documents, one per chunk, in order.
///
/// Each document's metadata is `base` overlaid with the fields
/// derived from its chunk; derived fields win on key collisions.
pub fn to_documents(chunks: &[Chunk], base: &Metadata) -> Vec<Document> {
    chunks
        .iter()
        .map(|chunk| Document {
            body: chunk.content.clone(),
            metadata: chunk_metadata(chunk, base),
        })
        .collect()
}

fn chunk_metadata(chunk: &Chunk, base: &Metadata) -> Metadata {
    let mut metadata = base.clone();
    metadata.insert("page_number".into(), Value::from(chunk.page_number));
    metadata.insert("element_type".into(), Value::from(chunk.chunk_type.as_str()));
    metadata.insert("element_subtype".into(), Value::from(chunk.subtype.as_str()));
    metadata.insert("unique_id".into(), Value::from(chunk.unique_id.as_str()));
    metadata.insert("has_markdown".into(), Value::from(chunk.has_markdown()));
    metadata.insert("has_title".into(), Value::from(!chunk.title.is_empty()));
    metadata.insert("content_length".into(), Value::from(chunk.char_len()));
    metadata
}
