//! semsplit - Semantic chunking for retrieval pipelines
//!
//! Turns parsed-document output (layout elements with position,
//! type and text), markdown or plain text into bounded-size,
//! context-preserving chunks ready for embedding and indexing.
//!
//! # Architecture
//!
//! The codebase is organized into two main modules:
//!
//! - **core**: Domain logic (adapter-agnostic)
//!   - config, error, types, xdg
//!   - splitter (layout, paragraph, sentence, window, markdown)
//!   - ingest (parser/sink seams, file walking, pipeline)
//!   - services (unified service container)
//!
//! - **cli**: Command-line adapter (depends on core)
//!   - commands, output
//!
//! # Key Features
//!
//! - Every chunk is at most `max_chunk_size` characters
//! - Paragraph, sentence and markdown boundaries kept where possible
//! - UTF-8 safe hard splitting (character-based, never panics)
//! - Deterministic, order-preserving output
//! - Diagnostics returned as values, never hidden global state

// Core domain logic
pub mod core;

// CLI adapter
pub mod cli;

// Re-export commonly used types for convenience
pub use core::config::Config;
pub use core::error::{Result, SemsplitError};
pub use core::services::Services;
pub use core::splitter::SemanticSplitter;
pub use core::types::*;
