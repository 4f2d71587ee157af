//! Core domain logic (adapter-agnostic)
//!
//! This module contains all logic that is independent of the CLI.
//!
//! # Architecture
//!
//! - **config**: Configuration loading (TOML + environment)
//! - **error**: Error types and Result alias
//! - **types**: Domain data structures
//! - **xdg**: XDG config directory handling
//! - **splitter**: Pure text-to-chunks transformation
//! - **ingest**: File discovery, parser/sink seams, pipeline
//! - **services**: Unified service container

pub mod config;
pub mod error;
pub mod ingest;
pub mod services;
pub mod splitter;
pub mod types;
pub mod xdg;

// Re-export key types for convenience
pub use config::Config;
pub use error::{Result, SemsplitError};
pub use services::Services;
pub use splitter::SemanticSplitter;
