//! Unified service container for semsplit
//!
//! Provides shared access to the configured splitter and builds
//! ingest pipelines for individual requests.

use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::ingest::IngestPipeline;
use crate::core::splitter::SemanticSplitter;
use crate::core::types::{InputMode, Metadata};
use std::sync::Arc;

/// Per-request overrides of the configured defaults
#[derive(Debug, Clone, Default)]
pub struct SplitRequest {
    pub max_chunk_size: Option<usize>,
    pub overlap: Option<usize>,
    pub mode: Option<InputMode>,
    /// Replaces the configured include patterns when non-empty
    pub include_patterns: Vec<String>,
    /// Replaces the configured exclude patterns when non-empty
    pub exclude_patterns: Vec<String>,
    /// Merged over the configured base metadata
    pub metadata: Metadata,
}

/// Unified services container
///
/// All adapters use this same struct for service access.
#[derive(Debug, Clone)]
pub struct Services {
    /// Splitter built from the configured defaults
    pub splitter: SemanticSplitter,

    /// Application configuration
    pub config: Arc<Config>,
}

impl Services {
    /// Create services from configuration
    pub fn new(config: Config) -> Result<Self> {
        let splitter =
            SemanticSplitter::new(config.splitter.max_chunk_size, config.splitter.overlap)?;

        Ok(Self {
            splitter,
            config: Arc::new(config),
        })
    }

    /// Create an IngestPipeline with request-specific overrides
    ///
    /// Pipelines are created per-request since sizes and patterns vary.
    pub fn create_pipeline(&self, request: SplitRequest) -> Result<IngestPipeline> {
        let mut config = Config::clone(&self.config);

        if let Some(max_chunk_size) = request.max_chunk_size {
            config.splitter.max_chunk_size = max_chunk_size;
        }
        if let Some(overlap) = request.overlap {
            config.splitter.overlap = overlap;
        }
        if let Some(mode) = request.mode {
            config.input.mode = mode;
        }
        if !request.include_patterns.is_empty() {
            config.input.include_patterns = request.include_patterns;
        }
        if !request.exclude_patterns.is_empty() {
            config.input.exclude_patterns = request.exclude_patterns;
        }

        config.validate()?;
        Ok(IngestPipeline::from_config(&config)?.with_metadata(request.metadata))
    }
}
