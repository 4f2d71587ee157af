//! Ingest pipeline orchestration.
//!
//! Coordinates the end-to-end workflow around the splitter:
//! 1. Expand input paths into files
//! 2. Parse each file into splitter input
//! 3. Split and assemble documents
//! 4. Deliver one batch per file to a sink
//!
//! Files are processed concurrently, bounded by
//! `max_concurrent_files`, but batches reach the sink in input
//! order. A file that fails at any step is logged and skipped; it
//! never stops the run.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use serde_json::Value;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::core::config::Config;
use crate::core::error::{Result, SemsplitError};
use crate::core::ingest::sink::DocumentSink;
use crate::core::ingest::source::{DocumentParser, FileInputReader};
use crate::core::ingest::walker::InputWalker;
use crate::core::splitter::SemanticSplitter;
use crate::core::types::{DocumentBatch, IngestStats, Metadata, SplitInput};

/// Metadata key holding the source file path
pub const SOURCE_KEY: &str = "source";

/// Metadata key holding the source content type
pub const CONTENT_TYPE_KEY: &str = "Content-Type";

/// Limits applied per file
#[derive(Debug, Clone, Copy)]
struct FileLimits {
    max_layout_elements: usize,
}

/// Orchestrates parsing, splitting and delivery of many files
pub struct IngestPipeline {
    walker: InputWalker,
    parser: Arc<dyn DocumentParser>,
    splitter: SemanticSplitter,
    base_metadata: Metadata,
    limits: FileLimits,
    max_concurrent_files: usize,
}

impl IngestPipeline {
    /// Build a pipeline from configuration, reading inputs from local files
    pub fn from_config(config: &Config) -> Result<Self> {
        let splitter =
            SemanticSplitter::new(config.splitter.max_chunk_size, config.splitter.overlap)?;
        let parser = Arc::new(FileInputReader::new(config.input.mode));
        Self::new(config, splitter, parser)
    }

    /// Build a pipeline with an explicit splitter and parser
    pub fn new(
        config: &Config,
        splitter: SemanticSplitter,
        parser: Arc<dyn DocumentParser>,
    ) -> Result<Self> {
        let walker = InputWalker::new(
            config.input.include_patterns.clone(),
            config.input.exclude_patterns.clone(),
            config.input.max_file_size_mb,
        )?;

        Ok(Self {
            walker,
            parser,
            splitter,
            base_metadata: config.output.base_metadata.clone(),
            limits: FileLimits {
                max_layout_elements: config.limits.max_layout_elements,
            },
            max_concurrent_files: config.limits.max_concurrent_files.max(1),
        })
    }

    /// Merge caller metadata over the configured base metadata
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.base_metadata.extend(metadata);
        self
    }

    /// The splitter applied to every file
    pub fn splitter(&self) -> SemanticSplitter {
        self.splitter
    }

    /// Split every file under `paths` and deliver the batches to `sink`.
    ///
    /// Only a missing input path fails the whole run; per-file
    /// failures are counted in [`IngestStats::files_skipped`].
    pub async fn run<S>(&self, paths: &[PathBuf], sink: &S) -> Result<IngestStats>
    where
        S: DocumentSink + ?Sized,
    {
        let start = Instant::now();

        let files = self.walker.collect_inputs(paths)?;
        tracing::info!("Found {} files to split", files.len());

        let semaphore = Arc::new(Semaphore::new(self.max_concurrent_files));
        let mut tasks = JoinSet::new();

        for (index, path) in files.into_iter().enumerate() {
            let parser = Arc::clone(&self.parser);
            let semaphore = Arc::clone(&semaphore);
            let splitter = self.splitter;
            let base_metadata = self.base_metadata.clone();
            let limits = self.limits;

            tasks.spawn(async move {
                let result = match semaphore.acquire_owned().await {
                    Ok(_permit) => {
                        process_file(parser.as_ref(), splitter, &base_metadata, limits, &path)
                            .await
                    }
                    Err(e) => Err(SemsplitError::IngestFailed(e.to_string())),
                };
                (index, path, result)
            });
        }

        let mut stats = IngestStats::default();
        let mut outcomes = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => {
                    tracing::error!("Split task failed: {}", e);
                    stats.files_skipped += 1;
                }
            }
        }

        // Deliver in input order regardless of completion order
        outcomes.sort_by_key(|(index, _, _)| *index);

        for (_, path, result) in outcomes {
            let batch = match result {
                Ok(batch) => batch,
                Err(e) => {
                    tracing::warn!("Failed to process {:?}: {}", path, e);
                    stats.files_skipped += 1;
                    continue;
                }
            };

            let chunk_count = batch.documents.len();
            let diagnostic_count = batch.diagnostics.len();
            match sink.accept(batch).await {
                Ok(()) => {
                    tracing::debug!("Split {:?} ({} chunks)", path, chunk_count);
                    stats.files_processed += 1;
                    stats.chunks_created += chunk_count;
                    stats.diagnostics += diagnostic_count;
                }
                Err(e) => {
                    tracing::warn!("Sink rejected {:?}: {}", path, e);
                    stats.files_skipped += 1;
                }
            }
        }

        stats.duration_ms = start.elapsed().as_millis() as u64;

        tracing::info!(
            "Split complete: {} files processed, {} skipped, \
             {} chunks created in {}ms",
            stats.files_processed,
            stats.files_skipped,
            stats.chunks_created,
            stats.duration_ms
        );

        Ok(stats)
    }
}

/// Parse, split and assemble one file
async fn process_file(
    parser: &dyn DocumentParser,
    splitter: SemanticSplitter,
    base_metadata: &Metadata,
    limits: FileLimits,
    path: &Path,
) -> Result<DocumentBatch> {
    let parsed = parser.parse(path).await?;

    if let SplitInput::Structured(result) = &parsed.input {
        if result.layouts.len() > limits.max_layout_elements {
            return Err(SemsplitError::LimitExceeded(format!(
                "{} layout elements (max {})",
                result.layouts.len(),
                limits.max_layout_elements
            )));
        }
    }

    let input = parsed.input;
    let output = tokio::task::spawn_blocking(move || splitter.split(&input))
        .await
        .map_err(|e| SemsplitError::IngestFailed(format!("Splitting {path:?} failed: {e}")))?;

    let mut metadata = base_metadata.clone();
    metadata
        .entry(SOURCE_KEY)
        .or_insert_with(|| Value::from(path.display().to_string()));
    metadata
        .entry(CONTENT_TYPE_KEY)
        .or_insert_with(|| Value::from(parsed.content_type));

    Ok(DocumentBatch {
        source: path.to_path_buf(),
        documents: splitter.to_documents(&output.chunks, &metadata),
        diagnostics: output.diagnostics,
    })
}
