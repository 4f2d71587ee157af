//! Split command - split files into chunks

use crate::cli::output::{colors, format_duration, print_warning, truncate_chars};
use crate::cli::OutputFormat;
use crate::core::error::Result as CoreResult;
use crate::core::ingest::{CollectingSink, DocumentSink, JsonLinesSink};
use crate::core::services::{SplitRequest, Services};
use crate::core::types::{DocumentBatch, IngestStats, InputMode, Metadata};
use async_trait::async_trait;
use clap::Args;
use serde::Serialize;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;

/// Characters of chunk body shown per line with --verbose
const PREVIEW_CHARS: usize = 60;

/// Arguments for the split command
#[derive(Args, Debug)]
pub struct SplitArgs {
    /// Files or directories to split
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Maximum characters per chunk (overrides config)
    #[arg(long)]
    pub max_chunk_size: Option<usize>,

    /// Characters shared by adjacent hard-split windows (overrides config)
    #[arg(long)]
    pub overlap: Option<usize>,

    /// How to interpret input files: auto, layout, text or markdown
    #[arg(long)]
    pub mode: Option<InputMode>,

    /// Glob patterns to include (can be specified multiple times)
    #[arg(long, short = 'i')]
    pub include: Vec<String>,

    /// Glob patterns to exclude (can be specified multiple times)
    #[arg(long, short = 'e')]
    pub exclude: Vec<String>,

    /// Extra metadata as KEY=VALUE, VALUE parsed as JSON when possible
    #[arg(long = "metadata", short = 'm', value_parser = parse_key_value)]
    pub metadata: Vec<(String, Value)>,

    /// Also write documents as JSON lines to this file
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// List every chunk
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

/// Split result response
#[derive(Debug, Serialize)]
pub struct SplitResponse {
    pub files: Vec<DocumentBatch>,
    pub stats: IngestStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

/// Parse `KEY=VALUE`; values that are not valid JSON become strings
fn parse_key_value(s: &str) -> Result<(String, Value), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid metadata '{s}': expected KEY=VALUE"))?;

    let key = key.trim();
    if key.is_empty() {
        return Err(format!("invalid metadata '{s}': empty key"));
    }

    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::from(value));
    Ok((key.to_string(), value))
}

/// Collects batches for display and optionally streams them to a file
struct CommandSink {
    collected: CollectingSink,
    lines: Option<JsonLinesSink>,
}

#[async_trait]
impl DocumentSink for CommandSink {
    async fn accept(&self, batch: DocumentBatch) -> CoreResult<()> {
        if let Some(lines) = &self.lines {
            lines.accept(batch.clone()).await?;
        }
        self.collected.accept(batch).await
    }
}

/// Execute the split command
pub async fn execute(
    args: SplitArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let metadata: Metadata = args.metadata.into_iter().collect();

    let pipeline = services.create_pipeline(SplitRequest {
        max_chunk_size: args.max_chunk_size,
        overlap: args.overlap,
        mode: args.mode,
        include_patterns: args.include,
        exclude_patterns: args.exclude,
        metadata,
    })?;

    let lines = match &args.output {
        Some(path) => Some(JsonLinesSink::create(path).await.map_err(|e| {
            format!("Cannot create output file '{}': {}", path.display(), e)
        })?),
        None => None,
    };
    let sink = CommandSink {
        collected: CollectingSink::new(),
        lines,
    };

    let stats = pipeline.run(&args.paths, &sink).await?;

    let response = SplitResponse {
        files: sink.collected.take().await,
        stats,
        output: args.output.map(|p| p.to_string_lossy().into_owned()),
    };

    match format {
        OutputFormat::Human => print_human(&response, args.verbose),
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}

fn print_human(response: &SplitResponse, verbose: bool) {
    for batch in &response.files {
        println!(
            "{}: {} chunks",
            colors::file_path(&batch.source.display().to_string()),
            colors::number(&batch.documents.len().to_string())
        );

        for diagnostic in &batch.diagnostics {
            println!("  {} {}", colors::warning("!"), colors::dim(&diagnostic.to_string()));
        }

        if verbose {
            for document in &batch.documents {
                let meta = &document.metadata;
                println!(
                    "  {} p{} {} {} chars  {}",
                    colors::chunk_id(meta_str(meta, "unique_id")),
                    meta.get("page_number").unwrap_or(&Value::Null),
                    meta_str(meta, "element_type"),
                    colors::number(&meta.get("content_length").unwrap_or(&Value::Null).to_string()),
                    colors::dim(&truncate_chars(&document.body.replace('\n', " "), PREVIEW_CHARS))
                );
            }
        }
    }

    let stats = &response.stats;
    println!(
        "{} {} files ({} chunks) in {}",
        colors::success("Split"),
        colors::number(&stats.files_processed.to_string()),
        colors::number(&stats.chunks_created.to_string()),
        colors::number(&format_duration(stats.duration_ms as f64 / 1000.0))
    );

    if stats.files_skipped > 0 {
        print_warning(&format!(
            "{} files skipped (run with RUST_LOG=semsplit=warn for details)",
            stats.files_skipped
        ));
    }

    if let Some(path) = &response.output {
        println!("Documents written to {}", colors::file_path(path));
    }
}

fn meta_str<'a>(meta: &'a Metadata, key: &str) -> &'a str {
    meta.get(key).and_then(Value::as_str).unwrap_or("-")
}
