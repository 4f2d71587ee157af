// Custom parser and sink implementations plugged into the pipeline

use crate::common::TestCorpus;
use async_trait::async_trait;
use semsplit::core::config::Config;
use semsplit::core::ingest::{
    CollectingSink, DocumentParser, DocumentSink, FileInputReader, IngestPipeline, ParsedSource,
};
use semsplit::core::splitter::SemanticSplitter;
use semsplit::core::types::{DocumentBatch, InputMode, ParseResult, SplitInput};
use semsplit::{Result, SemsplitError};
use serde_json::json;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Stands in for a document-intelligence service
struct StubParser;

#[async_trait]
impl DocumentParser for StubParser {
    async fn parse(&self, path: &Path) -> Result<ParsedSource> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();

        if name.starts_with("broken") {
            return Err(SemsplitError::IngestFailed(format!("parser rejected {name}")));
        }

        Ok(ParsedSource {
            input: SplitInput::Structured(ParseResult {
                layouts: vec![
                    json!({"text": format!("Parsed {name}"), "type": "title"}),
                    json!({"text": "Body text.", "pageNum": [1]}),
                ],
                markdown: None,
            }),
            content_type: "application/pdf".to_string(),
        })
    }
}

/// Rejects every other batch
#[derive(Default)]
struct FlakySink {
    calls: AtomicUsize,
    accepted: CollectingSink,
}

#[async_trait]
impl DocumentSink for FlakySink {
    async fn accept(&self, batch: DocumentBatch) -> Result<()> {
        if self.calls.fetch_add(1, Ordering::SeqCst) % 2 == 1 {
            return Err(SemsplitError::IngestFailed("store unavailable".into()));
        }
        self.accepted.accept(batch).await
    }
}

#[tokio::test]
async fn test_custom_parser() {
    let corpus = TestCorpus::with_files(&[
        ("a.pdf", "%PDF"),
        ("broken.pdf", "%PDF"),
        ("c.pdf", "%PDF"),
    ]);

    let mut config = Config::default();
    config.input.include_patterns = vec!["*.pdf".to_string()];
    let pipeline =
        IngestPipeline::new(&config, SemanticSplitter::default(), Arc::new(StubParser)).unwrap();

    let sink = CollectingSink::new();
    let stats = pipeline
        .run(&[corpus.path().to_path_buf()], &sink)
        .await
        .unwrap();

    assert_eq!(stats.files_processed, 2);
    assert_eq!(stats.files_skipped, 1);

    let batches = sink.take().await;
    let first = &batches[0].documents[0];
    assert_eq!(first.body, "Parsed a.pdf");
    assert_eq!(first.metadata["Content-Type"], json!("application/pdf"));
    assert_eq!(first.metadata["has_title"], json!(true));
}

#[tokio::test]
async fn test_sink_failures_counted_not_fatal() {
    let corpus = TestCorpus::with_files(&[
        ("1.txt", "one"),
        ("2.txt", "two"),
        ("3.txt", "three"),
    ]);

    let pipeline = IngestPipeline::from_config(&Config::default()).unwrap();
    let sink = FlakySink::default();
    let stats = pipeline
        .run(&[corpus.path().to_path_buf()], &sink)
        .await
        .unwrap();

    assert_eq!(stats.files_processed, 2);
    assert_eq!(stats.files_skipped, 1);

    let bodies: Vec<String> = sink
        .accepted
        .take()
        .await
        .into_iter()
        .map(|b| b.documents[0].body.clone())
        .collect();
    assert_eq!(bodies, vec!["one", "three"]);
}

#[tokio::test]
async fn test_file_reader_forced_modes() {
    let corpus = TestCorpus::with_files(&[("notes.txt", "# Heading\nbody")]);
    let path = &corpus.files[0];

    let auto = FileInputReader::new(InputMode::Auto).parse(path).await.unwrap();
    assert_eq!(
        auto.input,
        SplitInput::Text("# Heading\nbody".to_string())
    );
    assert_eq!(auto.content_type, "text/plain");

    let markdown = FileInputReader::new(InputMode::Markdown)
        .parse(path)
        .await
        .unwrap();
    assert_eq!(
        markdown.input,
        SplitInput::Markdown("# Heading\nbody".to_string())
    );
    assert_eq!(markdown.content_type, "text/markdown");

    let layout = FileInputReader::new(InputMode::Layout).parse(path).await;
    assert!(layout.unwrap_err().is_bad_request());
}

#[tokio::test]
async fn test_file_reader_missing_file() {
    let err = FileInputReader::default()
        .parse(Path::new("/nonexistent/doc.json"))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}
