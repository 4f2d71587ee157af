//! Where split documents go.
//!
//! [`DocumentSink`] is the hand-off point to an embedding/indexing
//! collaborator. Two local sinks are provided: an in-memory
//! collector and a JSON-lines file writer.

use async_trait::async_trait;
use std::path::Path;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::core::error::Result;
use crate::core::types::DocumentBatch;

/// Receives the documents produced from one source at a time
#[async_trait]
pub trait DocumentSink: Send + Sync {
    async fn accept(&self, batch: DocumentBatch) -> Result<()>;
}

/// Keeps every accepted batch in memory, in acceptance order
#[derive(Debug, Default)]
pub struct CollectingSink {
    batches: Mutex<Vec<DocumentBatch>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the collected batches, leaving the sink empty
    pub async fn take(&self) -> Vec<DocumentBatch> {
        std::mem::take(&mut *self.batches.lock().await)
    }
}

#[async_trait]
impl DocumentSink for CollectingSink {
    async fn accept(&self, batch: DocumentBatch) -> Result<()> {
        self.batches.lock().await.push(batch);
        Ok(())
    }
}

/// Writes one JSON document per line
#[derive(Debug)]
pub struct JsonLinesSink {
    file: Mutex<tokio::fs::File>,
}

impl JsonLinesSink {
    /// Create (or truncate) the output file
    pub async fn create(path: impl AsRef<Path>) -> Result<Self> {
        let file = tokio::fs::File::create(path).await?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

#[async_trait]
impl DocumentSink for JsonLinesSink {
    async fn accept(&self, batch: DocumentBatch) -> Result<()> {
        let mut lines = Vec::new();
        for document in &batch.documents {
            serde_json::to_writer(&mut lines, document)?;
            lines.push(b'\n');
        }

        let mut file = self.file.lock().await;
        file.write_all(&lines).await?;
        file.flush().await?;
        Ok(())
    }
}
