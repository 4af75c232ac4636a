//! Ingestion Pipeline
//!
//! Walks a document root and writes each eligible file's chunks into the
//! index: extract text, chunk it, assign identities, embed the file's
//! chunks as one batch, upsert. Ingestion is best-effort per file; the
//! report aggregates only files that produced chunks.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use super::PipelineError;
use crate::documents::{chunk, chunk_identity, discover_files, ChunkerConfig, TextExtractor};
use crate::embedding::EmbeddingGateway;
use crate::index::{ChunkMetadata, VectorIndex};

/// Aggregate outcome of one ingestion pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestReport {
    /// Files that yielded at least one chunk.
    pub files_processed: u32,
    /// Chunks written across those files.
    pub chunks_written: u32,
}

/// Write-path orchestrator.
pub struct Ingestor {
    extractor: Arc<dyn TextExtractor>,
    embedder: Arc<dyn EmbeddingGateway>,
    index: Arc<dyn VectorIndex>,
    chunking: ChunkerConfig,
}

impl Ingestor {
    pub fn new(
        extractor: Arc<dyn TextExtractor>,
        embedder: Arc<dyn EmbeddingGateway>,
        index: Arc<dyn VectorIndex>,
        chunking: ChunkerConfig,
    ) -> Self {
        Self { extractor, embedder, index, chunking }
    }

    /// Ingest every eligible file under `root` into `collection`.
    ///
    /// The chunking window is validated before any file is touched.
    /// Files that fail extraction or yield no chunks are skipped and
    /// logged; an embedding or index failure aborts the pass with the
    /// root cause, leaving already-written files in place.
    pub async fn ingest_dir(
        &self,
        root: &Path,
        collection: &str,
    ) -> Result<IngestReport, PipelineError> {
        self.chunking.validate()?;

        let files = discover_files(root);
        info!(root = %root.display(), files = files.len(), collection = %collection, "Starting ingestion");

        let mut report = IngestReport::default();

        for path in &files {
            let text = match self.extractor.extract(path).await {
                Ok(text) => text,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Extraction failed, skipping file");
                    continue;
                }
            };
            if text.is_empty() {
                debug!(path = %path.display(), "Nothing to extract, skipping file");
                continue;
            }

            let chunks = chunk(&text, &self.chunking)?;
            if chunks.is_empty() {
                debug!(path = %path.display(), "No chunks produced, skipping file");
                continue;
            }

            let source_path = path.to_string_lossy().to_string();
            let ids: Vec<String> = (0..chunks.len())
                .map(|i| chunk_identity(&source_path, i))
                .collect();
            let metadata: Vec<ChunkMetadata> = (0..chunks.len())
                .map(|i| ChunkMetadata { source_path: source_path.clone(), chunk_index: i })
                .collect();

            let vectors = self.embedder.embed(&chunks).await?;

            // Equal lengths are an invariant of the write path. A
            // mismatch means a collaborator broke its contract; abort
            // this file rather than truncate or partially write.
            if vectors.len() != chunks.len() {
                error!(
                    path = %path.display(),
                    chunks = chunks.len(),
                    vectors = vectors.len(),
                    "Batch length mismatch, aborting file"
                );
                continue;
            }

            let written = chunks.len() as u32;
            self.index
                .upsert(collection, ids, chunks, metadata, vectors)
                .await?;

            debug!(path = %path.display(), chunks = written, "Indexed file");
            report.files_processed += 1;
            report.chunks_written += written;
        }

        info!(
            files_processed = report.files_processed,
            chunks_written = report.chunks_written,
            collection = %collection,
            "Ingestion finished"
        );
        Ok(report)
    }
}
