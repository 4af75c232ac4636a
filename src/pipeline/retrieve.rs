//! Retrieval Pipeline
//!
//! Embeds a query, runs the nearest-neighbor search, and normalizes the
//! matches into ranked evidence records.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use super::PipelineError;
use crate::embedding::{EmbeddingError, EmbeddingGateway};
use crate::index::VectorIndex;

/// A retrieved chunk with its relevance to the query.
///
/// `score` is `1 - distance`; with a cosine-distance index it falls in
/// [-1, 1], higher meaning more relevant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evidence {
    pub text: String,
    pub source_path: String,
    pub chunk_index: usize,
    pub score: f32,
}

/// Read-path orchestrator.
pub struct Retriever {
    embedder: Arc<dyn EmbeddingGateway>,
    index: Arc<dyn VectorIndex>,
}

impl Retriever {
    pub fn new(embedder: Arc<dyn EmbeddingGateway>, index: Arc<dyn VectorIndex>) -> Self {
        Self { embedder, index }
    }

    /// The `top_k` most similar chunks in `collection`, ordered by
    /// descending score. An empty or nonexistent collection yields an
    /// empty result. Ordering among equal scores is whatever the index
    /// returns.
    pub async fn search(
        &self,
        query: &str,
        top_k: usize,
        collection: &str,
    ) -> Result<Vec<Evidence>, PipelineError> {
        let vectors = self.embedder.embed(&[query.to_string()]).await?;
        let query_vector = vectors
            .into_iter()
            .next()
            .ok_or(EmbeddingError::BatchMismatch { sent: 1, received: 0 })?;

        let matches = self.index.query(collection, &query_vector, top_k).await?;
        debug!(collection = %collection, matches = matches.len(), "Retrieved evidence");

        Ok(matches
            .into_iter()
            .map(|m| Evidence {
                text: m.text,
                source_path: m.metadata.source_path,
                chunk_index: m.metadata.chunk_index,
                score: 1.0 - m.distance,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::{Embedding, HashingEmbedder};
    use crate::index::{ChunkMetadata, IndexError, IndexMatch};
    use async_trait::async_trait;

    struct CannedIndex {
        matches: Vec<IndexMatch>,
    }

    #[async_trait]
    impl VectorIndex for CannedIndex {
        async fn upsert(
            &self,
            _collection: &str,
            _ids: Vec<String>,
            _texts: Vec<String>,
            _metadata: Vec<ChunkMetadata>,
            _vectors: Vec<Embedding>,
        ) -> Result<(), IndexError> {
            Ok(())
        }

        async fn query(
            &self,
            _collection: &str,
            _vector: &[f32],
            k: usize,
        ) -> Result<Vec<IndexMatch>, IndexError> {
            Ok(self.matches.iter().take(k).cloned().collect())
        }

        async fn count(&self, _collection: &str) -> Result<u32, IndexError> {
            Ok(self.matches.len() as u32)
        }

        async fn drop_collection(&self, _collection: &str) -> Result<(), IndexError> {
            Ok(())
        }
    }

    fn canned_match(text: &str, path: &str, index: usize, distance: f32) -> IndexMatch {
        IndexMatch {
            text: text.to_string(),
            metadata: ChunkMetadata { source_path: path.to_string(), chunk_index: index },
            distance,
        }
    }

    #[tokio::test]
    async fn test_score_is_one_minus_distance() {
        let index = CannedIndex {
            matches: vec![
                canned_match("closest", "a.txt", 0, 0.1),
                canned_match("farther", "b.txt", 3, 0.6),
            ],
        };
        let retriever = Retriever::new(Arc::new(HashingEmbedder::default()), Arc::new(index));

        let evidence = retriever.search("anything", 4, "docs").await.unwrap();
        assert_eq!(evidence.len(), 2);
        assert!((evidence[0].score - 0.9).abs() < 1e-6);
        assert!((evidence[1].score - 0.4).abs() < 1e-6);
        assert_eq!(evidence[0].source_path, "a.txt");
        assert_eq!(evidence[1].chunk_index, 3);
    }

    #[tokio::test]
    async fn test_empty_collection_yields_empty_evidence() {
        let index = CannedIndex { matches: Vec::new() };
        let retriever = Retriever::new(Arc::new(HashingEmbedder::default()), Arc::new(index));

        let evidence = retriever.search("anything", 4, "missing").await.unwrap();
        assert!(evidence.is_empty());
    }

    #[tokio::test]
    async fn test_top_k_caps_results() {
        let index = CannedIndex {
            matches: (0..10)
                .map(|i| canned_match("text", "a.txt", i, i as f32 / 10.0))
                .collect(),
        };
        let retriever = Retriever::new(Arc::new(HashingEmbedder::default()), Arc::new(index));

        let evidence = retriever.search("anything", 3, "docs").await.unwrap();
        assert_eq!(evidence.len(), 3);
    }
}
