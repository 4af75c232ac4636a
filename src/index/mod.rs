//! Index Store
//!
//! Abstract nearest-neighbor index over named collections, plus the
//! Chroma-backed implementation. Collections are independent namespaces;
//! chunk identities are unique only within a collection.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tracing::debug;

use crate::chroma::{ChromaClient, ChromaError};
use crate::embedding::Embedding;

#[derive(Error, Debug)]
pub enum IndexError {
    #[error("index batch mismatch: {0}")]
    BatchMismatch(String),
    #[error("index store error: {0}")]
    Store(String),
}

impl From<ChromaError> for IndexError {
    fn from(e: ChromaError) -> Self {
        IndexError::Store(e.to_string())
    }
}

/// Metadata persisted alongside each indexed chunk. Wire keys are `path`
/// and `chunk_index`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkMetadata {
    #[serde(rename = "path", default)]
    pub source_path: String,
    #[serde(default)]
    pub chunk_index: usize,
}

/// A ranked match returned by a nearest-neighbor query.
#[derive(Debug, Clone)]
pub struct IndexMatch {
    pub text: String,
    pub metadata: ChunkMetadata,
    pub distance: f32,
}

/// Record count for a named collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionStatus {
    pub name: String,
    pub records: u32,
}

/// Nearest-neighbor index capability.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Insert or overwrite entries by ID. All four sequences must have
    /// equal length; a mismatch is rejected, never truncated.
    async fn upsert(
        &self,
        collection: &str,
        ids: Vec<String>,
        texts: Vec<String>,
        metadata: Vec<ChunkMetadata>,
        vectors: Vec<Embedding>,
    ) -> Result<(), IndexError>;

    /// Ranked nearest neighbors of `vector`, at most `k`. An empty or
    /// nonexistent collection yields an empty result, not an error.
    async fn query(
        &self,
        collection: &str,
        vector: &[f32],
        k: usize,
    ) -> Result<Vec<IndexMatch>, IndexError>;

    /// Number of entries in the collection; zero when it does not exist.
    async fn count(&self, collection: &str) -> Result<u32, IndexError>;

    /// Remove a collection and all its entries.
    async fn drop_collection(&self, collection: &str) -> Result<(), IndexError>;
}

/// Index store backed by a Chroma server.
///
/// Collections are created with cosine distance, so `1 - distance` read
/// back from a query is a true cosine similarity in [-1, 1]. A collection
/// created elsewhere with a different metric shifts that range.
#[derive(Clone)]
pub struct ChromaIndex {
    client: ChromaClient,
}

impl ChromaIndex {
    pub fn new(client: ChromaClient) -> Self {
        Self { client }
    }

    /// Record counts for every collection on the server.
    pub async fn collections(&self) -> Result<Vec<CollectionStatus>, IndexError> {
        let infos = self.client.list_collections().await?;
        let mut statuses = Vec::with_capacity(infos.len());
        for info in infos {
            let records = self.client.count(&info.id).await.unwrap_or(0);
            statuses.push(CollectionStatus { name: info.name, records });
        }
        Ok(statuses)
    }

    /// Server liveness probe.
    pub async fn heartbeat(&self) -> Result<i64, IndexError> {
        Ok(self.client.heartbeat().await?)
    }
}

#[async_trait]
impl VectorIndex for ChromaIndex {
    async fn upsert(
        &self,
        collection: &str,
        ids: Vec<String>,
        texts: Vec<String>,
        metadata: Vec<ChunkMetadata>,
        vectors: Vec<Embedding>,
    ) -> Result<(), IndexError> {
        if ids.len() != texts.len() || ids.len() != metadata.len() || ids.len() != vectors.len() {
            return Err(IndexError::BatchMismatch(format!(
                "{} ids, {} texts, {} metadata, {} vectors",
                ids.len(),
                texts.len(),
                metadata.len(),
                vectors.len()
            )));
        }

        let info = self
            .client
            .get_or_create_collection(collection, Some(json!({ "hnsw:space": "cosine" })))
            .await?;

        let metadatas: Vec<serde_json::Value> = metadata
            .iter()
            .map(|m| serde_json::to_value(m).unwrap_or_else(|_| json!({})))
            .collect();

        self.client
            .upsert(&info.id, ids, texts, vectors, metadatas)
            .await?;
        Ok(())
    }

    async fn query(
        &self,
        collection: &str,
        vector: &[f32],
        k: usize,
    ) -> Result<Vec<IndexMatch>, IndexError> {
        let info = match self.client.get_collection(collection).await {
            Ok(info) => info,
            Err(ChromaError::CollectionNotFound(name)) => {
                debug!(collection = %name, "Query against missing collection");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let result = self.client.query(&info.id, vector, k as u32).await?;

        let mut matches = Vec::new();
        for (query_idx, ids) in result.ids.iter().enumerate() {
            for (result_idx, _id) in ids.iter().enumerate() {
                let text = result
                    .documents
                    .as_ref()
                    .and_then(|d| d.get(query_idx))
                    .and_then(|d| d.get(result_idx))
                    .and_then(|d| d.clone())
                    .unwrap_or_default();

                let metadata = result
                    .metadatas
                    .as_ref()
                    .and_then(|m| m.get(query_idx))
                    .and_then(|m| m.get(result_idx))
                    .and_then(|m| m.clone())
                    .map(|v| serde_json::from_value(v).unwrap_or_default())
                    .unwrap_or_default();

                let distance = result
                    .distances
                    .as_ref()
                    .and_then(|d| d.get(query_idx))
                    .and_then(|d| d.get(result_idx))
                    .copied()
                    .unwrap_or(f32::MAX);

                matches.push(IndexMatch { text, metadata, distance });
            }
        }

        Ok(matches)
    }

    async fn count(&self, collection: &str) -> Result<u32, IndexError> {
        match self.client.get_collection(collection).await {
            Ok(info) => Ok(self.client.count(&info.id).await?),
            Err(ChromaError::CollectionNotFound(_)) => Ok(0),
            Err(e) => Err(e.into()),
        }
    }

    async fn drop_collection(&self, collection: &str) -> Result<(), IndexError> {
        Ok(self.client.delete_collection(collection).await?)
    }
}
