//! Chroma HTTP Client
//!
//! Direct HTTP client for Chroma's REST API. Uses reqwest instead of
//! third-party wrapper crates for stability and full API control. The
//! client is a long-lived injected resource; callers construct one and
//! pass it to the components that need it.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, info, warn};

#[derive(Error, Debug)]
pub enum ChromaError {
    #[error("Chroma HTTP error: {0}")]
    Http(String),
    #[error("Collection not found: {0}")]
    CollectionNotFound(String),
    #[error("Chroma server not available")]
    ServerUnavailable,
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Deserialization error: {0}")]
    Deserialize(String),
}

impl From<reqwest::Error> for ChromaError {
    fn from(e: reqwest::Error) -> Self {
        ChromaError::Http(e.to_string())
    }
}

/// Chroma collection info returned by API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionInfo {
    pub id: String,
    pub name: String,
    pub metadata: Option<Value>,
}

/// Result from a query operation. Outer vectors are per query embedding;
/// this client always sends exactly one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChromaQueryResult {
    pub ids: Vec<Vec<String>>,
    pub documents: Option<Vec<Vec<Option<String>>>>,
    pub metadatas: Option<Vec<Vec<Option<Value>>>>,
    pub distances: Option<Vec<Vec<f32>>>,
}

/// Chroma HTTP client
#[derive(Clone)]
pub struct ChromaClient {
    http: Client,
    base_url: String,
    tenant: String,
    database: String,
}

impl ChromaClient {
    pub fn new(base_url: &str) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(5))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            tenant: "default_tenant".to_string(),
            database: "default_database".to_string(),
        }
    }

    /// Health check — returns nanosecond heartbeat if healthy
    pub async fn heartbeat(&self) -> Result<i64, ChromaError> {
        debug!("Chroma heartbeat check");
        let resp = self
            .http
            .get(format!("{}/api/v1/heartbeat", self.base_url))
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(ChromaError::ServerUnavailable);
        }

        let body: Value = resp.json().await?;
        Ok(body["nanosecond heartbeat"].as_i64().unwrap_or(0))
    }

    /// Get or create a collection by name
    pub async fn get_or_create_collection(
        &self,
        name: &str,
        metadata: Option<Value>,
    ) -> Result<CollectionInfo, ChromaError> {
        let mut body = json!({
            "name": name,
            "get_or_create": true,
        });
        if let Some(meta) = metadata {
            body["metadata"] = meta;
        }

        let resp = self
            .http
            .post(format!(
                "{}/api/v1/tenants/{}/databases/{}/collections",
                self.base_url, self.tenant, self.database
            ))
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            error!(name = %name, status = %status, "Collection get_or_create failed");
            return Err(ChromaError::Http(format!(
                "Create collection failed ({}): {}",
                status, text
            )));
        }

        info!(name = %name, "Collection get_or_create");
        serde_json::from_str(&text)
            .map_err(|e| ChromaError::Deserialize(format!("{}: {}", e, text)))
    }

    /// Get a collection by name (read-only, does not create)
    pub async fn get_collection(&self, name: &str) -> Result<CollectionInfo, ChromaError> {
        let collections = self.list_collections().await?;
        collections
            .into_iter()
            .find(|c| c.name == name)
            .ok_or_else(|| ChromaError::CollectionNotFound(name.to_string()))
    }

    /// List all collections
    pub async fn list_collections(&self) -> Result<Vec<CollectionInfo>, ChromaError> {
        let resp = self
            .http
            .get(format!(
                "{}/api/v1/tenants/{}/databases/{}/collections",
                self.base_url, self.tenant, self.database
            ))
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(ChromaError::Http(format!(
                "List collections failed: {}",
                resp.status()
            )));
        }

        resp.json()
            .await
            .map_err(|e| ChromaError::Deserialize(e.to_string()))
    }

    /// Delete a collection by name
    pub async fn delete_collection(&self, name: &str) -> Result<(), ChromaError> {
        let resp = self
            .http
            .delete(format!(
                "{}/api/v1/tenants/{}/databases/{}/collections/{}",
                self.base_url, self.tenant, self.database, name
            ))
            .send()
            .await?;

        if resp.status().as_u16() == 404 {
            warn!(name = %name, "Collection already deleted (404)");
            Ok(())
        } else if resp.status().is_success() {
            info!(name = %name, "Deleted collection");
            Ok(())
        } else {
            Err(ChromaError::Http(format!(
                "Delete collection failed: {}",
                resp.status()
            )))
        }
    }

    /// Upsert records (insert or update by ID)
    pub async fn upsert(
        &self,
        collection_id: &str,
        ids: Vec<String>,
        documents: Vec<String>,
        embeddings: Vec<Vec<f32>>,
        metadatas: Vec<Value>,
    ) -> Result<(), ChromaError> {
        if ids.is_empty() {
            return Err(ChromaError::InvalidInput("ids cannot be empty".to_string()));
        }
        if ids.len() != documents.len()
            || ids.len() != embeddings.len()
            || ids.len() != metadatas.len()
        {
            return Err(ChromaError::InvalidInput(format!(
                "upsert batch lengths differ: {} ids, {} documents, {} embeddings, {} metadatas",
                ids.len(),
                documents.len(),
                embeddings.len(),
                metadatas.len()
            )));
        }

        let count = ids.len();
        let body = json!({
            "ids": ids,
            "documents": documents,
            "embeddings": embeddings,
            "metadatas": metadatas,
        });

        let resp = self
            .http
            .post(format!(
                "{}/api/v1/collections/{}/upsert",
                self.base_url, collection_id
            ))
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            error!(status = %status, body = %text, "Chroma HTTP error");
            return Err(ChromaError::Http(format!("Upsert failed: {}", text)));
        }

        info!(collection = %collection_id, count = count, "Upserted documents");
        Ok(())
    }

    /// Query a collection with a single query embedding
    pub async fn query(
        &self,
        collection_id: &str,
        query_embedding: &[f32],
        n_results: u32,
    ) -> Result<ChromaQueryResult, ChromaError> {
        let body = json!({
            "query_embeddings": [query_embedding],
            "n_results": n_results,
            "include": ["documents", "metadatas", "distances"],
        });

        debug!(collection = %collection_id, n_results = n_results, "Querying collection");
        let resp = self
            .http
            .post(format!(
                "{}/api/v1/collections/{}/query",
                self.base_url, collection_id
            ))
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            error!(status = %status, body = %text, "Chroma HTTP error");
            return Err(ChromaError::Http(format!("Query failed: {}", text)));
        }

        resp.json()
            .await
            .map_err(|e| ChromaError::Deserialize(e.to_string()))
    }

    /// Count records in a collection
    pub async fn count(&self, collection_id: &str) -> Result<u32, ChromaError> {
        let resp = self
            .http
            .get(format!(
                "{}/api/v1/collections/{}/count",
                self.base_url, collection_id
            ))
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(ChromaError::Http(format!("Count failed: {}", resp.status())));
        }

        let result: u32 = resp
            .json()
            .await
            .map_err(|e| ChromaError::Deserialize(e.to_string()))?;
        debug!(collection = %collection_id, count = result, "Collection count");
        Ok(result)
    }
}
