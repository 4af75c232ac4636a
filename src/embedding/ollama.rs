//! Ollama Embedding Client
//!
//! HTTP embedding gateway against an Ollama server's `/api/embed`
//! endpoint. Vectors are L2-normalized client-side; the server does not
//! guarantee unit norm.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::{l2_normalize, Embedding, EmbeddingError, EmbeddingGateway};

/// Embedding gateway backed by an Ollama server.
#[derive(Clone)]
pub struct OllamaEmbedder {
    http: Client,
    endpoint: String,
    model: String,
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct EmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

impl OllamaEmbedder {
    pub fn new(host: &str, model: &str) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(120))
            .connect_timeout(Duration::from_secs(5))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            http,
            endpoint: format!("{}/api/embed", host.trim_end_matches('/')),
            model: model.to_string(),
        }
    }
}

#[async_trait]
impl EmbeddingGateway for OllamaEmbedder {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Embedding>, EmbeddingError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        debug!(model = %self.model, batch = texts.len(), "Embedding batch");
        let resp = self
            .http
            .post(&self.endpoint)
            .json(&EmbedRequest { model: &self.model, input: texts })
            .send()
            .await
            .map_err(|e| EmbeddingError::Http(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(EmbeddingError::Backend(format!("{}: {}", status, body)));
        }

        let parsed: EmbedResponse = resp
            .json()
            .await
            .map_err(|e| EmbeddingError::Http(e.to_string()))?;

        if parsed.embeddings.len() != texts.len() {
            return Err(EmbeddingError::BatchMismatch {
                sent: texts.len(),
                received: parsed.embeddings.len(),
            });
        }

        let mut vectors = parsed.embeddings;
        for v in &mut vectors {
            l2_normalize(v);
        }
        Ok(vectors)
    }
}
