//! Ollama Generation Client
//!
//! HTTP client for an Ollama server's `/api/generate` endpoint. Requests
//! are non-streaming and bounded by the configured timeout.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::{GenerationError, Generator};

/// Generation backend backed by an Ollama server.
#[derive(Clone)]
pub struct OllamaGenerator {
    http: Client,
    endpoint: String,
    model: String,
    timeout_secs: u64,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

impl OllamaGenerator {
    pub fn new(host: &str, model: &str, timeout: Duration) -> Self {
        let timeout_secs = timeout.as_secs();
        let http = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(5))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            http,
            endpoint: format!("{}/api/generate", host.trim_end_matches('/')),
            model: model.to_string(),
            timeout_secs,
        }
    }

    fn map_error(&self, e: reqwest::Error) -> GenerationError {
        if e.is_timeout() {
            GenerationError::Timeout(self.timeout_secs)
        } else {
            GenerationError::Http(e.to_string())
        }
    }
}

#[async_trait]
impl Generator for OllamaGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        debug!(model = %self.model, prompt_chars = prompt.len(), "Generating answer");
        let resp = self
            .http
            .post(&self.endpoint)
            .json(&GenerateRequest { model: &self.model, prompt, stream: false })
            .send()
            .await
            .map_err(|e| self.map_error(e))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(GenerationError::Backend(format!("{}: {}", status, body)));
        }

        let parsed: GenerateResponse = resp.json().await.map_err(|e| self.map_error(e))?;
        Ok(parsed.response.trim().to_string())
    }
}
