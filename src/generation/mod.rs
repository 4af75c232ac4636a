//! Generation Backend
//!
//! Abstract capability turning a prompt into text, bounded by a
//! configurable timeout. Timeouts are surfaced as their own error variant
//! so callers can retry generation without re-running retrieval.

use async_trait::async_trait;
use thiserror::Error;

pub mod ollama;

pub use ollama::OllamaGenerator;

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("generation timed out after {0} seconds")]
    Timeout(u64),
    #[error("generation HTTP error: {0}")]
    Http(String),
    #[error("generation backend error: {0}")]
    Backend(String),
}

/// Prompt-to-text capability.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}
