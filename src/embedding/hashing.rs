//! Feature-Hash Embeddings
//!
//! In-process embeddings using the hashing trick: each token is hashed to
//! a fixed bucket, producing a term-frequency vector without maintaining a
//! vocabulary map. Embeddings are stable — the same text always produces
//! the same vector regardless of what else has been embedded — which makes
//! this gateway suitable for offline use and for deterministic tests.

use async_trait::async_trait;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use super::{l2_normalize, Embedding, EmbeddingError, EmbeddingGateway};

/// Default dimensionality of feature-hash vectors.
pub const HASH_EMBEDDING_DIM: usize = 256;

/// Deterministic in-process embedding gateway.
#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    dim: usize,
}

impl Default for HashingEmbedder {
    fn default() -> Self {
        Self { dim: HASH_EMBEDDING_DIM }
    }
}

impl HashingEmbedder {
    pub fn new(dim: usize) -> Self {
        Self { dim }
    }

    /// Hash a token to a bucket index in `[0, dim)`.
    fn bucket(&self, token: &str) -> usize {
        let mut hasher = DefaultHasher::new();
        token.hash(&mut hasher);
        (hasher.finish() as usize) % self.dim
    }

    /// Embed a single text: lowercase alphanumeric tokens, bucketed term
    /// frequencies, L2-normalized. Text with no tokens maps to the zero
    /// vector.
    fn embed_one(&self, text: &str) -> Embedding {
        let tokens: Vec<String> = text
            .split_whitespace()
            .map(|t| t.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();

        let mut tf = vec![0.0f32; self.dim];
        for token in &tokens {
            tf[self.bucket(token)] += 1.0;
        }

        l2_normalize(&mut tf);
        tf
    }
}

#[async_trait]
impl EmbeddingGateway for HashingEmbedder {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Embedding>, EmbeddingError> {
        Ok(texts.iter().map(|t| self.embed_one(t)).collect())
    }
}
