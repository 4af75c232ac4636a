//! Embedding Gateway
//!
//! Abstract capability turning text into fixed-dimension vectors. The
//! vector dimension is fixed by whichever gateway is constructed for the
//! process lifetime; all gateways return L2-normalized vectors so cosine
//! similarity reduces to a dot product.

use async_trait::async_trait;
use thiserror::Error;

pub mod hashing;
pub mod ollama;

pub use hashing::HashingEmbedder;
pub use ollama::OllamaEmbedder;

/// Embedding vector.
pub type Embedding = Vec<f32>;

#[derive(Error, Debug)]
pub enum EmbeddingError {
    #[error("embedding HTTP error: {0}")]
    Http(String),
    #[error("embedding backend error: {0}")]
    Backend(String),
    #[error("embedding batch mismatch: sent {sent} texts, received {received} vectors")]
    BatchMismatch { sent: usize, received: usize },
}

/// Batched text-to-vector capability.
#[async_trait]
pub trait EmbeddingGateway: Send + Sync {
    /// Embed a batch of texts. The result has the same length and order
    /// as the input; every vector is L2-normalized.
    async fn embed(&self, texts: &[String]) -> Result<Vec<Embedding>, EmbeddingError>;
}

/// Scale `vector` to unit L2 norm in place. Zero vectors are left as-is.
pub fn l2_normalize(vector: &mut [f32]) {
    let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in vector.iter_mut() {
            *x /= norm;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_l2_normalize_unit_norm() {
        let mut v = vec![3.0, 4.0];
        l2_normalize(&mut v);
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-6);
        assert!((v[0] - 0.6).abs() < 1e-6);
        assert!((v[1] - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_l2_normalize_leaves_zero_vector() {
        let mut v = vec![0.0, 0.0, 0.0];
        l2_normalize(&mut v);
        assert_eq!(v, vec![0.0, 0.0, 0.0]);
    }
}
