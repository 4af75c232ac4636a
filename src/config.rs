//! Runtime Configuration
//!
//! Environment-variable configuration with stated defaults. Every
//! variable is optional; unparseable numeric values fall back to the
//! default with a warning rather than aborting startup.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::warn;

use crate::documents::{ChunkerConfig, DEFAULT_MAX_TOKENS, DEFAULT_OVERLAP};

/// Sentinel model name selecting the in-process feature-hash embedder
/// instead of an Ollama model.
pub const FEATURE_HASH_MODEL: &str = "feature-hash";

/// Process configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Embedding model identifier (`EMBEDDING_MODEL`).
    pub embedding_model: String,
    /// Maximum tokens per chunk (`MAX_CHUNK_TOKENS`).
    pub max_chunk_tokens: usize,
    /// Token overlap between chunks (`CHUNK_OVERLAP`).
    pub chunk_overlap: usize,
    /// Ollama server base URL (`OLLAMA_HOST`).
    pub ollama_host: String,
    /// Generation model (`OLLAMA_MODEL`).
    pub ollama_model: String,
    /// Default collection name (`COLLECTION_NAME`).
    pub collection: String,
    /// Document root directory (`DATA_DIR`).
    pub data_dir: PathBuf,
    /// Chroma server base URL (`CHROMA_URL`).
    pub chroma_url: String,
    /// Generation timeout in seconds (`GENERATE_TIMEOUT_SECS`).
    pub generate_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            embedding_model: "nomic-embed-text".to_string(),
            max_chunk_tokens: DEFAULT_MAX_TOKENS,
            chunk_overlap: DEFAULT_OVERLAP,
            ollama_host: "http://localhost:11434".to_string(),
            ollama_model: "llama3.1:8b".to_string(),
            collection: "docs".to_string(),
            data_dir: PathBuf::from("./data"),
            chroma_url: "http://127.0.0.1:8000".to_string(),
            generate_timeout_secs: 120,
        }
    }
}

impl Config {
    /// Read configuration from the environment, defaulting every unset
    /// variable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            embedding_model: env_string("EMBEDDING_MODEL", defaults.embedding_model),
            max_chunk_tokens: env_parse("MAX_CHUNK_TOKENS", defaults.max_chunk_tokens),
            chunk_overlap: env_parse("CHUNK_OVERLAP", defaults.chunk_overlap),
            ollama_host: env_string("OLLAMA_HOST", defaults.ollama_host),
            ollama_model: env_string("OLLAMA_MODEL", defaults.ollama_model),
            collection: env_string("COLLECTION_NAME", defaults.collection),
            data_dir: PathBuf::from(env_string(
                "DATA_DIR",
                defaults.data_dir.to_string_lossy().into_owned(),
            )),
            chroma_url: env_string("CHROMA_URL", defaults.chroma_url),
            generate_timeout_secs: env_parse(
                "GENERATE_TIMEOUT_SECS",
                defaults.generate_timeout_secs,
            ),
        }
    }

    /// Chunking window from this configuration. Validated by the
    /// pipeline before use.
    pub fn chunker_config(&self) -> ChunkerConfig {
        ChunkerConfig { max_tokens: self.max_chunk_tokens, overlap: self.chunk_overlap }
    }
}

fn env_string(key: &str, default: String) -> String {
    env::var(key).unwrap_or(default)
}

fn env_parse<T: FromStr + Copy>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!(key = key, value = %raw, "Unparseable value, using default");
            default
        }),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.max_chunk_tokens, 220);
        assert_eq!(config.chunk_overlap, 40);
        assert_eq!(config.collection, "docs");
        assert_eq!(config.generate_timeout_secs, 120);
    }

    #[test]
    fn test_chunker_config_mirrors_window() {
        let config = Config { max_chunk_tokens: 100, chunk_overlap: 10, ..Config::default() };
        let window = config.chunker_config();
        assert_eq!(window.max_tokens, 100);
        assert_eq!(window.overlap, 10);
        assert!(window.validate().is_ok());
    }
}
