// Grounder Library
// Exports the ingestion and retrieval pipelines for use by the CLI binary
// and by embedding hosts.

pub mod chroma;
pub mod config;
pub mod documents;
pub mod embedding;
pub mod generation;
pub mod index;
pub mod pipeline;

// Re-export commonly used types
pub use config::{Config, FEATURE_HASH_MODEL};

pub use documents::{
    chunk, chunk_identity, discover_files, ChunkerConfig, ChunkerError, ExtractError,
    PlainTextExtractor, TextExtractor, SUPPORTED_EXTENSIONS,
};

pub use embedding::{
    Embedding, EmbeddingError, EmbeddingGateway, HashingEmbedder, OllamaEmbedder,
};

pub use generation::{GenerationError, Generator, OllamaGenerator};

pub use index::{
    ChromaIndex, ChunkMetadata, CollectionStatus, IndexError, IndexMatch, VectorIndex,
};

pub use chroma::{ChromaClient, ChromaError};

pub use pipeline::{
    compose_prompt, AnswerComposer, Evidence, GroundedAnswer, IngestReport, Ingestor,
    PipelineError, Retriever,
};
