//! Ingestion and Retrieval Pipelines
//!
//! Orchestrates the write path (discover → extract → chunk → embed →
//! upsert) and the read path (embed query → nearest neighbors → grounded
//! answer). Collaborating services are injected as capability traits so
//! concrete backends can be swapped without touching pipeline logic.

use thiserror::Error;

pub mod answer;
pub mod ingest;
pub mod retrieve;

pub use answer::{compose_prompt, AnswerComposer, GroundedAnswer};
pub use ingest::{IngestReport, Ingestor};
pub use retrieve::{Evidence, Retriever};

use crate::documents::ChunkerError;
use crate::embedding::EmbeddingError;
use crate::generation::GenerationError;
use crate::index::IndexError;

/// Failures surfaced by the pipeline entry points.
///
/// Per-file problems during ingestion (empty extraction, a batch-length
/// mismatch) skip that file and are logged, not returned; what reaches
/// the caller is either an invalid configuration or a collaborating
/// service failing. Generation timeouts stay distinguishable through
/// [`GenerationError::Timeout`].
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("chunking configuration: {0}")]
    Configuration(#[from] ChunkerError),
    #[error("embedding service: {0}")]
    Embedding(#[from] EmbeddingError),
    #[error("index store: {0}")]
    Index(#[from] IndexError),
    #[error("generation backend: {0}")]
    Generation(#[from] GenerationError),
}
