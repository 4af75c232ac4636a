//! Document Handling Module
//!
//! File discovery, text extraction, chunking, and chunk identity.

pub mod chunker;
pub mod extract;
pub mod identity;

pub use chunker::{chunk, ChunkerConfig, ChunkerError, DEFAULT_MAX_TOKENS, DEFAULT_OVERLAP};
pub use extract::{
    discover_files, ExtractError, PlainTextExtractor, TextExtractor, SUPPORTED_EXTENSIONS,
};
pub use identity::{chunk_identity, IDENTITY_HEX_WIDTH};
