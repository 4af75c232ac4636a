//! Chroma Vector Database Integration
//!
//! HTTP client for Chroma's REST API, the persistent store behind the
//! index capability.

pub mod client;

pub use client::{ChromaClient, ChromaError, ChromaQueryResult, CollectionInfo};
