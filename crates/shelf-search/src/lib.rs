#![forbid(unsafe_code)]
//! shelf-search library.
//!
//! Retrieval and ranking engine: text normalization, a TF-IDF vector index
//! with cosine-similarity semantic search, and fusion of lexical and
//! semantic result sets into one deduplicated ranked list.
//!
//! # Conventions
//!
//! - **Errors**: Use `anyhow::Result` for return types.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod fusion;
pub mod normalize;
pub mod semantic;
