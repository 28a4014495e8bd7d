#![forbid(unsafe_code)]
//! shelf-core library.
//!
//! Document model, configuration, error codes, and the SQLite-backed
//! document repository.
//!
//! # Conventions
//!
//! - **Errors**: Use `anyhow::Result` for return types.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod config;
pub mod db;
pub mod error;
pub mod model;
