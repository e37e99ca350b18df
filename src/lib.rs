//! # vecstore - integer vectors in SQLite
//!
//! Stores short integer vectors tagged with a color and a shape, and serves
//! them over HTTP.
//!
//! vecstore provides:
//! - A `Vector` entity with JSON serialization
//! - SQLite storage splitting each vector into a metadata row and five dimension rows
//! - An axum HTTP API (`POST /vectors/`, `GET /vectors/{id}`)
//! - A random vector generator for seeding demo databases

pub mod vector;
pub mod generator;
pub mod storage;
pub mod server;
pub mod config;
pub mod ui;

// Re-exports for convenient access
pub use vector::{Vector, PERSISTED_DIMENSIONS};
pub use storage::{ConnectionPolicy, StoreOptions, VectorStore};

/// Result type alias for vecstore operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for vecstore operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("No active database connection: {0}")]
    NotConnected(String),

    #[error("Invalid stored timestamp: {0}")]
    InvalidTimestamp(String),
}
