//! Storage Layer - SQLite-backed persistence
//!
//! A vector is stored as:
//! - vectors_metadata(id, length, color, shape, creation_timestamp)
//! - vector_dimensions(vector_id, dimension_index, dimension_value), five rows per vector

pub mod schema;
pub mod sqlite;

pub use sqlite::{ConnectionPolicy, DbStats, StoreOptions, VectorStore};
