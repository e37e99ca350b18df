//! SQLite storage implementation

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use rusqlite::{params, Connection, Params, Row, Transaction};
use serde::{Deserialize, Serialize};

use super::schema;
use crate::vector::{fixed_width_dimensions, DimensionRow, Vector, VectorMetadataRow};
use crate::{Error, Result};

/// Busy timeout applied to every connection
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(10);

/// How long a connection lives.
///
/// `Persistent` keeps one connection from `connect()` until `close()`, so
/// callers sharing the store must serialize access. `PerOperation` opens a
/// fresh connection for each call and never holds one between calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionPolicy {
    #[default]
    Persistent,
    PerOperation,
}

impl ConnectionPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionPolicy::Persistent => "persistent",
            ConnectionPolicy::PerOperation => "per_operation",
        }
    }
}

impl FromStr for ConnectionPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "persistent" | "shared" => Ok(ConnectionPolicy::Persistent),
            "per_operation" | "per_call" => Ok(ConnectionPolicy::PerOperation),
            _ => Err(Error::Validation(format!("Unknown connection policy: {}", s))),
        }
    }
}

impl std::fmt::Display for ConnectionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Connection settings for a [`VectorStore`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreOptions {
    pub policy: ConnectionPolicy,
    pub busy_timeout: Duration,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            policy: ConnectionPolicy::default(),
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        }
    }
}

#[derive(Debug, Clone)]
enum Location {
    File(PathBuf),
    Memory,
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Location::File(path) => write!(f, "{}", path.display()),
            Location::Memory => write!(f, ":memory:"),
        }
    }
}

/// SQLite-backed storage for vectors
pub struct VectorStore {
    location: Location,
    options: StoreOptions,
    conn: Option<Connection>,
}

impl VectorStore {
    /// Create a disconnected store for a database file
    pub fn new(path: impl AsRef<Path>, options: StoreOptions) -> Self {
        let location = Location::File(path.as_ref().to_path_buf());
        tracing::debug!("VectorStore created for {} ({})", location, options.policy);
        Self {
            location,
            options,
            conn: None,
        }
    }

    /// Open a database file (creates if doesn't exist), connect and create the schema
    pub fn open(path: impl AsRef<Path>, options: StoreOptions) -> Result<Self> {
        let mut store = Self::new(path, options);
        store.connect()?;
        store.create_tables()?;
        Ok(store)
    }

    /// Open an in-memory database (for testing)
    ///
    /// In-memory data only lives as long as its connection, so the policy is
    /// always `Persistent`.
    pub fn open_in_memory() -> Result<Self> {
        let mut store = Self {
            location: Location::Memory,
            options: StoreOptions::default(),
            conn: None,
        };
        store.connect()?;
        store.create_tables()?;
        Ok(store)
    }

    pub fn policy(&self) -> ConnectionPolicy {
        self.options.policy
    }

    /// Whether a long-lived connection is currently held
    pub fn is_connected(&self) -> bool {
        self.conn.is_some()
    }

    // ========== Connection Lifecycle ==========

    /// Open the long-lived connection.
    ///
    /// A no-op under `PerOperation`, where every call connects on its own.
    pub fn connect(&mut self) -> Result<()> {
        if self.options.policy == ConnectionPolicy::PerOperation {
            tracing::debug!("Per-operation policy, not holding a connection to {}", self.location);
            return Ok(());
        }
        if self.conn.is_some() {
            tracing::debug!("Already connected to {}", self.location);
            return Ok(());
        }

        self.conn = Some(self.open_connection()?);
        tracing::info!("Connected to database: {}", self.location);
        Ok(())
    }

    /// Close the long-lived connection.
    ///
    /// A no-op under `PerOperation`, which never holds one.
    pub fn close(&mut self) -> Result<()> {
        if self.options.policy == ConnectionPolicy::PerOperation {
            tracing::debug!("Per-operation policy, no connection to close for {}", self.location);
            return Ok(());
        }
        match self.conn.take() {
            Some(conn) => {
                conn.close().map_err(|(_, e)| {
                    tracing::error!("Failed to close database connection: {}", e);
                    Error::Storage(e)
                })?;
                tracing::info!("Database connection closed");
            }
            None => {
                tracing::warn!("Attempt to close database unsuccessful, no active connection found");
            }
        }
        Ok(())
    }

    fn open_connection(&self) -> Result<Connection> {
        let conn = match &self.location {
            Location::File(path) => Connection::open(path),
            Location::Memory => Connection::open_in_memory(),
        }
        .inspect_err(|e| tracing::error!("Database connection error: {}", e))?;

        conn.busy_timeout(self.options.busy_timeout)?;
        conn.pragma_update(None, "foreign_keys", true)?;
        Ok(conn)
    }

    /// Run `f` against a connection chosen by the store's policy
    fn with_connection<T>(
        &mut self,
        operation: &str,
        f: impl FnOnce(&mut Connection) -> Result<T>,
    ) -> Result<T> {
        match self.options.policy {
            ConnectionPolicy::Persistent => {
                let conn = self.conn.as_mut().ok_or_else(|| {
                    tracing::error!("No active database connection, cannot {}", operation);
                    Error::NotConnected(format!("cannot {}, call connect() first", operation))
                })?;
                f(conn)
            }
            ConnectionPolicy::PerOperation => {
                let mut conn = self.open_connection()?;
                f(&mut conn)
            }
        }
    }

    // ========== Generic Statements ==========

    /// Execute one parameterized statement in its own transaction
    pub fn execute_query<P: Params>(&mut self, sql: &str, params: P) -> Result<usize> {
        tracing::debug!("Executing query: {}", sql.trim());
        self.with_connection("execute query", |conn| {
            let changed = in_transaction(conn, |tx| tx.execute(sql, params))
                .inspect_err(|e| tracing::error!("Error occurred while executing query: {}", e))?;
            tracing::info!("Query executed, {} row(s) changed", changed);
            Ok(changed)
        })
    }

    /// Run one parameterized query and map every result row
    pub fn fetch_query<T, P, F>(&mut self, sql: &str, params: P, map_row: F) -> Result<Vec<T>>
    where
        P: Params,
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        tracing::debug!("Fetching data with query: {}", sql.trim());
        self.with_connection("fetch query", |conn| {
            let rows = conn
                .prepare(sql)
                .and_then(|mut stmt| {
                    let rows = stmt
                        .query_map(params, map_row)?
                        .collect::<rusqlite::Result<Vec<T>>>();
                    rows
                })
                .inspect_err(|e| tracing::error!("An error occurred while fetching data: {}", e))?;
            tracing::debug!("Fetched {} row(s)", rows.len());
            Ok(rows)
        })
    }

    // ========== Schema ==========

    /// Create tables and indexes if they do not exist
    pub fn create_tables(&mut self) -> Result<()> {
        tracing::debug!("Attempting to create tables in {}", self.location);
        self.with_connection("create tables", |conn| {
            in_transaction(conn, |tx| {
                for stmt in schema::all_schema_statements() {
                    tx.execute(stmt, [])?;
                }
                Ok(())
            })
            .inspect_err(|e| tracing::error!("An error occurred while creating tables: {}", e))?;
            tracing::info!("Vector tables and indexes are in place");
            Ok(())
        })
    }

    // ========== Vector Operations ==========

    /// Persist a vector and return its new id.
    ///
    /// Writes the metadata row and exactly five dimension rows in one
    /// transaction; nothing is written if any statement fails.
    pub fn insert_vector_data(&mut self, vector: &Vector) -> Result<i64> {
        tracing::debug!("Inserting vector data: {}", vector);
        let dimensions = fixed_width_dimensions(vector.dimensions());

        self.with_connection("insert vector data", |conn| {
            let vector_id = in_transaction(conn, |tx| {
                tx.execute(
                    schema::INSERT_METADATA,
                    params![
                        vector.length() as i64,
                        vector.color(),
                        vector.shape(),
                        vector.creation_timestamp().to_rfc3339(),
                    ],
                )?;
                let vector_id = tx.last_insert_rowid();

                let mut stmt = tx.prepare(schema::INSERT_DIMENSION)?;
                for (index, value) in dimensions.iter().enumerate() {
                    stmt.execute(params![vector_id, index as i64, value])?;
                }
                Ok(vector_id)
            })
            .inspect_err(|e| tracing::error!("An error occurred while inserting vector data: {}", e))?;

            tracing::info!("Inserted vector {} with {} dimension rows", vector_id, dimensions.len());
            Ok(vector_id)
        })
    }

    /// Get the metadata row of a vector
    pub fn get_vector_metadata_by_id(&mut self, vector_id: i64) -> Result<Option<VectorMetadataRow>> {
        tracing::debug!("Fetching vector metadata with ID: {}", vector_id);
        let mut rows = self.fetch_query(schema::SELECT_METADATA_BY_ID, [vector_id], row_to_metadata)?;
        if rows.is_empty() {
            tracing::warn!("No vector found with ID: {}", vector_id);
            return Ok(None);
        }
        Ok(Some(rows.swap_remove(0)))
    }

    /// Get the dimension rows of a vector, ordered by dimension index
    pub fn get_vector_dimensions_by_id(&mut self, vector_id: i64) -> Result<Vec<DimensionRow>> {
        tracing::debug!("Fetching dimensions with vector ID: {}", vector_id);
        let rows = self.fetch_query(schema::SELECT_DIMENSIONS_BY_VECTOR_ID, [vector_id], row_to_dimension)?;
        if rows.is_empty() {
            tracing::warn!("No dimensions found for vector ID: {}", vector_id);
        }
        Ok(rows)
    }

    /// Fetch and rebuild a full vector.
    ///
    /// Returns `None` unless both the metadata row and the dimension rows exist.
    pub fn get_full_vector_data_by_id(&mut self, vector_id: i64) -> Result<Option<Vector>> {
        tracing::debug!("Fetching full vector data for ID: {}", vector_id);
        let metadata = self.get_vector_metadata_by_id(vector_id)?;
        let dimensions = self.get_vector_dimensions_by_id(vector_id)?;

        match metadata {
            Some(metadata) if !dimensions.is_empty() => Vector::from_rows(&metadata, &dimensions).map(Some),
            None if dimensions.is_empty() => Ok(None),
            metadata => {
                tracing::warn!(
                    "Incomplete data for vector id: {}, metadata: {}, dimension rows: {}",
                    vector_id,
                    metadata.is_some(),
                    dimensions.len()
                );
                Ok(None)
            }
        }
    }

    // ========== Statistics ==========

    /// Count stored vectors
    pub fn count_vectors(&mut self) -> Result<usize> {
        self.count_rows("SELECT COUNT(*) FROM vectors_metadata")
    }

    /// Count stored dimension rows
    pub fn count_dimension_rows(&mut self) -> Result<usize> {
        self.count_rows("SELECT COUNT(*) FROM vector_dimensions")
    }

    fn count_rows(&mut self, sql: &str) -> Result<usize> {
        let count: i64 = self.with_connection("count rows", |conn| {
            Ok(conn.query_row(sql, [], |row| row.get(0))?)
        })?;
        Ok(count as usize)
    }

    /// Get database statistics
    pub fn stats(&mut self) -> Result<DbStats> {
        Ok(DbStats {
            vectors: self.count_vectors()?,
            dimension_rows: self.count_dimension_rows()?,
        })
    }
}

/// Run `f` in a transaction: commit on success, explicit rollback on failure
fn in_transaction<T>(
    conn: &mut Connection,
    f: impl FnOnce(&Transaction<'_>) -> rusqlite::Result<T>,
) -> rusqlite::Result<T> {
    let tx = conn.transaction()?;
    match f(&tx) {
        Ok(value) => {
            tx.commit()?;
            Ok(value)
        }
        Err(e) => {
            if let Err(rollback_err) = tx.rollback() {
                tracing::error!("Rollback failed: {}", rollback_err);
            } else {
                tracing::debug!("Transaction rolled back");
            }
            Err(e)
        }
    }
}

fn row_to_metadata(row: &Row<'_>) -> rusqlite::Result<VectorMetadataRow> {
    Ok(VectorMetadataRow {
        id: row.get(0)?,
        length: row.get(1)?,
        color: row.get(2)?,
        shape: row.get(3)?,
        creation_timestamp: row.get(4)?,
    })
}

fn row_to_dimension(row: &Row<'_>) -> rusqlite::Result<DimensionRow> {
    Ok(DimensionRow {
        id: row.get(0)?,
        vector_id: row.get(1)?,
        dimension_index: row.get(2)?,
        dimension_value: row.get(3)?,
    })
}

/// Database statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DbStats {
    pub vectors: usize,
    pub dimension_rows: usize,
}
