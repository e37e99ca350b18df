//! Database schema definitions

/// SQL to create the vectors_metadata table
pub const CREATE_VECTORS_METADATA_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS vectors_metadata (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    length INTEGER NOT NULL,
    color TEXT NOT NULL,
    shape TEXT NOT NULL,
    creation_timestamp TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)
"#;

/// SQL to create the vector_dimensions table
/// One row per (vector, dimension index); rows go away with their vector
pub const CREATE_VECTOR_DIMENSIONS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS vector_dimensions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    vector_id INTEGER NOT NULL,
    dimension_index INTEGER NOT NULL,
    dimension_value INTEGER NOT NULL,
    FOREIGN KEY (vector_id) REFERENCES vectors_metadata(id) ON DELETE CASCADE
)
"#;

/// SQL to create indexes
pub const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_vector_dimensions_lookup ON vector_dimensions(dimension_index, dimension_value)",
    "CREATE INDEX IF NOT EXISTS idx_vectors_color ON vectors_metadata(color)",
    "CREATE INDEX IF NOT EXISTS idx_vectors_shape ON vectors_metadata(shape)",
];

pub const INSERT_METADATA: &str = r#"
INSERT INTO vectors_metadata (length, color, shape, creation_timestamp)
VALUES (?1, ?2, ?3, ?4)
"#;

pub const INSERT_DIMENSION: &str = r#"
INSERT INTO vector_dimensions (vector_id, dimension_index, dimension_value)
VALUES (?1, ?2, ?3)
"#;

pub const SELECT_METADATA_BY_ID: &str =
    "SELECT id, length, color, shape, creation_timestamp FROM vectors_metadata WHERE id = ?1";

pub const SELECT_DIMENSIONS_BY_VECTOR_ID: &str = r#"
SELECT id, vector_id, dimension_index, dimension_value
FROM vector_dimensions
WHERE vector_id = ?1
ORDER BY dimension_index ASC
"#;

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    let mut stmts = vec![CREATE_VECTORS_METADATA_TABLE, CREATE_VECTOR_DIMENSIONS_TABLE];
    stmts.extend(CREATE_INDEXES.iter().copied());
    stmts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_come_before_indexes() {
        let stmts = all_schema_statements();
        assert_eq!(stmts.len(), 5);
        assert!(stmts[0].contains("vectors_metadata"));
        assert!(stmts[1].contains("vector_dimensions"));
        assert!(stmts[2..].iter().all(|s| s.starts_with("CREATE INDEX IF NOT EXISTS")));
    }
}
