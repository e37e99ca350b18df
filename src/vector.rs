//! Vector entity
//!
//! A `Vector` is a list of integer dimensions tagged with a color and a shape.
//! It is persisted as one metadata row plus a fixed number of dimension rows
//! (see [`PERSISTED_DIMENSIONS`]) and rebuilt from those rows on fetch.

use crate::{Error, Result};
use chrono::{DateTime, NaiveDateTime, Utc};

/// Number of dimension rows written for every persisted vector.
///
/// Shorter vectors are zero-padded and longer ones truncated, so the stored
/// form only reproduces vectors of exactly this width.
pub const PERSISTED_DIMENSIONS: usize = 5;

/// An integer vector with color/shape metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vector {
    id: Option<i64>,
    dimensions: Vec<i64>,
    color: String,
    shape: String,
    length: usize,
    creation_timestamp: DateTime<Utc>,
}

impl Vector {
    /// Create a vector stamped with the current UTC time
    pub fn new(dimensions: Vec<i64>, color: impl Into<String>, shape: impl Into<String>) -> Self {
        Self::with_timestamp(dimensions, color, shape, Utc::now())
    }

    /// Create a vector with an explicit creation timestamp
    pub fn with_timestamp(
        dimensions: Vec<i64>,
        color: impl Into<String>,
        shape: impl Into<String>,
        creation_timestamp: DateTime<Utc>,
    ) -> Self {
        let length = dimensions.len();
        Self {
            id: None,
            dimensions,
            color: color.into(),
            shape: shape.into(),
            length,
            creation_timestamp,
        }
    }

    /// Rebuild a vector from its persisted rows.
    ///
    /// Dimension values are taken in ascending `dimension_index` order and the
    /// id is restored from the metadata row. The result carries the persisted
    /// (fixed-width) dimensions, not the list the vector was created with,
    /// so `length` is the persisted width rather than `metadata.length`.
    pub fn from_rows(metadata: &VectorMetadataRow, dimension_rows: &[DimensionRow]) -> Result<Self> {
        tracing::debug!(
            "Loading vector {} from {} dimension rows",
            metadata.id,
            dimension_rows.len()
        );

        let mut ordered: Vec<&DimensionRow> = dimension_rows.iter().collect();
        ordered.sort_by_key(|row| row.dimension_index);
        let dimensions = ordered.iter().map(|row| row.dimension_value).collect();

        let timestamp = parse_timestamp(&metadata.creation_timestamp)?;

        let mut vector = Self::with_timestamp(
            dimensions,
            metadata.color.clone(),
            metadata.shape.clone(),
            timestamp,
        );
        vector.id = Some(metadata.id);
        Ok(vector)
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    /// Record the id assigned by storage
    pub fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    pub fn dimensions(&self) -> &[i64] {
        &self.dimensions
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn shape(&self) -> &str {
        &self.shape
    }

    /// Dimension count at construction time
    pub fn length(&self) -> usize {
        self.length
    }

    pub fn creation_timestamp(&self) -> DateTime<Utc> {
        self.creation_timestamp
    }

    /// JSON form used by the HTTP API and `get --format json`
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "id": self.id,
            "dimensions": self.dimensions,
            "color": self.color,
            "shape": self.shape,
            "length": self.length,
            "creation_timestamp": self.creation_timestamp.to_rfc3339(),
        })
    }
}

impl std::fmt::Display for Vector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Vector(dimensions={:?}, color='{}', shape='{}', length={}, creation_timestamp='{}')",
            self.dimensions,
            self.color,
            self.shape,
            self.length,
            self.creation_timestamp.to_rfc3339()
        )
    }
}

/// Row of the `vectors_metadata` table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VectorMetadataRow {
    pub id: i64,
    pub length: i64,
    pub color: String,
    pub shape: String,
    pub creation_timestamp: String,
}

/// Row of the `vector_dimensions` table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DimensionRow {
    pub id: i64,
    pub vector_id: i64,
    pub dimension_index: i64,
    pub dimension_value: i64,
}

/// Pad with zeros or truncate to [`PERSISTED_DIMENSIONS`] values
pub fn fixed_width_dimensions(dimensions: &[i64]) -> [i64; PERSISTED_DIMENSIONS] {
    let mut fixed = [0i64; PERSISTED_DIMENSIONS];
    for (slot, value) in fixed.iter_mut().zip(dimensions) {
        *slot = *value;
    }
    fixed
}

/// Parse a dimension list such as `1,2,3` or `[1, 2, 3]`.
///
/// Every element must be an integer; anything else is a validation error.
pub fn parse_dimensions(input: &str) -> Result<Vec<i64>> {
    let trimmed = input.trim();
    let inner = trimmed
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .unwrap_or(trimmed)
        .trim();

    if inner.is_empty() {
        return Ok(Vec::new());
    }

    inner
        .split(',')
        .map(|part| {
            let part = part.trim();
            part.parse::<i64>().map_err(|_| {
                Error::Validation(format!("Dimensions must be a list of integers, got '{}'", part))
            })
        })
        .collect()
}

/// Parse a stored timestamp.
///
/// Accepts RFC 3339 (what this crate writes) and SQLite's
/// `CURRENT_TIMESTAMP` format, which is UTC without an offset.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|e| Error::InvalidTimestamp(format!("{}: {}", raw, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn metadata(id: i64, timestamp: &str) -> VectorMetadataRow {
        VectorMetadataRow {
            id,
            length: 3,
            color: "red".to_string(),
            shape: "circle".to_string(),
            creation_timestamp: timestamp.to_string(),
        }
    }

    fn dimension(vector_id: i64, index: i64, value: i64) -> DimensionRow {
        DimensionRow {
            id: index + 1,
            vector_id,
            dimension_index: index,
            dimension_value: value,
        }
    }

    #[test]
    fn test_length_is_dimension_count() {
        for dims in [vec![], vec![1], vec![5, 1, 9], vec![1, 2, 3, 4, 5, 6, 7]] {
            let vector = Vector::new(dims.clone(), "red", "circle");
            assert_eq!(vector.length(), dims.len());
            assert_eq!(vector.to_json()["length"], dims.len());
        }
    }

    #[test]
    fn test_new_vector_has_no_id() {
        let vector = Vector::new(vec![1, 2], "blue", "square");
        assert_eq!(vector.id(), None);
        assert!(vector.to_json()["id"].is_null());
    }

    #[test]
    fn test_to_json_keys() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();
        let mut vector = Vector::with_timestamp(vec![5, 1, 9], "red", "circle", ts);
        vector.set_id(7);

        let json = vector.to_json();
        assert_eq!(json["id"], 7);
        assert_eq!(json["dimensions"], serde_json::json!([5, 1, 9]));
        assert_eq!(json["color"], "red");
        assert_eq!(json["shape"], "circle");
        assert_eq!(json["creation_timestamp"], "2024-03-01T12:30:00+00:00");
    }

    #[test]
    fn test_fixed_width_pads_short_vectors() {
        assert_eq!(fixed_width_dimensions(&[3, 7]), [3, 7, 0, 0, 0]);
        assert_eq!(fixed_width_dimensions(&[]), [0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_fixed_width_truncates_long_vectors() {
        assert_eq!(fixed_width_dimensions(&[1, 2, 3, 4, 5, 6, 7]), [1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_parse_dimensions() {
        assert_eq!(parse_dimensions("1,2,3").unwrap(), vec![1, 2, 3]);
        assert_eq!(parse_dimensions("[4, -5, 6]").unwrap(), vec![4, -5, 6]);
        assert_eq!(parse_dimensions("[]").unwrap(), Vec::<i64>::new());
    }

    #[test]
    fn test_parse_dimensions_rejects_non_integers() {
        assert!(matches!(parse_dimensions("1,2.5,3"), Err(Error::Validation(_))));
        assert!(matches!(parse_dimensions("a,b"), Err(Error::Validation(_))));
    }

    #[test]
    fn test_from_rows_orders_by_index() {
        let rows = vec![dimension(4, 2, 9), dimension(4, 0, 5), dimension(4, 1, 1)];
        let vector = Vector::from_rows(&metadata(4, "2024-03-01 12:30:00"), &rows).unwrap();

        assert_eq!(vector.id(), Some(4));
        assert_eq!(vector.dimensions(), &[5, 1, 9]);
        assert_eq!(vector.color(), "red");
        assert_eq!(vector.shape(), "circle");
        assert_eq!(
            vector.creation_timestamp(),
            Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();
        assert_eq!(parse_timestamp("2024-03-01 12:30:00").unwrap(), expected);
        assert_eq!(parse_timestamp("2024-03-01T12:30:00+00:00").unwrap(), expected);
        assert_eq!(parse_timestamp("2024-03-01T14:30:00+02:00").unwrap(), expected);
    }

    #[test]
    fn test_from_rows_rejects_bad_timestamp() {
        let result = Vector::from_rows(&metadata(1, "yesterday"), &[dimension(1, 0, 1)]);
        assert!(matches!(result, Err(Error::InvalidTimestamp(_))));
    }
}
