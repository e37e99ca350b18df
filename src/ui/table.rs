use tabled::{settings::Style, Table, Tabled};

use crate::storage::DbStats;
use crate::ui::icons::shape_icon;
use crate::Vector;

#[derive(Tabled)]
struct StatRow {
    #[tabled(rename = "Metric")]
    metric: String,
    #[tabled(rename = "Value")]
    value: String,
}

#[derive(Tabled)]
struct VectorRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Dimensions")]
    dimensions: String,
    #[tabled(rename = "Length")]
    length: usize,
    #[tabled(rename = "Color")]
    color: String,
    #[tabled(rename = "Shape")]
    shape: String,
    #[tabled(rename = "Created")]
    created: String,
}

impl From<&Vector> for VectorRow {
    fn from(vector: &Vector) -> Self {
        Self {
            id: vector.id().map(|id| id.to_string()).unwrap_or_else(|| "-".to_string()),
            dimensions: format!("{:?}", vector.dimensions()),
            length: vector.length(),
            color: vector.color().to_string(),
            shape: format!("{} {}", shape_icon(vector.shape()), vector.shape()),
            created: vector.creation_timestamp().format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

pub fn vector_table(vectors: &[Vector]) -> String {
    if vectors.is_empty() {
        return String::new();
    }
    let rows: Vec<VectorRow> = vectors.iter().map(VectorRow::from).collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

pub fn stats_table(stats: &DbStats) -> String {
    let rows = vec![
        StatRow {
            metric: "Vectors".to_string(),
            value: stats.vectors.to_string(),
        },
        StatRow {
            metric: "Dimension rows".to_string(),
            value: stats.dimension_rows.to_string(),
        },
    ];
    Table::new(rows).with(Style::rounded()).to_string()
}
