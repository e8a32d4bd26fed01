use serde::{Deserialize, Serialize};

use crate::schema::Schema;

use super::SchemaStatsEngine;

/// Illustrative bytes per cell used by the storage estimate.
pub const DEFAULT_BYTES_PER_CELL: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableSize {
    pub name: String,
    pub row_count: u64,
    pub column_count: usize,
    pub estimated_bytes: u64,
}

impl TableSize {
    pub fn estimated_kib(&self) -> f64 {
        self.estimated_bytes as f64 / 1024.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeShare {
    pub name: String,
    pub estimated_bytes: u64,
    pub percent: f64,
}

impl SchemaStatsEngine {
    /// Tables ordered by descending row count; ties keep schema order.
    ///
    /// The byte estimate is `rows * columns * bytes_per_cell`, a placeholder
    /// rather than a storage model.
    pub fn size_ranking(&self, schema: &Schema) -> Vec<TableSize> {
        let mut sizes: Vec<TableSize> = schema
            .tables
            .iter()
            .map(|table| TableSize {
                name: table.name.clone(),
                row_count: table.row_count,
                column_count: table.columns.len(),
                estimated_bytes: table
                    .row_count
                    .saturating_mul(table.columns.len() as u64)
                    .saturating_mul(self.bytes_per_cell),
            })
            .collect();

        sizes.sort_by(|a, b| b.row_count.cmp(&a.row_count));
        sizes
    }

    /// Percent of the summed estimate per table. A zero total yields 0% everywhere.
    pub fn size_shares(&self, ranking: &[TableSize]) -> Vec<SizeShare> {
        let total: u64 = ranking
            .iter()
            .fold(0u64, |acc, size| acc.saturating_add(size.estimated_bytes));

        ranking
            .iter()
            .map(|size| SizeShare {
                name: size.name.clone(),
                estimated_bytes: size.estimated_bytes,
                percent: if total == 0 {
                    0.0
                } else {
                    size.estimated_bytes as f64 * 100.0 / total as f64
                },
            })
            .collect()
    }
}
