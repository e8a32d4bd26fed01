//! Derived projections over a [`Schema`] for the schema visualiser.
//!
//! Every operation is a pure function of its input: nothing is cached and
//! nothing outside the argument is read, so the engine can be shared freely
//! between requests.

mod distribution;
mod relationships;
mod size;

use serde::{Deserialize, Serialize};

use crate::schema::Schema;

pub use distribution::{TableColumnStats, TypeCounts};
pub use relationships::{RelationshipCount, RelationshipDetail, RelationshipMatrix, TableMatch};
pub use size::{DEFAULT_BYTES_PER_CELL, SizeShare, TableSize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaStatsEngine {
    table_match: TableMatch,
    bytes_per_cell: u64,
}

impl Default for SchemaStatsEngine {
    fn default() -> Self {
        Self::new(TableMatch::Exact, DEFAULT_BYTES_PER_CELL)
    }
}

impl SchemaStatsEngine {
    pub fn new(table_match: TableMatch, bytes_per_cell: u64) -> Self {
        Self {
            table_match,
            bytes_per_cell,
        }
    }

    pub fn table_match(&self) -> TableMatch {
        self.table_match
    }

    pub fn bytes_per_cell(&self) -> u64 {
        self.bytes_per_cell
    }

    /// Computes every projection in one pass over the API surface.
    pub fn report(&self, schema: &Schema) -> SchemaReport {
        let size_ranking = self.size_ranking(schema);
        let size_shares = self.size_shares(&size_ranking);
        SchemaReport {
            table_count: schema.tables.len(),
            column_count: schema.column_count(),
            relationship_count: schema.relationships.len(),
            column_types: self.column_type_distribution(schema),
            tables: self.table_column_stats(schema),
            relationship_counts: self.relationship_counts(schema),
            relationship_matrix: self.relationship_matrix(schema),
            relationships: self.relationship_details(schema),
            size_ranking,
            size_shares,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaReport {
    pub table_count: usize,
    pub column_count: usize,
    pub relationship_count: usize,
    pub column_types: TypeCounts,
    pub tables: Vec<TableColumnStats>,
    pub relationship_counts: Vec<RelationshipCount>,
    pub relationship_matrix: RelationshipMatrix,
    pub relationships: Vec<RelationshipDetail>,
    pub size_ranking: Vec<TableSize>,
    pub size_shares: Vec<SizeShare>,
}
