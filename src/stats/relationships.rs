use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::schema::{ColumnRef, Relationship, Schema};

use super::SchemaStatsEngine;

/// How a relationship endpoint is attributed to a table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TableMatch {
    /// The text before the first `.` must equal the table name.
    #[default]
    Exact,
    /// Legacy behaviour for the matrix and table filters: the endpoint only
    /// has to start with the table name, so `User` also claims
    /// `UserProfile.id`. Relationship counts keep comparing whole names.
    Prefix,
}

impl TableMatch {
    pub fn as_str(self) -> &'static str {
        match self {
            TableMatch::Exact => "exact",
            TableMatch::Prefix => "prefix",
        }
    }

    pub fn matches(self, endpoint: &str, table: &str) -> bool {
        match self {
            TableMatch::Exact => ColumnRef::parse(endpoint).is_some_and(|r| r.table == table),
            TableMatch::Prefix => endpoint.starts_with(table),
        }
    }

    /// Table an endpoint is counted against in [`SchemaStatsEngine::relationship_counts`].
    ///
    /// Counts always compare the component before the first `.`. Under
    /// `Prefix` an endpoint without a delimiter names a table by itself.
    pub fn owner(self, endpoint: &str) -> Option<&str> {
        match self {
            TableMatch::Exact => ColumnRef::parse(endpoint).map(|r| r.table),
            TableMatch::Prefix => Some(
                endpoint
                    .split_once(ColumnRef::DELIMITER)
                    .map_or(endpoint, |(table, _)| table),
            ),
        }
    }
}

impl std::str::FromStr for TableMatch {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.to_ascii_lowercase().as_str() {
            "exact" => Ok(TableMatch::Exact),
            "prefix" => Ok(TableMatch::Prefix),
            other => Err(format!("unsupported table match mode: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipCount {
    pub name: String,
    pub incoming: usize,
    pub outgoing: usize,
    pub total: usize,
}

/// Square grid indexed by table position; symmetric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipMatrix {
    pub tables: Vec<String>,
    pub cells: Vec<Vec<usize>>,
}

impl RelationshipMatrix {
    pub fn get(&self, row: usize, col: usize) -> Option<usize> {
        self.cells.get(row).and_then(|cells| cells.get(col)).copied()
    }

    pub fn size(&self) -> usize {
        self.tables.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipDetail {
    pub from: String,
    pub to: String,
    pub source_table: Option<String>,
    pub source_column: Option<String>,
    pub target_table: Option<String>,
    pub target_column: Option<String>,
}

impl RelationshipDetail {
    fn from_relationship(relationship: &Relationship) -> Self {
        let source = relationship.source();
        let target = relationship.target();
        Self {
            from: relationship.from.clone(),
            to: relationship.to.clone(),
            source_table: source.map(|r| r.table.to_string()),
            source_column: source.map(|r| r.column.to_string()),
            target_table: target.map(|r| r.table.to_string()),
            target_column: target.map(|r| r.column.to_string()),
        }
    }
}

/// Table name to schema positions. Duplicate names map to every position they occupy.
struct TableIndex<'a> {
    names: Vec<&'a str>,
    positions: HashMap<&'a str, Vec<usize>>,
}

impl<'a> TableIndex<'a> {
    fn new(schema: &'a Schema) -> Self {
        let names: Vec<&str> = schema.tables.iter().map(|t| t.name.as_str()).collect();
        let mut positions: HashMap<&str, Vec<usize>> = HashMap::with_capacity(names.len());
        for (position, name) in names.iter().enumerate() {
            positions.entry(*name).or_default().push(position);
        }
        Self { names, positions }
    }

    fn named(&self, name: &str) -> &[usize] {
        self.positions.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    fn matching(&self, table_match: TableMatch, endpoint: &str) -> Vec<usize> {
        match table_match {
            TableMatch::Exact => ColumnRef::parse(endpoint)
                .map(|r| self.named(r.table).to_vec())
                .unwrap_or_default(),
            TableMatch::Prefix => self
                .names
                .iter()
                .enumerate()
                .filter(|(_, name)| endpoint.starts_with(**name))
                .map(|(position, _)| position)
                .collect(),
        }
    }
}

impl SchemaStatsEngine {
    /// Incoming/outgoing counts per table, in schema order.
    ///
    /// Tables without relationships still get a zeroed record. Endpoints that
    /// name no table contribute nothing.
    pub fn relationship_counts(&self, schema: &Schema) -> Vec<RelationshipCount> {
        let mut counts: Vec<RelationshipCount> = schema
            .tables
            .iter()
            .map(|table| RelationshipCount {
                name: table.name.clone(),
                incoming: 0,
                outgoing: 0,
                total: 0,
            })
            .collect();

        let index = TableIndex::new(schema);
        for relationship in &schema.relationships {
            if let Some(source) = self.table_match.owner(&relationship.from) {
                for &position in index.named(source) {
                    counts[position].outgoing += 1;
                    counts[position].total += 1;
                }
            }
            if let Some(target) = self.table_match.owner(&relationship.to) {
                for &position in index.named(target) {
                    counts[position].incoming += 1;
                    counts[position].total += 1;
                }
            }
        }

        counts
    }

    /// Undirected relationship counts between every ordered pair of tables.
    ///
    /// A relationship adds one to each cell it connects, at most once per cell.
    pub fn relationship_matrix(&self, schema: &Schema) -> RelationshipMatrix {
        let index = TableIndex::new(schema);
        let size = index.names.len();
        let mut cells = vec![vec![0usize; size]; size];

        let mut touched = HashSet::new();
        for relationship in &schema.relationships {
            let sources = index.matching(self.table_match, &relationship.from);
            if sources.is_empty() {
                continue;
            }
            let targets = index.matching(self.table_match, &relationship.to);

            touched.clear();
            for &source in &sources {
                for &target in &targets {
                    touched.insert((source, target));
                    touched.insert((target, source));
                }
            }
            for &(row, col) in &touched {
                cells[row][col] += 1;
            }
        }

        RelationshipMatrix {
            tables: index.names.iter().map(|name| name.to_string()).collect(),
            cells,
        }
    }

    /// Relationships with either endpoint on `table`.
    pub fn table_relationships<'a>(
        &self,
        schema: &'a Schema,
        table: &str,
    ) -> Vec<&'a Relationship> {
        schema
            .relationships
            .iter()
            .filter(|rel| {
                self.table_match.matches(&rel.from, table)
                    || self.table_match.matches(&rel.to, table)
            })
            .collect()
    }

    pub fn relationship_details(&self, schema: &Schema) -> Vec<RelationshipDetail> {
        schema
            .relationships
            .iter()
            .map(RelationshipDetail::from_relationship)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::TableMatch;

    #[test]
    fn exact_match_uses_component_before_delimiter() {
        assert!(TableMatch::Exact.matches("Users.id", "Users"));
        assert!(!TableMatch::Exact.matches("UserProfile.id", "User"));
        assert!(!TableMatch::Exact.matches("Users", "Users"));
    }

    #[test]
    fn prefix_match_reproduces_starts_with() {
        assert!(TableMatch::Prefix.matches("UserProfile.id", "User"));
        assert!(TableMatch::Prefix.matches("Users", "Users"));
        assert!(!TableMatch::Prefix.matches("Posts.id", "Users"));
    }

    #[test]
    fn owner_splits_on_first_delimiter_in_both_modes() {
        assert_eq!(TableMatch::Exact.owner("UserProfile.id"), Some("UserProfile"));
        assert_eq!(TableMatch::Prefix.owner("UserProfile.id"), Some("UserProfile"));
        assert_eq!(TableMatch::Exact.owner("Users"), None);
        assert_eq!(TableMatch::Prefix.owner("Users"), Some("Users"));
    }

    #[test]
    fn parser_is_case_insensitive() {
        assert_eq!("PREFIX".parse::<TableMatch>(), Ok(TableMatch::Prefix));
        assert_eq!("exact".parse::<TableMatch>(), Ok(TableMatch::Exact));
        assert!("fuzzy".parse::<TableMatch>().is_err());
    }
}
