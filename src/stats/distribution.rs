use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::schema::{Column, Schema};

use super::SchemaStatsEngine;

/// Type tag counter that keeps tags in order of first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeCounts(IndexMap<String, usize>);

impl TypeCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, tag: &str) {
        match self.0.get_mut(tag) {
            Some(count) => *count += 1,
            None => {
                self.0.insert(tag.to_string(), 1);
            }
        }
    }

    pub fn get(&self, tag: &str) -> usize {
        self.0.get(tag).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.0.iter().map(|(tag, count)| (tag.as_str(), *count))
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn extend_from<'a>(&mut self, columns: impl IntoIterator<Item = &'a Column>) {
        for column in columns {
            self.increment(column.column_type.as_str());
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableColumnStats {
    pub name: String,
    pub column_count: usize,
    pub primary_keys: usize,
    pub foreign_keys: usize,
    pub type_counts: TypeCounts,
}

impl SchemaStatsEngine {
    /// Column count per type tag across every table.
    pub fn column_type_distribution(&self, schema: &Schema) -> TypeCounts {
        let mut counts = TypeCounts::new();
        for table in &schema.tables {
            counts.extend_from(&table.columns);
        }
        counts
    }

    /// One record per table, in schema order.
    pub fn table_column_stats(&self, schema: &Schema) -> Vec<TableColumnStats> {
        schema
            .tables
            .iter()
            .map(|table| {
                let mut type_counts = TypeCounts::new();
                type_counts.extend_from(&table.columns);
                TableColumnStats {
                    name: table.name.clone(),
                    column_count: table.columns.len(),
                    primary_keys: table.columns.iter().filter(|c| c.is_primary).count(),
                    foreign_keys: table.columns.iter().filter(|c| c.is_foreign).count(),
                    type_counts,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::TypeCounts;

    #[test]
    fn type_counts_keep_first_occurrence_order() {
        let mut counts = TypeCounts::new();
        for tag in ["uuid", "varchar", "uuid", "text", "varchar", "uuid"] {
            counts.increment(tag);
        }

        let entries: Vec<(&str, usize)> = counts.iter().collect();
        assert_eq!(entries, vec![("uuid", 3), ("varchar", 2), ("text", 1)]);
        assert_eq!(counts.total(), 6);
        assert_eq!(counts.get("json"), 0);
    }

    #[test]
    fn type_counts_serialize_as_ordered_object() {
        let mut counts = TypeCounts::new();
        counts.increment("varchar");
        counts.increment("uuid");

        let json = serde_json::to_string(&counts).expect("serialize");
        assert_eq!(json, r#"{"varchar":1,"uuid":1}"#);

        let back: TypeCounts = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, counts);
    }
}
