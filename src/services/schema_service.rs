use serde::Serialize;

use crate::{
    error::AppError,
    schema::{Relationship, Schema, SchemaIssue, Table},
    stats::{RelationshipCount, SchemaReport, SchemaStatsEngine, TableColumnStats},
};

const MAX_TABLES: usize = 512;
const MAX_RELATIONSHIPS: usize = 4_096;

#[derive(Debug, Clone, Serialize)]
pub struct SchemaAnalysis {
    pub report: SchemaReport,
    pub issues: Vec<SchemaIssue>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableDetail {
    pub table: Table,
    pub stats: TableColumnStats,
    pub relationship_count: RelationshipCount,
    pub relationships: Vec<Relationship>,
}

#[derive(Clone)]
pub struct SchemaService {
    engine: SchemaStatsEngine,
}

impl SchemaService {
    pub fn new(engine: SchemaStatsEngine) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> SchemaStatsEngine {
        self.engine
    }

    pub fn sample(&self) -> Schema {
        Schema::sample()
    }

    pub fn report(&self, schema: &Schema) -> SchemaReport {
        self.engine.report(schema)
    }

    /// Report plus data-quality issues. Issues never block the report.
    pub fn analyze(&self, schema: &Schema) -> Result<SchemaAnalysis, AppError> {
        if schema.tables.len() > MAX_TABLES {
            return Err(AppError::bad_request(format!(
                "schema has too many tables (max {MAX_TABLES})"
            )));
        }
        if schema.relationships.len() > MAX_RELATIONSHIPS {
            return Err(AppError::bad_request(format!(
                "schema has too many relationships (max {MAX_RELATIONSHIPS})"
            )));
        }

        let issues = schema.issues();
        if !issues.is_empty() {
            tracing::debug!(count = issues.len(), "schema has data-quality issues");
        }

        Ok(SchemaAnalysis {
            report: self.engine.report(schema),
            issues,
        })
    }

    pub fn table_detail(&self, schema: &Schema, name: &str) -> Result<TableDetail, AppError> {
        let position = schema
            .tables
            .iter()
            .position(|table| table.name == name)
            .ok_or_else(|| AppError::not_found(format!("Table not found: {name}")))?;

        let mut stats = self.engine.table_column_stats(schema);
        let mut counts = self.engine.relationship_counts(schema);
        let relationships = self
            .engine
            .table_relationships(schema, name)
            .into_iter()
            .cloned()
            .collect();

        Ok(TableDetail {
            table: schema.tables[position].clone(),
            stats: stats.swap_remove(position),
            relationship_count: counts.swap_remove(position),
            relationships,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_detail_collects_both_directions() {
        let service = SchemaService::new(SchemaStatsEngine::default());
        let schema = service.sample();

        let posts = service
            .table_detail(&schema, "Posts")
            .expect("Posts should exist");
        assert_eq!(posts.stats.column_count, 6);
        assert_eq!(posts.relationship_count.total, 3);
        assert_eq!(posts.relationships.len(), 3);

        let err = service
            .table_detail(&schema, "posts")
            .expect_err("lookup is case sensitive");
        assert_eq!(err.message(), "Table not found: posts");
    }

    #[test]
    fn analyze_reports_issues_without_failing() {
        let service = SchemaService::new(SchemaStatsEngine::default());
        let mut schema = service.sample();
        schema
            .relationships
            .push(Relationship::new("Tags.post_id", "Posts.id"));

        let analysis = service.analyze(&schema).expect("analysis should succeed");
        assert_eq!(analysis.issues.len(), 1);
        assert_eq!(analysis.report.relationship_count, 6);
    }

    #[test]
    fn analyze_refuses_oversized_relationship_sets() {
        let service = SchemaService::new(SchemaStatsEngine::default());
        let mut schema = service.sample();
        schema.relationships = (0..=MAX_RELATIONSHIPS)
            .map(|_| Relationship::new("Posts.user_id", "Users.id"))
            .collect();

        let err = service
            .analyze(&schema)
            .expect_err("relationship count is capped");
        assert_eq!(err.message(), "schema has too many relationships (max 4096)");

        schema.relationships.truncate(MAX_RELATIONSHIPS);
        let analysis = service.analyze(&schema).expect("limit itself is accepted");
        assert_eq!(analysis.report.relationship_matrix.get(0, 1), Some(MAX_RELATIONSHIPS));
    }
}
