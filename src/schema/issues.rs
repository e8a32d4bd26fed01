use std::collections::HashSet;

use serde::Serialize;

use super::{ColumnRef, Schema};

/// Data-quality problem found in a schema. Issues are reported, never enforced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SchemaIssue {
    DuplicateTable { table: String },
    MissingDelimiter { endpoint: String },
    UnknownTable { endpoint: String },
    UnknownColumn { endpoint: String },
    ReferenceWithoutForeignKey { table: String, column: String },
    ForeignKeyWithoutReference { table: String, column: String },
}

impl Schema {
    pub fn issues(&self) -> Vec<SchemaIssue> {
        let mut issues = Vec::new();

        let mut seen = HashSet::new();
        for table in &self.tables {
            if !seen.insert(table.name.as_str()) {
                issues.push(SchemaIssue::DuplicateTable {
                    table: table.name.clone(),
                });
            }

            for column in &table.columns {
                match (column.is_foreign, column.references.as_deref()) {
                    (false, Some(_)) => issues.push(SchemaIssue::ReferenceWithoutForeignKey {
                        table: table.name.clone(),
                        column: column.name.clone(),
                    }),
                    (true, None) => issues.push(SchemaIssue::ForeignKeyWithoutReference {
                        table: table.name.clone(),
                        column: column.name.clone(),
                    }),
                    _ => {}
                }
            }
        }

        for relationship in &self.relationships {
            for endpoint in [&relationship.from, &relationship.to] {
                if let Some(issue) = self.endpoint_issue(endpoint) {
                    issues.push(issue);
                }
            }
        }

        issues
    }

    fn endpoint_issue(&self, endpoint: &str) -> Option<SchemaIssue> {
        let Some(parsed) = ColumnRef::parse(endpoint) else {
            return Some(SchemaIssue::MissingDelimiter {
                endpoint: endpoint.to_string(),
            });
        };
        let Some(table) = self.table(parsed.table) else {
            return Some(SchemaIssue::UnknownTable {
                endpoint: endpoint.to_string(),
            });
        };
        if table.column(parsed.column).is_none() {
            return Some(SchemaIssue::UnknownColumn {
                endpoint: endpoint.to_string(),
            });
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use crate::schema::{Column, ColumnType, Relationship, Schema, SchemaIssue, Table};

    #[test]
    fn reports_dangling_and_malformed_endpoints() {
        let users = Table::new("Users", 1).with_column(Column::new("id", ColumnType::Uuid));
        let schema = Schema::new(
            vec![users.clone(), users],
            vec![
                Relationship::new("Posts.user_id", "Users.id"),
                Relationship::new("Users", "Users.email"),
            ],
        );

        let issues = schema.issues();
        assert_eq!(
            issues,
            vec![
                SchemaIssue::DuplicateTable {
                    table: "Users".to_string()
                },
                SchemaIssue::UnknownTable {
                    endpoint: "Posts.user_id".to_string()
                },
                SchemaIssue::MissingDelimiter {
                    endpoint: "Users".to_string()
                },
                SchemaIssue::UnknownColumn {
                    endpoint: "Users.email".to_string()
                },
            ]
        );
    }

    #[test]
    fn flags_inconsistent_foreign_key_columns() {
        let mut dangling = Column::new("owner", ColumnType::Uuid);
        dangling.references = Some("Users.id".to_string());
        let mut unresolved = Column::new("parent", ColumnType::Uuid);
        unresolved.is_foreign = true;

        let schema = Schema::new(
            vec![
                Table::new("Docs", 0)
                    .with_column(dangling)
                    .with_column(unresolved),
            ],
            Vec::new(),
        );

        assert_eq!(
            schema.issues(),
            vec![
                SchemaIssue::ReferenceWithoutForeignKey {
                    table: "Docs".to_string(),
                    column: "owner".to_string()
                },
                SchemaIssue::ForeignKeyWithoutReference {
                    table: "Docs".to_string(),
                    column: "parent".to_string()
                },
            ]
        );
    }
}
