use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Column, ColumnType, Schema, Table};

/// `collection -> field -> {type}` as returned by the query API.
pub type CollectionsPayload = BTreeMap<String, BTreeMap<String, FieldSpec>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    #[serde(rename = "type")]
    pub field_type: String,
}

impl FieldSpec {
    pub fn new(field_type: impl Into<String>) -> Self {
        Self {
            field_type: field_type.into(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("collection name must not be empty")]
    EmptyCollectionName,
    #[error("collection {collection} has a field with an empty name")]
    EmptyFieldName { collection: String },
    #[error("field {collection}.{field} has an empty type tag")]
    EmptyFieldType { collection: String, field: String },
}

const PRIMARY_FIELD_NAMES: [&str; 2] = ["_id", "id"];

impl Schema {
    /// Converts an introspection payload into a schema.
    ///
    /// Collections become tables in name order and fields become columns in
    /// name order. Row counts are not reported by the API and stay at zero.
    pub fn from_collections(collections: &CollectionsPayload) -> Result<Self, SchemaError> {
        let mut tables = Vec::with_capacity(collections.len());
        for (collection, fields) in collections {
            if collection.trim().is_empty() {
                return Err(SchemaError::EmptyCollectionName);
            }

            let mut table = Table::new(collection.clone(), 0);
            for (field, spec) in fields {
                if field.trim().is_empty() {
                    return Err(SchemaError::EmptyFieldName {
                        collection: collection.clone(),
                    });
                }
                let tag = spec.field_type.trim();
                if tag.is_empty() {
                    return Err(SchemaError::EmptyFieldType {
                        collection: collection.clone(),
                        field: field.clone(),
                    });
                }

                let mut column = Column::new(field.clone(), ColumnType::parse(tag));
                if PRIMARY_FIELD_NAMES.contains(&field.as_str()) {
                    column = column.primary();
                }
                table = table.with_column(column);
            }
            tables.push(table);
        }

        Ok(Schema::new(tables, Vec::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(raw: serde_json::Value) -> CollectionsPayload {
        serde_json::from_value(raw).expect("payload should deserialize")
    }

    #[test]
    fn collections_become_tables_in_name_order() {
        let collections = payload(serde_json::json!({
            "users": {
                "_id": { "type": "ObjectId" },
                "name": { "type": "str" },
                "age": { "type": "int" }
            },
            "orders": {
                "_id": { "type": "ObjectId" },
                "placed_at": { "type": "datetime" },
                "shape": { "type": "polygon" }
            }
        }));

        let schema = Schema::from_collections(&collections).expect("conversion should succeed");
        let names: Vec<&str> = schema.table_names().collect();
        assert_eq!(names, vec!["orders", "users"]);

        let users = schema.table("users").expect("users table");
        assert_eq!(users.row_count, 0);
        assert_eq!(users.columns.len(), 3);
        let id = users.column("_id").expect("_id column");
        assert!(id.is_primary);
        assert_eq!(id.column_type, ColumnType::ObjectId);
        assert!(!users.column("name").expect("name column").is_primary);

        let orders = schema.table("orders").expect("orders table");
        assert_eq!(
            orders.column("shape").expect("shape column").column_type,
            ColumnType::Unknown("polygon".to_string())
        );
        assert!(schema.relationships.is_empty());
    }

    #[test]
    fn blank_type_tags_are_rejected() {
        let collections = payload(serde_json::json!({
            "users": { "name": { "type": "  " } }
        }));

        let err = Schema::from_collections(&collections).expect_err("blank tag should fail");
        assert_eq!(
            err,
            SchemaError::EmptyFieldType {
                collection: "users".to_string(),
                field: "name".to_string(),
            }
        );
        assert_eq!(err.to_string(), "field users.name has an empty type tag");
    }

    #[test]
    fn blank_collection_names_are_rejected() {
        let collections = payload(serde_json::json!({ "": {} }));
        assert_eq!(
            Schema::from_collections(&collections),
            Err(SchemaError::EmptyCollectionName)
        );
    }
}
