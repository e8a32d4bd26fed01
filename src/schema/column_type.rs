use std::fmt;

use serde::{Deserialize, Serialize};

/// Column type tag.
///
/// SQL tags come from relational schemas, the lowercase short tags (`str`,
/// `int`, `dict`, ...) and `ObjectId` come from document stores introspected
/// by the query API. Anything else is kept verbatim as [`ColumnType::Unknown`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ColumnType {
    Uuid,
    Varchar,
    Text,
    Timestamp,
    Date,
    Integer,
    BigInt,
    Decimal,
    Float,
    Boolean,
    Json,
    ObjectId,
    Str,
    Int,
    Bool,
    Datetime,
    List,
    Dict,
    Unknown(String),
}

impl ColumnType {
    pub fn parse(tag: &str) -> Self {
        match tag {
            "uuid" => Self::Uuid,
            "varchar" => Self::Varchar,
            "text" => Self::Text,
            "timestamp" => Self::Timestamp,
            "date" => Self::Date,
            "integer" => Self::Integer,
            "bigint" => Self::BigInt,
            "decimal" => Self::Decimal,
            "float" => Self::Float,
            "boolean" => Self::Boolean,
            "json" => Self::Json,
            "ObjectId" => Self::ObjectId,
            "str" => Self::Str,
            "int" => Self::Int,
            "bool" => Self::Bool,
            "datetime" => Self::Datetime,
            "list" => Self::List,
            "dict" => Self::Dict,
            other => Self::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Uuid => "uuid",
            Self::Varchar => "varchar",
            Self::Text => "text",
            Self::Timestamp => "timestamp",
            Self::Date => "date",
            Self::Integer => "integer",
            Self::BigInt => "bigint",
            Self::Decimal => "decimal",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::Json => "json",
            Self::ObjectId => "ObjectId",
            Self::Str => "str",
            Self::Int => "int",
            Self::Bool => "bool",
            Self::Datetime => "datetime",
            Self::List => "list",
            Self::Dict => "dict",
            Self::Unknown(tag) => tag.as_str(),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

impl From<String> for ColumnType {
    fn from(tag: String) -> Self {
        match Self::parse(&tag) {
            Self::Unknown(_) => Self::Unknown(tag),
            known => known,
        }
    }
}

impl From<&str> for ColumnType {
    fn from(tag: &str) -> Self {
        Self::parse(tag)
    }
}

impl From<ColumnType> for String {
    fn from(value: ColumnType) -> Self {
        match value {
            ColumnType::Unknown(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::ColumnType;

    #[test]
    fn known_tags_parse_to_variants() {
        assert_eq!(ColumnType::parse("uuid"), ColumnType::Uuid);
        assert_eq!(ColumnType::parse("ObjectId"), ColumnType::ObjectId);
        assert_eq!(ColumnType::parse("str"), ColumnType::Str);
        assert!(ColumnType::parse("varchar").is_known());
    }

    #[test]
    fn unrecognized_tags_are_kept_verbatim() {
        let parsed = ColumnType::parse("geometry");
        assert_eq!(parsed, ColumnType::Unknown("geometry".to_string()));
        assert_eq!(parsed.as_str(), "geometry");
        assert!(!parsed.is_known());
        // tags are case sensitive
        assert!(!ColumnType::parse("UUID").is_known());
    }

    #[test]
    fn serializes_as_plain_tag() {
        let json = serde_json::to_value(ColumnType::Timestamp).expect("serialize");
        assert_eq!(json, serde_json::json!("timestamp"));

        let parsed: ColumnType = serde_json::from_value(serde_json::json!("money")).expect("parse");
        assert_eq!(parsed.to_string(), "money");
    }
}
