use super::{Column, ColumnType, Relationship, Schema, Table};

impl Schema {
    /// Five-table blog schema shown by the visualiser before a database is connected.
    pub fn sample() -> Self {
        let users = Table::new("Users", 12_500)
            .with_column(Column::new("id", ColumnType::Uuid).primary())
            .with_column(Column::new("username", ColumnType::Varchar))
            .with_column(Column::new("email", ColumnType::Varchar))
            .with_column(Column::new("password_hash", ColumnType::Varchar))
            .with_column(Column::new("created_at", ColumnType::Timestamp))
            .with_column(Column::new("updated_at", ColumnType::Timestamp));

        let posts = Table::new("Posts", 45_000)
            .with_column(Column::new("id", ColumnType::Uuid).primary())
            .with_column(Column::new("title", ColumnType::Varchar))
            .with_column(Column::new("content", ColumnType::Text))
            .with_column(Column::new("user_id", ColumnType::Uuid).references("Users.id"))
            .with_column(Column::new("created_at", ColumnType::Timestamp))
            .with_column(Column::new("updated_at", ColumnType::Timestamp));

        let comments = Table::new("Comments", 87_500)
            .with_column(Column::new("id", ColumnType::Uuid).primary())
            .with_column(Column::new("content", ColumnType::Text))
            .with_column(Column::new("user_id", ColumnType::Uuid).references("Users.id"))
            .with_column(Column::new("post_id", ColumnType::Uuid).references("Posts.id"))
            .with_column(Column::new("created_at", ColumnType::Timestamp));

        let categories = Table::new("Categories", 120)
            .with_column(Column::new("id", ColumnType::Uuid).primary())
            .with_column(Column::new("name", ColumnType::Varchar))
            .with_column(Column::new("description", ColumnType::Text));

        let post_categories = Table::new("PostCategories", 67_500)
            .with_column(
                Column::new("post_id", ColumnType::Uuid)
                    .primary()
                    .references("Posts.id"),
            )
            .with_column(
                Column::new("category_id", ColumnType::Uuid)
                    .primary()
                    .references("Categories.id"),
            );

        Schema::new(
            vec![users, posts, comments, categories, post_categories],
            vec![
                Relationship::new("Posts.user_id", "Users.id"),
                Relationship::new("Comments.user_id", "Users.id"),
                Relationship::new("Comments.post_id", "Posts.id"),
                Relationship::new("PostCategories.post_id", "Posts.id"),
                Relationship::new("PostCategories.category_id", "Categories.id"),
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::schema::Schema;

    #[test]
    fn sample_schema_is_consistent() {
        let schema = Schema::sample();
        assert_eq!(schema.tables.len(), 5);
        assert_eq!(schema.relationships.len(), 5);
        assert_eq!(schema.column_count(), 22);
        assert!(schema.issues().is_empty());
    }
}
