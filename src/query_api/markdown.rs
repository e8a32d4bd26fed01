const SQL_FENCE_OPEN: &str = "```sql\n";
const FENCE_CLOSE: &str = "```";

/// Body of the first ```` ```sql ```` fenced block, or the whole text when
/// there is no complete block.
pub fn extract_sql(text: &str) -> &str {
    let Some(start) = text.find(SQL_FENCE_OPEN) else {
        return text;
    };
    let body = &text[start + SQL_FENCE_OPEN.len()..];
    match body.find(FENCE_CLOSE) {
        Some(end) => &body[..end],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::extract_sql;

    #[test]
    fn returns_fenced_body() {
        let text = "Here you go:\n```sql\nSELECT 1;\n```\nanything else";
        assert_eq!(extract_sql(text), "SELECT 1;\n");
    }

    #[test]
    fn first_block_wins() {
        let text = "```sql\nSELECT a;\n``` and ```sql\nSELECT b;\n```";
        assert_eq!(extract_sql(text), "SELECT a;\n");
    }

    #[test]
    fn plain_text_and_unterminated_blocks_pass_through() {
        assert_eq!(extract_sql("db.users.find({})"), "db.users.find({})");
        let open = "```sql\nSELECT 1;";
        assert_eq!(extract_sql(open), open);
    }
}
