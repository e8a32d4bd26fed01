pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: i64 = 3000;
pub const DEFAULT_RUST_LOG: &str = "info,tower_http=info";
pub const DEFAULT_QUERY_API_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_QUERY_API_TIMEOUT_SECS: i64 = 30;
pub const DEFAULT_TABLE_MATCH: &str = "exact";
pub const DEFAULT_BYTES_PER_CELL: i64 = 10;
pub const DEFAULT_MAX_SESSIONS: i64 = 256;
