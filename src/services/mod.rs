pub mod context;
pub mod demo_request_service;
pub mod query_service;
pub mod schema_service;
pub mod session_service;

pub use context::ServiceContext;
