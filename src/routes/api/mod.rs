pub mod demo_requests;
pub mod public;
pub mod query;
mod router;
pub mod schema;
pub mod sessions;

pub use router::router;
