mod registry;
mod types;

pub use registry::SessionRegistry;
pub use types::{ConnectionDetails, ConnectionSession, DatabaseEngine};
