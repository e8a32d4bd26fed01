pub mod config;
pub mod error;
pub mod logging;
pub mod middleware;
pub mod query_api;
pub mod response;
pub mod routes;
pub mod schema;
pub mod services;
pub mod session;
pub mod state;
pub mod stats;
pub mod test_helpers;
