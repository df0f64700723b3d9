//! HTTP API module for the cluster status pages.

pub mod handlers;
pub mod routes;

pub use handlers::AppState;
pub use routes::create_router;
