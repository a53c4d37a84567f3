//! HTTP API module: todo CRUD endpoints plus health and metrics.

pub mod handlers;
pub mod routes;

pub use handlers::AppState;
pub use routes::create_router;
