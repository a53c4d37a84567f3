//! HTTP API route definitions.

use axum::{
    http::{header, Method},
    routing::get,
    Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use super::handlers::{
    create_todo, delete_todo, get_todo, health, list_todos, metrics, root, update_todo, AppState,
};
use crate::config::Config;

/// Create the API router.
///
/// ```text
/// /                      GET     service description
/// /health                GET
/// /metrics               GET     Prometheus exposition
/// /api/todos             GET     list
///                        POST    create
/// /api/todos/:id         GET     fetch one
///                        PUT     partial update
///                        DELETE  remove
/// ```
pub fn create_router(state: AppState, config: &Config) -> Router {
    let todo_routes = Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route(
            "/todos/:id",
            get(get_todo).put(update_todo).delete(delete_todo),
        );

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .nest("/api", todo_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors_layer(config))
        .with_state(state)
}

/// CORS for the browser frontend's dev servers.
pub fn cors_layer(config: &Config) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(config.cors_header_values())
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::ORIGIN, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
}
