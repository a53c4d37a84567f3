//! HTTP API handlers.
//!
//! Handlers turn the raw path segment and body into typed input, call the
//! store, and serialize the result. The store never sees unparsed input.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{json, Value};

use crate::error::{ErrorResponse, TodoError};
use crate::metrics::{timer_http, Endpoint};
use crate::todo::{CreateTodo, Todo, TodoStore, UpdateTodo};

/// Application state shared with handlers.
#[derive(Clone)]
pub struct AppState {
    /// The todo table.
    pub store: Arc<TodoStore>,
    /// Prometheus handle, when a recorder is installed.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create app state around an existing store.
    pub fn new(store: TodoStore) -> Self {
        Self {
            store: Arc::new(store),
            metrics: None,
        }
    }

    /// Attach a Prometheus handle for the `/metrics` endpoint.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(TodoStore::seeded())
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status: "ok".
    pub status: &'static str,
}

/// Parse the `:id` path segment as a signed integer.
pub fn parse_id(raw: &str) -> Result<i64, TodoError> {
    raw.parse().map_err(|_| TodoError::invalid_id())
}

/// Decode a JSON request body, reporting decoder errors as bad input.
pub fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, TodoError> {
    serde_json::from_slice(body).map_err(|e| TodoError::InvalidArgument(e.to_string()))
}

/// Root handler - describes the service and its endpoints.
pub async fn root() -> Json<Value> {
    Json(json!({
        "message": "Rust + React Todo API",
        "endpoints": {
            "GET /api/todos": "Get all todos",
            "GET /api/todos/:id": "Get todo by ID",
            "POST /api/todos": "Create a todo",
            "PUT /api/todos/:id": "Update a todo",
            "DELETE /api/todos/:id": "Delete a todo",
        },
    }))
}

/// Health check handler - always returns 200.
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}

/// Metrics handler - Prometheus text format, or 503 without a recorder.
pub async fn metrics(State(state): State<AppState>) -> Response {
    match &state.metrics {
        Some(handle) => handle.render().into_response(),
        None => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorResponse {
                error: "metrics recorder not installed".to_string(),
            }),
        )
            .into_response(),
    }
}

/// `GET /api/todos`
pub async fn list_todos(State(state): State<AppState>) -> Json<Vec<Todo>> {
    let _timer = timer_http(Endpoint::ListTodos);
    Json(state.store.list())
}

/// `GET /api/todos/:id`
pub async fn get_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Todo>, TodoError> {
    let _timer = timer_http(Endpoint::GetTodo);
    let id = parse_id(&id)?;
    state.store.get(id).map(Json)
}

/// `POST /api/todos`
pub async fn create_todo(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Todo>), TodoError> {
    let _timer = timer_http(Endpoint::CreateTodo);
    // A JSON `null` body decodes as an empty request.
    let input: CreateTodo = parse_body::<Option<CreateTodo>>(&body)?.unwrap_or_default();
    let todo = state.store.create(input)?;
    Ok((StatusCode::CREATED, Json(todo)))
}

/// `PUT /api/todos/:id`
pub async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Todo>, TodoError> {
    let _timer = timer_http(Endpoint::UpdateTodo);
    let id = parse_id(&id)?;
    let input: UpdateTodo = parse_body::<Option<UpdateTodo>>(&body)?.unwrap_or_default();
    state.store.update(id, &input).map(Json)
}

/// `DELETE /api/todos/:id`
pub async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, TodoError> {
    let _timer = timer_http(Endpoint::DeleteTodo);
    let id = parse_id(&id)?;
    state.store.delete(id)?;
    Ok(StatusCode::NO_CONTENT)
}
