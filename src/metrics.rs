//! Prometheus metrics for store activity and request latency.
//!
//! Recording is a no-op until a recorder is installed, so the store and
//! handlers can call these helpers unconditionally (including from tests).

use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use strum::{AsRefStr, Display};
use tracing::debug;

// === Metric Name Constants ===

/// HTTP request latency metric name.
pub const METRIC_HTTP_REQUEST_LATENCY: &str = "http_request_latency_ms";
/// Todos created counter metric name.
pub const METRIC_TODOS_CREATED: &str = "todos_created_total";
/// Todos updated counter metric name.
pub const METRIC_TODOS_UPDATED: &str = "todos_updated_total";
/// Todos deleted counter metric name.
pub const METRIC_TODOS_DELETED: &str = "todos_deleted_total";
/// Rejected requests counter metric name.
pub const METRIC_REQUESTS_REJECTED: &str = "requests_rejected_total";

/// Endpoint label for latency histograms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Endpoint {
    /// `GET /api/todos`
    ListTodos,
    /// `GET /api/todos/:id`
    GetTodo,
    /// `POST /api/todos`
    CreateTodo,
    /// `PUT /api/todos/:id`
    UpdateTodo,
    /// `DELETE /api/todos/:id`
    DeleteTodo,
}

/// Install the Prometheus recorder and register metric descriptions.
/// Call this once at startup.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;

    describe_histogram!(
        METRIC_HTTP_REQUEST_LATENCY,
        "HTTP request latency in milliseconds"
    );
    describe_counter!(METRIC_TODOS_CREATED, "Total number of todos created");
    describe_counter!(METRIC_TODOS_UPDATED, "Total number of todos updated");
    describe_counter!(METRIC_TODOS_DELETED, "Total number of todos deleted");
    describe_counter!(
        METRIC_REQUESTS_REJECTED,
        "Total number of requests rejected with a client error"
    );

    debug!("Metrics initialized");
    Ok(handle)
}

/// Increment todos created counter.
pub fn inc_todos_created() {
    counter!(METRIC_TODOS_CREATED).increment(1);
}

/// Increment todos updated counter.
pub fn inc_todos_updated() {
    counter!(METRIC_TODOS_UPDATED).increment(1);
}

/// Increment todos deleted counter.
pub fn inc_todos_deleted() {
    counter!(METRIC_TODOS_DELETED).increment(1);
}

/// Increment rejected requests counter.
pub fn inc_requests_rejected(reason: &'static str) {
    counter!(METRIC_REQUESTS_REJECTED, "reason" => reason).increment(1);
}

/// RAII guard for timing a request.
/// Records latency under the endpoint label when dropped.
pub struct LatencyTimer {
    start: Instant,
    endpoint: Endpoint,
}

impl LatencyTimer {
    /// Start timing a request to `endpoint`.
    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            start: Instant::now(),
            endpoint,
        }
    }

    /// Get elapsed time in milliseconds (without recording).
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for LatencyTimer {
    fn drop(&mut self) {
        let latency_ms = self.elapsed_ms();
        histogram!(METRIC_HTTP_REQUEST_LATENCY, "endpoint" => self.endpoint.as_ref().to_string())
            .record(latency_ms);
    }
}

/// Create a latency timer for an HTTP endpoint.
pub fn timer_http(endpoint: Endpoint) -> LatencyTimer {
    LatencyTimer::new(endpoint)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;
    use std::time::Duration;

    #[test]
    fn latency_timer_measures_time() {
        let timer = timer_http(Endpoint::ListTodos);
        sleep(Duration::from_millis(10));
        let elapsed = timer.elapsed_ms();
        assert!(elapsed >= 9.0); // Allow some tolerance
    }

    #[test]
    fn endpoint_labels_are_snake_case() {
        assert_eq!(Endpoint::ListTodos.as_ref(), "list_todos");
        assert_eq!(Endpoint::DeleteTodo.to_string(), "delete_todo");
    }
}
