//! In-memory todo list REST API.
//!
//! Serves CRUD operations over a single shared list of todos for a
//! browser frontend. State lives for the lifetime of the process.
//!
//! ```text
//! GET    /api/todos        list, in creation order
//! GET    /api/todos/:id    fetch one
//! POST   /api/todos        create   {"name": "...", "isComplete": false}
//! PUT    /api/todos/:id    update   {"name"?: "...", "isComplete"?: true}
//! DELETE /api/todos/:id    remove   (204, id never reused)
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Error types and their HTTP mapping
//! - [`todo`]: Todo types and the shared store
//! - [`api`]: HTTP handlers and router
//! - [`metrics`]: Prometheus metrics
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod todo;
pub mod utils;

pub use config::Config;
pub use error::{AppError, Result, TodoError};
