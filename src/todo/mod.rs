//! Todo domain: record types and the in-memory store.

pub mod store;
pub mod types;

pub use store::TodoStore;
pub use types::{CreateTodo, Todo, UpdateTodo};
