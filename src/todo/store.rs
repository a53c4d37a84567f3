//! In-memory todo table guarded by a single mutex.
//!
//! The list and the id counter form one unit of state: every operation takes
//! the same lock for its whole duration, and input is validated before the
//! lock is taken so a rejected request never touches the table.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, instrument};

use super::types::{CreateTodo, Todo, UpdateTodo};
use crate::error::TodoError;
use crate::metrics;

/// Sample names loaded into a seeded store, in id order.
pub const SEED_NAMES: [&str; 3] = ["Learn Rust", "Build API with axum", "Connect React frontend"];

#[derive(Debug)]
struct TodoTable {
    /// Insertion order defines list order.
    todos: Vec<Todo>,
    /// Next id to hand out. Only ever increases.
    next_id: i64,
}

impl TodoTable {
    fn position(&self, id: i64) -> Option<usize> {
        self.todos.iter().position(|todo| todo.id == id)
    }
}

/// Shared todo store.
#[derive(Debug)]
pub struct TodoStore {
    table: Mutex<TodoTable>,
}

impl TodoStore {
    /// Create an empty store whose first id is 1.
    pub fn new() -> Self {
        Self {
            table: Mutex::new(TodoTable {
                todos: Vec::new(),
                next_id: 1,
            }),
        }
    }

    /// Create a store holding the sample todos (ids 1..=3); next id is 4.
    pub fn seeded() -> Self {
        let todos: Vec<Todo> = SEED_NAMES
            .iter()
            .zip(1..)
            .map(|(name, id)| Todo {
                id,
                name: (*name).to_string(),
                is_complete: false,
            })
            .collect();
        let next_id = todos.len() as i64 + 1;

        Self {
            table: Mutex::new(TodoTable { todos, next_id }),
        }
    }

    fn table(&self) -> MutexGuard<'_, TodoTable> {
        // Validation happens before mutation, so a panicking holder cannot
        // leave the table half-updated.
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// All todos in insertion order.
    pub fn list(&self) -> Vec<Todo> {
        self.table().todos.clone()
    }

    /// Number of stored todos.
    pub fn len(&self) -> usize {
        self.table().todos.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.table().todos.is_empty()
    }

    /// Look up a todo by id.
    pub fn get(&self, id: i64) -> Result<Todo, TodoError> {
        let table = self.table();
        table
            .position(id)
            .map(|idx| table.todos[idx].clone())
            .ok_or(TodoError::NotFound { id })
    }

    /// Validate and append a new todo, assigning the next id.
    #[instrument(skip(self, input))]
    pub fn create(&self, input: CreateTodo) -> Result<Todo, TodoError> {
        let (name, is_complete) = input.validate()?;

        let mut table = self.table();
        let todo = Todo {
            id: table.next_id,
            name,
            is_complete,
        };
        table.next_id += 1;
        table.todos.push(todo.clone());
        drop(table);

        info!(id = todo.id, "Todo created");
        metrics::inc_todos_created();
        Ok(todo)
    }

    /// Apply a partial update to an existing todo.
    #[instrument(skip(self, input))]
    pub fn update(&self, id: i64, input: &UpdateTodo) -> Result<Todo, TodoError> {
        let mut table = self.table();
        let idx = table.position(id).ok_or(TodoError::NotFound { id })?;
        let todo = &mut table.todos[idx];
        input.apply_to(todo);
        let updated = todo.clone();
        drop(table);

        debug!(id, is_complete = updated.is_complete, "Todo updated");
        metrics::inc_todos_updated();
        Ok(updated)
    }

    /// Remove a todo, keeping the order of the rest. The id is not reissued.
    #[instrument(skip(self))]
    pub fn delete(&self, id: i64) -> Result<(), TodoError> {
        let mut table = self.table();
        let idx = table.position(id).ok_or(TodoError::NotFound { id })?;
        table.todos.remove(idx);
        drop(table);

        info!(id, "Todo deleted");
        metrics::inc_todos_deleted();
        Ok(())
    }
}

impl Default for TodoStore {
    fn default() -> Self {
        Self::new()
    }
}
