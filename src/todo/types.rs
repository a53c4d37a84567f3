//! Todo record and request payload types.

use serde::{Deserialize, Serialize};

use crate::error::TodoError;

/// A single todo item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    /// Unique id, assigned by the store and never reused.
    pub id: i64,
    /// Task description.
    pub name: String,
    /// Whether the task is done.
    pub is_complete: bool,
}

/// Body of `POST /api/todos`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodo {
    /// Required; `null` and `""` are rejected.
    #[serde(default)]
    pub name: Option<String>,
    /// Defaults to false when absent or `null`.
    #[serde(default)]
    pub is_complete: Option<bool>,
}

impl CreateTodo {
    /// Request with just a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            is_complete: None,
        }
    }

    /// Check required fields and return the validated `(name, is_complete)` pair.
    pub fn validate(self) -> Result<(String, bool), TodoError> {
        match self.name {
            Some(name) if !name.is_empty() => Ok((name, self.is_complete.unwrap_or(false))),
            _ => Err(TodoError::InvalidArgument("name is required".to_string())),
        }
    }
}

/// Body of `PUT /api/todos/:id`. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodo {
    /// New name. An empty string counts as "no change".
    #[serde(default)]
    pub name: Option<String>,
    /// New completion flag, applied only when present.
    #[serde(default)]
    pub is_complete: Option<bool>,
}

impl UpdateTodo {
    /// Apply the supplied fields to `todo` in place.
    pub fn apply_to(&self, todo: &mut Todo) {
        if let Some(name) = self.name.as_deref().filter(|n| !n.is_empty()) {
            todo.name = name.to_string();
        }
        if let Some(is_complete) = self.is_complete {
            todo.is_complete = is_complete;
        }
    }
}
