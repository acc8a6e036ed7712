//! Task data structure and identifier type.
//!
//! A `Task` is a single to-do item: its text and whether it is done. Identity is
//! a store-issued counter value, so two tasks created within the same clock tick
//! still get distinct ids.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of a task, unique for the lifetime of the owning store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TaskId(pub u64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A user-entered to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    pub text: String,
    pub completed: bool,
    created_at: DateTime<Utc>,
}

impl Task {
    /// Create an open task. Callers are responsible for `text` being non-empty.
    pub(crate) fn new(id: TaskId, text: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            text,
            completed: false,
            created_at,
        }
    }

    /// Returns the task identifier.
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the time the task was first submitted.
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
