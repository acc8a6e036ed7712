//! Edit-mode controller.
//!
//! Decides whether the input box creates a new task or rewrites an existing
//! one. There is no cancel action: deleting the target or submitting are the
//! only ways back to `Idle`, and editing another task simply re-targets.

use crate::task::TaskId;

/// Whether the pending input represents a new task or an edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditSession {
    #[default]
    Idle,
    Editing(TaskId),
}

impl EditSession {
    /// The task being edited, if any.
    pub const fn target(&self) -> Option<TaskId> {
        match self {
            Self::Idle => None,
            Self::Editing(id) => Some(*id),
        }
    }

    pub const fn is_editing(&self) -> bool {
        matches!(self, Self::Editing(_))
    }

    /// Enter (or re-target) edit mode.
    pub fn begin(&mut self, id: TaskId) {
        *self = Self::Editing(id);
    }

    /// Return to `Idle` after a successful submit.
    pub fn finish(&mut self) {
        *self = Self::Idle;
    }

    /// Handle deletion of a task. Returns true if the session was terminated
    /// because `id` was its target.
    pub fn on_task_removed(&mut self, id: TaskId) -> bool {
        if self.target() == Some(id) {
            *self = Self::Idle;
            true
        } else {
            false
        }
    }
}
