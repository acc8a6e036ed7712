//! In-memory task store.
//!
//! Tasks are kept in insertion order and never resorted. Lookups are linear;
//! the list is a human-sized to-do list, not an index.

use mockable::Clock;
use tracing::debug;

use crate::edit::EditSession;
use crate::error::TaskError;
use crate::task::{Task, TaskId};

/// Result of a successful [`TaskStore::submit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A new task was appended.
    Created(TaskId),
    /// The edit target's text was replaced.
    Updated(TaskId),
    /// The edit target no longer exists; nothing changed.
    Unchanged,
}

/// Ordered list of tasks plus the id counter that feeds it.
#[derive(Debug, Clone)]
pub struct TaskStore {
    tasks: Vec<Task>,
    next_id: u64,
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskStore {
    /// Create an empty store. The first task gets id 1.
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            next_id: 1,
        }
    }

    /// Apply a submitted line of text.
    ///
    /// When `session` is idle a new task is appended; when editing, the target's
    /// text is replaced and its id and completion flag are kept. The stored text
    /// is the trimmed input.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::EmptyInput`] if `raw` is empty after trimming. The
    /// store is untouched in that case.
    pub fn submit(
        &mut self,
        raw: &str,
        session: &EditSession,
        clock: &impl Clock,
    ) -> Result<SubmitOutcome, TaskError> {
        let text = raw.trim();
        if text.is_empty() {
            return Err(TaskError::EmptyInput);
        }

        match session.target() {
            None => Ok(SubmitOutcome::Created(self.add(text.to_string(), clock))),
            Some(id) => {
                if self.update_text(id, text.to_string()) {
                    Ok(SubmitOutcome::Updated(id))
                } else {
                    debug!(task_id = %id, "edit target vanished before submit");
                    Ok(SubmitOutcome::Unchanged)
                }
            }
        }
    }

    /// Append a new open task and return its id.
    pub fn add(&mut self, text: String, clock: &impl Clock) -> TaskId {
        let id = self.allocate_id();
        self.tasks.push(Task::new(id, text, clock.utc()));
        id
    }

    /// Replace the text of a task. Returns false if `id` is not present.
    pub fn update_text(&mut self, id: TaskId, text: String) -> bool {
        match self.get_mut(id) {
            Some(task) => {
                task.text = text;
                true
            }
            None => false,
        }
    }

    /// Remove a task. Returns false (and does nothing) if `id` is not present.
    pub fn remove(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id() != id);
        self.tasks.len() != before
    }

    /// Flip the completion flag of a task, returning the new value.
    pub fn toggle_completion(&mut self, id: TaskId) -> Option<bool> {
        let task = self.get_mut(id)?;
        task.completed = !task.completed;
        Some(task.completed)
    }

    /// Get a task by ID.
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id() == id)
    }

    fn get_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id() == id)
    }

    /// Position of a task in insertion order.
    pub fn position(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| t.id() == id)
    }

    /// Tasks in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    pub fn as_slice(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Number of tasks marked as completed.
    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }

    // Ids are never reused, even after the highest one is removed.
    fn allocate_id(&mut self) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockable::DefaultClock;
    use rstest::{fixture, rstest};

    #[fixture]
    fn store() -> TaskStore {
        let mut store = TaskStore::new();
        store.add("A".to_string(), &DefaultClock);
        store.add("B".to_string(), &DefaultClock);
        store
    }

    fn texts(store: &TaskStore) -> Vec<&str> {
        store.iter().map(|t| t.text.as_str()).collect()
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\t\n")]
    fn submit_rejects_blank_text(mut store: TaskStore, #[case] raw: &str) {
        let result = store.submit(raw, &EditSession::Idle, &DefaultClock);
        assert_eq!(result, Err(TaskError::EmptyInput));
        assert_eq!(store.len(), 2);
    }

    #[rstest]
    fn submit_while_idle_appends_open_task(mut store: TaskStore) {
        let outcome = store.submit("  C  ", &EditSession::Idle, &DefaultClock);
        let Ok(SubmitOutcome::Created(id)) = outcome else {
            panic!("expected Created, got {outcome:?}");
        };
        assert_eq!(store.len(), 3);
        let task = store.get(id).expect("task was just created");
        assert_eq!(task.text, "C");
        assert!(!task.completed);
        assert_eq!(store.position(id), Some(2));
    }

    #[rstest]
    fn submit_while_editing_only_changes_text(mut store: TaskStore) {
        let first = store.as_slice()[0].id();
        store.toggle_completion(first);

        let outcome = store.submit("A2", &EditSession::Editing(first), &DefaultClock);

        assert_eq!(outcome, Ok(SubmitOutcome::Updated(first)));
        assert_eq!(texts(&store), ["A2", "B"]);
        let task = store.get(first).expect("target still present");
        assert!(task.completed);
        assert_eq!(task.id(), first);
    }

    #[rstest]
    fn submit_for_missing_edit_target_is_a_no_op(mut store: TaskStore) {
        let outcome = store.submit("X", &EditSession::Editing(TaskId(99)), &DefaultClock);
        assert_eq!(outcome, Ok(SubmitOutcome::Unchanged));
        assert_eq!(texts(&store), ["A", "B"]);
    }

    #[rstest]
    fn remove_preserves_order_of_the_rest(mut store: TaskStore) {
        let first = store.as_slice()[0].id();
        assert!(store.remove(first));
        assert_eq!(texts(&store), ["B"]);
    }

    #[rstest]
    fn remove_missing_id_is_idempotent(mut store: TaskStore) {
        assert!(!store.remove(TaskId(42)));
        assert!(!store.remove(TaskId(42)));
        assert_eq!(texts(&store), ["A", "B"]);
    }

    #[rstest]
    fn toggle_twice_restores_flag(mut store: TaskStore) {
        let id = store.as_slice()[1].id();
        assert_eq!(store.toggle_completion(id), Some(true));
        assert_eq!(store.toggle_completion(id), Some(false));
        assert_eq!(store.completed_count(), 0);
    }

    #[rstest]
    fn toggle_missing_id_does_nothing(mut store: TaskStore) {
        assert_eq!(store.toggle_completion(TaskId(7)), None);
        assert_eq!(store.completed_count(), 0);
    }

    #[rstest]
    fn ids_are_not_reused_after_delete(mut store: TaskStore) {
        let last = store.as_slice()[1].id();
        store.remove(last);
        let next = store.add("C".to_string(), &DefaultClock);
        assert!(next > last);
    }
}
