//! Explicit state container for the task-list widget.
//!
//! `TodoState` owns everything the widget shows: the task store, the edit
//! session, the pending input, the live notification and the theme. The UI
//! turns events into [`Action`]s and hands them to [`TodoState::apply`]; no
//! other code mutates the state, so every behaviour can be exercised without a
//! terminal.

use mockable::Clock;
use tracing::{debug, info};

use crate::config::{Config, EmptyInputPolicy};
use crate::edit::EditSession;
use crate::error::TaskError;
use crate::input::InputField;
use crate::notify::{NoticeKind, Notifier};
use crate::store::{SubmitOutcome, TaskStore};
use crate::task::TaskId;
use crate::theme::Theme;

pub const MSG_ADDED: &str = "Task added!";
pub const MSG_UPDATED: &str = "Task updated!";
pub const MSG_EMPTY: &str = "Task cannot be empty!";

/// Edits to the pending input buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEdit {
    Insert(char),
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
    /// Replace the whole buffer.
    Set(String),
}

/// Everything a user can do to the widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Input(InputEdit),
    /// Create a task, or rewrite the edit target.
    Submit,
    BeginEdit(TaskId),
    Remove(TaskId),
    ToggleCompletion(TaskId),
    ToggleTheme,
    /// Clear the notification if its time is up.
    Tick,
}

/// Observable effect of a successfully applied action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Created(TaskId),
    Updated(TaskId),
    EditStarted(TaskId),
    Removed { id: TaskId, ended_edit: bool },
    Toggled { id: TaskId, completed: bool },
    ThemeChanged(Theme),
    InputChanged,
    NoticeExpired,
    /// The action referred to something that does not exist, or had nothing
    /// to do.
    Unchanged,
}

#[derive(Debug, Clone)]
pub struct TodoState {
    store: TaskStore,
    session: EditSession,
    input: InputField,
    notifier: Notifier,
    theme: Theme,
    empty_input: EmptyInputPolicy,
}

impl Default for TodoState {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl TodoState {
    pub fn new(config: &Config) -> Self {
        Self {
            store: TaskStore::new(),
            session: EditSession::Idle,
            input: InputField::new(),
            notifier: Notifier::new(config.notice_duration()),
            theme: config.theme,
            empty_input: config.empty_input,
        }
    }

    /// Apply one action and report what changed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::EmptyInput`] when `Submit` is applied to blank
    /// input. Tasks, edit session and pending input are left untouched; an
    /// error notification is shown unless the policy is `ignore`.
    pub fn apply(&mut self, action: Action, clock: &impl Clock) -> Result<Transition, TaskError> {
        let transition = match action {
            Action::Input(edit) => {
                self.edit_input(edit);
                Transition::InputChanged
            }
            Action::Submit => self.submit(clock)?,
            Action::BeginEdit(id) => self.begin_edit(id),
            Action::Remove(id) => self.remove(id),
            Action::ToggleCompletion(id) => match self.store.toggle_completion(id) {
                Some(completed) => {
                    debug!(task_id = %id, completed, "task toggled");
                    Transition::Toggled { id, completed }
                }
                None => Transition::Unchanged,
            },
            Action::ToggleTheme => {
                self.theme = self.theme.toggled();
                debug!(theme = self.theme.label(), "theme changed");
                Transition::ThemeChanged(self.theme)
            }
            Action::Tick => {
                if self.notifier.expire(clock) {
                    Transition::NoticeExpired
                } else {
                    Transition::Unchanged
                }
            }
        };
        Ok(transition)
    }

    fn edit_input(&mut self, edit: InputEdit) {
        match edit {
            InputEdit::Insert(c) => self.input.insert(c),
            InputEdit::Backspace => self.input.backspace(),
            InputEdit::Delete => self.input.delete(),
            InputEdit::Left => self.input.move_left(),
            InputEdit::Right => self.input.move_right(),
            InputEdit::Home => self.input.move_home(),
            InputEdit::End => self.input.move_end(),
            InputEdit::Set(value) => self.input.set(&value),
        }
    }

    fn submit(&mut self, clock: &impl Clock) -> Result<Transition, TaskError> {
        let outcome = match self.store.submit(self.input.value(), &self.session, clock) {
            Ok(outcome) => outcome,
            Err(err) => {
                debug!(policy = ?self.empty_input, "rejected blank submit");
                if self.empty_input == EmptyInputPolicy::Notify {
                    self.notifier.notify(MSG_EMPTY, NoticeKind::Error, clock);
                }
                return Err(err);
            }
        };

        self.session.finish();
        self.input.clear();

        Ok(match outcome {
            SubmitOutcome::Created(id) => {
                info!(task_id = %id, "task created");
                self.notifier.notify(MSG_ADDED, NoticeKind::Success, clock);
                Transition::Created(id)
            }
            SubmitOutcome::Updated(id) => {
                info!(task_id = %id, "task updated");
                self.notifier.notify(MSG_UPDATED, NoticeKind::Success, clock);
                Transition::Updated(id)
            }
            SubmitOutcome::Unchanged => Transition::Unchanged,
        })
    }

    fn begin_edit(&mut self, id: TaskId) -> Transition {
        let Some(task) = self.store.get(id) else {
            return Transition::Unchanged;
        };
        self.input.set(&task.text);
        self.session.begin(id);
        debug!(task_id = %id, "edit started");
        Transition::EditStarted(id)
    }

    fn remove(&mut self, id: TaskId) -> Transition {
        if !self.store.remove(id) {
            return Transition::Unchanged;
        }
        let ended_edit = self.session.on_task_removed(id);
        if ended_edit {
            self.input.clear();
        }
        info!(task_id = %id, ended_edit, "task removed");
        Transition::Removed { id, ended_edit }
    }

    /// Invalidate any pending expiry before the widget goes away.
    pub fn shutdown(&mut self) {
        self.notifier.cancel();
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn session(&self) -> EditSession {
        self.session
    }

    pub fn input(&self) -> &InputField {
        &self.input
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }
}
