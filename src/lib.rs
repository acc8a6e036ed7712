//! # tasklist
//!
//! A small terminal task list: add, edit, delete and complete tasks held in
//! memory, with a light/dark theme and short-lived status messages.
//!
//! ## Layout
//!
//! - [`store`]: ordered task list and id counter.
//! - [`edit`]: whether the input box creates or rewrites a task.
//! - [`notify`]: single status message with clock-driven expiry.
//! - [`state`]: the owning container; every change goes through
//!   [`state::TodoState::apply`].
//! - [`tui`]: `ratatui` front end that maps keys to actions and draws.
//!
//! ## Example
//!
//! ```
//! use mockable::DefaultClock;
//! use tasklist::state::{Action, InputEdit, TodoState};
//!
//! let mut state = TodoState::default();
//! state.apply(Action::Input(InputEdit::Set("Buy milk".into())), &DefaultClock).unwrap();
//! state.apply(Action::Submit, &DefaultClock).unwrap();
//! assert_eq!(state.store().len(), 1);
//! assert_eq!(state.notifier().text(), "Task added!");
//! ```
//!
//! Nothing is written to disk. Tasks live as long as the process.

pub mod cli;
pub mod config;
pub mod edit;
pub mod error;
pub mod input;
pub mod logging;
pub mod notify;
pub mod state;
pub mod store;
pub mod task;
pub mod theme;
pub mod tui {
    pub mod app;
    pub mod run;
}
