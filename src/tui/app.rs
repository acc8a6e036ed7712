//! Main application logic for the terminal user interface.
//!
//! `App` owns a [`TodoState`] and a clock, turns key presses into state
//! actions, and renders the header, status message, input box and task list.
//! All task logic lives in the state container; this module only maps events
//! and draws.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use mockable::Clock;
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame, Terminal,
};
use tracing::warn;

use crate::notify::NoticeKind;
use crate::state::{Action, InputEdit, TodoState, Transition};
use crate::task::TaskId;
use crate::theme::{Palette, AMBER, BRICK_RED, LEAF_GREEN};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// What a key press means for the app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyIntent {
    Apply(Action),
    SelectPrevious,
    SelectNext,
    Quit,
    Ignore,
}

/// Translate a key press into an intent.
///
/// Plain characters always go to the input box, so list actions sit on Ctrl
/// chords. Ctrl together with Alt is AltGr on some layouts and is treated as a
/// typed character. List actions with nothing selected are ignored.
pub fn key_intent(key: KeyEvent, selected: Option<TaskId>) -> KeyIntent {
    if key.kind != KeyEventKind::Press {
        return KeyIntent::Ignore;
    }

    let chord = key.modifiers.contains(KeyModifiers::CONTROL)
        && !key.modifiers.contains(KeyModifiers::ALT);
    if chord {
        let on_selected = |make: fn(TaskId) -> Action| {
            selected.map_or(KeyIntent::Ignore, |id| KeyIntent::Apply(make(id)))
        };
        return match key.code {
            KeyCode::Char('c') => KeyIntent::Quit,
            KeyCode::Char('e') => on_selected(Action::BeginEdit),
            KeyCode::Char('d') => on_selected(Action::Remove),
            KeyCode::Char('t') => on_selected(Action::ToggleCompletion),
            KeyCode::Char('l') => KeyIntent::Apply(Action::ToggleTheme),
            _ => KeyIntent::Ignore,
        };
    }

    match key.code {
        KeyCode::Esc => KeyIntent::Quit,
        KeyCode::Enter => KeyIntent::Apply(Action::Submit),
        KeyCode::Up => KeyIntent::SelectPrevious,
        KeyCode::Down => KeyIntent::SelectNext,
        KeyCode::Char(c) => KeyIntent::Apply(Action::Input(InputEdit::Insert(c))),
        KeyCode::Backspace => KeyIntent::Apply(Action::Input(InputEdit::Backspace)),
        KeyCode::Delete => KeyIntent::Apply(Action::Input(InputEdit::Delete)),
        KeyCode::Left => KeyIntent::Apply(Action::Input(InputEdit::Left)),
        KeyCode::Right => KeyIntent::Apply(Action::Input(InputEdit::Right)),
        KeyCode::Home => KeyIntent::Apply(Action::Input(InputEdit::Home)),
        KeyCode::End => KeyIntent::Apply(Action::Input(InputEdit::End)),
        _ => KeyIntent::Ignore,
    }
}

/// Terminal front end for one task list.
pub struct App<C: Clock> {
    state: TodoState,
    clock: C,
    list_state: ListState,
}

impl<C: Clock> App<C> {
    pub fn new(state: TodoState, clock: C) -> Self {
        Self {
            state,
            clock,
            list_state: ListState::default(),
        }
    }

    pub fn state(&self) -> &TodoState {
        &self.state
    }

    /// Id of the highlighted task.
    pub fn selected_task(&self) -> Option<TaskId> {
        self.list_state
            .selected()
            .and_then(|idx| self.state.store().as_slice().get(idx))
            .map(|task| task.id())
    }

    /// Handle one key press. Returns true if the app should quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key_intent(key, self.selected_task()) {
            KeyIntent::Quit => return true,
            KeyIntent::Ignore => {}
            KeyIntent::SelectPrevious => self.move_selection(false),
            KeyIntent::SelectNext => self.move_selection(true),
            KeyIntent::Apply(action) => self.dispatch(action),
        }
        false
    }

    fn dispatch(&mut self, action: Action) {
        match self.state.apply(action, &self.clock) {
            Ok(Transition::Created(id)) => {
                self.list_state.select(self.state.store().position(id));
            }
            Ok(_) => {}
            // Feedback for a blank submit comes from the notifier.
            Err(err) => warn!(error = %err, "submit rejected"),
        }
        self.clamp_selection();
    }

    /// Expire the status message if its time is up.
    pub fn tick(&mut self) {
        // Tick never fails; only Submit can.
        let _ = self.state.apply(Action::Tick, &self.clock);
    }

    fn move_selection(&mut self, forward: bool) {
        let len = self.state.store().len();
        if len == 0 {
            self.list_state.select(None);
            return;
        }
        let next = match (self.list_state.selected(), forward) {
            (None, _) => 0,
            (Some(i), true) => (i + 1).min(len - 1),
            (Some(i), false) => i.saturating_sub(1),
        };
        self.list_state.select(Some(next));
    }

    fn clamp_selection(&mut self) {
        let len = self.state.store().len();
        let selected = match self.list_state.selected() {
            _ if len == 0 => None,
            None => Some(0),
            Some(i) => Some(i.min(len - 1)),
        };
        self.list_state.select(selected);
    }

    /// Release the notifier's pending expiry before the UI goes away.
    pub fn shutdown(&mut self) {
        self.state.shutdown();
    }

    /// Poll the terminal for one key event.
    ///
    /// Returns true if the app should quit.
    fn handle_input(&mut self) -> io::Result<bool> {
        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                return Ok(self.handle_key(key));
            }
        }
        Ok(false)
    }

    fn render_header(&self, f: &mut Frame, area: Rect, palette: &Palette) {
        let store = self.state.store();
        let header = Paragraph::new(Line::from(vec![
            Span::styled("Task Manager", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(
                format!(
                    "{} done of {}  |  {} theme",
                    store.completed_count(),
                    store.len(),
                    self.state.theme().label()
                ),
                Style::default().fg(palette.muted).add_modifier(Modifier::ITALIC),
            ),
        ]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.border)),
        )
        .alignment(Alignment::Center);
        f.render_widget(header, area);
    }

    fn render_notice(&self, f: &mut Frame, area: Rect, palette: &Palette) {
        let Some(notice) = self.state.notifier().current() else {
            return;
        };
        let (bg, fg) = match notice.kind {
            NoticeKind::Success => (palette.success_bg, palette.success_fg),
            NoticeKind::Error => (palette.error_bg, palette.error_fg),
        };
        let message = Paragraph::new(notice.text.as_str())
            .style(Style::default().bg(bg).fg(fg))
            .alignment(Alignment::Center);
        f.render_widget(message, area);
    }

    fn render_input(&self, f: &mut Frame, area: Rect, palette: &Palette) {
        let (label, colour) = if self.state.session().is_editing() {
            (" Update Task ", AMBER)
        } else {
            (" Add Task ", LEAF_GREEN)
        };
        let input = self.state.input();
        let body = if input.is_empty() {
            Line::from(Span::styled(
                "Enter a task...",
                Style::default().fg(palette.muted),
            ))
        } else {
            Line::from(input.value())
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.border))
            .title(Span::styled(
                label,
                Style::default().fg(colour).add_modifier(Modifier::BOLD),
            ));

        // Keep the cursor inside the box by scrolling the line left.
        let visible = area.width.saturating_sub(2).max(1);
        let cursor = u16::try_from(input.cursor()).unwrap_or(u16::MAX);
        let scroll = cursor.saturating_sub(visible - 1);
        f.render_widget(Paragraph::new(body).block(block).scroll((0, scroll)), area);

        let cursor_x = (area.x + 1).saturating_add(cursor - scroll);
        f.set_cursor_position((cursor_x, area.y + 1));
    }

    fn render_task_list(&mut self, f: &mut Frame, area: Rect, palette: &Palette) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.border))
            .title(format!(" Tasks ({}) ", self.state.store().len()));

        if self.state.store().is_empty() {
            let empty = Paragraph::new(Span::styled(
                "No tasks added yet.",
                Style::default().fg(palette.muted).add_modifier(Modifier::ITALIC),
            ))
            .block(block)
            .alignment(Alignment::Center);
            f.render_widget(empty, area);
            return;
        }

        let editing = self.state.session().target();
        let items: Vec<ListItem> = self
            .state
            .store()
            .iter()
            .map(|task| {
                let marker = if task.completed { "[x] " } else { "[ ] " };
                let mut text_style = Style::default().fg(palette.foreground);
                if task.completed {
                    text_style = text_style
                        .fg(palette.muted)
                        .add_modifier(Modifier::CROSSED_OUT);
                }
                let mut spans = vec![
                    Span::raw(marker),
                    Span::styled(task.text.clone(), text_style),
                ];
                if editing == Some(task.id()) {
                    spans.push(Span::styled("  (editing)", Style::default().fg(AMBER)));
                }
                ListItem::new(Line::from(spans))
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(
                Style::default()
                    .bg(palette.highlight_bg)
                    .fg(palette.highlight_fg),
            )
            .highlight_symbol(">> ");
        f.render_stateful_widget(list, area, &mut self.list_state);
    }

    fn render_status_bar(&self, f: &mut Frame, area: Rect, palette: &Palette) {
        let hint = |key: &'static str, what: &'static str, colour: Color| {
            [
                Span::styled(key, Style::default().fg(colour).add_modifier(Modifier::BOLD)),
                Span::raw(what),
            ]
        };
        let spans: Vec<Span> = [
            hint("Enter", " submit  ", LEAF_GREEN),
            hint("Up/Down", " select  ", palette.foreground),
            hint("^E", " edit  ", AMBER),
            hint("^D", " delete  ", BRICK_RED),
            hint("^T", " done  ", palette.foreground),
            hint("^L", " theme  ", palette.foreground),
            hint("Esc", " quit", palette.foreground),
        ]
        .into_iter()
        .flatten()
        .collect();
        let status = Paragraph::new(Line::from(spans))
            .style(Style::default().fg(palette.muted))
            .alignment(Alignment::Left);
        f.render_widget(status, area);
    }

    /// Main render function.
    pub fn render(&mut self, f: &mut Frame) {
        let palette = self.state.theme().palette();
        let area = f.area();
        let base = Style::default().bg(palette.background).fg(palette.foreground);
        f.render_widget(Block::default().style(base), area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // header
                Constraint::Length(1), // status message
                Constraint::Length(3), // input
                Constraint::Min(3),    // tasks
                Constraint::Length(1), // key hints
            ])
            .split(area);

        self.render_header(f, chunks[0], &palette);
        self.render_notice(f, chunks[1], &palette);
        self.render_input(f, chunks[2], &palette);
        self.render_task_list(f, chunks[3], &palette);
        self.render_status_bar(f, chunks[4], &palette);
    }

    /// Main event loop for the TUI application.
    ///
    /// Handles rendering, input and message expiry until the user exits.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        let result = loop {
            if let Err(err) = terminal.draw(|f| self.render(f)) {
                break Err(err);
            }
            match self.handle_input() {
                Ok(true) => break Ok(()),
                Ok(false) => self.tick(),
                Err(err) => break Err(err),
            }
        };
        self.shutdown();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockable::DefaultClock;
    use ratatui::backend::TestBackend;
    use rstest::{fixture, rstest};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_line(app: &mut App<DefaultClock>, text: &str) {
        for c in text.chars() {
            app.handle_key(press(KeyCode::Char(c)));
        }
        app.handle_key(press(KeyCode::Enter));
    }

    fn draw(app: &mut App<DefaultClock>, width: u16, height: u16) -> Terminal<TestBackend> {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).expect("test terminal");
        terminal.draw(|f| app.render(f)).expect("draw");
        terminal
    }

    fn render_to_string(app: &mut App<DefaultClock>, width: u16, height: u16) -> String {
        let terminal = draw(app, width, height);
        let buf = terminal.backend().buffer();
        let area = buf.area;
        let mut lines = Vec::new();
        for y in area.y..area.y + area.height {
            let mut line = String::new();
            for x in area.x..area.x + area.width {
                line.push_str(buf[(x, y)].symbol());
            }
            lines.push(line.trim_end().to_string());
        }
        lines.join("\n")
    }

    #[fixture]
    fn app() -> App<DefaultClock> {
        App::new(TodoState::default(), DefaultClock)
    }

    #[rstest]
    #[case(press(KeyCode::Esc), KeyIntent::Quit)]
    #[case(ctrl('c'), KeyIntent::Quit)]
    #[case(press(KeyCode::Enter), KeyIntent::Apply(Action::Submit))]
    #[case(ctrl('l'), KeyIntent::Apply(Action::ToggleTheme))]
    #[case(ctrl('e'), KeyIntent::Apply(Action::BeginEdit(TaskId(3))))]
    #[case(ctrl('d'), KeyIntent::Apply(Action::Remove(TaskId(3))))]
    #[case(ctrl('t'), KeyIntent::Apply(Action::ToggleCompletion(TaskId(3))))]
    #[case(press(KeyCode::Char('e')), KeyIntent::Apply(Action::Input(InputEdit::Insert('e'))))]
    fn keys_map_to_intents(#[case] key: KeyEvent, #[case] expected: KeyIntent) {
        assert_eq!(key_intent(key, Some(TaskId(3))), expected);
    }

    #[test]
    fn altgr_characters_are_typed() {
        let altgr = KeyEvent::new(
            KeyCode::Char('@'),
            KeyModifiers::CONTROL | KeyModifiers::ALT,
        );
        assert_eq!(
            key_intent(altgr, Some(TaskId(3))),
            KeyIntent::Apply(Action::Input(InputEdit::Insert('@')))
        );
        let altgr_e = KeyEvent::new(
            KeyCode::Char('e'),
            KeyModifiers::CONTROL | KeyModifiers::ALT,
        );
        assert_eq!(
            key_intent(altgr_e, Some(TaskId(3))),
            KeyIntent::Apply(Action::Input(InputEdit::Insert('e')))
        );
    }

    #[test]
    fn list_chords_need_a_selection() {
        assert_eq!(key_intent(ctrl('d'), None), KeyIntent::Ignore);
    }

    #[rstest]
    fn typing_and_enter_adds_and_selects(mut app: App<DefaultClock>) {
        type_line(&mut app, "A");
        type_line(&mut app, "B");
        assert_eq!(app.state().store().len(), 2);
        assert_eq!(app.selected_task(), Some(TaskId(2)));
    }

    #[rstest]
    fn delete_chord_removes_selected(mut app: App<DefaultClock>) {
        type_line(&mut app, "A");
        type_line(&mut app, "B");
        app.handle_key(press(KeyCode::Up));
        app.handle_key(ctrl('d'));
        let texts: Vec<_> = app.state().store().iter().map(|t| t.text.clone()).collect();
        assert_eq!(texts, ["B"]);
        assert_eq!(app.selected_task(), Some(TaskId(2)));
    }

    #[rstest]
    fn empty_list_renders_placeholder(mut app: App<DefaultClock>) {
        let screen = render_to_string(&mut app, 60, 14);
        assert!(screen.contains("Task Manager"));
        assert!(screen.contains("Add Task"));
        assert!(screen.contains("No tasks added yet."));
    }

    #[rstest]
    fn edit_mode_and_completion_are_visible(mut app: App<DefaultClock>) {
        type_line(&mut app, "Buy milk");
        app.handle_key(ctrl('t'));
        app.handle_key(ctrl('e'));

        let screen = render_to_string(&mut app, 60, 14);

        assert!(screen.contains("Update Task"));
        assert!(screen.contains("[x] Buy milk"));
        assert!(screen.contains("(editing)"));
        assert!(screen.contains("Task added!"));
    }

    #[rstest]
    fn long_input_scrolls_to_keep_cursor_visible(mut app: App<DefaultClock>) {
        for c in "abcdefghijklmnopqrstuvwxyz0123".chars() {
            app.handle_key(press(KeyCode::Char(c)));
        }

        let mut terminal = draw(&mut app, 20, 14);

        // Box is 18 columns inside: 17 visible chars plus the cursor cell.
        let input_row: String = (0..20)
            .map(|x| terminal.backend().buffer()[(x, 5)].symbol().to_string())
            .collect();
        assert!(input_row.contains("nopqrstuvwxyz0123"), "row was {input_row:?}");
        assert!(!input_row.contains("abc"));
        let cursor = terminal.backend_mut().get_cursor_position().expect("cursor");
        assert_eq!((cursor.x, cursor.y), (18, 5));
    }
}
