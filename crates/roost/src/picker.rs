//! Full-screen fuzzy picker over stdin/stdout.

use std::io::{self, IsTerminal};

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::*;
use ratatui::widgets::*;
use tracing::debug;

use roost_core::picker::filter_items;
use roost_core::{Picker, PickerError, PickerItem};

/// Restores the terminal when dropped, including on early `?` returns.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

/// Query, filtered view and cursor.
struct PickerState<'a> {
    items: &'a [PickerItem],
    query: String,
    visible: Vec<usize>,
    selected: usize,
}

impl<'a> PickerState<'a> {
    fn new(items: &'a [PickerItem]) -> Self {
        Self {
            items,
            query: String::new(),
            visible: (0..items.len()).collect(),
            selected: 0,
        }
    }

    fn refilter(&mut self) {
        self.visible = filter_items(&self.query, self.items);
        if self.selected >= self.visible.len() {
            self.selected = self.visible.len().saturating_sub(1);
        }
    }

    fn push(&mut self, c: char) {
        self.query.push(c);
        self.refilter();
    }

    fn backspace(&mut self) {
        if self.query.pop().is_some() {
            self.refilter();
        }
    }

    fn clear(&mut self) {
        self.query.clear();
        self.refilter();
    }

    fn next(&mut self) {
        if !self.visible.is_empty() {
            self.selected = (self.selected + 1).min(self.visible.len() - 1);
        }
    }

    fn previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn chosen_key(&self) -> Option<String> {
        self.visible
            .get(self.selected)
            .map(|&index| self.items[index].key.clone())
    }
}

enum Step {
    Continue,
    Done(Option<String>),
}

fn handle_key(state: &mut PickerState<'_>, code: KeyCode, modifiers: KeyModifiers) -> Step {
    match (code, modifiers) {
        (KeyCode::Esc, _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => Step::Done(None),
        (KeyCode::Enter, _) => match state.chosen_key() {
            Some(key) => Step::Done(Some(key)),
            None => Step::Continue,
        },
        (KeyCode::Down, _) | (KeyCode::Char('n'), KeyModifiers::CONTROL) => {
            state.next();
            Step::Continue
        }
        (KeyCode::Up, _) | (KeyCode::Char('p'), KeyModifiers::CONTROL) => {
            state.previous();
            Step::Continue
        }
        (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
            state.clear();
            Step::Continue
        }
        (KeyCode::Backspace, _) => {
            state.backspace();
            Step::Continue
        }
        (KeyCode::Char(c), m) if !m.contains(KeyModifiers::CONTROL) => {
            state.push(c);
            Step::Continue
        }
        _ => Step::Continue,
    }
}

/// Interactive picker drawn with ratatui on the alternate screen.
pub struct TerminalPicker;

impl Picker for TerminalPicker {
    fn pick(&self, title: &str, items: &[PickerItem]) -> Result<Option<String>, PickerError> {
        if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
            return Err(PickerError::NotATerminal);
        }

        enable_raw_mode()?;
        let _guard = TerminalGuard;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

        let mut state = PickerState::new(items);
        let choice = loop {
            terminal.draw(|frame| render(frame, title, &state))?;

            if let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
                && let Step::Done(choice) = handle_key(&mut state, key.code, key.modifiers)
            {
                break choice;
            }
        };

        terminal.show_cursor()?;
        debug!(event = "cli.picker.closed", chosen = choice.is_some());
        Ok(choice)
    }
}

fn render(frame: &mut Frame, title: &str, state: &PickerState<'_>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let query = Paragraph::new(format!("> {}", state.query)).block(
        Block::default()
            .title(format!(" {} ", title))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(query, chunks[0]);

    let rows: Vec<ListItem> = state
        .visible
        .iter()
        .map(|&index| {
            let item = &state.items[index];
            let label_style = if item.active {
                Style::default().fg(Color::Green).bold()
            } else {
                Style::default()
            };
            ListItem::new(Line::from(vec![
                Span::styled(item.label.clone(), label_style),
                Span::raw("  "),
                Span::styled(item.subtitle.clone(), Style::default().fg(Color::DarkGray)),
            ]))
        })
        .collect();

    let list = List::new(rows)
        .block(Block::default().borders(Borders::ALL).title(format!(
            " {}/{} ",
            state.visible.len(),
            state.items.len()
        )))
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("▶ ");

    let mut list_state = ListState::default();
    if !state.visible.is_empty() {
        list_state.select(Some(state.selected));
    }
    frame.render_stateful_widget(list, chunks[1], &mut list_state);

    let help = Paragraph::new(" type to filter | ↑/↓ move | enter open | esc cancel")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, chunks[2]);
}
