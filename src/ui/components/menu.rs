//! Dashboard navigation column.

use super::common::cycle_index;
use crate::constants::APP_NAME;
use crate::models::AuthUser;
use crate::ui::core::{Action, Component, Screen};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

pub struct MenuComponent {
    entries: Vec<Screen>,
    selected: usize,
    active: Screen,
    focused: bool,
    user: Option<AuthUser>,
}

impl MenuComponent {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            selected: 0,
            active: Screen::Dashboard,
            focused: true,
            user: None,
        }
    }

    /// Show the signed-in user and the entries they may open
    pub fn set_user(&mut self, user: Option<AuthUser>, entries: Vec<Screen>) {
        self.entries = if user.is_some() { entries } else { Vec::new() };
        self.user = user;
        self.selected = 0;
        self.active = Screen::Dashboard;
        self.focused = true;
    }

    pub fn active(&self) -> Screen {
        self.active
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Select the entry under a mouse click, if any
    pub fn click(&mut self, area: Rect, row: u16) -> Action {
        // Header takes 4 rows, then the list border
        let first_row = area.y + 5;
        if row < first_row {
            return Action::None;
        }
        match self.entries.get((row - first_row) as usize) {
            Some(screen) => {
                self.selected = (row - first_row) as usize;
                Action::Navigate(*screen)
            }
            None => Action::None,
        }
    }
}

impl Default for MenuComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for MenuComponent {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        if !self.focused {
            return Action::None;
        }
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                self.selected = cycle_index(self.selected, self.entries.len(), true);
                Action::Render
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = cycle_index(self.selected, self.entries.len(), false);
                Action::Render
            }
            KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => match self.entries.get(self.selected) {
                Some(screen) => Action::Navigate(*screen),
                None => Action::None,
            },
            _ => Action::None,
        }
    }

    fn update(&mut self, action: Action) -> Action {
        match &action {
            Action::Navigate(screen) => {
                self.active = *screen;
                self.focused = *screen == Screen::Dashboard;
                if let Some(pos) = self.entries.iter().position(|s| s == screen) {
                    self.selected = pos;
                }
            }
            Action::Back => {
                self.active = Screen::Dashboard;
                self.focused = true;
            }
            _ => {}
        }
        action
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let chunks = Layout::vertical([Constraint::Length(4), Constraint::Min(0)]).split(rect);

        let mut header = vec![Line::from(Span::styled(
            format!("🥐 {}", APP_NAME),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ))];
        if let Some(user) = &self.user {
            header.push(Line::from(Span::styled(user.name.clone(), Style::default().fg(Color::White))));
            header.push(Line::from(Span::styled(
                user.role.label(),
                Style::default().fg(Color::Gray),
            )));
        }
        f.render_widget(Paragraph::new(header), chunks[0]);

        let items: Vec<ListItem> = self
            .entries
            .iter()
            .map(|screen| {
                let style = if *screen == self.active {
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                };
                ListItem::new(Line::from(Span::styled(screen.label(), style)))
            })
            .collect();

        let border_color = if self.focused { Color::Cyan } else { Color::DarkGray };
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .title(" Menú ")
                    .border_style(Style::default().fg(border_color)),
            )
            .highlight_style(Style::default().bg(Color::DarkGray))
            .highlight_symbol("▶ ");

        let mut state = ListState::default();
        if !self.entries.is_empty() {
            state.select(Some(self.selected));
        }
        f.render_stateful_widget(list, chunks[1], &mut state);
    }
}
