//! Log viewer overlay (`G`).

use crate::constants::DIALOG_TITLE_LOGS;
use crate::logger::Logger;
use crate::ui::core::{Action, Component};
use crate::ui::layout::LayoutManager;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

fn level_color(line: &str) -> Color {
    if line.contains("ERROR") {
        Color::Red
    } else if line.contains("WARN") {
        Color::Yellow
    } else if line.contains("DEBUG") || line.contains("TRACE") {
        Color::DarkGray
    } else {
        Color::White
    }
}

pub struct LogsDialog {
    logger: Logger,
    visible: bool,
    scroll_offset: usize,
    scrollbar: ScrollbarState,
}

impl LogsDialog {
    pub fn new(logger: Logger) -> Self {
        Self {
            logger,
            visible: false,
            scroll_offset: 0,
            scrollbar: ScrollbarState::new(0),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        self.scroll_offset = 0;
    }
}

impl Component for LogsDialog {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        if !self.visible {
            return Action::None;
        }
        match key.code {
            KeyCode::Esc | KeyCode::Char('G') | KeyCode::Char('q') => Action::ShowLogs(false),
            KeyCode::Down | KeyCode::Char('j') => {
                let total = self.logger.get_logs().len();
                self.scroll_offset = (self.scroll_offset + 1).min(total.saturating_sub(1));
                Action::Render
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.scroll_offset = self.scroll_offset.saturating_sub(1);
                Action::Render
            }
            KeyCode::Home => {
                self.scroll_offset = 0;
                Action::Render
            }
            _ => Action::Render,
        }
    }

    fn update(&mut self, action: Action) -> Action {
        if let Action::ShowLogs(visible) = action {
            self.set_visible(visible);
            return Action::Render;
        }
        action
    }

    fn captures_input(&self) -> bool {
        self.visible
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        if !self.visible {
            return;
        }
        let modal_area = LayoutManager::centered_rect(80, 80, rect);
        f.render_widget(Clear, modal_area);

        let block = Block::default()
            .title(DIALOG_TITLE_LOGS)
            .borders(Borders::ALL)
            .style(Style::default().bg(Color::Black))
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(modal_area);
        f.render_widget(block, modal_area);

        let logs = self.logger.get_logs();
        if logs.is_empty() {
            let empty = Paragraph::new("Sin registros")
                .style(Style::default().fg(Color::Gray))
                .alignment(Alignment::Center);
            f.render_widget(empty, inner);
            return;
        }

        let visible_height = inner.height as usize;
        let start = self.scroll_offset.min(logs.len().saturating_sub(1));
        let items: Vec<ListItem> = logs
            .iter()
            .skip(start)
            .take(visible_height)
            .map(|line| match line.find("] ") {
                Some(end) => ListItem::new(Line::from(vec![
                    Span::styled(line[..=end].to_string(), Style::default().fg(Color::DarkGray)),
                    Span::styled(line[end + 1..].to_string(), Style::default().fg(level_color(line))),
                ])),
                None => ListItem::new(Line::from(Span::styled(line.clone(), Style::default().fg(level_color(line))))),
            })
            .collect();

        // Scrollbar replaces the right border once the log outgrows the viewport
        if logs.len() <= visible_height {
            f.render_widget(List::new(items), inner);
            return;
        }
        let list_area = Rect {
            width: inner.width.saturating_sub(1),
            ..inner
        };
        f.render_widget(List::new(items), list_area);

        let scrollbar_area = Rect {
            x: modal_area.x + modal_area.width.saturating_sub(1),
            width: 1,
            ..inner
        };
        self.scrollbar = self
            .scrollbar
            .content_length(logs.len())
            .viewport_content_length(visible_height)
            .position(start);
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("↑"))
            .end_symbol(Some("↓"))
            .style(Style::default().fg(Color::DarkGray));
        f.render_stateful_widget(scrollbar, scrollbar_area, &mut self.scrollbar);
    }
}
