//! Paginated, filterable table widget over any serializable row type.

use super::common::cycle_index;
use crate::filter::{FilterConfig, FilterState};
use crate::table::{render_row, BadgeTone, Cell, Pagination, TableConfig};
use chrono::FixedOffset;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Row, Table, TableState},
    Frame,
};
use serde::Serialize;

fn tone_color(tone: BadgeTone) -> Color {
    match tone {
        BadgeTone::Positive => Color::Green,
        BadgeTone::Negative => Color::Red,
        BadgeTone::Warning => Color::Yellow,
        BadgeTone::Neutral => Color::Blue,
    }
}

fn cell_widget(cell: Cell) -> ratatui::widgets::Cell<'static> {
    match cell {
        Cell::Text(text) => ratatui::widgets::Cell::from(text),
        Cell::Badge { label, tone } => ratatui::widgets::Cell::from(Span::styled(
            format!(" {} ", label),
            Style::default().fg(Color::Black).bg(tone_color(tone)),
        )),
    }
}

pub struct DataTable<T> {
    config: TableConfig,
    items: Vec<T>,
    pagination: Pagination,
    filters: FilterState,
    editing_filter: bool,
    /// Row index within the current page
    selected: usize,
}

impl<T: Serialize> DataTable<T> {
    pub fn new(config: TableConfig, filters: Vec<FilterConfig>) -> Self {
        let pagination = Pagination::new(config.items_per_page);
        Self {
            config,
            items: Vec::new(),
            pagination,
            filters: FilterState::new(filters),
            editing_filter: false,
            selected: 0,
        }
    }

    /// Replace the rows, keeping the page when it still exists
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        let total = self.filtered().len();
        self.pagination.clamp(total);
        self.clamp_selection();
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn is_editing_filter(&self) -> bool {
        self.editing_filter
    }

    pub fn filtered(&self) -> Vec<&T> {
        self.filters.apply(&self.items)
    }

    fn page_len(&self) -> usize {
        let (start, end) = self.pagination.bounds(self.filtered().len());
        end - start
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.page_len().saturating_sub(1));
    }

    pub fn selected_item(&self) -> Option<&T> {
        let filtered = self.filtered();
        let (start, _) = self.pagination.bounds(filtered.len());
        filtered.get(start + self.selected).copied()
    }

    /// Navigation and filter editing; returns whether the key was consumed
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if self.editing_filter {
            match key.code {
                KeyCode::Esc | KeyCode::Enter => self.editing_filter = false,
                KeyCode::Tab => self.filters.focus_next(),
                KeyCode::Backspace => self.filters.pop_char(),
                KeyCode::Delete => self.filters.reset(),
                KeyCode::Char(c) => self.filters.push_char(c),
                _ => return false,
            }
            // Filter edits restart from the first page
            self.pagination.reset();
            self.selected = 0;
            return true;
        }

        let total = self.filtered().len();
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                self.selected = cycle_index(self.selected, self.page_len(), true);
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = cycle_index(self.selected, self.page_len(), false);
            }
            KeyCode::Right | KeyCode::PageDown => {
                self.pagination.next(total);
                self.selected = 0;
            }
            KeyCode::Left | KeyCode::PageUp => {
                self.pagination.previous();
                self.selected = 0;
            }
            KeyCode::Char('/') if !self.filters.configs().is_empty() => {
                self.editing_filter = true;
            }
            _ => return false,
        }
        true
    }

    fn render_filters(&self, f: &mut Frame, area: Rect) {
        let mut spans = Vec::new();
        for (i, config) in self.filters.configs().iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled("  │  ", Style::default().fg(Color::DarkGray)));
            }
            let focused = self.editing_filter && i == self.filters.focused;
            let value = self.filters.get(&config.field);
            spans.push(Span::styled(
                format!("{}: ", config.label),
                Style::default().fg(if focused { Color::Cyan } else { Color::Gray }),
            ));
            if value.is_empty() && !focused {
                spans.push(Span::styled(config.placeholder.clone(), Style::default().fg(Color::DarkGray)));
            } else {
                spans.push(Span::styled(value.to_string(), Style::default().fg(Color::White)));
            }
            if focused {
                spans.push(Span::styled("█", Style::default().fg(Color::Cyan)));
            }
        }
        f.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    pub fn render(&self, f: &mut Frame, area: Rect, title: &str, tz: FixedOffset) {
        let has_filters = !self.filters.configs().is_empty();
        let chunks = Layout::vertical([
            Constraint::Length(if has_filters { 1 } else { 0 }),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

        if has_filters {
            self.render_filters(f, chunks[0]);
        }

        let filtered = self.filtered();
        let total = filtered.len();
        let (start, end) = self.pagination.bounds(total);

        let header = Row::new(
            self.config
                .columns
                .iter()
                .map(|c| ratatui::widgets::Cell::from(c.header.clone())),
        )
        .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));

        let rows: Vec<Row> = filtered[start..end]
            .iter()
            .map(|item| {
                Row::new(
                    render_row(*item, &self.config.columns, tz)
                        .into_iter()
                        .map(cell_widget),
                )
            })
            .collect();

        let widths: Vec<Constraint> = self
            .config
            .columns
            .iter()
            .map(|c| Constraint::Percentage(c.width))
            .collect();

        let table = Table::new(rows, widths)
            .header(header)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .title(format!(" {} ", title))
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
            .highlight_symbol("▶ ");

        let mut state = TableState::default();
        if end > start {
            state.select(Some(self.selected));
        }
        f.render_stateful_widget(table, chunks[1], &mut state);

        let footer = format!(
            "{}  •  Página {}/{}",
            self.pagination.range_label(total, &self.config.page_labels),
            self.pagination.current_page(),
            self.pagination.total_pages(total)
        );
        f.render_widget(
            Paragraph::new(footer).style(Style::default().fg(Color::Gray)),
            chunks[2],
        );
    }
}
