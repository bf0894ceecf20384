//! Toast stack drawn in the top-right corner.

use crate::constants::{MAX_VISIBLE_TOASTS, TOAST_WIDTH};
use crate::notify::{Toast, ToastKind, Toasts};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use std::time::{Duration, Instant};

fn kind_style(kind: ToastKind) -> (Color, &'static str) {
    match kind {
        ToastKind::Success => (Color::Green, "✓"),
        ToastKind::Error => (Color::Red, "✗"),
        ToastKind::Info => (Color::Cyan, "ℹ"),
    }
}

/// Rows a toast needs: borders, title and wrapped description
fn toast_height(toast: &Toast, inner_width: u16) -> u16 {
    let width = inner_width.max(1) as usize;
    let description_rows: usize = toast
        .description
        .as_deref()
        .map(|d| {
            d.lines()
                .map(|line| line.chars().count().max(1).div_ceil(width))
                .sum()
        })
        .unwrap_or(0);
    3 + description_rows as u16
}

pub struct ToastsComponent {
    toasts: Toasts,
}

impl ToastsComponent {
    pub fn new(default_duration: Duration) -> Self {
        Self {
            toasts: Toasts::new(default_duration),
        }
    }

    pub fn push(&mut self, toast: Toast) {
        log::debug!("Toast: {}", toast.title);
        self.toasts.push(toast);
    }

    /// Drop expired toasts; returns true when something disappeared
    pub fn tick(&mut self, now: Instant) -> bool {
        let before = self.toasts.items().len();
        self.toasts.prune(now);
        self.toasts.items().len() != before
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    pub fn clear(&mut self) {
        self.toasts.clear();
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        let width = TOAST_WIDTH.min(area.width);
        let x = area.x + area.width.saturating_sub(width + 1);
        let mut y = area.y + 1;

        // Newest on top
        for toast in self.toasts.items().iter().rev().take(MAX_VISIBLE_TOASTS) {
            let height = toast_height(toast, width.saturating_sub(2));
            if y + height > area.y + area.height {
                break;
            }
            let rect = Rect { x, y, width, height };
            let (color, icon) = kind_style(toast.kind);

            let mut lines = vec![Line::from(Span::styled(
                format!("{} {}", icon, toast.title),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ))];
            if let Some(description) = &toast.description {
                lines.extend(
                    description
                        .lines()
                        .map(|l| Line::from(Span::styled(l.to_string(), Style::default().fg(Color::White)))),
                );
            }

            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(color))
                .style(Style::default().bg(Color::Black));

            f.render_widget(Clear, rect);
            f.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: true }), rect);
            y += height;
        }
    }
}
