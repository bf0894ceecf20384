//! Status bar component

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

/// One-line footer: busy indicator or the global shortcuts
pub struct StatusBar;

impl StatusBar {
    pub fn render(f: &mut Frame, area: Rect, busy: Option<&str>, signed_in: bool) {
        let (text, color) = match busy {
            Some(description) => (format!("⟳ {}...", description), Color::Yellow),
            None if signed_in => (
                "Esc: inicio • G: registros • L: cerrar sesión • q: salir".to_string(),
                Color::Gray,
            ),
            None => ("Tab: cambiar campo • Enter: continuar • Ctrl+C: salir".to_string(), Color::Gray),
        };

        let status_bar = Paragraph::new(text)
            .alignment(Alignment::Center)
            .style(Style::default().fg(color));

        f.render_widget(status_bar, area);
    }
}
