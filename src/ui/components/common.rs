//! Widget builders and input helpers shared by the screens.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

/// Creates a styled main dialog block
pub fn create_dialog_block<'a>(title: &'a str, theme_color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(title)
        .title_style(Style::default().fg(theme_color).add_modifier(Modifier::BOLD))
        .style(Style::default().fg(theme_color))
}

/// Creates an input field; the cursor only shows on the focused field
pub fn create_input_paragraph<'a>(value: &str, field_title: &str, focused: bool) -> Paragraph<'a> {
    let cursor = if focused { "█" } else { "" };
    let border_color = if focused { Color::Cyan } else { Color::Gray };

    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(format!(" {} ", field_title))
        .title_style(Style::default().fg(Color::White))
        .style(Style::default().fg(border_color));

    Paragraph::new(format!("{}{}", value, cursor))
        .block(input_block)
        .style(Style::default().fg(Color::White))
}

/// Password field: characters are masked
pub fn create_secret_paragraph<'a>(value: &str, field_title: &str, focused: bool) -> Paragraph<'a> {
    let masked = "•".repeat(value.chars().count());
    create_input_paragraph(&masked, field_title, focused)
}

/// Creates a selection field block (read-only display with title)
pub fn create_selection_paragraph(value: String, field_title: &str, focused: bool) -> Paragraph<'static> {
    let border_color = if focused { Color::Cyan } else { Color::Gray };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(format!(" {} ", field_title))
        .title_style(Style::default().fg(Color::White))
        .style(Style::default().fg(border_color));

    let value = if focused { format!("◀ {} ▶", value) } else { value };
    Paragraph::new(value).block(block).style(Style::default().fg(Color::White))
}

/// Instruction shortcut definition: (key, color, description)
pub type InstructionShortcut = (&'static str, Color, &'static str);

/// Creates a paragraph with color-coded instruction shortcuts
pub fn create_instructions_paragraph<'a>(instructions: &[InstructionShortcut]) -> Paragraph<'a> {
    let mut instruction_text = Vec::new();
    for (key, color, desc) in instructions {
        instruction_text.push(Span::styled(
            *key,
            Style::default().fg(*color).add_modifier(Modifier::BOLD),
        ));
        instruction_text.push(Span::styled(*desc, Style::default().fg(Color::Gray)));
    }

    Paragraph::new(Line::from(instruction_text)).alignment(Alignment::Center)
}

/// Label/value line used by detail panels
pub fn labeled_line(label: &str, value: impl Into<String>) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{}: ", label), Style::default().fg(Color::Gray)),
        Span::styled(value.into(), Style::default().fg(Color::White)),
    ])
}

/// Section heading inside a panel
pub fn heading(text: impl Into<String>) -> Line<'static> {
    Line::from(Span::styled(
        text.into(),
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    ))
}

/// Apply a key to a text buffer; returns whether the key was consumed
pub fn edit_text(buffer: &mut String, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            buffer.push(c);
            true
        }
        KeyCode::Backspace => {
            buffer.pop();
            true
        }
        _ => false,
    }
}

/// Like [`edit_text`] but only digits and one decimal point get through
pub fn edit_amount(buffer: &mut String, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char(c) if c.is_ascii_digit() => {
            buffer.push(c);
            true
        }
        KeyCode::Char('.') | KeyCode::Char(',') => {
            if !buffer.contains('.') {
                buffer.push('.');
            }
            true
        }
        KeyCode::Backspace => {
            buffer.pop();
            true
        }
        _ => false,
    }
}

/// Whole numbers only
pub fn edit_digits(buffer: &mut String, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char(c) if c.is_ascii_digit() => {
            buffer.push(c);
            true
        }
        KeyCode::Backspace => {
            buffer.pop();
            true
        }
        _ => false,
    }
}

/// Placeholder shown while a screen waits for its data
pub fn loading_paragraph<'a>(title: &'a str) -> Paragraph<'a> {
    Paragraph::new("⟳ Cargando...")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Yellow))
        .block(create_dialog_block(title, Color::Cyan))
}

/// Move a selection index within `len` items, wrapping at both ends
pub fn cycle_index(current: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        return 0;
    }
    if forward {
        (current + 1) % len
    } else if current == 0 {
        len - 1
    } else {
        current - 1
    }
}

/// Common instruction shortcuts used across screens
pub mod shortcuts {
    use super::*;

    pub const SEPARATOR: InstructionShortcut = (" • ", Color::Gray, "");
    pub const ESC_CANCEL: InstructionShortcut = ("Esc", Color::Red, " Cancelar");
    pub const ESC_BACK: InstructionShortcut = ("Esc", Color::Red, " Volver");
    pub const TAB_NEXT: InstructionShortcut = ("Tab", Color::Cyan, " Siguiente campo");
    pub const ENTER_CONFIRM: InstructionShortcut = ("Enter", Color::Green, " Confirmar");
    pub const ARROWS_MOVE: InstructionShortcut = ("↑/↓", Color::Yellow, " Mover");
    pub const PAGES: InstructionShortcut = ("←/→", Color::Yellow, " Página");
    pub const FILTER: InstructionShortcut = ("/", Color::Cyan, " Filtrar");
    pub const RELOAD: InstructionShortcut = ("r", Color::Cyan, " Recargar");
}
