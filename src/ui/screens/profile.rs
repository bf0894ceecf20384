use crate::models::User;
use crate::profile::{password_change_toast, profile_sections};
use crate::ui::components::common::{create_instructions_paragraph, loading_paragraph, shortcuts, InstructionShortcut};
use crate::ui::core::{Action, Component, Screen, UiContext};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

const CHANGE_PASSWORD: InstructionShortcut = ("p", Color::Cyan, " Cambiar contraseña");

pub struct ProfileScreen {
    ctx: UiContext,
    user: Option<User>,
}

impl ProfileScreen {
    pub fn new(ctx: UiContext) -> Self {
        Self { ctx, user: None }
    }
}

impl Component for ProfileScreen {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('p') => Action::Toast(password_change_toast()),
            KeyCode::Char('r') => Action::LoadScreen(Screen::Profile),
            _ => Action::None,
        }
    }

    fn update(&mut self, action: Action) -> Action {
        match &action {
            Action::ProfileLoaded(user) => self.user = Some((**user).clone()),
            Action::Logout => self.user = None,
            _ => {}
        }
        action
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let Some(user) = &self.user else {
            f.render_widget(loading_paragraph(" Perfil "), rect);
            return;
        };

        let sections = profile_sections(user, self.ctx.timezone);
        let mut constraints: Vec<Constraint> = sections
            .iter()
            .map(|s| Constraint::Length(s.fields.len() as u16 + 2))
            .collect();
        constraints.push(Constraint::Min(0));
        constraints.push(Constraint::Length(1));
        let chunks = Layout::vertical(constraints).split(rect);

        for (section, area) in sections.iter().zip(chunks.iter()) {
            let lines: Vec<Line> = section
                .fields
                .iter()
                .map(|field| {
                    Line::from(vec![
                        Span::styled(format!("{:<22}", field.label), Style::default().fg(Color::Gray)),
                        Span::styled(field.value.clone(), Style::default().fg(Color::White)),
                    ])
                })
                .collect();
            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .title(format!(" {} ", section.title))
                .title_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
                .border_style(Style::default().fg(Color::DarkGray));
            f.render_widget(Paragraph::new(lines).block(block), *area);
        }

        f.render_widget(
            create_instructions_paragraph(&[CHANGE_PASSWORD, shortcuts::SEPARATOR, shortcuts::RELOAD]),
            chunks[chunks.len() - 1],
        );
    }
}
