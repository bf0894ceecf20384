//! Sign-in, forgot-password and reset-password forms.

use crate::auth::{ResetPasswordForm, SignInForm};
use crate::constants::APP_NAME;
use crate::ui::components::common::{
    create_dialog_block, create_input_paragraph, create_instructions_paragraph, create_secret_paragraph, edit_text,
    shortcuts, InstructionShortcut,
};
use crate::ui::core::{Action, Component};
use crate::ui::layout::LayoutManager;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    SignIn,
    Forgot,
    Reset,
}

const FORGOT: InstructionShortcut = ("F2", Color::Cyan, " Olvidé mi contraseña");
const HAVE_TOKEN: InstructionShortcut = ("F3", Color::Cyan, " Tengo un código");

pub struct SignInScreen {
    mode: AuthMode,
    form: SignInForm,
    email: String,
    reset: ResetPasswordForm,
    focus: usize,
    pending: bool,
}

impl SignInScreen {
    pub fn new() -> Self {
        Self {
            mode: AuthMode::SignIn,
            form: SignInForm::default(),
            email: String::new(),
            reset: ResetPasswordForm::default(),
            focus: 0,
            pending: false,
        }
    }

    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    fn set_mode(&mut self, mode: AuthMode) {
        self.mode = mode;
        self.focus = 0;
    }

    fn field_count(&self) -> usize {
        match self.mode {
            AuthMode::SignIn => 2,
            AuthMode::Forgot => 1,
            AuthMode::Reset => 3,
        }
    }

    fn focused_buffer(&mut self) -> &mut String {
        match (self.mode, self.focus) {
            (AuthMode::SignIn, 0) => &mut self.form.username,
            (AuthMode::SignIn, _) => &mut self.form.password,
            (AuthMode::Forgot, _) => &mut self.email,
            (AuthMode::Reset, 0) => &mut self.reset.token,
            (AuthMode::Reset, 1) => &mut self.reset.new_password,
            (AuthMode::Reset, _) => &mut self.reset.confirm_password,
        }
    }

    fn submit(&mut self) -> Action {
        self.pending = true;
        match self.mode {
            AuthMode::SignIn => Action::SignIn(self.form.clone()),
            AuthMode::Forgot => Action::RequestPasswordReset(self.email.clone()),
            AuthMode::Reset => Action::ResetPassword(self.reset.clone()),
        }
    }
}

impl Default for SignInScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for SignInScreen {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        if self.pending {
            return Action::Render;
        }
        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.focus = (self.focus + 1) % self.field_count();
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = (self.focus + self.field_count() - 1) % self.field_count();
            }
            KeyCode::Enter => return self.submit(),
            KeyCode::F(2) => self.set_mode(AuthMode::Forgot),
            KeyCode::F(3) => self.set_mode(AuthMode::Reset),
            KeyCode::Esc if self.mode != AuthMode::SignIn => self.set_mode(AuthMode::SignIn),
            _ => {
                edit_text(self.focused_buffer(), key);
            }
        }
        Action::Render
    }

    fn update(&mut self, action: Action) -> Action {
        match &action {
            Action::SignedIn(_) => {
                self.pending = false;
                self.form.password.clear();
            }
            Action::PasswordResetRequested => {
                self.pending = false;
                self.set_mode(AuthMode::Reset);
            }
            Action::PasswordResetDone => {
                self.pending = false;
                self.reset = ResetPasswordForm::default();
                self.set_mode(AuthMode::SignIn);
            }
            Action::Failed(_) => self.pending = false,
            Action::Logout => {
                self.pending = false;
                self.set_mode(AuthMode::SignIn);
            }
            _ => {}
        }
        action
    }

    fn captures_input(&self) -> bool {
        true
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let (title, fields): (&str, Vec<(&str, String, bool)>) = match self.mode {
            AuthMode::SignIn => (
                " Iniciar sesión ",
                vec![
                    ("Usuario", self.form.username.clone(), false),
                    ("Contraseña", self.form.password.clone(), true),
                ],
            ),
            AuthMode::Forgot => (
                " Recuperar contraseña ",
                vec![("Correo electrónico", self.email.clone(), false)],
            ),
            AuthMode::Reset => (
                " Restablecer contraseña ",
                vec![
                    ("Código del correo", self.reset.token.clone(), false),
                    ("Nueva contraseña", self.reset.new_password.clone(), true),
                    ("Confirmar contraseña", self.reset.confirm_password.clone(), true),
                ],
            ),
        };

        let height = 6 + fields.len() as u16 * 3;
        let area = LayoutManager::centered_rect_lines(50, height, rect);
        f.render_widget(Clear, area);
        let block = create_dialog_block(title, Color::Cyan);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let mut constraints = vec![Constraint::Length(2)];
        constraints.extend(fields.iter().map(|_| Constraint::Length(3)));
        constraints.push(Constraint::Min(1));
        let chunks = Layout::vertical(constraints).split(inner);

        let brand = Paragraph::new(Line::from(Span::styled(
            APP_NAME,
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center);
        f.render_widget(brand, chunks[0]);

        for (i, (label, value, secret)) in fields.iter().enumerate() {
            let focused = i == self.focus;
            let widget = if *secret {
                create_secret_paragraph(value, label, focused)
            } else {
                create_input_paragraph(value, label, focused)
            };
            f.render_widget(widget, chunks[i + 1]);
        }

        let footer_area = chunks[chunks.len() - 1];
        if self.pending {
            let waiting = Paragraph::new("⟳ Procesando...")
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Yellow));
            f.render_widget(waiting, footer_area);
        } else {
            let instructions: Vec<InstructionShortcut> = match self.mode {
                AuthMode::SignIn => vec![
                    shortcuts::ENTER_CONFIRM,
                    shortcuts::SEPARATOR,
                    FORGOT,
                    shortcuts::SEPARATOR,
                    HAVE_TOKEN,
                ],
                _ => vec![shortcuts::ENTER_CONFIRM, shortcuts::SEPARATOR, shortcuts::ESC_BACK],
            };
            f.render_widget(create_instructions_paragraph(&instructions), footer_area);
        }
    }
}
