//! Login screen.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use mediq_core::validate;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use super::password::ForgotPasswordView;
use super::signup::SignupStep1View;
use super::{Field, ViewUpdate, apply_errors, push_field_lines, push_hint_line};
use crate::effects::UiEffect;
use crate::state::View;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Email,
    Password,
    Remember,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Self::Email => Self::Password,
            Self::Password => Self::Remember,
            Self::Remember => Self::Email,
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::Email => Self::Remember,
            Self::Password => Self::Email,
            Self::Remember => Self::Password,
        }
    }
}

#[derive(Debug)]
pub struct LoginView {
    pub email: Field,
    pub password: Field,
    pub remember: bool,
    pub focus: Focus,
    pub submitting: bool,
}

impl LoginView {
    pub fn new() -> Self {
        Self::prefilled(None)
    }

    /// Login form with the remembered email already filled in.
    pub fn prefilled(remember_email: Option<String>) -> Self {
        let remember = remember_email.is_some();
        let email = match remember_email {
            Some(value) => Field::with_value("Email", value),
            None => Field::new("Email"),
        };
        Self {
            email,
            password: Field::masked("Password"),
            remember,
            // Jump straight to the password when the email is remembered.
            focus: if remember { Focus::Password } else { Focus::Email },
            submitting: false,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> ViewUpdate {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Char('s') if ctrl => {
                return ViewUpdate::to(View::SignupStep1(SignupStep1View::new()));
            }
            KeyCode::Char('f') if ctrl => {
                return ViewUpdate::to(View::ForgotPassword(ForgotPasswordView::new()));
            }
            KeyCode::Tab | KeyCode::Down => self.focus = self.focus.next(),
            KeyCode::BackTab | KeyCode::Up => self.focus = self.focus.prev(),
            KeyCode::Enter => return self.submit(),
            KeyCode::Char(' ') if self.focus == Focus::Remember => {
                self.remember = !self.remember;
            }
            KeyCode::Char(c) if !ctrl => {
                if let Some(field) = self.focused_field_mut() {
                    field.push(c);
                }
            }
            KeyCode::Backspace => {
                if let Some(field) = self.focused_field_mut() {
                    field.pop();
                }
            }
            _ => {}
        }
        ViewUpdate::stay()
    }

    pub fn handle_paste(&mut self, text: &str) {
        if let Some(field) = self.focused_field_mut() {
            field.insert_str(text);
        }
    }

    fn focused_field_mut(&mut self) -> Option<&mut Field> {
        match self.focus {
            Focus::Email => Some(&mut self.email),
            Focus::Password => Some(&mut self.password),
            Focus::Remember => None,
        }
    }

    fn submit(&mut self) -> ViewUpdate {
        let errors = validate::validate_login(&self.email.value, &self.password.value);
        let clean = apply_errors(
            &errors,
            &mut [
                ("email", &mut self.email),
                ("password", &mut self.password),
            ],
        );
        if !clean {
            return ViewUpdate::stay();
        }

        self.submitting = true;
        ViewUpdate::stay().with_effects(vec![UiEffect::Login {
            email: self.email.value.clone(),
            password: self.password.value.clone(),
            remember: self.remember,
        }])
    }
}

impl Default for LoginView {
    fn default() -> Self {
        Self::new()
    }
}

pub fn render(view: &LoginView, frame: &mut Frame, area: Rect) {
    let mut lines = vec![Line::default()];
    push_field_lines(&mut lines, &view.email, view.focus == Focus::Email);
    push_field_lines(&mut lines, &view.password, view.focus == Focus::Password);

    let checkbox = if view.remember { "[x]" } else { "[ ]" };
    let checkbox_style = if view.focus == Focus::Remember {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    lines.push(Line::from(Span::styled(
        format!("{checkbox} Remember my email"),
        checkbox_style,
    )));
    lines.push(Line::default());

    if view.submitting {
        lines.push(Line::from(Span::styled(
            "Signing in...",
            Style::default().fg(Color::Yellow),
        )));
    } else {
        push_hint_line(
            &mut lines,
            &[
                ("Enter", "sign in"),
                ("Ctrl+S", "sign up"),
                ("Ctrl+F", "forgot password"),
                ("Ctrl+C", "quit"),
            ],
        );
    }

    super::render_card(frame, area, "Sign in", lines);
}
