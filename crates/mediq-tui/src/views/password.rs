//! Forgot-password and create-new-password screens.
//!
//! The backend has no reset endpoints, so this flow runs entirely
//! client-side: the code screen and the new password are simulated to keep
//! the UX complete.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use mediq_core::validate;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use super::login::LoginView;
use super::otp::{OtpFlow, OtpView};
use super::{Field, ViewUpdate, apply_errors, push_field_lines, push_hint_line};
use crate::state::{Alert, View};

#[derive(Debug)]
pub struct ForgotPasswordView {
    pub email: Field,
}

impl ForgotPasswordView {
    pub fn new() -> Self {
        Self {
            email: Field::new("Email"),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> ViewUpdate {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => return ViewUpdate::to(View::Login(LoginView::new())),
            KeyCode::Enter => return self.submit(),
            KeyCode::Char(c) if !ctrl => self.email.push(c),
            KeyCode::Backspace => self.email.pop(),
            _ => {}
        }
        ViewUpdate::stay()
    }

    pub fn handle_paste(&mut self, text: &str) {
        self.email.insert_str(text);
    }

    fn submit(&mut self) -> ViewUpdate {
        let errors = validate::validate_forgot_password(&self.email.value);
        if !apply_errors(&errors, &mut [("email", &mut self.email)]) {
            return ViewUpdate::stay();
        }

        let email = self.email.value.clone();
        ViewUpdate::to(View::OtpVerify(OtpView::new(OtpFlow::Reset { email })))
            .with_alert(Alert::success("A verification code has been sent"))
    }
}

impl Default for ForgotPasswordView {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
pub struct NewPasswordView {
    pub password: Field,
    pub confirm: Field,
    pub focus: usize,
}

impl NewPasswordView {
    pub fn new() -> Self {
        Self {
            password: Field::masked("New password"),
            confirm: Field::masked("Confirm new password"),
            focus: 0,
        }
    }

    fn fields_mut(&mut self) -> [&mut Field; 2] {
        [&mut self.password, &mut self.confirm]
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> ViewUpdate {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => return ViewUpdate::to(View::Login(LoginView::new())),
            KeyCode::Tab | KeyCode::Down | KeyCode::BackTab | KeyCode::Up => {
                self.focus = (self.focus + 1) % 2;
            }
            KeyCode::Enter => return self.submit(),
            KeyCode::Char(c) if !ctrl => {
                let focus = self.focus;
                self.fields_mut()[focus].push(c);
            }
            KeyCode::Backspace => {
                let focus = self.focus;
                self.fields_mut()[focus].pop();
            }
            _ => {}
        }
        ViewUpdate::stay()
    }

    pub fn handle_paste(&mut self, text: &str) {
        let focus = self.focus;
        self.fields_mut()[focus].insert_str(text);
    }

    fn submit(&mut self) -> ViewUpdate {
        let errors = validate::validate_new_password(&self.password.value, &self.confirm.value);
        let clean = apply_errors(
            &errors,
            &mut [
                ("password", &mut self.password),
                ("confirm", &mut self.confirm),
            ],
        );
        if !clean {
            return ViewUpdate::stay();
        }

        ViewUpdate::to(View::PasswordSuccess).with_alert(Alert::success("Password updated"))
    }
}

impl Default for NewPasswordView {
    fn default() -> Self {
        Self::new()
    }
}

pub fn render_forgot(view: &ForgotPasswordView, frame: &mut Frame, area: Rect) {
    let mut lines = vec![
        Line::default(),
        Line::from(Span::styled(
            "We'll send a verification code to your email.",
            Style::default().fg(Color::Gray),
        )),
        Line::default(),
    ];
    push_field_lines(&mut lines, &view.email, true);
    push_hint_line(&mut lines, &[("Enter", "send code"), ("Esc", "back")]);

    super::render_card(frame, area, "Forgot password", lines);
}

pub fn render_new_password(view: &NewPasswordView, frame: &mut Frame, area: Rect) {
    let mut lines = vec![Line::default()];
    push_field_lines(&mut lines, &view.password, view.focus == 0);
    push_field_lines(&mut lines, &view.confirm, view.focus == 1);
    push_hint_line(&mut lines, &[("Enter", "save"), ("Esc", "back")]);

    super::render_card(frame, area, "Create new password", lines);
}

pub fn render_success(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::default(),
        Line::from(Span::styled(
            "Your password has been changed.",
            Style::default().fg(Color::Green),
        )),
        Line::default(),
        Line::from(vec![
            Span::styled("Enter", Style::default().fg(Color::Cyan)),
            Span::styled(" go to sign in", Style::default().fg(Color::DarkGray)),
        ]),
    ];
    super::render_card(frame, area, "Password updated", lines);
}
