//! Two-step signup: account credentials, then the doctor profile.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use mediq_core::api::types::DoctorProfile;
use mediq_core::session::SignupDraft;
use mediq_core::validate;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use super::login::LoginView;
use super::{Field, ViewUpdate, apply_errors, push_field_lines, push_hint_line};
use crate::effects::UiEffect;
use crate::state::{Alert, View};

#[derive(Debug)]
pub struct SignupStep1View {
    pub email: Field,
    pub password: Field,
    pub confirm: Field,
    pub focus: usize,
    pub submitting: bool,
}

impl SignupStep1View {
    pub fn new() -> Self {
        Self {
            email: Field::new("Email"),
            password: Field::masked("Create password"),
            confirm: Field::masked("Confirm password"),
            focus: 0,
            submitting: false,
        }
    }

    fn fields_mut(&mut self) -> [&mut Field; 3] {
        [&mut self.email, &mut self.password, &mut self.confirm]
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> ViewUpdate {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => return ViewUpdate::to(View::Login(LoginView::new())),
            KeyCode::Tab | KeyCode::Down => self.focus = (self.focus + 1) % 3,
            KeyCode::BackTab | KeyCode::Up => self.focus = (self.focus + 2) % 3,
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
        let errors = validate::validate_signup_step1(
            &self.email.value,
            &self.password.value,
            &self.confirm.value,
        );
        let clean = apply_errors(
            &errors,
            &mut [
                ("email", &mut self.email),
                ("password", &mut self.password),
                ("confirm", &mut self.confirm),
            ],
        );
        if !clean {
            return ViewUpdate::stay();
        }

        self.submitting = true;
        ViewUpdate::stay().with_effects(vec![UiEffect::Register {
            email: self.email.value.clone(),
            password: self.password.value.clone(),
        }])
    }
}

impl Default for SignupStep1View {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
pub struct SignupStep2View {
    pub name: Field,
    pub specialty: Field,
    pub contact_number: Field,
    pub hospital: Field,
    pub license_number: Field,
    pub focus: usize,
    pub submitting: bool,
}

impl SignupStep2View {
    pub fn new() -> Self {
        Self {
            name: Field::new("Full name"),
            specialty: Field::new("Specialty"),
            contact_number: Field::new("Contact number"),
            hospital: Field::new("Hospital / clinic"),
            license_number: Field::new("License number (optional)"),
            focus: 0,
            submitting: false,
        }
    }

    fn fields_mut(&mut self) -> [&mut Field; 5] {
        [
            &mut self.name,
            &mut self.specialty,
            &mut self.contact_number,
            &mut self.hospital,
            &mut self.license_number,
        ]
    }

    pub fn handle_key(&mut self, draft: Option<&SignupDraft>, key: KeyEvent) -> ViewUpdate {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => return ViewUpdate::to(View::Login(LoginView::new())),
            KeyCode::Tab | KeyCode::Down => self.focus = (self.focus + 1) % 5,
            KeyCode::BackTab | KeyCode::Up => self.focus = (self.focus + 4) % 5,
            KeyCode::Enter => return self.submit(draft),
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

    fn submit(&mut self, draft: Option<&SignupDraft>) -> ViewUpdate {
        let errors = validate::validate_signup_step2(
            &self.name.value,
            &self.specialty.value,
            &self.contact_number.value,
            &self.hospital.value,
            &self.license_number.value,
        );
        let clean = apply_errors(
            &errors,
            &mut [
                ("name", &mut self.name),
                ("specialty", &mut self.specialty),
                ("contact_number", &mut self.contact_number),
                ("hospital", &mut self.hospital),
                ("license_number", &mut self.license_number),
            ],
        );
        if !clean {
            return ViewUpdate::stay();
        }

        // The step-1 draft carries the credentials for the fresh login this
        // step performs. Without it the flow has to restart.
        let Some(draft) = draft else {
            return ViewUpdate::to(View::SignupStep1(SignupStep1View::new()))
                .with_alert(Alert::error("Signup session lost. Please start again."));
        };

        let license = self.license_number.value.trim();
        self.submitting = true;
        ViewUpdate::stay().with_effects(vec![UiEffect::SubmitProfile {
            draft: draft.clone(),
            profile: DoctorProfile {
                name: self.name.value.clone(),
                specialty: self.specialty.value.clone(),
                contact_number: self.contact_number.value.clone(),
                hospital: self.hospital.value.clone(),
                license_number: (!license.is_empty()).then(|| license.to_string()),
            },
        }])
    }
}

impl Default for SignupStep2View {
    fn default() -> Self {
        Self::new()
    }
}

pub fn render_step1(view: &SignupStep1View, frame: &mut Frame, area: Rect) {
    let mut lines = vec![Line::default()];
    push_field_lines(&mut lines, &view.email, view.focus == 0);
    push_field_lines(&mut lines, &view.password, view.focus == 1);
    push_field_lines(&mut lines, &view.confirm, view.focus == 2);

    if view.submitting {
        lines.push(Line::from(Span::styled(
            "Creating account...",
            Style::default().fg(Color::Yellow),
        )));
    } else {
        push_hint_line(&mut lines, &[("Enter", "continue"), ("Esc", "back")]);
    }

    super::render_card(frame, area, "Create account (1/2)", lines);
}

pub fn render_step2(view: &SignupStep2View, frame: &mut Frame, area: Rect) {
    let mut lines = vec![Line::default()];
    push_field_lines(&mut lines, &view.name, view.focus == 0);
    push_field_lines(&mut lines, &view.specialty, view.focus == 1);
    push_field_lines(&mut lines, &view.contact_number, view.focus == 2);
    push_field_lines(&mut lines, &view.hospital, view.focus == 3);
    push_field_lines(&mut lines, &view.license_number, view.focus == 4);

    if view.submitting {
        lines.push(Line::from(Span::styled(
            "Creating profile...",
            Style::default().fg(Color::Yellow),
        )));
    } else {
        push_hint_line(&mut lines, &[("Enter", "finish"), ("Esc", "back")]);
    }

    super::render_card(frame, area, "Your practice (2/2)", lines);
}

pub fn render_success(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::default(),
        Line::from(Span::styled(
            "Your doctor profile is ready.",
            Style::default().fg(Color::Green),
        )),
        Line::default(),
        Line::from(Span::styled(
            "Sign in with your new account to continue.",
            Style::default().fg(Color::Gray),
        )),
        Line::default(),
        Line::from(vec![
            Span::styled("Enter", Style::default().fg(Color::Cyan)),
            Span::styled(" go to sign in", Style::default().fg(Color::DarkGray)),
        ]),
    ];
    super::render_card(frame, area, "All set", lines);
}
