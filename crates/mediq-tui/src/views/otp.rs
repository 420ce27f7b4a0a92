//! One-time passcode entry, shared by the signup and password-reset flows.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use super::password::{ForgotPasswordView, NewPasswordView};
use super::signup::SignupStep1View;
use super::{ViewUpdate, push_hint_line};
use crate::effects::UiEffect;
use crate::state::View;

pub const OTP_LEN: usize = 6;

/// Which flow the code belongs to. Signup verifies against the backend;
/// reset has no backend endpoint and advances locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OtpFlow {
    Signup { user_id: i64 },
    Reset { email: String },
}

#[derive(Debug)]
pub struct OtpView {
    pub flow: OtpFlow,
    pub digits: [Option<char>; OTP_LEN],
    pub cursor: usize,
    pub error: Option<String>,
    pub submitting: bool,
}

impl OtpView {
    pub fn new(flow: OtpFlow) -> Self {
        Self {
            flow,
            digits: [None; OTP_LEN],
            cursor: 0,
            error: None,
            submitting: false,
        }
    }

    fn code(&self) -> Option<String> {
        self.digits.iter().copied().collect()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> ViewUpdate {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => {
                return match &self.flow {
                    OtpFlow::Signup { .. } => {
                        ViewUpdate::to(View::SignupStep1(SignupStep1View::new()))
                    }
                    OtpFlow::Reset { .. } => {
                        ViewUpdate::to(View::ForgotPassword(ForgotPasswordView::new()))
                    }
                };
            }
            KeyCode::Char('r') if ctrl => {
                if let OtpFlow::Signup { user_id } = self.flow {
                    return ViewUpdate::stay()
                        .with_effects(vec![UiEffect::ResendOtp { user_id }]);
                }
            }
            KeyCode::Char(c) if c.is_ascii_digit() => {
                self.error = None;
                self.digits[self.cursor] = Some(c);
                if self.cursor < OTP_LEN - 1 {
                    self.cursor += 1;
                }
            }
            KeyCode::Backspace => {
                self.error = None;
                if self.digits[self.cursor].is_some() {
                    self.digits[self.cursor] = None;
                } else if self.cursor > 0 {
                    self.cursor -= 1;
                    self.digits[self.cursor] = None;
                }
            }
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => self.cursor = (self.cursor + 1).min(OTP_LEN - 1),
            KeyCode::Enter => return self.submit(),
            _ => {}
        }
        ViewUpdate::stay()
    }

    pub fn handle_paste(&mut self, text: &str) {
        self.error = None;
        for (slot, c) in self
            .digits
            .iter_mut()
            .zip(text.chars().filter(char::is_ascii_digit))
        {
            *slot = Some(c);
        }
        self.cursor = self
            .digits
            .iter()
            .position(Option::is_none)
            .unwrap_or(OTP_LEN - 1);
    }

    /// Submission is explicit: filling the sixth digit does not fire the
    /// verification on its own.
    fn submit(&mut self) -> ViewUpdate {
        let Some(code) = self.code() else {
            self.error = Some("Please enter the complete 6-digit code".to_string());
            return ViewUpdate::stay();
        };

        match &self.flow {
            OtpFlow::Signup { user_id } => {
                self.submitting = true;
                ViewUpdate::stay().with_effects(vec![UiEffect::VerifyOtp {
                    user_id: *user_id,
                    otp: code,
                }])
            }
            OtpFlow::Reset { .. } => ViewUpdate::to(View::CreateNewPassword(NewPasswordView::new())),
        }
    }
}

pub fn render(view: &OtpView, frame: &mut Frame, area: Rect) {
    let subtitle = match &view.flow {
        OtpFlow::Signup { .. } => "Enter the code sent to your email to verify your account."
            .to_string(),
        OtpFlow::Reset { email } => format!("Enter the code sent to {email}."),
    };

    let mut lines = vec![
        Line::default(),
        Line::from(Span::styled(subtitle, Style::default().fg(Color::Gray))),
        Line::default(),
    ];

    let mut spans = vec![Span::raw("   ")];
    for (i, digit) in view.digits.iter().enumerate() {
        let text = format!(" {} ", digit.unwrap_or('_'));
        let style = if i == view.cursor {
            Style::default().fg(Color::Black).bg(Color::Cyan)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(text, style));
        spans.push(Span::raw(" "));
    }
    lines.push(Line::from(spans));
    lines.push(Line::default());

    if let Some(error) = &view.error {
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        )));
        lines.push(Line::default());
    }

    if view.submitting {
        lines.push(Line::from(Span::styled(
            "Verifying...",
            Style::default().fg(Color::Yellow),
        )));
    } else {
        let mut hints = vec![("Enter", "verify"), ("Esc", "back")];
        if matches!(view.flow, OtpFlow::Signup { .. }) {
            hints.push(("Ctrl+R", "resend code"));
        }
        push_hint_line(&mut lines, &hints);
    }

    super::render_card(frame, area, "Verification code", lines);
}
