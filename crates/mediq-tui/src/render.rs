//! Top-level rendering: header, active view, alert line.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::state::{AlertKind, AppState, View};
use crate::views::{dashboard, login, otp, password, signup};

pub fn render(app: &AppState, frame: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Min(0),    // body
            Constraint::Length(1), // alert line
        ])
        .split(frame.area());

    let header = Line::from(vec![
        Span::styled(
            " mediq ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            " doctor portal",
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(Paragraph::new(header), chunks[0]);

    let body = chunks[1];
    match &app.view {
        View::Login(view) => login::render(view, frame, body),
        View::SignupStep1(view) => signup::render_step1(view, frame, body),
        View::SignupStep2(view) => signup::render_step2(view, frame, body),
        View::SignupSuccess => signup::render_success(frame, body),
        View::ForgotPassword(view) => password::render_forgot(view, frame, body),
        View::OtpVerify(view) => otp::render(view, frame, body),
        View::CreateNewPassword(view) => password::render_new_password(view, frame, body),
        View::PasswordSuccess => password::render_success(frame, body),
        View::Dashboard(view) => dashboard::render(view, app.user.as_ref(), frame, body),
    }

    if let Some(alert) = &app.alert {
        let style = match alert.kind {
            AlertKind::Success => Style::default().fg(Color::Black).bg(Color::Green),
            AlertKind::Error => Style::default().fg(Color::White).bg(Color::Red),
        };
        let line = Line::from(Span::styled(format!(" {} ", alert.message), style));
        frame.render_widget(Paragraph::new(line), chunks[2]);
    }
}
