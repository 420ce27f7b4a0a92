//! Post-login landing screen.
//!
//! A thin shell: greets the stored user and fetches the account record to
//! exercise the authenticated path. A 401 here lands back on login via the
//! client's session-expiry handling.

use crossterm::event::{KeyCode, KeyEvent};
use mediq_core::session::UserInfo;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use super::login::LoginView;
use super::{ViewUpdate, push_hint_line};
use crate::effects::UiEffect;
use crate::state::{Alert, View};

#[derive(Debug)]
pub struct DashboardView {
    /// Account record fetched from the backend, once loaded.
    pub account: Option<UserInfo>,
    pub loading: bool,
}

impl DashboardView {
    pub fn new() -> Self {
        Self {
            account: None,
            loading: false,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> ViewUpdate {
        match key.code {
            KeyCode::Char('q') => ViewUpdate::stay().with_effects(vec![UiEffect::Quit]),
            KeyCode::Char('l') => ViewUpdate::to(View::Login(LoginView::new()))
                .with_effects(vec![UiEffect::Logout])
                .with_alert(Alert::success("Signed out")),
            KeyCode::Char('r') if !self.loading => {
                self.loading = true;
                ViewUpdate::stay().with_effects(vec![UiEffect::LoadAccount])
            }
            _ => ViewUpdate::stay(),
        }
    }
}

impl Default for DashboardView {
    fn default() -> Self {
        Self::new()
    }
}

pub fn render(view: &DashboardView, user: Option<&UserInfo>, frame: &mut Frame, area: Rect) {
    let mut lines = vec![Line::default()];

    let greeting = match user {
        Some(user) => format!("Welcome back, {}", user.email),
        None => "Welcome back".to_string(),
    };
    lines.push(Line::from(Span::styled(
        greeting,
        Style::default().fg(Color::Green),
    )));
    lines.push(Line::default());

    if view.loading {
        lines.push(Line::from(Span::styled(
            "Loading account...",
            Style::default().fg(Color::Yellow),
        )));
    } else if let Some(account) = &view.account {
        lines.push(Line::from(vec![
            Span::styled("Account  ", Style::default().fg(Color::DarkGray)),
            Span::styled(account.email.clone(), Style::default().fg(Color::White)),
        ]));
        lines.push(Line::from(vec![
            Span::styled("Role     ", Style::default().fg(Color::DarkGray)),
            Span::styled(account.role.clone(), Style::default().fg(Color::White)),
        ]));
        lines.push(Line::from(vec![
            Span::styled("User id  ", Style::default().fg(Color::DarkGray)),
            Span::styled(account.id.to_string(), Style::default().fg(Color::White)),
        ]));
    } else {
        lines.push(Line::from(Span::styled(
            "Account details not loaded.",
            Style::default().fg(Color::Gray),
        )));
    }
    lines.push(Line::default());

    push_hint_line(
        &mut lines,
        &[("r", "refresh"), ("l", "log out"), ("q", "quit")],
    );

    super::render_card(frame, area, "Dashboard", lines);
}
