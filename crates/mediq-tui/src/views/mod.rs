//! View modules: one per screen, plus shared form plumbing.
//!
//! Each view owns its form state and exposes `handle_key` returning a
//! [`ViewUpdate`]; the reducer applies the transition and forwards effects to
//! the runtime.

pub mod dashboard;
pub mod login;
pub mod otp;
pub mod password;
pub mod signup;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::effects::UiEffect;
use crate::state::{Alert, View};

/// Outcome of a key press on a view.
pub struct ViewUpdate {
    pub transition: Transition,
    pub effects: Vec<UiEffect>,
    pub alert: Option<Alert>,
}

pub enum Transition {
    Stay,
    To(View),
}

impl ViewUpdate {
    pub fn stay() -> Self {
        Self {
            transition: Transition::Stay,
            effects: vec![],
            alert: None,
        }
    }

    pub fn to(view: View) -> Self {
        Self {
            transition: Transition::To(view),
            effects: vec![],
            alert: None,
        }
    }

    pub fn with_effects(mut self, effects: Vec<UiEffect>) -> Self {
        self.effects = effects;
        self
    }

    pub fn with_alert(mut self, alert: Alert) -> Self {
        self.alert = Some(alert);
        self
    }
}

/// A single-line text input with an error slot.
#[derive(Debug, Clone)]
pub struct Field {
    pub label: &'static str,
    pub value: String,
    pub error: Option<String>,
    pub mask: bool,
}

impl Field {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            value: String::new(),
            error: None,
            mask: false,
        }
    }

    pub fn masked(label: &'static str) -> Self {
        Self {
            label,
            value: String::new(),
            error: None,
            mask: true,
        }
    }

    pub fn with_value(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
            error: None,
            mask: false,
        }
    }

    pub fn push(&mut self, c: char) {
        self.value.push(c);
        self.error = None;
    }

    pub fn pop(&mut self) {
        self.value.pop();
        self.error = None;
    }

    pub fn insert_str(&mut self, text: &str) {
        // Pasted text may carry a trailing newline; a single-line field
        // cannot hold one.
        self.value.extend(text.chars().filter(|c| !c.is_control()));
        self.error = None;
    }

    fn display_value(&self) -> String {
        if self.mask {
            "\u{2022}".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        }
    }
}

/// Appends the label, input line, and any error for one field.
pub(crate) fn push_field_lines(lines: &mut Vec<Line<'static>>, field: &Field, focused: bool) {
    let label_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    lines.push(Line::from(Span::styled(field.label.to_string(), label_style)));

    let text_style = if focused {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::Gray)
    };
    let mut spans = vec![
        Span::styled("> ", Style::default().fg(Color::DarkGray)),
        Span::styled(field.display_value(), text_style),
    ];
    if focused {
        spans.push(Span::styled("\u{2588}", Style::default().fg(Color::Cyan)));
    }
    lines.push(Line::from(spans));

    if let Some(error) = &field.error {
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        )));
    }
    lines.push(Line::default());
}

/// Appends the dim key-hint footer line.
pub(crate) fn push_hint_line(lines: &mut Vec<Line<'static>>, hints: &[(&str, &str)]) {
    let mut spans = Vec::new();
    for (i, (key, action)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ", Style::default()));
        }
        spans.push(Span::styled(
            (*key).to_string(),
            Style::default().fg(Color::Cyan),
        ));
        spans.push(Span::styled(
            format!(" {action}"),
            Style::default().fg(Color::DarkGray),
        ));
    }
    lines.push(Line::from(spans));
}

/// Renders a bordered, centered card with the given title and body lines.
pub(crate) fn render_card(frame: &mut Frame, area: Rect, title: &str, lines: Vec<Line<'static>>) {
    let width = 56.min(area.width);
    let height = (u16::try_from(lines.len()).unwrap_or(u16::MAX) + 2).min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    let card = Rect::new(x, y, width, height);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {title} "))
        .border_style(Style::default().fg(Color::DarkGray));
    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, card);
}

/// Copies validation errors into the matching fields, returning true when the
/// form is clean.
pub(crate) fn apply_errors(
    errors: &mediq_core::validate::FormErrors,
    fields: &mut [(&'static str, &mut Field)],
) -> bool {
    for (key, field) in fields.iter_mut() {
        field.error = errors.get(key).cloned();
    }
    errors.is_empty()
}
