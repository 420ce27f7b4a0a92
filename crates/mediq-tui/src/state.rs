//! Application state.
//!
//! One [`View`] is active at a time; each view owns its form state. The
//! reducer in `update.rs` is the only place that mutates `AppState`.

use std::time::{Duration, Instant};

use mediq_core::session::{SessionStore, SignupDraft, UserInfo};

use crate::views::dashboard::DashboardView;
use crate::views::login::LoginView;
use crate::views::otp::OtpView;
use crate::views::password::{ForgotPasswordView, NewPasswordView};
use crate::views::signup::{SignupStep1View, SignupStep2View};

/// How long an alert stays on screen before auto-dismissing.
pub const ALERT_TTL: Duration = Duration::from_secs(5);

/// Delay between a successful login and landing on the dashboard, so the
/// success alert is actually seen.
pub const REDIRECT_DELAY: Duration = Duration::from_millis(1500);

/// The active screen. One at a time, no stacking.
#[derive(Debug)]
pub enum View {
    Login(LoginView),
    SignupStep1(SignupStep1View),
    SignupStep2(SignupStep2View),
    SignupSuccess,
    ForgotPassword(ForgotPasswordView),
    OtpVerify(OtpView),
    CreateNewPassword(NewPasswordView),
    PasswordSuccess,
    Dashboard(DashboardView),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Success,
    Error,
}

/// Single-slot transient notification.
#[derive(Debug, Clone)]
pub struct Alert {
    pub kind: AlertKind,
    pub message: String,
    pub raised_at: Instant,
}

impl Alert {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Success,
            message: message.into(),
            raised_at: Instant::now(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Error,
            message: message.into(),
            raised_at: Instant::now(),
        }
    }
}

/// A scheduled transition to the dashboard, fired from the Tick handler.
#[derive(Debug, Clone, Copy)]
pub struct PendingRedirect {
    pub at: Instant,
}

/// Top-level application state.
#[derive(Debug)]
pub struct AppState {
    pub should_quit: bool,
    pub view: View,
    pub alert: Option<Alert>,
    pub redirect: Option<PendingRedirect>,
    /// In-memory mirror of the persisted user, if logged in.
    pub user: Option<UserInfo>,
    /// In-memory mirror of the persisted signup draft.
    pub draft: Option<SignupDraft>,
    pub store: SessionStore,
}

impl AppState {
    /// Builds the initial state from whatever the store remembers: a stored
    /// session lands straight on the dashboard, otherwise the login form is
    /// pre-filled with the remembered email.
    pub fn new(store: SessionStore) -> Self {
        let user = store.user().filter(|_| store.access_token().is_some());
        let draft = store.signup_draft();
        let remember_email = store.remember_email();

        let view = if user.is_some() {
            View::Dashboard(DashboardView::new())
        } else {
            View::Login(LoginView::prefilled(remember_email))
        };

        Self {
            should_quit: false,
            view,
            alert: None,
            redirect: None,
            user,
            draft,
            store,
        }
    }

    /// Effects to run once at startup. Landing directly on the dashboard
    /// (resumed session) triggers the account fetch immediately.
    pub fn initial_effects(&mut self) -> Vec<crate::effects::UiEffect> {
        if let View::Dashboard(dashboard) = &mut self.view {
            dashboard.loading = true;
            return vec![crate::effects::UiEffect::LoadAccount];
        }
        vec![]
    }

    /// Whether any form on the active view is waiting on a network call.
    pub fn is_submitting(&self) -> bool {
        match &self.view {
            View::Login(v) => v.submitting,
            View::SignupStep1(v) => v.submitting,
            View::SignupStep2(v) => v.submitting,
            View::OtpVerify(v) => v.submitting,
            View::Dashboard(v) => v.loading,
            View::SignupSuccess
            | View::ForgotPassword(_)
            | View::CreateNewPassword(_)
            | View::PasswordSuccess => false,
        }
    }
}
