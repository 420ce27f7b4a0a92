//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects. Persistence happens in the runtime's
//! async handlers; by the time a result event arrives here, the store already
//! reflects it.

use std::time::Instant;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use mediq_core::api::{ApiError, ErrorKind};
use mediq_core::session::{Session, SignupDraft, UserInfo};

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::{ALERT_TTL, Alert, AppState, PendingRedirect, REDIRECT_DELAY, View};
use crate::views::dashboard::DashboardView;
use crate::views::login::LoginView;
use crate::views::otp::OtpFlow;
use crate::views::signup::SignupStep2View;
use crate::views::{Transition, ViewUpdate};

/// The main reducer function.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => handle_tick(app),
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::LoginResult(result) => handle_login_result(app, result),
        UiEvent::RegisterResult(result) => handle_register_result(app, result),
        UiEvent::OtpResult(result) => handle_otp_result(app, result),
        UiEvent::ResendResult(result) => handle_resend_result(app, result),
        UiEvent::ProfileResult(result) => handle_profile_result(app, result),
        UiEvent::AccountResult(result) => handle_account_result(app, result),
    }
}

fn handle_tick(app: &mut AppState) -> Vec<UiEffect> {
    if app
        .alert
        .as_ref()
        .is_some_and(|alert| alert.raised_at.elapsed() >= ALERT_TTL)
    {
        app.alert = None;
    }

    if app.redirect.is_some_and(|r| Instant::now() >= r.at) {
        app.redirect = None;
        return enter_dashboard(app);
    }

    vec![]
}

/// Switches to the dashboard and kicks off the account fetch.
fn enter_dashboard(app: &mut AppState) -> Vec<UiEffect> {
    let mut dashboard = DashboardView::new();
    dashboard.loading = true;
    app.view = View::Dashboard(dashboard);
    vec![UiEffect::LoadAccount]
}

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key),
        Event::Paste(text) => {
            if !app.is_submitting() && app.redirect.is_none() {
                handle_paste(app, &text);
            }
            vec![]
        }
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return vec![];
    }

    // A submitted form stays inert until its result arrives, and input is
    // swallowed while a redirect is pending.
    if app.is_submitting() || app.redirect.is_some() {
        return vec![];
    }

    // Esc dismisses a visible alert before acting as "back".
    if key.code == KeyCode::Esc && app.alert.is_some() {
        app.alert = None;
        return vec![];
    }

    let update = match &mut app.view {
        View::Login(view) => view.handle_key(key),
        View::SignupStep1(view) => view.handle_key(key),
        View::SignupStep2(view) => view.handle_key(app.draft.as_ref(), key),
        View::OtpVerify(view) => view.handle_key(key),
        View::ForgotPassword(view) => view.handle_key(key),
        View::CreateNewPassword(view) => view.handle_key(key),
        View::Dashboard(view) => view.handle_key(key),
        View::SignupSuccess | View::PasswordSuccess => {
            if key.code == KeyCode::Enter {
                ViewUpdate::to(View::Login(LoginView::prefilled(app.store.remember_email())))
            } else {
                ViewUpdate::stay()
            }
        }
    };
    apply_view_update(app, update)
}

fn handle_paste(app: &mut AppState, text: &str) {
    match &mut app.view {
        View::Login(view) => view.handle_paste(text),
        View::SignupStep1(view) => view.handle_paste(text),
        View::SignupStep2(view) => view.handle_paste(text),
        View::OtpVerify(view) => view.handle_paste(text),
        View::ForgotPassword(view) => view.handle_paste(text),
        View::CreateNewPassword(view) => view.handle_paste(text),
        View::SignupSuccess | View::PasswordSuccess | View::Dashboard(_) => {}
    }
}

fn apply_view_update(app: &mut AppState, update: ViewUpdate) -> Vec<UiEffect> {
    if let Some(alert) = update.alert {
        app.alert = Some(alert);
    }
    if let Transition::To(view) = update.transition {
        app.view = view;
    }
    update.effects
}

/// The client has already wiped the store; mirror that in memory and land on
/// a fresh login form.
fn expire_session(app: &mut AppState, err: &ApiError) -> Vec<UiEffect> {
    app.user = None;
    app.draft = None;
    app.redirect = None;
    app.alert = Some(Alert::error(err.message.clone()));
    app.view = View::Login(LoginView::new());
    vec![]
}

fn handle_login_result(app: &mut AppState, result: Result<Session, ApiError>) -> Vec<UiEffect> {
    // Stale guard: the result only applies while the login form is waiting.
    let View::Login(view) = &mut app.view else {
        return vec![];
    };
    if !view.submitting {
        return vec![];
    }

    match result {
        Ok(session) => {
            app.user = Some(session.user);
            app.alert = Some(Alert::success("Signed in successfully"));
            // Leave the form disabled; the redirect takes over from here.
            app.redirect = Some(PendingRedirect {
                at: Instant::now() + REDIRECT_DELAY,
            });
        }
        Err(err) => {
            view.submitting = false;
            app.alert = Some(Alert::error(err.message));
        }
    }
    vec![]
}

fn handle_register_result(
    app: &mut AppState,
    result: Result<SignupDraft, ApiError>,
) -> Vec<UiEffect> {
    let View::SignupStep1(view) = &mut app.view else {
        return vec![];
    };
    if !view.submitting {
        return vec![];
    }

    match result {
        Ok(draft) => {
            let user_id = draft.user_id;
            app.draft = Some(draft);
            app.alert = Some(Alert::success(
                "Account created. Enter the code sent to your email",
            ));
            app.view = View::OtpVerify(crate::views::otp::OtpView::new(OtpFlow::Signup {
                user_id,
            }));
        }
        Err(err) => {
            view.submitting = false;
            app.alert = Some(Alert::error(err.message));
        }
    }
    vec![]
}

fn handle_otp_result(app: &mut AppState, result: Result<(), ApiError>) -> Vec<UiEffect> {
    let View::OtpVerify(view) = &mut app.view else {
        return vec![];
    };
    if !view.submitting {
        return vec![];
    }

    match result {
        Ok(()) => {
            app.alert = Some(Alert::success("Email verified"));
            app.view = View::SignupStep2(SignupStep2View::new());
        }
        Err(err) => {
            view.submitting = false;
            app.alert = Some(Alert::error(err.message));
        }
    }
    vec![]
}

fn handle_resend_result(app: &mut AppState, result: Result<(), ApiError>) -> Vec<UiEffect> {
    if !matches!(
        &app.view,
        View::OtpVerify(view) if matches!(view.flow, OtpFlow::Signup { .. })
    ) {
        return vec![];
    }

    app.alert = Some(match result {
        Ok(()) => Alert::success("A new code has been sent"),
        Err(err) => Alert::error(err.message),
    });
    vec![]
}

fn handle_profile_result(app: &mut AppState, result: Result<(), ApiError>) -> Vec<UiEffect> {
    let View::SignupStep2(view) = &mut app.view else {
        return vec![];
    };
    if !view.submitting {
        return vec![];
    }

    match result {
        Ok(()) => {
            app.draft = None;
            app.user = app.store.user();
            app.alert = Some(Alert::success("Profile created"));
            app.view = View::SignupSuccess;
        }
        Err(err) if err.kind == ErrorKind::SessionExpired => return expire_session(app, &err),
        Err(err) => {
            view.submitting = false;
            app.alert = Some(Alert::error(err.message));
        }
    }
    vec![]
}

fn handle_account_result(app: &mut AppState, result: Result<UserInfo, ApiError>) -> Vec<UiEffect> {
    let View::Dashboard(view) = &mut app.view else {
        return vec![];
    };
    if !view.loading {
        return vec![];
    }

    match result {
        Ok(user) => {
            view.loading = false;
            view.account = Some(user.clone());
            app.user = Some(user);
        }
        Err(err) if err.kind == ErrorKind::SessionExpired => return expire_session(app, &err),
        Err(err) => {
            view.loading = false;
            app.alert = Some(Alert::error(err.message));
        }
    }
    vec![]
}
