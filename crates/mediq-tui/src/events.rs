//! Events consumed by the reducer.
//!
//! Async handlers send their results through the runtime inbox as one of
//! these variants.

use mediq_core::api::ApiError;
use mediq_core::session::{Session, SignupDraft, UserInfo};

#[derive(Debug)]
pub enum UiEvent {
    /// Periodic heartbeat; drives alert expiry and pending redirects.
    Tick,
    /// Raw terminal input.
    Terminal(crossterm::event::Event),
    /// Login completed. On success the session is already persisted.
    LoginResult(Result<Session, ApiError>),
    /// Registration (signup step 1) completed. On success the draft is
    /// already persisted.
    RegisterResult(Result<SignupDraft, ApiError>),
    /// OTP verification completed.
    OtpResult(Result<(), ApiError>),
    /// OTP resend completed.
    ResendResult(Result<(), ApiError>),
    /// Profile creation (signup step 2) completed: fresh login plus doctor
    /// record. On success the draft has been cleared.
    ProfileResult(Result<(), ApiError>),
    /// Account fetch for the dashboard completed.
    AccountResult(Result<UserInfo, ApiError>),
}
