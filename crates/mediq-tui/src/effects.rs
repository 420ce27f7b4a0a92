//! Effects produced by the reducer and executed by the runtime.

use mediq_core::api::types::DoctorProfile;
use mediq_core::session::SignupDraft;

#[derive(Debug)]
pub enum UiEffect {
    Quit,
    /// Exchange credentials for a session and persist it.
    Login {
        email: String,
        password: String,
        remember: bool,
    },
    /// Create the account (signup step 1) and persist the draft.
    Register { email: String, password: String },
    VerifyOtp { user_id: i64, otp: String },
    ResendOtp { user_id: i64 },
    /// Signup step 2: log in with the draft credentials, then create the
    /// doctor profile with the bearer token attached.
    SubmitProfile {
        draft: SignupDraft,
        profile: DoctorProfile,
    },
    /// Fetch the account record for the dashboard.
    LoadAccount,
    /// Wipe the persisted session.
    Logout,
}
