//! Async effect handlers.
//!
//! Each handler is a pure async function returning the `UiEvent` to feed back
//! into the reducer. Persistence happens here, not in the reducer, so result
//! events always describe a store that is already up to date.

use mediq_core::api::types::DoctorProfile;
use mediq_core::api::ApiClient;
use mediq_core::session::{SessionStore, SignupDraft};

use crate::events::UiEvent;

pub async fn login(
    client: ApiClient,
    store: SessionStore,
    email: String,
    password: String,
    remember: bool,
) -> UiEvent {
    match client.login(&email, &password).await {
        Ok(session) => {
            if let Err(err) = store.set_session(&session) {
                tracing::warn!(error = %err, "failed to persist session");
            }
            let remembered = remember.then_some(email.as_str());
            if let Err(err) = store.set_remember_email(remembered) {
                tracing::warn!(error = %err, "failed to persist remembered email");
            }
            UiEvent::LoginResult(Ok(session))
        }
        Err(err) => UiEvent::LoginResult(Err(err)),
    }
}

pub async fn register(
    client: ApiClient,
    store: SessionStore,
    email: String,
    password: String,
) -> UiEvent {
    match client.register(&email, &password).await {
        Ok(user_id) => {
            let draft = SignupDraft {
                email,
                password,
                user_id,
            };
            if let Err(err) = store.set_signup_draft(&draft) {
                tracing::warn!(error = %err, "failed to persist signup draft");
            }
            UiEvent::RegisterResult(Ok(draft))
        }
        Err(err) => UiEvent::RegisterResult(Err(err)),
    }
}

pub async fn verify_otp(client: ApiClient, user_id: i64, otp: String) -> UiEvent {
    UiEvent::OtpResult(client.verify_otp(user_id, &otp).await)
}

pub async fn resend_otp(client: ApiClient, user_id: i64) -> UiEvent {
    UiEvent::ResendResult(client.resend_otp(user_id).await)
}

/// Signup step 2: a fresh login with the draft credentials obtains the token
/// the profile creation needs, then the draft is retired.
pub async fn submit_profile(
    client: ApiClient,
    store: SessionStore,
    draft: SignupDraft,
    profile: DoctorProfile,
) -> UiEvent {
    let session = match client.login(&draft.email, &draft.password).await {
        Ok(session) => session,
        Err(err) => return UiEvent::ProfileResult(Err(err)),
    };
    if let Err(err) = store.set_session(&session) {
        tracing::warn!(error = %err, "failed to persist session");
    }

    if let Err(err) = client.create_doctor(&profile).await {
        return UiEvent::ProfileResult(Err(err));
    }

    if let Err(err) = store.clear_signup_draft() {
        tracing::warn!(error = %err, "failed to clear signup draft");
    }
    UiEvent::ProfileResult(Ok(()))
}

pub async fn load_account(client: ApiClient) -> UiEvent {
    UiEvent::AccountResult(client.my_account().await)
}
