//! Authenticated HTTP client for the backend API.
//!
//! All outbound calls go through [`ApiClient`], which decorates requests with
//! the stored bearer token (public paths excepted) and normalizes failures.
//! A 401 on any non-login path wipes the persisted session; the caller sees
//! [`ErrorKind::SessionExpired`] and is expected to land the user back on the
//! login view.

pub mod types;

use reqwest::{Method, StatusCode};
use serde::Serialize;
use thiserror::Error;

use crate::session::{Session, SessionStore, UserInfo};

use types::{
    DoctorProfile, LoginEnvelope, LoginRequest, OtpRequest, RegisterRequest, RegisteredUser,
};

/// Path of the login endpoint. Exempt from the 401 auto-logout: a failed
/// login attempt must not wipe state.
pub const LOGIN_PATH: &str = "/v1/users/login/";

/// Registration collection root. Only an exact match is public; sub-paths
/// like `/v1/users/my-account/` stay protected.
const REGISTER_PATH: &str = "/v1/users/";

/// Public endpoints matched by prefix.
const PUBLIC_PREFIXES: &[&str] = &[
    LOGIN_PATH,
    "/v1/users/forgot-password/",
    "/v1/users/reset-password/",
];

/// Per-user OTP endpoints (`/v1/users/{id}/verify-otp/`), public because the
/// caller has no token yet at that point in signup.
const PUBLIC_USER_SUFFIXES: &[&str] = &["/verify-otp/", "/resend-otp/"];

const ROLE_DOCTOR: &str = "doctor";

/// What went wrong with an API call, as far as the UI needs to know.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request never got a response (connection refused, DNS, timeout).
    Network,
    /// The backend answered with a non-2xx status other than the cases below.
    Api,
    /// 401 on the login path: bad credentials, session left intact.
    Unauthorized,
    /// 401 on a protected path: the stored session has been cleared.
    SessionExpired,
}

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ApiError {
    pub kind: ErrorKind,
    pub message: String,
}

impl ApiError {
    fn network(err: &reqwest::Error) -> Self {
        Self {
            kind: ErrorKind::Network,
            message: format!("Could not reach the server: {err}"),
        }
    }

    fn decode(what: &str) -> Self {
        Self {
            kind: ErrorKind::Api,
            message: format!("Unexpected {what} response from the server"),
        }
    }
}

fn is_public(path: &str) -> bool {
    if path == REGISTER_PATH {
        return true;
    }
    if PUBLIC_PREFIXES.iter().any(|p| path.starts_with(p)) {
        return true;
    }
    path.starts_with(REGISTER_PATH) && PUBLIC_USER_SUFFIXES.iter().any(|s| path.ends_with(s))
}

/// Pulls a human-readable message out of an error body.
///
/// Backends answer with `{"detail": ...}` or `{"message": ...}` depending on
/// the endpoint; fall back to the raw body, then to the status line.
fn extract_error_message(body: &str, status: StatusCode) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["detail", "message"] {
            if let Some(text) = value.get(key).and_then(|v| v.as_str()) {
                return text.to_string();
            }
        }
    }
    let trimmed = body.trim();
    if !trimmed.is_empty() && trimmed.len() <= 200 {
        return trimmed.to_string();
    }
    format!("Request failed with status {status}")
}

/// HTTP client bound to a base URL and the session store.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    store: SessionStore,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, store: SessionStore) -> Self {
        Self {
            base_url: base_url.into(),
            store,
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn request<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<String, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let mut builder = self.http.request(method.clone(), &url);

        if !is_public(path) {
            if let Some(token) = self.store.access_token() {
                builder = builder.bearer_auth(token);
            }
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        tracing::debug!(%method, path, "sending request");
        let response = builder.send().await.map_err(|err| {
            tracing::warn!(path, error = %err, "request failed to send");
            ApiError::network(&err)
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|err| ApiError::network(&err))?;

        if status.is_success() {
            return Ok(text);
        }

        if status == StatusCode::UNAUTHORIZED && path != LOGIN_PATH {
            tracing::info!(path, "401 on protected path, clearing session");
            if let Err(err) = self.store.clear() {
                tracing::warn!(error = %err, "failed to clear session store");
            }
            return Err(ApiError {
                kind: ErrorKind::SessionExpired,
                message: "Your session has expired. Please log in again.".to_string(),
            });
        }

        let kind = if status == StatusCode::UNAUTHORIZED {
            ErrorKind::Unauthorized
        } else {
            ErrorKind::Api
        };
        Err(ApiError {
            kind,
            message: extract_error_message(&text, status),
        })
    }

    /// Registers a new account and returns the created user's id.
    pub async fn register(&self, email: &str, password: &str) -> Result<i64, ApiError> {
        let body = RegisterRequest {
            email,
            password,
            role: ROLE_DOCTOR,
        };
        let text = self.request(Method::POST, REGISTER_PATH, Some(&body)).await?;
        let user: RegisteredUser =
            serde_json::from_str(&text).map_err(|_| ApiError::decode("registration"))?;
        Ok(user.id)
    }

    /// Confirms the 6-digit code sent to a freshly registered user.
    pub async fn verify_otp(&self, user_id: i64, otp: &str) -> Result<(), ApiError> {
        let path = format!("/v1/users/{user_id}/verify-otp/");
        self.request(Method::POST, &path, Some(&OtpRequest { otp }))
            .await?;
        Ok(())
    }

    /// Asks the backend to send a fresh code.
    pub async fn resend_otp(&self, user_id: i64) -> Result<(), ApiError> {
        let path = format!("/v1/users/{user_id}/resend-otp/");
        self.request(Method::POST, &path, Some(&serde_json::json!({})))
            .await?;
        Ok(())
    }

    /// Exchanges credentials for a session. Does not persist anything; the
    /// caller decides whether and where to store the result.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, ApiError> {
        let body = LoginRequest { email, password };
        let text = self.request(Method::POST, LOGIN_PATH, Some(&body)).await?;
        let envelope: LoginEnvelope =
            serde_json::from_str(&text).map_err(|_| ApiError::decode("login"))?;
        let data = envelope.data;
        Ok(Session {
            access_token: data.access_token,
            refresh_token: data.refresh_token,
            user: UserInfo {
                id: data.id,
                email: data.email,
                role: data.role,
            },
        })
    }

    /// Creates the doctor profile (signup step 2). Requires a bearer token.
    pub async fn create_doctor(&self, profile: &DoctorProfile) -> Result<(), ApiError> {
        self.request(Method::POST, "/v1/doctors/", Some(profile))
            .await?;
        Ok(())
    }

    /// Fetches the authenticated user's account record.
    pub async fn my_account(&self) -> Result<UserInfo, ApiError> {
        let text = self
            .request::<()>(Method::GET, "/v1/users/my-account/", None)
            .await?;
        serde_json::from_str(&text).map_err(|_| ApiError::decode("account"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_paths() {
        assert!(is_public("/v1/users/"));
        assert!(is_public("/v1/users/login/"));
        assert!(is_public("/v1/users/forgot-password/"));
        assert!(is_public("/v1/users/reset-password/"));
        assert!(is_public("/v1/users/42/verify-otp/"));
        assert!(is_public("/v1/users/42/resend-otp/"));
    }

    #[test]
    fn test_protected_paths() {
        assert!(!is_public("/v1/users/my-account/"));
        assert!(!is_public("/v1/users/42/"));
        assert!(!is_public("/v1/doctors/"));
    }

    #[test]
    fn test_extract_error_prefers_detail() {
        let body = r#"{"detail": "Invalid credentials", "message": "other"}"#;
        assert_eq!(
            extract_error_message(body, StatusCode::UNAUTHORIZED),
            "Invalid credentials"
        );
    }

    #[test]
    fn test_extract_error_falls_back_to_message() {
        let body = r#"{"message": "User already exists"}"#;
        assert_eq!(
            extract_error_message(body, StatusCode::BAD_REQUEST),
            "User already exists"
        );
    }

    #[test]
    fn test_extract_error_uses_short_raw_body() {
        assert_eq!(
            extract_error_message("server on fire", StatusCode::INTERNAL_SERVER_ERROR),
            "server on fire"
        );
    }

    #[test]
    fn test_extract_error_status_fallback() {
        let long_body = "x".repeat(500);
        assert_eq!(
            extract_error_message(&long_body, StatusCode::BAD_GATEWAY),
            "Request failed with status 502 Bad Gateway"
        );
        assert_eq!(
            extract_error_message("", StatusCode::NOT_FOUND),
            "Request failed with status 404 Not Found"
        );
    }
}
