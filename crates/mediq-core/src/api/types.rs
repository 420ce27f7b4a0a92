//! Wire types for the backend API.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct RegisterRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub role: &'a str,
}

/// The created user. Registration returns the full user record; only the id
/// matters to the client (it addresses the OTP endpoints).
#[derive(Debug, Deserialize)]
pub struct RegisteredUser {
    pub id: i64,
}

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Login responses arrive wrapped in an envelope; the client unwraps `data`.
#[derive(Debug, Deserialize)]
pub struct LoginEnvelope {
    pub data: LoginData,
}

#[derive(Debug, Deserialize)]
pub struct LoginData {
    pub id: i64,
    pub email: String,
    pub role: String,
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
pub struct OtpRequest<'a> {
    pub otp: &'a str,
}

/// Doctor profile payload for signup step 2.
///
/// `license_number` is serialized as `null` when absent; the backend
/// distinguishes an explicit null from a missing key.
#[derive(Debug, Clone, Serialize)]
pub struct DoctorProfile {
    pub name: String,
    pub specialty: String,
    pub contact_number: String,
    pub hospital: String,
    pub license_number: Option<String>,
}
