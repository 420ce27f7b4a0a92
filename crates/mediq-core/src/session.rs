//! Persisted client session state.
//!
//! A single JSON file at ${MEDIQ_HOME}/session.json holds everything the
//! client remembers between runs: the bearer tokens, the logged-in user, an
//! in-progress signup draft, and the optional remembered login email. The
//! [`SessionStore`] is the only writer of that file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::paths;

/// Tokens and identity returned by a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    pub user: UserInfo,
}

/// The authenticated user, as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: i64,
    pub email: String,
    pub role: String,
}

/// Partial signup state carried from step 1 into step 2.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupDraft {
    pub email: String,
    pub password: String,
    pub user_id: i64,
}

/// On-disk layout of session.json. All fields optional so partially
/// populated files (draft without tokens, remembered email only) round-trip.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoredState {
    #[serde(skip_serializing_if = "Option::is_none")]
    access_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    refresh_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    user: Option<UserInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    signup_draft: Option<SignupDraft>,
    #[serde(skip_serializing_if = "Option::is_none")]
    remember_email: Option<String>,
}

/// File-backed store for the client session.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Store backed by the default ${MEDIQ_HOME}/session.json path.
    pub fn new() -> Self {
        Self {
            path: paths::session_path(),
        }
    }

    /// Store backed by an explicit path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> StoredState {
        let Ok(contents) = fs::read_to_string(&self.path) else {
            return StoredState::default();
        };
        match serde_json::from_str(&contents) {
            Ok(state) => state,
            Err(err) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %err,
                    "discarding unreadable session file"
                );
                StoredState::default()
            }
        }
    }

    fn save(&self, state: &StoredState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let json = serde_json::to_string_pretty(state).context("Failed to serialize session")?;

        #[cfg(unix)]
        {
            use std::io::Write;
            use std::os::unix::fs::OpenOptionsExt;

            let mut file = fs::OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(&self.path)
                .with_context(|| format!("Failed to open {}", self.path.display()))?;
            file.write_all(json.as_bytes())
                .with_context(|| format!("Failed to write {}", self.path.display()))?;
        }

        #[cfg(not(unix))]
        {
            fs::write(&self.path, json)
                .with_context(|| format!("Failed to write {}", self.path.display()))?;
        }

        Ok(())
    }

    /// Current bearer token, if logged in.
    pub fn access_token(&self) -> Option<String> {
        self.load().access_token
    }

    /// Current session, if the store holds a complete one.
    pub fn session(&self) -> Option<Session> {
        let state = self.load();
        Some(Session {
            access_token: state.access_token?,
            refresh_token: state.refresh_token?,
            user: state.user?,
        })
    }

    /// The logged-in user, if any.
    pub fn user(&self) -> Option<UserInfo> {
        self.load().user
    }

    /// In-progress signup draft, if step 1 completed without step 2.
    pub fn signup_draft(&self) -> Option<SignupDraft> {
        self.load().signup_draft
    }

    /// The email to pre-fill on the login form, if "remember me" was checked.
    pub fn remember_email(&self) -> Option<String> {
        self.load().remember_email
    }

    /// Persists a freshly obtained session. Clears any signup draft since a
    /// completed login means signup is no longer in flight.
    pub fn set_session(&self, session: &Session) -> Result<()> {
        let mut state = self.load();
        state.access_token = Some(session.access_token.clone());
        state.refresh_token = Some(session.refresh_token.clone());
        state.user = Some(session.user.clone());
        state.signup_draft = None;
        self.save(&state)
    }

    /// Records the signup draft after a successful registration (step 1).
    pub fn set_signup_draft(&self, draft: &SignupDraft) -> Result<()> {
        let mut state = self.load();
        state.signup_draft = Some(draft.clone());
        self.save(&state)
    }

    /// Drops the signup draft (step 2 completed or abandoned).
    pub fn clear_signup_draft(&self) -> Result<()> {
        let mut state = self.load();
        state.signup_draft = None;
        self.save(&state)
    }

    /// Sets or clears the remembered login email.
    pub fn set_remember_email(&self, email: Option<&str>) -> Result<()> {
        let mut state = self.load();
        state.remember_email = email.map(str::to_string);
        self.save(&state)
    }

    /// Wipes everything, including the remembered email. Used on logout and
    /// when the backend rejects our token.
    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)
                .with_context(|| format!("Failed to remove {}", self.path.display()))?;
        }
        Ok(())
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
