//! Core library for the mediq terminal client.
//!
//! Everything that is not rendering lives here: configuration, the session
//! store (the single owner of persisted client state), field validation, and
//! the authenticated HTTP client for the backend API.

pub mod api;
pub mod config;
pub mod logging;
pub mod session;
pub mod validate;
