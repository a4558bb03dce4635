//! Transport seam and wire types for the two session endpoints.
//!
//! DESIGN
//! ======
//! Transports only move bytes and map HTTP outcomes onto [`BackendError`];
//! deciding what a failure means for the session is `SessionService`'s job.
//! The status/body helpers live here so the browser and CLI transports
//! classify responses identically.

#[cfg(test)]
#[path = "backend_test.rs"]
mod backend_test;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::BackendError;
use crate::profile::{Credential, UserProfile};

/// Credential exchange endpoint.
pub const LOGIN_PATH: &str = "/api/auth/login";
/// Identity-check endpoint; expects the token as a bearer credential.
pub const CURRENT_USER_PATH: &str = "/api/auth/me";

/// Maximum number of error body characters surfaced to the UI.
const MAX_ERROR_CHARS: usize = 200;

/// Body of `POST /api/auth/login`.
#[derive(Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Successful login payload.
#[derive(Clone, Debug, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(alias = "profile")]
    pub user: UserProfile,
}

/// Identity-check payload, bare or wrapped in `{ "user": ... }`.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum CurrentUserResponse {
    Wrapped { user: UserProfile },
    Bare(UserProfile),
}

impl CurrentUserResponse {
    #[must_use]
    pub fn into_profile(self) -> UserProfile {
        match self {
            Self::Wrapped { user } | Self::Bare(user) => user,
        }
    }
}

/// Network side of the session operations.
///
/// Futures are not `Send`: the browser runs them on a single-threaded
/// executor and the CLI awaits them on its main task.
#[async_trait(?Send)]
pub trait SessionBackend {
    /// Exchange credentials for a token and profile.
    ///
    /// # Errors
    ///
    /// Returns a [`BackendError`] describing why no session was issued.
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, BackendError>;

    /// Ask the backend who `token` belongs to.
    ///
    /// # Errors
    ///
    /// Returns a [`BackendError`] if the token is refused or the backend is
    /// unreachable.
    async fn current_user(&self, token: &Credential) -> Result<UserProfile, BackendError>;
}

#[async_trait(?Send)]
impl<T: SessionBackend + ?Sized> SessionBackend for &T {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, BackendError> {
        (**self).login(request).await
    }

    async fn current_user(&self, token: &Credential) -> Result<UserProfile, BackendError> {
        (**self).current_user(token).await
    }
}

/// Join a base URL and an absolute path, tolerating stray slashes.
/// An empty base yields the path unchanged (same-origin requests).
#[must_use]
pub fn join_url(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_owned()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}

/// Map a non-success HTTP status and its body onto a [`BackendError`].
#[must_use]
pub fn classify_status(status: u16, body: &str) -> BackendError {
    let message = error_message(status, body);
    match status {
        401 | 403 => BackendError::Unauthorized { status, message },
        400..=499 => BackendError::Rejected { status, message },
        _ => BackendError::Server { status, message },
    }
}

/// Human-readable message from an error body.
///
/// Prefers a JSON `message` or `error` string field; otherwise the trimmed,
/// truncated body text.
#[must_use]
pub fn error_message(status: u16, body: &str) -> String {
    if let Ok(serde_json::Value::Object(fields)) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "error"] {
            if let Some(serde_json::Value::String(text)) = fields.get(key) {
                let text = text.trim();
                if !text.is_empty() {
                    return truncate(text);
                }
            }
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() || trimmed.starts_with('{') {
        format!("Request failed ({status}).")
    } else {
        truncate(trimmed)
    }
}

fn truncate(text: &str) -> String {
    text.chars().take(MAX_ERROR_CHARS).collect()
}
