//! Error taxonomy for storage, transport, and session operations.
//!
//! Transport failures and authorization rejections are kept apart all the way
//! up so callers can tell "try again" from "you are logged out".

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Failure reported by a [`crate::Storage`] medium.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// The medium itself is missing (no window, storage disabled, etc.).
    #[error("session storage unavailable: {0}")]
    Unavailable(String),
    /// A slot could not be written.
    #[error("failed to write slot `{slot}`: {reason}")]
    Write { slot: String, reason: String },
    /// A slot could not be removed.
    #[error("failed to clear slot `{slot}`: {reason}")]
    Remove { slot: String, reason: String },
}

/// Failure reported by a [`crate::SessionBackend`] transport.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    /// 401 or 403: the backend refused the credentials or token.
    #[error("unauthorized ({status}): {message}")]
    Unauthorized { status: u16, message: String },
    /// Any other 4xx.
    #[error("request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },
    /// 5xx or an unexpected status.
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },
    /// The transport gave up waiting.
    #[error("request timed out")]
    Timeout,
    /// The backend could not be reached.
    #[error("unable to reach the server: {0}")]
    Network(String),
    /// The backend answered with a body we could not decode.
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl BackendError {
    /// Whether the failure is an explicit refusal by the backend, as opposed
    /// to the backend being unreachable or misbehaving.
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Unauthorized { .. } | Self::Rejected { .. })
    }

    /// Backend-supplied message for rejections, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Unauthorized { message, .. }
            | Self::Rejected { message, .. }
            | Self::Server { message, .. } => Some(message),
            _ => None,
        }
    }
}

/// Error returned by [`crate::SessionService`] operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// Credential exchange was rejected or answered with garbage.
    #[error("authentication failed: {0}")]
    AuthFailure(String),
    /// The stored token is no longer accepted.
    #[error("session is no longer valid: {0}")]
    SessionInvalid(String),
    /// The backend could not be reached or failed on its side.
    #[error("transport error: {0}")]
    Transport(BackendError),
    /// Persisted session data could not be parsed.
    #[error("stored session data is malformed: {0}")]
    MalformedLocalState(String),
    /// The persistence medium refused a write; nothing was kept.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl SessionError {
    /// Whether retrying the same operation later could succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Storage(_))
    }

    /// Message suitable for showing on the login form.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::AuthFailure(cause) => cause.clone(),
            Self::SessionInvalid(_) => "Your session has ended. Please sign in again.".to_owned(),
            Self::Transport(BackendError::Timeout) => {
                "The server took too long to respond. Please try again.".to_owned()
            }
            Self::Transport(_) => "Unable to reach the server. Please try again.".to_owned(),
            Self::MalformedLocalState(_) => "Stored session data was unreadable.".to_owned(),
            Self::Storage(_) => "Could not save your session in this browser.".to_owned(),
        }
    }
}
