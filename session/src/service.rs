//! Network-backed session operations.
//!
//! ARCHITECTURE
//! ============
//! `SessionService` is the only writer of the session store. It commits the
//! token/profile pair after a successful login, clears it on logout, and
//! validates the stored token without ever mutating the store itself: the
//! caller decides what a rejected token means for local state.
//!
//! ERROR HANDLING
//! ==============
//! Backend refusals map to `AuthFailure` (login) or `SessionInvalid`
//! (validation); unreachable/timeout/5xx map to `Transport` in both cases.

#[cfg(test)]
#[path = "service_test.rs"]
mod service_test;

use crate::backend::{LoginRequest, SessionBackend};
use crate::error::{BackendError, SessionError};
use crate::profile::{Credential, UserProfile};
use crate::storage::Storage;
use crate::store::SessionStore;

/// Session operations over an injected storage medium and transport.
#[derive(Debug)]
pub struct SessionService<S, B> {
    store: SessionStore<S>,
    backend: B,
}

impl<S: Storage, B: SessionBackend> SessionService<S, B> {
    pub fn new(storage: S, backend: B) -> Self {
        Self {
            store: SessionStore::new(storage),
            backend,
        }
    }

    /// Read access to the persisted pair.
    pub fn store(&self) -> &SessionStore<S> {
        &self.store
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Whether a token and a well-formed profile are both stored.
    /// Says nothing about whether the backend still accepts the token.
    pub fn has_local_session(&self) -> bool {
        self.store.snapshot().is_some()
    }

    /// Cached profile of the local session, if both slots are present.
    pub fn local_profile(&self) -> Option<UserProfile> {
        self.store.snapshot().map(|(_, profile)| profile)
    }

    /// Exchange credentials for a session and persist it.
    ///
    /// Token and profile are committed together before this returns; on any
    /// failure nothing new is stored.
    ///
    /// # Errors
    ///
    /// - [`SessionError::AuthFailure`] for blank input, refused credentials,
    ///   or a malformed response.
    /// - [`SessionError::Transport`] when the backend is unreachable.
    /// - [`SessionError::Storage`] when the session could not be persisted.
    pub async fn authenticate(&self, identifier: &str, secret: &str) -> Result<UserProfile, SessionError> {
        let email = identifier.trim();
        if email.is_empty() || secret.trim().is_empty() {
            return Err(SessionError::AuthFailure("Enter both email and password.".to_owned()));
        }

        let request = LoginRequest {
            email: email.to_owned(),
            password: secret.to_owned(),
        };
        let response = self.backend.login(&request).await.map_err(login_error)?;

        let token = Credential::new(response.token);
        if token.is_blank() {
            log::warn!("login response carried an empty token");
            return Err(SessionError::AuthFailure(
                "The server returned an incomplete session.".to_owned(),
            ));
        }

        self.store.commit(&token, &response.user)?;
        log::info!("session established for user {}", response.user.id);
        Ok(response.user)
    }

    /// Validate the stored token against the backend.
    ///
    /// Never touches the store.
    ///
    /// # Errors
    ///
    /// - [`SessionError::SessionInvalid`] when no token is stored or the
    ///   backend refuses it.
    /// - [`SessionError::Transport`] when the backend is unreachable, times
    ///   out, or fails on its side.
    pub async fn fetch_current_user(&self) -> Result<UserProfile, SessionError> {
        let Some(token) = self.store.get_token() else {
            return Err(SessionError::SessionInvalid("no stored session token".to_owned()));
        };
        let profile = self.backend.current_user(&token).await.map_err(validation_error)?;
        log::debug!("session token accepted for user {}", profile.id);
        Ok(profile)
    }

    /// Forget the local session. Purely local and always succeeds.
    pub fn destroy_session(&self) {
        if let Err(err) = self.store.clear() {
            log::warn!("session storage did not clear cleanly: {err}");
        }
        log::info!("session destroyed");
    }
}

fn login_error(err: BackendError) -> SessionError {
    match err {
        BackendError::Unauthorized { message, .. } | BackendError::Rejected { message, .. } => {
            SessionError::AuthFailure(message)
        }
        BackendError::Decode(detail) => {
            log::warn!("undecodable login response: {detail}");
            SessionError::AuthFailure("The server sent an unexpected response.".to_owned())
        }
        other => SessionError::Transport(other),
    }
}

fn validation_error(err: BackendError) -> SessionError {
    if err.is_rejection() {
        SessionError::SessionInvalid(err.to_string())
    } else {
        SessionError::Transport(err)
    }
}
