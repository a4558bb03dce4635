//! Session context for the signed-in user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Holds only the profile the guard or login page last confirmed, for
//! identity-aware rendering (shell header, dashboard greeting). It is never a
//! substitute for the guard: every protected route revalidates on mount.
//!
//! The guard itself never writes storage. When a cycle ends because the
//! backend refused the token, the reason is parked here and the login page
//! discards the stored pair on arrival.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use leptos::prelude::*;
use session::{DenyReason, SessionBackend, SessionService, Storage, UserProfile};

use crate::config::AppConfig;
use crate::net::http::HttpBackend;
use crate::util::local_storage::LocalStorage;

/// Session service wired to `localStorage` and the configured backend.
pub type BrowserSession = SessionService<LocalStorage, HttpBackend>;

/// Builds a session service for the current page.
pub fn browser_session() -> BrowserSession {
    let config = AppConfig::load();
    SessionService::new(LocalStorage, HttpBackend::from_config(&config))
}

/// Confirmed-user context shared through Leptos.
#[derive(Clone, Copy)]
pub struct SessionContext {
    pub profile: RwSignal<Option<UserProfile>>,
    /// Why the last guard cycle redirected, until the login page consumes it.
    pub denied: RwSignal<Option<DenyReason>>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self {
            profile: RwSignal::new(None),
            denied: RwSignal::new(None),
        }
    }

    /// Records an unauthenticated guard outcome and forgets the profile.
    pub fn record_denial(&self, reason: DenyReason) {
        self.profile.set(None);
        self.denied.set(Some(reason));
    }

    /// Returns and clears the recorded denial.
    pub fn take_denial(&self) -> Option<DenyReason> {
        let reason = self.denied.get_untracked();
        if reason.is_some() {
            self.denied.set(None);
        }
        reason
    }

    /// Records a profile confirmed by login or by the guard.
    pub fn set_profile(&self, profile: UserProfile) {
        self.profile.set(Some(profile));
    }

    /// Forgets the confirmed profile, typically on logout.
    pub fn clear(&self) {
        self.profile.set(None);
    }

    /// Name for the shell header; empty until a profile is confirmed.
    pub fn display_name(&self) -> String {
        self.profile
            .get()
            .map(|profile| profile.display_name())
            .unwrap_or_default()
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns the session context or a fresh empty one.
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().unwrap_or_default()
}

/// Destroys the local session and clears the context. Purely local.
pub fn sign_out(context: SessionContext) {
    browser_session().destroy_session();
    context.clear();
}

/// Destroys the stored session when the last guard cycle saw the backend
/// refuse it. Unreachable backends and missing sessions leave storage alone.
/// Returns whether anything was discarded.
pub fn discard_rejected_session<S: Storage, B: SessionBackend>(
    context: SessionContext,
    service: &SessionService<S, B>,
) -> bool {
    if context.take_denial() != Some(DenyReason::Rejected) {
        return false;
    }
    log::info!("discarding session the backend rejected");
    service.destroy_session();
    true
}
