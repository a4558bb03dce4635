//! Route-guard state machine for protected views.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every protected route mounts a guard. Each mount runs one validation cycle:
//! local presence check first, then the authoritative backend check, then a
//! single terminal transition. The protected subtree is only rendered once
//! the cycle ends in `Authenticated`.
//!
//! CANCELLATION
//! ============
//! A `GuardMount` is the cancellation boundary. Once unmounted, a late
//! backend answer is dropped: no transition callback, no redirect. The guard
//! never writes the session store, so a discarded cycle leaves nothing behind.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::ENTRY_ROUTE;
use crate::backend::SessionBackend;
use crate::error::SessionError;
use crate::profile::UserProfile;
use crate::service::SessionService;
use crate::storage::Storage;

/// Why a guard ended unauthenticated. Only used for logging; every reason
/// renders the same redirect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DenyReason {
    /// Token or profile missing locally; the backend was not asked.
    NoLocalSession,
    /// The backend refused the stored token.
    Rejected,
    /// The backend could not be reached.
    Unreachable,
}

/// Per-mount guard state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardState {
    Checking,
    Authenticated(UserProfile),
    Unauthenticated(DenyReason),
}

/// What a guarded view should show for a given state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderDecision {
    /// Neutral loading indicator; nothing from the protected subtree.
    Loading,
    /// The protected subtree, unmodified.
    Protected,
    /// Nothing; a history-replacing redirect to the entry route is under way.
    Redirect,
}

impl GuardState {
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Checking)
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    #[must_use]
    pub fn profile(&self) -> Option<&UserProfile> {
        match self {
            Self::Authenticated(profile) => Some(profile),
            _ => None,
        }
    }

    #[must_use]
    pub fn render(&self) -> RenderDecision {
        match self {
            Self::Checking => RenderDecision::Loading,
            Self::Authenticated(_) => RenderDecision::Protected,
            Self::Unauthenticated(_) => RenderDecision::Redirect,
        }
    }
}

/// Performs the unauthenticated redirect. Implementations must replace the
/// current history entry so "back" cannot return to the protected view.
pub trait Navigator {
    fn replace(&self, route: &str);
}

impl<F: Fn(&str)> Navigator for F {
    fn replace(&self, route: &str) {
        self(route);
    }
}

/// One activation of a guard.
///
/// Cloning shares the flags, so a view can hand one clone to its cleanup hook
/// and another to the validation task.
#[derive(Clone, Debug)]
pub struct GuardMount {
    mounted: Arc<AtomicBool>,
    started: Arc<AtomicBool>,
}

impl GuardMount {
    #[must_use]
    pub fn new() -> Self {
        Self {
            mounted: Arc::new(AtomicBool::new(true)),
            started: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Mark the owning view as gone. Any in-flight cycle will be discarded.
    pub fn unmount(&self) {
        self.mounted.store(false, Ordering::Release);
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::Acquire)
    }

    /// Claim the single validation cycle of this mount.
    fn begin(&self) -> bool {
        !self.started.swap(true, Ordering::AcqRel)
    }
}

impl Default for GuardMount {
    fn default() -> Self {
        Self::new()
    }
}

/// Decides whether a protected view may render.
pub struct RouteGuard<'a, S, B> {
    service: &'a SessionService<S, B>,
    entry_route: &'a str,
}

impl<'a, S: Storage, B: SessionBackend> RouteGuard<'a, S, B> {
    pub fn new(service: &'a SessionService<S, B>) -> Self {
        Self {
            service,
            entry_route: ENTRY_ROUTE,
        }
    }

    /// Redirect unauthenticated visitors somewhere other than `/`.
    #[must_use]
    pub fn with_entry_route(mut self, entry_route: &'a str) -> Self {
        self.entry_route = entry_route;
        self
    }

    pub fn entry_route(&self) -> &str {
        self.entry_route
    }

    /// Compute the terminal state without side effects.
    ///
    /// The local check always completes before the backend is asked, and the
    /// backend is not asked at all when the local pair is incomplete.
    pub async fn evaluate(&self) -> GuardState {
        if !self.service.has_local_session() {
            log::debug!("no local session; skipping identity check");
            return GuardState::Unauthenticated(DenyReason::NoLocalSession);
        }

        match self.service.fetch_current_user().await {
            Ok(profile) => GuardState::Authenticated(profile),
            Err(SessionError::Transport(err)) => {
                log::warn!("identity check failed, treating session as invalid: {err}");
                GuardState::Unauthenticated(DenyReason::Unreachable)
            }
            Err(err) => {
                log::info!("stored session rejected: {err}");
                GuardState::Unauthenticated(DenyReason::Rejected)
            }
        }
    }

    /// Run the validation cycle for `mount`.
    ///
    /// Calls `on_transition` with the terminal state and, when it is
    /// `Unauthenticated`, redirects through `navigator`. Returns `None` when
    /// nothing was applied: the cycle already ran for this mount, or the mount
    /// went away before the backend answered.
    pub async fn run<F, N>(&self, mount: &GuardMount, on_transition: F, navigator: &N) -> Option<GuardState>
    where
        F: Fn(&GuardState),
        N: Navigator + ?Sized,
    {
        if !mount.begin() {
            log::debug!("guard cycle already started for this mount");
            return None;
        }
        if !mount.is_mounted() {
            return None;
        }

        let state = self.evaluate().await;

        if !mount.is_mounted() {
            log::debug!("guard unmounted before validation finished; discarding result");
            return None;
        }

        on_transition(&state);
        if state.render() == RenderDecision::Redirect {
            navigator.replace(self.entry_route);
        }
        Some(state)
    }
}
