//! Route guard component for protected views.
//!
//! SYSTEM CONTEXT
//! ==============
//! Wraps every protected route. Each mount starts in `Checking` and runs one
//! `session::RouteGuard` cycle on a local task; the children are built only
//! once that cycle ends in `Authenticated`. Unmounting flips the mount flag so
//! a late answer neither renders nor redirects. An `Unauthenticated` outcome
//! is recorded in the session context for the login page to act on.

#[cfg(test)]
#[path = "require_session_test.rs"]
mod require_session_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;
use session::{GuardMount, GuardState, RenderDecision};

use crate::state::session::{SessionContext, use_session};

/// Options for the unauthenticated redirect: replace the history entry so
/// "back" cannot land on the protected route again.
pub fn redirect_options() -> NavigateOptions {
    NavigateOptions {
        replace: true,
        ..NavigateOptions::default()
    }
}

/// Guard mount bound to the current reactive owner: disposing the owner
/// (the route unmounting) unmounts the guard.
pub fn owned_mount() -> GuardMount {
    let mount = GuardMount::new();
    let cleanup_mount = mount.clone();
    on_cleanup(move || cleanup_mount.unmount());
    mount
}

/// Applies a terminal guard state to the view and the session context.
pub fn apply_transition(context: SessionContext, state: RwSignal<GuardState>, next: &GuardState) {
    match next {
        GuardState::Authenticated(profile) => context.set_profile(profile.clone()),
        GuardState::Unauthenticated(reason) => context.record_denial(*reason),
        GuardState::Checking => {}
    }
    state.set(next.clone());
}

/// Renders `children` only for a session the backend has just confirmed.
#[component]
pub fn RequireSession(children: ChildrenFn) -> impl IntoView {
    let state = RwSignal::new(GuardState::Checking);
    let context = use_session();
    let navigate = use_navigate();
    let mount = owned_mount();

    #[cfg(feature = "csr")]
    leptos::task::spawn_local(async move {
        let service = crate::state::session::browser_session();
        let guard = session::RouteGuard::new(&service);
        let redirect = move |route: &str| navigate(route, redirect_options());
        guard
            .run(&mount, |next| apply_transition(context, state, next), &redirect)
            .await;
    });
    #[cfg(not(feature = "csr"))]
    let _ = (mount, navigate, context);

    move || match state.get().render() {
        RenderDecision::Loading => view! { <LoadingIndicator /> }.into_any(),
        RenderDecision::Protected => children(),
        RenderDecision::Redirect => ().into_any(),
    }
}

/// Neutral placeholder shown while the session is being checked.
#[component]
pub fn LoadingIndicator() -> impl IntoView {
    view! {
        <div class="session-check" role="status" aria-live="polite">
            <span class="session-check__spinner"></span>
            <span class="session-check__label">"Checking your session..."</span>
        </div>
    }
}
