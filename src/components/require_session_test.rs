use super::*;

#[test]
fn redirect_replaces_history() {
    let options = redirect_options();
    assert!(options.replace);
}

#[test]
fn redirect_keeps_router_defaults_otherwise() {
    let options = redirect_options();
    let defaults = NavigateOptions::default();
    assert_eq!(options.resolve, defaults.resolve);
    assert_eq!(options.scroll, defaults.scroll);
}

// =============================================================
// Mount lifetime
// =============================================================

#[test]
fn owned_mount_unmounts_when_owner_is_disposed() {
    let owner = leptos::reactive::owner::Owner::new();
    let mount = owner.with(owned_mount);
    assert!(mount.is_mounted());

    owner.cleanup();

    assert!(!mount.is_mounted());
}

#[test]
fn owned_mounts_are_independent() {
    let first_owner = leptos::reactive::owner::Owner::new();
    let second_owner = leptos::reactive::owner::Owner::new();
    let first = first_owner.with(owned_mount);
    let second = second_owner.with(owned_mount);

    first_owner.cleanup();

    assert!(!first.is_mounted());
    assert!(second.is_mounted());
}

// =============================================================
// Transitions
// =============================================================

fn ana() -> session::UserProfile {
    session::UserProfile {
        id: session::UserId::Number(1),
        name: "Ana".to_owned(),
        role: None,
        email: None,
    }
}

#[test]
fn authenticated_transition_confirms_profile() {
    let context = SessionContext::new();
    let state = RwSignal::new(GuardState::Checking);

    apply_transition(context, state, &GuardState::Authenticated(ana()));

    assert_eq!(state.get_untracked(), GuardState::Authenticated(ana()));
    assert_eq!(context.profile.get_untracked(), Some(ana()));
    assert_eq!(context.denied.get_untracked(), None);
}

#[test]
fn rejected_transition_records_denial_and_drops_profile() {
    let context = SessionContext::new();
    context.set_profile(ana());
    let state = RwSignal::new(GuardState::Checking);
    let next = GuardState::Unauthenticated(session::DenyReason::Rejected);

    apply_transition(context, state, &next);

    assert_eq!(state.get_untracked().render(), RenderDecision::Redirect);
    assert_eq!(context.profile.get_untracked(), None);
    assert_eq!(context.take_denial(), Some(session::DenyReason::Rejected));
}
