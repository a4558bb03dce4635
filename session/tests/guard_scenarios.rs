//! End-to-end guard scenarios through the public API.

use std::cell::{Cell, RefCell};

use async_trait::async_trait;
use futures::executor::block_on;
use session::{
    BackendError, Credential, DenyReason, GuardMount, GuardState, LoginRequest, LoginResponse,
    MemoryStorage, PROFILE_SLOT, RenderDecision, RouteGuard, SessionBackend, SessionService,
    TOKEN_SLOT, UserId, UserProfile,
};

/// Backend that accepts exactly one token and one password.
struct StubBackend {
    valid_token: &'static str,
    calls: Cell<usize>,
}

impl StubBackend {
    fn new(valid_token: &'static str) -> Self {
        Self { valid_token, calls: Cell::new(0) }
    }
}

fn user_a() -> UserProfile {
    UserProfile {
        id: UserId::Number(1),
        name: "A".to_owned(),
        role: None,
        email: None,
    }
}

#[async_trait(?Send)]
impl SessionBackend for StubBackend {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, BackendError> {
        self.calls.set(self.calls.get() + 1);
        if request.password == "correct horse" {
            Ok(LoginResponse {
                token: self.valid_token.to_owned(),
                user: user_a(),
            })
        } else {
            Err(BackendError::Unauthorized {
                status: 401,
                message: "Invalid email or password".to_owned(),
            })
        }
    }

    async fn current_user(&self, token: &Credential) -> Result<UserProfile, BackendError> {
        self.calls.set(self.calls.get() + 1);
        if token.expose() == self.valid_token {
            Ok(user_a())
        } else {
            Err(BackendError::Unauthorized {
                status: 401,
                message: "token expired".to_owned(),
            })
        }
    }
}

fn seeded(token: &str) -> MemoryStorage {
    let profile = r#"{"id":1,"name":"A"}"#;
    MemoryStorage::with_slots([(TOKEN_SLOT, token), (PROFILE_SLOT, profile)])
}

fn mount_guard<S: session::Storage, B: SessionBackend>(
    service: &SessionService<S, B>,
) -> (Option<GuardState>, Vec<String>) {
    let redirects = RefCell::new(Vec::new());
    let navigate = |route: &str| redirects.borrow_mut().push(route.to_owned());
    let state = block_on(RouteGuard::new(service).run(&GuardMount::new(), |_| {}, &navigate));
    (state, redirects.into_inner())
}

#[test]
fn accepted_token_renders_children() {
    let service = SessionService::new(seeded("abc"), StubBackend::new("abc"));

    let (state, redirects) = mount_guard(&service);

    let state = state.unwrap();
    assert_eq!(state.render(), RenderDecision::Protected);
    assert_eq!(state.profile(), Some(&user_a()));
    assert!(redirects.is_empty());
}

#[test]
fn empty_store_redirects_with_zero_network_calls() {
    let service = SessionService::new(MemoryStorage::new(), StubBackend::new("abc"));

    let (state, redirects) = mount_guard(&service);

    assert_eq!(state, Some(GuardState::Unauthenticated(DenyReason::NoLocalSession)));
    assert_eq!(redirects, vec!["/".to_owned()]);
    assert_eq!(service.backend().calls.get(), 0);
}

#[test]
fn expired_token_redirects_then_explicit_logout_clears() {
    let service = SessionService::new(seeded("expired"), StubBackend::new("abc"));

    let (state, redirects) = mount_guard(&service);

    assert_eq!(state, Some(GuardState::Unauthenticated(DenyReason::Rejected)));
    assert_eq!(redirects, vec!["/".to_owned()]);
    assert_eq!(service.store().storage().mutations(), 0);
    assert!(service.store().get_token().is_some());

    service.destroy_session();

    assert!(service.store().get_token().is_none());
    assert!(service.store().get_profile().is_none());
}

#[test]
fn login_then_guard_admits() {
    let service = SessionService::new(MemoryStorage::new(), StubBackend::new("fresh"));

    let profile = block_on(service.authenticate("a@example.com", "correct horse")).unwrap();
    let (state, redirects) = mount_guard(&service);

    assert_eq!(profile, user_a());
    assert_eq!(state, Some(GuardState::Authenticated(user_a())));
    assert!(redirects.is_empty());
}

#[test]
fn failed_login_leaves_store_empty_and_guard_redirects() {
    let service = SessionService::new(MemoryStorage::new(), StubBackend::new("fresh"));

    let err = block_on(service.authenticate("a@example.com", "wrong")).unwrap_err();
    let (state, _) = mount_guard(&service);

    assert_eq!(err.user_message(), "Invalid email or password");
    assert!(service.store().storage().is_empty());
    assert_eq!(state, Some(GuardState::Unauthenticated(DenyReason::NoLocalSession)));
}

#[test]
fn logout_when_already_logged_out_is_a_no_op() {
    let service = SessionService::new(MemoryStorage::new(), StubBackend::new("abc"));

    service.destroy_session();
    service.destroy_session();

    assert!(service.store().storage().is_empty());
    assert_eq!(service.store().storage().mutations(), 0);
}
