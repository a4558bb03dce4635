//! Shared fakes for unit tests.

use std::cell::{Cell, RefCell};

use async_trait::async_trait;
use futures::channel::oneshot;

use crate::backend::{LoginRequest, LoginResponse, SessionBackend};
use crate::error::BackendError;
use crate::profile::{Credential, UserId, UserProfile};
use crate::storage::MemoryStorage;
use crate::store::{PROFILE_SLOT, TOKEN_SLOT};

pub(crate) fn profile(id: i64, name: &str) -> UserProfile {
    UserProfile {
        id: UserId::Number(id),
        name: name.to_owned(),
        role: None,
        email: None,
    }
}

pub(crate) fn profile_json(id: i64, name: &str) -> String {
    serde_json::to_string(&profile(id, name)).unwrap()
}

/// Storage holding `token` and a profile for `(id, name)`.
pub(crate) fn seeded_storage(token: &str, id: i64, name: &str) -> MemoryStorage {
    let raw = profile_json(id, name);
    MemoryStorage::with_slots([(TOKEN_SLOT, token), (PROFILE_SLOT, raw.as_str())])
}

pub(crate) fn unauthorized() -> BackendError {
    BackendError::Unauthorized {
        status: 401,
        message: "Invalid token".to_owned(),
    }
}

/// Backend with canned answers that records every call.
#[derive(Default)]
pub(crate) struct FakeBackend {
    login: Option<Result<LoginResponse, BackendError>>,
    current_user: Option<Result<UserProfile, BackendError>>,
    login_calls: Cell<usize>,
    current_user_calls: Cell<usize>,
    seen_tokens: RefCell<Vec<String>>,
}

impl FakeBackend {
    pub(crate) fn accepting(profile: UserProfile) -> Self {
        Self {
            current_user: Some(Ok(profile)),
            ..Self::default()
        }
    }

    pub(crate) fn failing(err: BackendError) -> Self {
        Self {
            login: Some(Err(err.clone())),
            current_user: Some(Err(err)),
            ..Self::default()
        }
    }

    pub(crate) fn issuing(token: &str, profile: UserProfile) -> Self {
        Self {
            login: Some(Ok(LoginResponse {
                token: token.to_owned(),
                user: profile,
            })),
            ..Self::default()
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.login_calls.get() + self.current_user_calls.get()
    }

    pub(crate) fn seen_tokens(&self) -> Vec<String> {
        self.seen_tokens.borrow().clone()
    }
}

#[async_trait(?Send)]
impl SessionBackend for FakeBackend {
    async fn login(&self, _request: &LoginRequest) -> Result<LoginResponse, BackendError> {
        self.login_calls.set(self.login_calls.get() + 1);
        self.login
            .clone()
            .unwrap_or_else(|| Err(BackendError::Network("no scripted login".to_owned())))
    }

    async fn current_user(&self, token: &Credential) -> Result<UserProfile, BackendError> {
        self.current_user_calls.set(self.current_user_calls.get() + 1);
        self.seen_tokens.borrow_mut().push(token.expose().to_owned());
        self.current_user
            .clone()
            .unwrap_or_else(|| Err(BackendError::Network("no scripted identity check".to_owned())))
    }
}

/// Backend whose identity check stays pending until the test releases it.
pub(crate) struct GatedBackend {
    gate: RefCell<Option<oneshot::Receiver<Result<UserProfile, BackendError>>>>,
    calls: Cell<usize>,
}

impl GatedBackend {
    pub(crate) fn new() -> (Self, oneshot::Sender<Result<UserProfile, BackendError>>) {
        let (tx, rx) = oneshot::channel();
        let backend = Self {
            gate: RefCell::new(Some(rx)),
            calls: Cell::new(0),
        };
        (backend, tx)
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.get()
    }
}

#[async_trait(?Send)]
impl SessionBackend for GatedBackend {
    async fn login(&self, _request: &LoginRequest) -> Result<LoginResponse, BackendError> {
        Err(BackendError::Network("login not gated".to_owned()))
    }

    async fn current_user(&self, _token: &Credential) -> Result<UserProfile, BackendError> {
        self.calls.set(self.calls.get() + 1);
        let gate = self.gate.borrow_mut().take();
        match gate {
            Some(rx) => rx
                .await
                .unwrap_or_else(|_| Err(BackendError::Network("gate dropped".to_owned()))),
            None => Err(BackendError::Network("gate already used".to_owned())),
        }
    }
}
