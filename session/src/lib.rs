//! Client-held session core for the back-office dashboard.
//!
//! This crate owns the session credential/profile pair, the network-backed
//! session operations, and the route-guard state machine. It is shared by the
//! Leptos web client and the operator CLI, and deliberately knows nothing
//! about browsers or runtimes: persistence and transport are injected through
//! the [`Storage`] and [`SessionBackend`] traits.
//!
//! ARCHITECTURE
//! ============
//! `RouteGuard` -> `SessionStore` (local presence) -> `SessionService`
//! (remote validation) -> `GuardState`. Only `SessionService` writes the store.

pub mod backend;
pub mod error;
pub mod guard;
pub mod profile;
pub mod service;
pub mod storage;
pub mod store;

pub use backend::{
    CURRENT_USER_PATH, CurrentUserResponse, LOGIN_PATH, LoginRequest, LoginResponse,
    SessionBackend, classify_status, error_message, join_url,
};
pub use error::{BackendError, SessionError, StorageError};
pub use guard::{DenyReason, GuardMount, GuardState, Navigator, RenderDecision, RouteGuard};
pub use profile::{Credential, UserId, UserProfile};
pub use service::SessionService;
pub use storage::{MemoryStorage, Storage};
pub use store::{PROFILE_SLOT, SessionStore, TOKEN_SLOT};

/// Route unauthenticated visitors are sent to.
pub const ENTRY_ROUTE: &str = "/";

#[cfg(test)]
pub(crate) mod test_helpers;
