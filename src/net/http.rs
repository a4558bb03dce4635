//! `gloo-net` transport for the session endpoints.
//!
//! Client-side (csr): real HTTP calls with an abort-based timeout.
//! Host builds: stubs that report the backend as unreachable, so the guard
//! fails closed outside the browser.
//!
//! ERROR HANDLING
//! ==============
//! Non-success statuses go through `session::classify_status`; fetch failures
//! are split into timeouts and plain network errors.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use async_trait::async_trait;
use session::{
    BackendError, Credential, LoginRequest, LoginResponse, SessionBackend, UserProfile, join_url,
};

use crate::config::AppConfig;

#[cfg(feature = "csr")]
use gloo_net::http::{Request, Response};
#[cfg(feature = "csr")]
use gloo_timers::callback::Timeout;
#[cfg(feature = "csr")]
use serde::de::DeserializeOwned;
#[cfg(feature = "csr")]
use session::{CURRENT_USER_PATH, CurrentUserResponse, LOGIN_PATH, classify_status};
#[cfg(feature = "csr")]
use web_sys::AbortController;

/// Session transport bound to one API base URL.
#[derive(Clone, Debug)]
pub struct HttpBackend {
    base_url: String,
    timeout_ms: u32,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>, timeout_ms: u32) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_ms,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.api_base_url.clone(), config.request_timeout_ms)
    }

    /// Absolute (or same-origin) URL for an API path.
    pub fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    pub fn timeout_ms(&self) -> u32 {
        self.timeout_ms
    }
}

#[cfg(not(feature = "csr"))]
fn unavailable() -> BackendError {
    BackendError::Network("not available outside the browser".to_owned())
}

#[async_trait(?Send)]
impl SessionBackend for HttpBackend {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, BackendError> {
        #[cfg(feature = "csr")]
        {
            let url = self.url(LOGIN_PATH);
            let response = send_with_timeout(self.timeout_ms, |signal| {
                Request::post(&url)
                    .abort_signal(Some(signal))
                    .json(request)
                    .map_err(|err| BackendError::Network(format!("Failed to build request: {err}")))
            })
            .await?;
            read_json::<LoginResponse>(response).await
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = request;
            Err(unavailable())
        }
    }

    async fn current_user(&self, token: &Credential) -> Result<UserProfile, BackendError> {
        #[cfg(feature = "csr")]
        {
            let url = self.url(CURRENT_USER_PATH);
            let bearer = token.bearer();
            let response = send_with_timeout(self.timeout_ms, |signal| {
                Request::get(&url)
                    .header("Authorization", &bearer)
                    .abort_signal(Some(signal))
                    .build()
                    .map_err(|err| BackendError::Network(format!("Failed to build request: {err}")))
            })
            .await?;
            read_json::<CurrentUserResponse>(response)
                .await
                .map(CurrentUserResponse::into_profile)
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = token;
            Err(unavailable())
        }
    }
}

/// Splits fetch failures into timeouts (our abort) and network errors.
#[cfg(any(test, feature = "csr"))]
fn classify_fetch_error(message: &str) -> BackendError {
    let lowered = message.to_lowercase();
    if lowered.contains("timeout") || lowered.contains("abort") {
        BackendError::Timeout
    } else {
        BackendError::Network(message.to_owned())
    }
}

/// Sends a request with an abort timeout so a hung backend cannot leave the
/// guard in `Checking` forever.
#[cfg(feature = "csr")]
async fn send_with_timeout(
    timeout_ms: u32,
    build_request: impl FnOnce(&web_sys::AbortSignal) -> Result<Request, BackendError>,
) -> Result<Response, BackendError> {
    let controller = AbortController::new()
        .map_err(|_| BackendError::Network("Failed to initialize request timeout.".to_owned()))?;
    let signal = controller.signal();
    let timeout_controller = controller.clone();
    let _timeout = Timeout::new(timeout_ms, move || timeout_controller.abort());

    let request = build_request(&signal)?;
    request
        .send()
        .await
        .map_err(|err| classify_fetch_error(&err.to_string()))
}

/// Parses JSON on success; otherwise classifies the status and error body.
#[cfg(feature = "csr")]
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, BackendError> {
    if response.ok() {
        response
            .json::<T>()
            .await
            .map_err(|err| BackendError::Decode(err.to_string()))
    } else {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(classify_status(status, &body))
    }
}
