//! `reqwest` transport for the session endpoints.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use session::{
    BackendError, CURRENT_USER_PATH, Credential, CurrentUserResponse, LOGIN_PATH, LoginRequest,
    LoginResponse, SessionBackend, UserProfile, classify_status, join_url,
};

#[derive(Debug, Clone)]
pub struct ReqwestBackend {
    client: reqwest::Client,
    base_url: String,
}

impl ReqwestBackend {
    /// Builds a client whose every request gives up after `timeout`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }
}

#[async_trait(?Send)]
impl SessionBackend for ReqwestBackend {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, BackendError> {
        tracing::debug!(email = %request.email, "POST {LOGIN_PATH}");
        let response = self
            .client
            .post(self.url(LOGIN_PATH))
            .json(request)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        read_json(response).await
    }

    async fn current_user(&self, token: &Credential) -> Result<UserProfile, BackendError> {
        tracing::debug!("GET {CURRENT_USER_PATH}");
        let response = self
            .client
            .get(self.url(CURRENT_USER_PATH))
            .bearer_auth(token.expose())
            .send()
            .await
            .map_err(map_reqwest_error)?;
        read_json::<CurrentUserResponse>(response)
            .await
            .map(CurrentUserResponse::into_profile)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> BackendError {
    if err.is_timeout() {
        BackendError::Timeout
    } else if err.is_decode() {
        BackendError::Decode(err.to_string())
    } else {
        BackendError::Network(err.to_string())
    }
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, BackendError> {
    let status = response.status();
    let body = response.text().await.map_err(map_reqwest_error)?;
    decode_body(status.as_u16(), &body)
}

/// Classifies a non-2xx answer, otherwise decodes `body` as `T`.
fn decode_body<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, BackendError> {
    if !(200..300).contains(&status) {
        return Err(classify_status(status, body));
    }
    serde_json::from_str(body).map_err(|err| BackendError::Decode(err.to_string()))
}
