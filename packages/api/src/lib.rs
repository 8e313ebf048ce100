//! # API crate — HTTP client for the auth backend
//!
//! [`ApiClient`] implements [`store::AuthApi`] over JSON `POST` requests:
//!
//! | Operation | Endpoint | Body | Success body |
//! |-----------|----------|------|--------------|
//! | signup | [`SIGNUP_PATH`] | [`forms::SignupPayload`] (camelCase) | [`store::UserInfo`] |
//! | login | [`LOGIN_PATH`] | [`forms::LoginPayload`] | [`store::UserInfo`] |
//!
//! Any non-2xx response becomes [`ApiError::Status`], with the message taken
//! from a JSON `message`/`error` field when the body has one, otherwise from
//! the raw body text. The store only sees the [`store::AuthError`] it maps to.

use forms::{LoginPayload, SignupPayload};
use serde::de::DeserializeOwned;
use serde::Serialize;
use store::{AuthApi, AuthError, ClientConfig, UserInfo};

mod error;
pub use error::ApiError;

pub const SIGNUP_PATH: &str = "/api/auth/signup";
pub const LOGIN_PATH: &str = "/api/auth/login";

#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.api.base_url.clone())
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        tracing::debug!(%url, "POST");

        let response = self.http.post(&url).json(body).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: error_message(&text),
            });
        }
        Ok(serde_json::from_str(&text)?)
    }
}

impl AuthApi for ApiClient {
    async fn signup(&self, payload: SignupPayload) -> Result<UserInfo, AuthError> {
        Ok(self.post_json(SIGNUP_PATH, &payload).await?)
    }

    async fn login(&self, payload: LoginPayload) -> Result<UserInfo, AuthError> {
        Ok(self.post_json(LOGIN_PATH, &payload).await?)
    }
}

/// Best human-readable message in an error response body.
fn error_message(body: &str) -> String {
    if let Ok(serde_json::Value::Object(map)) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "error"] {
            if let Some(serde_json::Value::String(message)) = map.get(key) {
                return message.clone();
            }
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Request failed".to_string()
    } else {
        trimmed.to_string()
    }
}
