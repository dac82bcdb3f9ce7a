//! HTTP client with bearer token injection and a single silent refresh.
//!
//! Every authenticated call reads the access token from the credential store
//! right before it is sent. A 401 triggers at most one refresh through
//! `POST /auth/refresh-token` followed by one retry of the same request.

use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::Mutex;

use super::error::ApiError;
use super::types::{RefreshRequest, RefreshResponse};
use crate::config::ClientConfig;
use crate::store::{CredentialKey, CredentialStore};

/// Endpoint that exchanges a refresh token for a new access token.
pub const REFRESH_PATH: &str = "/auth/refresh-token";

/// Refresh-and-retry cycles allowed per logical call.
const MAX_AUTH_RETRIES: u32 = 1;

/// One logical API call. Never mutated once built, so the retry sends
/// exactly what the first attempt sent.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Attach a JSON body.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, ApiError> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }
}

/// HTTP client wrapper for Task Master API communication.
pub struct ApiClient<S: CredentialStore> {
    client: Client,
    config: ClientConfig,
    store: S,
    // Held while a refresh is in flight so concurrent 401s share one refresh.
    refresh_gate: Mutex<()>,
}

impl<S: CredentialStore> ApiClient<S> {
    pub fn new(config: ClientConfig, store: S) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;
        Ok(Self {
            client,
            config,
            store,
            refresh_gate: Mutex::new(()),
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Send an authenticated request and return the raw response body.
    ///
    /// On a 401 the access token is refreshed once and the request is sent
    /// again. The retry's outcome is returned whatever it is.
    pub async fn send(&self, request: &ApiRequest) -> Result<Vec<u8>, ApiError> {
        let mut attempt = 0;
        let mut token = self.store.get(CredentialKey::AccessToken)?;

        loop {
            let (status, body) = self.transmit(request, token.as_deref()).await?;

            if status.is_success() {
                return Ok(body);
            }

            if status == StatusCode::UNAUTHORIZED && attempt < MAX_AUTH_RETRIES {
                attempt += 1;
                log::info!(
                    "{} {} returned 401, refreshing access token",
                    request.method,
                    request.path
                );
                token = Some(self.renew_access_token(token.as_deref()).await?);
                continue;
            }

            log::warn!("{} {} failed with status {}", request.method, request.path, status);
            return Err(ApiError::Http {
                status,
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }
    }

    /// Send a request without credentials and without the refresh cycle.
    /// Used for login, registration and password reset.
    pub async fn send_public(&self, request: &ApiRequest) -> Result<Vec<u8>, ApiError> {
        let (status, body) = self.transmit(request, None).await?;
        if status.is_success() {
            Ok(body)
        } else {
            Err(ApiError::Http {
                status,
                body: String::from_utf8_lossy(&body).into_owned(),
            })
        }
    }

    /// `send` and decode the JSON response.
    pub async fn send_json<T: DeserializeOwned>(&self, request: &ApiRequest) -> Result<T, ApiError> {
        let body = self.send(request).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// `send_public` and decode the JSON response.
    pub async fn send_public_json<T: DeserializeOwned>(
        &self,
        request: &ApiRequest,
    ) -> Result<T, ApiError> {
        let body = self.send_public(request).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn transmit(
        &self,
        request: &ApiRequest,
        token: Option<&str>,
    ) -> Result<(StatusCode, Vec<u8>), ApiError> {
        let url = self.config.url(&request.path);
        log::debug!(
            "{} {} ({})",
            request.method,
            url,
            if token.is_some() { "bearer" } else { "anonymous" }
        );

        let mut builder = self.client.request(request.method.clone(), &url);
        if let Some(t) = token {
            builder = builder.bearer_auth(t);
        }
        if let Some(ref body) = request.body {
            builder = builder.json(body);
        }

        let resp = builder.send().await?;
        let status = resp.status();
        let body = resp.bytes().await?;
        Ok((status, body.to_vec()))
    }

    /// Obtain a usable access token after `rejected` got a 401.
    ///
    /// If another request already stored a different token while we waited
    /// for the gate, that token is used without calling the refresh endpoint.
    async fn renew_access_token(&self, rejected: Option<&str>) -> Result<String, ApiError> {
        let _gate = self.refresh_gate.lock().await;

        if let Some(current) = self.store.get(CredentialKey::AccessToken)? {
            if rejected.is_some_and(|r| r != current) {
                log::debug!("Access token was refreshed by a concurrent request");
                return Ok(current);
            }
        }

        let refresh_token = self
            .store
            .get(CredentialKey::RefreshToken)?
            .ok_or(ApiError::NoRefreshToken)?;

        let access_token = self.request_new_access_token(&refresh_token).await?;
        self.store.set(CredentialKey::AccessToken, &access_token)?;
        log::info!("Access token refreshed");
        Ok(access_token)
    }

    /// POST the refresh token. Any failure becomes `RefreshFailed`.
    async fn request_new_access_token(&self, refresh_token: &str) -> Result<String, ApiError> {
        let url = self.config.url(REFRESH_PATH);
        let resp = self
            .client
            .post(&url)
            .json(&RefreshRequest { refresh_token })
            .send()
            .await
            .map_err(|e| {
                log::warn!("Refresh request failed (network error): {}", e);
                ApiError::RefreshFailed(e.to_string())
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            log::warn!("Refresh failed with status {}", status);
            return Err(ApiError::RefreshFailed(format!("{}: {}", status, body)));
        }

        let refreshed: RefreshResponse = resp.json().await.map_err(|e| {
            ApiError::RefreshFailed(format!("Failed to parse refresh response: {}", e))
        })?;
        Ok(refreshed.access_token)
    }
}
