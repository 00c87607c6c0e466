// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # HTTP Client Adapter
//!
//! Single entry point for gateway calls. Every request:
//!
//! 1. carries `Authorization: Bearer <token>` when a session exists
//! 2. carries one `X-Request-Id`, reused by its retry
//! 3. fails with a [`NormalizedError`] and never with a transport error
//!
//! ## 401 Handling
//!
//! A request rejected with 401 is retried at most once. Before the retry
//! the access token is renewed through [`TokenRefresher`], which collapses
//! concurrent refreshes into one call. The retry's outcome is returned as
//! is: a second 401 does not refresh again.
//!
//! If no refresh token is stored the original 401 is surfaced. If the
//! refresh call fails the session is cleared and the refresh failure is
//! surfaced.

pub mod refresh;

use std::sync::Arc;

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::auth::SessionStore;
use crate::config::{ClientConfig, ConfigError};
use crate::error::NormalizedError;

pub use refresh::TokenRefresher;

pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

pub type ApiResult<T> = Result<T, NormalizedError>;

#[derive(Clone)]
pub struct HttpClient {
    base_url: String,
    http: reqwest::Client,
    session: SessionStore,
    refresher: Arc<TokenRefresher>,
}

impl HttpClient {
    pub fn new(config: &ClientConfig, session: SessionStore) -> Result<Self, ConfigError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self {
            base_url: config.base_url.as_str().trim_end_matches('/').to_string(),
            http,
            session,
            refresher: Arc::new(TokenRefresher::new()),
        })
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        decode(self.request(Method::GET, path, None).await?)
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> ApiResult<T> {
        decode(self.request(Method::POST, path, Some(encode(body)?)).await?)
    }

    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        decode(self.request(Method::POST, path, None).await?)
    }

    pub async fn put<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> ApiResult<T> {
        decode(self.request(Method::PUT, path, Some(encode(body)?)).await?)
    }

    pub async fn put_empty<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        decode(self.request(Method::PUT, path, None).await?)
    }

    pub async fn patch<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> ApiResult<T> {
        decode(self.request(Method::PATCH, path, Some(encode(body)?)).await?)
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        decode(self.request(Method::DELETE, path, None).await?)
    }

    /// Authenticated request with the refresh-and-retry cycle.
    ///
    /// Returns the decoded JSON body; an empty body decodes to `null`.
    pub async fn request(&self, method: Method, path: &str, body: Option<Value>) -> ApiResult<Value> {
        let request_id = Uuid::new_v4().to_string();
        let token = self.session.access_token().await;

        let response = self
            .dispatch(&method, path, body.as_ref(), token.as_deref(), &request_id)
            .await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return self.finish(&method, path, &request_id, response).await;
        }

        if self.session.refresh_token().await.is_none() {
            debug!(%request_id, path, "401 without refresh token");
            return Err(NormalizedError::from_response(response).await);
        }

        let fresh = self.refresher.fresh_token(self, token.as_deref()).await?;
        info!(%request_id, %method, path, "Retrying with refreshed token");

        let retry = self
            .dispatch(&method, path, body.as_ref(), Some(&fresh), &request_id)
            .await?;
        self.finish(&method, path, &request_id, retry).await
    }

    /// Request without a bearer token and without the refresh cycle.
    pub async fn request_unauthenticated<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> ApiResult<T> {
        let request_id = Uuid::new_v4().to_string();
        let body = body.map(encode).transpose()?;
        let response = self
            .dispatch(&method, path, body.as_ref(), None, &request_id)
            .await?;
        decode(self.finish(&method, path, &request_id, response).await?)
    }

    async fn dispatch(
        &self,
        method: &Method,
        path: &str,
        body: Option<&Value>,
        token: Option<&str>,
        request_id: &str,
    ) -> ApiResult<reqwest::Response> {
        let mut builder = self
            .http
            .request(method.clone(), format!("{}{}", self.base_url, path))
            .header(ACCEPT, "application/json")
            .header(REQUEST_ID_HEADER, request_id);
        if let Some(token) = token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        if let Some(body) = body {
            builder = builder.header(CONTENT_TYPE, "application/json").json(body);
        }

        debug!(%request_id, %method, path, authenticated = token.is_some(), "Sending request");
        builder.send().await.map_err(|e| {
            let error = NormalizedError::from_transport(&e);
            warn!(%request_id, %method, path, error = %e, "Request failed without response");
            error
        })
    }

    async fn finish(
        &self,
        method: &Method,
        path: &str,
        request_id: &str,
        response: reqwest::Response,
    ) -> ApiResult<Value> {
        let status = response.status();
        if !status.is_success() {
            if status.is_server_error() {
                warn!(%request_id, %method, path, status = status.as_u16(), "Gateway error");
            } else {
                debug!(%request_id, %method, path, status = status.as_u16(), "Request rejected");
            }
            return Err(NormalizedError::from_response(response).await);
        }

        debug!(%request_id, %method, path, status = status.as_u16(), "Request completed");
        let bytes = response
            .bytes()
            .await
            .map_err(|e| NormalizedError::from_transport(&e))?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&bytes).map_err(|e| {
            warn!(%request_id, path, error = %e, "Response body is not JSON");
            NormalizedError::invalid_response(status.as_u16())
        })
    }
}

fn encode<B: Serialize>(body: &B) -> ApiResult<Value> {
    serde_json::to_value(body).map_err(|e| {
        NormalizedError::new(
            StatusCode::BAD_REQUEST.as_u16(),
            format!("Unable to encode request body: {e}"),
        )
    })
}

fn decode<T: DeserializeOwned>(value: Value) -> ApiResult<T> {
    serde_json::from_value(value).map_err(|e| {
        warn!(error = %e, "Response body does not match the expected shape");
        NormalizedError::invalid_response(StatusCode::OK.as_u16())
    })
}
