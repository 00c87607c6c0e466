// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Single-flight access token renewal.
//!
//! Requests that fail with 401 at the same time queue on one lock. The
//! first one calls `POST /api/auth/refresh`; the others find a token that
//! differs from the one they were rejected with and reuse it.

use reqwest::Method;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::api::paths;
use crate::error::NormalizedError;
use crate::models::{RefreshRequest, RefreshResponse};

use super::{ApiResult, HttpClient};

#[derive(Debug, Default)]
pub struct TokenRefresher {
    lock: Mutex<()>,
}

impl TokenRefresher {
    pub fn new() -> Self {
        Self::default()
    }

    /// A usable access token to replace `rejected`.
    ///
    /// On refresh failure the session is cleared and the failure returned.
    pub async fn fresh_token(
        &self,
        client: &HttpClient,
        rejected: Option<&str>,
    ) -> ApiResult<String> {
        let _guard = self.lock.lock().await;
        let session = client.session();

        let current = session.snapshot().await;
        if !current.is_authenticated() {
            debug!("Session ended while waiting for refresh");
            return Err(NormalizedError::session_expired());
        }
        if let Some(token) = current.access_token().filter(|t| Some(*t) != rejected) {
            debug!("Access token already renewed, reusing it");
            return Ok(token.to_string());
        }
        let Some(refresh_token) = current.refresh_token() else {
            return Err(NormalizedError::session_expired());
        };

        let outcome = client
            .request_unauthenticated::<_, RefreshResponse>(
                Method::POST,
                paths::AUTH_REFRESH,
                Some(&RefreshRequest { refresh_token }),
            )
            .await
            .map_err(|error| {
                // An undecodable success body counts as an expired session.
                if (200..300).contains(&error.status) {
                    NormalizedError::session_expired()
                } else {
                    error
                }
            })
            .and_then(|response| {
                let token = response.token.trim().to_string();
                if token.is_empty() {
                    Err(NormalizedError::session_expired())
                } else {
                    Ok(token)
                }
            });

        match outcome {
            Ok(token) => {
                if !session.replace_access_token(token.clone()).await {
                    return Err(NormalizedError::session_expired());
                }
                info!("Access token refreshed");
                Ok(token)
            }
            Err(error) => {
                warn!(status = error.status, error = %error, "Token refresh failed, clearing session");
                session.clear().await;
                Err(error)
            }
        }
    }
}
