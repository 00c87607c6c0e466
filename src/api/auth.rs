// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use reqwest::Method;
use serde_json::Value;

use crate::client::{ApiResult, HttpClient};
use crate::models::{LoginRequest, LoginResponse, UserInfo};

use super::paths;

/// `/api/auth` endpoints. Session bookkeeping lives in
/// [`crate::auth::AuthSessionManager`].
#[derive(Clone)]
pub struct AuthApi {
    client: HttpClient,
}

impl AuthApi {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    /// Sent without a bearer token and outside the refresh cycle.
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<LoginResponse> {
        self.client
            .request_unauthenticated(
                Method::POST,
                paths::AUTH_LOGIN,
                Some(&LoginRequest { email, password }),
            )
            .await
    }

    pub async fn logout(&self) -> ApiResult<()> {
        let _: Value = self.client.post_empty(paths::AUTH_LOGOUT).await?;
        Ok(())
    }

    pub async fn me(&self) -> ApiResult<UserInfo> {
        self.client.get(paths::AUTH_ME).await
    }
}
