// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Auth Session Manager
//!
//! Drives the authentication lifecycle:
//!
//! ```text
//! Unknown --restore--> Anonymous <--login/logout--> Authenticated
//! ```
//!
//! The HTTP client may also move the state to `Anonymous` when a token
//! refresh fails; subscribers see that through [`AuthSessionManager::subscribe`].

use tokio::sync::watch;
use tracing::{info, warn};

use crate::api::AuthApi;
use crate::error::{FieldErrors, NormalizedError};
use crate::models::UserInfo;

use super::roles::Role;
use super::session::{AuthState, SessionStore};

pub struct AuthSessionManager {
    session: SessionStore,
    api: AuthApi,
}

impl AuthSessionManager {
    pub fn new(session: SessionStore, api: AuthApi) -> Self {
        Self { session, api }
    }

    /// Load the persisted session. Never fails.
    pub async fn restore(&self) -> AuthState {
        self.session.load().await
    }

    /// Sign in and persist the issued session.
    ///
    /// On failure the current state is left untouched.
    pub async fn login(&self, email: &str, password: &str) -> Result<UserInfo, NormalizedError> {
        let email = email.trim();
        let mut field_errors = FieldErrors::new();
        if email.is_empty() {
            field_errors.insert("email".to_string(), vec!["Email is required".to_string()]);
        }
        if password.is_empty() {
            field_errors.insert(
                "password".to_string(),
                vec!["Password is required".to_string()],
            );
        }
        if !field_errors.is_empty() {
            return Err(NormalizedError::new(400, "Email and password are required")
                .with_field_errors(field_errors));
        }

        let response = self.api.login(email, password).await.map_err(|e| {
            info!(status = e.status, "Login rejected");
            e
        })?;
        if response.token.trim().is_empty() {
            warn!("Login response did not include a token");
            return Err(NormalizedError::invalid_response(200));
        }

        let user = response.user;
        self.session
            .establish(response.token, response.refresh_token, user.clone())
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to persist session");
                NormalizedError::network("Unable to save the session on this device")
            })?;

        info!(user_id = %user.id, role = %user.role, "Signed in");
        Ok(user)
    }

    /// Sign out. The server call is best effort; local state is always cleared.
    pub async fn logout(&self) {
        if self.session.is_authenticated().await {
            if let Err(e) = self.api.logout().await {
                warn!(status = e.status, error = %e, "Logout request failed, clearing session anyway");
            }
        }
        self.session.clear().await;
        info!("Signed out");
    }

    pub async fn is_authenticated(&self) -> bool {
        self.session.is_authenticated().await
    }

    pub async fn current_user(&self) -> Option<UserInfo> {
        self.session.user().await
    }

    /// Whether the signed-in user holds at least `required`.
    pub async fn has_role(&self, required: Role) -> bool {
        self.current_user()
            .await
            .is_some_and(|user| user.role.has_privilege(required))
    }

    pub fn state(&self) -> AuthState {
        self.session.state()
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.session.subscribe()
    }
}
