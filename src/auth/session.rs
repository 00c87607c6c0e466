// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Session Store
//!
//! Holds the access token, refresh token and user identity in memory and
//! mirrors them to a [`KeyValueStore`] so a restart can restore the session.
//!
//! ## Invariants
//!
//! - `user` is present iff `access_token` is present
//! - the three persisted keys are written and cleared together
//! - every transition is published on a `watch` channel as an [`AuthState`]

use std::sync::Arc;

use tokio::sync::{watch, RwLock};
use tracing::{debug, info, warn};

use crate::models::UserInfo;
use crate::storage::{KeyValueStore, StorageResult};

pub const AUTH_TOKEN_KEY: &str = "authToken";
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";
pub const USER_INFO_KEY: &str = "userInfo";

const SESSION_KEYS: [&str; 3] = [AUTH_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_INFO_KEY];

/// Authentication lifecycle as seen by the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthState {
    /// Persisted session not read yet.
    #[default]
    Unknown,
    Anonymous,
    Authenticated,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    access_token: Option<String>,
    refresh_token: Option<String>,
    user: Option<UserInfo>,
}

impl Session {
    pub fn authenticated(
        access_token: impl Into<String>,
        refresh_token: Option<String>,
        user: UserInfo,
    ) -> Self {
        Self {
            access_token: Some(access_token.into()),
            refresh_token,
            user: Some(user),
        }
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    pub fn user(&self) -> Option<&UserInfo> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some() && self.user.is_some()
    }
}

/// Shared handle to the current session. Cheap to clone.
#[derive(Clone)]
pub struct SessionStore {
    session: Arc<RwLock<Session>>,
    storage: Arc<dyn KeyValueStore>,
    state: Arc<watch::Sender<AuthState>>,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        let (state, _) = watch::channel(AuthState::Unknown);
        Self {
            session: Arc::new(RwLock::new(Session::default())),
            storage,
            state: Arc::new(state),
        }
    }

    pub async fn snapshot(&self) -> Session {
        self.session.read().await.clone()
    }

    pub async fn access_token(&self) -> Option<String> {
        self.session.read().await.access_token.clone()
    }

    pub async fn refresh_token(&self) -> Option<String> {
        self.session.read().await.refresh_token.clone()
    }

    pub async fn user(&self) -> Option<UserInfo> {
        self.session.read().await.user.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.session.read().await.is_authenticated()
    }

    pub fn state(&self) -> AuthState {
        *self.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    /// Read the persisted session into memory. Never fails: unreadable or
    /// partial data yields an anonymous session.
    pub async fn load(&self) -> AuthState {
        let mut session = self.session.write().await;
        *session = match self.read_persisted() {
            Ok(Some(restored)) => restored,
            Ok(None) => Session::default(),
            Err(e) => {
                warn!(error = %e, "Failed to read persisted session, starting anonymous");
                Session::default()
            }
        };

        let state = if session.is_authenticated() {
            AuthState::Authenticated
        } else {
            AuthState::Anonymous
        };
        info!(state = ?state, "Session restored");
        self.publish(state);
        state
    }

    /// Persist and install a freshly issued session.
    ///
    /// On a storage error nothing changes in memory.
    pub async fn establish(
        &self,
        access_token: String,
        refresh_token: Option<String>,
        user: UserInfo,
    ) -> StorageResult<()> {
        let user_json = serde_json::to_string(&user)?;

        let mut session = self.session.write().await;
        let mut entries = vec![(AUTH_TOKEN_KEY, access_token.clone()), (USER_INFO_KEY, user_json)];
        let removals: &[&str] = match &refresh_token {
            Some(refresh) => {
                entries.push((REFRESH_TOKEN_KEY, refresh.clone()));
                &[]
            }
            None => &[REFRESH_TOKEN_KEY],
        };
        self.storage.replace_many(&entries, removals)?;

        debug!(user_id = %user.id, "Session established");
        *session = Session::authenticated(access_token, refresh_token, user);
        self.publish(AuthState::Authenticated);
        Ok(())
    }

    /// Swap in a refreshed access token.
    ///
    /// Returns `false` when the session was torn down in the meantime; the
    /// token is then discarded.
    pub async fn replace_access_token(&self, access_token: String) -> bool {
        let mut session = self.session.write().await;
        if !session.is_authenticated() {
            return false;
        }
        if let Err(e) = self.storage.set(AUTH_TOKEN_KEY, access_token.clone()) {
            warn!(error = %e, "Failed to persist refreshed access token");
        }
        session.access_token = Some(access_token);
        true
    }

    /// Drop the session from memory and storage. Always succeeds in memory.
    pub async fn clear(&self) {
        let mut session = self.session.write().await;
        *session = Session::default();
        if let Err(e) = self.storage.remove_many(&SESSION_KEYS) {
            warn!(error = %e, "Failed to remove persisted session");
        }
        self.publish(AuthState::Anonymous);
    }

    fn read_persisted(&self) -> StorageResult<Option<Session>> {
        let access_token = self.storage.get(AUTH_TOKEN_KEY)?;
        let user_json = self.storage.get(USER_INFO_KEY)?;
        let refresh_token = self.storage.get(REFRESH_TOKEN_KEY)?;

        let (Some(access_token), Some(user_json)) = (access_token, user_json) else {
            return Ok(None);
        };

        match serde_json::from_str::<UserInfo>(&user_json) {
            Ok(user) => Ok(Some(Session::authenticated(access_token, refresh_token, user))),
            Err(e) => {
                warn!(error = %e, "Persisted user info is not decodable");
                Ok(None)
            }
        }
    }

    fn publish(&self, state: AuthState) {
        self.state.send_replace(state);
    }
}
