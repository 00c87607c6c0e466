// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Composition root.
//!
//! Everything shares one [`SessionStore`] and one [`HttpClient`]; nothing
//! is global. Build an [`AppState`] once at startup and clone it freely.

use std::sync::Arc;

use crate::api::{
    AccountsApi, AuthApi, CustomersApi, DashboardApi, NotificationsApi, TransactionsApi,
};
use crate::auth::{AuthSessionManager, SessionStore};
use crate::client::HttpClient;
use crate::config::{ClientConfig, ConfigError};
use crate::storage::{FileStorage, KeyValueStore};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ClientConfig>,
    pub session: SessionStore,
    pub http: HttpClient,
    pub auth: Arc<AuthSessionManager>,
    pub customers: CustomersApi,
    pub accounts: AccountsApi,
    pub transactions: TransactionsApi,
    pub notifications: NotificationsApi,
    pub dashboard: DashboardApi,
}

impl AppState {
    pub fn new(config: ClientConfig, storage: Arc<dyn KeyValueStore>) -> Result<Self, ConfigError> {
        let session = SessionStore::new(storage);
        let http = HttpClient::new(&config, session.clone())?;
        let auth = AuthSessionManager::new(session.clone(), AuthApi::new(http.clone()));

        Ok(Self {
            customers: CustomersApi::new(http.clone()),
            accounts: AccountsApi::new(http.clone()),
            transactions: TransactionsApi::new(http.clone(), config.limits),
            notifications: NotificationsApi::new(http.clone()),
            dashboard: DashboardApi::new(http.clone()),
            auth: Arc::new(auth),
            config: Arc::new(config),
            session,
            http,
        })
    }

    /// State persisting the session under `config.data_dir`.
    pub fn with_file_storage(config: ClientConfig) -> Result<Self, ConfigError> {
        let storage = Arc::new(FileStorage::new(&config.data_dir));
        Self::new(config, storage)
    }
}
