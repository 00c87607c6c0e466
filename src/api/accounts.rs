// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Account service wrapper.

use chrono::NaiveDate;
use tracing::debug;

use crate::client::{ApiResult, HttpClient};
use crate::error::NormalizedError;
use crate::models::{Account, AccountStatement, CreateAccountRequest};
use crate::validation::validate_statement_range;

use super::paths;

#[derive(Clone)]
pub struct AccountsApi {
    client: HttpClient,
}

impl AccountsApi {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> ApiResult<Vec<Account>> {
        self.client.get(paths::ACCOUNTS).await
    }

    pub async fn get(&self, id: &str) -> ApiResult<Account> {
        self.client.get(&paths::account(id)).await
    }

    pub async fn by_customer(&self, customer_id: &str) -> ApiResult<Vec<Account>> {
        self.client.get(&paths::accounts_by_customer(customer_id)).await
    }

    pub async fn create(&self, request: &CreateAccountRequest) -> ApiResult<Account> {
        self.client.post(paths::ACCOUNTS, request).await
    }

    pub async fn freeze(&self, id: &str) -> ApiResult<Account> {
        self.status_change(id, "freeze").await
    }

    pub async fn block(&self, id: &str) -> ApiResult<Account> {
        self.status_change(id, "block").await
    }

    pub async fn close(&self, id: &str) -> ApiResult<Account> {
        self.status_change(id, "close").await
    }

    /// Statement for `from..=to`. Inverted or over-long periods are rejected
    /// without a request.
    pub async fn statement(
        &self,
        id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> ApiResult<AccountStatement> {
        if let Err(reason) = validate_statement_range(from, to) {
            debug!(account_id = id, %from, %to, "Statement period rejected locally");
            return Err(NormalizedError::rejected("period", reason.to_string()));
        }
        let path = paths::with_query(
            &format!("{}/statement", paths::account(id)),
            &[("from", Some(from.to_string())), ("to", Some(to.to_string()))],
        );
        self.client.get(&path).await
    }

    async fn status_change(&self, id: &str, action: &str) -> ApiResult<Account> {
        self.client
            .put_empty(&format!("{}/{action}", paths::account(id)))
            .await
    }
}
