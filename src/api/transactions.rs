// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Transaction Service
//!
//! Money movements are validated locally before they are posted:
//!
//! 1. the source account must be among the caller's cached accounts
//! 2. [`TransactionValidator`] applies the business limits
//! 3. the operation is posted to `/api/transactions/{deposit,withdraw,transfer}`
//! 4. a receipt with `status = FAILED` is turned into a 400 error
//!
//! Only step 3 touches the network.

use tracing::{debug, info, warn};

use crate::client::{ApiResult, HttpClient};
use crate::error::NormalizedError;
use crate::models::{
    Account, AccountOperationRequest, Page, Transaction, TransactionReceipt, TransactionSearch,
    TransactionStatus, TransferRequest,
};
use crate::validation::{BusinessLimits, MoneyOperation, RejectionReason, TransactionValidator};

use super::paths;

/// Why a money movement did not go through.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TransactionError {
    /// Refused locally, nothing was sent.
    #[error(transparent)]
    Rejected(#[from] RejectionReason),
    #[error(transparent)]
    Api(#[from] NormalizedError),
}

impl TransactionError {
    /// View the failure in the common error vocabulary, for display.
    pub fn into_normalized(self) -> NormalizedError {
        match self {
            TransactionError::Rejected(reason) => {
                NormalizedError::rejected(reason.field(), reason.to_string())
            }
            TransactionError::Api(error) => error,
        }
    }
}

#[derive(Clone)]
pub struct TransactionsApi {
    client: HttpClient,
    validator: TransactionValidator,
}

impl TransactionsApi {
    pub fn new(client: HttpClient, limits: BusinessLimits) -> Self {
        Self {
            client,
            validator: TransactionValidator::new(limits),
        }
    }

    pub fn validator(&self) -> &TransactionValidator {
        &self.validator
    }

    /// Validate `operation` against `accounts` (the caller's cached view)
    /// and post it.
    pub async fn submit(
        &self,
        operation: &MoneyOperation,
        accounts: &[Account],
    ) -> Result<TransactionReceipt, TransactionError> {
        let account_id = operation.account_id();
        let source = accounts
            .iter()
            .find(|account| account.id == account_id)
            .ok_or_else(|| NormalizedError::new(404, format!("Account not found: {account_id}")))?;

        if let Err(reason) = self.validator.validate(operation, source.balance) {
            debug!(account_id, kind = ?operation.kind(), amount = operation.amount(), %reason, "Operation rejected locally");
            return Err(reason.into());
        }

        let receipt: TransactionReceipt = match operation {
            MoneyOperation::Deposit {
                account_id,
                amount,
                description,
            } => {
                let body = AccountOperationRequest {
                    account_id,
                    amount: *amount,
                    description: description.as_deref(),
                };
                self.client.post(paths::DEPOSIT, &body).await?
            }
            MoneyOperation::Withdrawal {
                account_id,
                amount,
                description,
            } => {
                let body = AccountOperationRequest {
                    account_id,
                    amount: *amount,
                    description: description.as_deref(),
                };
                self.client.post(paths::WITHDRAW, &body).await?
            }
            MoneyOperation::Transfer {
                account_id,
                target_account_id,
                amount,
                description,
            } => {
                let body = TransferRequest {
                    source_account_id: account_id,
                    target_account_id,
                    amount: *amount,
                    description: description.as_deref(),
                };
                self.client.post(paths::TRANSFER, &body).await?
            }
        };

        if receipt.status == TransactionStatus::Failed {
            let reason = receipt
                .failure_reason
                .or(receipt.message)
                .filter(|reason| !reason.trim().is_empty())
                .unwrap_or_else(|| "Transaction failed".to_string());
            warn!(transaction_id = %receipt.transaction_id, %reason, "Transaction refused by the server");
            return Err(NormalizedError::new(400, reason).into());
        }

        info!(
            transaction_id = %receipt.transaction_id,
            kind = ?receipt.transaction_type,
            amount = receipt.amount,
            "Transaction completed"
        );
        Ok(receipt)
    }

    pub async fn by_account(&self, account_id: &str) -> ApiResult<Vec<Transaction>> {
        self.client
            .get(&paths::transactions_by_account(account_id))
            .await
    }

    pub async fn paginated(
        &self,
        account_id: &str,
        page: u32,
        size: u32,
    ) -> ApiResult<Page<Transaction>> {
        let path = paths::with_query(
            &paths::transactions_by_account(account_id),
            &[("page", Some(page.to_string())), ("size", Some(size.to_string()))],
        );
        self.client.get(&path).await
    }

    pub async fn search(&self, filter: &TransactionSearch) -> ApiResult<Vec<Transaction>> {
        let path = paths::with_query(
            paths::TRANSACTION_SEARCH,
            &[
                (
                    "type",
                    filter.transaction_type.map(|t| t.as_str().to_string()),
                ),
                ("date", filter.date.map(|d| d.to_string())),
            ],
        );
        self.client.get(&path).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::auth::SessionStore;
    use crate::config::ClientConfig;
    use crate::models::{AccountStatus, AccountType, TransactionType};
    use crate::storage::MemoryStorage;
    use crate::validation::Amount;

    fn api(uri: &str) -> TransactionsApi {
        let session = SessionStore::new(Arc::new(MemoryStorage::new()));
        let config = ClientConfig::new(uri).unwrap();
        TransactionsApi::new(
            HttpClient::new(&config, session).unwrap(),
            BusinessLimits::default(),
        )
    }

    fn account(id: &str, balance: Amount) -> Account {
        Account {
            id: id.to_string(),
            customer_id: "c-1".to_string(),
            account_type: AccountType::Current,
            balance,
            status: AccountStatus::Active,
            created_at: None,
            updated_at: None,
        }
    }

    async fn server_expecting_no_posts() -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;
        server
    }

    #[tokio::test]
    async fn local_rejection_never_reaches_the_network() {
        let server = server_expecting_no_posts().await;
        let accounts = [account("a-1", 50_000)];

        let err = api(&server.uri())
            .submit(&MoneyOperation::transfer("a-1", "a-2", 1_000_000), &accounts)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            TransactionError::Rejected(RejectionReason::InsufficientBalance)
        ));
    }

    #[tokio::test]
    async fn unknown_source_account_is_not_found() {
        let server = server_expecting_no_posts().await;

        let err = api(&server.uri())
            .submit(&MoneyOperation::deposit("a-9", 5_000), &[account("a-1", 0)])
            .await
            .unwrap_err();
        match err {
            TransactionError::Api(e) => {
                assert_eq!(e.status, 404);
                assert_eq!(e.message, "Account not found: a-9");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn transfer_posts_service_field_names() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/transactions/transfer"))
            .and(body_json(json!({
                "sourceAccountId": "a-1",
                "targetAccountId": "a-2",
                "amount": 25000,
                "description": "rent"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "transactionId": "t-1",
                "accountId": "a-1",
                "targetAccountId": "a-2",
                "type": "TRANSFER",
                "amount": 25000.00,
                "status": "SUCCESS"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let op = MoneyOperation::transfer("a-1", "a-2", 25_000).with_description("rent");
        let receipt = api(&server.uri())
            .submit(&op, &[account("a-1", 100_000)])
            .await
            .unwrap();
        assert_eq!(receipt.transaction_type, TransactionType::Transfer);
        assert_eq!(receipt.amount, 25_000);
    }

    #[tokio::test]
    async fn failed_receipt_is_a_business_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/transactions/withdraw"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "transactionId": "t-2",
                "accountId": "a-1",
                "type": "WITHDRAWAL",
                "amount": 5000,
                "status": "FAILED",
                "failureReason": "Account is frozen"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let err = api(&server.uri())
            .submit(&MoneyOperation::withdrawal("a-1", 5_000), &[account("a-1", 10_000)])
            .await
            .unwrap_err()
            .into_normalized();
        assert_eq!(err.status, 400);
        assert_eq!(err.message, "Account is frozen");
    }

    #[tokio::test]
    async fn search_serializes_filters() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/transactions/search"))
            .and(query_param("type", "DEPOSIT"))
            .and(query_param("date", "2026-03-14"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let filter = TransactionSearch {
            transaction_type: Some(TransactionType::Deposit),
            date: chrono::NaiveDate::from_ymd_opt(2026, 3, 14),
        };
        let found = api(&server.uri()).search(&filter).await.unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn paginated_history() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/transactions/account/a-1"))
            .and(query_param("page", "2"))
            .and(query_param("size", "20"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "content": [],
                "totalElements": 40,
                "totalPages": 2,
                "size": 20,
                "number": 2,
                "first": false,
                "last": true
            })))
            .expect(1)
            .mount(&server)
            .await;

        let page = api(&server.uri()).paginated("a-1", 2, 20).await.unwrap();
        assert!(page.last);
        assert_eq!(page.total_elements, 40);
    }

    #[test]
    fn rejection_maps_to_field_error() {
        let err = TransactionError::from(RejectionReason::SameAccount).into_normalized();
        assert_eq!(err.status, 400);
        assert_eq!(
            err.first_field_errors()["targetAccountId"],
            "source and destination must differ"
        );
    }
}
