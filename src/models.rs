// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Gateway Data Models
//!
//! Request and response bodies exchanged with the WillBank API gateway.
//! Field names follow the gateway's camelCase JSON.
//!
//! ## Money
//!
//! Amounts and balances are [`Amount`]s (whole XAF). The transaction and
//! account services serialize `BigDecimal`, so monetary fields accept both
//! `5000` and `5000.00`; anything with a fractional part is rejected.
//!
//! ## Model Categories
//!
//! - **Auth**: login/refresh payloads and [`UserInfo`]
//! - **Customers**, **Accounts**, **Transactions**, **Notifications**
//! - **Dashboard**: the composite service's aggregated views

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::auth::Role;
use crate::validation::Amount;

// =============================================================================
// Auth Models
// =============================================================================

/// Identity of the signed-in user. Scopes customer and account queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    pub role: Role,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub user: UserInfo,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest<'a> {
    pub refresh_token: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RefreshResponse {
    pub token: String,
}

// =============================================================================
// Customer Models
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CustomerStatus {
    PendingKyc,
    Active,
    Suspended,
    Closed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub address: Option<String>,
    pub status: CustomerStatus,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}

impl Customer {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

/// Partial update; absent fields are left untouched by the service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCustomerRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

// =============================================================================
// Account Models
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountType {
    Current,
    Savings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountStatus {
    Active,
    Frozen,
    Blocked,
    Closed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub customer_id: String,
    #[serde(rename = "type")]
    pub account_type: AccountType,
    #[serde(with = "minor_units")]
    pub balance: Amount,
    pub status: AccountStatus,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountRequest {
    pub customer_id: String,
    #[serde(rename = "type")]
    pub account_type: AccountType,
}

// =============================================================================
// Transaction Models
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Deposit,
    Withdrawal,
    Transfer,
    Payment,
}

impl TransactionType {
    /// Wire spelling, as used in query strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Deposit => "DEPOSIT",
            TransactionType::Withdrawal => "WITHDRAWAL",
            TransactionType::Transfer => "TRANSFER",
            TransactionType::Payment => "PAYMENT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    Success,
    Failed,
}

/// A ledger entry as listed by the transaction service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub account_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_account_id: Option<String>,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    #[serde(with = "minor_units")]
    pub amount: Amount,
    pub status: TransactionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

/// Result of a deposit, withdrawal or transfer.
///
/// The service records failed movements too, answering 200 with
/// `status = FAILED` and a `failure_reason`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub transaction_id: String,
    pub account_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_account_id: Option<String>,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    #[serde(with = "minor_units")]
    pub amount: Amount,
    pub status: TransactionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

/// Wire body for deposits and withdrawals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountOperationRequest<'a> {
    pub account_id: &'a str,
    pub amount: Amount,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
}

/// Wire body for transfers.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest<'a> {
    pub source_account_id: &'a str,
    pub target_account_id: &'a str,
    pub amount: Amount,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
}

/// Filters for `GET /api/transactions/search`.
#[derive(Debug, Clone, Default)]
pub struct TransactionSearch {
    pub transaction_type: Option<TransactionType>,
    pub date: Option<chrono::NaiveDate>,
}

/// One page of a Spring `Page<T>` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u32,
    pub size: u32,
    pub number: u32,
    pub first: bool,
    pub last: bool,
}

// =============================================================================
// Notification Models
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub customer_id: String,
    pub channel: String,
    #[serde(default)]
    pub title: Option<String>,
    pub message: String,
    pub status: String,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

// =============================================================================
// Dashboard Models
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountWithBalance {
    #[serde(flatten)]
    pub account: Account,
    #[serde(default)]
    pub last_transaction_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub transaction_count: Option<u64>,
}

/// Aggregated view served by the composite service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub customer: Customer,
    pub accounts: Vec<AccountWithBalance>,
    #[serde(default)]
    pub recent_transactions: Vec<Transaction>,
    #[serde(with = "minor_units")]
    pub total_balance: Amount,
    pub accounts_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementPeriod {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountStatement {
    pub account: Account,
    pub transactions: Vec<Transaction>,
    #[serde(with = "minor_units")]
    pub opening_balance: Amount,
    #[serde(with = "minor_units")]
    pub closing_balance: Amount,
    #[serde(with = "minor_units")]
    pub total_deposits: Amount,
    #[serde(with = "minor_units")]
    pub total_withdrawals: Amount,
    pub period: StatementPeriod,
}

/// Serde adapter accepting whole amounts written as integers or as
/// decimals with a zero fraction.
pub mod minor_units {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    use crate::validation::Amount;

    /// Largest magnitude an `f64` represents exactly.
    const MAX_EXACT_FLOAT: f64 = 9_007_199_254_740_992.0;

    pub fn serialize<S: Serializer>(value: &Amount, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(*value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Amount, D::Error> {
        let number = serde_json::Number::deserialize(deserializer)?;
        if let Some(value) = number.as_i64() {
            return Ok(value);
        }
        match number.as_f64() {
            Some(value) if value.fract() == 0.0 && value.abs() <= MAX_EXACT_FLOAT => {
                Ok(value as Amount)
            }
            _ => Err(D::Error::custom(format!(
                "expected a whole amount in minor units, got {number}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn account_json(balance: serde_json::Value) -> serde_json::Value {
        json!({
            "id": "acc-1",
            "customerId": "cust-1",
            "type": "CURRENT",
            "balance": balance,
            "status": "ACTIVE",
            "createdAt": "2026-01-10T09:30:00",
            "updatedAt": "2026-01-11T10:00:00.123456"
        })
    }

    #[test]
    fn account_balance_accepts_integral_decimals() {
        let account: Account = serde_json::from_value(account_json(json!(50000.00))).unwrap();
        assert_eq!(account.balance, 50_000);
        assert_eq!(account.account_type, AccountType::Current);
        assert!(account.updated_at.is_some());

        let account: Account = serde_json::from_value(account_json(json!(1250))).unwrap();
        assert_eq!(account.balance, 1_250);
    }

    #[test]
    fn fractional_balance_is_rejected() {
        let result = serde_json::from_value::<Account>(account_json(json!(10.5)));
        assert!(result.is_err());
    }

    #[test]
    fn user_info_round_trips_without_customer_id() {
        let user = UserInfo {
            id: "u1".to_string(),
            email: "admin@willbank.com".to_string(),
            customer_id: None,
            role: Role::Admin,
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("customerId"));
        let back: UserInfo = serde_json::from_str(&json).unwrap();
        assert_eq!(back, user);
    }

    #[test]
    fn transfer_request_uses_service_field_names() {
        let body = serde_json::to_value(TransferRequest {
            source_account_id: "a1",
            target_account_id: "a2",
            amount: 2_500,
            description: None,
        })
        .unwrap();
        assert_eq!(
            body,
            json!({ "sourceAccountId": "a1", "targetAccountId": "a2", "amount": 2500 })
        );
    }

    #[test]
    fn failed_receipt_carries_reason() {
        let receipt: TransactionReceipt = serde_json::from_value(json!({
            "transactionId": "tx-1",
            "accountId": "a1",
            "type": "WITHDRAWAL",
            "amount": 9000.0,
            "status": "FAILED",
            "message": "Withdrawal failed: Insufficient balance",
            "failureReason": "Insufficient balance",
            "createdAt": "2026-02-01T08:00:00"
        }))
        .unwrap();
        assert_eq!(receipt.status, TransactionStatus::Failed);
        assert_eq!(receipt.failure_reason.as_deref(), Some("Insufficient balance"));
    }

    #[test]
    fn dashboard_accounts_flatten_account_fields() {
        let mut account = account_json(json!(7000));
        account["transactionCount"] = json!(3);
        let dashboard: DashboardData = serde_json::from_value(json!({
            "customer": {
                "id": "cust-1",
                "firstName": "Awa",
                "lastName": "Ngono",
                "email": "awa@willbank.com",
                "phone": "699123456",
                "address": "Douala",
                "status": "ACTIVE"
            },
            "accounts": [account],
            "recentTransactions": [],
            "totalBalance": 7000,
            "accountsCount": 1
        }))
        .unwrap();
        assert_eq!(dashboard.accounts[0].account.balance, 7_000);
        assert_eq!(dashboard.accounts[0].transaction_count, Some(3));
        assert_eq!(dashboard.customer.full_name(), "Awa Ngono");
    }
}
