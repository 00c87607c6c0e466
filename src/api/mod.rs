// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Gateway Services
//!
//! Typed wrappers over the WillBank API gateway, one per microservice.
//! All calls go through [`crate::client::HttpClient`] and fail with
//! [`crate::error::NormalizedError`].
//!
//! ## Endpoints
//!
//! | Service | Path prefix |
//! |---------|-------------|
//! | Auth | `/api/auth` |
//! | Customers | `/api/customers` |
//! | Accounts | `/api/accounts` |
//! | Transactions | `/api/transactions` |
//! | Notifications | `/api/notifications` |
//! | Dashboard (composite) | `/api/dashboard` |

pub mod accounts;
pub mod auth;
pub mod customers;
pub mod dashboard;
pub mod notifications;
pub mod paths;
pub mod transactions;

pub use accounts::AccountsApi;
pub use auth::AuthApi;
pub use customers::CustomersApi;
pub use dashboard::DashboardApi;
pub use notifications::NotificationsApi;
pub use transactions::{TransactionError, TransactionsApi};
