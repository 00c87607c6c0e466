// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Local Validation
//!
//! Local checks run before a request leaves the client:
//!
//! - `money` - deposit / withdrawal / transfer rules against [`BusinessLimits`]
//! - `statement` - account statement period bounds
//! - `customer` - customer form fields (names, email, Cameroon phone, address)
//!
//! All are pure; rejections are typed values, never network calls.

pub mod customer;
pub mod limits;
pub mod money;
pub mod statement;

pub use customer::{validate_customer_update, validate_new_customer};
pub use limits::{Amount, BusinessLimits};
pub use money::{MoneyOperation, RejectionReason, TransactionValidator};
pub use statement::{validate_statement_range, StatementRangeError, MAX_STATEMENT_DAYS};
