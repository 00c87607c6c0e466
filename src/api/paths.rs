// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Gateway paths.

use url::form_urlencoded;

pub const AUTH_LOGIN: &str = "/api/auth/login";
pub const AUTH_LOGOUT: &str = "/api/auth/logout";
pub const AUTH_REFRESH: &str = "/api/auth/refresh";
pub const AUTH_ME: &str = "/api/auth/me";

pub const CUSTOMERS: &str = "/api/customers";
pub const ACCOUNTS: &str = "/api/accounts";
pub const NOTIFICATIONS: &str = "/api/notifications";

pub const DEPOSIT: &str = "/api/transactions/deposit";
pub const WITHDRAW: &str = "/api/transactions/withdraw";
pub const TRANSFER: &str = "/api/transactions/transfer";
pub const TRANSACTION_SEARCH: &str = "/api/transactions/search";

pub fn customer(id: &str) -> String {
    format!("{CUSTOMERS}/{}", segment(id))
}

pub fn account(id: &str) -> String {
    format!("{ACCOUNTS}/{}", segment(id))
}

pub fn accounts_by_customer(customer_id: &str) -> String {
    format!("{ACCOUNTS}/customer/{}", segment(customer_id))
}

pub fn transactions_by_account(account_id: &str) -> String {
    format!("/api/transactions/account/{}", segment(account_id))
}

pub fn notifications_by_customer(customer_id: &str) -> String {
    format!("{NOTIFICATIONS}/customer/{}", segment(customer_id))
}

pub fn dashboard(customer_id: &str) -> String {
    format!("/api/dashboard/{}", segment(customer_id))
}

/// Percent-encode one path segment. `/`, `?` and `#` never survive, and a
/// space becomes `%20` rather than the form encoding `+`.
fn segment(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes())
        .map(|chunk| if chunk == "+" { "%20" } else { chunk })
        .collect()
}

/// Append a query string built from the present pairs. Absent values are
/// skipped; no `?` is added when nothing remains.
pub fn with_query(path: &str, pairs: &[(&str, Option<String>)]) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    let mut any = false;
    for (key, value) in pairs {
        if let Some(value) = value {
            query.append_pair(key, value);
            any = true;
        }
    }
    if any {
        format!("{path}?{}", query.finish())
    } else {
        path.to_string()
    }
}
