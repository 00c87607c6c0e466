// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User roles reported by the gateway.

use serde::{Deserialize, Serialize};

/// Role carried by [`crate::models::UserInfo::role`].
///
/// - `Admin` - back-office user, may act on any customer
/// - `Client` - bank customer, limited to their own accounts
///
/// The mobile login endpoint reports customers as `CUSTOMER`; it maps to
/// `Client`. Roles are always written back as `ADMIN` or `CLIENT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    #[serde(alias = "admin")]
    Admin,
    #[default]
    #[serde(alias = "CUSTOMER", alias = "client", alias = "customer")]
    Client,
}

impl Role {
    /// Check if this role has at least the privileges of the required role.
    pub fn has_privilege(&self, required: Role) -> bool {
        match (self, required) {
            (Role::Admin, _) => true,
            (Role::Client, Role::Client) => true,
            _ => false,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "ADMIN"),
            Role::Client => write!(f, "CLIENT"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_has_all_privileges() {
        assert!(Role::Admin.has_privilege(Role::Admin));
        assert!(Role::Admin.has_privilege(Role::Client));
    }

    #[test]
    fn client_only_has_client_privilege() {
        assert!(!Role::Client.has_privilege(Role::Admin));
        assert!(Role::Client.has_privilege(Role::Client));
    }

    #[test]
    fn decodes_gateway_spellings() {
        let decode = |raw: &str| serde_json::from_value::<Role>(serde_json::json!(raw)).ok();
        assert_eq!(decode("ADMIN"), Some(Role::Admin));
        assert_eq!(decode("CLIENT"), Some(Role::Client));
        assert_eq!(decode("CUSTOMER"), Some(Role::Client));
        assert_eq!(decode("customer"), Some(Role::Client));
        assert_eq!(decode("AUDITOR"), None);
    }

    #[test]
    fn customer_is_written_back_as_client() {
        let role: Role = serde_json::from_str("\"CUSTOMER\"").unwrap();
        assert_eq!(serde_json::to_string(&role).unwrap(), "\"CLIENT\"");
        assert_eq!(role.to_string(), "CLIENT");
    }
}
