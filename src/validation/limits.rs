// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Business limits applied to money movements.

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Monetary amount in minor units. XAF has no subdivisions, so this is a
/// plain count of francs.
pub type Amount = i64;

pub const DEFAULT_MIN_DEPOSIT: Amount = 1_000;
pub const DEFAULT_MAX_WITHDRAWAL: Amount = 500_000;
pub const DEFAULT_MIN_TRANSFER: Amount = 100;
pub const DEFAULT_MAX_TRANSFER: Amount = 1_000_000;

/// Limits configured for the client. Read-only once the client is built.
///
/// There is no separate withdrawal floor: withdrawals share `min_transfer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessLimits {
    pub min_deposit: Amount,
    pub max_withdrawal: Amount,
    pub min_transfer: Amount,
    pub max_transfer: Amount,
}

impl Default for BusinessLimits {
    fn default() -> Self {
        Self {
            min_deposit: DEFAULT_MIN_DEPOSIT,
            max_withdrawal: DEFAULT_MAX_WITHDRAWAL,
            min_transfer: DEFAULT_MIN_TRANSFER,
            max_transfer: DEFAULT_MAX_TRANSFER,
        }
    }
}

impl BusinessLimits {
    /// Reject limit sets that could never accept an operation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let named = [
            ("min_deposit", self.min_deposit),
            ("max_withdrawal", self.max_withdrawal),
            ("min_transfer", self.min_transfer),
            ("max_transfer", self.max_transfer),
        ];
        if let Some((name, value)) = named.iter().find(|(_, value)| *value <= 0) {
            return Err(ConfigError::InvalidLimits(format!(
                "{name} must be positive, got {value}"
            )));
        }
        if self.min_transfer > self.max_transfer {
            return Err(ConfigError::InvalidLimits(format!(
                "min_transfer ({}) exceeds max_transfer ({})",
                self.min_transfer, self.max_transfer
            )));
        }
        if self.min_transfer > self.max_withdrawal {
            return Err(ConfigError::InvalidLimits(format!(
                "min_transfer ({}) exceeds max_withdrawal ({})",
                self.min_transfer, self.max_withdrawal
            )));
        }
        Ok(())
    }
}
