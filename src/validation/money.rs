// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Pre-flight checks for deposits, withdrawals and transfers.
//!
//! Rules are evaluated in a fixed order and the first failing rule wins.
//! The backend stays authoritative; passing these checks only means the
//! request is worth sending.

use crate::models::TransactionType;

use super::limits::{Amount, BusinessLimits};

/// A money movement requested by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyOperation {
    Deposit {
        account_id: String,
        amount: Amount,
        description: Option<String>,
    },
    Withdrawal {
        account_id: String,
        amount: Amount,
        description: Option<String>,
    },
    Transfer {
        account_id: String,
        target_account_id: String,
        amount: Amount,
        description: Option<String>,
    },
}

impl MoneyOperation {
    pub fn deposit(account_id: impl Into<String>, amount: Amount) -> Self {
        Self::Deposit {
            account_id: account_id.into(),
            amount,
            description: None,
        }
    }

    pub fn withdrawal(account_id: impl Into<String>, amount: Amount) -> Self {
        Self::Withdrawal {
            account_id: account_id.into(),
            amount,
            description: None,
        }
    }

    pub fn transfer(
        account_id: impl Into<String>,
        target_account_id: impl Into<String>,
        amount: Amount,
    ) -> Self {
        Self::Transfer {
            account_id: account_id.into(),
            target_account_id: target_account_id.into(),
            amount,
            description: None,
        }
    }

    pub fn with_description(mut self, text: impl Into<String>) -> Self {
        let text = Some(text.into());
        match &mut self {
            Self::Deposit { description, .. }
            | Self::Withdrawal { description, .. }
            | Self::Transfer { description, .. } => *description = text,
        }
        self
    }

    /// The account whose cached state is checked (the source for transfers).
    pub fn account_id(&self) -> &str {
        match self {
            Self::Deposit { account_id, .. }
            | Self::Withdrawal { account_id, .. }
            | Self::Transfer { account_id, .. } => account_id,
        }
    }

    pub fn amount(&self) -> Amount {
        match self {
            Self::Deposit { amount, .. }
            | Self::Withdrawal { amount, .. }
            | Self::Transfer { amount, .. } => *amount,
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Deposit { description, .. }
            | Self::Withdrawal { description, .. }
            | Self::Transfer { description, .. } => description.as_deref(),
        }
    }

    pub fn kind(&self) -> TransactionType {
        match self {
            Self::Deposit { .. } => TransactionType::Deposit,
            Self::Withdrawal { .. } => TransactionType::Withdrawal,
            Self::Transfer { .. } => TransactionType::Transfer,
        }
    }
}

/// Why an operation was refused before reaching the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RejectionReason {
    #[error("amount must be positive")]
    NonPositiveAmount,
    #[error("below minimum deposit")]
    BelowMinimumDeposit,
    #[error("below minimum withdrawal")]
    BelowMinimumWithdrawal,
    #[error("insufficient balance")]
    InsufficientBalance,
    #[error("exceeds maximum withdrawal")]
    ExceedsMaximumWithdrawal,
    #[error("source and destination must differ")]
    SameAccount,
    #[error("below minimum transfer")]
    BelowMinimumTransfer,
    #[error("exceeds maximum transfer")]
    ExceedsMaximumTransfer,
}

impl RejectionReason {
    /// Form field the rejection belongs to.
    pub fn field(&self) -> &'static str {
        match self {
            RejectionReason::SameAccount => "targetAccountId",
            _ => "amount",
        }
    }
}

/// Applies [`BusinessLimits`] to candidate operations.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransactionValidator {
    limits: BusinessLimits,
}

impl TransactionValidator {
    pub fn new(limits: BusinessLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &BusinessLimits {
        &self.limits
    }

    /// Check `operation` against the cached `balance` of its source account.
    ///
    /// `balance` is ignored for deposits.
    pub fn validate(
        &self,
        operation: &MoneyOperation,
        balance: Amount,
    ) -> Result<(), RejectionReason> {
        let limits = &self.limits;
        match operation {
            MoneyOperation::Deposit { amount, .. } => {
                ensure(*amount > 0, RejectionReason::NonPositiveAmount)?;
                ensure(
                    *amount >= limits.min_deposit,
                    RejectionReason::BelowMinimumDeposit,
                )
            }
            MoneyOperation::Withdrawal { amount, .. } => {
                ensure(*amount > 0, RejectionReason::NonPositiveAmount)?;
                ensure(
                    *amount >= limits.min_transfer,
                    RejectionReason::BelowMinimumWithdrawal,
                )?;
                ensure(*amount <= balance, RejectionReason::InsufficientBalance)?;
                ensure(
                    *amount <= limits.max_withdrawal,
                    RejectionReason::ExceedsMaximumWithdrawal,
                )
            }
            MoneyOperation::Transfer {
                account_id,
                target_account_id,
                amount,
                ..
            } => {
                ensure(account_id != target_account_id, RejectionReason::SameAccount)?;
                ensure(*amount > 0, RejectionReason::NonPositiveAmount)?;
                ensure(
                    *amount >= limits.min_transfer,
                    RejectionReason::BelowMinimumTransfer,
                )?;
                ensure(*amount <= balance, RejectionReason::InsufficientBalance)?;
                ensure(
                    *amount <= limits.max_transfer,
                    RejectionReason::ExceedsMaximumTransfer,
                )
            }
        }
    }
}

fn ensure(condition: bool, reason: RejectionReason) -> Result<(), RejectionReason> {
    if condition {
        Ok(())
    } else {
        Err(reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> TransactionValidator {
        TransactionValidator::default()
    }

    #[test]
    fn deposit_boundary_at_minimum() {
        let v = validator();
        let min = v.limits().min_deposit;
        assert_eq!(
            v.validate(&MoneyOperation::deposit("a1", min - 1), 0),
            Err(RejectionReason::BelowMinimumDeposit)
        );
        assert_eq!(v.validate(&MoneyOperation::deposit("a1", min), 0), Ok(()));
    }

    #[test]
    fn non_positive_amounts_are_rejected_first() {
        let v = validator();
        for amount in [0, -500] {
            assert_eq!(
                v.validate(&MoneyOperation::deposit("a1", amount), 0),
                Err(RejectionReason::NonPositiveAmount)
            );
            assert_eq!(
                v.validate(&MoneyOperation::withdrawal("a1", amount), 10_000),
                Err(RejectionReason::NonPositiveAmount)
            );
            assert_eq!(
                v.validate(&MoneyOperation::transfer("a1", "a2", amount), 10_000),
                Err(RejectionReason::NonPositiveAmount)
            );
        }
    }

    #[test]
    fn withdrawal_uses_transfer_floor() {
        let v = validator();
        assert_eq!(
            v.validate(&MoneyOperation::withdrawal("a1", 99), 10_000),
            Err(RejectionReason::BelowMinimumWithdrawal)
        );
        assert_eq!(
            v.validate(&MoneyOperation::withdrawal("a1", 100), 10_000),
            Ok(())
        );
    }

    #[test]
    fn withdrawal_over_balance_is_insufficient_even_below_maximum() {
        let v = validator();
        assert_eq!(
            v.validate(&MoneyOperation::withdrawal("a1", 20_000), 10_000),
            Err(RejectionReason::InsufficientBalance)
        );
    }

    #[test]
    fn withdrawal_over_maximum_with_large_balance() {
        let v = validator();
        assert_eq!(
            v.validate(&MoneyOperation::withdrawal("a1", 500_001), 10_000_000),
            Err(RejectionReason::ExceedsMaximumWithdrawal)
        );
        assert_eq!(
            v.validate(&MoneyOperation::withdrawal("a1", 500_000), 10_000_000),
            Ok(())
        );
    }

    #[test]
    fn transfer_to_same_account_is_rejected_regardless_of_amount() {
        let v = validator();
        for amount in [-1, 0, 50, 1_000, 5_000_000] {
            let err = v
                .validate(&MoneyOperation::transfer("a1", "a1", amount), 10_000_000)
                .unwrap_err();
            assert_eq!(err, RejectionReason::SameAccount);
            assert_eq!(err.field(), "targetAccountId");
        }
    }

    #[test]
    fn transfer_balance_check_precedes_maximum() {
        let v = validator();
        let err = v
            .validate(&MoneyOperation::transfer("a1", "a2", 1_000_000), 50_000)
            .unwrap_err();
        assert_eq!(err, RejectionReason::InsufficientBalance);
    }

    #[test]
    fn transfer_minimum_and_maximum() {
        let v = validator();
        assert_eq!(
            v.validate(&MoneyOperation::transfer("a1", "a2", 99), 50_000),
            Err(RejectionReason::BelowMinimumTransfer)
        );
        assert_eq!(
            v.validate(&MoneyOperation::transfer("a1", "a2", 1_000_001), 5_000_000),
            Err(RejectionReason::ExceedsMaximumTransfer)
        );
        assert_eq!(
            v.validate(&MoneyOperation::transfer("a1", "a2", 1_000_000), 5_000_000),
            Ok(())
        );
    }

    #[test]
    fn rejection_messages_are_displayable() {
        assert_eq!(
            RejectionReason::BelowMinimumDeposit.to_string(),
            "below minimum deposit"
        );
        assert_eq!(
            RejectionReason::SameAccount.to_string(),
            "source and destination must differ"
        );
    }

    #[test]
    fn accessors_cover_every_variant() {
        let op = MoneyOperation::transfer("a1", "a2", 700).with_description("rent");
        assert_eq!(op.account_id(), "a1");
        assert_eq!(op.amount(), 700);
        assert_eq!(op.description(), Some("rent"));
        assert_eq!(op.kind(), TransactionType::Transfer);
    }
}
