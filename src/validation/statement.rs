// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Statement period checks.

use chrono::NaiveDate;

/// Longest period a single statement may cover.
pub const MAX_STATEMENT_DAYS: i64 = 365;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StatementRangeError {
    #[error("start date must not be after end date")]
    Inverted,
    #[error("statement period cannot exceed {} days", MAX_STATEMENT_DAYS)]
    TooLong,
}

pub fn validate_statement_range(from: NaiveDate, to: NaiveDate) -> Result<(), StatementRangeError> {
    if from > to {
        return Err(StatementRangeError::Inverted);
    }
    if (to - from).num_days() > MAX_STATEMENT_DAYS {
        return Err(StatementRangeError::TooLong);
    }
    Ok(())
}
