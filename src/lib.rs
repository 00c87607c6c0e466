// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! WillBank Client Core
//!
//! Client-side core of the WillBank banking apps: authenticated access to
//! the API gateway, session persistence, and local validation of money
//! movements before they are sent.
//!
//! ## Modules
//!
//! - `client` - HTTP adapter (bearer injection, refresh-and-retry)
//! - `auth` - session store and auth lifecycle
//! - `validation` - business limits for deposits, withdrawals, transfers
//! - `api` - typed gateway services
//! - `storage` - session persistence backends
//! - `state` - composition root

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod state;
pub mod storage;
pub mod validation;

pub use error::NormalizedError;
pub use state::AppState;
