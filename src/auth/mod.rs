// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Client-side session handling for the WillBank gateway.
//!
//! ## Auth Flow
//!
//! 1. `POST /api/auth/login` returns an access token, a refresh token and
//!    the user identity
//! 2. All three are persisted together by the [`SessionStore`]
//! 3. Every request carries `Authorization: Bearer <access token>`
//! 4. A 401 triggers one refresh (`POST /api/auth/refresh`) and one retry
//! 5. An unrecoverable refresh failure clears the session
//!
//! ## State
//!
//! - [`AuthState::Unknown`] - before the persisted session is read
//! - [`AuthState::Anonymous`] - no usable session
//! - [`AuthState::Authenticated`] - access token and user present

pub mod manager;
pub mod roles;
pub mod session;

pub use manager::AuthSessionManager;
pub use roles::Role;
pub use session::{AuthState, Session, SessionStore};
