// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Session Storage
//!
//! Small key-value persistence used by the session store to survive
//! restarts. Values are opaque strings; callers decide on the encoding.
//!
//! ## Backends
//!
//! - [`MemoryStorage`] - process-local, used in tests and ephemeral runs
//! - [`FileStorage`] - one JSON document under the data directory
//!
//! ## Storage Layout
//!
//! ```text
//! {DATA_DIR}/
//!   session.json    # {"authToken": "...", "refreshToken": "...", "userInfo": "{...}"}
//! ```
//!
//! Multi-key writes go through [`KeyValueStore::replace_many`] so a session
//! is never observed half written on disk.

pub mod file;
pub mod memory;

use std::io;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Error type for session storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Persistent string-keyed storage.
///
/// Implementations must apply `replace_many` as one atomic step with
/// respect to other calls on the same store.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Write `set` and delete `remove` in a single update.
    fn replace_many(&self, set: &[(&str, String)], remove: &[&str]) -> StorageResult<()>;

    fn set_many(&self, entries: &[(&str, String)]) -> StorageResult<()> {
        self.replace_many(entries, &[])
    }

    fn remove_many(&self, keys: &[&str]) -> StorageResult<()> {
        self.replace_many(&[], keys)
    }

    fn set(&self, key: &str, value: String) -> StorageResult<()> {
        self.set_many(&[(key, value)])
    }
}
