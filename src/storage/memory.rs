// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::collections::HashMap;
use std::sync::Mutex;

use super::{KeyValueStore, StorageError, StorageResult};

/// In-process [`KeyValueStore`]. Contents are lost on drop.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> StorageResult<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| StorageError::Unavailable("memory storage lock poisoned".to_string()))
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn replace_many(&self, set: &[(&str, String)], remove: &[&str]) -> StorageResult<()> {
        let mut map = self.lock()?;
        for (key, value) in set {
            map.insert((*key).to_string(), value.clone());
        }
        for key in remove {
            map.remove(*key);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove() {
        let store = MemoryStorage::new();
        assert_eq!(store.get("authToken").unwrap(), None);

        store
            .set_many(&[("authToken", "t1".into()), ("refreshToken", "r1".into())])
            .unwrap();
        assert_eq!(store.get("authToken").unwrap().as_deref(), Some("t1"));

        store.remove_many(&["authToken", "missing"]).unwrap();
        assert_eq!(store.get("authToken").unwrap(), None);
        assert_eq!(store.get("refreshToken").unwrap().as_deref(), Some("r1"));

        store
            .replace_many(&[("authToken", "t2".into())], &["refreshToken"])
            .unwrap();
        assert_eq!(store.get("authToken").unwrap().as_deref(), Some("t2"));
        assert_eq!(store.get("refreshToken").unwrap(), None);
    }
}
