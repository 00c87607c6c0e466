// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! File-backed [`KeyValueStore`].
//!
//! All keys live in a single JSON object. Every mutation rewrites the whole
//! document through a temp file and an atomic rename, so a crash leaves
//! either the old or the new session on disk.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::debug;

use super::{KeyValueStore, StorageError, StorageResult};

/// File name of the session document inside the data directory.
pub const SESSION_FILE: &str = "session.json";

type Document = BTreeMap<String, String>;

#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    // Serializes read-modify-write cycles.
    write_lock: Mutex<()>,
}

impl FileStorage {
    /// Store backed by `{dir}/session.json`. The directory is created lazily.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self::at_path(dir.as_ref().join(SESSION_FILE))
    }

    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> StorageResult<Document> {
        match fs::read(&self.path) {
            Ok(bytes) if bytes.is_empty() => Ok(Document::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Document::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_document(&self, doc: &Document) -> StorageResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let temp_path = self.path.with_extension("tmp");
        {
            let file = File::create(&temp_path)?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, doc)?;
            writer.flush()?;
        }

        fs::rename(&temp_path, &self.path)?;
        debug!(path = %self.path.display(), keys = doc.len(), "Session file written");
        Ok(())
    }

    fn update(&self, apply: impl FnOnce(&mut Document)) -> StorageResult<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| StorageError::Unavailable("file storage lock poisoned".to_string()))?;
        let mut doc = self.read_document()?;
        apply(&mut doc);
        self.write_document(&doc)
    }
}

impl KeyValueStore for FileStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.read_document()?.remove(key))
    }

    fn replace_many(&self, set: &[(&str, String)], remove: &[&str]) -> StorageResult<()> {
        self.update(|doc| {
            for (key, value) in set {
                doc.insert((*key).to_string(), value.clone());
            }
            for key in remove {
                doc.remove(*key);
            }
        })
    }
}
