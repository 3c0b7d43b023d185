use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::AppError;

use super::KeyValueStore;

pub(crate) const STATE_FILE: &str = "state.json";

/// Key/value store backed by a single JSON object on disk.
///
/// The file is read once on open; a missing or malformed file opens as an
/// empty store. Every write rewrites the whole file before the in-memory copy
/// is updated.
#[derive(Debug)]
pub(crate) struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, Value>,
}

impl FileStore {
    pub(crate) fn open(path: PathBuf) -> Self {
        let entries = load_entries(&path).unwrap_or_default();
        tracing::debug!(path = %path.display(), keys = entries.len(), "opened state store");
        Self { path, entries }
    }

    pub(crate) fn in_dir(dir: &Path) -> Self {
        Self::open(dir.join(STATE_FILE))
    }

    fn persist(&self, entries: &BTreeMap<String, Value>) -> Result<(), AppError> {
        let write_err = |source| AppError::Write {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        let file = File::create(&self.path).map_err(write_err)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, entries)?;
        writer.flush().map_err(write_err)
    }
}

fn load_entries(path: &Path) -> Option<BTreeMap<String, Value>> {
    let file = File::open(path).ok()?;
    match serde_json::from_reader(file) {
        Ok(entries) => Some(entries),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring malformed state file");
            None
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key)?.as_str().map(str::to_string)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), AppError> {
        let mut next = self.entries.clone();
        next.insert(key.to_string(), Value::String(value.to_string()));
        self.persist(&next)?;
        self.entries = next;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), AppError> {
        if !self.entries.contains_key(key) {
            return Ok(());
        }
        let mut next = self.entries.clone();
        next.remove(key);
        self.persist(&next)?;
        self.entries = next;
        Ok(())
    }
}
