//! Session slots persisted as a small JSON object on disk.
//!
//! The file is rewritten whole on every mutation through a temp file and a
//! rename, so a crash never leaves half a session behind. On Unix the file is
//! created owner-only since it holds a bearer token.

#[cfg(test)]
#[path = "file_storage_test.rs"]
mod file_storage_test;

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use session::{Storage, StorageError};

const DEFAULT_FILE_NAME: &str = "session.json";
const DEFAULT_DIR_NAME: &str = ".backoffice";

#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `$HOME/.backoffice/session.json`, or a file in the working directory
    /// when `HOME` is unset.
    pub fn default_path() -> PathBuf {
        std::env::var_os("HOME").map_or_else(
            || PathBuf::from(DEFAULT_DIR_NAME).join(DEFAULT_FILE_NAME),
            |home| PathBuf::from(home).join(DEFAULT_DIR_NAME).join(DEFAULT_FILE_NAME),
        )
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> BTreeMap<String, String> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return BTreeMap::new(),
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "session file unreadable");
                return BTreeMap::new();
            }
        };
        serde_json::from_str(&raw).unwrap_or_else(|err| {
            tracing::warn!(path = %self.path.display(), error = %err, "session file is not valid JSON");
            BTreeMap::new()
        })
    }

    fn save(&self, slots: &BTreeMap<String, String>) -> io::Result<()> {
        if slots.is_empty() {
            return match fs::remove_file(&self.path) {
                Err(err) if err.kind() != io::ErrorKind::NotFound => Err(err),
                _ => Ok(()),
            };
        }

        if let Some(parent) = self.path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let rendered = serde_json::to_string_pretty(slots).map_err(io::Error::other)?;

        let tmp = self.path.with_extension("json.tmp");
        let mut file = open_private(&tmp)?;
        file.write_all(rendered.as_bytes())?;
        file.sync_all()?;
        drop(file);
        fs::rename(&tmp, &self.path)
    }
}

#[cfg(unix)]
fn open_private(path: &Path) -> io::Result<fs::File> {
    use std::os::unix::fs::OpenOptionsExt;
    fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)
}

#[cfg(not(unix))]
fn open_private(path: &Path) -> io::Result<fs::File> {
    fs::File::create(path)
}

impl Storage for FileStorage {
    fn get(&self, slot: &str) -> Option<String> {
        self.load().remove(slot)
    }

    fn set(&self, slot: &str, value: &str) -> Result<(), StorageError> {
        let mut slots = self.load();
        slots.insert(slot.to_owned(), value.to_owned());
        self.save(&slots).map_err(|err| StorageError::Write {
            slot: slot.to_owned(),
            reason: err.to_string(),
        })
    }

    /// One load and one temp-file rename for the whole batch.
    fn set_slots(&self, entries: &[(&str, &str)]) -> Result<(), StorageError> {
        let mut slots = self.load();
        for (slot, value) in entries {
            slots.insert((*slot).to_owned(), (*value).to_owned());
        }
        self.save(&slots).map_err(|err| StorageError::Write {
            slot: entries
                .iter()
                .map(|(slot, _)| *slot)
                .collect::<Vec<_>>()
                .join(","),
            reason: err.to_string(),
        })
    }

    fn remove(&self, slot: &str) -> Result<(), StorageError> {
        let mut slots = self.load();
        if slots.remove(slot).is_none() {
            return Ok(());
        }
        self.save(&slots).map_err(|err| StorageError::Remove {
            slot: slot.to_owned(),
            reason: err.to_string(),
        })
    }
}
