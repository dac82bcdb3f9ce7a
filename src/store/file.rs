//! Plain JSON file credential store.
//!
//! The file holds one object mapping slot names to strings, the same shape
//! the web frontend kept in browser storage. It is read on every `get`, so
//! changes made by another process show up on the next request.
//! Contents are not encrypted.

use std::collections::BTreeMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::{CredentialKey, CredentialStore, StoreError};

const APP_DIR: &str = "taskmaster";
const FILE_NAME: &str = "credentials.json";

type Slots = BTreeMap<String, String>;

#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Store at `<config dir>/taskmaster/credentials.json`.
    pub fn default_location() -> Result<Self, StoreError> {
        let dir = dirs::config_dir().ok_or(StoreError::NoConfigDir)?;
        Ok(Self::new(dir.join(APP_DIR).join(FILE_NAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Slots, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(Slots::new()),
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Slots::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, slots: &Slots) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(slots)?;
        let mut file = open_private(&self.path)?;
        file.write_all(raw.as_bytes())?;
        Ok(())
    }

    fn modify(&self, apply: impl FnOnce(&mut Slots) -> bool) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut slots = self.load()?;
        if apply(&mut slots) {
            self.save(&slots)?;
        }
        Ok(())
    }
}

impl CredentialStore for FileStore {
    fn get(&self, key: CredentialKey) -> Result<Option<String>, StoreError> {
        Ok(self.load()?.remove(key.as_str()))
    }

    fn set(&self, key: CredentialKey, value: &str) -> Result<(), StoreError> {
        self.modify(|slots| {
            slots.insert(key.as_str().to_string(), value.to_string());
            true
        })
    }

    fn remove(&self, key: CredentialKey) -> Result<(), StoreError> {
        self.modify(|slots| slots.remove(key.as_str()).is_some())
    }
}

/// Opens the file for rewriting, owner read/write only before any byte lands.
#[cfg(unix)]
fn open_private(path: &Path) -> Result<fs::File, StoreError> {
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
    let file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    // mode() only applies on creation; tighten a file that already existed
    file.set_permissions(fs::Permissions::from_mode(0o600))?;
    Ok(file)
}

#[cfg(not(unix))]
fn open_private(path: &Path) -> Result<fs::File, StoreError> {
    Ok(fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?)
}
