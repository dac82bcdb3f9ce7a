//! Credential storage for Task Master sessions.
//!
//! The API client never touches a global store. It is handed a
//! `CredentialStore` at construction and reads the access token from it
//! before every request, so whatever was written last is what gets sent.

pub mod file;
pub mod keychain;
pub mod memory;

pub use file::FileStore;
pub use keychain::KeychainStore;
pub use memory::MemoryStore;

use serde_json::Value;
use thiserror::Error;

use crate::api::types::{AuthTokens, UserProfile};

/// Named credential slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CredentialKey {
    AccessToken,
    RefreshToken,
    User,
}

impl CredentialKey {
    pub const ALL: [CredentialKey; 3] = [
        CredentialKey::AccessToken,
        CredentialKey::RefreshToken,
        CredentialKey::User,
    ];

    /// Slot name as persisted by every store.
    pub fn as_str(&self) -> &'static str {
        match self {
            CredentialKey::AccessToken => "accessToken",
            CredentialKey::RefreshToken => "refreshToken",
            CredentialKey::User => "user",
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Keychain operation failed: {0}")]
    Keychain(String),

    #[error("Credential file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Credential file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("No configuration directory available for the credential file")]
    NoConfigDir,
}

impl From<keyring::Error> for StoreError {
    fn from(err: keyring::Error) -> Self {
        StoreError::Keychain(err.to_string())
    }
}

/// A get/set/remove store of named string slots.
pub trait CredentialStore: Send + Sync {
    fn get(&self, key: CredentialKey) -> Result<Option<String>, StoreError>;

    fn set(&self, key: CredentialKey, value: &str) -> Result<(), StoreError>;

    /// Removing an empty slot is not an error.
    fn remove(&self, key: CredentialKey) -> Result<(), StoreError>;
}

impl<S: CredentialStore + ?Sized> CredentialStore for std::sync::Arc<S> {
    fn get(&self, key: CredentialKey) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: CredentialKey, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: CredentialKey) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}

/// Persist the tokens and profile returned by a successful login.
pub fn save_session<S: CredentialStore + ?Sized>(
    store: &S,
    tokens: &AuthTokens,
    user: &Value,
) -> Result<(), StoreError> {
    store.set(CredentialKey::AccessToken, &tokens.access)?;
    store.set(CredentialKey::RefreshToken, &tokens.refresh)?;
    store.set(CredentialKey::User, &user.to_string())?;
    Ok(())
}

/// Remove every session slot. Safe to call when nothing is stored.
pub fn clear_session<S: CredentialStore + ?Sized>(store: &S) -> Result<(), StoreError> {
    for key in CredentialKey::ALL {
        store.remove(key)?;
    }
    Ok(())
}

/// True when an access token is stored.
pub fn is_authenticated<S: CredentialStore + ?Sized>(store: &S) -> Result<bool, StoreError> {
    Ok(store.get(CredentialKey::AccessToken)?.is_some())
}

/// Read the cached user profile, if any.
pub fn load_user<S: CredentialStore + ?Sized>(
    store: &S,
) -> Result<Option<UserProfile>, StoreError> {
    match store.get(CredentialKey::User)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Replace `full_name` in the cached profile, leaving other fields untouched.
///
/// Does nothing when no profile is cached.
pub fn update_cached_user<S: CredentialStore + ?Sized>(
    store: &S,
    full_name: &str,
) -> Result<(), StoreError> {
    let Some(raw) = store.get(CredentialKey::User)? else {
        return Ok(());
    };

    let mut user: Value = serde_json::from_str(&raw)?;
    if let Some(fields) = user.as_object_mut() {
        fields.insert("full_name".to_string(), Value::String(full_name.to_string()));
    }
    store.set(CredentialKey::User, &user.to_string())
}
