//! In-process credential store.
//!
//! Nothing is persisted. Values are zeroed when they are overwritten or removed.

use std::collections::HashMap;
use std::sync::RwLock;

use zeroize::Zeroize;

use super::{CredentialKey, CredentialStore, StoreError};

#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: RwLock<HashMap<CredentialKey, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store already holding the given access and refresh tokens.
    pub fn with_tokens(access: Option<&str>, refresh: Option<&str>) -> Self {
        let mut slots = HashMap::new();
        if let Some(token) = access {
            slots.insert(CredentialKey::AccessToken, token.to_string());
        }
        if let Some(token) = refresh {
            slots.insert(CredentialKey::RefreshToken, token.to_string());
        }
        Self {
            slots: RwLock::new(slots),
        }
    }
}

impl CredentialStore for MemoryStore {
    fn get(&self, key: CredentialKey) -> Result<Option<String>, StoreError> {
        let slots = self.slots.read().unwrap_or_else(|e| e.into_inner());
        Ok(slots.get(&key).cloned())
    }

    fn set(&self, key: CredentialKey, value: &str) -> Result<(), StoreError> {
        let mut slots = self.slots.write().unwrap_or_else(|e| e.into_inner());
        if let Some(mut old) = slots.insert(key, value.to_string()) {
            old.zeroize();
        }
        Ok(())
    }

    fn remove(&self, key: CredentialKey) -> Result<(), StoreError> {
        let mut slots = self.slots.write().unwrap_or_else(|e| e.into_inner());
        if let Some(mut old) = slots.remove(&key) {
            old.zeroize();
        }
        Ok(())
    }
}

impl Drop for MemoryStore {
    fn drop(&mut self) {
        let slots = self.slots.get_mut().unwrap_or_else(|e| e.into_inner());
        for value in slots.values_mut() {
            value.zeroize();
        }
    }
}
