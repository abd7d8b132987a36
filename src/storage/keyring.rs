//! Keyring Integration
//!
//! Secure API key storage using the OS-native keyring (Credential Manager,
//! Keychain, kernel keyutils). The key never touches the config file.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use keyring::Entry;

use crate::utils::error::{AppError, AppResult};

/// Service name used for keyring entries
pub const SERVICE_NAME: &str = "supplement-advisor";

/// Entry holding the Gemini API key
pub const GEMINI_ENTRY: &str = "gemini";

/// Where API keys are kept between sessions.
pub trait SecretStore: Send + Sync {
    /// Store an API key for a provider
    fn set_api_key(&self, provider: &str, key: &str) -> AppResult<()>;

    /// Retrieve an API key for a provider
    fn get_api_key(&self, provider: &str) -> AppResult<Option<String>>;

    /// Delete an API key for a provider. Deleting a missing key is not an error.
    fn delete_api_key(&self, provider: &str) -> AppResult<()>;
}

/// Keyring service for secure secret storage
#[derive(Debug, Default)]
pub struct KeyringService;

impl KeyringService {
    /// Create a new keyring service
    pub fn new() -> Self {
        Self
    }

    fn entry(provider: &str) -> AppResult<Entry> {
        Entry::new(SERVICE_NAME, provider)
            .map_err(|e| AppError::keyring(format!("Failed to create keyring entry: {}", e)))
    }
}

impl SecretStore for KeyringService {
    fn set_api_key(&self, provider: &str, key: &str) -> AppResult<()> {
        Self::entry(provider)?
            .set_password(key)
            .map_err(|e| AppError::keyring(format!("Failed to store API key: {}", e)))
    }

    fn get_api_key(&self, provider: &str) -> AppResult<Option<String>> {
        match Self::entry(provider)?.get_password() {
            Ok(password) => Ok(Some(password)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(AppError::keyring(format!(
                "Failed to retrieve API key: {}",
                e
            ))),
        }
    }

    fn delete_api_key(&self, provider: &str) -> AppResult<()> {
        match Self::entry(provider)?.delete_credential() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(AppError::keyring(format!("Failed to delete API key: {}", e))),
        }
    }
}

/// Process-local secret store; nothing outlives the process.
#[derive(Debug, Default)]
pub struct MemorySecretStore {
    keys: Mutex<HashMap<String, String>>,
}

impl MemorySecretStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SecretStore for MemorySecretStore {
    fn set_api_key(&self, provider: &str, key: &str) -> AppResult<()> {
        self.keys
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(provider.to_string(), key.to_string());
        Ok(())
    }

    fn get_api_key(&self, provider: &str) -> AppResult<Option<String>> {
        Ok(self
            .keys
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(provider)
            .cloned())
    }

    fn delete_api_key(&self, provider: &str) -> AppResult<()> {
        self.keys
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(provider);
        Ok(())
    }
}
