//! Credential Store
//!
//! In-memory holder for the generative backend credential. Cloned handles
//! share one value, so a key set from settings is seen by every advisor
//! built from the same store.

use std::sync::{Arc, PoisonError, RwLock};

use crate::models::settings::mask_secret;

/// Shared handle to the configured credential.
#[derive(Clone, Default)]
pub struct CredentialStore {
    inner: Arc<RwLock<Option<String>>>,
}

impl CredentialStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `credential`, if it is non-blank
    pub fn with_credential(credential: Option<String>) -> Self {
        let store = Self::new();
        if let Some(value) = credential {
            store.set_credential(value);
        }
        store
    }

    /// Replace the credential. A blank value clears it.
    pub fn set_credential(&self, value: impl Into<String>) {
        let value = value.into();
        let trimmed = value.trim();
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        *guard = (!trimmed.is_empty()).then(|| trimmed.to_string());
    }

    /// Remove the credential
    pub fn clear(&self) {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        *guard = None;
    }

    /// Current credential, if one is configured
    pub fn get_credential(&self) -> Option<String> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_configured(&self) -> bool {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let masked = self.get_credential().map(|c| mask_secret(&c));
        f.debug_struct("CredentialStore")
            .field("credential", &masked)
            .finish()
    }
}
