//! Application State
//!
//! Process-wide state shared by the front end: the configuration service,
//! the secret store and the credential handle the advisor reads from.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use supplement_advisor_llm::GeminiProvider;

use crate::models::settings::{AppConfig, SettingsUpdate};
use crate::services::advisor::HealthAdvisor;
use crate::services::credentials::CredentialStore;
use crate::storage::{ConfigService, KeyringService, SecretStore, GEMINI_ENTRY};
use crate::utils::error::{AppError, AppResult};

/// Application state
pub struct AppState {
    /// Configuration service for app settings
    config: Arc<RwLock<Option<ConfigService>>>,
    /// Where the API key is kept between sessions
    secrets: Arc<dyn SecretStore>,
    /// Credential shared with every advisor built from this state
    credentials: CredentialStore,
    /// Set when the live credential came from the command line or environment
    session_override: Arc<AtomicBool>,
    /// Whether the state has been initialized
    initialized: Arc<RwLock<bool>>,
}

impl AppState {
    /// Create a new uninitialized app state backed by the OS keyring
    pub fn new() -> Self {
        Self::with_secret_store(Arc::new(KeyringService::new()))
    }

    /// Create a new uninitialized app state over `secrets`
    pub fn with_secret_store(secrets: Arc<dyn SecretStore>) -> Self {
        Self {
            config: Arc::new(RwLock::new(None)),
            secrets,
            credentials: CredentialStore::new(),
            session_override: Arc::new(AtomicBool::new(false)),
            initialized: Arc::new(RwLock::new(false)),
        }
    }

    /// Load configuration (from `config_path`, or the default location) and
    /// the stored credential.
    ///
    /// An unreadable keyring is logged and leaves the credential unset.
    pub async fn initialize(&self, config_path: Option<PathBuf>) -> AppResult<()> {
        let mut initialized = self.initialized.write().await;
        if *initialized {
            return Ok(());
        }

        let service = match config_path {
            Some(path) => ConfigService::new_at(path)?,
            None => ConfigService::new()?,
        };
        debug!(path = %service.path().display(), "configuration loaded");
        *self.config.write().await = Some(service);

        if !self.has_session_override() {
            match self.secrets.get_api_key(GEMINI_ENTRY) {
                Ok(stored) => {
                    debug!(has_api_key = stored.is_some(), "stored credential loaded");
                    self.credentials.set_credential(stored.unwrap_or_default());
                }
                Err(e) => warn!(error = %e, "could not read the stored API key"),
            }
        }

        *initialized = true;
        Ok(())
    }

    /// Shared credential handle
    pub fn credentials(&self) -> CredentialStore {
        self.credentials.clone()
    }

    /// Use `key` for this session without persisting it. Later changes to
    /// the stored key do not replace it.
    pub fn override_credential(&self, key: &str) {
        self.session_override.store(true, Ordering::SeqCst);
        self.credentials.set_credential(key);
    }

    /// Whether the live credential is a session override
    pub fn has_session_override(&self) -> bool {
        self.session_override.load(Ordering::SeqCst)
    }

    /// Get the current configuration
    pub async fn get_config(&self) -> AppResult<AppConfig> {
        let guard = self.config.read().await;
        match &*guard {
            Some(config) => Ok(config.get_config_clone()),
            None => Err(AppError::config("Config service not initialized")),
        }
    }

    /// Update the configuration
    pub async fn update_config(&self, update: SettingsUpdate) -> AppResult<AppConfig> {
        let mut guard = self.config.write().await;
        match &mut *guard {
            Some(config) => config.update_config(update),
            None => Err(AppError::config("Config service not initialized")),
        }
    }

    /// The API key kept in the secret store
    pub fn stored_api_key(&self) -> AppResult<Option<String>> {
        self.secrets.get_api_key(GEMINI_ENTRY)
    }

    /// Persist a new API key
    pub async fn set_api_key(&self, key: &str) -> AppResult<()> {
        let key = key.trim();
        if key.is_empty() {
            return Err(AppError::validation("API key must not be empty"));
        }
        self.secrets.set_api_key(GEMINI_ENTRY, key)?;
        if !self.has_session_override() {
            self.credentials.set_credential(key);
        }
        Ok(())
    }

    /// Remove the stored API key
    pub async fn clear_api_key(&self) -> AppResult<()> {
        self.secrets.delete_api_key(GEMINI_ENTRY)?;
        if !self.has_session_override() {
            self.credentials.clear();
        }
        Ok(())
    }

    /// Build an advisor for the current settings
    pub async fn build_advisor(&self) -> AppResult<Arc<HealthAdvisor>> {
        let config = self.get_config().await?;
        let provider = GeminiProvider::new(config.provider_config())?;
        Ok(Arc::new(HealthAdvisor::new(
            Arc::new(provider),
            self.credentials(),
        )))
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
