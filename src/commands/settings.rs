//! Settings Commands
//!
//! Commands for reading and updating application settings.

use serde_json::Value;

use crate::models::settings::{mask_secret, AppConfig};
use crate::state::AppState;
use crate::utils::error::AppResult;

/// Settings as shown to the user. The key is masked and marked with where
/// it came from.
pub fn settings_view(
    config: &AppConfig,
    stored_key: Option<&str>,
    session_key: Option<&str>,
) -> AppResult<Value> {
    let mut view = serde_json::to_value(config)?;
    if let Some(object) = view.as_object_mut() {
        let (key, source) = match (session_key, stored_key) {
            (Some(key), _) => (Some(key), "session"),
            (None, Some(key)) => (Some(key), "keyring"),
            (None, None) => (None, "none"),
        };
        object.insert(
            "api_key".to_string(),
            key.map(|k| Value::String(mask_secret(k)))
                .unwrap_or(Value::Null),
        );
        object.insert("api_key_source".to_string(), Value::from(source));
    }
    Ok(view)
}

/// Print current application settings
pub async fn show_settings(state: &AppState) -> AppResult<()> {
    let config = state.get_config().await?;
    let stored = state.stored_api_key()?;
    let session = if state.has_session_override() {
        state.credentials().get_credential()
    } else {
        None
    };
    let view = settings_view(&config, stored.as_deref(), session.as_deref())?;
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}

/// Store a new API key in the OS keyring
pub async fn set_api_key(state: &AppState, key: &str) -> AppResult<()> {
    state.set_api_key(key).await?;
    println!("API key saved to the system keyring.");
    Ok(())
}

/// Remove the stored API key
pub async fn clear_api_key(state: &AppState) -> AppResult<()> {
    state.clear_api_key().await?;
    println!("API key removed.");
    Ok(())
}
