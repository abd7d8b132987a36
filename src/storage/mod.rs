//! Storage Layer
//!
//! Handles data persistence: keyring secrets and the JSON config.

pub mod config;
pub mod keyring;

pub use self::config::*;
pub use self::keyring::*;
