//! Data Models
//!
//! Contains the data structures persisted by the application.

pub mod settings;

pub use settings::*;
