//! Supplement Advisor - Application Library
//!
//! Backend of the Supplement Advisor terminal application: a multi-step
//! health assessment that asks a generative backend for follow-up questions,
//! a health analysis and supplement recommendations.
//! It includes:
//! - Command handlers for the terminal front end
//! - Business logic services (advisor, assessment wizard, credentials)
//! - Storage layer (JSON config)
//! - Data models and utilities

pub mod commands;
pub mod models;
pub mod services;
pub mod state;
pub mod storage;
pub mod utils;

pub use models::settings::{AppConfig, SettingsUpdate};
pub use services::advisor::{AdvisorIssue, AssessmentReport, HealthAdvisor};
pub use services::assessment::{Advance, AssessmentWizard};
pub use services::credentials::CredentialStore;
pub use state::AppState;
pub use utils::error::{AppError, AppResult};
