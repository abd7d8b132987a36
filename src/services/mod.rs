//! Services
//!
//! Business logic: the advisor, the assessment wizard and the credential
//! handle they share.

pub mod advisor;
pub mod assessment;
pub mod credentials;

pub use credentials::CredentialStore;
