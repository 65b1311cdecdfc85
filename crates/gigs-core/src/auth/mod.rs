//! Authentication state and credential storage.
//!
//! This module provides:
//! - `Bearer`: the opaque token returned by sign-in, held in memory only
//! - `CredentialStore`: secure OS-level credential storage via keyring

pub mod bearer;
pub mod credentials;

pub use bearer::Bearer;
pub use credentials::CredentialStore;
