use anyhow::{Context, Result};
use keyring::Entry;
use tracing::debug;

use crate::models::User;

/// Keychain service name used when none is given
pub const DEFAULT_SERVICE: &str = "gigs";

/// Remembers sign-in passwords in the OS keychain, one entry per username.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    service: String,
}

impl Default for CredentialStore {
    fn default() -> Self {
        Self::new(DEFAULT_SERVICE)
    }
}

impl CredentialStore {
    pub fn new(service: impl Into<String>) -> Self {
        Self { service: service.into() }
    }

    fn entry(&self, username: &str) -> Result<Entry> {
        Entry::new(&self.service, username).context("Failed to create keyring entry")
    }

    /// Save the user's password under their username
    pub fn remember(&self, user: &User) -> Result<()> {
        self.entry(&user.username)?
            .set_password(&user.password)
            .context("Failed to store password in keychain")?;
        debug!(username = %user.username, "Stored password in keychain");
        Ok(())
    }

    /// Rebuild a `User` from the stored password for `username`
    pub fn recall(&self, username: &str) -> Result<User> {
        let password = self
            .entry(username)?
            .get_password()
            .context("Failed to retrieve password from keychain")?;
        Ok(User::new(username, password))
    }

    pub fn forget(&self, username: &str) -> Result<()> {
        self.entry(username)?
            .delete_credential()
            .context("Failed to delete credential from keychain")?;
        Ok(())
    }

    pub fn has_credentials(&self, username: &str) -> bool {
        self.entry(username)
            .map(|entry| entry.get_password().is_ok())
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Needs a real OS keychain (macOS Keychain, Windows Credential Manager or
    // a Secret Service daemon). Run with `cargo test -- --ignored`.
    #[test]
    #[ignore]
    fn test_remember_recall_forget_roundtrip() {
        let store = CredentialStore::new("gigs-test");
        let username = format!("gigs-test-user-{}", std::process::id());
        let user = User::new(username.clone(), "hunter2");

        store.remember(&user).unwrap();
        assert!(store.has_credentials(&username));
        assert_eq!(store.recall(&username).unwrap(), user);

        store.forget(&username).unwrap();
        assert!(!store.has_credentials(&username));
        assert!(store.recall(&username).is_err());
    }

    #[test]
    fn test_default_service_name() {
        let store = CredentialStore::default();
        assert_eq!(store.service, DEFAULT_SERVICE);
    }
}
