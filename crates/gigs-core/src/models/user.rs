use std::fmt;

use serde::{Deserialize, Serialize};

/// Credentials sent as the body of sign-up and sign-in requests.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub password: String,
}

impl User {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_serializes_credentials() {
        let user = User::new("alex", "hunter2");
        let json = serde_json::to_string(&user).unwrap();
        assert_eq!(json, r#"{"username":"alex","password":"hunter2"}"#);
    }

    #[test]
    fn test_user_debug_redacts_password() {
        let user = User::new("alex", "hunter2");
        let debug = format!("{:?}", user);
        assert!(debug.contains("alex"));
        assert!(!debug.contains("hunter2"));
    }
}
