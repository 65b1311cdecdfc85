use std::fmt;

use serde::{Deserialize, Serialize};

/// Token returned by `POST /users/login`.
///
/// The service may send additional fields alongside `token`; they are ignored.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bearer {
    pub token: String,
}

impl Bearer {
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: token.into() }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Value for an `Authorization` header
    pub fn as_header_value(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

impl fmt::Debug for Bearer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let visible: String = self.token.chars().take(4).collect();
        f.debug_struct("Bearer")
            .field("token", &format!("{}...", visible))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_ignores_extra_fields() {
        let json = r#"{"id": 3, "token": "abc123", "userID": 12}"#;
        let bearer: Bearer = serde_json::from_str(json).unwrap();
        assert_eq!(bearer.token(), "abc123");
    }

    #[test]
    fn test_bearer_requires_token() {
        assert!(serde_json::from_str::<Bearer>(r#"{"id": 3}"#).is_err());
    }

    #[test]
    fn test_bearer_header_value() {
        assert_eq!(Bearer::new("abc123").as_header_value(), "Bearer abc123");
    }

    #[test]
    fn test_bearer_debug_hides_token() {
        let debug = format!("{:?}", Bearer::new("abcdefghijkl"));
        assert!(debug.contains("abcd..."));
        assert!(!debug.contains("efgh"));
    }
}
