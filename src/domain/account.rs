use std::fmt;

use serde::{Deserialize, Serialize};

use super::discussion::Discussion;

/// A registered identity together with every discussion it owns.
/// Persisted as `login`, `password`, `pseudo`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    #[serde(rename = "login")]
    pub identifier: String,
    #[serde(rename = "password")]
    pub secret: String,
    #[serde(rename = "pseudo")]
    pub display_name: String,
    #[serde(default)]
    pub discussions: Vec<Discussion>,
}

impl Account {
    pub fn new(
        identifier: impl Into<String>,
        secret: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            secret: secret.into(),
            display_name: display_name.into(),
            discussions: Vec::new(),
        }
    }

    pub fn matches_credentials(&self, identifier: &str, secret: &str) -> bool {
        self.identifier == identifier && self.secret == secret
    }

    pub fn discussion(&self, id: &str) -> Option<&Discussion> {
        self.discussions.iter().find(|discussion| discussion.id == id)
    }

    /// Returns a copy whose discussion list is replaced wholesale.
    pub fn with_discussions(&self, discussions: Vec<Discussion>) -> Self {
        Self {
            identifier: self.identifier.clone(),
            secret: self.secret.clone(),
            display_name: self.display_name.clone(),
            discussions,
        }
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("identifier", &self.identifier)
            .field("secret", &"[REDACTED]")
            .field("display_name", &self.display_name)
            .field("discussions", &self.discussions.len())
            .finish()
    }
}
