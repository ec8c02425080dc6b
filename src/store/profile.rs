//! Profile records and the secret token wrapper.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// API token that never shows up in `Debug` or `Display` output.
///
/// Stored as plain text on disk; the wrapper only keeps it out of logs.
/// Use `expose()` when the raw value has to be written somewhere.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SecretToken(String);

impl SecretToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Expose the inner value.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// First and last four characters with the middle hidden.
    ///
    /// Tokens of eight characters or fewer are hidden entirely.
    pub fn masked(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();
        if chars.len() <= 8 {
            return "****".to_string();
        }
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}****{}", head, tail)
    }
}

impl std::fmt::Debug for SecretToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SecretToken(••••••••)")
    }
}

impl std::fmt::Display for SecretToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "••••••••")
    }
}

/// One saved credential set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Display name (e.g., "prod").
    pub name: String,
    /// API endpoint (e.g., "https://api.anthropic.com").
    pub base_url: String,
    pub token: SecretToken,
    #[serde(default)]
    pub is_active: bool,
    /// Stable identifier; files written before ids existed get a fresh one.
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
}

impl Profile {
    /// New inactive profile with a generated id.
    pub fn new(
        name: impl Into<String>,
        base_url: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            base_url: base_url.into(),
            token: SecretToken::new(token),
            is_active: false,
            id: Uuid::new_v4(),
        }
    }
}
