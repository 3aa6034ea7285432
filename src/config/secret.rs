//! Credential handling for the hosting client id
//!
//! Secrets are wrapped in `secrecy::Secret` so they are zeroed on drop, redacted
//! in `Debug` output and only readable through `expose_secret()`.
//!
//! # Example
//!
//! ```rust
//! use shotport::config::secret_string;
//! use secrecy::ExposeSecret;
//!
//! let client_id = secret_string("my-client-id".to_string());
//! assert_eq!(client_id.expose_secret().as_ref(), "my-client-id");
//! println!("{:?}", client_id); // Secret([REDACTED ...])
//! ```

use secrecy::{CloneableSecret, DebugSecret, Secret, SerializableSecret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::Zeroize;

/// String that is zeroed when dropped
#[derive(Clone, Debug, Zeroize)]
#[zeroize(drop)]
pub struct SecretValue(String);

impl CloneableSecret for SecretValue {}
impl DebugSecret for SecretValue {}
impl SerializableSecret for SecretValue {}

impl From<String> for SecretValue {
    fn from(s: String) -> Self {
        SecretValue(s)
    }
}

impl PartialEq<str> for SecretValue {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl AsRef<str> for SecretValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl SecretValue {
    /// Check if the secret value is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for SecretValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SecretValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(SecretValue)
    }
}

/// Secret string held by configuration sections
pub type SecretString = Secret<SecretValue>;

/// Wraps a String into a [`SecretString`]
#[inline]
pub fn secret_string(value: String) -> SecretString {
    Secret::new(SecretValue::from(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_secret_string_creation() {
        let secret = secret_string("client-123".to_string());
        assert_eq!(secret.expose_secret().as_ref(), "client-123");
        assert!(!secret.expose_secret().is_empty());
    }

    #[test]
    fn test_secret_debug_redacted() {
        let secret = secret_string("sensitive-client-id".to_string());
        let debug_output = format!("{secret:?}");

        assert!(!debug_output.contains("sensitive-client-id"));
        assert!(debug_output.contains("REDACTED") || debug_output.contains("Secret"));
    }

    #[test]
    fn test_secret_roundtrips_through_toml() {
        #[derive(Serialize, Deserialize)]
        struct Section {
            client_id: SecretString,
        }

        let section: Section = toml::from_str("client_id = \"abc\"").unwrap();
        assert!(*section.client_id.expose_secret() == *"abc");

        let text = toml::to_string(&section).unwrap();
        assert!(text.contains("abc"));
    }
}
