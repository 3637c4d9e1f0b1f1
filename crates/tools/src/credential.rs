//! Signing credentials.
//!
//! Manifests only ever name credentials by reference (`${PRIVATE_KEY}`); the
//! secret itself comes from the environment at load time and is held in a
//! [`PrivateKey`] backed by a [`SecretString`], which redacts itself in
//! debug output and is wiped from memory on drop.

use secrecy::{ExposeSecret, SecretString};
use serde::{Serialize, Serializer};
use std::fmt;
use zeroize::Zeroize;

use crate::error::ConfigError;

/// Length of a secp256k1 private key in bytes.
pub const PRIVATE_KEY_LEN: usize = 32;

const REDACTED: &str = "<redacted>";

/// A `${NAME}` reference to an environment variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialRef {
    variable: String,
}

impl CredentialRef {
    /// Parse a manifest account entry. Anything other than a well-formed
    /// `${NAME}` reference is treated as a literal secret and rejected.
    pub fn parse(network: &str, entry: &str) -> Result<Self, ConfigError> {
        let variable = entry
            .trim()
            .strip_prefix("${")
            .and_then(|rest| rest.strip_suffix('}'))
            .filter(|name| is_env_name(name))
            .ok_or_else(|| ConfigError::LiteralCredential {
                network: network.to_string(),
            })?;

        Ok(CredentialRef {
            variable: variable.to_string(),
        })
    }

    /// Reference to `variable`, rendered as `${variable}`.
    pub fn to_variable(variable: &str) -> String {
        format!("${{{variable}}}")
    }

    pub fn variable(&self) -> &str {
        &self.variable
    }
}

fn is_env_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Hex-encoded transaction signing key.
///
/// The value is only reachable through [`ExposeSecret`]; every other
/// rendering is redacted.
#[derive(Clone, Debug)]
pub struct PrivateKey(SecretString);

impl PrivateKey {
    /// Validate `value` as 32 bytes of hex, with or without a `0x` prefix.
    ///
    /// The returned error reason never contains the value itself.
    pub fn parse(value: String) -> Result<Self, String> {
        let secret = SecretString::from(value);
        let digits = hex_digits(secret.expose_secret());

        if digits.len() != PRIVATE_KEY_LEN * 2 {
            return Err(format!(
                "expected {} hex digits, found {}",
                PRIVATE_KEY_LEN * 2,
                digits.len()
            ));
        }

        let mut bytes = hex::decode(digits).map_err(|_| "contains non-hex characters".to_string())?;
        bytes.zeroize();

        Ok(PrivateKey(secret))
    }
}

fn hex_digits(value: &str) -> &str {
    value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value)
}

impl ExposeSecret<str> for PrivateKey {
    /// The key exactly as it was read from the environment.
    fn expose_secret(&self) -> &str {
        self.0.expose_secret()
    }
}

impl fmt::Display for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl Serialize for PrivateKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(REDACTED)
    }
}
