//! Credential payload and its canonical JSON form
//!
//! The canonical JSON text is both the QR payload and the exported `.json`
//! file, so its shape is fixed: keys `NAME`, `SJ_API_KEY`, `SJ_SEC_KEY` in that
//! order, pretty-printed with two-space indentation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Validated credential record
///
/// Constructed by [`crate::form::CredentialForm::validate`]; fields hold the
/// trimmed user input.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialPayload {
    /// Display name of the user or application
    #[serde(rename = "NAME")]
    pub name: String,
    /// Shioaji API key
    #[serde(rename = "SJ_API_KEY")]
    pub api_key: String,
    /// Shioaji secret key
    #[serde(rename = "SJ_SEC_KEY")]
    pub secret_key: String,
}

impl CredentialPayload {
    /// Serialize into canonical JSON
    pub fn to_canonical_json(&self) -> CanonicalJson {
        build(&self.name, &self.api_key, &self.secret_key)
    }
}

impl fmt::Debug for CredentialPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialPayload")
            .field("name", &self.name)
            .field("api_key", &redacted(&self.api_key))
            .field("secret_key", &redacted(&self.secret_key))
            .finish()
    }
}

pub(crate) fn redacted(value: &str) -> String {
    format!("<redacted {} bytes>", value.len())
}

#[derive(Serialize)]
struct PayloadRef<'a> {
    #[serde(rename = "NAME")]
    name: &'a str,
    #[serde(rename = "SJ_API_KEY")]
    api_key: &'a str,
    #[serde(rename = "SJ_SEC_KEY")]
    secret_key: &'a str,
}

/// Build the canonical JSON document for the three credential fields.
///
/// Values are copied verbatim. Callers are expected to have validated them.
pub fn build(name: &str, api_key: &str, secret_key: &str) -> CanonicalJson {
    let view = PayloadRef {
        name,
        api_key,
        secret_key,
    };

    let text = serde_json::to_string_pretty(&view)
        .unwrap_or_else(|err| unreachable!("string-only payload failed to serialize: {err}"));

    CanonicalJson(text)
}

/// Deterministic JSON text of a [`CredentialPayload`]
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct CanonicalJson(String);

impl CanonicalJson {
    /// Borrow the JSON text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Raw bytes handed to the QR encoder
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Take ownership of the JSON text
    pub fn into_string(self) -> String {
        self.0
    }

    /// Parse the text back into a payload
    pub fn parse(&self) -> crate::Result<CredentialPayload> {
        Ok(serde_json::from_str(&self.0)?)
    }
}

impl fmt::Display for CanonicalJson {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for CanonicalJson {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CanonicalJson({})", redacted(&self.0))
    }
}

impl AsRef<[u8]> for CanonicalJson {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}
