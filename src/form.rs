//! Form-layer validation for the three credential fields

use crate::error::{Error, Field, FieldError, Result};
use crate::payload::{CredentialPayload, redacted};
use std::fmt;

/// Maximum length of the display name, in characters
pub const NAME_MAX_CHARS: usize = 120;

/// Maximum length of either key, in characters
pub const KEY_MAX_CHARS: usize = 256;

/// Raw, unvalidated form input
#[derive(Clone, Default)]
pub struct CredentialForm {
    /// Display name as typed
    pub name: String,
    /// API key as typed
    pub api_key: String,
    /// Secret key as typed
    pub secret_key: String,
}

impl CredentialForm {
    /// Create a form from the three raw inputs
    pub fn new(
        name: impl Into<String>,
        api_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            api_key: api_key.into(),
            secret_key: secret_key.into(),
        }
    }

    /// Trim and bounds-check every field.
    ///
    /// All failing fields are reported together. The returned payload carries
    /// the trimmed values.
    pub fn validate(&self) -> Result<CredentialPayload> {
        let name = check_field(Field::Name, &self.name, NAME_MAX_CHARS);
        let api_key = check_field(Field::ApiKey, &self.api_key, KEY_MAX_CHARS);
        let secret_key = check_field(Field::SecretKey, &self.secret_key, KEY_MAX_CHARS);

        match (name, api_key, secret_key) {
            (Ok(name), Ok(api_key), Ok(secret_key)) => Ok(CredentialPayload {
                name,
                api_key,
                secret_key,
            }),
            (name, api_key, secret_key) => {
                let mut errors: Vec<FieldError> = [name.err(), api_key.err(), secret_key.err()]
                    .into_iter()
                    .flatten()
                    .collect();

                if errors.len() == 1 {
                    Err(errors.remove(0).into())
                } else {
                    Err(Error::InvalidForm(errors))
                }
            }
        }
    }
}

fn check_field(field: Field, raw: &str, max_chars: usize) -> std::result::Result<String, FieldError> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(FieldError {
            field,
            reason: "must not be empty".to_string(),
        });
    }

    let chars = trimmed.chars().count();
    if chars > max_chars {
        return Err(FieldError {
            field,
            reason: format!("must be at most {max_chars} characters (got {chars})"),
        });
    }

    Ok(trimmed.to_string())
}

impl fmt::Debug for CredentialForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialForm")
            .field("name", &self.name)
            .field("api_key", &redacted(&self.api_key))
            .field("secret_key", &redacted(&self.secret_key))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_trims_values() {
        let payload = CredentialForm::new("  Team A ", "\tABC123\n", " XYZ789")
            .validate()
            .unwrap();
        assert_eq!(payload.name, "Team A");
        assert_eq!(payload.api_key, "ABC123");
        assert_eq!(payload.secret_key, "XYZ789");
    }

    #[test]
    fn test_validate_rejects_blank_field() {
        let err = CredentialForm::new("Team A", "   ", "XYZ789")
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Validation {
                field: Field::ApiKey,
                ..
            }
        ));
    }

    #[test]
    fn test_validate_reports_all_fields() {
        let err = CredentialForm::default().validate().unwrap_err();
        let fields: Vec<Field> = err.field_errors().iter().map(|e| e.field).collect();
        assert_eq!(fields, [Field::Name, Field::ApiKey, Field::SecretKey]);
    }

    #[test]
    fn test_length_limits_count_characters() {
        let name = "名".repeat(NAME_MAX_CHARS);
        assert!(CredentialForm::new(name, "k", "s").validate().is_ok());

        let too_long = "n".repeat(NAME_MAX_CHARS + 1);
        assert!(CredentialForm::new(too_long, "k", "s").validate().is_err());

        let key = "k".repeat(KEY_MAX_CHARS);
        assert!(CredentialForm::new("n", key.clone(), key).validate().is_ok());

        let long_key = "k".repeat(KEY_MAX_CHARS + 1);
        let err = CredentialForm::new("n", "k", long_key).validate().unwrap_err();
        assert!(matches!(
            err,
            Error::Validation {
                field: Field::SecretKey,
                ..
            }
        ));
    }

    #[test]
    fn test_limit_applies_after_trimming() {
        let padded = format!("  {}  ", "n".repeat(NAME_MAX_CHARS));
        assert!(CredentialForm::new(padded, "k", "s").validate().is_ok());
    }
}
