//! Error types for sjqr operations

use std::fmt;
use thiserror::Error;

/// Result type alias using sjqr's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for sjqr operations
#[derive(Error, Debug)]
pub enum Error {
    /// A single form field failed validation
    #[error("Invalid {field}: {reason}")]
    Validation {
        /// Field that failed
        field: Field,
        /// Human readable reason
        reason: String,
    },

    /// Several form fields failed validation at once
    #[error("Invalid form: {}", join_field_errors(.0))]
    InvalidForm(Vec<FieldError>),

    /// The QR encoder rejected the payload (e.g. too long for EC level M)
    #[error("Failed to encode QR code: {0}")]
    EncodingFailed(#[from] qrcode::types::QrError),

    /// A drawing surface could not be allocated
    #[error("Render surface unavailable: {0}")]
    RenderSurfaceUnavailable(String),

    /// Writing the canonical JSON to the clipboard failed
    #[error("Clipboard write failed: {0}")]
    ClipboardWriteFailed(String),

    /// Saving an artifact failed
    #[error("Export failed: {0}")]
    ExportFailed(String),

    /// An operation required a generated result but none exists yet
    #[error("Nothing has been generated yet")]
    NothingGenerated,

    /// Image processing error
    #[error("Image processing error: {0}")]
    Image(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// Form field identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Display name of the user or application
    Name,
    /// `SJ_API_KEY`
    ApiKey,
    /// `SJ_SEC_KEY`
    SecretKey,
}

impl Field {
    /// Label shown to the user for this field
    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "NAME",
            Field::ApiKey => "SJ_API_KEY",
            Field::SecretKey => "SJ_SEC_KEY",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A validation failure attached to one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Field that failed
    pub field: Field,
    /// Human readable reason
    pub reason: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

impl From<FieldError> for Error {
    fn from(e: FieldError) -> Self {
        Error::Validation {
            field: e.field,
            reason: e.reason,
        }
    }
}

fn join_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl Error {
    /// Per-field failures carried by a validation error, if any
    pub fn field_errors(&self) -> Vec<FieldError> {
        match self {
            Error::Validation { field, reason } => vec![FieldError {
                field: *field,
                reason: reason.clone(),
            }],
            Error::InvalidForm(errors) => errors.clone(),
            _ => Vec::new(),
        }
    }
}

impl From<image::ImageError> for Error {
    fn from(e: image::ImageError) -> Self {
        Error::Image(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Other(format!("JSON error: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_form_lists_every_field() {
        let err = Error::InvalidForm(vec![
            FieldError {
                field: Field::Name,
                reason: "must not be empty".to_string(),
            },
            FieldError {
                field: Field::SecretKey,
                reason: "must be at most 256 characters".to_string(),
            },
        ]);

        let message = err.to_string();
        assert!(message.contains("NAME: must not be empty"));
        assert!(message.contains("SJ_SEC_KEY: must be at most 256 characters"));
        assert_eq!(err.field_errors().len(), 2);
    }

    #[test]
    fn test_field_error_converts_to_validation() {
        let err: Error = FieldError {
            field: Field::ApiKey,
            reason: "must not be empty".to_string(),
        }
        .into();
        assert!(matches!(err, Error::Validation { field: Field::ApiKey, .. }));
    }
}
