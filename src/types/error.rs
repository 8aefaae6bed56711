//! Error types for the customer onboarding client
//!
//! This module defines every error that can reach the boundary of the core.
//! Each error renders as a displayable message; screens show these strings
//! as-is or behind a panel-specific prefix.
//!
//! # Error Categories
//!
//! - **Validation failures**: local, raised before any request is issued
//! - **Not found**: the backend signalled that a record does not exist
//! - **Transport failures**: any other non-2xx status or network failure
//! - **Decoding, I/O and CSV errors**: malformed bodies and file handling
//! - **Aggregate failures**: dashboard statistics could not be computed

use super::criteria::CustomerField;
use thiserror::Error;

/// A single failed validation rule
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Field is empty after trimming
    #[error("{field} is required")]
    Required { field: CustomerField },

    /// Field does not look like `local@domain.tld`
    #[error("{field} must be a valid email address")]
    InvalidEmail { field: CustomerField },

    /// None of the fields in a group carries a value
    #[error("At least one of {} is required", join_fields(.fields))]
    AtLeastOneRequired { fields: Vec<CustomerField> },
}

fn join_fields(fields: &[CustomerField]) -> String {
    fields
        .iter()
        .map(CustomerField::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Every failed rule of one form, in evaluation order
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", .0.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))]
pub struct ValidationErrors(pub Vec<ValidationError>);

impl ValidationErrors {
    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }

    /// True when some rule failed for `field`
    pub fn has_field(&self, field: CustomerField) -> bool {
        self.0.iter().any(|error| match error {
            ValidationError::Required { field: f } | ValidationError::InvalidEmail { field: f } => {
                *f == field
            }
            ValidationError::AtLeastOneRequired { fields } => fields.contains(&field),
        })
    }
}

/// Main error type for the client core
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClientError {
    /// Local validation failed; nothing was sent
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// The backend reported that the requested record does not exist
    #[error("Server returned HTTP {status}: {status_text}")]
    NotFound {
        status: u16,
        status_text: String,
        /// URL of the failed request
        url: String,
    },

    /// Any other non-2xx status, or a network failure (status 0)
    #[error("Server returned HTTP {status}: {status_text}")]
    Transport { status: u16, status_text: String },

    /// Response body did not match the expected shape
    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    /// I/O error while reading or writing files
    #[error("I/O error: {message}")]
    Io { message: String },

    /// CSV error while reading seed data or writing output
    #[error("CSV error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    Csv { line: Option<u64>, message: String },

    /// Dashboard statistics could not be computed
    #[error("Failed to compute {statistic}: {message}")]
    Aggregate { statistic: String, message: String },
}

impl From<serde_json::Error> for ClientError {
    fn from(error: serde_json::Error) -> Self {
        ClientError::Decode {
            message: error.to_string(),
        }
    }
}

impl From<std::io::Error> for ClientError {
    fn from(error: std::io::Error) -> Self {
        ClientError::Io {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for ClientError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());
        ClientError::Csv {
            line,
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl ClientError {
    /// Create a NotFound error
    pub fn not_found(status: u16, status_text: &str, url: &str) -> Self {
        ClientError::NotFound {
            status,
            status_text: status_text.to_string(),
            url: url.to_string(),
        }
    }

    /// Create a Transport error
    pub fn transport(status: u16, status_text: &str) -> Self {
        ClientError::Transport {
            status,
            status_text: status_text.to_string(),
        }
    }

    /// Create an Aggregate error
    pub fn aggregate(statistic: &str, message: &str) -> Self {
        ClientError::Aggregate {
            statistic: statistic.to_string(),
            message: message.to_string(),
        }
    }

    /// Create a Validation error from a single failed rule
    pub fn validation(error: ValidationError) -> Self {
        ClientError::Validation(ValidationErrors(vec![error]))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ClientError::Validation(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::NotFound { .. })
    }

    /// HTTP status behind the error, if it came from a response
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::NotFound { status, .. } | ClientError::Transport { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }
}
