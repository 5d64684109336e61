//! Typed error handling for the dashboard layer
//!
//! Every failure the layer can produce is one of four categories:
//!
//! - [`ApiError`]: transport failures, server rejections, missing records and
//!   undecodable responses coming back from the backend
//! - [`ValidationError`]: client-side draft checks, caught before any request
//! - [`ConfigError`]: configuration parsing and validation
//! - [`FormError`]: misuse of a form controller (submitting twice, submitting
//!   a closed form)
//!
//! All of them are wrapped by [`TavolaError`]. Views never let these escape as
//! panics: they turn them into a displayed message through `Display`.
//!
//! # Example
//!
//! ```rust,ignore
//! match store.delete(7).await {
//!     Ok(()) => {}
//!     Err(ApiError::NotFound { path }) => println!("{} is already gone", path),
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use serde::Serialize;
use thiserror::Error;

/// Result alias for backend calls
pub type ApiResult<T> = Result<T, ApiError>;

/// The main error type for the crate
#[derive(Debug, Error)]
pub enum TavolaError {
    /// Backend errors (transport, rejection, not found, decoding)
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Draft validation errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Form controller state errors
    #[error(transparent)]
    Form(#[from] FormError),
}

impl TavolaError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            TavolaError::Api(e) => e.error_code(),
            TavolaError::Validation(_) => "VALIDATION_ERROR",
            TavolaError::Config(_) => "CONFIG_ERROR",
            TavolaError::Form(e) => e.error_code(),
        }
    }

    /// Whether the error was caught locally, before any request was issued
    pub fn is_local(&self) -> bool {
        !matches!(self, TavolaError::Api(_))
    }
}

// =============================================================================
// API Errors
// =============================================================================

/// Errors coming back from the backend
///
/// The views do not distinguish these for the user; every variant is shown
/// as its `Display` text. The variants exist so callers and logs can.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The request never produced a response (connection refused, timeout, ...)
    #[error("{method} {path} failed: {message}")]
    Transport {
        method: String,
        path: String,
        message: String,
    },

    /// The backend answered 404
    #[error("{path} not found")]
    NotFound { path: String },

    /// The backend answered with any other non-success status
    #[error("{method} {path} rejected ({status}): {message}")]
    Rejected {
        method: String,
        path: String,
        status: u16,
        message: String,
    },

    /// The response body did not match the expected shape
    #[error("failed to decode response from {path}: {message}")]
    Decode { path: String, message: String },
}

impl ApiError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Transport { .. } => "API_TRANSPORT_ERROR",
            ApiError::NotFound { .. } => "API_NOT_FOUND",
            ApiError::Rejected { .. } => "API_REJECTED",
            ApiError::Decode { .. } => "API_DECODE_ERROR",
        }
    }

    /// HTTP status attached to the error, if the backend answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::NotFound { .. } => Some(404),
            ApiError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// A single field validation error
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

impl FieldValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Errors raised while checking a draft before submission
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// One or more fields failed their checks
    #[error("Please fill in all required fields: {}", join_fields(.0))]
    FieldErrors(Vec<FieldValidationError>),
}

fn join_fields(errors: &[FieldValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join(", ")
}

impl ValidationError {
    /// The individual field errors
    pub fn fields(&self) -> &[FieldValidationError] {
        match self {
            ValidationError::FieldErrors(errors) => errors,
        }
    }

    /// Whether a given field is among the failures
    pub fn has_field(&self, field: &str) -> bool {
        self.fields().iter().any(|e| e.field == field)
    }
}

impl From<validator::ValidationErrors> for ValidationError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<FieldValidationError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                let field = field.to_string();
                errs.iter().map(move |err| {
                    let message = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| err.code.to_string());
                    FieldValidationError::new(field.clone(), message)
                })
            })
            .collect();
        // HashMap order is unspecified
        fields.sort_by(|a, b| a.field.cmp(&b.field));
        ValidationError::FieldErrors(fields)
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration file
    #[error("Failed to parse config{}: {message}", .file.as_ref().map(|f| format!(" file '{}'", f)).unwrap_or_default())]
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// Invalid value in configuration
    #[error("Invalid value '{value}' for field '{field}': {message}")]
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    /// IO error while reading configuration
    #[error("IO error: {message}")]
    IoError { message: String },
}

// =============================================================================
// Form Errors
// =============================================================================

/// Errors related to form controller state
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// A submission of this form is still in flight
    #[error("A submission is already in progress")]
    Busy,

    /// Submit was called with no open draft
    #[error("The form is not open")]
    Closed,
}

impl FormError {
    pub fn error_code(&self) -> &'static str {
        match self {
            FormError::Busy => "FORM_BUSY",
            FormError::Closed => "FORM_CLOSED",
        }
    }
}
