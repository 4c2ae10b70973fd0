//! Error types for finweb-core
//!
//! The core has one domain error, `ValidationError`, raised when a
//! transaction amount is not strictly positive. `InvalidFormat` covers raw
//! form input that cannot be turned into a transaction at all.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Machine-readable error code, serialized in SCREAMING_SNAKE_CASE
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Input was well-formed but breaks a rule (amount must be positive)
    ValidationError,
    /// Input could not be read as a date, kind, category or amount
    InvalidFormat,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::InvalidFormat => "INVALID_FORMAT",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error body returned by the JSON API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ErrorDetails {
    pub fn new(code: ErrorCode, message: String) -> Self {
        Self { code, message, details: None, suggestions: Vec::new() }
    }

    pub fn with_detail(mut self, detail: serde_json::Value) -> Self {
        self.details = Some(detail);
        self
    }

    pub fn with_suggestion(mut self, suggestion: &str) -> Self {
        self.suggestions.push(suggestion.to_string());
        self
    }
}

impl fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(details) = &self.details {
            write!(f, " {}", details)?;
        }
        self.suggestions.iter().try_for_each(|s| write!(f, "\n  hint: {}", s))
    }
}

/// How loudly an error is logged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    Info,
    /// Request rejected, ledger untouched
    Warning,
    Error,
}

impl ErrorSeverity {
    pub fn level(&self) -> log::Level {
        match self {
            ErrorSeverity::Info => log::Level::Info,
            ErrorSeverity::Warning => log::Level::Warn,
            ErrorSeverity::Error => log::Level::Error,
        }
    }
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ErrorSeverity::Info => "info",
            ErrorSeverity::Warning => "warning",
            ErrorSeverity::Error => "error",
        })
    }
}

/// Main error type for finweb-core
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("{message}")]
    ValidationError { message: String },

    #[error("Invalid format: {message}")]
    InvalidFormat { message: String },
}

impl CoreError {
    /// The rejection raised for a non-positive amount
    pub fn non_positive_amount() -> Self {
        CoreError::ValidationError {
            message: "Amount must be positive".to_string(),
        }
    }

    /// The rejection raised when the ledger totals would exceed the decimal range
    pub fn amount_overflow() -> Self {
        CoreError::ValidationError {
            message: "Amount too large for this ledger".to_string(),
        }
    }

    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::ValidationError { .. } => ErrorCode::ValidationError,
            CoreError::InvalidFormat { .. } => ErrorCode::InvalidFormat,
        }
    }

    /// Get the severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CoreError::ValidationError { .. } => ErrorSeverity::Warning,
            CoreError::InvalidFormat { .. } => ErrorSeverity::Warning,
        }
    }

    /// Details for API responses
    pub fn to_details(&self) -> ErrorDetails {
        let details = ErrorDetails::new(self.code(), self.to_string());
        match self {
            CoreError::ValidationError { message } => {
                let suggestion = if *self == CoreError::amount_overflow() {
                    "Reset the session to start a new ledger"
                } else {
                    "Enter an amount greater than zero"
                };
                details
                    .with_detail(serde_json::json!({ "field": "amount", "reason": message }))
                    .with_suggestion(suggestion)
            }
            CoreError::InvalidFormat { message } => details
                .with_detail(serde_json::json!({ "reason": message }))
                .with_suggestion("Dates use YYYY-MM-DD and amounts are plain decimals such as 1500.50"),
        }
    }

    /// Log the error under the `finweb::error` target at a level matching its severity
    pub fn log(&self, operation: &str) {
        log::log!(
            target: "finweb::error",
            self.severity().level(),
            "[{}] {} - Operation: {}",
            self.code(),
            self,
            operation
        );
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;
