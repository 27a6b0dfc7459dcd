//! Error types for g4fire configuration.
//!
//! All errors are strongly typed using thiserror. Every validation error
//! points at a bug in the configuration code that produced it; none of them
//! are retryable.

use thiserror::Error;

use crate::kind::ConfigKind;
use crate::value::ValueKind;

/// Validation errors raised while building or mutating configuration objects.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A write named a key the object was not built with.
    #[error("'{type_name}' does not have a parameter named '{key}'")]
    SchemaViolation {
        /// Declared type of the rejecting object.
        type_name: String,
        /// The unknown key.
        key: String,
    },

    /// A write carried a value of a different kind than the stored one.
    #[error("parameter '{key}' is of type {expected} and not {received}")]
    TypeMismatch {
        /// The parameter written.
        key: String,
        /// Kind of the stored value.
        expected: ValueKind,
        /// Kind of the rejected value.
        received: ValueKind,
    },

    /// A key was declared twice at construction.
    #[error("parameter '{key}' is declared more than once")]
    DuplicateKey {
        /// The repeated key.
        key: String,
    },

    /// A class name is not a `::`-separated identifier path.
    #[error("'{class_name}' is not a valid native class name")]
    InvalidClassName {
        /// The rejected name.
        class_name: String,
    },

    /// A required field is absent or blank.
    #[error("Required field '{field}' is missing")]
    MissingField {
        /// Name of the missing field.
        field: String,
    },

    /// A field is present but not acceptable here.
    #[error("Invalid field '{field}': {reason}")]
    InvalidField {
        /// Name of the offending field.
        field: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A configuration of one kind was placed where another was expected.
    #[error("'{slot}' expects a {expected} configuration, got {received}")]
    WrongKind {
        /// The simulator slot, e.g. `detector`.
        slot: String,
        /// Kind the slot accepts.
        expected: ConfigKind,
        /// Kind that was offered.
        received: ConfigKind,
    },

    /// A macro command touches something the simulator manages itself.
    #[error("command '{command}' is not allowed because the simulator handles '{reserved}' itself")]
    ForbiddenCommand {
        /// The full command.
        command: String,
        /// The reserved prefix it matched.
        reserved: String,
    },

    /// An override value has no parameter counterpart.
    #[error("parameter '{key}' has an unsupported value: {reason}")]
    UnsupportedValue {
        /// The parameter the value was meant for.
        key: String,
        /// Why it cannot be converted.
        reason: String,
    },
}

/// Top-level error type for g4fire configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A validation failure.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Reading an override file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// An override file is not valid TOML.
    #[error("Invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    /// An override document is not valid JSON.
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConfigError {
    /// Returns true if this is a validation error.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns true if a write named a parameter outside the schema.
    #[must_use]
    pub const fn is_schema_violation(&self) -> bool {
        matches!(self, Self::Validation(ValidationError::SchemaViolation { .. }))
    }

    /// Returns true if a write carried a value of the wrong kind.
    #[must_use]
    pub const fn is_type_mismatch(&self) -> bool {
        matches!(self, Self::Validation(ValidationError::TypeMismatch { .. }))
    }

    /// Returns the underlying validation error, if any.
    #[must_use]
    pub const fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(e) => Some(e),
            _ => None,
        }
    }
}

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
