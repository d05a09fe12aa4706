//! The error returned by the validation entry points.

use thiserror::Error;

use super::{FieldValidationError, FieldsValidationError, SchemaError};

/// Why a document was not accepted.
///
/// `Field` is returned in first-error mode, `Fields` in collect-all mode.
/// `Schema` is returned in either mode when the schema is malformed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error(transparent)]
    Field(FieldValidationError),

    #[error(transparent)]
    Fields(FieldsValidationError),

    #[error("invalid schema: {0}")]
    Schema(#[from] SchemaError),
}

impl ValidationError {
    pub fn is_schema_error(&self) -> bool {
        matches!(self, ValidationError::Schema(_))
    }

    /// The data violations carried by this error; empty for schema errors.
    pub fn violations(&self) -> Vec<&FieldValidationError> {
        match self {
            ValidationError::Field(error) => vec![error],
            ValidationError::Fields(errors) => errors.iter().collect(),
            ValidationError::Schema(_) => Vec::new(),
        }
    }

    pub fn as_schema_error(&self) -> Option<&SchemaError> {
        match self {
            ValidationError::Schema(error) => Some(error),
            _ => None,
        }
    }
}

impl From<FieldValidationError> for ValidationError {
    fn from(error: FieldValidationError) -> Self {
        ValidationError::Field(error)
    }
}

impl From<FieldsValidationError> for ValidationError {
    fn from(errors: FieldsValidationError) -> Self {
        ValidationError::Fields(errors)
    }
}
