//! Error types produced by validation.
//!
//! Data problems are reported as [`FieldValidationError`] (one violation) or
//! [`FieldsValidationError`] (every violation found in collect-all mode).
//! Problems with the schema document itself are a [`SchemaError`]. The
//! [`ValidationError`] enum is what the top-level entry points return.

mod field_error;
mod schema_error;
mod validation_error;

pub use field_error::{FieldValidationError, FieldsValidationError};
pub use schema_error::SchemaError;
pub use validation_error::ValidationError;
