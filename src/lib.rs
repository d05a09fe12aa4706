//! # Conformist
//!
//! Judges whether a decoded JSON document conforms to a draft-03 style
//! schema, reporting where and why it does not.
//!
//! ## Overview
//!
//! Data and schema are both `serde_json::Value` trees. The engine walks them
//! in lock-step, parsing each schema node as it is reached, and either stops
//! at the first violation or collects every violation in the document,
//! depending on configuration. A malformed schema is always reported
//! separately from bad data.
//!
//! ## Core Types
//!
//! - [`SchemaValidator`]: configuration plus format registry; entry point
//! - [`ValidatorConfig`]: `required_by_default`, `blank_by_default`,
//!   `disallow_unknown_properties`, `raise_at_first_error`
//! - [`FormatRegistry`]: named predicates for the `format` keyword
//! - [`ValidationError`]: [`FieldValidationError`], [`FieldsValidationError`]
//!   or [`SchemaError`]
//! - [`JsonPath`]: location of a violation (e.g. `items[2].sku`)
//!
//! ## Example
//!
//! ```rust
//! use conformist::{validate, ValidationError};
//! use serde_json::json;
//!
//! let schema = json!({
//!     "type": "object",
//!     "properties": {"name": {"type": "string", "required": true}}
//! });
//!
//! assert!(validate(&json!({"name": "Bob"}), &schema).is_ok());
//!
//! match validate(&json!({}), &schema) {
//!     Err(ValidationError::Field(error)) => {
//!         assert_eq!(error.path.to_string(), "name");
//!         assert_eq!(error.code, "required");
//!     }
//!     other => panic!("unexpected result: {:?}", other),
//! }
//! ```

mod engine;
pub mod error;
pub mod format;
mod keywords;
pub mod path;
pub mod schema;
pub mod validation;

use serde_json::Value;

pub use error::{FieldValidationError, FieldsValidationError, SchemaError, ValidationError};
pub use format::{FormatRegistry, FormatValidator};
pub use path::{JsonPath, PathSegment};
pub use schema::{Constraint, JsonType, Keyword, SchemaNode, TypeSpec};
pub use validation::{SchemaValidator, ValidatorConfig};

/// Type alias for the collect-all verdict returned by [`SchemaValidator::check`].
pub type ValidationResult<T> = stillwater::Validation<T, FieldsValidationError>;

/// Validates `data` against `schema` with the default configuration and the
/// built-in formats.
///
/// # Errors
///
/// See [`SchemaValidator::validate`].
pub fn validate(data: &Value, schema: &Value) -> Result<(), ValidationError> {
    SchemaValidator::new().validate(data, schema)
}

/// Validates with an explicit configuration and format registry.
///
/// `formats` is merged over the built-in formats.
///
/// # Errors
///
/// See [`SchemaValidator::validate`].
pub fn validate_with(
    data: &Value,
    schema: &Value,
    config: &ValidatorConfig,
    formats: &FormatRegistry,
) -> Result<(), ValidationError> {
    SchemaValidator::with_config(*config)
        .formats(formats.clone())
        .validate(data, schema)
}
