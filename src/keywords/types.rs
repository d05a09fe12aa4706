//! Violations for `type` and `disallow`. Matching itself needs the engine,
//! since union entries may be schemas.

use serde_json::Value;

use crate::error::FieldValidationError;
use crate::path::JsonPath;
use crate::schema::{JsonType, TypeSpec};

pub(crate) fn mismatch(value: &Value, spec: &TypeSpec<'_>, path: &JsonPath) -> FieldValidationError {
    let expected = spec.describe();
    FieldValidationError::new(
        path.clone(),
        format!(
            "value {} is not of type {} (found {})",
            value,
            expected,
            JsonType::of(value)
        ),
    )
    .with_code("invalid_type")
    .with_expected(expected)
    .with_value(value.clone())
}

pub(crate) fn disallowed(value: &Value, spec: &TypeSpec<'_>, path: &JsonPath) -> FieldValidationError {
    FieldValidationError::new(
        path.clone(),
        format!("value {} is of disallowed type {}", value, spec.describe()),
    )
    .with_code("disallowed_type")
    .with_expected(format!("not {}", spec.describe()))
    .with_value(value.clone())
}
