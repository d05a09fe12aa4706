//! Object rules: missing required properties, unknown properties and
//! unmet dependencies. Whether these apply is decided by the engine.

use crate::error::FieldValidationError;
use crate::path::JsonPath;

/// A required property is absent; `path` is the property's own path.
pub(crate) fn missing(path: &JsonPath) -> FieldValidationError {
    let name = match path.last().and_then(|segment| segment.as_field()) {
        Some(name) => name.to_string(),
        None => path.to_string(),
    };

    FieldValidationError::new(path.clone(), format!("required field '{}' is missing", name))
        .with_code("required")
        .with_expected("value")
}

/// `key` is not allowed on the object at `path`.
pub(crate) fn unknown_property(key: &str, path: &JsonPath) -> FieldValidationError {
    FieldValidationError::new(path.push_field(key), format!("unknown field '{}'", key))
        .with_code("additional_property")
}

/// `name` is present but `dependency` is not; reported at the object's path.
pub(crate) fn missing_dependency(name: &str, dependency: &str, path: &JsonPath) -> FieldValidationError {
    FieldValidationError::new(
        path.clone(),
        format!("field '{}' is required by field '{}'", dependency, name),
    )
    .with_code("dependency")
    .with_expected(format!("'{}' present", dependency))
}
