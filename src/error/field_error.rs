//! Data violations.
//!
//! [`FieldValidationError`] describes one value failing one constraint;
//! [`FieldsValidationError`] is the non-empty list reported in collect-all
//! mode.

use std::fmt::{self, Display};

use serde_json::Value;
use stillwater::prelude::*;

use crate::path::JsonPath;

/// A single constraint violation.
///
/// - **path**: where in the document the offending value lives
/// - **message**: human-readable description
/// - **code**: machine-readable keyword identifier (e.g. `min_length`)
/// - **expected**: what the constraint asked for, when that is meaningful
/// - **value**: the offending value, absent for missing properties
///
/// # Example
///
/// ```rust
/// use conformist::{FieldValidationError, JsonPath};
/// use serde_json::json;
///
/// let error = FieldValidationError::new(
///     JsonPath::root().push_field("age"),
///     "value 3 is less than minimum value 5",
/// )
/// .with_code("minimum")
/// .with_expected("value >= 5")
/// .with_value(json!(3));
///
/// assert_eq!(error.code, "minimum");
/// assert_eq!(error.to_string(), "age: value 3 is less than minimum value 5 (expected: value >= 5)");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FieldValidationError {
    pub path: JsonPath,
    pub message: String,
    /// Defaults to `validation_error`.
    pub code: String,
    pub expected: Option<String>,
    pub value: Option<Value>,
}

impl FieldValidationError {
    pub fn new(path: JsonPath, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
            code: "validation_error".to_string(),
            expected: None,
            value: None,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    pub fn with_expected(mut self, expected: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self
    }

    pub fn with_value(mut self, value: Value) -> Self {
        self.value = Some(value);
        self
    }

    /// Name of the property (or array position) the violation was found at.
    pub fn field(&self) -> String {
        match self.path.last() {
            Some(segment) => match segment.as_field() {
                Some(name) => name.to_string(),
                None => self.path.to_string(),
            },
            None => "(root)".to_string(),
        }
    }
}

impl Display for FieldValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_root() {
            write!(f, "(root): {}", self.message)?;
        } else {
            write!(f, "{}: {}", self.path, self.message)?;
        }

        if let Some(ref expected) = self.expected {
            write!(f, " (expected: {})", expected)?;
        }

        Ok(())
    }
}

impl std::error::Error for FieldValidationError {}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<FieldValidationError>();
    assert_sync::<FieldValidationError>();
};

/// Every violation found by a collect-all traversal, in traversal order.
///
/// Backed by a `NonEmptyVec`, so an empty accumulator can never be turned
/// into one of these. Sets from independent traversals merge through
/// [`Semigroup`]:
///
/// ```rust
/// use conformist::{FieldValidationError, FieldsValidationError, JsonPath};
/// use stillwater::prelude::*;
///
/// let a = FieldsValidationError::single(
///     FieldValidationError::new(JsonPath::root().push_field("a"), "too small"),
/// );
/// let b = FieldsValidationError::single(
///     FieldValidationError::new(JsonPath::root().push_field("b"), "too short"),
/// );
///
/// assert_eq!(a.combine(b).len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FieldsValidationError(NonEmptyVec<FieldValidationError>);

impl FieldsValidationError {
    pub fn single(error: FieldValidationError) -> Self {
        Self(NonEmptyVec::singleton(error))
    }

    pub fn from_non_empty(errors: NonEmptyVec<FieldValidationError>) -> Self {
        Self(errors)
    }

    /// Wraps an accumulator, or returns `None` when nothing was reported.
    pub fn try_from_vec(errors: Vec<FieldValidationError>) -> Option<Self> {
        NonEmptyVec::from_vec(errors).map(Self)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldValidationError> {
        self.0.iter()
    }

    /// The violation reported first during traversal.
    pub fn first(&self) -> &FieldValidationError {
        self.0.head()
    }

    pub fn at_path(&self, path: &JsonPath) -> Vec<&FieldValidationError> {
        self.0.iter().filter(|e| &e.path == path).collect()
    }

    pub fn with_code(&self, code: &str) -> Vec<&FieldValidationError> {
        self.0.iter().filter(|e| e.code == code).collect()
    }

    pub fn into_vec(self) -> Vec<FieldValidationError> {
        self.0.into_vec()
    }

    pub fn as_non_empty_vec(&self) -> &NonEmptyVec<FieldValidationError> {
        &self.0
    }
}

impl Semigroup for FieldsValidationError {
    fn combine(self, other: Self) -> Self {
        FieldsValidationError(self.0.combine(other.0))
    }
}

impl Display for FieldsValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "validation failed with {} error(s):", self.len())?;
        for (i, error) in self.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for FieldsValidationError {}

impl IntoIterator for FieldsValidationError {
    type Item = FieldValidationError;
    type IntoIter = std::vec::IntoIter<FieldValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

impl<'a> IntoIterator for &'a FieldsValidationError {
    type Item = &'a FieldValidationError;
    type IntoIter = Box<dyn Iterator<Item = &'a FieldValidationError> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.0.iter())
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<FieldsValidationError>();
    assert_sync::<FieldsValidationError>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn violation(field: &str, code: &str) -> FieldValidationError {
        FieldValidationError::new(JsonPath::root().push_field(field), format!("{} failed", code))
            .with_code(code)
    }

    #[test]
    fn test_field_error_defaults() {
        let error = FieldValidationError::new(JsonPath::root(), "bad");
        assert_eq!(error.code, "validation_error");
        assert!(error.expected.is_none());
        assert!(error.value.is_none());
        assert_eq!(error.field(), "(root)");
    }

    #[test]
    fn test_field_error_builder() {
        let error = FieldValidationError::new(JsonPath::root().push_field("n"), "too big")
            .with_code("maximum")
            .with_expected("value <= 3")
            .with_value(json!(9));

        assert_eq!(error.code, "maximum");
        assert_eq!(error.expected.as_deref(), Some("value <= 3"));
        assert_eq!(error.value, Some(json!(9)));
        assert_eq!(error.field(), "n");
    }

    #[test]
    fn test_field_of_index_path() {
        let error = FieldValidationError::new(JsonPath::root().push_field("tags").push_index(1), "x");
        assert_eq!(error.field(), "tags[1]");
    }

    #[test]
    fn test_display_root() {
        let error = FieldValidationError::new(JsonPath::root(), "value is null");
        assert_eq!(error.to_string(), "(root): value is null");
    }

    #[test]
    fn test_try_from_empty_vec() {
        assert!(FieldsValidationError::try_from_vec(Vec::new()).is_none());
    }

    #[test]
    fn test_fields_error_queries() {
        let errors = FieldsValidationError::try_from_vec(vec![
            violation("a", "required"),
            violation("a", "invalid_type"),
            violation("b", "required"),
        ])
        .unwrap();

        assert_eq!(errors.len(), 3);
        assert!(!errors.is_empty());
        assert_eq!(errors.first().code, "required");
        assert_eq!(errors.at_path(&JsonPath::root().push_field("a")).len(), 2);
        assert_eq!(errors.with_code("required").len(), 2);
    }

    #[test]
    fn test_combine_keeps_order() {
        let left = FieldsValidationError::single(violation("a", "x"));
        let right = FieldsValidationError::single(violation("b", "y"));

        let paths: Vec<String> = left
            .combine(right)
            .into_iter()
            .map(|e| e.path.to_string())
            .collect();
        assert_eq!(paths, vec!["a", "b"]);
    }

    #[test]
    fn test_fields_display() {
        let errors = FieldsValidationError::single(violation("name", "required"));
        let display = errors.to_string();
        assert!(display.contains("1 error(s)"));
        assert!(display.contains("name: required failed"));
    }
}
