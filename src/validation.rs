//! Validator configuration and the public validation entry points.
//!
//! A [`SchemaValidator`] bundles an immutable [`ValidatorConfig`] with a
//! [`FormatRegistry`]. It holds no per-call state, so one instance can be
//! shared by reference across threads; every call to
//! [`SchemaValidator::validate`] allocates its own error accumulator.

use rayon::prelude::*;
use serde_json::Value;
use stillwater::Validation;

use crate::engine::Traversal;
use crate::error::{FieldsValidationError, SchemaError, ValidationError};
use crate::format::{FormatRegistry, FormatValidator};
use crate::path::JsonPath;
use crate::schema::check_tree;

/// Policy switches fixed when a validator is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatorConfig {
    /// Properties whose schema has no `required` flag must be present.
    pub required_by_default: bool,
    /// Empty strings satisfy schemas that have no `blank` flag.
    pub blank_by_default: bool,
    /// Keys not covered by `properties`, `patternProperties` or
    /// `additionalProperties` are violations.
    pub disallow_unknown_properties: bool,
    /// Stop at the first violation instead of collecting all of them.
    pub raise_at_first_error: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            required_by_default: true,
            blank_by_default: false,
            disallow_unknown_properties: false,
            raise_at_first_error: true,
        }
    }
}

/// Validates data documents against schema documents.
///
/// # Example
///
/// ```rust
/// use conformist::SchemaValidator;
/// use serde_json::json;
///
/// let schema = json!({
///     "type": "object",
///     "properties": {
///         "a": {"type": "integer", "minimum": 5},
///         "b": {"type": "string", "minLength": 3}
///     }
/// });
///
/// let validator = SchemaValidator::new().raise_at_first_error(false);
///
/// assert!(validator.validate(&json!({"a": 7, "b": "xyz"}), &schema).is_ok());
///
/// let err = validator.validate(&json!({"a": 1, "b": "x"}), &schema).unwrap_err();
/// assert_eq!(err.violations().len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SchemaValidator {
    config: ValidatorConfig,
    formats: FormatRegistry,
}

impl SchemaValidator {
    /// A validator with the default configuration and the built-in formats.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ValidatorConfig) -> Self {
        Self {
            config,
            formats: FormatRegistry::new(),
        }
    }

    pub fn required_by_default(mut self, required: bool) -> Self {
        self.config.required_by_default = required;
        self
    }

    pub fn blank_by_default(mut self, blank: bool) -> Self {
        self.config.blank_by_default = blank;
        self
    }

    pub fn disallow_unknown_properties(mut self, disallow: bool) -> Self {
        self.config.disallow_unknown_properties = disallow;
        self
    }

    pub fn raise_at_first_error(mut self, raise: bool) -> Self {
        self.config.raise_at_first_error = raise;
        self
    }

    /// Registers a format validator, replacing any existing one of that name.
    ///
    /// ```rust
    /// use conformist::SchemaValidator;
    /// use serde_json::{json, Value};
    ///
    /// let validator = SchemaValidator::new()
    ///     .format("even", |v: &Value| v.as_i64().is_some_and(|n| n % 2 == 0));
    ///
    /// let schema = json!({"type": "integer", "format": "even"});
    /// assert!(validator.validate(&json!(4), &schema).is_ok());
    /// assert!(validator.validate(&json!(5), &schema).is_err());
    /// ```
    pub fn format<V>(mut self, name: impl Into<String>, validator: V) -> Self
    where
        V: FormatValidator + 'static,
    {
        self.formats = self.formats.register(name, validator);
        self
    }

    /// Merges a registry into this validator's formats; entries in
    /// `registry` win over existing ones with the same name.
    pub fn formats(mut self, registry: FormatRegistry) -> Self {
        self.formats = self.formats.merge(registry);
        self
    }

    /// Replaces the format registry outright, dropping the built-ins.
    pub fn with_format_registry(mut self, registry: FormatRegistry) -> Self {
        self.formats = registry;
        self
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    pub fn format_registry(&self) -> &FormatRegistry {
        &self.formats
    }

    /// Checks that `schema` and every schema nested in it are well formed,
    /// without judging any data.
    ///
    /// # Errors
    ///
    /// Returns the [`SchemaError`] for the first malformed schema node found.
    pub fn check_schema(&self, schema: &Value) -> Result<(), SchemaError> {
        check_tree(schema, &self.config, &JsonPath::root())
    }

    /// Validates `data` against `schema`, separating schema defects from
    /// data violations.
    ///
    /// The outer `Result` fails only when the schema is malformed. The inner
    /// `Validation` holds the data verdict: in first-error mode a failure
    /// carries exactly one violation, in collect-all mode every violation in
    /// traversal order.
    ///
    /// # Errors
    ///
    /// Returns the [`SchemaError`] for the first malformed schema node reached.
    pub fn check(
        &self,
        data: &Value,
        schema: &Value,
    ) -> Result<Validation<(), FieldsValidationError>, SchemaError> {
        tracing::debug!(
            collect_all = !self.config.raise_at_first_error,
            "validating document"
        );

        let errors = Traversal::new(&self.config, &self.formats).run(data, schema)?;

        Ok(match FieldsValidationError::try_from_vec(errors) {
            Some(errors) => {
                tracing::debug!(violations = errors.len(), "document rejected");
                Validation::Failure(errors)
            }
            None => Validation::Success(()),
        })
    }

    /// Validates `data` against `schema`.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::Schema`] when the schema is malformed
    /// - [`ValidationError::Field`] for the first violation in first-error mode
    /// - [`ValidationError::Fields`] for all violations in collect-all mode
    pub fn validate(&self, data: &Value, schema: &Value) -> Result<(), ValidationError> {
        match self.check(data, schema)? {
            Validation::Success(()) => Ok(()),
            Validation::Failure(errors) if self.config.raise_at_first_error => {
                Err(ValidationError::Field(errors.first().clone()))
            }
            Validation::Failure(errors) => Err(ValidationError::Fields(errors)),
        }
    }

    /// Validates many documents against one schema in parallel.
    ///
    /// Results are returned in the order of `documents`.
    pub fn validate_batch(
        &self,
        documents: &[Value],
        schema: &Value,
    ) -> Vec<Result<(), ValidationError>> {
        documents
            .par_iter()
            .map(|document| self.validate(document, schema))
            .collect()
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<SchemaValidator>();
    assert_sync::<SchemaValidator>();
};
