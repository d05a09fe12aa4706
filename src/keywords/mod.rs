//! Per-keyword evaluation rules.
//!
//! Each rule judges one data value against one keyword and yields at most one
//! [`FieldValidationError`]. Rules are pure and independent of each other; a
//! rule ignores values outside the JSON type it applies to (`minimum` skips
//! strings, `pattern` skips numbers, and so on). Recursion into children is
//! the engine's job, not theirs.

pub(crate) mod array;
pub(crate) mod numeric;
pub(crate) mod object;
pub(crate) mod string;
pub(crate) mod types;

use serde_json::Value;

use crate::error::FieldValidationError;
use crate::format::FormatRegistry;
use crate::path::JsonPath;
use crate::schema::Constraint;

/// Evaluates a non-recursive constraint.
///
/// Structural constraints (`properties`, `items`, `extends`, ...) are handled
/// by the engine and always pass here.
pub(crate) fn check(
    constraint: &Constraint<'_>,
    value: &Value,
    path: &JsonPath,
    formats: &FormatRegistry,
) -> Option<FieldValidationError> {
    match constraint {
        Constraint::NonBlank => string::non_blank(value, path),
        Constraint::Enum(options) => one_of(value, options, path),
        Constraint::Pattern { regex, source } => string::pattern(value, regex, source, path),
        Constraint::MinLength(min) => string::min_length(value, *min, path),
        Constraint::MaxLength(max) => string::max_length(value, *max, path),
        Constraint::Minimum { limit, exclusive } => numeric::minimum(value, *limit, *exclusive, path),
        Constraint::Maximum { limit, exclusive } => numeric::maximum(value, *limit, *exclusive, path),
        Constraint::DivisibleBy(divisor) => numeric::divisible_by(value, *divisor, path),
        Constraint::Format(name) => format(value, name, formats, path),
        Constraint::UniqueItems => array::unique_items(value, path),
        Constraint::MinItems(min) => array::min_items(value, *min, path),
        Constraint::MaxItems(max) => array::max_items(value, *max, path),
        Constraint::Extends(_)
        | Constraint::Type(_)
        | Constraint::Disallow(_)
        | Constraint::Properties(_)
        | Constraint::PatternProperties(_)
        | Constraint::AdditionalProperties(_)
        | Constraint::UnknownProperties
        | Constraint::Dependencies(_)
        | Constraint::Items(_)
        | Constraint::AdditionalItems(_) => None,
    }
}

fn one_of(value: &Value, options: &[Value], path: &JsonPath) -> Option<FieldValidationError> {
    if options.iter().any(|option| json_equal(value, option)) {
        return None;
    }

    let listed = Value::Array(options.to_vec());
    Some(
        FieldValidationError::new(
            path.clone(),
            format!("value {} is not in the enumeration {}", value, listed),
        )
        .with_code("enum")
        .with_expected(format!("one of {}", listed))
        .with_value(value.clone()),
    )
}

/// Unregistered format names are skipped.
fn format(
    value: &Value,
    name: &str,
    formats: &FormatRegistry,
    path: &JsonPath,
) -> Option<FieldValidationError> {
    let Some(validator) = formats.get(name) else {
        tracing::debug!(format = name, path = %path, "no validator registered for format, skipping");
        return None;
    };

    if validator.is_valid(value) {
        None
    } else {
        Some(
            FieldValidationError::new(
                path.clone(),
                format!("value {} does not match format '{}'", value, name),
            )
            .with_code("format")
            .with_expected(format!("{} value", name))
            .with_value(value.clone()),
        )
    }
}

/// Structural equality where numbers compare by value (`1 == 1.0`).
pub(crate) fn json_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_i64(), y.as_i64()) {
            (Some(i), Some(j)) => i == j,
            _ => match (x.as_u64(), y.as_u64()) {
                (Some(i), Some(j)) => i == j,
                _ => x.as_f64() == y.as_f64(),
            },
        },
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| json_equal(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(k, x)| ys.get(k).is_some_and(|y| json_equal(x, y)))
        }
        _ => a == b,
    }
}
