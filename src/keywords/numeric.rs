//! Numeric rules: `minimum`, `maximum` (with exclusivity) and `divisibleBy`.

use serde_json::{Number, Value};

use crate::error::FieldValidationError;
use crate::path::JsonPath;

pub(crate) fn minimum(
    value: &Value,
    limit: f64,
    exclusive: bool,
    path: &JsonPath,
) -> Option<FieldValidationError> {
    let n = value.as_f64()?;
    let (violated, relation, expected) = if exclusive {
        (n <= limit, "less than or equal to", format!("value > {}", limit))
    } else {
        (n < limit, "less than", format!("value >= {}", limit))
    };

    violated.then(|| {
        FieldValidationError::new(
            path.clone(),
            format!("value {} is {} minimum value {}", value, relation, limit),
        )
        .with_code("minimum")
        .with_expected(expected)
        .with_value(value.clone())
    })
}

pub(crate) fn maximum(
    value: &Value,
    limit: f64,
    exclusive: bool,
    path: &JsonPath,
) -> Option<FieldValidationError> {
    let n = value.as_f64()?;
    let (violated, relation, expected) = if exclusive {
        (n >= limit, "greater than or equal to", format!("value < {}", limit))
    } else {
        (n > limit, "greater than", format!("value <= {}", limit))
    };

    violated.then(|| {
        FieldValidationError::new(
            path.clone(),
            format!("value {} is {} maximum value {}", value, relation, limit),
        )
        .with_code("maximum")
        .with_expected(expected)
        .with_value(value.clone())
    })
}

pub(crate) fn divisible_by(value: &Value, divisor: f64, path: &JsonPath) -> Option<FieldValidationError> {
    let Value::Number(n) = value else {
        return None;
    };
    if is_multiple(n, divisor) {
        return None;
    }

    Some(
        FieldValidationError::new(
            path.clone(),
            format!("value {} is not divisible by {}", value, divisor),
        )
        .with_code("divisible_by")
        .with_expected(format!("multiple of {}", divisor))
        .with_value(value.clone()),
    )
}

/// Integers divide exactly; anything else tolerates float rounding.
///
/// `i64::MAX as f64` rounds up to 2^63, which does not fit an `i64`, so the
/// bound is strict.
fn is_multiple(n: &Number, divisor: f64) -> bool {
    if let Some(i) = n.as_i64() {
        if divisor.fract() == 0.0 && divisor < i64::MAX as f64 {
            return i % (divisor as i64) == 0;
        }
    }

    let Some(x) = n.as_f64() else {
        return false;
    };
    let quotient = x / divisor;
    (quotient - quotient.round()).abs() <= 1e-9 * quotient.abs().max(1.0)
}
