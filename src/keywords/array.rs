//! Array rules: `uniqueItems`, `minItems`, `maxItems`, and the violation for
//! surplus elements under a tuple `items`.

use serde_json::Value;

use crate::error::FieldValidationError;
use crate::path::JsonPath;

use super::json_equal;

pub(crate) fn unique_items(value: &Value, path: &JsonPath) -> Option<FieldValidationError> {
    let items = value.as_array()?;
    let duplicate = items
        .iter()
        .enumerate()
        .find_map(|(i, item)| items[i + 1..].iter().find(|other| json_equal(item, other)))?;

    Some(
        FieldValidationError::new(
            path.clone(),
            format!("value {} contains duplicate item {}", value, duplicate),
        )
        .with_code("unique_items")
        .with_expected("all items distinct")
        .with_value(value.clone()),
    )
}

pub(crate) fn min_items(value: &Value, min: u64, path: &JsonPath) -> Option<FieldValidationError> {
    let len = value.as_array()?.len() as u64;
    if len >= min {
        return None;
    }

    Some(
        FieldValidationError::new(
            path.clone(),
            format!("array must have at least {} items, got {}", min, len),
        )
        .with_code("min_items")
        .with_expected(format!("at least {} items", min))
        .with_value(value.clone()),
    )
}

pub(crate) fn max_items(value: &Value, max: u64, path: &JsonPath) -> Option<FieldValidationError> {
    let len = value.as_array()?.len() as u64;
    if len <= max {
        return None;
    }

    Some(
        FieldValidationError::new(
            path.clone(),
            format!("array must have at most {} items, got {}", max, len),
        )
        .with_code("max_items")
        .with_expected(format!("at most {} items", max))
        .with_value(value.clone()),
    )
}

pub(crate) fn additional_items(
    len: usize,
    declared: usize,
    value: &Value,
    path: &JsonPath,
) -> FieldValidationError {
    FieldValidationError::new(
        path.clone(),
        format!(
            "array has {} items but its item schemas only allow {}",
            len, declared
        ),
    )
    .with_code("additional_items")
    .with_expected(format!("at most {} items", declared))
    .with_value(value.clone())
}
