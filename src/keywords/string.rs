//! String rules: `blank`, `pattern`, `minLength`, `maxLength`.
//!
//! `minLength`/`maxLength` also bound the element count of arrays. String
//! lengths count characters, not bytes.

use regex::Regex;
use serde_json::Value;

use crate::error::FieldValidationError;
use crate::path::JsonPath;

pub(crate) fn non_blank(value: &Value, path: &JsonPath) -> Option<FieldValidationError> {
    match value {
        Value::String(s) if s.is_empty() => Some(
            FieldValidationError::new(path.clone(), "value cannot be blank")
                .with_code("blank")
                .with_expected("non-empty string")
                .with_value(value.clone()),
        ),
        _ => None,
    }
}

pub(crate) fn pattern(
    value: &Value,
    regex: &Regex,
    source: &str,
    path: &JsonPath,
) -> Option<FieldValidationError> {
    let s = value.as_str()?;
    if regex.is_match(s) {
        return None;
    }

    Some(
        FieldValidationError::new(
            path.clone(),
            format!("value {} does not match pattern '{}'", value, source),
        )
        .with_code("pattern")
        .with_expected(format!("string matching '{}'", source))
        .with_value(value.clone()),
    )
}

pub(crate) fn min_length(value: &Value, min: u64, path: &JsonPath) -> Option<FieldValidationError> {
    let (len, unit) = measure(value)?;
    if len >= min {
        return None;
    }

    Some(
        FieldValidationError::new(
            path.clone(),
            format!("length must be at least {}, got {}", min, len),
        )
        .with_code("min_length")
        .with_expected(format!("at least {} {}", min, unit))
        .with_value(value.clone()),
    )
}

pub(crate) fn max_length(value: &Value, max: u64, path: &JsonPath) -> Option<FieldValidationError> {
    let (len, unit) = measure(value)?;
    if len <= max {
        return None;
    }

    Some(
        FieldValidationError::new(
            path.clone(),
            format!("length must be at most {}, got {}", max, len),
        )
        .with_code("max_length")
        .with_expected(format!("at most {} {}", max, unit))
        .with_value(value.clone()),
    )
}

fn measure(value: &Value) -> Option<(u64, &'static str)> {
    match value {
        Value::String(s) => Some((s.chars().count() as u64, "characters")),
        Value::Array(items) => Some((items.len() as u64, "items")),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn anchored(source: &str) -> Regex {
        Regex::new(&format!("^(?:{})", source)).unwrap()
    }

    #[test]
    fn test_non_blank_only_rejects_empty_strings() {
        let path = JsonPath::root();
        assert!(non_blank(&json!("x"), &path).is_none());
        assert!(non_blank(&json!(" "), &path).is_none());
        assert!(non_blank(&json!(null), &path).is_none());
        assert!(non_blank(&json!([]), &path).is_none());

        let error = non_blank(&json!(""), &path).unwrap();
        assert_eq!(error.code, "blank");
    }

    #[test]
    fn test_pattern_anchors_at_start() {
        let regex = anchored(r"\d+");
        let path = JsonPath::root();

        assert!(pattern(&json!("123abc"), &regex, r"\d+", &path).is_none());
        let error = pattern(&json!("abc123"), &regex, r"\d+", &path).unwrap();
        assert_eq!(error.code, "pattern");
        assert!(error.message.contains(r"\d+"));
    }

    #[test]
    fn test_pattern_ignores_non_strings() {
        let regex = anchored("a");
        assert!(pattern(&json!(5), &regex, "a", &JsonPath::root()).is_none());
    }

    #[test]
    fn test_min_length_counts_characters() {
        let path = JsonPath::root().push_field("name");
        assert!(min_length(&json!("日本語"), 3, &path).is_none());

        let error = min_length(&json!("🎉🎊"), 3, &path).unwrap();
        assert_eq!(error.code, "min_length");
        assert_eq!(error.message, "length must be at least 3, got 2");
        assert_eq!(error.expected.as_deref(), Some("at least 3 characters"));
    }

    #[test]
    fn test_max_length_applies_to_arrays() {
        let path = JsonPath::root();
        assert!(max_length(&json!([1, 2]), 2, &path).is_none());

        let error = max_length(&json!([1, 2, 3]), 2, &path).unwrap();
        assert_eq!(error.code, "max_length");
        assert_eq!(error.expected.as_deref(), Some("at most 2 items"));
    }

    #[test]
    fn test_lengths_ignore_other_types() {
        assert!(min_length(&json!(1), 5, &JsonPath::root()).is_none());
        assert!(max_length(&json!({"a": 1}), 0, &JsonPath::root()).is_none());
    }
}
