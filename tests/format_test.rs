//! Integration tests for the `format` keyword and custom format validators.

use conformist::{validate, validate_with, FormatRegistry, SchemaValidator, ValidatorConfig};
use serde_json::{json, Value};

#[test]
fn test_builtin_formats() {
    let cases = [
        ("date-time", json!("2024-05-01T08:00:00Z"), json!("2024-05-01T08:00:00")),
        ("date", json!("2024-05-01"), json!("01/05/2024")),
        ("time", json!("08:00:00"), json!("8am")),
        ("ip-address", json!("10.0.0.1"), json!("10.0.0")),
    ];

    for (name, good, bad) in cases {
        let schema = json!({"type": "string", "format": name});
        assert!(validate(&good, &schema).is_ok(), "{} should accept {}", name, good);

        let err = validate(&bad, &schema).unwrap_err();
        assert_eq!(err.violations()[0].code, "format", "{} should reject {}", name, bad);
    }

    let schema = json!({"type": "number", "format": "utc-millisec"});
    assert!(validate(&json!(1700000000000u64), &schema).is_ok());
    assert!(validate(&json!(-5), &schema).is_err());
}

#[test]
fn test_unknown_format_is_ignored() {
    let schema = json!({"type": "string", "format": "color"});
    assert!(validate(&json!("definitely not a color"), &schema).is_ok());
}

#[test]
fn test_custom_format() {
    let validator = SchemaValidator::new().format("sku", |v: &Value| {
        v.as_str()
            .is_some_and(|s| s.len() == 6 && s.starts_with("SKU"))
    });
    let schema = json!({"type": "string", "format": "sku"});

    assert!(validator.validate(&json!("SKU123"), &schema).is_ok());

    let err = validator.validate(&json!("ABC123"), &schema).unwrap_err();
    let violation = err.violations()[0];
    assert_eq!(violation.code, "format");
    assert_eq!(violation.message, "value \"ABC123\" does not match format 'sku'");
}

#[test]
fn test_custom_format_overrides_builtin() {
    let validator = SchemaValidator::new().format("date", |v: &Value| v == "today");
    let schema = json!({"type": "string", "format": "date"});

    assert!(validator.validate(&json!("today"), &schema).is_ok());
    assert!(validator.validate(&json!("2024-05-01"), &schema).is_err());
}

#[test]
fn test_replacing_registry_drops_builtins() {
    let validator = SchemaValidator::new().with_format_registry(FormatRegistry::empty());
    let schema = json!({"type": "string", "format": "date"});
    assert!(validator.validate(&json!("not a date"), &schema).is_ok());
}

#[test]
fn test_validate_with_merges_over_builtins() {
    let formats = FormatRegistry::empty().register("upper", |v: &Value| {
        v.as_str().is_some_and(|s| s.chars().all(|c| c.is_ascii_uppercase()))
    });
    let schema = json!({
        "type": "object",
        "properties": {
            "code": {"type": "string", "format": "upper"},
            "day": {"type": "string", "format": "date"}
        }
    });
    let config = ValidatorConfig {
        raise_at_first_error: false,
        ..ValidatorConfig::default()
    };

    let err = validate_with(&json!({"code": "abc", "day": "soon"}), &schema, &config, &formats)
        .unwrap_err();
    let paths: Vec<String> = err.violations().iter().map(|e| e.path.to_string()).collect();
    assert_eq!(paths, vec!["code", "day"]);
}

#[test]
fn test_format_not_run_on_wrong_type() {
    let validator = SchemaValidator::new()
        .raise_at_first_error(false)
        .format("never", |_: &Value| false);
    let schema = json!({"type": "string", "format": "never"});

    let err = validator.validate(&json!(12), &schema).unwrap_err();
    let codes: Vec<&str> = err.violations().iter().map(|e| e.code.as_str()).collect();
    assert_eq!(codes, vec!["invalid_type"]);
}

#[test]
fn test_utc_millisec_rejects_non_numbers_without_type() {
    let schema = json!({"format": "utc-millisec"});
    assert!(validate(&json!(1_700_000_000_000_i64), &schema).is_ok());
    assert!(validate(&json!(1.5), &schema).is_ok());

    let err = validate(&json!("1700000000000"), &schema).unwrap_err();
    assert_eq!(err.violations()[0].code, "format");

    // String formats leave other JSON types alone.
    assert!(validate(&json!(20240501), &json!({"format": "date"})).is_ok());
}
