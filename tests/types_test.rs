//! Integration tests for `type` and `disallow`, including union types.

use conformist::{validate, SchemaValidator};
use serde_json::{json, Value};

#[test]
fn test_each_named_type() {
    let cases: Vec<(&str, Value, Value)> = vec![
        ("string", json!("x"), json!(1)),
        ("number", json!(1.5), json!("1.5")),
        ("integer", json!(2), json!(2.5)),
        ("boolean", json!(false), json!(0)),
        ("object", json!({}), json!([])),
        ("array", json!([]), json!({})),
        ("null", json!(null), json!(false)),
    ];

    for (name, good, bad) in cases {
        let schema = json!({"type": name, "blank": true});
        assert!(validate(&good, &schema).is_ok(), "{} should accept {}", name, good);
        assert!(validate(&bad, &schema).is_err(), "{} should reject {}", name, bad);
    }
}

#[test]
fn test_any_accepts_everything() {
    let schema = json!({"type": "any"});
    for value in [json!(null), json!(1), json!("a"), json!([]), json!({})] {
        assert!(validate(&value, &schema).is_ok());
    }
}

#[test]
fn test_missing_type_accepts_everything() {
    let schema = json!({});
    for value in [json!(null), json!(1), json!("a"), json!([1]), json!({"a": 1})] {
        assert!(validate(&value, &schema).is_ok());
    }
}

#[test]
fn test_union_of_names() {
    let schema = json!({"type": ["string", "null"]});
    assert!(validate(&json!(null), &schema).is_ok());
    assert!(validate(&json!("a"), &schema).is_ok());

    let err = validate(&json!(1), &schema).unwrap_err();
    let violation = err.violations()[0];
    assert_eq!(violation.code, "invalid_type");
    assert_eq!(violation.expected.as_deref(), Some("[string, null]"));
}

#[test]
fn test_union_with_schemas() {
    let schema = json!({
        "type": [
            {"type": "object", "properties": {"kind": {"enum": ["circle"]}, "r": {"type": "number"}}},
            {"type": "object", "properties": {"kind": {"enum": ["square"]}, "side": {"type": "number"}}}
        ]
    });
    assert!(validate(&json!({"kind": "circle", "r": 1}), &schema).is_ok());
    assert!(validate(&json!({"kind": "square", "side": 2}), &schema).is_ok());
    assert!(validate(&json!({"kind": "square", "r": 2}), &schema).is_err());
}

#[test]
fn test_union_reports_one_error_in_collect_all() {
    let schema = json!({"type": [{"type": "integer"}, {"type": "boolean"}]});
    let err = SchemaValidator::new()
        .raise_at_first_error(false)
        .validate(&json!("x"), &schema)
        .unwrap_err();
    assert_eq!(err.violations().len(), 1);
}

#[test]
fn test_disallow() {
    let schema = json!({"disallow": ["null", "boolean"]});
    assert!(validate(&json!(1), &schema).is_ok());

    let err = validate(&json!(true), &schema).unwrap_err();
    assert_eq!(err.violations()[0].code, "disallowed_type");

    let schema = json!({"disallow": {"type": "string", "maxLength": 1}});
    assert!(validate(&json!("long"), &schema).is_ok());
    assert!(validate(&json!("s"), &schema).is_err());
}
