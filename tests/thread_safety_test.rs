//! A single validator shared across threads.

use conformist::{SchemaValidator, ValidationError};
use serde_json::{json, Value};
use std::sync::Arc;
use std::thread;

fn user_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "name": {"type": "string"},
            "age": {"type": "integer", "minimum": 0}
        }
    })
}

#[test]
fn test_concurrent_validation() {
    let validator = Arc::new(SchemaValidator::new().raise_at_first_error(false));
    let schema = Arc::new(user_schema());

    let handles: Vec<_> = (0..10)
        .map(|i| {
            let validator = Arc::clone(&validator);
            let schema = Arc::clone(&schema);
            thread::spawn(move || {
                let data = json!({"name": format!("User{}", i), "age": 20 + i});
                assert!(validator.validate(&data, &schema).is_ok());
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_concurrent_failures_do_not_share_state() {
    let validator = Arc::new(SchemaValidator::new().raise_at_first_error(false));
    let schema = Arc::new(user_schema());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let validator = Arc::clone(&validator);
            let schema = Arc::clone(&schema);
            thread::spawn(move || {
                // Even threads produce one violation, odd threads two.
                let data = if i % 2 == 0 {
                    json!({"name": "ok", "age": -1})
                } else {
                    json!({"name": 1, "age": -1})
                };
                let err = validator.validate(&data, &schema).unwrap_err();
                (i, err.violations().len())
            })
        })
        .collect();

    for handle in handles {
        let (i, count) = handle.join().unwrap();
        assert_eq!(count, if i % 2 == 0 { 1 } else { 2 });
    }
}

#[test]
fn test_scoped_threads_borrow_validator() {
    let validator = SchemaValidator::new().format("even", |v: &Value| {
        v.as_i64().is_some_and(|n| n % 2 == 0)
    });
    let schema = json!({"type": "integer", "format": "even"});

    thread::scope(|scope| {
        for n in 0..6 {
            let validator = &validator;
            let schema = &schema;
            scope.spawn(move || {
                let result = validator.validate(&json!(n), schema);
                assert_eq!(result.is_ok(), n % 2 == 0);
            });
        }
    });
}

#[test]
fn test_validate_batch() {
    let validator = SchemaValidator::new();
    let schema = user_schema();
    let documents: Vec<Value> = (0..100)
        .map(|i| json!({"name": "n", "age": if i % 10 == 0 { -1 } else { i }}))
        .collect();

    let results = validator.validate_batch(&documents, &schema);

    assert_eq!(results.len(), 100);
    for (i, result) in results.iter().enumerate() {
        match result {
            Ok(()) => assert_ne!(i % 10, 0),
            Err(ValidationError::Field(error)) => {
                assert_eq!(i % 10, 0);
                assert_eq!(error.path.to_string(), "age");
            }
            Err(other) => panic!("unexpected error: {:?}", other),
        }
    }
}
