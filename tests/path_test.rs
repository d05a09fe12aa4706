//! Integration tests for JsonPath.

use conformist::{JsonPath, PathSegment};

#[test]
fn test_root_path_displays_empty() {
    let path = JsonPath::root();
    assert!(path.is_root());
    assert_eq!(path.to_string(), "");
}

#[test]
fn test_mixed_segments() {
    let path = JsonPath::root()
        .push_field("orders")
        .push_index(0)
        .push_field("items")
        .push_index(2)
        .push_field("sku");

    assert_eq!(path.to_string(), "orders[0].items[2].sku");
    assert_eq!(path.len(), 5);
    assert_eq!(path.last(), Some(&PathSegment::Field("sku".to_string())));
}

#[test]
fn test_push_does_not_mutate() {
    let base = JsonPath::root().push_field("a");
    let child = base.push_field("b");

    assert_eq!(base.to_string(), "a");
    assert_eq!(child.to_string(), "a.b");
    assert_eq!(child.parent(), Some(base));
}

#[test]
fn test_keys_with_separators_are_bracketed() {
    let path = JsonPath::root().push_field("a.b").push_field("c");
    assert_eq!(path.to_string(), "[\"a.b\"].c");
}

#[test]
fn test_from_segments() {
    let path = JsonPath::from_segments(vec![PathSegment::from("list"), PathSegment::from(3usize)]);
    assert_eq!(path.to_string(), "list[3]");
    let segments: Vec<&PathSegment> = path.segments().collect();
    assert_eq!(segments[0].as_field(), Some("list"));
    assert_eq!(segments[1].as_index(), Some(3));
}
