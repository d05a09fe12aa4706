//! Type names and type unions used by `type` and `disallow`.

use std::fmt::{self, Display};

use serde_json::Value;

use crate::error::SchemaError;

use super::keyword::Keyword;

/// A primitive type name accepted by `type` and `disallow`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonType {
    String,
    Integer,
    Number,
    Boolean,
    Object,
    Array,
    Null,
    Any,
}

impl JsonType {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "string" => Some(JsonType::String),
            "integer" => Some(JsonType::Integer),
            "number" => Some(JsonType::Number),
            "boolean" => Some(JsonType::Boolean),
            "object" => Some(JsonType::Object),
            "array" => Some(JsonType::Array),
            "null" => Some(JsonType::Null),
            "any" => Some(JsonType::Any),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            JsonType::String => "string",
            JsonType::Integer => "integer",
            JsonType::Number => "number",
            JsonType::Boolean => "boolean",
            JsonType::Object => "object",
            JsonType::Array => "array",
            JsonType::Null => "null",
            JsonType::Any => "any",
        }
    }

    /// The most specific type describing a value.
    ///
    /// Numbers without a fractional encoding report `Integer`.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => JsonType::Null,
            Value::Bool(_) => JsonType::Boolean,
            Value::Number(n) if n.is_i64() || n.is_u64() => JsonType::Integer,
            Value::Number(_) => JsonType::Number,
            Value::String(_) => JsonType::String,
            Value::Array(_) => JsonType::Array,
            Value::Object(_) => JsonType::Object,
        }
    }

    pub fn matches(self, value: &Value) -> bool {
        match self {
            JsonType::Any => true,
            JsonType::Number => value.is_number(),
            other => Self::of(value) == other,
        }
    }
}

impl Display for JsonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One alternative inside a type union.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeEntry<'a> {
    Named(JsonType),
    /// A value matches when it validates cleanly against this schema.
    Schema(&'a Value),
}

/// The parsed value of a `type` or `disallow` keyword; never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeSpec<'a> {
    entries: Vec<TypeEntry<'a>>,
}

impl<'a> TypeSpec<'a> {
    /// Parses a type name, a schema object, or a non-empty array of either.
    pub fn parse(keyword: Keyword, value: &'a Value, field: &str) -> Result<Self, SchemaError> {
        let entries = match value {
            Value::Array(items) if items.is_empty() => {
                return Err(SchemaError::InvalidKeyword {
                    field: field.to_string(),
                    keyword: keyword.name(),
                    expected: "a type name, a schema, or a non-empty list of them",
                    found: "[]".to_string(),
                })
            }
            Value::Array(items) => items
                .iter()
                .map(|item| parse_entry(keyword, item, field))
                .collect::<Result<Vec<_>, _>>()?,
            single => vec![parse_entry(keyword, single, field)?],
        };

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[TypeEntry<'a>] {
        &self.entries
    }

    /// Human-readable form used in messages, e.g. `string` or `[string, null]`.
    pub fn describe(&self) -> String {
        let names: Vec<&str> = self
            .entries
            .iter()
            .map(|entry| match entry {
                TypeEntry::Named(t) => t.name(),
                TypeEntry::Schema(_) => "schema",
            })
            .collect();

        match names.as_slice() {
            [single] => single.to_string(),
            many => format!("[{}]", many.join(", ")),
        }
    }
}

fn parse_entry<'a>(
    keyword: Keyword,
    value: &'a Value,
    field: &str,
) -> Result<TypeEntry<'a>, SchemaError> {
    match value {
        Value::String(name) => JsonType::from_name(name)
            .map(TypeEntry::Named)
            .ok_or_else(|| SchemaError::UnknownType {
                field: field.to_string(),
                name: name.clone(),
            }),
        Value::Object(_) => Ok(TypeEntry::Schema(value)),
        other => Err(SchemaError::InvalidKeyword {
            field: field.to_string(),
            keyword: keyword.name(),
            expected: "a type name or a schema",
            found: other.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_integer_excludes_floats() {
        assert!(JsonType::Integer.matches(&json!(3)));
        assert!(JsonType::Integer.matches(&json!(-3)));
        assert!(!JsonType::Integer.matches(&json!(3.0)));
        assert!(!JsonType::Integer.matches(&json!(3.5)));
    }

    #[test]
    fn test_number_accepts_integers() {
        assert!(JsonType::Number.matches(&json!(3)));
        assert!(JsonType::Number.matches(&json!(3.5)));
        assert!(!JsonType::Number.matches(&json!("3")));
        assert!(!JsonType::Number.matches(&json!(true)));
    }

    #[test]
    fn test_any_matches_everything() {
        for value in [json!(null), json!(false), json!({}), json!([]), json!("")] {
            assert!(JsonType::Any.matches(&value));
        }
    }

    #[test]
    fn test_parse_union() {
        let value = json!(["string", "null", {"type": "integer"}]);
        let spec = TypeSpec::parse(Keyword::Type, &value, "(root)").unwrap();
        assert_eq!(spec.entries().len(), 3);
        assert_eq!(spec.describe(), "[string, null, schema]");
    }

    #[test]
    fn test_parse_rejects_unknown_name() {
        let value = json!("text");
        let err = TypeSpec::parse(Keyword::Type, &value, "name").unwrap_err();
        assert_eq!(
            err,
            SchemaError::UnknownType {
                field: "name".to_string(),
                name: "text".to_string()
            }
        );
    }

    #[test]
    fn test_parse_rejects_empty_and_non_names() {
        assert!(TypeSpec::parse(Keyword::Type, &json!([]), "x").is_err());
        assert!(TypeSpec::parse(Keyword::Disallow, &json!(5), "x").is_err());
        assert!(TypeSpec::parse(Keyword::Type, &json!(["string", 5]), "x").is_err());
    }
}
