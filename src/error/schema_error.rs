//! Defects in the schema document itself.

use thiserror::Error;

/// The schema is malformed.
///
/// Raised as soon as a malformed node is reached, whatever the error
/// collection policy: it points at a mistake by whoever wrote the schema,
/// not at the data. `field` names the data location whose schema node was
/// being read (`(root)` for the top level).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    #[error("schema for field '{field}' must be an object, got {found}")]
    NotAnObject { field: String, found: &'static str },

    #[error("type '{name}' for field '{field}' is not supported")]
    UnknownType { field: String, name: String },

    #[error("'{keyword}' for field '{field}' must be {expected}, got {found}")]
    InvalidKeyword {
        field: String,
        keyword: &'static str,
        expected: &'static str,
        found: String,
    },

    #[error("'{keyword}' for field '{field}' has invalid regular expression '{pattern}': {reason}")]
    InvalidPattern {
        field: String,
        keyword: &'static str,
        pattern: String,
        reason: String,
    },

    #[error("the '{retired}' attribute has been replaced by '{replacement}'")]
    RetiredKeyword {
        retired: &'static str,
        replacement: &'static str,
    },
}

impl SchemaError {
    /// The schema keyword at fault, when a single keyword is to blame.
    pub fn keyword(&self) -> Option<&str> {
        match self {
            SchemaError::NotAnObject { .. } => None,
            SchemaError::UnknownType { .. } => Some("type"),
            SchemaError::InvalidKeyword { keyword, .. } => Some(keyword),
            SchemaError::InvalidPattern { keyword, .. } => Some(keyword),
            SchemaError::RetiredKeyword { retired, .. } => Some(retired),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_type_message() {
        let error = SchemaError::UnknownType {
            field: "(root)".to_string(),
            name: "strnig".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "type 'strnig' for field '(root)' is not supported"
        );
        assert_eq!(error.keyword(), Some("type"));
    }

    #[test]
    fn test_invalid_keyword_message() {
        let error = SchemaError::InvalidKeyword {
            field: "age".to_string(),
            keyword: "minimum",
            expected: "a number",
            found: "\"five\"".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "'minimum' for field 'age' must be a number, got \"five\""
        );
    }

    #[test]
    fn test_retired_keyword() {
        let error = SchemaError::RetiredKeyword {
            retired: "optional",
            replacement: "required",
        };
        assert!(error.to_string().contains("replaced by 'required'"));
        assert_eq!(error.keyword(), Some("optional"));
    }
}
