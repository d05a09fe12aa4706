//! Schema documents and their typed representation.
//!
//! Schemas arrive as plain `serde_json::Value` trees. Each object node is
//! parsed on demand into a [`SchemaNode`]: a shape-checked, ordered list of
//! [`Constraint`]s that the engine evaluates against one data value.
//!
//! # Example
//!
//! ```rust
//! use conformist::{Constraint, JsonPath, SchemaNode, ValidatorConfig};
//! use serde_json::json;
//!
//! let schema = json!({"type": "string", "maxLength": 8, "blank": true});
//! let node = SchemaNode::parse(&schema, &ValidatorConfig::default(), &JsonPath::root()).unwrap();
//!
//! assert!(matches!(node.constraints()[0], Constraint::Type(_)));
//! assert!(matches!(node.constraints()[1], Constraint::MaxLength(8)));
//! ```

mod keyword;
mod node;
mod types;

pub use keyword::Keyword;
pub(crate) use node::check_tree;
pub use node::{Additional, Constraint, Dependency, Items, PatternSchema, SchemaNode};
pub use types::{JsonType, TypeEntry, TypeSpec};
