//! Typed view of one schema object.
//!
//! [`SchemaNode::parse`] checks the shape of every recognised keyword and
//! turns the node into an ordered list of [`Constraint`]s. The order of that
//! list is the evaluation order used by the engine: parents from `extends`
//! first, then `type`, then everything whose meaning depends on the type,
//! and finally the keywords that recurse into children.

use regex::Regex;
use serde_json::{Map, Value};

use crate::error::SchemaError;
use crate::path::JsonPath;
use crate::validation::ValidatorConfig;

use super::keyword::Keyword;
use super::types::{JsonType, TypeEntry, TypeSpec};

/// What to do with object keys or array elements not otherwise described.
#[derive(Debug, Clone, PartialEq)]
pub enum Additional<'a> {
    Allowed,
    Forbidden,
    Schema(&'a Value),
}

/// The parsed value of `items`.
#[derive(Debug, Clone, PartialEq)]
pub enum Items<'a> {
    /// Every element validates against the same schema.
    Uniform(&'a Value),
    /// Element `i` validates against schema `i`.
    Tuple(&'a [Value]),
}

/// One entry of `dependencies`.
#[derive(Debug, Clone, PartialEq)]
pub enum Dependency<'a> {
    /// These properties must also be present.
    Fields(Vec<&'a str>),
    /// The whole object must also satisfy this schema.
    Schema(&'a Value),
}

/// A `patternProperties` entry.
#[derive(Debug, Clone)]
pub struct PatternSchema<'a> {
    pub regex: Regex,
    pub source: &'a str,
    pub schema: &'a Value,
}

/// A single check to run against a value.
#[derive(Debug, Clone)]
pub enum Constraint<'a> {
    Extends(Vec<&'a Value>),
    Type(TypeSpec<'a>),
    Disallow(TypeSpec<'a>),
    /// Present when `blank` resolved to false.
    NonBlank,
    Enum(&'a [Value]),
    Pattern { regex: Regex, source: &'a str },
    MinLength(u64),
    MaxLength(u64),
    Minimum { limit: f64, exclusive: bool },
    Maximum { limit: f64, exclusive: bool },
    DivisibleBy(f64),
    Format(&'a str),
    UniqueItems,
    MinItems(u64),
    MaxItems(u64),
    Properties(&'a Map<String, Value>),
    PatternProperties(Vec<PatternSchema<'a>>),
    AdditionalProperties(Additional<'a>),
    /// Keys undeclared by the node and its `extends` parents are violations.
    /// Added when unknown properties are disallowed and no
    /// `additionalProperties` is given.
    UnknownProperties,
    Dependencies(Vec<(&'a str, Dependency<'a>)>),
    Items(Items<'a>),
    AdditionalItems(Additional<'a>),
}

/// A schema object resolved against the validator configuration.
#[derive(Debug, Clone)]
pub struct SchemaNode<'a> {
    required: bool,
    constraints: Vec<Constraint<'a>>,
}

impl<'a> SchemaNode<'a> {
    /// Parses the schema node governing the value at `path`.
    ///
    /// `required` and `blank` fall back to the configured defaults. When
    /// unknown properties are disallowed, a node that declares properties
    /// but says nothing about `additionalProperties` forbids them.
    ///
    /// # Errors
    ///
    /// Returns a [`SchemaError`] for the first malformed keyword found.
    ///
    /// # Example
    ///
    /// ```rust
    /// use conformist::{JsonPath, SchemaNode, ValidatorConfig};
    /// use serde_json::json;
    ///
    /// let schema = json!({"type": "integer", "minimum": 5});
    /// let node = SchemaNode::parse(&schema, &ValidatorConfig::default(), &JsonPath::root()).unwrap();
    /// assert!(node.is_required());
    /// // type, the implicit non-blank check, minimum
    /// assert_eq!(node.constraints().len(), 3);
    ///
    /// let bad = json!({"type": "text"});
    /// assert!(SchemaNode::parse(&bad, &ValidatorConfig::default(), &JsonPath::root()).is_err());
    /// ```
    pub fn parse(
        schema: &'a Value,
        config: &ValidatorConfig,
        path: &JsonPath,
    ) -> Result<Self, SchemaError> {
        let field = field_label(path);
        let map = schema.as_object().ok_or_else(|| SchemaError::NotAnObject {
            field: field.clone(),
            found: JsonType::of(schema).name(),
        })?;

        let mut draft = Draft::default();
        for (key, value) in map {
            if let Some(keyword) = Keyword::from_name(key) {
                draft.accept(keyword, value, &field)?;
            }
        }

        Ok(draft.finish(config))
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn constraints(&self) -> &[Constraint<'a>] {
        &self.constraints
    }

    /// True when `key` is named by `properties` or matched by `patternProperties`.
    pub fn declares(&self, key: &str) -> bool {
        self.constraints.iter().any(|c| match c {
            Constraint::Properties(props) => props.contains_key(key),
            Constraint::PatternProperties(patterns) => {
                patterns.iter().any(|p| p.regex.is_match(key))
            }
            _ => false,
        })
    }

    /// True when the node sets `additionalProperties` explicitly.
    pub fn has_additional_properties(&self) -> bool {
        self.constraints
            .iter()
            .any(|c| matches!(c, Constraint::AdditionalProperties(_)))
    }

    /// Parent schemas named by `extends`, in declaration order.
    pub fn parents(&self) -> &[&'a Value] {
        self.constraints
            .iter()
            .find_map(|c| match c {
                Constraint::Extends(parents) => Some(parents.as_slice()),
                _ => None,
            })
            .unwrap_or(&[])
    }

    /// Number of positional schemas when `items` is a tuple.
    pub fn tuple_len(&self) -> Option<usize> {
        self.constraints.iter().find_map(|c| match c {
            Constraint::Items(Items::Tuple(schemas)) => Some(schemas.len()),
            _ => None,
        })
    }
}

/// Parses `schema` and every schema nested in it.
///
/// Runs before any data is judged, so a malformed schema is rejected no
/// matter which parts of it a given document would reach. `path` follows
/// the data location each nested schema governs; element schemas are
/// labelled with their first index.
pub fn check_tree(schema: &Value, config: &ValidatorConfig, path: &JsonPath) -> Result<(), SchemaError> {
    let node = SchemaNode::parse(schema, config, path)?;

    for constraint in node.constraints() {
        match constraint {
            Constraint::Extends(parents) => {
                for parent in parents {
                    check_tree(parent, config, path)?;
                }
            }
            Constraint::Type(spec) | Constraint::Disallow(spec) => {
                for entry in spec.entries() {
                    if let TypeEntry::Schema(subschema) = entry {
                        check_tree(subschema, config, path)?;
                    }
                }
            }
            Constraint::Properties(props) => {
                for (name, subschema) in props.iter() {
                    check_tree(subschema, config, &path.push_field(name))?;
                }
            }
            Constraint::PatternProperties(patterns) => {
                for pattern in patterns {
                    check_tree(pattern.schema, config, &path.push_field(pattern.source))?;
                }
            }
            Constraint::AdditionalProperties(Additional::Schema(subschema)) => {
                check_tree(subschema, config, path)?
            }
            Constraint::Dependencies(deps) => {
                for (_, dependency) in deps {
                    if let Dependency::Schema(subschema) = dependency {
                        check_tree(subschema, config, path)?;
                    }
                }
            }
            Constraint::Items(Items::Uniform(subschema)) => {
                check_tree(subschema, config, &path.push_index(0))?
            }
            Constraint::Items(Items::Tuple(subschemas)) => {
                for (i, subschema) in subschemas.iter().enumerate() {
                    check_tree(subschema, config, &path.push_index(i))?;
                }
            }
            Constraint::AdditionalItems(Additional::Schema(subschema)) => {
                let first = node.tuple_len().unwrap_or(0);
                check_tree(subschema, config, &path.push_index(first))?
            }
            _ => {}
        }
    }

    Ok(())
}

/// Label used for the data location in messages.
fn field_label(path: &JsonPath) -> String {
    if path.is_root() {
        "(root)".to_string()
    } else {
        path.to_string()
    }
}

/// Keyword values collected before they are ordered into constraints.
#[derive(Default)]
struct Draft<'a> {
    required: Option<bool>,
    blank: Option<bool>,
    extends: Option<Vec<&'a Value>>,
    types: Option<TypeSpec<'a>>,
    disallow: Option<TypeSpec<'a>>,
    enumeration: Option<&'a [Value]>,
    pattern: Option<(Regex, &'a str)>,
    min_length: Option<u64>,
    max_length: Option<u64>,
    minimum: Option<f64>,
    maximum: Option<f64>,
    exclusive_minimum: bool,
    exclusive_maximum: bool,
    divisible_by: Option<f64>,
    format: Option<&'a str>,
    unique_items: bool,
    min_items: Option<u64>,
    max_items: Option<u64>,
    properties: Option<&'a Map<String, Value>>,
    pattern_properties: Option<Vec<PatternSchema<'a>>>,
    additional_properties: Option<Additional<'a>>,
    dependencies: Option<Vec<(&'a str, Dependency<'a>)>>,
    items: Option<Items<'a>>,
    additional_items: Option<Additional<'a>>,
}

impl<'a> Draft<'a> {
    fn accept(&mut self, keyword: Keyword, value: &'a Value, field: &str) -> Result<(), SchemaError> {
        let invalid = |expected: &'static str| SchemaError::InvalidKeyword {
            field: field.to_string(),
            keyword: keyword.name(),
            expected,
            found: value.to_string(),
        };

        match keyword {
            Keyword::Optional => {
                return Err(SchemaError::RetiredKeyword {
                    retired: "optional",
                    replacement: "required",
                })
            }
            Keyword::Requires => {
                return Err(SchemaError::RetiredKeyword {
                    retired: "requires",
                    replacement: "dependencies",
                })
            }
            Keyword::Type => self.types = Some(TypeSpec::parse(keyword, value, field)?),
            Keyword::Disallow => self.disallow = Some(TypeSpec::parse(keyword, value, field)?),
            Keyword::Required => {
                self.required = Some(value.as_bool().ok_or_else(|| invalid("a boolean"))?)
            }
            Keyword::Blank => {
                self.blank = Some(value.as_bool().ok_or_else(|| invalid("a boolean"))?)
            }
            Keyword::Enum => {
                let options = value.as_array().ok_or_else(|| invalid("a list"))?;
                self.enumeration = Some(options.as_slice());
            }
            Keyword::Pattern => {
                let source = value.as_str().ok_or_else(|| invalid("a string"))?;
                self.pattern = Some((compile(keyword, source, field)?, source));
            }
            Keyword::MinLength => {
                self.min_length = Some(value.as_u64().ok_or_else(|| invalid("a non-negative integer"))?)
            }
            Keyword::MaxLength => {
                self.max_length = Some(value.as_u64().ok_or_else(|| invalid("a non-negative integer"))?)
            }
            Keyword::Minimum => {
                self.minimum = Some(value.as_f64().ok_or_else(|| invalid("a number"))?)
            }
            Keyword::Maximum => {
                self.maximum = Some(value.as_f64().ok_or_else(|| invalid("a number"))?)
            }
            Keyword::ExclusiveMinimum => {
                self.exclusive_minimum = value.as_bool().ok_or_else(|| invalid("a boolean"))?
            }
            Keyword::ExclusiveMaximum => {
                self.exclusive_maximum = value.as_bool().ok_or_else(|| invalid("a boolean"))?
            }
            Keyword::DivisibleBy => match value.as_f64() {
                Some(divisor) if divisor > 0.0 => self.divisible_by = Some(divisor),
                _ => return Err(invalid("a number greater than zero")),
            },
            Keyword::Format => self.format = Some(value.as_str().ok_or_else(|| invalid("a string"))?),
            Keyword::UniqueItems => {
                self.unique_items = value.as_bool().ok_or_else(|| invalid("a boolean"))?
            }
            Keyword::MinItems => {
                self.min_items = Some(value.as_u64().ok_or_else(|| invalid("a non-negative integer"))?)
            }
            Keyword::MaxItems => {
                self.max_items = Some(value.as_u64().ok_or_else(|| invalid("a non-negative integer"))?)
            }
            Keyword::Properties => {
                let props = value.as_object().ok_or_else(|| invalid("an object"))?;
                if !props.values().all(Value::is_object) {
                    return Err(invalid("an object of schemas"));
                }
                self.properties = Some(props);
            }
            Keyword::PatternProperties => {
                let props = value.as_object().ok_or_else(|| invalid("an object"))?;
                let mut patterns = Vec::with_capacity(props.len());
                for (source, schema) in props {
                    if !schema.is_object() {
                        return Err(invalid("an object of schemas"));
                    }
                    patterns.push(PatternSchema {
                        regex: compile(keyword, source, field)?,
                        source,
                        schema,
                    });
                }
                self.pattern_properties = Some(patterns);
            }
            Keyword::AdditionalProperties => {
                self.additional_properties =
                    Some(additional(value).ok_or_else(|| invalid("a boolean or a schema"))?)
            }
            Keyword::AdditionalItems => {
                self.additional_items =
                    Some(additional(value).ok_or_else(|| invalid("a boolean or a schema"))?)
            }
            Keyword::Dependencies => {
                let deps = value.as_object().ok_or_else(|| invalid("an object"))?;
                let mut parsed = Vec::with_capacity(deps.len());
                for (name, dep) in deps {
                    let dependency = match dep {
                        Value::String(other) => Dependency::Fields(vec![other.as_str()]),
                        Value::Array(others) => Dependency::Fields(
                            others
                                .iter()
                                .map(Value::as_str)
                                .collect::<Option<Vec<_>>>()
                                .ok_or_else(|| invalid("field names or schemas"))?,
                        ),
                        Value::Object(_) => Dependency::Schema(dep),
                        _ => return Err(invalid("field names or schemas")),
                    };
                    parsed.push((name.as_str(), dependency));
                }
                self.dependencies = Some(parsed);
            }
            Keyword::Items => {
                self.items = Some(match value {
                    Value::Object(_) => Items::Uniform(value),
                    Value::Array(schemas) if schemas.iter().all(Value::is_object) => {
                        Items::Tuple(schemas.as_slice())
                    }
                    _ => return Err(invalid("a schema or a list of schemas")),
                })
            }
            Keyword::Extends => {
                self.extends = Some(match value {
                    Value::Object(_) => vec![value],
                    Value::Array(parents) if parents.iter().all(Value::is_object) => {
                        parents.iter().collect()
                    }
                    _ => return Err(invalid("a schema or a list of schemas")),
                })
            }
            Keyword::Title | Keyword::Description => {
                if !value.is_string() {
                    return Err(invalid("a string"));
                }
            }
            Keyword::Default => {}
        }

        Ok(())
    }

    fn finish(self, config: &ValidatorConfig) -> SchemaNode<'a> {
        let mut constraints = Vec::new();

        if let Some(parents) = self.extends {
            constraints.push(Constraint::Extends(parents));
        }
        if let Some(spec) = self.types {
            constraints.push(Constraint::Type(spec));
        }
        if let Some(spec) = self.disallow {
            constraints.push(Constraint::Disallow(spec));
        }
        if !self.blank.unwrap_or(config.blank_by_default) {
            constraints.push(Constraint::NonBlank);
        }
        if let Some(options) = self.enumeration {
            constraints.push(Constraint::Enum(options));
        }
        if let Some((regex, source)) = self.pattern {
            constraints.push(Constraint::Pattern { regex, source });
        }
        if let Some(min) = self.min_length {
            constraints.push(Constraint::MinLength(min));
        }
        if let Some(max) = self.max_length {
            constraints.push(Constraint::MaxLength(max));
        }
        if let Some(limit) = self.minimum {
            constraints.push(Constraint::Minimum {
                limit,
                exclusive: self.exclusive_minimum,
            });
        }
        if let Some(limit) = self.maximum {
            constraints.push(Constraint::Maximum {
                limit,
                exclusive: self.exclusive_maximum,
            });
        }
        if let Some(divisor) = self.divisible_by {
            constraints.push(Constraint::DivisibleBy(divisor));
        }
        if let Some(name) = self.format {
            constraints.push(Constraint::Format(name));
        }
        if self.unique_items {
            constraints.push(Constraint::UniqueItems);
        }
        if let Some(min) = self.min_items {
            constraints.push(Constraint::MinItems(min));
        }
        if let Some(max) = self.max_items {
            constraints.push(Constraint::MaxItems(max));
        }

        let declares_properties = self.properties.is_some() || self.pattern_properties.is_some();
        if let Some(props) = self.properties {
            constraints.push(Constraint::Properties(props));
        }
        if let Some(patterns) = self.pattern_properties {
            constraints.push(Constraint::PatternProperties(patterns));
        }
        match self.additional_properties {
            Some(policy) => constraints.push(Constraint::AdditionalProperties(policy)),
            None if declares_properties && config.disallow_unknown_properties => {
                constraints.push(Constraint::UnknownProperties)
            }
            None => {}
        }
        if let Some(deps) = self.dependencies {
            constraints.push(Constraint::Dependencies(deps));
        }
        if let Some(items) = self.items {
            constraints.push(Constraint::Items(items));
        }
        if let Some(policy) = self.additional_items {
            constraints.push(Constraint::AdditionalItems(policy));
        }

        SchemaNode {
            required: self.required.unwrap_or(config.required_by_default),
            constraints,
        }
    }
}

fn additional(value: &Value) -> Option<Additional<'_>> {
    match value {
        Value::Bool(true) => Some(Additional::Allowed),
        Value::Bool(false) => Some(Additional::Forbidden),
        Value::Object(_) => Some(Additional::Schema(value)),
        _ => None,
    }
}

/// Patterns only anchor at the start of the subject.
fn compile(keyword: Keyword, source: &str, field: &str) -> Result<Regex, SchemaError> {
    Regex::new(&format!("^(?:{})", source)).map_err(|e| SchemaError::InvalidPattern {
        field: field.to_string(),
        keyword: keyword.name(),
        pattern: source.to_string(),
        reason: e.to_string(),
    })
}
