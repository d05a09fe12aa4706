//! Recursive traversal of a data document alongside its schema.
//!
//! The whole schema is shape-checked before any data is judged. The engine
//! then parses each schema node as it is reached, evaluates its constraints
//! in node order, and descends into properties, array elements and parent
//! schemas. Leaf checks live in [`crate::keywords`]; this module owns
//! recursion, the error accumulator and the first-error policy.

use std::cell::Cell;

use serde_json::Value;

use crate::error::{FieldValidationError, SchemaError};
use crate::format::FormatRegistry;
use crate::keywords;
use crate::path::JsonPath;
use crate::schema::{
    check_tree, Additional, Constraint, Dependency, Items, SchemaNode, TypeEntry, TypeSpec,
};
use crate::validation::ValidatorConfig;

/// Why a traversal stopped early.
#[derive(Debug)]
pub(crate) enum Halt {
    /// The schema is malformed; always propagated.
    Schema(SchemaError),
    /// A violation was reported in first-error mode.
    Stop,
}

impl From<SchemaError> for Halt {
    fn from(error: SchemaError) -> Self {
        Halt::Schema(error)
    }
}

/// A node together with every parent reachable through `extends`.
///
/// Members are validated one by one but declare object keys jointly, so a
/// key declared by a parent is not unknown to its child and vice versa.
struct Family<'f, 's> {
    nodes: &'f [SchemaNode<'s>],
    unknown_checked: Cell<bool>,
}

impl<'f, 's> Family<'f, 's> {
    fn new(nodes: &'f [SchemaNode<'s>]) -> Self {
        Self {
            nodes,
            unknown_checked: Cell::new(false),
        }
    }

    fn declares(&self, key: &str) -> bool {
        self.nodes.iter().any(|node| node.declares(key))
    }

    fn has_additional_properties(&self) -> bool {
        self.nodes.iter().any(SchemaNode::has_additional_properties)
    }

    /// True the first time it is called; unknown keys are reported once per family.
    fn claim_unknown_check(&self) -> bool {
        !self.unknown_checked.replace(true)
    }
}

/// Parses `schema` and its `extends` ancestors, depth first.
fn lineage<'s>(
    schema: &'s Value,
    config: &ValidatorConfig,
    path: &JsonPath,
    out: &mut Vec<SchemaNode<'s>>,
) -> Result<(), SchemaError> {
    let node = SchemaNode::parse(schema, config, path)?;
    let parents = node.parents().to_vec();
    out.push(node);
    for parent in parents {
        lineage(parent, config, path, out)?;
    }
    Ok(())
}

/// State owned by a single validation call.
pub(crate) struct Traversal<'c> {
    config: &'c ValidatorConfig,
    formats: &'c FormatRegistry,
    errors: Vec<FieldValidationError>,
}

impl<'c> Traversal<'c> {
    pub(crate) fn new(config: &'c ValidatorConfig, formats: &'c FormatRegistry) -> Self {
        Self {
            config,
            formats,
            errors: Vec::new(),
        }
    }

    /// Walks the whole document and returns the violations found, in order.
    pub(crate) fn run(
        mut self,
        data: &Value,
        schema: &Value,
    ) -> Result<Vec<FieldValidationError>, SchemaError> {
        check_tree(schema, self.config, &JsonPath::root())?;

        match self.visit(Some(data), schema, &JsonPath::root()) {
            Ok(()) | Err(Halt::Stop) => Ok(self.errors),
            Err(Halt::Schema(error)) => Err(error),
        }
    }

    fn report(&mut self, error: FieldValidationError) -> Result<(), Halt> {
        tracing::trace!(path = %error.path, code = %error.code, "constraint violated");
        self.errors.push(error);
        if self.config.raise_at_first_error {
            Err(Halt::Stop)
        } else {
            Ok(())
        }
    }

    /// Validates the value at `path` (`None` when the property is absent).
    fn visit(&mut self, value: Option<&Value>, schema: &Value, path: &JsonPath) -> Result<(), Halt> {
        let mut nodes = Vec::new();
        lineage(schema, self.config, path, &mut nodes)?;
        let family = Family::new(&nodes);

        let Some(value) = value else {
            if nodes[0].is_required() {
                self.report(keywords::object::missing(path))?;
            }
            return Ok(());
        };

        self.visit_node(value, &nodes[0], &family, path)
    }

    /// Evaluates one member of `family` against a present value.
    fn visit_node(
        &mut self,
        value: &Value,
        node: &SchemaNode<'_>,
        family: &Family<'_, '_>,
        path: &JsonPath,
    ) -> Result<(), Halt> {
        let mut type_ok = true;
        for constraint in node.constraints() {
            match constraint {
                Constraint::Extends(parents) => {
                    for parent in parents {
                        let parent = SchemaNode::parse(parent, self.config, path)?;
                        self.visit_node(value, &parent, family, path)?;
                    }
                }
                Constraint::Type(spec) => {
                    if !self.conforms(value, spec, path)? {
                        type_ok = false;
                        self.report(keywords::types::mismatch(value, spec, path))?;
                    }
                }
                Constraint::Disallow(spec) => {
                    if self.conforms(value, spec, path)? {
                        self.report(keywords::types::disallowed(value, spec, path))?;
                    }
                }
                // Format validators never see values of the wrong type.
                Constraint::Format(_) if !type_ok => {}
                Constraint::Properties(props) => {
                    if let Value::Object(obj) = value {
                        for (name, subschema) in props.iter() {
                            self.visit(obj.get(name), subschema, &path.push_field(name))?;
                        }
                    }
                }
                Constraint::PatternProperties(patterns) => {
                    if let Value::Object(obj) = value {
                        for pattern in patterns {
                            for (key, child) in obj.iter().filter(|(k, _)| pattern.regex.is_match(k)) {
                                self.visit(Some(child), pattern.schema, &path.push_field(key))?;
                            }
                        }
                    }
                }
                Constraint::AdditionalProperties(policy) => {
                    if let Value::Object(obj) = value {
                        for (key, child) in obj.iter().filter(|(k, _)| !family.declares(k)) {
                            match policy {
                                Additional::Allowed => {}
                                Additional::Forbidden => {
                                    self.report(keywords::object::unknown_property(key, path))?
                                }
                                Additional::Schema(subschema) => {
                                    self.visit(Some(child), subschema, &path.push_field(key))?
                                }
                            }
                        }
                    }
                }
                Constraint::UnknownProperties => {
                    if let Value::Object(obj) = value {
                        if !family.has_additional_properties() && family.claim_unknown_check() {
                            for key in obj.keys().filter(|k| !family.declares(k)) {
                                self.report(keywords::object::unknown_property(key, path))?;
                            }
                        }
                    }
                }
                Constraint::Dependencies(deps) => {
                    if let Value::Object(obj) = value {
                        for (name, dependency) in deps {
                            if !obj.contains_key(*name) {
                                continue;
                            }
                            match dependency {
                                Dependency::Fields(fields) => {
                                    for field in fields.iter().filter(|f| !obj.contains_key(**f)) {
                                        self.report(keywords::object::missing_dependency(
                                            name, field, path,
                                        ))?;
                                    }
                                }
                                Dependency::Schema(subschema) => {
                                    self.visit(Some(value), subschema, path)?
                                }
                            }
                        }
                    }
                }
                Constraint::Items(items) => {
                    if let Value::Array(elements) = value {
                        match items {
                            Items::Uniform(subschema) => {
                                for (i, element) in elements.iter().enumerate() {
                                    self.visit(Some(element), subschema, &path.push_index(i))?;
                                }
                            }
                            Items::Tuple(subschemas) => {
                                for (i, (subschema, element)) in
                                    subschemas.iter().zip(elements).enumerate()
                                {
                                    self.visit(Some(element), subschema, &path.push_index(i))?;
                                }
                            }
                        }
                    }
                }
                Constraint::AdditionalItems(policy) => {
                    if let (Value::Array(elements), Some(declared)) = (value, node.tuple_len()) {
                        match policy {
                            Additional::Allowed => {}
                            Additional::Forbidden if elements.len() > declared => {
                                self.report(keywords::array::additional_items(
                                    elements.len(),
                                    declared,
                                    value,
                                    path,
                                ))?
                            }
                            Additional::Forbidden => {}
                            Additional::Schema(subschema) => {
                                for (i, element) in elements.iter().enumerate().skip(declared) {
                                    self.visit(Some(element), subschema, &path.push_index(i))?;
                                }
                            }
                        }
                    }
                }
                leaf => {
                    if let Some(error) = keywords::check(leaf, value, path, self.formats) {
                        self.report(error)?;
                    }
                }
            }
        }

        Ok(())
    }

    /// True when `value` matches at least one entry of `spec`.
    fn conforms(&self, value: &Value, spec: &TypeSpec<'_>, path: &JsonPath) -> Result<bool, Halt> {
        for entry in spec.entries() {
            let matched = match entry {
                TypeEntry::Named(json_type) => json_type.matches(value),
                TypeEntry::Schema(schema) => self.matches_schema(value, schema, path)?,
            };
            if matched {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Runs a throwaway first-error traversal to see whether `value` fits `schema`.
    fn matches_schema(&self, value: &Value, schema: &Value, path: &JsonPath) -> Result<bool, Halt> {
        let config = ValidatorConfig {
            raise_at_first_error: true,
            ..*self.config
        };
        let mut trial = Traversal::new(&config, self.formats);
        match trial.visit(Some(value), schema, path) {
            Ok(()) => Ok(true),
            Err(Halt::Stop) => Ok(false),
            Err(halt @ Halt::Schema(_)) => Err(halt),
        }
    }
}
