//! The closed set of schema keywords understood by the engine.

use std::fmt::{self, Display};

/// A recognised schema keyword.
///
/// Keys in a schema object that do not map to a variant are ignored, so
/// schemas written for newer drafts still load. Adding a keyword means adding
/// a variant here and a matching arm in [`SchemaNode::parse`](super::SchemaNode::parse).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Type,
    Disallow,
    Required,
    Blank,
    Enum,
    Pattern,
    MinLength,
    MaxLength,
    Minimum,
    Maximum,
    ExclusiveMinimum,
    ExclusiveMaximum,
    DivisibleBy,
    Format,
    UniqueItems,
    MinItems,
    MaxItems,
    Properties,
    PatternProperties,
    AdditionalProperties,
    Dependencies,
    Items,
    AdditionalItems,
    Extends,
    Title,
    Description,
    Default,
    /// Retired in favour of `required`.
    Optional,
    /// Retired in favour of `dependencies`.
    Requires,
}

impl Keyword {
    pub const ALL: [Keyword; 29] = [
        Keyword::Type,
        Keyword::Disallow,
        Keyword::Required,
        Keyword::Blank,
        Keyword::Enum,
        Keyword::Pattern,
        Keyword::MinLength,
        Keyword::MaxLength,
        Keyword::Minimum,
        Keyword::Maximum,
        Keyword::ExclusiveMinimum,
        Keyword::ExclusiveMaximum,
        Keyword::DivisibleBy,
        Keyword::Format,
        Keyword::UniqueItems,
        Keyword::MinItems,
        Keyword::MaxItems,
        Keyword::Properties,
        Keyword::PatternProperties,
        Keyword::AdditionalProperties,
        Keyword::Dependencies,
        Keyword::Items,
        Keyword::AdditionalItems,
        Keyword::Extends,
        Keyword::Title,
        Keyword::Description,
        Keyword::Default,
        Keyword::Optional,
        Keyword::Requires,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.name() == name)
    }

    /// The keyword as spelled in a schema document.
    pub fn name(self) -> &'static str {
        match self {
            Keyword::Type => "type",
            Keyword::Disallow => "disallow",
            Keyword::Required => "required",
            Keyword::Blank => "blank",
            Keyword::Enum => "enum",
            Keyword::Pattern => "pattern",
            Keyword::MinLength => "minLength",
            Keyword::MaxLength => "maxLength",
            Keyword::Minimum => "minimum",
            Keyword::Maximum => "maximum",
            Keyword::ExclusiveMinimum => "exclusiveMinimum",
            Keyword::ExclusiveMaximum => "exclusiveMaximum",
            Keyword::DivisibleBy => "divisibleBy",
            Keyword::Format => "format",
            Keyword::UniqueItems => "uniqueItems",
            Keyword::MinItems => "minItems",
            Keyword::MaxItems => "maxItems",
            Keyword::Properties => "properties",
            Keyword::PatternProperties => "patternProperties",
            Keyword::AdditionalProperties => "additionalProperties",
            Keyword::Dependencies => "dependencies",
            Keyword::Items => "items",
            Keyword::AdditionalItems => "additionalItems",
            Keyword::Extends => "extends",
            Keyword::Title => "title",
            Keyword::Description => "description",
            Keyword::Default => "default",
            Keyword::Optional => "optional",
            Keyword::Requires => "requires",
        }
    }
}

impl Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
