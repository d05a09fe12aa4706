//! Locations of violations within a data document.
//!
//! A [`JsonPath`] is built up one [`PathSegment`] at a time while the engine
//! descends into object properties and array elements. Every violation is
//! stamped with the path of the value that produced it.

use std::fmt::{self, Display};

/// One step from a container into a child value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// An object property (e.g. `user`, `email`).
    Field(String),
    /// An array position (e.g. `[0]`).
    Index(usize),
}

impl PathSegment {
    /// Returns the property name if this is a field segment.
    pub fn as_field(&self) -> Option<&str> {
        match self {
            PathSegment::Field(name) => Some(name),
            PathSegment::Index(_) => None,
        }
    }

    /// Returns the position if this is an index segment.
    pub fn as_index(&self) -> Option<usize> {
        match self {
            PathSegment::Field(_) => None,
            PathSegment::Index(idx) => Some(*idx),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(name: &str) -> Self {
        PathSegment::Field(name.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(name: String) -> Self {
        PathSegment::Field(name)
    }
}

impl From<usize> for PathSegment {
    fn from(idx: usize) -> Self {
        PathSegment::Index(idx)
    }
}

/// A path from the document root to a nested value.
///
/// Paths are immutable: `push_field` and `push_index` return a new path, so
/// sibling branches of the traversal never observe each other's segments.
///
/// # Example
///
/// ```rust
/// use conformist::JsonPath;
///
/// let path = JsonPath::root()
///     .push_field("items")
///     .push_index(2)
///     .push_field("sku");
///
/// assert_eq!(path.to_string(), "items[2].sku");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct JsonPath {
    segments: Vec<PathSegment>,
}

impl JsonPath {
    /// The path of the document root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Builds a path from a list of segments, outermost first.
    ///
    /// ```rust
    /// use conformist::{JsonPath, PathSegment};
    ///
    /// let path = JsonPath::from_segments(["items".into(), PathSegment::Index(2)]);
    /// assert_eq!(path, JsonPath::root().push_field("items").push_index(2));
    /// ```
    pub fn from_segments(segments: impl IntoIterator<Item = PathSegment>) -> Self {
        Self {
            segments: segments.into_iter().collect(),
        }
    }

    /// Returns a new path extended by an object property.
    pub fn push_field(&self, name: impl Into<String>) -> Self {
        self.push(PathSegment::Field(name.into()))
    }

    /// Returns a new path extended by an array position.
    pub fn push_index(&self, index: usize) -> Self {
        self.push(PathSegment::Index(index))
    }

    fn push(&self, segment: PathSegment) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend_from_slice(&self.segments);
        segments.push(segment);
        Self { segments }
    }

    /// Returns true for the document root.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of segments below the root.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Same as [`JsonPath::is_root`].
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }

    /// The path of the enclosing container, or `None` at the root.
    pub fn parent(&self) -> Option<Self> {
        let (_, init) = self.segments.split_last()?;
        Some(Self {
            segments: init.to_vec(),
        })
    }

    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }
}

impl Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Field(name) if needs_quoting(name) => write!(f, "[{:?}]", name)?,
                PathSegment::Field(name) => {
                    if i > 0 {
                        f.write_str(".")?;
                    }
                    f.write_str(name)?;
                }
                PathSegment::Index(idx) => write!(f, "[{}]", idx)?,
            }
        }
        Ok(())
    }
}

/// Keys that would make the dotted rendering ambiguous are shown bracketed.
fn needs_quoting(name: &str) -> bool {
    name.is_empty() || name.contains(['.', '[', ']', '"'])
}
