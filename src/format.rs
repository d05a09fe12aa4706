//! Named format validators consulted by the `format` keyword.
//!
//! A [`FormatRegistry`] maps format names to [`FormatValidator`]s. It is
//! assembled up front (builder methods consume and return the registry) and
//! only read afterwards, so a validator holding one can be shared across
//! threads without locking.

use std::fmt;
use std::net::Ipv4Addr;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use indexmap::IndexMap;
use serde_json::Value;

/// A predicate deciding whether a value has a given format.
///
/// Implemented for every `Fn(&Value) -> bool + Send + Sync`, so closures
/// and plain functions can be registered directly.
pub trait FormatValidator: Send + Sync {
    fn is_valid(&self, value: &Value) -> bool;
}

impl<F> FormatValidator for F
where
    F: Fn(&Value) -> bool + Send + Sync,
{
    fn is_valid(&self, value: &Value) -> bool {
        self(value)
    }
}

/// An immutable collection of format validators, keyed by name.
///
/// # Example
///
/// ```rust
/// use conformist::FormatRegistry;
/// use serde_json::{json, Value};
///
/// let registry = FormatRegistry::new()
///     .register("hex", |v: &Value| {
///         v.as_str().is_some_and(|s| s.chars().all(|c| c.is_ascii_hexdigit()))
///     });
///
/// assert!(registry.contains("date"));
/// assert!(registry.get("hex").unwrap().is_valid(&json!("c0ffee")));
/// assert!(registry.get("color").is_none());
/// ```
#[derive(Clone)]
pub struct FormatRegistry {
    validators: IndexMap<String, Arc<dyn FormatValidator>>,
}

impl FormatRegistry {
    /// A registry holding the built-in formats: `date-time`, `date`,
    /// `time`, `utc-millisec` and `ip-address`.
    pub fn new() -> Self {
        Self::empty()
            .register("date-time", date_time)
            .register("date", date)
            .register("time", time)
            .register("utc-millisec", utc_millisec)
            .register("ip-address", ip_address)
    }

    /// A registry with no formats at all.
    pub fn empty() -> Self {
        Self {
            validators: IndexMap::new(),
        }
    }

    /// Adds a validator, replacing any existing one with the same name.
    pub fn register<V>(mut self, name: impl Into<String>, validator: V) -> Self
    where
        V: FormatValidator + 'static,
    {
        self.validators.insert(name.into(), Arc::new(validator));
        self
    }

    /// Adds every validator from `other`; `other` wins on name clashes.
    pub fn merge(mut self, other: FormatRegistry) -> Self {
        self.validators.extend(other.validators);
        self
    }

    pub fn get(&self, name: &str) -> Option<&dyn FormatValidator> {
        self.validators.get(name).map(|v| &**v)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.validators.contains_key(name)
    }

    /// Registered names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.validators.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FormatRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<FormatRegistry>();
    assert_sync::<FormatRegistry>();
};

/// `YYYY-MM-DDThh:mm:ssZ`. Non-strings pass.
pub fn date_time(value: &Value) -> bool {
    value
        .as_str()
        .map_or(true, |s| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%SZ").is_ok())
}

/// `YYYY-MM-DD`. Non-strings pass.
pub fn date(value: &Value) -> bool {
    value
        .as_str()
        .map_or(true, |s| NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok())
}

/// `hh:mm:ss`. Non-strings pass.
pub fn time(value: &Value) -> bool {
    value
        .as_str()
        .map_or(true, |s| NaiveTime::parse_from_str(s, "%H:%M:%S").is_ok())
}

/// Milliseconds since the epoch: any non-negative number.
///
/// Unlike the string formats, this rejects values of every other JSON type,
/// so `{"format": "utc-millisec"}` without a `type` fails strings too.
pub fn utc_millisec(value: &Value) -> bool {
    value.as_f64().is_some_and(|n| n >= 0.0)
}

/// Dotted-quad IPv4 address. Non-strings pass.
pub fn ip_address(value: &Value) -> bool {
    value.as_str().map_or(true, |s| s.parse::<Ipv4Addr>().is_ok())
}
