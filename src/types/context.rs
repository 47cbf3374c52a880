//! Attribute values and the immutable [`Context`] map.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// An attribute map shared by contexts and entity properties.
pub type Attributes = BTreeMap<String, ContextValue>;

/// A JSON-shaped attribute value.
///
/// Properties and context attributes are free-form on the wire, so a value may
/// be any JSON scalar, a list, or a nested map.
///
/// ```rust
/// use authzen_client::ContextValue;
///
/// let region: ContextValue = "eu-west-1".into();
/// let retries: ContextValue = 3.into();
/// let tags: ContextValue = vec!["beta", "internal"].into();
///
/// assert_eq!(region.as_str(), Some("eu-west-1"));
/// assert_eq!(retries.as_f64(), Some(3.0));
/// assert_eq!(tags.to_string(), r#"["beta","internal"]"#);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum ContextValue {
    /// JSON `null`.
    #[default]
    Null,
    /// JSON `true` or `false`.
    Bool(bool),
    /// Whole numbers that fit in an `i64`.
    Integer(i64),
    /// Every other JSON number.
    Float(f64),
    /// A JSON string.
    String(String),
    /// A JSON list.
    Array(Vec<ContextValue>),
    /// A nested map, kept in key order.
    Object(Attributes),
}

impl ContextValue {
    /// `true` for [`ContextValue::Null`].
    pub fn is_null(&self) -> bool {
        *self == Self::Null
    }

    /// The flag, if this is a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        if let Self::Bool(flag) = *self { Some(flag) } else { None }
    }

    /// The number, if this is an integer.
    pub fn as_i64(&self) -> Option<i64> {
        if let Self::Integer(n) = *self { Some(n) } else { None }
    }

    /// Reads any number as a float. Integers are widened.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Self::Float(n) => Some(n),
            Self::Integer(n) => Some(n as f64),
            _ => None,
        }
    }

    /// The text, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        if let Self::String(text) = self { Some(text.as_str()) } else { None }
    }

    /// The elements, if this is a list.
    pub fn as_array(&self) -> Option<&[ContextValue]> {
        if let Self::Array(items) = self { Some(items.as_slice()) } else { None }
    }

    /// The nested map, if this is an object.
    pub fn as_object(&self) -> Option<&Attributes> {
        if let Self::Object(map) = self { Some(map) } else { None }
    }
}

macro_rules! context_value_from {
    ($($source:ty => $variant:ident as $target:ty),* $(,)?) => {
        $(
            impl From<$source> for ContextValue {
                fn from(value: $source) -> Self {
                    Self::$variant(<$target>::from(value))
                }
            }
        )*
    };
}

context_value_from! {
    bool => Bool as bool,
    i32 => Integer as i64,
    u32 => Integer as i64,
    i64 => Integer as i64,
    f64 => Float as f64,
    &str => String as String,
    String => String as String,
    Attributes => Object as Attributes,
}

impl<T: Into<ContextValue>> From<Vec<T>> for ContextValue {
    fn from(items: Vec<T>) -> Self {
        Self::Array(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<ContextValue>> From<Option<T>> for ContextValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Renders the value as compact JSON.
impl fmt::Display for ContextValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

/// Contextual attributes attached to an authorization request.
///
/// A context carries the environment of a decision (time, source IP,
/// environment name, ...) as a flat key/value map. It is immutable once
/// shared: the attribute map lives behind an [`Arc`], clones are cheap and
/// point at the same map, and no method mutates a map another value can see.
///
/// ## Merging
///
/// [`Context::merge`] combines two contexts with "newer source wins"
/// semantics: on a key collision the argument's value replaces the receiver's.
/// Merging with nothing returns the receiver itself.
///
/// ```rust
/// use authzen_client::Context;
///
/// let base = Context::new().with("a", 1).with("b", 2);
/// let other = Context::new().with("b", 99).with("c", 3);
///
/// let merged = base.merge(Some(&other));
/// assert_eq!(merged.get("b").and_then(|v| v.as_i64()), Some(99));
/// assert_eq!(base.get("b").and_then(|v| v.as_i64()), Some(2));
///
/// let same = base.merge(None);
/// assert!(Context::ptr_eq(&base, &same));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Context {
    attributes: Arc<Attributes>,
}

impl Context {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a context that takes ownership of the given attributes.
    pub fn from_attributes(attributes: Attributes) -> Self {
        Self {
            attributes: Arc::new(attributes),
        }
    }

    /// Returns a context with an additional attribute.
    ///
    /// Only this value is affected; clones taken earlier keep their
    /// attributes.
    ///
    /// # Example
    ///
    /// ```rust
    /// use authzen_client::Context;
    ///
    /// let context = Context::new()
    ///     .with("ip_address", "192.168.1.100")
    ///     .with("mfa", true);
    /// assert_eq!(context.len(), 2);
    /// ```
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ContextValue>) -> Self {
        Arc::make_mut(&mut self.attributes).insert(key.into(), value.into());
        self
    }

    /// Gets a value by key.
    pub fn get(&self, key: &str) -> Option<&ContextValue> {
        self.attributes.get(key)
    }

    /// Returns `true` if the context contains the given key.
    pub fn contains_key(&self, key: &str) -> bool {
        self.attributes.contains_key(key)
    }

    /// Returns `true` if the context carries no attributes.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Returns the number of attributes.
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Returns an iterator over the attributes in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &ContextValue)> {
        self.attributes.iter()
    }

    /// Returns a read-only view of the attribute map.
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Returns `true` if both contexts share the same attribute map.
    ///
    /// This is identity, not equality: two separately built contexts with
    /// identical attributes are equal but not `ptr_eq`.
    pub fn ptr_eq(a: &Context, b: &Context) -> bool {
        Arc::ptr_eq(&a.attributes, &b.attributes)
    }

    /// Merges `other` over this context, returning the result.
    ///
    /// - `None` or an empty `other` returns a clone of `self` sharing the same
    ///   attribute map (see [`Context::ptr_eq`]).
    /// - Otherwise a new context holds the union of both attribute sets, and
    ///   `other` wins on key collisions.
    ///
    /// Neither input is modified.
    #[must_use]
    pub fn merge(&self, other: Option<&Context>) -> Context {
        match other {
            Some(other) if !other.is_empty() => {
                let mut merged = Attributes::clone(&self.attributes);
                merged.extend(
                    other
                        .attributes
                        .iter()
                        .map(|(key, value)| (key.clone(), value.clone())),
                );
                Context::from_attributes(merged)
            }
            _ => self.clone(),
        }
    }
}

impl From<Attributes> for Context {
    fn from(attributes: Attributes) -> Self {
        Context::from_attributes(attributes)
    }
}

impl FromIterator<(String, ContextValue)> for Context {
    fn from_iter<T: IntoIterator<Item = (String, ContextValue)>>(iter: T) -> Self {
        Context::from_attributes(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Context {
    type Item = (&'a String, &'a ContextValue);
    type IntoIter = std::collections::btree_map::Iter<'a, String, ContextValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.attributes.iter()
    }
}
