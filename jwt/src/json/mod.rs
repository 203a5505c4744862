//! JSON abstractions for working with any JSON library.
//!
//! Everything else in this crate is parametric over [JsonTraits] so that a host application can plug the JSON
//! representation it already uses. [SerdeJsonTraits] is provided as the default backend.

use std::fmt::{Debug, Display, Formatter};

use crate::prelude::*;

pub use serde_backend::SerdeJsonTraits;

mod serde_backend;

/// Generic JSON types used in JWTs
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum JsonType {
    /// `true` or `false`
    Boolean,
    /// A number without fractional part fitting in an [i64]
    Integer,
    /// Any other number
    Number,
    /// UTF-8 string
    String,
    /// Sequence of values
    Array,
    /// String keyed map of values
    Object,
    /// `null`
    Null,
}

impl Display for JsonType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
            Self::Null => "null",
        };
        write!(f, "{name}")
    }
}

/// Operations a JSON object type has to offer
pub trait JsonObject<V: 'static>: Clone + Debug + Default + Send + Sync {
    /// Value under `key`, if any
    fn get(&self, key: &str) -> Option<&V>;

    /// Inserts or overwrites the value under `key`
    fn insert(&mut self, key: String, value: V);

    /// Number of entries
    fn len(&self) -> usize;

    /// Iterates over every entry
    fn iter(&self) -> impl Iterator<Item = (&str, &V)>;

    /// Whether `key` is present
    fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Whether there is no entry
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Operations a JSON array type has to offer
pub trait JsonArray<V: 'static>: Clone + Debug + Default + Send + Sync + FromIterator<V> {
    /// Iterates over the elements in order
    fn values(&self) -> impl Iterator<Item = &V>;

    /// Number of elements
    fn len(&self) -> usize;

    /// First element, if any
    fn first(&self) -> Option<&V> {
        self.values().next()
    }

    /// Whether there is no element
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The capability contract a JSON backend must fulfill.
///
/// Every `as_*` cast fails with [RustyJwtError::TypeMismatch] when the runtime type of the value disagrees.
pub trait JsonTraits: Copy + Clone + Debug + Default + Send + Sync + 'static {
    /// Any JSON value
    type Value: Clone + Debug + Send + Sync + 'static;
    /// A JSON object
    type Object: JsonObject<Self::Value>;
    /// A JSON array
    type Array: JsonArray<Self::Value>;

    /// Runtime type of a value
    fn get_type(value: &Self::Value) -> JsonType;

    /// Value as an object
    fn as_object(value: &Self::Value) -> RustyJwtResult<Self::Object>;

    /// Value as an array
    fn as_array(value: &Self::Value) -> RustyJwtResult<Self::Array>;

    /// Value as a string
    fn as_string(value: &Self::Value) -> RustyJwtResult<String>;

    /// Value as an integer
    fn as_int(value: &Self::Value) -> RustyJwtResult<i64>;

    /// Value as a boolean
    fn as_bool(value: &Self::Value) -> RustyJwtResult<bool>;

    /// Value as a floating point number
    fn as_number(value: &Self::Value) -> RustyJwtResult<f64>;

    /// Parses JSON text, failing with [RustyJwtError::InvalidJson]
    fn parse(text: &str) -> RustyJwtResult<Self::Value>;

    /// Serializes a value to JSON text
    fn serialize(value: &Self::Value) -> String;

    /// Wraps a string
    fn from_string(value: String) -> Self::Value;

    /// Wraps an integer
    fn from_int(value: i64) -> Self::Value;

    /// Wraps a boolean
    fn from_bool(value: bool) -> Self::Value;

    /// Wraps a floating point number
    fn from_number(value: f64) -> Self::Value;

    /// Wraps an array
    fn from_array(value: Self::Array) -> Self::Value;

    /// Wraps an object
    fn from_object(value: Self::Object) -> Self::Value;
}
