use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

use time::OffsetDateTime;

use crate::json::{JsonArray, JsonTraits, JsonType, SerdeJsonTraits};
use crate::prelude::*;

/// Set of strings, as used for the audience or the key operations
pub type ClaimSet = BTreeSet<String>;

/// Stores a generic JSON value as a claim
///
/// Specified in [RFC 7519 Section 4: JWT Claims][1]
///
/// [1]: https://tools.ietf.org/html/rfc7519#section-4
#[derive(Debug, Clone)]
pub struct Claim<J: JsonTraits = SerdeJsonTraits> {
    value: J::Value,
}

impl<J: JsonTraits> Claim<J> {
    /// Wraps a raw JSON value
    pub fn new(value: J::Value) -> Self {
        Self { value }
    }

    /// Wrapped JSON value
    pub fn to_json(&self) -> &J::Value {
        &self.value
    }

    /// Unwraps the JSON value
    pub fn into_json(self) -> J::Value {
        self.value
    }

    /// Type of the contained JSON value
    pub fn get_type(&self) -> JsonType {
        J::get_type(&self.value)
    }

    /// Contained JSON value as a string
    pub fn as_string(&self) -> RustyJwtResult<String> {
        J::as_string(&self.value)
    }

    /// Contained JSON value, an integer, interpreted as seconds since the Unix epoch
    pub fn as_date(&self) -> RustyJwtResult<OffsetDateTime> {
        let secs = self.as_int()?;
        OffsetDateTime::from_unix_timestamp(secs).map_err(|_| RustyJwtError::DateOutOfRange(secs))
    }

    /// Contained JSON value as an array
    pub fn as_array(&self) -> RustyJwtResult<J::Array> {
        J::as_array(&self.value)
    }

    /// Contained JSON value as an array of strings
    pub fn as_set(&self) -> RustyJwtResult<ClaimSet> {
        self.as_array()?.values().map(J::as_string).collect()
    }

    /// Contained JSON value as an integer
    pub fn as_int(&self) -> RustyJwtResult<i64> {
        J::as_int(&self.value)
    }

    /// Contained JSON value as a boolean
    pub fn as_bool(&self) -> RustyJwtResult<bool> {
        J::as_bool(&self.value)
    }

    /// Contained JSON value as a floating point number
    pub fn as_number(&self) -> RustyJwtResult<f64> {
        J::as_number(&self.value)
    }
}

/// Same JSON type and same value. Arrays and objects compare by their serialization.
impl<J: JsonTraits> PartialEq for Claim<J> {
    fn eq(&self, other: &Self) -> bool {
        let ty = self.get_type();
        if ty != other.get_type() {
            return false;
        }
        match ty {
            JsonType::Boolean => matches!((self.as_bool(), other.as_bool()), (Ok(a), Ok(b)) if a == b),
            JsonType::Integer => matches!((self.as_int(), other.as_int()), (Ok(a), Ok(b)) if a == b),
            JsonType::Number => matches!((self.as_number(), other.as_number()), (Ok(a), Ok(b)) if a == b),
            JsonType::String => matches!((self.as_string(), other.as_string()), (Ok(a), Ok(b)) if a == b),
            JsonType::Array | JsonType::Object => J::serialize(&self.value) == J::serialize(&other.value),
            JsonType::Null => true,
        }
    }
}

impl<J: JsonTraits> Display for Claim<J> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", J::serialize(&self.value))
    }
}

impl<J: JsonTraits> From<String> for Claim<J> {
    fn from(value: String) -> Self {
        Self::new(J::from_string(value))
    }
}

impl<J: JsonTraits> From<&str> for Claim<J> {
    fn from(value: &str) -> Self {
        value.to_string().into()
    }
}

impl<J: JsonTraits> From<i64> for Claim<J> {
    fn from(value: i64) -> Self {
        Self::new(J::from_int(value))
    }
}

impl<J: JsonTraits> From<bool> for Claim<J> {
    fn from(value: bool) -> Self {
        Self::new(J::from_bool(value))
    }
}

impl<J: JsonTraits> From<f64> for Claim<J> {
    fn from(value: f64) -> Self {
        Self::new(J::from_number(value))
    }
}

/// Stored as an integer number of seconds since the Unix epoch
impl<J: JsonTraits> From<OffsetDateTime> for Claim<J> {
    fn from(date: OffsetDateTime) -> Self {
        date.unix_timestamp().into()
    }
}

impl<J: JsonTraits> From<&ClaimSet> for Claim<J> {
    fn from(set: &ClaimSet) -> Self {
        set.iter().cloned().collect()
    }
}

impl<J: JsonTraits, S: Into<String>> FromIterator<S> for Claim<J> {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let array = iter.into_iter().map(|s| J::from_string(s.into())).collect::<J::Array>();
        Self::new(J::from_array(array))
    }
}
