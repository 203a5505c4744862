use serde_json::{Map, Number, Value};

use super::{JsonArray, JsonObject, JsonTraits, JsonType};
use crate::prelude::*;

/// [JsonTraits] backed by [serde_json::Value]
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct SerdeJsonTraits;

impl SerdeJsonTraits {
    fn mismatch<T>(expected: JsonType, value: &Value) -> RustyJwtResult<T> {
        Err(RustyJwtError::TypeMismatch {
            expected,
            actual: Self::get_type(value),
        })
    }
}

impl JsonTraits for SerdeJsonTraits {
    type Value = Value;
    type Object = Map<String, Value>;
    type Array = Vec<Value>;

    fn get_type(value: &Value) -> JsonType {
        match value {
            Value::Null => JsonType::Null,
            Value::Bool(_) => JsonType::Boolean,
            Value::Number(n) if n.is_i64() => JsonType::Integer,
            Value::Number(_) => JsonType::Number,
            Value::String(_) => JsonType::String,
            Value::Array(_) => JsonType::Array,
            Value::Object(_) => JsonType::Object,
        }
    }

    fn as_object(value: &Value) -> RustyJwtResult<Self::Object> {
        match value {
            Value::Object(o) => Ok(o.clone()),
            _ => Self::mismatch(JsonType::Object, value),
        }
    }

    fn as_array(value: &Value) -> RustyJwtResult<Self::Array> {
        match value {
            Value::Array(a) => Ok(a.clone()),
            _ => Self::mismatch(JsonType::Array, value),
        }
    }

    fn as_string(value: &Value) -> RustyJwtResult<String> {
        match value {
            Value::String(s) => Ok(s.clone()),
            _ => Self::mismatch(JsonType::String, value),
        }
    }

    fn as_int(value: &Value) -> RustyJwtResult<i64> {
        match value.as_i64() {
            Some(i) => Ok(i),
            None => Self::mismatch(JsonType::Integer, value),
        }
    }

    fn as_bool(value: &Value) -> RustyJwtResult<bool> {
        match value {
            Value::Bool(b) => Ok(*b),
            _ => Self::mismatch(JsonType::Boolean, value),
        }
    }

    fn as_number(value: &Value) -> RustyJwtResult<f64> {
        match value {
            Value::Number(n) if !n.is_i64() => n.as_f64().map_or_else(|| Self::mismatch(JsonType::Number, value), Ok),
            _ => Self::mismatch(JsonType::Number, value),
        }
    }

    fn parse(text: &str) -> RustyJwtResult<Value> {
        serde_json::from_str(text).map_err(|_| RustyJwtError::InvalidJson)
    }

    fn serialize(value: &Value) -> String {
        value.to_string()
    }

    fn from_string(value: String) -> Value {
        Value::String(value)
    }

    fn from_int(value: i64) -> Value {
        Value::Number(value.into())
    }

    fn from_bool(value: bool) -> Value {
        Value::Bool(value)
    }

    fn from_number(value: f64) -> Value {
        Number::from_f64(value).map(Value::Number).unwrap_or(Value::Null)
    }

    fn from_array(value: Self::Array) -> Value {
        Value::Array(value)
    }

    fn from_object(value: Self::Object) -> Value {
        Value::Object(value)
    }
}

impl JsonObject<Value> for Map<String, Value> {
    fn get(&self, key: &str) -> Option<&Value> {
        Map::get(self, key)
    }

    fn insert(&mut self, key: String, value: Value) {
        Map::insert(self, key, value);
    }

    fn len(&self) -> usize {
        Map::len(self)
    }

    fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        Map::iter(self).map(|(k, v)| (k.as_str(), v))
    }
}

impl JsonArray<Value> for Vec<Value> {
    fn values(&self) -> impl Iterator<Item = &Value> {
        self.as_slice().iter()
    }

    fn len(&self) -> usize {
        self.as_slice().len()
    }
}
