//! Typed values of clafer lines

use serde::{Deserialize, Serialize};
use std::fmt;

/// The type tag after `->`
///
/// The four reserved words get their own variants; anything else is a
/// user-defined type name. Serializes as its plain text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ValueType {
    Int,
    Real,
    Double,
    String,
    Named(String),
}

impl ValueType {
    pub fn as_str(&self) -> &str {
        match self {
            ValueType::Int => "int",
            ValueType::Real => "real",
            ValueType::Double => "double",
            ValueType::String => "string",
            ValueType::Named(name) => name,
        }
    }

    /// Only `int` triggers numeric coercion of the value; `real` and
    /// `double` values stay as raw lexemes.
    pub fn is_int(&self) -> bool {
        matches!(self, ValueType::Int)
    }
}

impl From<&str> for ValueType {
    fn from(text: &str) -> Self {
        match text {
            "int" => ValueType::Int,
            "real" => ValueType::Real,
            "double" => ValueType::Double,
            "string" => ValueType::String,
            other => ValueType::Named(other.to_string()),
        }
    }
}

impl From<String> for ValueType {
    fn from(text: String) -> Self {
        match text.as_str() {
            "int" | "real" | "double" | "string" => ValueType::from(text.as_str()),
            _ => ValueType::Named(text),
        }
    }
}

impl From<ValueType> for String {
    fn from(value_type: ValueType) -> Self {
        match value_type {
            ValueType::Named(name) => name,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The value after `=`
///
/// `Int` only ever appears when the type tag is `int`. Everything else keeps
/// the raw lexeme, including the quotes of string literals.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Text(String),
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Text(text.to_string())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Text(text) => f.write_str(text),
        }
    }
}
