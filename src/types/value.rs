use std::fmt;
use std::str::FromStr;

use num_bigint::BigInt;
use num_traits::ToPrimitive;
use serde::ser::{Serialize, SerializeSeq, Serializer};

use crate::table::HashTable;
use crate::{Error, RenderOptions};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Constant {
    True,
    False,
    Null,
}

impl Constant {
    pub fn from_literal(text: &str) -> Option<Self> {
        match text {
            "true" => Some(Constant::True),
            "false" => Some(Constant::False),
            "null" => Some(Constant::Null),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Constant::True => "true",
            Constant::False => "false",
            Constant::Null => "null",
        }
    }
}

impl From<bool> for Constant {
    fn from(value: bool) -> Self {
        if value {
            Constant::True
        } else {
            Constant::False
        }
    }
}

/// A parsed JSON document node.
///
/// Equality is structural. Objects compare as sets of key/value pairs, so
/// two tables with different capacities or slot layouts can be equal.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Int(BigInt),
    Real(f64),
    Array(Vec<Value>),
    Object(HashTable),
    Const(Constant),
}

impl Value {
    pub const TRUE: Value = Value::Const(Constant::True);
    pub const FALSE: Value = Value::Const(Constant::False);
    pub const NULL: Value = Value::Const(Constant::Null);

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Const(Constant::Null))
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Const(Constant::True | Constant::False))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::Str(_))
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, Value::Int(_))
    }

    pub fn is_real(&self) -> bool {
        matches!(self, Value::Real(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Const(Constant::True) => Some(true),
            Value::Const(Constant::False) => Some(false),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bigint(&self) -> Option<&BigInt> {
        match self {
            Value::Int(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.as_bigint().and_then(ToPrimitive::to_i64)
    }

    /// Reals as-is, integers converted (possibly losing precision).
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Real(f) => Some(*f),
            Value::Int(n) => n.to_f64(),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&HashTable> {
        match self {
            Value::Object(table) => Some(table),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut HashTable> {
        match self {
            Value::Object(table) => Some(table),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|table| table.get(key))
    }

    pub fn get_index(&self, index: usize) -> Option<&Value> {
        self.as_array().and_then(|items| items.get(index))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Str(_) => "string",
            Value::Int(_) => "integer",
            Value::Real(_) => "real",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Const(Constant::Null) => "null",
            Value::Const(_) => "boolean",
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::NULL
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::encode::to_string(self, &RenderOptions::default()))
    }
}

impl FromStr for Value {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parse(s)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(BigInt::from(value))
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Value::Int(BigInt::from(value))
    }
}

impl From<BigInt> for Value {
    fn from(value: BigInt) -> Self {
        Value::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Real(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Const(Constant::from(value))
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Array(value)
    }
}

impl From<HashTable> for Value {
    fn from(value: HashTable) -> Self {
        Value::Object(value)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Str(s) => serializer.serialize_str(s),
            Value::Int(n) => {
                if let Some(small) = n.to_i64() {
                    serializer.serialize_i64(small)
                } else if let Some(unsigned) = n.to_u64() {
                    serializer.serialize_u64(unsigned)
                } else {
                    serializer.serialize_str(&n.to_string())
                }
            }
            Value::Real(f) => serializer.serialize_f64(*f),
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Object(table) => table.serialize(serializer),
            Value::Const(Constant::True) => serializer.serialize_bool(true),
            Value::Const(Constant::False) => serializer.serialize_bool(false),
            Value::Const(Constant::Null) => serializer.serialize_unit(),
        }
    }
}
