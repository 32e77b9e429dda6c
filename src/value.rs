use chrono::NaiveDateTime;
use serde_derive::{Deserialize, Serialize};
use std::fmt;
use std::iter::FromIterator;

/// Textual pattern for date-time values on the wire, e.g. `19980717T14:08:55`.
///
/// No fractional seconds, no timezone designator; the timestamp is whatever
/// offset the caller supplied.
pub(crate) const DATE_TIME_FORMAT: &str = "%Y%m%dT%H:%M:%S";

/// A single XML-RPC value of any of the wire types.
///
/// Compound values form trees built bottom-up and are never mutated in place
/// during encoding or decoding.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// `<boolean>`, `1` or `0` on the wire.
    Bool(bool),
    /// `<int>` (decoded also from `<i4>`).
    Int(i32),
    /// `<double>`.
    Double(f64),
    /// `<string>`.
    String(String),
    /// `<dateTime.iso8601>` at second precision, without a timezone.
    DateTime(NaiveDateTime),
    /// `<base64>`, held decoded as raw bytes.
    Base64(Vec<u8>),
    /// `<array>`, with element order significant and preserved.
    Array(Vec<Value>),
    /// `<struct>` with unique member names, kept in insertion order.
    Struct(Vec<(String, Value)>),
    /// Text of a type element this crate does not recognize.
    ///
    /// Produced by the decoder for unknown or extension types; encoded back
    /// as `<string>`, which is how such values degrade on the wire.
    Other(String),
}

impl Value {
    /// Creates a struct with no members.
    pub fn empty_struct() -> Value {
        Value::Struct(Vec::new())
    }

    /// Creates an array with no elements.
    pub fn empty_array() -> Value {
        Value::Array(Vec::new())
    }

    /// Wire element name of this value's type.
    ///
    /// `Other` reports `string` since that is how it travels.
    pub fn type_name(&self) -> &'static str {
        match *self {
            Value::Bool(..) => "boolean",
            Value::Int(..) => "int",
            Value::Double(..) => "double",
            Value::String(..) | Value::Other(..) => "string",
            Value::DateTime(..) => "dateTime.iso8601",
            Value::Base64(..) => "base64",
            Value::Array(..) => "array",
            Value::Struct(..) => "struct",
        }
    }
}

/// Appends a member, replacing any existing member of the same name.
pub(crate) fn insert_member(members: &mut Vec<(String, Value)>, name: String, value: Value) {
    match members.iter_mut().find(|(key, _)| *key == name) {
        Some(member) => member.1 = value,
        None => members.push((name, value)),
    }
}

impl fmt::Display for Value {
    /// Human-readable rendering: arrays as `[a, b]`, structs as `{k: v}`,
    /// binary data as its base64 text. This is not the wire form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Value::Bool(v) => write!(f, "{}", v),
            Value::Int(v) => write!(f, "{}", v),
            Value::Double(v) => write!(f, "{}", v),
            Value::String(ref v) | Value::Other(ref v) => f.write_str(v),
            Value::DateTime(v) => write!(f, "{}", v.format(DATE_TIME_FORMAT)),
            Value::Base64(ref v) => f.write_str(&base64::encode(v)),
            Value::Array(ref items) => {
                f.write_str("[")?;
                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Value::Struct(ref members) => {
                f.write_str("{")?;
                for (idx, (name, value)) in members.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", name, value)?;
                }
                f.write_str("}")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_owned())
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Self::DateTime(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Self::Base64(v)
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Self::Base64(v.to_owned())
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Self::Array(v)
    }
}

impl<K: Into<String>, T: Into<Value>> FromIterator<(K, T)> for Value {
    /// Builds a struct; a repeated member name keeps the last value.
    fn from_iter<I: IntoIterator<Item = (K, T)>>(iter: I) -> Self {
        let mut members = Vec::new();
        for (key, value) in iter {
            insert_member(&mut members, key.into(), value.into());
        }
        Self::Struct(members)
    }
}

impl<T: Into<Value>> FromIterator<T> for Value {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::Array(iter.into_iter().map(Into::into).collect())
    }
}
