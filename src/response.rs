use crate::error::{Error, Result};
use crate::value::Value;
use chrono::NaiveDateTime;

/// Decoded outcome of a method call.
///
/// Immutable once constructed; every accessor may be retried with a
/// different type after a mismatch.
#[derive(Clone, Debug, PartialEq)]
pub enum Response {
    /// The call succeeded with a single return value.
    Success {
        /// The decoded return value.
        value: Value,
    },
    /// The server reported a fault.
    Fault {
        /// Integer code from the fault struct's `faultCode` member.
        code: i32,
        /// Text from the fault struct's `faultString` member.
        message: String,
        /// The whole decoded fault struct; absent for hand-built faults.
        raw: Option<Value>,
    },
}

impl Response {
    /// Creates a successful response around `value`.
    pub fn success<V: Into<Value>>(value: V) -> Response {
        Response::Success {
            value: value.into(),
        }
    }

    /// Creates a fault response that carries no value.
    pub fn fault<S: Into<String>>(code: i32, message: S) -> Response {
        Response::Fault {
            code,
            message: message.into(),
            raw: None,
        }
    }

    pub fn is_fault(&self) -> bool {
        matches!(*self, Response::Fault { .. })
    }

    pub fn fault_code(&self) -> Option<i32> {
        match *self {
            Response::Fault { code, .. } => Some(code),
            Response::Success { .. } => None,
        }
    }

    pub fn fault_message(&self) -> Option<&str> {
        match *self {
            Response::Fault { ref message, .. } => Some(message),
            Response::Success { .. } => None,
        }
    }

    /// The underlying value: the return value of a successful call, or the
    /// raw fault struct of a fault.
    pub fn value(&self) -> Option<&Value> {
        match *self {
            Response::Success { ref value } => Some(value),
            Response::Fault { ref raw, .. } => raw.as_ref(),
        }
    }

    fn require_value(&self) -> Result<&Value> {
        self.value().ok_or(Error::NullValue)
    }

    pub fn is_null(&self) -> bool {
        self.value().is_none()
    }

    pub fn is_int(&self) -> bool {
        matches!(self.value(), Some(Value::Int(..)))
    }

    pub fn is_bool(&self) -> bool {
        matches!(self.value(), Some(Value::Bool(..)))
    }

    pub fn is_double(&self) -> bool {
        matches!(self.value(), Some(Value::Double(..)))
    }

    pub fn is_string(&self) -> bool {
        matches!(self.value(), Some(Value::String(..)) | Some(Value::Other(..)))
    }

    pub fn is_datetime(&self) -> bool {
        matches!(self.value(), Some(Value::DateTime(..)))
    }

    pub fn is_bytes(&self) -> bool {
        matches!(self.value(), Some(Value::Base64(..)))
    }

    pub fn is_array(&self) -> bool {
        matches!(self.value(), Some(Value::Array(..)))
    }

    pub fn is_struct(&self) -> bool {
        matches!(self.value(), Some(Value::Struct(..)))
    }

    pub fn as_int(&self) -> Result<i32> {
        match *self.require_value()? {
            Value::Int(v) => Ok(v),
            ref other => Err(mismatch("int", other)),
        }
    }

    pub fn as_bool(&self) -> Result<bool> {
        match *self.require_value()? {
            Value::Bool(v) => Ok(v),
            ref other => Err(mismatch("boolean", other)),
        }
    }

    pub fn as_double(&self) -> Result<f64> {
        match *self.require_value()? {
            Value::Double(v) => Ok(v),
            ref other => Err(mismatch("double", other)),
        }
    }

    pub fn as_datetime(&self) -> Result<NaiveDateTime> {
        match *self.require_value()? {
            Value::DateTime(v) => Ok(v),
            ref other => Err(mismatch("dateTime.iso8601", other)),
        }
    }

    pub fn as_bytes(&self) -> Result<&[u8]> {
        match *self.require_value()? {
            Value::Base64(ref v) => Ok(v),
            ref other => Err(mismatch("base64", other)),
        }
    }

    pub fn as_array(&self) -> Result<&[Value]> {
        match *self.require_value()? {
            Value::Array(ref v) => Ok(v),
            ref other => Err(mismatch("array", other)),
        }
    }

    pub fn as_struct(&self) -> Result<&[(String, Value)]> {
        match *self.require_value()? {
            Value::Struct(ref v) => Ok(v),
            ref other => Err(mismatch("struct", other)),
        }
    }

    /// Renders the underlying value of any kind to a human-readable string,
    /// arrays as `[a, b]` and structs as `{k: v}`.
    ///
    /// Unlike the other accessors this never fails on a kind mismatch, only
    /// on an absent value.
    pub fn as_string(&self) -> Result<String> {
        Ok(self.require_value()?.to_string())
    }
}

fn mismatch(expected: &'static str, found: &Value) -> Error {
    Error::TypeMismatch {
        expected,
        found: found.type_name(),
    }
}
