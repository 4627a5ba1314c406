//! Log-call arguments and the metadata shapes they normalise into.

use serde::Serialize;
use serde_json::{Map, Value};

/// One argument of a log call.
///
/// The variant decides how a lone trailing argument is attached: structured
/// values become the metadata directly, primitives are wrapped under a
/// `meta` key.
#[derive(Clone, Debug, PartialEq)]
pub enum LogArg {
    /// Numbers, strings, booleans and `null`.
    Primitive(Value),
    /// Objects and arrays.
    Structured(Value),
}

impl LogArg {
    /// Serialise `value` and classify the result.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<Self> {
        serde_json::to_value(value).map(Self::from)
    }

    /// The message text, when this argument is a string.
    pub fn as_message(&self) -> Option<&str> {
        match self {
            Self::Primitive(Value::String(text)) => Some(text),
            _ => None,
        }
    }

    pub fn is_structured(&self) -> bool {
        matches!(self, Self::Structured(_))
    }

    pub fn into_value(self) -> Value {
        match self {
            Self::Primitive(value) | Self::Structured(value) => value,
        }
    }
}

impl From<Value> for LogArg {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(_) | Value::Array(_) => Self::Structured(value),
            other => Self::Primitive(other),
        }
    }
}

impl From<Map<String, Value>> for LogArg {
    fn from(map: Map<String, Value>) -> Self {
        Self::Structured(Value::Object(map))
    }
}

impl From<Vec<Value>> for LogArg {
    fn from(items: Vec<Value>) -> Self {
        Self::Structured(Value::Array(items))
    }
}

impl From<&str> for LogArg {
    fn from(text: &str) -> Self {
        Self::Primitive(Value::String(text.to_owned()))
    }
}

impl From<String> for LogArg {
    fn from(text: String) -> Self {
        Self::Primitive(Value::String(text))
    }
}

/// Non-finite floats have no JSON form and become `null`.
impl From<f64> for LogArg {
    fn from(number: f64) -> Self {
        Self::Primitive(Value::from(number))
    }
}

/// Non-finite floats have no JSON form and become `null`.
impl From<f32> for LogArg {
    fn from(number: f32) -> Self {
        Self::Primitive(Value::from(number))
    }
}

macro_rules! primitive_from {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl From<$ty> for LogArg {
                fn from(value: $ty) -> Self {
                    Self::Primitive(Value::from(value))
                }
            }
        )+
    };
}

primitive_from!(bool, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

/// Metadata attached to a normalised message.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Meta {
    /// A single structured value, or a wrapped primitive.
    Value(Value),
    /// Several trailing arguments, in call order.
    List(Vec<Value>),
}
