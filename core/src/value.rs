use std::collections::BTreeMap;
use std::collections::HashMap;
use std::fmt;

use crate::Error;
use crate::Result;

/// Value is a field or entry value before stringification.
///
/// Only scalars have a canonical string form. `Seq` is accepted at the top
/// of a mapping entry (its first element is signed), `Map` exists so nested
/// objects coming from JSON can be reported instead of silently flattened.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absent value, rendered as the empty string.
    Null,
    /// Boolean, rendered as `true` or `false`.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Unsigned integer.
    UInt(u64),
    /// Floating point number, rendered with the shortest round-trip form.
    Float(f64),
    /// Single precision float, rendered with its own shortest round-trip
    /// form so `0.1f32` stays `0.1`.
    Float32(f32),
    /// String, rendered verbatim.
    Str(String),
    /// Sequence of values.
    Seq(Vec<Value>),
    /// Nested object.
    Map(Vec<(String, Value)>),
}

impl Value {
    /// Short name of the value's kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::UInt(_) => "uint",
            Value::Float(_) | Value::Float32(_) => "float",
            Value::Str(_) => "string",
            Value::Seq(_) => "sequence",
            Value::Map(_) => "map",
        }
    }

    /// Returns true if the value is a scalar.
    pub fn is_scalar(&self) -> bool {
        !matches!(self, Value::Seq(_) | Value::Map(_))
    }

    /// Render a scalar value as its canonical string.
    ///
    /// `key` only decorates the error returned for composite values.
    pub fn stringify(&self, key: &str) -> Result<String> {
        match self {
            Value::Null => Ok(String::new()),
            Value::Bool(v) => Ok(v.to_string()),
            Value::Int(v) => Ok(v.to_string()),
            Value::UInt(v) => Ok(v.to_string()),
            Value::Float(v) => Ok(v.to_string()),
            Value::Float32(v) => Ok(v.to_string()),
            Value::Str(v) => Ok(v.clone()),
            Value::Seq(_) | Value::Map(_) => Err(Error::stringification(format!(
                "field {key:?}: {} value has no canonical string form",
                self.kind()
            ))),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.stringify("") {
            Ok(s) => f.write_str(&s),
            Err(_) => write!(f, "<{}>", self.kind()),
        }
    }
}

/// ToValue converts a Rust value into a [`Value`].
pub trait ToValue {
    /// Convert into a [`Value`].
    fn to_value(&self) -> Value;
}

impl<T: ToValue + ?Sized> ToValue for &T {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: ToValue + ?Sized> ToValue for Box<T> {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl ToValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl ToValue for str {
    fn to_value(&self) -> Value {
        Value::Str(self.to_string())
    }
}

impl ToValue for String {
    fn to_value(&self) -> Value {
        Value::Str(self.clone())
    }
}

impl ToValue for char {
    fn to_value(&self) -> Value {
        Value::Str(self.to_string())
    }
}

impl ToValue for bool {
    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

macro_rules! impl_to_value {
    ($variant:ident, $as:ty, $($t:ty),+) => {
        $(
            impl ToValue for $t {
                fn to_value(&self) -> Value {
                    Value::$variant(*self as $as)
                }
            }
        )+
    };
}

impl_to_value!(Int, i64, i8, i16, i32, i64, isize);
impl_to_value!(UInt, u64, u8, u16, u32, u64, usize);
impl_to_value!(Float, f64, f64);
impl_to_value!(Float32, f32, f32);

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value {
        match self {
            Some(v) => v.to_value(),
            None => Value::Null,
        }
    }
}

impl<T: ToValue> ToValue for [T] {
    fn to_value(&self) -> Value {
        Value::Seq(self.iter().map(ToValue::to_value).collect())
    }
}

impl<T: ToValue, const N: usize> ToValue for [T; N] {
    fn to_value(&self) -> Value {
        self.as_slice().to_value()
    }
}

impl<T: ToValue> ToValue for Vec<T> {
    fn to_value(&self) -> Value {
        self.as_slice().to_value()
    }
}

impl<K: AsRef<str>, V: ToValue> ToValue for BTreeMap<K, V> {
    fn to_value(&self) -> Value {
        Value::Map(
            self.iter()
                .map(|(k, v)| (k.as_ref().to_string(), v.to_value()))
                .collect(),
        )
    }
}

impl<K: AsRef<str>, V: ToValue, S> ToValue for HashMap<K, V, S> {
    fn to_value(&self) -> Value {
        Value::Map(
            self.iter()
                .map(|(k, v)| (k.as_ref().to_string(), v.to_value()))
                .collect(),
        )
    }
}

impl ToValue for serde_json::Value {
    fn to_value(&self) -> Value {
        match self {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(v) => Value::Bool(*v),
            serde_json::Value::Number(n) => {
                if let Some(v) = n.as_u64() {
                    Value::UInt(v)
                } else if let Some(v) = n.as_i64() {
                    Value::Int(v)
                } else {
                    Value::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(v) => Value::Str(v.clone()),
            serde_json::Value::Array(vs) => Value::Seq(vs.iter().map(ToValue::to_value).collect()),
            serde_json::Value::Object(m) => Value::Map(
                m.iter()
                    .map(|(k, v)| (k.clone(), v.to_value()))
                    .collect(),
            ),
        }
    }
}
