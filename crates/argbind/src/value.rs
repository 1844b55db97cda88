use crate::error::MemberError;
use argbind_metadata::TargetKind;
use serde::ser::{Serialize, SerializeSeq, Serializer};

/// A converted value, ready to be handed to a target.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Enum { index: usize, symbol: String },
    /// Nullable and optional members: `None` when no input was given.
    Maybe(Option<Box<Value>>),
    Sequence(Vec<Value>),
}

impl Value {
    /// The value a member of `kind` takes when nothing was supplied and no
    /// default was declared.
    pub fn zero(kind: &TargetKind) -> Self {
        match kind {
            TargetKind::Bool => Self::Bool(false),
            TargetKind::Integer(_) => Self::Integer(0),
            TargetKind::Float => Self::Float(0.0),
            TargetKind::String => Self::String(String::new()),
            TargetKind::Enum { symbols } => Self::Enum {
                index: 0,
                symbol: symbols.first().cloned().unwrap_or_default(),
            },
            TargetKind::Nullable(_) | TargetKind::Optional(_) => Self::Maybe(None),
            TargetKind::Sequence(_) => Self::Sequence(Vec::new()),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Enum { .. } => "enum",
            Self::Maybe(_) => "maybe",
            Self::Sequence(_) => "sequence",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s.as_str()),
            Self::Enum { symbol, .. } => Some(symbol.as_str()),
            _ => None,
        }
    }

    pub fn enum_index(&self) -> Option<usize> {
        match self {
            Self::Enum { index, .. } => Some(*index),
            _ => None,
        }
    }

    /// Convert into a member type.
    pub fn get<T: FromValue>(self) -> Result<T, MemberError> {
        T::from_value(self)
    }

    fn mismatch<T>(self, expected: &'static str) -> Result<T, MemberError> {
        Err(MemberError::TypeMismatch {
            expected,
            found: self.type_name(),
        })
    }
}

/// Enums serialize as their symbol, absent wrappers as `null`.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Integer(i) => serializer.serialize_i64(*i),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::String(s) => serializer.serialize_str(s),
            Value::Enum { symbol, .. } => serializer.serialize_str(symbol),
            Value::Maybe(None) => serializer.serialize_none(),
            Value::Maybe(Some(inner)) => serializer.serialize_some(inner.as_ref()),
            Value::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}

/// Member types a [`Value`] can be turned into.
pub trait FromValue: Sized {
    fn from_value(value: Value) -> Result<Self, MemberError>;
}

impl FromValue for Value {
    fn from_value(value: Value) -> Result<Self, MemberError> {
        Ok(value)
    }
}

impl FromValue for bool {
    fn from_value(value: Value) -> Result<Self, MemberError> {
        match value {
            Value::Bool(b) => Ok(b),
            other => other.mismatch("bool"),
        }
    }
}

impl FromValue for i64 {
    fn from_value(value: Value) -> Result<Self, MemberError> {
        match value {
            Value::Integer(i) => Ok(i),
            other => other.mismatch("integer"),
        }
    }
}

macro_rules! narrow_int {
    ($($t:ty),*) => {
        $(
            impl FromValue for $t {
                fn from_value(value: Value) -> Result<Self, MemberError> {
                    let i = i64::from_value(value)?;
                    <$t>::try_from(i).map_err(|_| MemberError::OutOfRange(i))
                }
            }
        )*
    };
}

narrow_int!(i8, i16, i32);

/// Enum members are commonly stored by index.
impl FromValue for usize {
    fn from_value(value: Value) -> Result<Self, MemberError> {
        match value {
            Value::Enum { index, .. } => Ok(index),
            Value::Integer(i) => usize::try_from(i).map_err(|_| MemberError::OutOfRange(i)),
            other => other.mismatch("enum"),
        }
    }
}

impl FromValue for f64 {
    fn from_value(value: Value) -> Result<Self, MemberError> {
        match value {
            Value::Float(f) => Ok(f),
            other => other.mismatch("float"),
        }
    }
}

impl FromValue for f32 {
    fn from_value(value: Value) -> Result<Self, MemberError> {
        f64::from_value(value).map(|f| f as f32)
    }
}

impl FromValue for String {
    fn from_value(value: Value) -> Result<Self, MemberError> {
        match value {
            Value::String(s) => Ok(s),
            Value::Enum { symbol, .. } => Ok(symbol),
            other => other.mismatch("string"),
        }
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: Value) -> Result<Self, MemberError> {
        match value {
            Value::Sequence(items) => items.into_iter().map(T::from_value).collect(),
            other => other.mismatch("sequence"),
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> Result<Self, MemberError> {
        match value {
            Value::Maybe(None) => Ok(None),
            Value::Maybe(Some(inner)) => T::from_value(*inner).map(Some),
            other => T::from_value(other).map(Some),
        }
    }
}
