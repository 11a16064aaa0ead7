// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Dynamically-typed values.
//!
//! [`Value`] is the closed set of shapes a Muon stream can describe. It is
//! what a dynamically-typed decode target infers its concrete shape into,
//! and it encodes by matching on its own variant.

use crate::token::Literal;

/// A dynamic value covering every representable wire shape.
///
/// Dict entries keep wire order; Muon permits numeric keys, so entries are
/// stored as pairs rather than in a hashed map.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    String(String),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    List(Vec<Value>),
    Dict(Vec<(Value, Value)>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    /// Widen any integer variant that fits into i64.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::I8(v) => Some(i64::from(*v)),
            Self::I16(v) => Some(i64::from(*v)),
            Self::I32(v) => Some(i64::from(*v)),
            Self::I64(v) => Some(*v),
            Self::U8(v) => Some(i64::from(*v)),
            Self::U16(v) => Some(i64::from(*v)),
            Self::U32(v) => Some(i64::from(*v)),
            Self::U64(v) => i64::try_from(*v).ok(),
            _ => None,
        }
    }

    /// Widen any unsigned variant (or non-negative signed) into u64.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::U8(v) => Some(u64::from(*v)),
            Self::U16(v) => Some(u64::from(*v)),
            Self::U32(v) => Some(u64::from(*v)),
            Self::U64(v) => Some(*v),
            Self::I8(v) => u64::try_from(*v).ok(),
            Self::I16(v) => u64::try_from(*v).ok(),
            Self::I32(v) => u64::try_from(*v).ok(),
            Self::I64(v) => u64::try_from(*v).ok(),
            _ => None,
        }
    }

    /// Widen either float variant into f64.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::F32(v) => Some(f64::from(*v)),
            Self::F64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_dict(&self) -> Option<&[(Value, Value)]> {
        match self {
            Self::Dict(v) => Some(v),
            _ => None,
        }
    }

    /// Look up a dict entry by string key, first match wins.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Self::Dict(entries) => entries
                .iter()
                .find(|(k, _)| k.as_str() == Some(key))
                .map(|(_, v)| v),
            _ => None,
        }
    }

    /// Whether this variant may appear as a dict key on the wire.
    pub fn is_valid_key(&self) -> bool {
        !matches!(self, Self::Null | Self::Bool(_) | Self::List(_) | Self::Dict(_))
    }

    /// Human-readable kind name for error reporting.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::String(_) => "string",
            Self::I8(_) => "int8",
            Self::I16(_) => "int16",
            Self::I32(_) => "int32",
            Self::I64(_) => "int64",
            Self::U8(_) => "uint8",
            Self::U16(_) => "uint16",
            Self::U32(_) => "uint32",
            Self::U64(_) => "uint64",
            Self::F32(_) => "float32",
            Self::F64(_) => "float64",
            Self::List(_) => "list",
            Self::Dict(_) => "dict",
        }
    }
}

impl From<Literal> for Value {
    fn from(lit: Literal) -> Self {
        match lit {
            Literal::Null => Self::Null,
            Literal::Bool(v) => Self::Bool(v),
            Literal::Str(v) => Self::String(v),
            Literal::I8(v) => Self::I8(v),
            Literal::I16(v) => Self::I16(v),
            Literal::I32(v) => Self::I32(v),
            Literal::I64(v) => Self::I64(v),
            Literal::U8(v) => Self::U8(v),
            Literal::U16(v) => Self::U16(v),
            Literal::U32(v) => Self::U32(v),
            Literal::U64(v) => Self::U64(v),
            Literal::F32(v) => Self::F32(v),
            Literal::F64(v) => Self::F64(v),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::I64(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Self::U64(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::F64(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Self::List(v.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        assert!(Value::Null.is_null());
        assert_eq!(Value::Bool(true).as_bool(), Some(true));
        assert_eq!(Value::String("a".into()).as_str(), Some("a"));
        assert_eq!(Value::I8(-3).as_i64(), Some(-3));
        assert_eq!(Value::U32(7).as_u64(), Some(7));
        assert_eq!(Value::U64(u64::MAX).as_i64(), None);
        assert_eq!(Value::I64(-1).as_u64(), None);
        assert_eq!(Value::F32(1.5).as_f64(), Some(1.5));
        assert_eq!(Value::Bool(false).as_i64(), None);
    }

    #[test]
    fn test_dict_lookup() {
        let dict = Value::Dict(vec![
            (Value::from("a"), Value::from(1i64)),
            (Value::U8(2), Value::from("numeric key")),
        ]);
        assert_eq!(dict.get("a"), Some(&Value::I64(1)));
        assert_eq!(dict.get("missing"), None);
        assert!(Value::U8(2).is_valid_key());
        assert!(!Value::Bool(true).is_valid_key());
        assert!(!Value::List(vec![]).is_valid_key());
    }

    #[test]
    fn test_from_conversions() {
        let v: Value = vec!["a", "b"].into();
        assert_eq!(
            v,
            Value::List(vec![Value::from("a"), Value::from("b")])
        );
        assert_eq!(Value::from(Literal::U16(9)), Value::U16(9));
    }
}
