// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Tokens produced by the streaming tokenizer.

use crate::wire::WireType;

/// One unit of the token stream: a structural marker, a decoded literal, or
/// an eagerly decoded typed array.
///
/// `ListStart`/`ListEnd` and `DictStart`/`DictEnd` are always balanced in a
/// well-formed stream; an unmatched bracket is a format error, never a panic.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Format magic header. Consumed and discarded by the binder, only
    /// visible to callers driving the tokenizer directly.
    Signature,
    ListStart,
    ListEnd,
    DictStart,
    DictEnd,
    /// Homogeneous fixed-width numeric array, decoded into native elements.
    TypedArray(TypedSlice),
    Literal(Literal),
}

/// A decoded scalar literal.
///
/// The three IEEE specials (NaN, +-Infinity) arrive as `F64` values; the
/// writer maps them back to their dedicated tag bytes.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Null,
    Bool(bool),
    Str(String),
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
}

impl Literal {
    /// Human-readable kind name for error reporting.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Str(_) => "string",
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
        }
    }

    pub fn is_numeric(&self) -> bool {
        !matches!(self, Self::Null | Self::Bool(_) | Self::Str(_))
    }
}

impl Token {
    /// Human-readable kind name for error reporting.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Signature => "signature",
            Self::ListStart => "list start",
            Self::ListEnd => "list end",
            Self::DictStart => "dict start",
            Self::DictEnd => "dict end",
            Self::TypedArray(_) => "typed array",
            Self::Literal(lit) => lit.kind_name(),
        }
    }
}

/// Payload of a typed array: one vector per numeric wire type.
///
/// A reserved float16 element type is widened during tokenization and lands
/// in the `F32` variant.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedSlice {
    I8(Vec<i8>),
    I16(Vec<i16>),
    I32(Vec<i32>),
    I64(Vec<i64>),
    U8(Vec<u8>),
    U16(Vec<u16>),
    U32(Vec<u32>),
    U64(Vec<u64>),
    F32(Vec<f32>),
    F64(Vec<f64>),
}

macro_rules! for_each_slice {
    ($self:expr, $v:pat => $body:expr) => {
        match $self {
            TypedSlice::I8($v) => $body,
            TypedSlice::I16($v) => $body,
            TypedSlice::I32($v) => $body,
            TypedSlice::I64($v) => $body,
            TypedSlice::U8($v) => $body,
            TypedSlice::U16($v) => $body,
            TypedSlice::U32($v) => $body,
            TypedSlice::U64($v) => $body,
            TypedSlice::F32($v) => $body,
            TypedSlice::F64($v) => $body,
        }
    };
}

impl TypedSlice {
    /// The semantic element type carried by this slice.
    pub fn element_type(&self) -> WireType {
        match self {
            Self::I8(_) => WireType::I8,
            Self::I16(_) => WireType::I16,
            Self::I32(_) => WireType::I32,
            Self::I64(_) => WireType::I64,
            Self::U8(_) => WireType::U8,
            Self::U16(_) => WireType::U16,
            Self::U32(_) => WireType::U32,
            Self::U64(_) => WireType::U64,
            Self::F32(_) => WireType::F32,
            Self::F64(_) => WireType::F64,
        }
    }

    pub fn len(&self) -> usize {
        for_each_slice!(self, v => v.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Lift each element into a scalar literal, for binding into sequence
    /// targets of a different element type.
    pub fn into_literals(self) -> Vec<Literal> {
        match self {
            Self::I8(v) => v.into_iter().map(Literal::I8).collect(),
            Self::I16(v) => v.into_iter().map(Literal::I16).collect(),
            Self::I32(v) => v.into_iter().map(Literal::I32).collect(),
            Self::I64(v) => v.into_iter().map(Literal::I64).collect(),
            Self::U8(v) => v.into_iter().map(Literal::U8).collect(),
            Self::U16(v) => v.into_iter().map(Literal::U16).collect(),
            Self::U32(v) => v.into_iter().map(Literal::U32).collect(),
            Self::U64(v) => v.into_iter().map(Literal::U64).collect(),
            Self::F32(v) => v.into_iter().map(Literal::F32).collect(),
            Self::F64(v) => v.into_iter().map(Literal::F64).collect(),
        }
    }
}
