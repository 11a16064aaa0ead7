// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Wire-to-value binding.
//!
//! [`Decoder`] wraps the tokenizer and reconciles the wire shape it
//! discovers with the target shape: statically known through a [`Decode`]
//! impl, or inferred from the token kind for the dynamically-typed
//! [`Value`] target. Numeric literals widen or narrow to the target width;
//! shape mismatches abort the decode.

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

use crate::error::{Error, Result};
use crate::reader::Reader;
use crate::token::{Literal, Token};
use crate::value::Value;

/// Token-stream consumer for one decode call.
///
/// Owns the tokenizer cursor; one decoder per stream, never shared across
/// concurrent callers.
pub struct Decoder<'a> {
    reader: Reader<'a>,
}

impl<'a> Decoder<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            reader: Reader::new(bytes),
        }
    }

    /// Raw tokenizer access: next token or `None` at a clean end of stream.
    /// Unlike [`Decoder::next_value_token`] this surfaces `Signature`.
    pub fn next_token(&mut self) -> Result<Option<Token>> {
        self.reader.next_token()
    }

    /// Current byte offset into the source.
    pub fn offset(&self) -> usize {
        self.reader.offset()
    }

    /// Next token with signatures transparently skipped; end of stream in
    /// the middle of a value is a truncation error.
    pub fn next_value_token(&mut self) -> Result<Token> {
        loop {
            match self.reader.next_token()? {
                None => {
                    return Err(Error::ReadFailed {
                        offset: self.reader.offset(),
                        reason: "unexpected end of stream".into(),
                    })
                }
                Some(Token::Signature) => continue,
                Some(token) => return Ok(token),
            }
        }
    }

    /// Bind the next value in the stream to `T`.
    pub fn decode<T: Decode>(&mut self) -> Result<T> {
        T::decode(self)
    }

    /// Consume one complete value without binding it, keeping the stream
    /// aligned. Used for dictionary entries with no matching record member.
    pub fn skip_value(&mut self) -> Result<()> {
        log::trace!("skipping unbound value at offset {}", self.offset());
        let mut depth = 0usize;
        loop {
            match self.next_value_token()? {
                Token::ListStart | Token::DictStart => depth += 1,
                Token::ListEnd | Token::DictEnd => {
                    if depth == 0 {
                        return Err(Error::Format {
                            offset: self.offset(),
                            reason: "unbalanced bracket while skipping value".into(),
                        });
                    }
                    depth -= 1;
                    if depth == 0 {
                        return Ok(());
                    }
                }
                Token::TypedArray(_) | Token::Literal(_) => {
                    if depth == 0 {
                        return Ok(());
                    }
                }
                Token::Signature => unreachable!("signatures skipped by next_value_token"),
            }
        }
    }
}

/// A target shape reconstructible from the token stream.
pub trait Decode: Sized {
    /// Pull the next token and bind it. Signatures are skipped before the
    /// first value token, so a nested decode re-enters cleanly.
    fn decode(d: &mut Decoder<'_>) -> Result<Self> {
        let token = d.next_value_token()?;
        Self::decode_token(d, token)
    }

    /// Bind an already-pulled token, consuming any continuation tokens
    /// (list/dict bodies) from the decoder.
    fn decode_token(d: &mut Decoder<'_>, token: Token) -> Result<Self>;
}

/// Decode one value from wire bytes.
///
/// Trailing bytes after the value are not an error; callers framing several
/// values drive a [`Decoder`] directly.
pub fn from_slice<T: Decode>(bytes: &[u8]) -> Result<T> {
    let mut d = Decoder::new(bytes);
    d.decode()
}

macro_rules! lit_cast {
    ($lit:expr, $ty:ty) => {
        // Null resets a scalar to its zero value; numeric literals convert
        // with `as` semantics (widening or narrowing); everything else is a
        // shape mismatch.
        match $lit {
            Literal::Null => Ok(<$ty>::default()),
            Literal::I8(v) => Ok(v as $ty),
            Literal::I16(v) => Ok(v as $ty),
            Literal::I32(v) => Ok(v as $ty),
            Literal::I64(v) => Ok(v as $ty),
            Literal::U8(v) => Ok(v as $ty),
            Literal::U16(v) => Ok(v as $ty),
            Literal::U32(v) => Ok(v as $ty),
            Literal::U64(v) => Ok(v as $ty),
            Literal::F32(v) => Ok(v as $ty),
            Literal::F64(v) => Ok(v as $ty),
            other => Err(Error::mismatch(stringify!($ty), other.kind_name())),
        }
    };
}

macro_rules! impl_decode_numeric {
    ($ty:ty) => {
        impl Decode for $ty {
            fn decode_token(_d: &mut Decoder<'_>, token: Token) -> Result<Self> {
                match token {
                    Token::Literal(lit) => lit_cast!(lit, $ty),
                    other => Err(Error::mismatch(stringify!($ty), other.kind_name())),
                }
            }
        }
    };
}

impl_decode_numeric!(i8);
impl_decode_numeric!(i16);
impl_decode_numeric!(i32);
impl_decode_numeric!(i64);
impl_decode_numeric!(u8);
impl_decode_numeric!(u16);
impl_decode_numeric!(u32);
impl_decode_numeric!(u64);
impl_decode_numeric!(f32);
impl_decode_numeric!(f64);
impl_decode_numeric!(isize);
impl_decode_numeric!(usize);

impl Decode for bool {
    fn decode_token(_d: &mut Decoder<'_>, token: Token) -> Result<Self> {
        match token {
            Token::Literal(Literal::Null) => Ok(false),
            Token::Literal(Literal::Bool(v)) => Ok(v),
            other => Err(Error::mismatch("bool", other.kind_name())),
        }
    }
}

impl Decode for String {
    fn decode_token(_d: &mut Decoder<'_>, token: Token) -> Result<Self> {
        match token {
            Token::Literal(Literal::Null) => Ok(String::new()),
            Token::Literal(Literal::Str(v)) => Ok(v),
            other => Err(Error::mismatch("string", other.kind_name())),
        }
    }
}

impl<T: Decode> Decode for Option<T> {
    fn decode_token(d: &mut Decoder<'_>, token: Token) -> Result<Self> {
        match token {
            Token::Literal(Literal::Null) => Ok(None),
            token => T::decode_token(d, token).map(Some),
        }
    }
}

impl<T: Decode> Decode for Box<T> {
    fn decode_token(d: &mut Decoder<'_>, token: Token) -> Result<Self> {
        T::decode_token(d, token).map(Box::new)
    }
}

impl<T: Decode> Decode for Vec<T> {
    fn decode_token(d: &mut Decoder<'_>, token: Token) -> Result<Self> {
        match token {
            Token::ListStart => {
                let mut out = Vec::new();
                loop {
                    match d.next_value_token()? {
                        Token::ListEnd => return Ok(out),
                        token => out.push(T::decode_token(d, token)?),
                    }
                }
            }
            // Typed arrays bind element-wise with the same conversion rules
            // as scalar literals.
            Token::TypedArray(slice) => {
                let mut out = Vec::with_capacity(slice.len());
                for lit in slice.into_literals() {
                    out.push(T::decode_token(d, Token::Literal(lit))?);
                }
                Ok(out)
            }
            Token::Literal(Literal::Null) => Ok(Vec::new()),
            other => Err(Error::mismatch("list", other.kind_name())),
        }
    }
}

/// Fixed-capacity sequence: elements bind by index, unfilled slots keep
/// their zero value, and excess wire elements are a truncation error.
impl<T: Decode + Default, const N: usize> Decode for [T; N] {
    fn decode_token(d: &mut Decoder<'_>, token: Token) -> Result<Self> {
        let items: Vec<T> = Vec::decode_token(d, token)?;
        if items.len() > N {
            return Err(Error::ReadFailed {
                offset: d.offset(),
                reason: format!("sequence of {} exceeds fixed capacity {}", items.len(), N),
            });
        }
        let mut out: [T; N] = std::array::from_fn(|_| T::default());
        for (slot, item) in out.iter_mut().zip(items) {
            *slot = item;
        }
        Ok(out)
    }
}

fn decode_entries<K: Decode, V: Decode>(
    d: &mut Decoder<'_>,
    token: Token,
    mut insert: impl FnMut(K, V),
) -> Result<()> {
    match token {
        Token::DictStart => loop {
            match d.next_value_token()? {
                Token::DictEnd => return Ok(()),
                token => {
                    let key = K::decode_token(d, token)?;
                    let value = V::decode(d)?;
                    insert(key, value);
                }
            }
        },
        Token::Literal(Literal::Null) => Ok(()),
        other => Err(Error::mismatch("dict", other.kind_name())),
    }
}

impl<K: Decode + Eq + Hash, V: Decode> Decode for HashMap<K, V> {
    fn decode_token(d: &mut Decoder<'_>, token: Token) -> Result<Self> {
        let mut out = HashMap::new();
        decode_entries(d, token, |k, v| {
            out.insert(k, v);
        })?;
        Ok(out)
    }
}

impl<K: Decode + Ord, V: Decode> Decode for BTreeMap<K, V> {
    fn decode_token(d: &mut Decoder<'_>, token: Token) -> Result<Self> {
        let mut out = BTreeMap::new();
        decode_entries(d, token, |k, v| {
            out.insert(k, v);
        })?;
        Ok(out)
    }
}

/// Dynamically-typed target: the concrete shape is inferred from the token
/// kind, then filled in recursively.
impl Decode for Value {
    fn decode_token(d: &mut Decoder<'_>, token: Token) -> Result<Self> {
        match token {
            Token::Literal(lit) => Ok(Value::from(lit)),
            Token::ListStart => {
                let mut items = Vec::new();
                loop {
                    match d.next_value_token()? {
                        Token::ListEnd => return Ok(Value::List(items)),
                        token => items.push(Value::decode_token(d, token)?),
                    }
                }
            }
            Token::DictStart => {
                let mut entries = Vec::new();
                loop {
                    match d.next_value_token()? {
                        Token::DictEnd => return Ok(Value::Dict(entries)),
                        token => {
                            let key = Value::decode_token(d, token)?;
                            let value = Value::decode(d)?;
                            entries.push((key, value));
                        }
                    }
                }
            }
            Token::TypedArray(slice) => Ok(Value::List(
                slice.into_literals().into_iter().map(Value::from).collect(),
            )),
            other @ (Token::ListEnd | Token::DictEnd) => Err(Error::Format {
                offset: d.offset(),
                reason: format!("unbalanced {}", other.kind_name()),
            }),
            Token::Signature => unreachable!("signatures skipped by next_value_token"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_widening_and_narrowing() {
        // 0xB0 int8 127 binds to every wider integer target.
        let bytes = [0xB0, 0x7F];
        assert_eq!(from_slice::<i8>(&bytes).expect("binds"), 127);
        assert_eq!(from_slice::<i16>(&bytes).expect("binds"), 127);
        assert_eq!(from_slice::<i64>(&bytes).expect("binds"), 127);
        assert_eq!(from_slice::<u8>(&bytes).expect("binds"), 127);

        // Inline small integers bind regardless of target width.
        assert_eq!(from_slice::<u16>(&[0xA9]).expect("binds"), 9);
        assert_eq!(from_slice::<f64>(&[0xA9]).expect("binds"), 9.0);
    }

    #[test]
    fn test_null_resets_scalars() {
        assert_eq!(from_slice::<i32>(&[0xAC]).expect("binds"), 0);
        assert!(!from_slice::<bool>(&[0xAC]).expect("binds"));
        assert_eq!(from_slice::<String>(&[0xAC]).expect("binds"), "");
        assert_eq!(from_slice::<Option<i32>>(&[0xAC]).expect("binds"), None);
        assert_eq!(from_slice::<Vec<i64>>(&[0xAC]).expect("binds"), Vec::<i64>::new());
    }

    #[test]
    fn test_shape_mismatches() {
        // Dict start bound to a sequence target.
        assert!(matches!(
            from_slice::<Vec<i64>>(&[0x92, 0x93]),
            Err(Error::TypeMismatch { .. })
        ));
        // String literal bound to a numeric target.
        assert!(matches!(
            from_slice::<i64>(&[0x61, 0x00]),
            Err(Error::TypeMismatch { .. })
        ));
        // Numeric literal bound to a string target.
        assert!(matches!(
            from_slice::<String>(&[0xA5]),
            Err(Error::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_typed_array_into_sequences() {
        let bytes = [0x84, 0xB4, 0x02, 0x05, 0x10];
        assert_eq!(from_slice::<Vec<u8>>(&bytes).expect("binds"), vec![5, 16]);
        // Element-wise widening into a wider target.
        assert_eq!(from_slice::<Vec<i64>>(&bytes).expect("binds"), vec![5, 16]);
        let arr: [u8; 2] = from_slice(&bytes).expect("binds");
        assert_eq!(arr, [5, 16]);
    }

    #[test]
    fn test_fixed_capacity_overflow() {
        let bytes = [0x90, 0xA1, 0xA2, 0xA3, 0x91];
        assert!(matches!(
            from_slice::<[i64; 2]>(&bytes),
            Err(Error::ReadFailed { .. })
        ));
        let arr: [i64; 4] = from_slice(&bytes).expect("short input keeps zeros");
        assert_eq!(arr, [1, 2, 3, 0]);
    }

    #[test]
    fn test_map_target() {
        let bytes = [0x92, 0x61, 0x00, 0x62, 0x00, 0x93];
        let m: HashMap<String, String> = from_slice(&bytes).expect("binds");
        assert_eq!(m.get("a").map(String::as_str), Some("b"));

        let m: BTreeMap<String, i64> = from_slice(&[0xAC]).expect("null is empty");
        assert!(m.is_empty());
    }

    #[test]
    fn test_dynamic_inference() {
        let v: Value = from_slice(&[0x90, 0x74, 0x65, 0x73, 0x74, 0x00, 0xAB, 0x91]).expect("binds");
        assert_eq!(
            v,
            Value::List(vec![Value::from("test"), Value::Bool(true)])
        );

        let v: Value = from_slice(&[0x92, 0x61, 0x00, 0xA5, 0x93]).expect("binds");
        assert_eq!(v.get("a"), Some(&Value::I64(5)));

        let v: Value = from_slice(&[0x84, 0xB3, 0x01, 0x2A, 0, 0, 0, 0, 0, 0, 0]).expect("binds");
        assert_eq!(v, Value::List(vec![Value::I64(42)]));
    }

    #[test]
    fn test_signature_transparent_skip() {
        let bytes = [0x8F, 0xB5, 0x30, 0x31, 0x74, 0x65, 0x73, 0x74, 0x00];
        assert_eq!(from_slice::<String>(&bytes).expect("binds"), "test");
    }

    #[test]
    fn test_missing_list_end_is_an_error() {
        assert!(from_slice::<Vec<i64>>(&[0x90, 0xA1, 0xA2]).is_err());
        assert!(from_slice::<Value>(&[0x92, 0x61, 0x00]).is_err());
    }

    #[test]
    fn test_skip_value_alignment() {
        // Skip a nested dict, then read the following literal.
        let bytes = [0x92, 0x61, 0x00, 0x92, 0x62, 0x00, 0xA1, 0x93, 0x93, 0xA7];
        let mut d = Decoder::new(&bytes);
        d.skip_value().expect("skips whole dict");
        assert_eq!(d.decode::<i64>().expect("aligned"), 7);
    }

    #[test]
    fn test_unbalanced_end_token() {
        assert!(matches!(
            from_slice::<Value>(&[0x91]),
            Err(Error::Format { .. })
        ));
    }
}
