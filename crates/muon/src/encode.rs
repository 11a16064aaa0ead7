// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Value-to-wire encoding.
//!
//! [`Encode`] is a closed dispatch over the kinds the format can carry.
//! Numeric impls advertise a [`WireType`] so homogeneous sequences can take
//! the untagged typed-array fast path; every other sequence falls back to a
//! bracketed list.

use std::collections::{BTreeMap, HashMap};

use crate::error::{Error, Result};
use crate::value::Value;
use crate::wire::WireType;
use crate::writer::Writer;

/// A value with a Muon wire representation.
pub trait Encode {
    /// Write `self` as one complete tagged value.
    fn encode(&self, w: &mut Writer) -> Result<()>;

    /// The registry wire type for fixed-width numeric kinds, `None` for
    /// everything else. Consulted by sequence encoders to choose the
    /// typed-array fast path.
    fn wire_type() -> Option<WireType>
    where
        Self: Sized,
    {
        None
    }

    /// Write `self` as an untagged fixed-width typed-array element. Only
    /// called when [`Encode::wire_type`] returned `Some`.
    fn encode_element(&self, w: &mut Writer) -> Result<()> {
        self.encode(w)
    }

    /// Whether this kind may appear as a dict key (strings and registry
    /// numerics only).
    fn is_key_kind() -> bool
    where
        Self: Sized,
    {
        false
    }
}

/// Encode one value to wire bytes.
pub fn to_vec<T: Encode + ?Sized>(value: &T) -> Result<Vec<u8>> {
    let mut w = Writer::new();
    value.encode(&mut w)?;
    Ok(w.into_bytes())
}

/// Encode one value to wire bytes, preceded by the 4-byte format signature.
pub fn to_vec_with_signature<T: Encode + ?Sized>(value: &T) -> Result<Vec<u8>> {
    let mut w = Writer::with_signature();
    value.encode(&mut w)?;
    Ok(w.into_bytes())
}

/// Custom marshaling: a value that produces its own wire bytes, honored
/// verbatim by [`Writer::write_raw`]. Checked before generic dispatch by
/// `Encode` impls that delegate to it.
pub trait MarshalMuon {
    fn marshal_muon(&self) -> Result<Vec<u8>>;
}

/// Custom marshaling, streaming flavor: writes directly to the sink.
pub trait MarshalMuonTo {
    fn marshal_muon_to(&self, w: &mut Writer) -> Result<()>;
}

/// Honor a [`MarshalMuon`] implementation verbatim.
pub fn encode_custom<M: MarshalMuon + ?Sized>(value: &M, w: &mut Writer) -> Result<()> {
    let bytes = value.marshal_muon()?;
    w.write_raw(&bytes);
    Ok(())
}

macro_rules! impl_encode_numeric {
    ($ty:ty, $wt:ident, $write:ident) => {
        impl Encode for $ty {
            fn encode(&self, w: &mut Writer) -> Result<()> {
                w.$write(*self);
                Ok(())
            }

            fn wire_type() -> Option<WireType> {
                Some(WireType::$wt)
            }

            fn encode_element(&self, w: &mut Writer) -> Result<()> {
                w.write_element_bytes(&self.to_le_bytes());
                Ok(())
            }

            fn is_key_kind() -> bool {
                true
            }
        }
    };
}

impl_encode_numeric!(i8, I8, write_i8);
impl_encode_numeric!(i16, I16, write_i16);
impl_encode_numeric!(i32, I32, write_i32);
impl_encode_numeric!(i64, I64, write_i64);
impl_encode_numeric!(u8, U8, write_u8);
impl_encode_numeric!(u16, U16, write_u16);
impl_encode_numeric!(u32, U32, write_u32);
impl_encode_numeric!(u64, U64, write_u64);
impl_encode_numeric!(f32, F32, write_f32);
impl_encode_numeric!(f64, F64, write_f64);

// Native-width integers canonicalize to the 64-bit tags.
impl Encode for isize {
    fn encode(&self, w: &mut Writer) -> Result<()> {
        w.write_i64(*self as i64);
        Ok(())
    }

    fn wire_type() -> Option<WireType> {
        Some(WireType::I64)
    }

    fn encode_element(&self, w: &mut Writer) -> Result<()> {
        w.write_element_bytes(&(*self as i64).to_le_bytes());
        Ok(())
    }

    fn is_key_kind() -> bool {
        true
    }
}

impl Encode for usize {
    fn encode(&self, w: &mut Writer) -> Result<()> {
        w.write_u64(*self as u64);
        Ok(())
    }

    fn wire_type() -> Option<WireType> {
        Some(WireType::U64)
    }

    fn encode_element(&self, w: &mut Writer) -> Result<()> {
        w.write_element_bytes(&(*self as u64).to_le_bytes());
        Ok(())
    }

    fn is_key_kind() -> bool {
        true
    }
}

impl Encode for bool {
    fn encode(&self, w: &mut Writer) -> Result<()> {
        w.write_bool(*self);
        Ok(())
    }
}

impl Encode for str {
    fn encode(&self, w: &mut Writer) -> Result<()> {
        w.write_str(self);
        Ok(())
    }
}

impl Encode for String {
    fn encode(&self, w: &mut Writer) -> Result<()> {
        w.write_str(self);
        Ok(())
    }

    fn is_key_kind() -> bool {
        true
    }
}

impl Encode for &str {
    fn encode(&self, w: &mut Writer) -> Result<()> {
        w.write_str(self);
        Ok(())
    }

    fn is_key_kind() -> bool {
        true
    }
}

/// References and boxes encode as their referent.
impl<T: Encode + ?Sized> Encode for Box<T> {
    fn encode(&self, w: &mut Writer) -> Result<()> {
        (**self).encode(w)
    }
}

/// `None` encodes as null, mirroring nil-pointer encoding.
impl<T: Encode> Encode for Option<T> {
    fn encode(&self, w: &mut Writer) -> Result<()> {
        match self {
            Some(v) => v.encode(w),
            None => {
                w.write_null();
                Ok(())
            }
        }
    }
}

fn encode_sequence<T: Encode>(items: &[T], w: &mut Writer) -> Result<()> {
    if let Some(wt) = T::wire_type() {
        w.write_typed_array_header(wt, items.len());
        for item in items {
            item.encode_element(w)?;
        }
        Ok(())
    } else {
        w.write_list_start();
        for item in items {
            item.encode(w)?;
        }
        w.write_list_end();
        Ok(())
    }
}

impl<T: Encode> Encode for [T] {
    fn encode(&self, w: &mut Writer) -> Result<()> {
        encode_sequence(self, w)
    }
}

impl<T: Encode> Encode for &[T] {
    fn encode(&self, w: &mut Writer) -> Result<()> {
        encode_sequence(self, w)
    }
}

impl<T: Encode> Encode for Vec<T> {
    fn encode(&self, w: &mut Writer) -> Result<()> {
        encode_sequence(self, w)
    }
}

impl<T: Encode, const N: usize> Encode for [T; N] {
    fn encode(&self, w: &mut Writer) -> Result<()> {
        encode_sequence(self, w)
    }
}

fn encode_entries<'a, K, V, I>(entries: I, w: &mut Writer) -> Result<()>
where
    K: Encode + 'a,
    V: Encode + 'a,
    I: Iterator<Item = (&'a K, &'a V)>,
{
    if !K::is_key_kind() {
        return Err(Error::mismatch(
            "string or numeric dict key",
            std::any::type_name::<K>(),
        ));
    }
    w.write_dict_start();
    for (key, value) in entries {
        key.encode(w)?;
        value.encode(w)?;
    }
    w.write_dict_end();
    Ok(())
}

/// Entry order follows the map's iteration order (unspecified for hashed
/// maps; implementations are free to sort but this one does not).
impl<K: Encode, V: Encode> Encode for HashMap<K, V> {
    fn encode(&self, w: &mut Writer) -> Result<()> {
        encode_entries(self.iter(), w)
    }
}

impl<K: Encode, V: Encode> Encode for BTreeMap<K, V> {
    fn encode(&self, w: &mut Writer) -> Result<()> {
        encode_entries(self.iter(), w)
    }
}

/// Generic dispatch for dynamically-typed values: a closed match over the
/// representable kinds.
impl Encode for Value {
    fn encode(&self, w: &mut Writer) -> Result<()> {
        match self {
            Value::Null => w.write_null(),
            Value::Bool(v) => w.write_bool(*v),
            Value::String(v) => w.write_str(v),
            Value::I8(v) => w.write_i8(*v),
            Value::I16(v) => w.write_i16(*v),
            Value::I32(v) => w.write_i32(*v),
            Value::I64(v) => w.write_i64(*v),
            Value::U8(v) => w.write_u8(*v),
            Value::U16(v) => w.write_u16(*v),
            Value::U32(v) => w.write_u32(*v),
            Value::U64(v) => w.write_u64(*v),
            Value::F32(v) => w.write_f32(*v),
            Value::F64(v) => w.write_f64(*v),
            Value::List(items) => {
                w.write_list_start();
                for item in items {
                    item.encode(w)?;
                }
                w.write_list_end();
            }
            Value::Dict(entries) => {
                w.write_dict_start();
                for (key, value) in entries {
                    if !key.is_valid_key() {
                        return Err(Error::mismatch(
                            "string or numeric dict key",
                            key.kind_name(),
                        ));
                    }
                    key.encode(w)?;
                    value.encode(w)?;
                }
                w.write_dict_end();
            }
        }
        Ok(())
    }
}
