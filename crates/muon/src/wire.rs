// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Muon wire grammar: tag byte assignments and the numeric type registry.
//!
//! Every value on the wire is introduced by a single tag byte. Fixed-width
//! numerics carry one of the `0xB0..=0xBA` tags followed by their
//! little-endian payload; everything else is either a dedicated one-byte
//! token or a plain string.

/// String terminator; on its own it is the empty string.
pub const STRING_END: u8 = 0x00;
/// Homogeneous fixed-width numeric array marker.
pub const TYPED_ARRAY: u8 = 0x84;
/// Count prefix: ULEB128 byte length follows, applies to the next string.
pub const COUNT_PREFIX: u8 = 0x8A;
/// Size prefix: ULEB128 total-payload hint, read and discarded (reserved).
pub const SIZE_PREFIX: u8 = 0x8B;
/// First byte of the 4-byte format signature.
pub const SIGNATURE_START: u8 = 0x8F;
pub const LIST_START: u8 = 0x90;
pub const LIST_END: u8 = 0x91;
pub const DICT_START: u8 = 0x92;
pub const DICT_END: u8 = 0x93;
/// Base of the inline small-integer range; `0xA0..=0xA9` encode 0..=9.
pub const ZERO_BASE: u8 = 0xA0;
pub const BOOL_FALSE: u8 = 0xAA;
pub const BOOL_TRUE: u8 = 0xAB;
pub const NULL_VALUE: u8 = 0xAC;
pub const NAN_VALUE: u8 = 0xAD;
pub const NEG_INF_VALUE: u8 = 0xAE;
pub const POS_INF_VALUE: u8 = 0xAF;

pub const TYPE_INT8: u8 = 0xB0;
pub const TYPE_INT16: u8 = 0xB1;
pub const TYPE_INT32: u8 = 0xB2;
pub const TYPE_INT64: u8 = 0xB3;
pub const TYPE_UINT8: u8 = 0xB4;
pub const TYPE_UINT16: u8 = 0xB5;
pub const TYPE_UINT32: u8 = 0xB6;
pub const TYPE_UINT64: u8 = 0xB7;
pub const TYPE_FLOAT16: u8 = 0xB8;
pub const TYPE_FLOAT32: u8 = 0xB9;
pub const TYPE_FLOAT64: u8 = 0xBA;

/// Full signature: start marker, two magic bytes, format version `'1'`.
pub const SIGNATURE: [u8; 4] = [SIGNATURE_START, 0xB5, 0x30, 0x31];

/// Strings longer than this many bytes switch to the count-prefixed form.
pub const LONG_STRING_THRESHOLD: usize = 512;

/// A fixed-width numeric wire type.
///
/// The single source of truth for the kind <-> tag mapping consulted by the
/// writer (scalar and typed-array encoding) and the reader (fixed-width
/// literal and typed-array decoding). `F16` is reserved: the reader accepts
/// it and widens to f32, the writer never produces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WireType {
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F16,
    F32,
    F64,
}

impl WireType {
    /// Resolve a tag byte to its wire type, `None` for non-numeric tags.
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            TYPE_INT8 => Some(Self::I8),
            TYPE_INT16 => Some(Self::I16),
            TYPE_INT32 => Some(Self::I32),
            TYPE_INT64 => Some(Self::I64),
            TYPE_UINT8 => Some(Self::U8),
            TYPE_UINT16 => Some(Self::U16),
            TYPE_UINT32 => Some(Self::U32),
            TYPE_UINT64 => Some(Self::U64),
            TYPE_FLOAT16 => Some(Self::F16),
            TYPE_FLOAT32 => Some(Self::F32),
            TYPE_FLOAT64 => Some(Self::F64),
            _ => None,
        }
    }

    /// The tag byte written before the fixed-width payload.
    pub fn tag(self) -> u8 {
        match self {
            Self::I8 => TYPE_INT8,
            Self::I16 => TYPE_INT16,
            Self::I32 => TYPE_INT32,
            Self::I64 => TYPE_INT64,
            Self::U8 => TYPE_UINT8,
            Self::U16 => TYPE_UINT16,
            Self::U32 => TYPE_UINT32,
            Self::U64 => TYPE_UINT64,
            Self::F16 => TYPE_FLOAT16,
            Self::F32 => TYPE_FLOAT32,
            Self::F64 => TYPE_FLOAT64,
        }
    }

    /// Encoded width in bytes, for scalar literals and typed-array elements.
    pub fn width(self) -> usize {
        match self {
            Self::I8 | Self::U8 => 1,
            Self::I16 | Self::U16 | Self::F16 => 2,
            Self::I32 | Self::U32 | Self::F32 => 4,
            Self::I64 | Self::U64 | Self::F64 => 8,
        }
    }
}

/// Append the ULEB128 encoding of `value`.
pub fn write_uleb128(out: &mut Vec<u8>, mut value: u64) {
    loop {
        let mut byte = (value & 0x7F) as u8;
        value >>= 7;
        if value != 0 {
            byte |= 0x80;
        }
        out.push(byte);
        if value == 0 {
            break;
        }
    }
}

/// Widen an IEEE-754 binary16 bit pattern to f32.
///
/// The encoder never emits float16; this covers foreign streams using the
/// reserved tag. Subnormals, infinities and NaN payloads are preserved.
pub fn f16_bits_to_f32(bits: u16) -> f32 {
    let sign = u32::from(bits >> 15) << 31;
    let exp = (bits >> 10) & 0x1F;
    let frac = u32::from(bits & 0x3FF);

    let magnitude = match exp {
        0 => {
            if frac == 0 {
                0
            } else {
                // Subnormal: renormalize into the f32 exponent range.
                let top = 31 - frac.leading_zeros(); // highest set bit, 0..=9
                let exp = 103 + top;
                (exp << 23) | ((frac << (23 - top)) & 0x007F_FFFF)
            }
        }
        0x1F => 0x7F80_0000 | (frac << 13), // Inf / NaN
        _ => ((u32::from(exp) - 15 + 127) << 23) | (frac << 13),
    };

    f32::from_bits(sign | magnitude)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_tag_roundtrip() {
        for tag in TYPE_INT8..=TYPE_FLOAT64 {
            let wt = WireType::from_tag(tag).expect("numeric tag range is total");
            assert_eq!(wt.tag(), tag);
        }
        assert_eq!(WireType::from_tag(LIST_START), None);
        assert_eq!(WireType::from_tag(0xBB), None);
    }

    #[test]
    fn test_registry_widths() {
        assert_eq!(WireType::I8.width(), 1);
        assert_eq!(WireType::U16.width(), 2);
        assert_eq!(WireType::F16.width(), 2);
        assert_eq!(WireType::F32.width(), 4);
        assert_eq!(WireType::I64.width(), 8);
        assert_eq!(WireType::U64.width(), 8);
        assert_eq!(WireType::F64.width(), 8);
    }

    #[test]
    fn test_uleb128_boundaries() {
        let cases: &[(u64, &[u8])] = &[
            (0, &[0x00]),
            (9, &[0x09]),
            (127, &[0x7F]),
            (128, &[0x80, 0x01]),
            (516, &[0x84, 0x04]),
            (
                u64::MAX,
                &[0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x01],
            ),
        ];
        for (value, expected) in cases {
            let mut out = Vec::new();
            write_uleb128(&mut out, *value);
            assert_eq!(out.as_slice(), *expected, "uleb128({value})");
        }
    }

    #[test]
    fn test_f16_widening() {
        assert_eq!(f16_bits_to_f32(0x0000), 0.0);
        assert_eq!(f16_bits_to_f32(0x3C00), 1.0);
        assert_eq!(f16_bits_to_f32(0xC000), -2.0);
        assert_eq!(f16_bits_to_f32(0x7BFF), 65504.0); // largest finite f16
        assert_eq!(f16_bits_to_f32(0x7C00), f32::INFINITY);
        assert_eq!(f16_bits_to_f32(0xFC00), f32::NEG_INFINITY);
        assert!(f16_bits_to_f32(0x7E00).is_nan());
        // Smallest subnormal: 2^-24
        assert_eq!(f16_bits_to_f32(0x0001), 2.0f32.powi(-24));
    }
}
