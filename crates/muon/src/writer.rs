// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Byte-level writer: owns the output buffer and knows one representation
//! choice per logical kind (inline small integer vs. tagged fixed width,
//! terminated vs. count-prefixed string, typed array vs. bracketed list).

use crate::wire::{self, WireType};

/// Growable output sink for one encode call.
///
/// The writer exclusively owns the buffer for the duration of an encode;
/// `into_bytes` hands the finished wire bytes back to the caller.
#[derive(Default)]
pub struct Writer {
    buf: Vec<u8>,
}

macro_rules! impl_write_int {
    ($name:ident, $type:ty, $wt:ident) => {
        /// Inline byte for 0..=9, otherwise tag plus little-endian payload.
        pub fn $name(&mut self, value: $type) {
            if (0..=9).contains(&value) {
                self.buf.push(wire::ZERO_BASE + value as u8);
            } else {
                self.buf.push(WireType::$wt.tag());
                self.buf.extend_from_slice(&value.to_le_bytes());
            }
        }
    };
}

impl Writer {
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// A writer that starts with the 4-byte format signature.
    pub fn with_signature() -> Self {
        Self {
            buf: wire::SIGNATURE.to_vec(),
        }
    }

    /// Finish the encode and take the wire bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn write_null(&mut self) {
        self.buf.push(wire::NULL_VALUE);
    }

    pub fn write_bool(&mut self, value: bool) {
        self.buf.push(if value { wire::BOOL_TRUE } else { wire::BOOL_FALSE });
    }

    impl_write_int!(write_i8, i8, I8);
    impl_write_int!(write_i16, i16, I16);
    impl_write_int!(write_i32, i32, I32);
    impl_write_int!(write_i64, i64, I64);
    impl_write_int!(write_u8, u8, U8);
    impl_write_int!(write_u16, u16, U16);
    impl_write_int!(write_u32, u32, U32);
    impl_write_int!(write_u64, u64, U64);

    pub fn write_f32(&mut self, value: f32) {
        if value.is_nan() {
            self.buf.push(wire::NAN_VALUE);
        } else if value == f32::INFINITY {
            self.buf.push(wire::POS_INF_VALUE);
        } else if value == f32::NEG_INFINITY {
            self.buf.push(wire::NEG_INF_VALUE);
        } else {
            self.buf.push(WireType::F32.tag());
            self.buf.extend_from_slice(&value.to_le_bytes());
        }
    }

    pub fn write_f64(&mut self, value: f64) {
        if value.is_nan() {
            self.buf.push(wire::NAN_VALUE);
        } else if value == f64::INFINITY {
            self.buf.push(wire::POS_INF_VALUE);
        } else if value == f64::NEG_INFINITY {
            self.buf.push(wire::NEG_INF_VALUE);
        } else {
            self.buf.push(WireType::F64.tag());
            self.buf.extend_from_slice(&value.to_le_bytes());
        }
    }

    /// Terminated form for short, zero-free strings; count-prefixed form
    /// (no terminator) past [`wire::LONG_STRING_THRESHOLD`] bytes or when a
    /// zero byte is embedded. The empty string is the bare terminator.
    pub fn write_str(&mut self, value: &str) {
        let bytes = value.as_bytes();
        if bytes.len() > wire::LONG_STRING_THRESHOLD || bytes.contains(&wire::STRING_END) {
            self.buf.push(wire::COUNT_PREFIX);
            wire::write_uleb128(&mut self.buf, bytes.len() as u64);
            self.buf.extend_from_slice(bytes);
        } else {
            self.buf.extend_from_slice(bytes);
            self.buf.push(wire::STRING_END);
        }
    }

    pub fn write_list_start(&mut self) {
        self.buf.push(wire::LIST_START);
    }

    pub fn write_list_end(&mut self) {
        self.buf.push(wire::LIST_END);
    }

    pub fn write_dict_start(&mut self) {
        self.buf.push(wire::DICT_START);
    }

    pub fn write_dict_end(&mut self) {
        self.buf.push(wire::DICT_END);
    }

    /// Typed-array preamble: marker, element tag, element count. The caller
    /// follows up with exactly `count` fixed-width little-endian elements.
    pub fn write_typed_array_header(&mut self, element: WireType, count: usize) {
        self.buf.push(wire::TYPED_ARRAY);
        self.buf.push(element.tag());
        wire::write_uleb128(&mut self.buf, count as u64);
    }

    /// Untagged little-endian element bytes inside a typed array.
    pub fn write_element_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Verbatim pre-encoded bytes, the custom marshaling escape hatch.
    pub fn write_raw(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }
}
