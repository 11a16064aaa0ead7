// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Streaming tokenizer: turns a byte slice into a sequence of [`Token`]s.
//!
//! Single pass, no backtracking. The only state carried between tokens is
//! the pending explicit length set by a `0x8A` count prefix, held in one
//! optional field and consulted by exactly the next string the reader
//! decodes.

use crate::error::{Error, Result};
use crate::token::{Literal, Token, TypedSlice};
use crate::wire::{self, WireType};

/// Bounds-checked token reader over a byte slice.
///
/// Owns a cursor and the pending-length state; a `Reader` must not be shared
/// across concurrent callers, but distinct readers on distinct slices are
/// fully independent.
pub struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
    /// Byte length announced by a count prefix, waiting for its string.
    pending_count: Option<usize>,
}

macro_rules! impl_read_fixed {
    ($name:ident, $type:ty, $size:expr) => {
        fn $name(&mut self) -> Result<$type> {
            let mut bytes = [0u8; $size];
            bytes.copy_from_slice(self.read_bytes($size)?);
            Ok(<$type>::from_le_bytes(bytes))
        }
    };
}

impl<'a> Reader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self {
            buf,
            pos: 0,
            pending_count: None,
        }
    }

    /// Current byte offset into the source.
    pub fn offset(&self) -> usize {
        self.pos
    }

    fn read_u8(&mut self) -> Result<u8> {
        let b = *self.buf.get(self.pos).ok_or_else(|| Error::ReadFailed {
            offset: self.pos,
            reason: "unexpected end of stream".into(),
        })?;
        self.pos += 1;
        Ok(b)
    }

    fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        let have = self.buf.len().saturating_sub(self.pos);
        if have < len {
            return Err(Error::ReadFailed {
                offset: self.pos,
                reason: format!("need {} bytes, have {}", len, have),
            });
        }
        let slice = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    impl_read_fixed!(read_i8_le, i8, 1);
    impl_read_fixed!(read_i16_le, i16, 2);
    impl_read_fixed!(read_i32_le, i32, 4);
    impl_read_fixed!(read_i64_le, i64, 8);
    impl_read_fixed!(read_u16_le, u16, 2);
    impl_read_fixed!(read_u32_le, u32, 4);
    impl_read_fixed!(read_u64_le, u64, 8);
    impl_read_fixed!(read_f32_le, f32, 4);
    impl_read_fixed!(read_f64_le, f64, 8);

    fn read_uleb128(&mut self) -> Result<u64> {
        let mut value = 0u64;
        let mut shift = 0u32;
        loop {
            let byte = self.read_u8()?;
            if shift >= 63 && byte > 1 {
                return Err(Error::Format {
                    offset: self.pos - 1,
                    reason: "varint overflows 64 bits".into(),
                });
            }
            value |= u64::from(byte & 0x7F) << shift;
            if byte & 0x80 == 0 {
                return Ok(value);
            }
            shift += 7;
        }
    }

    /// Pull the next token, `None` at a clean end of stream.
    ///
    /// A count prefix left dangling at end of stream (recorded but never
    /// consumed by a string) is a format error.
    pub fn next_token(&mut self) -> Result<Option<Token>> {
        loop {
            if self.pending_count == Some(0) {
                // Zero-length annotated string; nothing on the wire follows.
                self.pending_count = None;
                return Ok(Some(Token::Literal(Literal::Str(String::new()))));
            }

            if self.pos >= self.buf.len() {
                if self.pending_count.take().is_some() {
                    return Err(Error::Format {
                        offset: self.pos,
                        reason: "count prefix with no string following".into(),
                    });
                }
                return Ok(None);
            }

            let first = self.read_u8()?;

            // Length prefixes produce no token and may stack.
            match first {
                wire::COUNT_PREFIX => {
                    let count = self.read_uleb128()?;
                    self.pending_count = Some(count as usize);
                    continue;
                }
                wire::SIZE_PREFIX => {
                    // Total-payload size hint, reserved: read and discard.
                    let _ = self.read_uleb128()?;
                    continue;
                }
                _ => {}
            }

            if let Some(count) = self.pending_count.take() {
                // Only a string consumes a pending length. Tag bytes can
                // never begin valid UTF-8 content, so they mean the prefix
                // annotated nothing.
                if (0x80..=0xBA).contains(&first) {
                    return Err(Error::Format {
                        offset: self.pos - 1,
                        reason: "count prefix not consumed by a string".into(),
                    });
                }
                return self.read_counted_string(first, count).map(Some);
            }

            return self.dispatch(first).map(Some);
        }
    }

    fn dispatch(&mut self, first: u8) -> Result<Token> {
        let token = match first {
            wire::SIGNATURE_START => return self.read_signature(),
            wire::STRING_END => Token::Literal(Literal::Str(String::new())),
            wire::LIST_START => Token::ListStart,
            wire::LIST_END => Token::ListEnd,
            wire::DICT_START => Token::DictStart,
            wire::DICT_END => Token::DictEnd,
            wire::BOOL_FALSE => Token::Literal(Literal::Bool(false)),
            wire::BOOL_TRUE => Token::Literal(Literal::Bool(true)),
            wire::NULL_VALUE => Token::Literal(Literal::Null),
            wire::NAN_VALUE => Token::Literal(Literal::F64(f64::NAN)),
            wire::NEG_INF_VALUE => Token::Literal(Literal::F64(f64::NEG_INFINITY)),
            wire::POS_INF_VALUE => Token::Literal(Literal::F64(f64::INFINITY)),
            wire::TYPED_ARRAY => return self.read_typed_array(),
            b @ 0xA0..=0xA9 => Token::Literal(Literal::I64(i64::from(b - wire::ZERO_BASE))),
            b @ 0xB0..=0xBA => {
                let wt = WireType::from_tag(b).expect("tag range checked");
                return Ok(Token::Literal(self.read_scalar(wt)?));
            }
            b @ (0x80..=0x83 | 0x85..=0x89 | 0x8C..=0x8E | 0x94..=0x9F) => {
                return Err(Error::Format {
                    offset: self.pos - 1,
                    reason: format!("reserved tag byte {:#04X}", b),
                });
            }
            // 0x01..=0x7F and 0xBB..=0xFF begin a terminated plain string.
            _ => return self.read_terminated_string(first),
        };

        Ok(token)
    }

    fn read_signature(&mut self) -> Result<Token> {
        let rest = self.read_bytes(wire::SIGNATURE.len() - 1)?;
        if rest != &wire::SIGNATURE[1..] {
            return Err(Error::Format {
                offset: self.pos - rest.len(),
                reason: format!("bad signature magic {:02X?}", rest),
            });
        }
        log::trace!("consumed format signature");
        Ok(Token::Signature)
    }

    fn read_scalar(&mut self, wt: WireType) -> Result<Literal> {
        let lit = match wt {
            WireType::I8 => Literal::I8(self.read_i8_le()?),
            WireType::I16 => Literal::I16(self.read_i16_le()?),
            WireType::I32 => Literal::I32(self.read_i32_le()?),
            WireType::I64 => Literal::I64(self.read_i64_le()?),
            WireType::U8 => Literal::U8(self.read_u8()?),
            WireType::U16 => Literal::U16(self.read_u16_le()?),
            WireType::U32 => Literal::U32(self.read_u32_le()?),
            WireType::U64 => Literal::U64(self.read_u64_le()?),
            // Reserved half-float tag: widen to the registry's native f32.
            WireType::F16 => Literal::F32(wire::f16_bits_to_f32(self.read_u16_le()?)),
            WireType::F32 => Literal::F32(self.read_f32_le()?),
            WireType::F64 => Literal::F64(self.read_f64_le()?),
        };
        Ok(lit)
    }

    fn read_typed_array(&mut self) -> Result<Token> {
        let elem_tag = self.read_u8()?;
        let Some(wt) = WireType::from_tag(elem_tag) else {
            return Err(Error::Format {
                offset: self.pos - 1,
                reason: format!("invalid typed array element tag {:#04X}", elem_tag),
            });
        };
        let count = self.read_uleb128()? as usize;

        macro_rules! decode_elements {
            ($variant:ident, $read:ident) => {{
                let mut out = Vec::with_capacity(count.min(4096));
                for _ in 0..count {
                    out.push(self.$read()?);
                }
                TypedSlice::$variant(out)
            }};
        }

        let slice = match wt {
            WireType::I8 => decode_elements!(I8, read_i8_le),
            WireType::I16 => decode_elements!(I16, read_i16_le),
            WireType::I32 => decode_elements!(I32, read_i32_le),
            WireType::I64 => decode_elements!(I64, read_i64_le),
            WireType::U8 => TypedSlice::U8(self.read_bytes(count)?.to_vec()),
            WireType::U16 => decode_elements!(U16, read_u16_le),
            WireType::U32 => decode_elements!(U32, read_u32_le),
            WireType::U64 => decode_elements!(U64, read_u64_le),
            WireType::F16 => {
                let mut out = Vec::with_capacity(count.min(4096));
                for _ in 0..count {
                    out.push(wire::f16_bits_to_f32(self.read_u16_le()?));
                }
                TypedSlice::F32(out)
            }
            WireType::F32 => decode_elements!(F32, read_f32_le),
            WireType::F64 => decode_elements!(F64, read_f64_le),
        };

        Ok(Token::TypedArray(slice))
    }

    /// Count-prefixed string: `first` is its first content byte, the
    /// remaining `count - 1` bytes follow. Embedded zero bytes are data.
    fn read_counted_string(&mut self, first: u8, count: usize) -> Result<Token> {
        // Bounds-check the declared length before allocating for it; the
        // count is wire data and may claim more than the whole stream.
        let rest = self.read_bytes(count - 1)?;
        let mut bytes = Vec::with_capacity(count);
        bytes.push(first);
        bytes.extend_from_slice(rest);
        Ok(Token::Literal(Literal::Str(String::from_utf8(bytes)?)))
    }

    /// Plain string: scan to the terminator, which is consumed but excluded.
    fn read_terminated_string(&mut self, first: u8) -> Result<Token> {
        let Some(end) = self.buf[self.pos..].iter().position(|&b| b == wire::STRING_END)
        else {
            return Err(Error::ReadFailed {
                offset: self.buf.len(),
                reason: "unterminated string".into(),
            });
        };
        let mut bytes = Vec::with_capacity(1 + end);
        bytes.push(first);
        bytes.extend_from_slice(&self.buf[self.pos..self.pos + end]);
        self.pos += end + 1; // consume the terminator
        Ok(Token::Literal(Literal::Str(String::from_utf8(bytes)?)))
    }
}
