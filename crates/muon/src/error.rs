// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error types for Muon encoding and decoding.

use std::fmt;

/// Errors surfaced by the codec. All are fatal to the current encode or
/// decode call; there is no recovery or skip-and-continue for bad input.
#[derive(Debug, Clone)]
pub enum Error {
    /// Malformed wire data: unknown tag, bad signature, unbalanced bracket,
    /// or a length prefix with no string to consume it.
    Format { offset: usize, reason: String },
    /// Fewer bytes available than a fixed-width or length-prefixed field
    /// requires. Treated like a stream I/O failure.
    ReadFailed { offset: usize, reason: String },
    /// Token kind incompatible with the target shape, or a value kind with
    /// no wire representation during encode.
    TypeMismatch { expected: String, found: String },
    /// A code path the format defines but this build does not handle.
    Unsupported { reason: String },
    /// Wire string bytes that are not valid UTF-8.
    Utf8(std::string::FromUtf8Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Format { offset, reason } => {
                write!(f, "format error at offset {}: {}", offset, reason)
            }
            Self::ReadFailed { offset, reason } => {
                write!(f, "read failed at offset {}: {}", offset, reason)
            }
            Self::TypeMismatch { expected, found } => {
                write!(f, "type mismatch: expected {}, found {}", expected, found)
            }
            Self::Unsupported { reason } => write!(f, "unsupported: {}", reason),
            Self::Utf8(e) => write!(f, "invalid UTF-8 in string: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::string::FromUtf8Error> for Error {
    fn from(e: std::string::FromUtf8Error) -> Self {
        Self::Utf8(e)
    }
}

impl Error {
    pub(crate) fn mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }
}

pub type Result<T> = core::result::Result<T, Error>;
