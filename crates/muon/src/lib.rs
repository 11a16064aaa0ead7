// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # Muon - compact self-describing binary serialization
//!
//! A pure Rust codec for the Muon wire format: a tagged byte stream
//! optimized for small integers, short strings, and homogeneous numeric
//! arrays. A drop-in alternative to other compact binary encodings.
//!
//! ## Quick Start
//!
//! ```rust
//! use muon::{Muon, Result};
//!
//! #[derive(Muon, Default, Debug, PartialEq)]
//! struct Reading {
//!     sensor: String,
//!     #[muon(rename = "vals")]
//!     values: Vec<i64>,
//!     #[muon(skip)]
//!     dirty: bool,
//! }
//!
//! fn main() -> Result<()> {
//!     let reading = Reading {
//!         sensor: "thermo-1".into(),
//!         values: vec![5, 16],
//!         dirty: true,
//!     };
//!
//!     let bytes = muon::to_vec(&reading)?;
//!     let back: Reading = muon::from_slice(&bytes)?;
//!     assert_eq!(back.sensor, reading.sensor);
//!     assert!(!back.dirty); // skipped members never travel
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! ```text
//! Encode -> byte stream -> Reader (tokens) -> Decode -> reconstructed value
//!                 ^                                 ^
//!                 +----------- WireType registry ---+
//! ```
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Encode`] / [`Decode`] | Conversion between host values and the wire |
//! | [`Value`] | Dynamically-typed target, shape inferred from the stream |
//! | [`Reader`] / [`Token`] | Streaming tokenizer for byte-level consumers |
//! | [`Writer`] | Output sink with one representation choice per kind |
//! | [`WireType`] | Registry of fixed-width numeric kinds and tag bytes |
//!
//! ## Representation choices
//!
//! - Integers 0..=9 are a single inline byte; wider values carry their
//!   declared width's tag plus little-endian payload.
//! - Strings are zero-terminated up to 512 bytes, count-prefixed beyond
//!   that or when they embed a zero byte.
//! - Homogeneous numeric sequences skip per-element tags entirely.
//!
//! Encoding and decoding are synchronous and single-threaded; distinct
//! codec instances on distinct streams share no state.

pub mod decode;
pub mod encode;
pub mod error;
pub mod reader;
pub mod token;
pub mod value;
pub mod wire;
pub mod writer;

pub use decode::{from_slice, Decode, Decoder};
pub use encode::{encode_custom, to_vec, to_vec_with_signature, Encode, MarshalMuon, MarshalMuonTo};
pub use error::{Error, Result};
pub use reader::Reader;
pub use token::{Literal, Token, TypedSlice};
pub use value::Value;
pub use wire::WireType;
pub use writer::Writer;

// Derive macro for record (struct) encoding.
pub use muon_codegen::Muon;
