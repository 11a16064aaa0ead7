// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com
//
// Wire-format golden vectors: byte-exact reference encodings verified in
// three directions where applicable: encode -> bytes, bytes -> tokens,
// bytes -> bound value.

#![allow(clippy::float_cmp)]

use muon::{from_slice, to_vec, to_vec_with_signature, Literal, Reader, Token, TypedSlice, Value};

fn tokens(bytes: &[u8]) -> Vec<Token> {
    let mut reader = Reader::new(bytes);
    let mut out = Vec::new();
    while let Some(token) = reader.next_token().expect("valid stream") {
        out.push(token);
    }
    out
}

#[test]
fn golden_null() {
    let bytes = to_vec(&None::<i64>).expect("encodes");
    assert_eq!(bytes, [0xAC]);
    assert_eq!(tokens(&bytes), vec![Token::Literal(Literal::Null)]);
    assert_eq!(from_slice::<Value>(&bytes).expect("binds"), Value::Null);
}

#[test]
fn golden_booleans() {
    assert_eq!(to_vec(&true).expect("encodes"), [0xAB]);
    assert_eq!(to_vec(&false).expect("encodes"), [0xAA]);
    assert!(from_slice::<bool>(&[0xAB]).expect("binds"));
}

#[test]
fn golden_inline_integer() {
    let bytes = to_vec(&5i64).expect("encodes");
    assert_eq!(bytes, [0xA5]);
    // One byte regardless of the declared width.
    assert_eq!(to_vec(&5u8).expect("encodes"), [0xA5]);
    assert_eq!(to_vec(&5i32).expect("encodes"), [0xA5]);
    // And it binds to any width on the way back.
    assert_eq!(from_slice::<i8>(&bytes).expect("binds"), 5);
    assert_eq!(from_slice::<u64>(&bytes).expect("binds"), 5);
}

#[test]
fn golden_integer_extremes() {
    assert_eq!(
        to_vec(&i64::MAX).expect("encodes"),
        [0xB3, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x7F]
    );
    assert_eq!(
        to_vec(&i64::MIN).expect("encodes"),
        [0xB3, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x80]
    );
    assert_eq!(to_vec(&i8::MAX).expect("encodes"), [0xB0, 0x7F]);
    assert_eq!(to_vec(&i8::MIN).expect("encodes"), [0xB0, 0x80]);
    assert_eq!(to_vec(&i16::MIN).expect("encodes"), [0xB1, 0x00, 0x80]);
    assert_eq!(
        to_vec(&u64::MAX).expect("encodes"),
        [0xB7, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF]
    );
    assert_eq!(to_vec(&u8::MAX).expect("encodes"), [0xB4, 0xFF]);
    assert_eq!(from_slice::<i64>(&[0xB0, 0x80]).expect("widens"), -128);
}

#[test]
fn golden_floats() {
    assert_eq!(
        to_vec(&f32::MAX).expect("encodes"),
        [0xB9, 0xFF, 0xFF, 0x7F, 0x7F]
    );
    assert_eq!(
        to_vec(&f64::MAX).expect("encodes"),
        [0xBA, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xEF, 0x7F]
    );
    assert_eq!(to_vec(&f64::NAN).expect("encodes"), [0xAD]);
    assert_eq!(to_vec(&f64::NEG_INFINITY).expect("encodes"), [0xAE]);
    assert_eq!(to_vec(&f64::INFINITY).expect("encodes"), [0xAF]);

    assert!(from_slice::<f64>(&[0xAD]).expect("binds").is_nan());
    assert!(from_slice::<f32>(&[0xAD]).expect("narrows").is_nan());
    assert_eq!(
        from_slice::<f32>(&[0xAE]).expect("binds"),
        f32::NEG_INFINITY
    );
    assert_eq!(from_slice::<f64>(&[0xAF]).expect("binds"), f64::INFINITY);
}

#[test]
fn golden_strings() {
    let bytes = to_vec("test").expect("encodes");
    assert_eq!(bytes, [0x74, 0x65, 0x73, 0x74, 0x00]);
    assert_eq!(
        tokens(&bytes),
        vec![Token::Literal(Literal::Str("test".into()))]
    );
    assert_eq!(from_slice::<String>(&bytes).expect("binds"), "test");

    assert_eq!(to_vec("").expect("encodes"), [0x00]);
    assert_eq!(from_slice::<String>(&[0x00]).expect("binds"), "");
}

#[test]
fn golden_string_with_embedded_zero() {
    let bytes = to_vec("te\0st").expect("encodes");
    assert_eq!(bytes, [0x8A, 0x05, 0x74, 0x65, 0x00, 0x73, 0x74]);
    assert_eq!(from_slice::<String>(&bytes).expect("binds"), "te\0st");
}

#[test]
fn golden_long_string() {
    let long = "x".repeat(516);
    let bytes = to_vec(long.as_str()).expect("encodes");
    assert_eq!(&bytes[..3], &[0x8A, 0x84, 0x04]); // count prefix + uleb128(516)
    assert_eq!(bytes.len(), 3 + 516); // no terminator
    assert_eq!(from_slice::<String>(&bytes).expect("binds"), long);
}

#[test]
fn golden_typed_array() {
    let bytes = to_vec(&vec![5i64, 16]).expect("encodes");
    assert_eq!(
        bytes,
        [
            0x84, 0xB3, 0x02, 0x05, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x10, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00
        ]
    );
    assert_eq!(
        tokens(&bytes),
        vec![Token::TypedArray(TypedSlice::I64(vec![5, 16]))]
    );
    assert_eq!(from_slice::<Vec<i64>>(&bytes).expect("binds"), vec![5, 16]);

    assert_eq!(
        to_vec(&vec![0x01u8, 0x30]).expect("encodes"),
        [0x84, 0xB4, 0x02, 0x01, 0x30]
    );
}

#[test]
fn golden_list() {
    let value = Value::List(vec![Value::from("test"), Value::Bool(true)]);
    let bytes = to_vec(&value).expect("encodes");
    assert_eq!(bytes, [0x90, 0x74, 0x65, 0x73, 0x74, 0x00, 0xAB, 0x91]);
    assert_eq!(
        tokens(&bytes),
        vec![
            Token::ListStart,
            Token::Literal(Literal::Str("test".into())),
            Token::Literal(Literal::Bool(true)),
            Token::ListEnd,
        ]
    );
    assert_eq!(from_slice::<Value>(&bytes).expect("binds"), value);
}

#[test]
fn golden_dict() {
    let value = Value::Dict(vec![(Value::from("a"), Value::from("b"))]);
    let bytes = to_vec(&value).expect("encodes");
    assert_eq!(bytes, [0x92, 0x61, 0x00, 0x62, 0x00, 0x93]);
    assert_eq!(
        tokens(&bytes),
        vec![
            Token::DictStart,
            Token::Literal(Literal::Str("a".into())),
            Token::Literal(Literal::Str("b".into())),
            Token::DictEnd,
        ]
    );
}

#[test]
fn golden_signature() {
    let bytes = to_vec_with_signature("test").expect("encodes");
    assert_eq!(bytes, [0x8F, 0xB5, 0x30, 0x31, 0x74, 0x65, 0x73, 0x74, 0x00]);
    assert_eq!(
        tokens(&bytes),
        vec![Token::Signature, Token::Literal(Literal::Str("test".into()))]
    );
    assert_eq!(from_slice::<String>(&bytes).expect("binds"), "test");
}

#[test]
fn golden_structural_balance() {
    let value = Value::List(vec![
        Value::Dict(vec![(
            Value::from("k"),
            Value::List(vec![Value::I64(1), Value::Null]),
        )]),
        Value::List(vec![]),
    ]);
    let bytes = to_vec(&value).expect("encodes");

    let mut starts = 0usize;
    let mut ends = 0usize;
    for token in tokens(&bytes) {
        match token {
            Token::ListStart | Token::DictStart => starts += 1,
            Token::ListEnd | Token::DictEnd => ends += 1,
            _ => {}
        }
    }
    assert_eq!(starts, ends);
    assert_eq!(from_slice::<Value>(&bytes).expect("binds"), value);

    // Dropping the final closing bracket must fail, never silently succeed.
    assert!(from_slice::<Value>(&bytes[..bytes.len() - 1]).is_err());
}
