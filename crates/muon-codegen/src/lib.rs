// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

extern crate proc_macro;

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields, LitStr};

/// Per-field encoding directives parsed from `#[muon(...)]`.
struct FieldDirectives {
    /// Explicit wire name override.
    rename: Option<String>,
    /// Omit the member entirely, in both directions.
    skip: bool,
}

/// `#[derive(Muon)]` macro: generates `Encode` + `Decode` impls for a
/// named-field struct, encoded as a dict of member name -> member value.
///
/// Member names default to the snake_case form of the field identifier.
/// Attributes:
/// - `#[muon(rename = "wire_name")]` overrides the wire name
/// - `#[muon(skip)]` omits the member from encode and decode
///
/// Decode fills members in wire order; members absent from the wire keep
/// their `Default` value, and unknown incoming keys are skipped without
/// misaligning the stream.
///
/// Example:
/// ```ignore
/// use muon::Muon;
///
/// #[derive(Muon, Default)]
/// struct Sample {
///     sensor_id: u32,
///     #[muon(rename = "temp")]
///     temperature: f64,
///     #[muon(skip)]
///     cached: bool,
/// }
/// ```
#[proc_macro_derive(Muon, attributes(muon))]
pub fn derive_muon(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(f) => &f.named,
            _ => {
                return syn::Error::new_spanned(&input, "Only named fields are supported")
                    .to_compile_error()
                    .into()
            }
        },
        _ => {
            return syn::Error::new_spanned(&input, "Only structs are supported")
                .to_compile_error()
                .into()
        }
    };

    struct FieldInfo {
        ident: syn::Ident,
        ty: syn::Type,
        wire_name: String,
        skip: bool,
    }

    let mut field_infos = Vec::new();

    for field in fields {
        let Some(ident) = field.ident.as_ref() else {
            return syn::Error::new_spanned(field, "Field must have a name")
                .to_compile_error()
                .into();
        };

        let directives = match parse_directives(field) {
            Ok(d) => d,
            Err(e) => return e.to_compile_error().into(),
        };

        let wire_name = directives
            .rename
            .unwrap_or_else(|| to_snake_case(&ident.to_string()));

        field_infos.push(FieldInfo {
            ident: ident.clone(),
            ty: field.ty.clone(),
            wire_name,
            skip: directives.skip,
        });
    }

    let encode_members: Vec<_> = field_infos
        .iter()
        .filter(|f| !f.skip)
        .map(|f| {
            let ident = &f.ident;
            let wire_name = &f.wire_name;
            quote! {
                w.write_str(#wire_name);
                ::muon::Encode::encode(&self.#ident, w)?;
            }
        })
        .collect();

    let decode_defaults: Vec<_> = field_infos
        .iter()
        .map(|f| {
            let ident = &f.ident;
            let ty = &f.ty;
            if f.skip {
                // Never assigned from the wire, so no `mut`.
                quote! {
                    let #ident: #ty = ::core::default::Default::default();
                }
            } else {
                quote! {
                    let mut #ident: #ty = ::core::default::Default::default();
                }
            }
        })
        .collect();

    let decode_arms: Vec<_> = field_infos
        .iter()
        .filter(|f| !f.skip)
        .map(|f| {
            let ident = &f.ident;
            let wire_name = &f.wire_name;
            quote! {
                #wire_name => #ident = ::muon::Decode::decode(d)?,
            }
        })
        .collect();

    let field_idents: Vec<_> = field_infos.iter().map(|f| &f.ident).collect();

    let expanded = quote! {
        impl ::muon::Encode for #name {
            fn encode(&self, w: &mut ::muon::Writer) -> ::muon::Result<()> {
                w.write_dict_start();
                #(#encode_members)*
                w.write_dict_end();
                Ok(())
            }
        }

        impl ::muon::Decode for #name {
            fn decode_token(
                d: &mut ::muon::Decoder<'_>,
                token: ::muon::Token,
            ) -> ::muon::Result<Self> {
                match token {
                    ::muon::Token::DictStart => {}
                    other => {
                        return Err(::muon::Error::TypeMismatch {
                            expected: "dict start".into(),
                            found: other.kind_name().into(),
                        })
                    }
                }

                #(#decode_defaults)*

                loop {
                    match d.next_value_token()? {
                        ::muon::Token::DictEnd => break,
                        ::muon::Token::Literal(::muon::Literal::Str(key)) => {
                            match key.as_str() {
                                #(#decode_arms)*
                                _ => d.skip_value()?,
                            }
                        }
                        other => {
                            return Err(::muon::Error::TypeMismatch {
                                expected: "string dict key".into(),
                                found: other.kind_name().into(),
                            })
                        }
                    }
                }

                Ok(Self {
                    #(#field_idents),*
                })
            }
        }
    };

    TokenStream::from(expanded)
}

/// Parse `#[muon(...)]` attributes on one field.
fn parse_directives(field: &syn::Field) -> syn::Result<FieldDirectives> {
    let mut directives = FieldDirectives {
        rename: None,
        skip: false,
    };

    for attr in &field.attrs {
        if !attr.path().is_ident("muon") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                directives.skip = true;
                return Ok(());
            }
            if meta.path.is_ident("rename") {
                let name: LitStr = meta.value()?.parse()?;
                directives.rename = Some(name.value());
                return Ok(());
            }
            Err(meta.error("expected `skip` or `rename = \"...\"`"))
        })?;
    }

    Ok(directives)
}

/// Default wire-name transform: identifier to snake_case.
///
/// Rust field identifiers are usually snake_case already; this keeps mixed
/// and camel-cased identifiers deterministic on the wire.
fn to_snake_case(ident: &str) -> String {
    let mut out = String::with_capacity(ident.len() + 4);
    let mut prev_lower_or_digit = false;
    for ch in ident.chars() {
        if ch.is_ascii_uppercase() {
            if prev_lower_or_digit {
                out.push('_');
            }
            out.push(ch.to_ascii_lowercase());
            prev_lower_or_digit = false;
        } else {
            out.push(ch);
            prev_lower_or_digit = ch.is_ascii_lowercase() || ch.is_ascii_digit();
        }
    }
    out
}
