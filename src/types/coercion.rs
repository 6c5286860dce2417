// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Read/write coercion rules.
//!
//! A [`Coercion`] renders two expressions for the generated code: one that
//! reads a column from a `sqlx::postgres::PgRow` and one that turns a
//! borrowed field value into something `Query::bind` accepts. The two are
//! inverse for every value of the declared type.
//!
//! | Coercion | Write | Read |
//! |----------|-------|------|
//! | `Direct` | `&value` | `row.try_get(col)?` |
//! | `Widen(i64)` | `i64::from(*value)` | `u32::try_from(row.try_get::<i64, _>(col)?)` |
//! | `Char` | `value.to_string()` | single character of a `String` |
//! | `SharedStr` | `&**value` | `row.try_get::<String, _>(col)?.into()` |

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::Type;

/// Signed storage integer used by [`Coercion::Widen`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WideInt {
    /// `i16`
    I16,
    /// `i32`
    I32,
    /// `i64`
    I64
}

impl WideInt {
    /// Rust name of the storage type.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64"
        }
    }

    /// Inclusive value range of the storage type.
    #[must_use]
    pub const fn range(self) -> (i128, i128) {
        match self {
            Self::I16 => (i16::MIN as i128, i16::MAX as i128),
            Self::I32 => (i32::MIN as i128, i32::MAX as i128),
            Self::I64 => (i64::MIN as i128, i64::MAX as i128)
        }
    }

    fn ident(self) -> syn::Ident {
        format_ident!("{}", self.name())
    }
}

/// How a value travels between a field and a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Coercion {
    /// The driver encodes and decodes the field type itself.
    Direct,

    /// Losslessly widened to a signed integer on write, narrowed back with
    /// `TryFrom` on read.
    Widen(WideInt),

    /// `char` stored as a one-character `TEXT`.
    Char,

    /// `Box<str>`-like smart pointers stored as `TEXT`.
    SharedStr
}

impl Coercion {
    /// `true` when the generated repository needs its `decode_char` helper.
    #[must_use]
    pub const fn needs_char_helper(self) -> bool {
        matches!(self, Self::Char)
    }

    /// Expression reading `column` from `row`.
    ///
    /// `target` is the declared (non-`Option`) field type. The expression
    /// already applies `?` and evaluates to the field's type.
    #[must_use]
    pub fn read_expr(self, target: &Type, column: &str, nullable: bool) -> TokenStream {
        match (self, nullable) {
            (Self::Direct, _) => quote! { row.try_get(#column)? },
            (Self::Widen(storage), false) => {
                let storage = storage.ident();
                let decode_err = decode_error(column);
                quote! {
                    <#target>::try_from(row.try_get::<#storage, _>(#column)?).map_err(#decode_err)?
                }
            }
            (Self::Widen(storage), true) => {
                let storage = storage.ident();
                let decode_err = decode_error(column);
                quote! {
                    row.try_get::<Option<#storage>, _>(#column)?
                        .map(<#target>::try_from)
                        .transpose()
                        .map_err(#decode_err)?
                }
            }
            (Self::Char, false) => quote! {
                Self::decode_char(#column, row.try_get::<String, _>(#column)?)?
            },
            (Self::Char, true) => quote! {
                row.try_get::<Option<String>, _>(#column)?
                    .map(|value| Self::decode_char(#column, value))
                    .transpose()?
            },
            (Self::SharedStr, false) => quote! {
                row.try_get::<String, _>(#column)?.into()
            },
            (Self::SharedStr, true) => quote! {
                row.try_get::<Option<String>, _>(#column)?.map(Into::into)
            }
        }
    }

    /// Expression turning `value`, a reference to the field, into a bind
    /// argument.
    #[must_use]
    pub fn write_expr(self, value: &TokenStream, nullable: bool) -> TokenStream {
        match (self, nullable) {
            (Self::Direct, _) => quote! { #value },
            (Self::Widen(storage), false) => {
                let storage = storage.ident();
                quote! { <#storage>::from(*#value) }
            }
            (Self::Widen(storage), true) => {
                let storage = storage.ident();
                quote! { (*#value).map(<#storage>::from) }
            }
            (Self::Char, false) => quote! { (*#value).to_string() },
            (Self::Char, true) => quote! { (*#value).map(|value| value.to_string()) },
            (Self::SharedStr, false) => quote! { &**#value },
            (Self::SharedStr, true) => quote! { (#value).as_deref() }
        }
    }
}

fn decode_error(column: &str) -> TokenStream {
    quote! {
        |err| sqlx::Error::ColumnDecode {
            index: #column.to_owned(),
            source: Box::new(err)
        }
    }
}
