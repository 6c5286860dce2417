// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Field-level token generation for the row mapper and statement binders.

use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::Ident;

use crate::entity::FieldDescriptor;

/// Generate `name: <read expression>` assignments for every field, in
/// declaration order.
///
/// Ignored fields are filled with `Default::default()`. A persistent field
/// without a resolved mapping falls back to a direct read; such entities
/// are never written, but still render.
pub fn row_assigns(fields: &[FieldDescriptor]) -> Vec<TokenStream> {
    fields
        .iter()
        .map(|f: &FieldDescriptor| {
            let name = f.name();
            if f.ignored {
                return quote! { #name: Default::default() };
            }
            let read = match &f.resolved {
                Some(resolved) => resolved.read_expr(&f.column),
                None => {
                    let column = &f.column;
                    quote! { row.try_get(#column)? }
                }
            };
            quote! { #name: #read }
        })
        .collect()
}

/// Generate a `.bind(...)` chain reading each field from `source`.
pub fn bindings(fields: &[&FieldDescriptor], source: &str) -> Vec<TokenStream> {
    let src = Ident::new(source, Span::call_site());
    fields
        .iter()
        .map(|f: &&FieldDescriptor| {
            let name = f.name();
            let value = quote! { &#src.#name };
            let arg = match &f.resolved {
                Some(resolved) => resolved.write_expr(&value),
                None => value
            };
            quote! { .bind(#arg) }
        })
        .collect()
}
