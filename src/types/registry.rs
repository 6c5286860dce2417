// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! The process-wide type table and its lookup rules.

use std::collections::HashMap;

use proc_macro2::TokenStream;
use syn::{GenericArgument, PathArguments, Type};

use super::mapping::{TypeMapping, standard_table};

/// Read-only mapping table, built once and passed by reference.
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    mappings: HashMap<String, TypeMapping>
}

/// Outcome of a successful lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedType {
    /// Mapping of the type inside any `Option`.
    pub mapping:  TypeMapping,
    /// Declared as `Option<T>`.
    pub nullable: bool
}

impl ResolvedType {
    /// Row read expression for `column`. See [`super::Coercion::read_expr`].
    #[must_use]
    pub fn read_expr(&self, column: &str) -> TokenStream {
        self.mapping
            .coercion
            .read_expr(&self.mapping.rust_type, column, self.nullable)
    }

    /// Bind expression for a reference to the value.
    /// See [`super::Coercion::write_expr`].
    #[must_use]
    pub fn write_expr(&self, value: &TokenStream) -> TokenStream {
        self.mapping.coercion.write_expr(value, self.nullable)
    }
}

impl TypeRegistry {
    /// Registry holding only the built-in table.
    #[must_use]
    pub fn standard() -> Self {
        let mappings = standard_table()
            .into_iter()
            .map(|(key, mapping)| (key.to_string(), mapping))
            .collect();
        Self { mappings }
    }

    /// Add a mapping, replacing any built-in entry with the same key.
    ///
    /// The mapping is reachable both by its full path and by its last
    /// segment, so `crate::ids::UserId` also matches a field declared as
    /// `UserId`.
    pub fn register(&mut self, mapping: TypeMapping) {
        if let Some(full) = type_key(&mapping.rust_type, false) {
            self.mappings.insert(full, mapping.clone());
        }
        if let Some(short) = type_key(&mapping.rust_type, true) {
            self.mappings.insert(short, mapping);
        }
    }

    /// Resolve a declared field type.
    ///
    /// Deterministic: the same type always yields the same mapping.
    ///
    /// A qualified path that only matches by its last segment must agree
    /// with the mapping it lands on: `toml::Value` does not resolve to
    /// `serde_json::Value`, while `sqlx::types::Uuid` and `std::string::String`
    /// do.
    #[must_use]
    pub fn resolve(&self, ty: &Type) -> Option<ResolvedType> {
        let (inner, nullable) = match option_inner(ty) {
            Some(inner) => (inner, true),
            None => (ty, false)
        };

        // Option<Option<T>> cannot round-trip through a single column.
        if option_inner(inner).is_some() {
            return None;
        }

        let mapping = match type_key(inner, false).and_then(|key| self.mappings.get(&key)) {
            Some(exact) => exact,
            None => {
                let short = self.mappings.get(&type_key(inner, true)?)?;
                if !declared_as(inner, &short.rust_type) {
                    tracing::debug!(
                        declared = %quote::quote!(#inner),
                        mapping = %short.rust_path(),
                        "qualified path disagrees with the mapping of its last segment"
                    );
                    return None;
                }
                short
            }
        };

        Some(ResolvedType {
            mapping: mapping.clone(),
            nullable
        })
    }

    /// Every registered `(key, mapping)` pair, sorted by key.
    #[must_use]
    pub fn entries(&self) -> Vec<(&str, &TypeMapping)> {
        let mut entries: Vec<_> = self
            .mappings
            .iter()
            .map(|(key, mapping)| (key.as_str(), mapping))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

/// Inner type of `Option<T>` (any path ending in `Option`).
#[must_use]
pub fn option_inner(ty: &Type) -> Option<&Type> {
    let Type::Path(type_path) = strip_groups(ty) else {
        return None;
    };
    if type_path.qself.is_some() {
        return None;
    }
    let segment = type_path.path.segments.last()?;
    if segment.ident != "Option" {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    if args.args.len() != 1 {
        return None;
    }
    match args.args.first()? {
        GenericArgument::Type(inner) => Some(inner),
        _ => None
    }
}

fn strip_groups(ty: &Type) -> &Type {
    match ty {
        Type::Paren(paren) => strip_groups(&paren.elem),
        Type::Group(group) => strip_groups(&group.elem),
        other => other
    }
}

/// Path prefixes that re-export the standard library.
const STD_ROOTS: [&str; 3] = ["std", "core", "alloc"];

/// `true` when `declared` can name the same type as `canonical`.
///
/// Bare names always can. A qualified path can when, after dropping a
/// leading `crate`, `self` or `super`, its segments are a suffix of the
/// canonical path, when it goes through `sqlx`'s re-exports, or when it
/// names a standard library type through `std`, `core` or `alloc`. Generic
/// arguments are compared the same way.
fn declared_as(declared: &Type, canonical: &Type) -> bool {
    let (Type::Path(declared), Type::Path(canonical)) =
        (strip_groups(declared), strip_groups(canonical))
    else {
        return true;
    };

    let names: Vec<String> = declared
        .path
        .segments
        .iter()
        .map(|s| s.ident.to_string())
        .skip_while(|s| matches!(s.as_str(), "crate" | "self" | "super"))
        .collect();
    let expected: Vec<String> = canonical
        .path
        .segments
        .iter()
        .map(|s| s.ident.to_string())
        .collect();

    let outer = match names.first().map(String::as_str) {
        None => true,
        Some(_) if names.len() == 1 => true,
        Some("sqlx") => true,
        Some(root) if STD_ROOTS.contains(&root) => {
            expected.len() == 1 || expected.first().is_some_and(|r| STD_ROOTS.contains(&r.as_str()))
        }
        Some(_) => expected.ends_with(&names)
    };
    if !outer {
        return false;
    }

    let (Some(declared), Some(canonical)) =
        (declared.path.segments.last(), canonical.path.segments.last())
    else {
        return true;
    };
    match (&declared.arguments, &canonical.arguments) {
        (PathArguments::AngleBracketed(declared), PathArguments::AngleBracketed(canonical)) => {
            declared
                .args
                .iter()
                .zip(&canonical.args)
                .all(|pair| match pair {
                    (GenericArgument::Type(d), GenericArgument::Type(c)) => declared_as(d, c),
                    _ => true
                })
        }
        _ => true
    }
}

/// Normalized lookup key of a type path.
///
/// With `short`, every path (including generic arguments) is reduced to
/// its last segment: `chrono::DateTime<chrono::Utc>` → `DateTime<Utc>`.
/// Returns `None` for anything that is not a plain path with type
/// arguments.
fn type_key(ty: &Type, short: bool) -> Option<String> {
    let Type::Path(type_path) = strip_groups(ty) else {
        return None;
    };
    if type_path.qself.is_some() {
        return None;
    }

    let segments = &type_path.path.segments;
    let skip = if short { segments.len().saturating_sub(1) } else { 0 };
    let mut rendered = Vec::with_capacity(segments.len() - skip);

    for segment in segments.iter().skip(skip) {
        let mut part = segment.ident.to_string();
        match &segment.arguments {
            PathArguments::None => {}
            PathArguments::AngleBracketed(args) => {
                let mut inner = Vec::with_capacity(args.args.len());
                for arg in &args.args {
                    match arg {
                        GenericArgument::Type(arg_ty) => inner.push(type_key(arg_ty, short)?),
                        GenericArgument::Lifetime(_) => {}
                        _ => return None
                    }
                }
                if !inner.is_empty() {
                    part.push('<');
                    part.push_str(&inner.join(","));
                    part.push('>');
                }
            }
            PathArguments::Parenthesized(_) => return None
        }
        rendered.push(part);
    }

    Some(rendered.join("::"))
}
