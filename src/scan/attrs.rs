// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Marker attribute parsing with darling.
//!
//! # Entity Markers
//!
//! | Attribute | Default | Description |
//! |-----------|---------|-------------|
//! | `table` | snake_case struct name | Table name |
//! | `schema` | none | Schema qualifying the table |
//! | `unique(a, b)` | none | Table-level `UNIQUE (a, b)`; may repeat |
//!
//! # Field Markers
//!
//! | Attribute | Example | Effect |
//! |-----------|---------|--------|
//! | `id` | `#[id]`, `#[column(id)]` | Identifier field |
//! | `skip` | `#[transient]`, `#[column(skip)]` | Not persisted |
//! | `name` | `#[column(name = "user_name")]` | Column name override |
//! | `nullable` | `#[column(nullable = false)]` | Nullability override |
//! | `unique` | `#[column(unique)]` | `UNIQUE` |
//! | `default` | `#[column(default = "now()")]` | `DEFAULT now()` |
//! | `references` | `#[column(references = "crate::db::User")]` | `REFERENCES` the entity's table |
//! | `generator` | `#[column(generator = "crate::ids::next")]` | Identifier factory for `create_with_new_id` |
//!
//! Markers wrapped in `#[cfg_attr(pred, ...)]` are seen regardless of the
//! predicate.

use darling::{
    FromMeta,
    util::{Flag, PathList}
};
use syn::{Attribute, Meta, Token, punctuated::Punctuated, spanned::Spanned};

/// Entity-level attributes parsed from `#[entity(...)]`.
#[derive(Debug, Default, FromMeta)]
#[darling(default)]
pub struct EntityAttrs {
    /// Table name override.
    pub table:  Option<String>,
    /// Schema name.
    pub schema: Option<String>,
    /// Table-level unique constraints, one field list each.
    #[darling(multiple)]
    pub unique: Vec<PathList>
}

/// Field-level attributes parsed from `#[column(...)]`.
#[derive(Debug, Default, FromMeta)]
#[darling(default)]
pub struct ColumnAttrs {
    /// Identifier marker.
    pub id:         Flag,
    /// Ignore marker.
    pub skip:       Flag,
    /// Column name override.
    pub name:       Option<String>,
    /// Nullability override.
    pub nullable:   Option<bool>,
    /// `UNIQUE` constraint.
    pub unique:     Flag,
    /// Raw SQL `DEFAULT` expression.
    pub default:    Option<String>,
    /// Path of the referenced entity.
    pub references: Option<String>,
    /// Path of a `fn() -> Id` producing fresh identifiers.
    pub generator:  Option<String>
}

/// Everything the field markers say about one field.
#[derive(Debug, Default)]
pub struct FieldMarkers {
    /// Merged `#[column(...)]` options.
    pub column:    ColumnAttrs,
    /// `#[id]` shorthand seen.
    pub id_short:  bool,
    /// `#[transient]` shorthand seen.
    pub transient: bool
}

impl FieldMarkers {
    /// Marked as identifier by any spelling.
    #[must_use]
    pub fn is_id(&self) -> bool {
        self.id_short || self.column.id.is_present()
    }

    /// Marked as ignored by any spelling.
    #[must_use]
    pub fn is_ignored(&self) -> bool {
        self.transient || self.column.skip.is_present()
    }
}

/// Every attribute as a `Meta`, with `cfg_attr` wrappers opened up.
pub fn flatten(attrs: &[Attribute]) -> Vec<Meta> {
    let mut out = Vec::new();
    for attr in attrs {
        push_meta(&attr.meta, &mut out);
    }
    out
}

fn push_meta(meta: &Meta, out: &mut Vec<Meta>) {
    let Meta::List(list) = meta else {
        out.push(meta.clone());
        return;
    };
    if !list.path.is_ident("cfg_attr") {
        out.push(meta.clone());
        return;
    }
    // Not ours to validate when malformed; rustc reports it.
    let Ok(args) = list.parse_args_with(Punctuated::<Meta, Token![,]>::parse_terminated) else {
        return;
    };
    for inner in args.iter().skip(1) {
        push_meta(inner, out);
    }
}

/// First `#[entity]` marker among `metas`.
pub fn find_entity(metas: &[Meta]) -> Option<&Meta> {
    metas.iter().find(|m| m.path().is_ident("entity"))
}

/// Parse an `#[entity]` marker. A bare `#[entity]` takes every default.
pub fn parse_entity(meta: &Meta) -> darling::Result<EntityAttrs> {
    match meta {
        Meta::Path(_) => Ok(EntityAttrs::default()),
        _ => EntityAttrs::from_meta(meta)
    }
}

/// Parse every field marker. Errors are returned with the span of the
/// attribute that caused them; valid markers are still applied.
pub fn parse_field(metas: &[Meta]) -> (FieldMarkers, Vec<(proc_macro2::Span, String)>) {
    let mut markers = FieldMarkers::default();
    let mut errors = Vec::new();

    for meta in metas {
        let path = meta.path();
        if path.is_ident("id") {
            markers.id_short = true;
        } else if path.is_ident("transient") {
            markers.transient = true;
        } else if path.is_ident("column") {
            if matches!(meta, Meta::Path(_)) {
                continue;
            }
            match ColumnAttrs::from_meta(meta) {
                Ok(column) => merge(&mut markers.column, column),
                Err(err) => errors.push((meta.span(), err.to_string()))
            }
        }
    }

    (markers, errors)
}

/// Later `#[column(...)]` attributes add to earlier ones.
fn merge(into: &mut ColumnAttrs, from: ColumnAttrs) {
    if from.id.is_present() {
        into.id = from.id;
    }
    if from.skip.is_present() {
        into.skip = from.skip;
    }
    if from.unique.is_present() {
        into.unique = from.unique;
    }
    if from.name.is_some() {
        into.name = from.name;
    }
    if from.nullable.is_some() {
        into.nullable = from.nullable;
    }
    if from.default.is_some() {
        into.default = from.default;
    }
    if from.references.is_some() {
        into.references = from.references;
    }
    if from.generator.is_some() {
        into.generator = from.generator;
    }
}
