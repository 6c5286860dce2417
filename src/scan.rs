// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Entity scanner.
//!
//! Walks a [`SourceSet`] for items carrying the `#[entity]` marker and turns
//! each into an [`EntityDescriptor`].
//!
//! # Pipeline
//!
//! ```text
//! SourceSet ──▶ candidates (marked items, sorted file order)
//!                   │
//!                   ▼ lazily, one per `next()`
//!              describe ──▶ EntityDescriptor  (+ diagnostics)
//! ```
//!
//! Candidates are collected up front; descriptors are built on demand. The
//! resulting [`Scan`] is single-pass: a new scan is needed for every run.
//!
//! Items the scanner cannot describe at all (enums, tuple structs, generic
//! structs) yield no descriptor. Structs with field-level problems still
//! yield one, with [`EntityDescriptor::errors`] counting the errors
//! reported against it.

mod attrs;
mod entity;

use syn::{Attribute, Item, ext::IdentExt};

use crate::{
    diagnostic::Reporter,
    entity::EntityDescriptor,
    source::{SourceFile, SourceSet},
    types::TypeRegistry
};

/// One marked item awaiting description.
struct Candidate<'a> {
    file:   &'a SourceFile,
    module: String,
    item:   &'a Item
}

/// Lazy, single-pass sequence of scanned entities.
pub struct Scan<'a> {
    candidates: std::vec::IntoIter<Candidate<'a>>,
    registry:   &'a TypeRegistry,
    reporter:   &'a mut Reporter
}

/// Start scanning `sources`.
///
/// Diagnostics go to `reporter` as entities are pulled from the returned
/// iterator.
#[tracing::instrument(skip_all, fields(files = sources.len()))]
pub fn scan<'a>(
    sources: &'a SourceSet,
    registry: &'a TypeRegistry,
    reporter: &'a mut Reporter
) -> Scan<'a> {
    let mut candidates = Vec::new();
    for file in sources.files() {
        collect(file, file.module_name(), &file.syntax.items, &mut candidates);
    }
    tracing::debug!(candidates = candidates.len(), "collected marked items");

    Scan {
        candidates: candidates.into_iter(),
        registry,
        reporter
    }
}

impl Iterator for Scan<'_> {
    type Item = EntityDescriptor;

    fn next(&mut self) -> Option<Self::Item> {
        for candidate in self.candidates.by_ref() {
            let described = entity::describe(
                candidate.file,
                &candidate.module,
                candidate.item,
                self.registry,
                self.reporter
            );
            if described.is_some() {
                return described;
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.candidates.len()))
    }
}

fn collect<'a>(file: &'a SourceFile, module: String, items: &'a [Item], out: &mut Vec<Candidate<'a>>) {
    for item in items {
        if attrs::find_entity(&attrs::flatten(item_attrs(item))).is_some() {
            out.push(Candidate {
                file,
                module: module.clone(),
                item
            });
        }
        if let Item::Mod(inner) = item
            && let Some((_, content)) = &inner.content
        {
            collect(file, format!("{module}::{}", inner.ident.unraw()), content, out);
        }
    }
}

fn item_attrs(item: &Item) -> &[Attribute] {
    match item {
        Item::Const(i) => &i.attrs,
        Item::Enum(i) => &i.attrs,
        Item::ExternCrate(i) => &i.attrs,
        Item::Fn(i) => &i.attrs,
        Item::ForeignMod(i) => &i.attrs,
        Item::Impl(i) => &i.attrs,
        Item::Macro(i) => &i.attrs,
        Item::Mod(i) => &i.attrs,
        Item::Static(i) => &i.attrs,
        Item::Struct(i) => &i.attrs,
        Item::Trait(i) => &i.attrs,
        Item::TraitAlias(i) => &i.attrs,
        Item::Type(i) => &i.attrs,
        Item::Union(i) => &i.attrs,
        Item::Use(i) => &i.attrs,
        _ => &[]
    }
}
