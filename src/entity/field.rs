// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Field descriptor.

use syn::{Ident, Type, ext::IdentExt};

use crate::{
    diagnostic::SourceLocation,
    types::{ColumnType, ResolvedType}
};

/// One field of an entity, with everything the generator needs to map it.
///
/// # Flags
///
/// | Field | Source | Effect |
/// |-------|--------|--------|
/// | `is_id` | `#[id]`, `#[column(id)]`, or a field named `id` | Primary key |
/// | `ignored` | `#[transient]`, `#[column(skip)]` | Not persisted; `Default::default()` on read |
/// | `nullable` | `Option<T>` or `#[column(nullable = ...)]` | No `NOT NULL` |
/// | `unique` | `#[column(unique)]` | `UNIQUE` constraint |
/// | `references` | `#[column(references = "..")]` | `REFERENCES` another entity |
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    /// Field identifier (e.g. `id`, `name`).
    pub ident: Ident,

    /// Declared type as written.
    pub ty: Type,

    /// Type mapping.
    ///
    /// `None` for ignored fields and for persistent fields whose type did
    /// not resolve (the entity then carries an error).
    pub resolved: Option<ResolvedType>,

    /// Column name (override or derived).
    pub column: String,

    /// Whether the column accepts NULL.
    pub nullable: bool,

    /// Identifier (primary key) field.
    pub is_id: bool,

    /// Excluded from persistence.
    pub ignored: bool,

    /// `UNIQUE` constraint.
    pub unique: bool,

    /// Raw SQL `DEFAULT` expression.
    pub default: Option<String>,

    /// Entity this column points at, if any.
    pub references: Option<Reference>,

    /// Identifier factory, only on the identifier.
    pub generator: Option<syn::Path>,

    /// Where the field is declared.
    pub location: SourceLocation
}

/// Cross-entity reference declared on a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    /// Fully-qualified name of the referenced entity.
    pub entity: String,

    /// Referenced table and column, filled in when the metadata model
    /// links entities. `None` until then, or when the target is unknown.
    pub target: Option<ForeignKey>
}

/// Resolved target of a [`Reference`], as written in SQL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKey {
    /// Qualified and quoted table, e.g. `core.users`.
    pub table:  String,
    /// Quoted identifier column of that table.
    pub column: String
}

impl FieldDescriptor {
    /// Field name as an identifier.
    #[must_use]
    pub fn name(&self) -> &Ident {
        &self.ident
    }

    /// Field name as a string, without any `r#` prefix.
    #[must_use]
    pub fn name_str(&self) -> String {
        self.ident.unraw().to_string()
    }

    /// Column storage type, when resolved.
    #[must_use]
    pub fn column_type(&self) -> Option<&ColumnType> {
        self.resolved.as_ref().map(|r| &r.mapping.column)
    }

    /// Persisted in a column.
    #[must_use]
    pub fn is_persistent(&self) -> bool {
        !self.ignored
    }
}
