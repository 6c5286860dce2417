// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Entity descriptor.

use convert_case::{Case, Casing};
use proc_macro2::Span;
use syn::{Ident, ext::IdentExt};

use super::field::FieldDescriptor;
use crate::{diagnostic::SourceLocation, utils::sql::quote_ident};

/// Complete description of one entity.
///
/// This is the main data structure passed to the code model builder.
/// Identity is the fully-qualified declaration name.
///
/// # Field Access
///
/// ```rust,ignore
/// let all = entity.all_fields();          // declaration order
/// let stored = entity.persistent_fields();
/// let id = entity.id_field();             // Some(..) on valid entities
/// let rest = entity.non_id_fields();
/// ```
#[derive(Debug, Clone)]
pub struct EntityDescriptor {
    /// Struct identifier (e.g. `User`).
    pub ident: Ident,

    /// Fully-qualified path (e.g. `crate::db::User`).
    pub path: String,

    /// Table name, unquoted (e.g. `"user"`).
    pub table: String,

    /// Optional schema, unquoted.
    pub schema: Option<String>,

    /// All fields in declaration order.
    pub fields: Vec<FieldDescriptor>,

    /// Table-level unique constraints as column names.
    pub unique_constraints: Vec<Vec<String>>,

    /// Where the struct is declared.
    pub location: SourceLocation,

    /// Error diagnostics raised while scanning this entity.
    pub errors: usize
}

impl EntityDescriptor {
    /// Entity name as an identifier.
    #[must_use]
    pub fn name(&self) -> &Ident {
        &self.ident
    }

    /// Entity name as a string, without any `r#` prefix.
    #[must_use]
    pub fn name_str(&self) -> String {
        self.ident.unraw().to_string()
    }

    /// Entity name in snake_case (`UserProfile` → `user_profile`).
    #[must_use]
    pub fn snake_name(&self) -> String {
        self.name_str().to_case(Case::Snake)
    }

    /// Fully-qualified name.
    #[must_use]
    pub fn fqn(&self) -> &str {
        &self.path
    }

    /// `true` when scanning raised no error for this entity.
    ///
    /// A valid entity has exactly one identifier field and every persistent
    /// field is resolved.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors == 0
    }

    /// The identifier field.
    #[must_use]
    pub fn id_field(&self) -> Option<&FieldDescriptor> {
        let mut ids = self.fields.iter().filter(|f| f.is_id && !f.ignored);
        let id = ids.next()?;
        ids.next().is_none().then_some(id)
    }

    /// All fields, including ignored ones.
    #[must_use]
    pub fn all_fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Persisted fields in declaration order.
    #[must_use]
    pub fn persistent_fields(&self) -> Vec<&FieldDescriptor> {
        self.fields.iter().filter(|f| f.is_persistent()).collect()
    }

    /// Persisted fields except the identifier, in declaration order.
    #[must_use]
    pub fn non_id_fields(&self) -> Vec<&FieldDescriptor> {
        self.fields
            .iter()
            .filter(|f| f.is_persistent() && !f.is_id)
            .collect()
    }

    /// Table reference as written in SQL, schema-qualified and quoted
    /// where needed (`core.users`, `"user"`).
    #[must_use]
    pub fn qualified_table(&self) -> String {
        match &self.schema {
            Some(schema) => format!("{}.{}", quote_ident(schema), quote_ident(&self.table)),
            None => quote_ident(&self.table)
        }
    }

    /// New identifier with prefix and/or suffix around the entity name.
    ///
    /// ```rust,ignore
    /// entity.ident_with("", "Repository") // UserRepository
    /// ```
    #[must_use]
    pub fn ident_with(&self, prefix: &str, suffix: &str) -> Ident {
        Ident::new(
            &format!("{}{}{}", prefix, self.name_str(), suffix),
            Span::call_site()
        )
    }
}
