// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Code model builder.
//!
//! Turns one [`EntityDescriptor`] into a [`CodeModel`]: the abstract plan
//! of the generated repository, before any text exists.
//!
//! # Generated Repository
//!
//! ```rust,ignore
//! pub struct UserRepository { pool: sqlx::PgPool }
//!
//! impl UserRepository {
//!     pub const TABLE: &'static str = "\"user\"";
//!     pub const INSERT_SQL: &'static str = "INSERT INTO \"user\" (id, name, age) VALUES ($1, $2, $3)";
//!     // ...
//!
//!     pub fn new(pool: sqlx::PgPool) -> Self;
//!     pub fn pool(&self) -> &sqlx::PgPool;
//!     pub fn map_row(row: &sqlx::postgres::PgRow) -> Result<crate::db::User, sqlx::Error>;
//!     pub async fn init_table(&self) -> Result<(), sqlx::Error>;
//!     pub async fn create(&self, entity: &crate::db::User) -> Result<(), sqlx::Error>;
//!     // only with `#[column(generator = "...")]` on the identifier
//!     pub async fn create_with_new_id(&self, entity: &mut crate::db::User) -> Result<(), sqlx::Error>;
//!     pub async fn find_by_id(&self, id: &i64) -> Result<Option<crate::db::User>, sqlx::Error>;
//!     pub async fn update(&self, entity: &crate::db::User) -> Result<bool, sqlx::Error>;
//!     pub async fn delete(&self, id: &i64) -> Result<bool, sqlx::Error>;
//!     pub async fn list(&self) -> Result<Vec<crate::db::User>, sqlx::Error>;
//! }
//! ```
//!
//! An entity that carries errors still gets a best-effort model, marked
//! non-emittable, so that later entities are unaffected.

mod sql;

use proc_macro2::Span;
use syn::{Ident, Path, Type};

pub use self::sql::Statements;
use crate::{
    diagnostic::SourceLocation,
    entity::{EntityDescriptor, FieldDescriptor},
    utils::naming
};

/// One method of the generated repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// `new(pool)`
    New,
    /// `pool()`
    Pool,
    /// `map_row(&PgRow)`
    MapRow,
    /// `bind_insert(query, entity)`
    BindInsert,
    /// `bind_update(query, entity)`
    BindUpdate,
    /// `init_table()`
    InitTable,
    /// `create(&entity)`
    Create,
    /// `create_with_new_id(&mut entity)`; only with an identifier generator.
    CreateWithNewId,
    /// `find_by_id(&id)`
    FindById,
    /// `update(&entity)`
    Update,
    /// `delete(&id)`
    Delete,
    /// `list()`
    List
}

impl Method {
    /// Method name in the generated code.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Pool => "pool",
            Self::MapRow => "map_row",
            Self::BindInsert => "bind_insert",
            Self::BindUpdate => "bind_update",
            Self::InitTable => "init_table",
            Self::Create => "create",
            Self::CreateWithNewId => "create_with_new_id",
            Self::FindById => "find_by_id",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::List => "list"
        }
    }

    /// Methods that need an identifier column.
    #[must_use]
    pub const fn needs_identifier(self) -> bool {
        matches!(
            self,
            Self::BindUpdate | Self::CreateWithNewId | Self::FindById | Self::Update | Self::Delete
        )
    }
}

/// Every method, in the order they are rendered.
pub const METHODS: [Method; 12] = [
    Method::New,
    Method::Pool,
    Method::MapRow,
    Method::BindInsert,
    Method::BindUpdate,
    Method::InitTable,
    Method::Create,
    Method::CreateWithNewId,
    Method::FindById,
    Method::Update,
    Method::Delete,
    Method::List
];

/// Structural plan of one generated repository.
///
/// Owns copies of the field descriptors it needs; nothing is shared with
/// other entities' models.
#[derive(Debug, Clone)]
pub struct CodeModel {
    /// Fully-qualified entity name.
    pub entity:            String,
    /// Entity declaration, for diagnostics.
    pub location:          SourceLocation,
    /// Path the generated code uses to name the entity.
    pub entity_path:       Path,
    /// Repository struct name, e.g. `UserRepository`.
    pub repository:        Ident,
    /// Output file stem, e.g. `user`.
    pub file_stem:         String,
    /// Table reference as written in SQL.
    pub table:             String,
    /// Identifier field, when there is exactly one.
    pub id:                Option<FieldDescriptor>,
    /// Type of the identifier parameter in `find_by_id`/`delete`.
    pub id_type:           Option<Type>,
    /// Every field in declaration order, for the row mapper.
    pub fields:            Vec<FieldDescriptor>,
    /// Fields bound by `bind_insert`, in placeholder order.
    pub insert_binds:      Vec<FieldDescriptor>,
    /// Fields bound by `bind_update`, in placeholder order.
    pub update_binds:      Vec<FieldDescriptor>,
    /// SQL templates.
    pub statements:        Statements,
    /// Methods to generate.
    pub methods:           Vec<Method>,
    /// The row mapper needs the `decode_char` helper.
    pub needs_char_helper: bool,
    /// `false` when the entity carried errors; the emitter refuses it.
    pub emittable:         bool
}

impl CodeModel {
    /// `true` when `method` is part of the plan.
    #[must_use]
    pub fn has_method(&self, method: Method) -> bool {
        self.methods.contains(&method)
    }
}

/// Build the code model of one entity.
#[tracing::instrument(skip_all, fields(entity = entity.fqn()))]
pub fn build(entity: &EntityDescriptor) -> CodeModel {
    let id = entity.id_field();
    let statements = Statements::new(entity, id);

    let insert_binds = sql::insert_order(entity, id)
        .into_iter()
        .cloned()
        .collect();
    let update_binds = id
        .map(|id| sql::update_order(entity, id).into_iter().cloned().collect())
        .unwrap_or_default();

    let generated_id = id.is_some_and(|id| id.generator.is_some());
    let methods = METHODS
        .into_iter()
        .filter(|m| id.is_some() || !m.needs_identifier())
        .filter(|m| generated_id || *m != Method::CreateWithNewId)
        .collect();

    let needs_char_helper = entity.persistent_fields().iter().any(|f| {
        f.resolved
            .as_ref()
            .is_some_and(|r| r.mapping.coercion.needs_char_helper())
    });

    let id_type = id.map(identifier_type);

    let emittable = entity.is_valid();
    if !emittable {
        tracing::debug!(errors = entity.errors, "code model is not emittable");
    }

    CodeModel {
        entity: entity.fqn().to_string(),
        location: entity.location.clone(),
        entity_path: path_of(entity.fqn()),
        repository: entity.ident_with("", "Repository"),
        file_stem: naming::file_stem(&entity.ident),
        table: entity.qualified_table(),
        id: id.cloned(),
        id_type,
        fields: entity.all_fields().to_vec(),
        insert_binds,
        update_binds,
        statements,
        methods,
        needs_char_helper,
        emittable
    }
}

/// Type of the identifier parameter.
///
/// A qualified declaration such as `sqlx::types::Uuid` is kept as written,
/// since the host crate may not depend on the canonical crate directly. A
/// bare name like `Uuid` may be out of scope in the generated file, so it
/// is replaced by the mapping's canonical path.
fn identifier_type(id: &FieldDescriptor) -> Type {
    let qualified = match &id.ty {
        Type::Path(path) => path.qself.is_none() && path.path.segments.len() > 1,
        _ => false
    };
    match &id.resolved {
        Some(resolved) if !qualified => resolved.mapping.rust_type.clone(),
        _ => id.ty.clone()
    }
}

/// `crate::db::User` as a path, with keyword segments made raw.
fn path_of(fqn: &str) -> Path {
    let mut path = Path {
        leading_colon: None,
        segments:      syn::punctuated::Punctuated::new()
    };
    for segment in fqn.split("::") {
        let ident = if segment == "crate" || syn::parse_str::<Ident>(segment).is_ok() {
            Ident::new(segment, Span::call_site())
        } else {
            Ident::new_raw(segment, Span::call_site())
        };
        path.segments.push(ident.into());
    }
    path
}
