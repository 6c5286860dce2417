// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(
    missing_docs,
    rustdoc::missing_crate_level_docs,
    rustdoc::broken_intra_doc_links,
    rust_2018_idioms
)]
#![deny(unsafe_code)]

//! # entity-codegen
//!
//! Build-time generator of `sqlx` repositories for annotated entity
//! structs. The generator reads the crate's sources as plain syntax, finds
//! every struct carrying `#[entity]`, and writes one
//! `<entity>_repository.rs` file per entity. Nothing is evaluated at
//! runtime and no procedural macro is involved.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! // src/db.rs
//! #[entity]
//! pub struct User {
//!     pub id: i64,
//!     pub name: String,
//!     pub age: i32,
//! }
//!
//! include!(concat!(env!("OUT_DIR"), "/user_repository.rs"));
//! ```
//!
//! ```rust,ignore
//! // build.rs
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let out_dir = std::env::var("OUT_DIR")?;
//!     let config = entity_codegen::GeneratorConfig::new(out_dir);
//!     let report = entity_codegen::generate(&config)?;
//!     report.print_cargo_messages();
//!     report.into_result()?;
//!     Ok(())
//! }
//! ```
//!
//! The markers are inert to `rustc`: declare them as no-op attribute macros
//! or wrap them in `cfg_attr` so the host crate still compiles.
//!
//! # Markers
//!
//! | Marker | Where | Meaning |
//! |--------|-------|---------|
//! | `#[entity]` | struct | Generate a repository, table name derived |
//! | `#[entity(table = "..", schema = "..")]` | struct | Explicit table / schema |
//! | `#[entity(unique(a, b))]` | struct | Table-level `UNIQUE (a, b)` |
//! | `#[id]`, `#[column(id)]` | field | Identifier (otherwise a field named `id`) |
//! | `#[transient]`, `#[column(skip)]` | field | Not persisted |
//! | `#[column(name = "..")]` | field | Column name override |
//! | `#[column(nullable = true)]` | field | Nullability override |
//! | `#[column(unique)]` | field | `UNIQUE` in the table definition |
//! | `#[column(default = "..")]` | field | Raw SQL `DEFAULT` |
//! | `#[column(references = "..")]` | field | Foreign key to another entity |
//! | `#[column(generator = "..")]` | identifier | Id factory for `create_with_new_id` |
//!
//! Names are converted to `snake_case` without pluralization: `UserAccount`
//! becomes table `user_account`.
//!
//! # Pipeline
//!
//! | Stage | Module | Output |
//! |-------|--------|--------|
//! | Load | [`source`] | [`SourceSet`] |
//! | Scan | [`scan`] | [`EntityDescriptor`]s |
//! | Collect | [`entity`] | [`MetadataModel`] |
//! | Build | [`codegen`] | [`CodeModel`] |
//! | Emit | [`emit`] | files |
//!
//! Every stage reports problems to a [`Reporter`] instead of failing; the
//! pass keeps going so that all broken entities are reported in one build.
//! [`generate`] ties the stages together and returns a [`Report`].

pub mod codegen;
pub mod config;
pub mod diagnostic;
pub mod emit;
pub mod entity;
pub mod error;
pub mod pass;
pub mod report;
pub mod scan;
pub mod source;
pub mod types;
mod utils;

pub use codegen::{CodeModel, build};
pub use config::{CustomType, GeneratorConfig};
pub use diagnostic::{Diagnostic, DiagnosticKind, Reporter, Severity, SourceLocation};
pub use emit::{Emitter, Rendered};
pub use entity::{EntityDescriptor, FieldDescriptor, ForeignKey, MetadataModel, Reference};
pub use error::{Error, Result};
pub use pass::{generate, run};
pub use report::Report;
pub use source::{SourceFile, SourceSet};
pub use types::{ColumnType, Coercion, ResolvedType, TypeMapping, TypeRegistry};
