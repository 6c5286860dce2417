// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Metadata model: the structural description of every scanned entity.
//!
//! The scanner produces [`EntityDescriptor`]s; everything downstream only
//! reads them. Descriptors are immutable once the model has linked their
//! references, and live for one generation pass.
//!
//! # Data Structures
//!
//! ```text
//! MetadataModel
//! └── EntityDescriptor          (keyed by fully-qualified name)
//!     ├── ident: Ident          (struct name, e.g. "User")
//!     ├── path: String          (e.g. "crate::db::User")
//!     ├── table: String         (explicit or derived, e.g. "user")
//!     ├── schema: Option<String>
//!     ├── location              (for diagnostics)
//!     ├── unique_constraints    (column groups)
//!     └── fields: Vec<FieldDescriptor>   (declaration order)
//!         └── FieldDescriptor
//!             ├── ident, ty     (name and declared type)
//!             ├── resolved      (type mapping, if any)
//!             ├── column        (explicit or derived)
//!             ├── nullable
//!             ├── is_id
//!             ├── ignored
//!             ├── references    (target entity name, then its table)
//!             └── generator     (identifier factory)
//! ```
//!
//! Entities never reference each other directly. A reference holds the
//! target's fully-qualified name and is resolved through
//! [`MetadataModel::get`] when the model is collected.

mod descriptor;
mod field;
mod model;

pub use descriptor::EntityDescriptor;
pub use field::{FieldDescriptor, ForeignKey, Reference};
pub use model::MetadataModel;
