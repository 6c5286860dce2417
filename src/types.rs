// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Type resolution: Rust field types to PostgreSQL column types.
//!
//! The [`TypeRegistry`] is a read-only table built once per process and
//! handed to every resolver call by reference. Each [`TypeMapping`] pairs a
//! column type with a [`Coercion`], the read-from-row / write-to-statement
//! rule the generated code uses for that type.
//!
//! # Resolution
//!
//! 1. `Option<T>` is peeled off and marks the column nullable.
//! 2. The remaining type is normalized to a path key
//!    (`chrono::DateTime<chrono::Utc>`) and looked up exactly.
//! 3. Failing that, every path is reduced to its last segment
//!    (`DateTime<Utc>`) and looked up again.
//!
//! Anything else resolves to `None`; the scanner turns that into an
//! `UnresolvedType` diagnostic for the field.

mod coercion;
mod mapping;
mod registry;


pub use coercion::{Coercion, WideInt};
pub use mapping::{ColumnType, TypeMapping};
pub use registry::{ResolvedType, TypeRegistry, option_inner};
