// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Name derivation.
//!
//! | Declared | Derived |
//! |----------|---------|
//! | `User` | `user` |
//! | `UserProfile` | `user_profile` |
//! | `HTTPRequest` | `http_request` |
//! | `createdAt` | `created_at` |
//! | `r#type` | `type` |
//!
//! Names are never pluralized.

use convert_case::{Case, Casing};
use syn::{Ident, ext::IdentExt};

/// Table name for a struct without a `table` override.
#[must_use]
pub fn table_name(ident: &Ident) -> String {
    snake(ident)
}

/// Column name for a field without a `name` override.
#[must_use]
pub fn column_name(ident: &Ident) -> String {
    snake(ident)
}

/// Output file stem for an entity: `UserProfile` → `user_profile`.
#[must_use]
pub fn file_stem(ident: &Ident) -> String {
    snake(ident)
}

fn snake(ident: &Ident) -> String {
    ident.unraw().to_string().to_case(Case::Snake)
}
