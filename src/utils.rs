// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Shared utilities for code generation.
//!
//! # Submodules
//!
//! - [`fields`]: Row-read assignments and bind chains
//! - [`naming`]: Table and column name derivation
//! - [`sql`]: Identifier quoting and SQL fragment building

pub mod fields;
pub mod naming;
pub mod sql;
