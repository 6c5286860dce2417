// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! SQL fragment building utilities.

use crate::entity::FieldDescriptor;

/// PostgreSQL reserved key words, sorted.
///
/// These cannot be used as table or column names without quoting.
const RESERVED: &[&str] = &[
    "all",
    "analyse",
    "analyze",
    "and",
    "any",
    "array",
    "as",
    "asc",
    "asymmetric",
    "authorization",
    "binary",
    "both",
    "case",
    "cast",
    "check",
    "collate",
    "collation",
    "column",
    "concurrently",
    "constraint",
    "create",
    "cross",
    "current_catalog",
    "current_date",
    "current_role",
    "current_schema",
    "current_time",
    "current_timestamp",
    "current_user",
    "default",
    "deferrable",
    "desc",
    "distinct",
    "do",
    "else",
    "end",
    "except",
    "false",
    "fetch",
    "for",
    "foreign",
    "freeze",
    "from",
    "full",
    "grant",
    "group",
    "having",
    "ilike",
    "in",
    "initially",
    "inner",
    "intersect",
    "into",
    "is",
    "isnull",
    "join",
    "lateral",
    "leading",
    "left",
    "like",
    "limit",
    "localtime",
    "localtimestamp",
    "natural",
    "not",
    "notnull",
    "null",
    "offset",
    "on",
    "only",
    "or",
    "order",
    "outer",
    "overlaps",
    "placing",
    "primary",
    "references",
    "returning",
    "right",
    "select",
    "session_user",
    "similar",
    "some",
    "symmetric",
    "system_user",
    "table",
    "tablesample",
    "then",
    "to",
    "trailing",
    "true",
    "union",
    "unique",
    "user",
    "using",
    "variadic",
    "verbose",
    "when",
    "where",
    "window",
    "with"
];

/// `true` when `name` is a reserved word (case-insensitive).
#[must_use]
pub fn is_reserved(name: &str) -> bool {
    RESERVED
        .binary_search(&name.to_ascii_lowercase().as_str())
        .is_ok()
}

/// Identifier as written in SQL.
///
/// Plain lower-case names pass through; reserved words and anything with
/// characters outside `[a-z0-9_]` (or a leading digit) are double-quoted,
/// with inner quotes doubled.
#[must_use]
pub fn quote_ident(name: &str) -> String {
    let plain = !name.is_empty()
        && !name.starts_with(|c: char| c.is_ascii_digit())
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');

    if plain && !is_reserved(name) {
        name.to_string()
    } else {
        format!("\"{}\"", name.replace('"', "\"\""))
    }
}

/// Join quoted column names with comma separator.
pub fn join_columns(fields: &[&FieldDescriptor]) -> String {
    fields
        .iter()
        .map(|f: &&FieldDescriptor| quote_ident(&f.column))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Build PostgreSQL placeholders: `$1, $2, $3, ...`
pub fn placeholders(count: usize) -> String {
    (1..=count)
        .map(|i| format!("${i}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Build SET clause: `col1 = $1, col2 = $2, ...`
pub fn set_clause(fields: &[&FieldDescriptor]) -> String {
    fields
        .iter()
        .enumerate()
        .map(|(i, f): (usize, &&FieldDescriptor)| {
            format!("{} = ${}", quote_ident(&f.column), i + 1)
        })
        .collect::<Vec<_>>()
        .join(", ")
}
