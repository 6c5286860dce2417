// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Column types and the fixed mapping table.
//!
//! # Mapping Table
//!
//! | Rust Type | PostgreSQL Type | Coercion |
//! |-----------|-----------------|----------|
//! | `bool` | `BOOLEAN` | direct |
//! | `i16` / `i32` / `i64` | `SMALLINT` / `INTEGER` / `BIGINT` | direct |
//! | `i8`, `u8` | `SMALLINT` | widen via `i16` |
//! | `u16` | `INTEGER` | widen via `i32` |
//! | `u32` | `BIGINT` | widen via `i64` |
//! | `f32` / `f64` | `REAL` / `DOUBLE PRECISION` | direct |
//! | `String` | `TEXT` | direct |
//! | `char` | `TEXT` | single character |
//! | `Box<str>`, `Arc<str>`, `Rc<str>` | `TEXT` | shared string |
//! | `Vec<u8>` | `BYTEA` | direct |
//! | `Uuid` | `UUID` | direct |
//! | `NaiveDate` / `NaiveTime` / `NaiveDateTime` | `DATE` / `TIME` / `TIMESTAMP` | direct |
//! | `DateTime<Utc \| FixedOffset \| Local>` | `TIMESTAMPTZ` | direct |
//! | `Date` / `Time` / `PrimitiveDateTime` / `OffsetDateTime` | `DATE` / `TIME` / `TIMESTAMP` / `TIMESTAMPTZ` | direct |
//! | `Decimal`, `BigDecimal` | `NUMERIC` | direct |
//! | `serde_json::Value` | `JSONB` | direct |
//! | `IpAddr` | `INET` | direct |
//!
//! `u64` and `usize` are deliberately absent: PostgreSQL has no unsigned
//! 64-bit integer.

use std::fmt;

use syn::Type;

use super::coercion::{Coercion, WideInt};

/// PostgreSQL column type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ColumnType {
    /// `BOOLEAN`
    Boolean,
    /// `SMALLINT`
    SmallInt,
    /// `INTEGER`
    Integer,
    /// `BIGINT`
    BigInt,
    /// `REAL`
    Real,
    /// `DOUBLE PRECISION`
    DoublePrecision,
    /// `TEXT`
    Text,
    /// `BYTEA`
    Bytea,
    /// `UUID`
    Uuid,
    /// `DATE`
    Date,
    /// `TIME`
    Time,
    /// `TIMESTAMP`
    Timestamp,
    /// `TIMESTAMPTZ`
    TimestampTz,
    /// `NUMERIC`
    Numeric,
    /// `JSONB`
    Jsonb,
    /// `INET`
    Inet,
    /// Any other type, spelled as given in configuration.
    Other(String)
}

impl ColumnType {
    /// SQL spelling used in DDL.
    #[must_use]
    pub fn as_sql(&self) -> &str {
        match self {
            Self::Boolean => "BOOLEAN",
            Self::SmallInt => "SMALLINT",
            Self::Integer => "INTEGER",
            Self::BigInt => "BIGINT",
            Self::Real => "REAL",
            Self::DoublePrecision => "DOUBLE PRECISION",
            Self::Text => "TEXT",
            Self::Bytea => "BYTEA",
            Self::Uuid => "UUID",
            Self::Date => "DATE",
            Self::Time => "TIME",
            Self::Timestamp => "TIMESTAMP",
            Self::TimestampTz => "TIMESTAMPTZ",
            Self::Numeric => "NUMERIC",
            Self::Jsonb => "JSONB",
            Self::Inet => "INET",
            Self::Other(name) => name
        }
    }

    /// Parse a SQL type name, falling back to [`ColumnType::Other`].
    #[must_use]
    pub fn from_sql(name: &str) -> Self {
        match name.trim().to_ascii_uppercase().as_str() {
            "BOOLEAN" | "BOOL" => Self::Boolean,
            "SMALLINT" | "INT2" => Self::SmallInt,
            "INTEGER" | "INT" | "INT4" => Self::Integer,
            "BIGINT" | "INT8" => Self::BigInt,
            "REAL" | "FLOAT4" => Self::Real,
            "DOUBLE PRECISION" | "FLOAT8" => Self::DoublePrecision,
            "TEXT" => Self::Text,
            "BYTEA" => Self::Bytea,
            "UUID" => Self::Uuid,
            "DATE" => Self::Date,
            "TIME" => Self::Time,
            "TIMESTAMP" => Self::Timestamp,
            "TIMESTAMPTZ" => Self::TimestampTz,
            "NUMERIC" | "DECIMAL" => Self::Numeric,
            "JSONB" => Self::Jsonb,
            "INET" => Self::Inet,
            _ => Self::Other(name.trim().to_string())
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// One row of the mapping table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeMapping {
    /// Type the generated code names, e.g. `uuid::Uuid`.
    pub rust_type: Type,
    /// Storage type.
    pub column:    ColumnType,
    /// Read/write rule.
    pub coercion:  Coercion
}

impl TypeMapping {
    /// Mapping read from configuration: the driver handles the type itself.
    ///
    /// # Errors
    ///
    /// Fails when `rust_path` is not a Rust type.
    pub fn custom(rust_path: &str, column: &str) -> syn::Result<Self> {
        Ok(Self {
            rust_type: syn::parse_str(rust_path)?,
            column:    ColumnType::from_sql(column),
            coercion:  Coercion::Direct
        })
    }

    /// Type path as written into generated code.
    #[must_use]
    pub fn rust_path(&self) -> String {
        let ty = &self.rust_type;
        quote::quote!(#ty).to_string().replace(' ', "")
    }

    fn builtin(rust_path: &str, column: ColumnType, coercion: Coercion) -> Self {
        Self {
            rust_type: syn::parse_str(rust_path).expect("built-in type path"),
            column,
            coercion
        }
    }

    fn direct(rust_path: &str, column: ColumnType) -> Self {
        Self::builtin(rust_path, column, Coercion::Direct)
    }

    fn widen(rust_path: &str, column: ColumnType, storage: WideInt) -> Self {
        Self::builtin(rust_path, column, Coercion::Widen(storage))
    }

    fn adapted(rust_path: &str, column: ColumnType, coercion: Coercion) -> Self {
        Self::builtin(rust_path, column, coercion)
    }
}

/// The built-in table as `(lookup key, mapping)` pairs.
///
/// Keys are the last-segment form produced by the registry's normalizer.
pub(super) fn standard_table() -> Vec<(&'static str, TypeMapping)> {
    use ColumnType as C;

    vec![
        ("bool", TypeMapping::direct("bool", C::Boolean)),
        ("i16", TypeMapping::direct("i16", C::SmallInt)),
        ("i32", TypeMapping::direct("i32", C::Integer)),
        ("i64", TypeMapping::direct("i64", C::BigInt)),
        ("i8", TypeMapping::widen("i8", C::SmallInt, WideInt::I16)),
        ("u8", TypeMapping::widen("u8", C::SmallInt, WideInt::I16)),
        ("u16", TypeMapping::widen("u16", C::Integer, WideInt::I32)),
        ("u32", TypeMapping::widen("u32", C::BigInt, WideInt::I64)),
        ("f32", TypeMapping::direct("f32", C::Real)),
        ("f64", TypeMapping::direct("f64", C::DoublePrecision)),
        ("String", TypeMapping::direct("String", C::Text)),
        ("char", TypeMapping::adapted("char", C::Text, Coercion::Char)),
        (
            "Box<str>",
            TypeMapping::adapted("Box<str>", C::Text, Coercion::SharedStr)
        ),
        (
            "Arc<str>",
            TypeMapping::adapted("std::sync::Arc<str>", C::Text, Coercion::SharedStr)
        ),
        (
            "Rc<str>",
            TypeMapping::adapted("std::rc::Rc<str>", C::Text, Coercion::SharedStr)
        ),
        ("Vec<u8>", TypeMapping::direct("Vec<u8>", C::Bytea)),
        ("Uuid", TypeMapping::direct("uuid::Uuid", C::Uuid)),
        ("NaiveDate", TypeMapping::direct("chrono::NaiveDate", C::Date)),
        ("NaiveTime", TypeMapping::direct("chrono::NaiveTime", C::Time)),
        (
            "NaiveDateTime",
            TypeMapping::direct("chrono::NaiveDateTime", C::Timestamp)
        ),
        (
            "DateTime<Utc>",
            TypeMapping::direct("chrono::DateTime<chrono::Utc>", C::TimestampTz)
        ),
        (
            "DateTime<FixedOffset>",
            TypeMapping::direct("chrono::DateTime<chrono::FixedOffset>", C::TimestampTz)
        ),
        (
            "DateTime<Local>",
            TypeMapping::direct("chrono::DateTime<chrono::Local>", C::TimestampTz)
        ),
        ("Date", TypeMapping::direct("time::Date", C::Date)),
        ("Time", TypeMapping::direct("time::Time", C::Time)),
        (
            "PrimitiveDateTime",
            TypeMapping::direct("time::PrimitiveDateTime", C::Timestamp)
        ),
        (
            "OffsetDateTime",
            TypeMapping::direct("time::OffsetDateTime", C::TimestampTz)
        ),
        ("Decimal", TypeMapping::direct("rust_decimal::Decimal", C::Numeric)),
        (
            "BigDecimal",
            TypeMapping::direct("bigdecimal::BigDecimal", C::Numeric)
        ),
        ("Value", TypeMapping::direct("serde_json::Value", C::Jsonb)),
        ("IpAddr", TypeMapping::direct("std::net::IpAddr", C::Inet)),
    ]
}
