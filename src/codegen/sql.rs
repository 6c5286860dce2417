// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! SQL statement templates for one entity.
//!
//! | Statement | Pattern |
//! |-----------|---------|
//! | insert | `INSERT INTO t (id, a, b) VALUES ($1, $2, $3)` |
//! | select by id | `SELECT id, a, b FROM t WHERE id = $1` |
//! | update | `UPDATE t SET a = $1, b = $2 WHERE id = $3` |
//! | delete | `DELETE FROM t WHERE id = $1` |
//! | select all | `SELECT id, a, b FROM t ORDER BY id` |
//!
//! Column lists follow declaration order. Inserts put the identifier first;
//! updates bind it last.
//!
//! The table definition lists one column per line, then one line per
//! table-level `UNIQUE` group:
//!
//! ```sql
//! CREATE TABLE IF NOT EXISTS orders (
//!     id BIGINT PRIMARY KEY,
//!     buyer BIGINT NOT NULL REFERENCES core.accounts (id),
//!     code TEXT NOT NULL,
//!     UNIQUE (buyer, code)
//! )
//! ```

use crate::{
    entity::{EntityDescriptor, FieldDescriptor},
    utils::sql::{join_columns, placeholders, quote_ident, set_clause}
};

/// Every statement the repository runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statements {
    /// `CREATE TABLE IF NOT EXISTS ...`
    pub create_table: String,
    /// `INSERT INTO ...`
    pub insert:       String,
    /// `SELECT ... WHERE id = $1`; needs an identifier.
    pub select_by_id: Option<String>,
    /// `UPDATE ... WHERE id = $n`; needs an identifier.
    pub update:       Option<String>,
    /// `DELETE ... WHERE id = $1`; needs an identifier.
    pub delete:       Option<String>,
    /// `SELECT ...` of every row.
    pub select_all:   String
}

impl Statements {
    /// Build all statements from the entity's table and columns.
    pub fn new(entity: &EntityDescriptor, id: Option<&FieldDescriptor>) -> Self {
        let table = entity.qualified_table();
        let persistent = entity.persistent_fields();
        let select_list = join_columns(&persistent);
        let insert_fields = insert_order(entity, id);

        let insert = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            table,
            join_columns(&insert_fields),
            placeholders(insert_fields.len())
        );

        let select_all = match id {
            Some(id) => format!(
                "SELECT {} FROM {} ORDER BY {}",
                select_list,
                table,
                quote_ident(&id.column)
            ),
            None => format!("SELECT {} FROM {}", select_list, table)
        };

        let by_id = id.map(|id| {
            let id_column = quote_ident(&id.column);
            let select = format!("SELECT {select_list} FROM {table} WHERE {id_column} = $1");
            let update = update_statement(&table, &id_column, &entity.non_id_fields());
            let delete = format!("DELETE FROM {table} WHERE {id_column} = $1");
            (select, update, delete)
        });
        let (select_by_id, update, delete) = match by_id {
            Some((select, update, delete)) => (Some(select), Some(update), Some(delete)),
            None => (None, None, None)
        };

        Self {
            create_table: create_table(entity, &table),
            insert,
            select_by_id,
            update,
            delete,
            select_all
        }
    }
}

/// Insert column order: identifier first, then the rest in declaration
/// order.
pub fn insert_order<'a>(
    entity: &'a EntityDescriptor,
    id: Option<&'a FieldDescriptor>
) -> Vec<&'a FieldDescriptor> {
    match id {
        Some(id) => std::iter::once(id).chain(entity.non_id_fields()).collect(),
        None => entity.persistent_fields()
    }
}

/// Update bind order: `SET` columns in declaration order, identifier last.
///
/// With no other column, the identifier is bound once and set to itself.
pub fn update_order<'a>(
    entity: &'a EntityDescriptor,
    id: &'a FieldDescriptor
) -> Vec<&'a FieldDescriptor> {
    entity
        .non_id_fields()
        .into_iter()
        .chain(std::iter::once(id))
        .collect()
}

fn update_statement(table: &str, id_column: &str, set_fields: &[&FieldDescriptor]) -> String {
    if set_fields.is_empty() {
        return format!("UPDATE {table} SET {id_column} = $1 WHERE {id_column} = $1");
    }
    format!(
        "UPDATE {} SET {} WHERE {} = ${}",
        table,
        set_clause(set_fields),
        id_column,
        set_fields.len() + 1
    )
}

/// `CREATE TABLE IF NOT EXISTS` with one line per persistent column and
/// per unique group.
fn create_table(entity: &EntityDescriptor, table: &str) -> String {
    let mut lines: Vec<String> = entity
        .persistent_fields()
        .into_iter()
        .map(column_def)
        .collect();
    lines.extend(entity.unique_constraints.iter().map(|group| {
        let columns: Vec<String> = group.iter().map(|c| quote_ident(c)).collect();
        format!("    UNIQUE ({})", columns.join(", "))
    }));

    format!(
        "CREATE TABLE IF NOT EXISTS {} (\n{}\n)",
        table,
        lines.join(",\n")
    )
}

fn column_def(field: &FieldDescriptor) -> String {
    let sql_type = field.column_type().map_or("UNRESOLVED", |t| t.as_sql());
    let mut parts = vec![format!("    {}", quote_ident(&field.column)), sql_type.to_string()];

    if field.is_id {
        parts.push("PRIMARY KEY".to_string());
    } else if !field.nullable {
        parts.push("NOT NULL".to_string());
    }

    if field.unique && !field.is_id {
        parts.push("UNIQUE".to_string());
    }

    if let Some(default) = &field.default {
        parts.push(format!("DEFAULT {default}"));
    }

    if let Some(key) = field.references.as_ref().and_then(|r| r.target.as_ref()) {
        parts.push(format!("REFERENCES {} ({})", key.table, key.column));
    }

    parts.join(" ")
}
