// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Rendering a code model to source text.
//!
//! Tokens are assembled with `quote!`, parsed back into a `syn::File` and
//! printed with `prettyplease`, so the same model always produces the same
//! bytes regardless of how the tokens were spaced.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::ext::IdentExt;

use crate::{
    codegen::{CodeModel, Method},
    utils::fields::{bindings, row_assigns}
};

/// Query type taken and returned by the statement binders.
fn query_type() -> TokenStream {
    quote! { sqlx::query::Query<'q, sqlx::Postgres, sqlx::postgres::PgArguments> }
}

/// Render `model` as a complete source file.
///
/// # Errors
///
/// Fails only if the assembled tokens are not a valid Rust file, which
/// points at an entity or type path that cannot be spelled in Rust.
pub fn render(model: &CodeModel) -> syn::Result<String> {
    let file: syn::File = syn::parse2(tokens(model))?;
    Ok(format!(
        "// @generated by entity-codegen from `{}`. Do not edit.\n\n{}",
        model.entity,
        prettyplease::unparse(&file)
    ))
}

fn tokens(model: &CodeModel) -> TokenStream {
    let repository = &model.repository;
    let doc = format!(" Data access for [`{}`].", model.entity);
    let consts = constants(model);
    let methods = model.methods.iter().map(|&method| method_tokens(model, method));
    let helper = model.needs_char_helper.then(decode_char);

    quote! {
        #[doc = #doc]
        #[derive(Debug, Clone)]
        pub struct #repository {
            pool: sqlx::PgPool,
        }

        impl #repository {
            #consts
            #(#methods)*
            #helper
        }
    }
}

fn constants(model: &CodeModel) -> TokenStream {
    let sql = &model.statements;
    let table = &model.table;
    let create_table = &sql.create_table;
    let insert = &sql.insert;
    let select_all = &sql.select_all;
    let select_by_id = sql.select_by_id.as_ref().map(|s| {
        quote! {
            /// Select one row by identifier.
            pub const SELECT_BY_ID_SQL: &'static str = #s;
        }
    });
    let update = sql.update.as_ref().map(|s| {
        quote! {
            /// Update one row by identifier.
            pub const UPDATE_SQL: &'static str = #s;
        }
    });
    let delete = sql.delete.as_ref().map(|s| {
        quote! {
            /// Delete one row by identifier.
            pub const DELETE_SQL: &'static str = #s;
        }
    });

    quote! {
        /// Table as referenced in SQL.
        pub const TABLE: &'static str = #table;
        /// Table definition.
        pub const CREATE_TABLE_SQL: &'static str = #create_table;
        /// Insert one row.
        pub const INSERT_SQL: &'static str = #insert;
        #select_by_id
        #update
        #delete
        /// Select every row.
        pub const SELECT_ALL_SQL: &'static str = #select_all;
    }
}

fn method_tokens(model: &CodeModel, method: Method) -> TokenStream {
    let entity = &model.entity_path;
    let query = query_type();

    match method {
        Method::New => quote! {
            /// Repository over `pool`.
            pub fn new(pool: sqlx::PgPool) -> Self {
                Self { pool }
            }
        },
        Method::Pool => quote! {
            /// Underlying pool.
            pub fn pool(&self) -> &sqlx::PgPool {
                &self.pool
            }
        },
        Method::MapRow => {
            let assigns = row_assigns(&model.fields);
            quote! {
                /// Build an entity from a result row.
                pub fn map_row(row: &sqlx::postgres::PgRow) -> Result<#entity, sqlx::Error> {
                    use sqlx::Row as _;
                    Ok(#entity {
                        #(#assigns,)*
                    })
                }
            }
        }
        Method::BindInsert => {
            let binds = bindings(&model.insert_binds.iter().collect::<Vec<_>>(), "entity");
            quote! {
                /// Bind the parameters of `INSERT_SQL`.
                pub fn bind_insert<'q>(query: #query, entity: &'q #entity) -> #query {
                    query #(#binds)*
                }
            }
        }
        Method::BindUpdate => {
            let binds = bindings(&model.update_binds.iter().collect::<Vec<_>>(), "entity");
            quote! {
                /// Bind the parameters of `UPDATE_SQL`.
                pub fn bind_update<'q>(query: #query, entity: &'q #entity) -> #query {
                    query #(#binds)*
                }
            }
        }
        Method::InitTable => quote! {
            /// Create the table if it does not exist.
            pub async fn init_table(&self) -> Result<(), sqlx::Error> {
                sqlx::query(Self::CREATE_TABLE_SQL).execute(&self.pool).await?;
                Ok(())
            }
        },
        Method::Create => quote! {
            /// Insert `entity`.
            pub async fn create(&self, entity: &#entity) -> Result<(), sqlx::Error> {
                Self::bind_insert(sqlx::query(Self::INSERT_SQL), entity)
                    .execute(&self.pool)
                    .await?;
                Ok(())
            }
        },
        Method::CreateWithNewId => {
            let Some((field, generator)) = model
                .id
                .as_ref()
                .and_then(|id| id.generator.as_ref().map(|generator| (id.name(), generator)))
            else {
                return TokenStream::new();
            };
            let doc = format!(
                " Assign a fresh `{}` from `{}` and insert `entity`.",
                field.unraw(),
                quote!(#generator).to_string().replace(' ', "")
            );
            quote! {
                #[doc = #doc]
                pub async fn create_with_new_id(&self, entity: &mut #entity) -> Result<(), sqlx::Error> {
                    entity.#field = #generator();
                    self.create(entity).await
                }
            }
        }
        Method::FindById => {
            let (id_type, id_bind) = id_parameter(model);
            quote! {
                /// Fetch the entity with identifier `id`.
                pub async fn find_by_id(&self, id: &#id_type) -> Result<Option<#entity>, sqlx::Error> {
                    let row = sqlx::query(Self::SELECT_BY_ID_SQL)
                        .bind(#id_bind)
                        .fetch_optional(&self.pool)
                        .await?;
                    row.as_ref().map(Self::map_row).transpose()
                }
            }
        }
        Method::Update => quote! {
            /// Update the row of `entity`. Returns `false` when no row matched.
            pub async fn update(&self, entity: &#entity) -> Result<bool, sqlx::Error> {
                let result = Self::bind_update(sqlx::query(Self::UPDATE_SQL), entity)
                    .execute(&self.pool)
                    .await?;
                Ok(result.rows_affected() > 0)
            }
        },
        Method::Delete => {
            let (id_type, id_bind) = id_parameter(model);
            quote! {
                /// Delete the row with identifier `id`. Returns `false` when no row matched.
                pub async fn delete(&self, id: &#id_type) -> Result<bool, sqlx::Error> {
                    let result = sqlx::query(Self::DELETE_SQL)
                        .bind(#id_bind)
                        .execute(&self.pool)
                        .await?;
                    Ok(result.rows_affected() > 0)
                }
            }
        }
        Method::List => quote! {
            /// Fetch every row.
            pub async fn list(&self) -> Result<Vec<#entity>, sqlx::Error> {
                let rows = sqlx::query(Self::SELECT_ALL_SQL)
                    .fetch_all(&self.pool)
                    .await?;
                rows.iter().map(Self::map_row).collect()
            }
        }
    }
}

/// Type and bind expression of the `id` parameter.
fn id_parameter(model: &CodeModel) -> (TokenStream, TokenStream) {
    let param = format_ident!("id");
    let value = quote! { #param };
    let ty = model
        .id_type
        .as_ref()
        .map_or_else(|| quote! { () }, |ty| quote! { #ty });
    let bind = match model.id.as_ref().and_then(|id| id.resolved.as_ref()) {
        Some(resolved) => resolved.write_expr(&value),
        None => value
    };
    (ty, bind)
}

fn decode_char() -> TokenStream {
    quote! {
        fn decode_char(column: &str, value: String) -> Result<char, sqlx::Error> {
            let mut chars = value.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(c),
                _ => Err(sqlx::Error::ColumnDecode {
                    index: column.to_owned(),
                    source: format!("expected exactly one character, found {value:?}").into(),
                }),
            }
        }
    }
}
