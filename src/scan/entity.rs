// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Describing one marked item.

use std::collections::{HashMap, HashSet};

use proc_macro2::Span;
use syn::{Fields, Ident, Item, ItemStruct, Type, Visibility, ext::IdentExt, spanned::Spanned};

use darling::util::PathList;

use super::attrs::{self, EntityAttrs, FieldMarkers};
use crate::{
    diagnostic::{Diagnostic, DiagnosticKind, Reporter, SourceLocation},
    entity::{EntityDescriptor, FieldDescriptor, Reference},
    source::SourceFile,
    types::{ResolvedType, TypeRegistry, option_inner},
    utils::{naming, sql::is_reserved}
};

/// Diagnostics for one entity, flushed to the reporter at the end.
struct Collector<'a> {
    file:        &'a SourceFile,
    fqn:         String,
    diagnostics: Vec<Diagnostic>
}

impl<'a> Collector<'a> {
    fn new(file: &'a SourceFile, fqn: String) -> Self {
        Self {
            file,
            fqn,
            diagnostics: Vec::new()
        }
    }

    fn location(&self, span: Span) -> SourceLocation {
        SourceLocation::from_span(&self.file.path, span)
    }

    fn push(&mut self, kind: DiagnosticKind, span: Span, message: String) {
        let diagnostic = Diagnostic::new(kind, message, self.location(span)).with_entity(&self.fqn);
        self.diagnostics.push(diagnostic);
    }

    fn errors(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    fn flush(self, reporter: &mut Reporter) {
        reporter.extend(self.diagnostics);
    }
}

/// Build the descriptor of a marked item, or report why there is none.
pub(super) fn describe(
    file: &SourceFile,
    module: &str,
    item: &Item,
    registry: &TypeRegistry,
    reporter: &mut Reporter
) -> Option<EntityDescriptor> {
    let Item::Struct(item) = item else {
        let fqn = match item_ident(item) {
            Some(ident) => format!("{module}::{}", ident.unraw()),
            None => module.to_string()
        };
        let mut collector = Collector::new(file, fqn);
        collector.push(
            DiagnosticKind::UnsupportedMemberKind,
            item.span(),
            format!(
                "`#[entity]` is only supported on structs with named fields, found {}",
                item_kind(item)
            )
        );
        collector.flush(reporter);
        return None;
    };

    let fqn = format!("{module}::{}", item.ident.unraw());
    let mut collector = Collector::new(file, fqn);
    let descriptor = describe_struct(module, item, registry, &mut collector);
    collector.flush(reporter);
    descriptor
}

fn describe_struct(
    module: &str,
    item: &ItemStruct,
    registry: &TypeRegistry,
    collector: &mut Collector<'_>
) -> Option<EntityDescriptor> {
    let name = item.ident.unraw().to_string();

    if !item.generics.params.is_empty() {
        collector.push(
            DiagnosticKind::UnsupportedMemberKind,
            item.generics.span(),
            format!("entity `{name}` cannot be generic")
        );
        return None;
    }

    let named = match &item.fields {
        Fields::Named(named) => named,
        Fields::Unnamed(_) => {
            collector.push(
                DiagnosticKind::UnsupportedMemberKind,
                item.ident.span(),
                format!("entity `{name}` is a tuple struct; named fields are required")
            );
            return None;
        }
        Fields::Unit => {
            collector.push(
                DiagnosticKind::UnsupportedMemberKind,
                item.ident.span(),
                format!("entity `{name}` is a unit struct; named fields are required")
            );
            return None;
        }
    };

    let entity_attrs = entity_attrs(item, collector);
    let table = match entity_attrs.table {
        Some(table) => table,
        None => {
            let derived = naming::table_name(&item.ident);
            if is_reserved(&derived) {
                collector.push(
                    DiagnosticKind::ReservedWord,
                    item.ident.span(),
                    format!("derived table name `{derived}` is a reserved word and will be quoted")
                );
            }
            derived
        }
    };

    let mut fields = Vec::with_capacity(named.named.len());
    let mut explicit_ids = Vec::new();
    let mut seen = HashSet::new();

    for field in &named.named {
        let Some(ident) = &field.ident else {
            continue;
        };
        let field_name = ident.unraw().to_string();
        if !seen.insert(field_name.clone()) {
            collector.push(
                DiagnosticKind::DuplicateFieldName,
                ident.span(),
                format!("field `{field_name}` is declared more than once")
            );
            continue;
        }

        if matches!(field.vis, Visibility::Inherited) {
            collector.push(
                DiagnosticKind::UnsupportedMemberKind,
                ident.span(),
                format!("field `{field_name}` is private; entity fields must be visible to the crate")
            );
        }

        let (markers, attr_errors) = attrs::parse_field(&attrs::flatten(&field.attrs));
        for (span, message) in attr_errors {
            collector.push(DiagnosticKind::InvalidAttribute, span, message);
        }
        let ignored = markers.is_ignored();

        if markers.is_id() {
            if ignored {
                collector.push(
                    DiagnosticKind::InvalidAttribute,
                    ident.span(),
                    format!("field `{field_name}` cannot be both identifier and ignored")
                );
            } else {
                explicit_ids.push(fields.len());
            }
        }

        let column = match markers.column.name.clone() {
            Some(name) if name.is_empty() => {
                collector.push(
                    DiagnosticKind::InvalidAttribute,
                    ident.span(),
                    format!("column name override of `{field_name}` is empty")
                );
                naming::column_name(ident)
            }
            Some(name) => name,
            None => {
                let derived = naming::column_name(ident);
                if !ignored && is_reserved(&derived) {
                    collector.push(
                        DiagnosticKind::ReservedWord,
                        ident.span(),
                        format!("derived column name `{derived}` is a reserved word and will be quoted")
                    );
                }
                derived
            }
        };

        let resolved = if ignored {
            None
        } else {
            resolve_field(&field.ty, &field_name, &name, registry, collector)
        };

        let references = reference(module, &markers, ignored, &field_name, ident, collector);
        let generator = generator(&markers, &field_name, ident, collector);

        let type_nullable = option_inner(&field.ty).is_some();
        if let Some(declared) = markers.column.nullable
            && declared != type_nullable
        {
            collector.push(
                DiagnosticKind::NullabilityMismatch,
                ident.span(),
                format!(
                    "field `{field_name}` declares nullable = {declared} but its type is {}",
                    if type_nullable { "an Option" } else { "not an Option" }
                )
            );
        }

        fields.push(FieldDescriptor {
            ident: ident.clone(),
            ty: field.ty.clone(),
            resolved,
            column,
            nullable: markers.column.nullable.unwrap_or(type_nullable),
            is_id: false,
            ignored,
            unique: markers.column.unique.is_present(),
            default: markers.column.default,
            references,
            generator,
            location: collector.location(ident.span())
        });
    }

    select_identifier(&name, item, &mut fields, &explicit_ids, collector);
    check_columns(&fields, collector);
    check_generators(&fields, collector);
    let unique_constraints = unique_constraints(item, &entity_attrs.unique, &fields, collector);

    Some(EntityDescriptor {
        ident: item.ident.clone(),
        path: collector.fqn.clone(),
        table,
        schema: entity_attrs.schema,
        fields,
        unique_constraints,
        location: collector.location(item.ident.span()),
        errors: collector.errors()
    })
}

/// Parse the `#[entity]` marker, falling back to defaults on error.
fn entity_attrs(item: &ItemStruct, collector: &mut Collector<'_>) -> EntityAttrs {
    let metas = attrs::flatten(&item.attrs);
    let Some(meta) = attrs::find_entity(&metas) else {
        return EntityAttrs::default();
    };

    let mut parsed = match attrs::parse_entity(meta) {
        Ok(parsed) => parsed,
        Err(err) => {
            collector.push(DiagnosticKind::InvalidAttribute, meta.span(), err.to_string());
            return EntityAttrs::default();
        }
    };

    if parsed.table.as_deref().is_some_and(str::is_empty) {
        collector.push(
            DiagnosticKind::InvalidAttribute,
            meta.span(),
            "table name override is empty".to_string()
        );
        parsed.table = None;
    }
    if parsed.schema.as_deref().is_some_and(str::is_empty) {
        collector.push(
            DiagnosticKind::InvalidAttribute,
            meta.span(),
            "schema override is empty".to_string()
        );
        parsed.schema = None;
    }
    parsed
}

fn resolve_field(
    ty: &Type,
    field_name: &str,
    entity_name: &str,
    registry: &TypeRegistry,
    collector: &mut Collector<'_>
) -> Option<ResolvedType> {
    let inner = option_inner(ty).unwrap_or(ty);
    if let Some(kind) = unsupported_type(inner) {
        collector.push(
            DiagnosticKind::UnsupportedMemberKind,
            ty.span(),
            format!("field `{field_name}` of `{entity_name}` has a {kind} type, which cannot be stored in a column")
        );
        return None;
    }

    let resolved = registry.resolve(ty);
    if resolved.is_none() {
        collector.push(
            DiagnosticKind::UnresolvedType,
            ty.span(),
            format!(
                "field `{field_name}` of `{entity_name}` has type `{}` with no column mapping",
                quote::quote!(#ty).to_string().replace(' ', "")
            )
        );
    }
    resolved
}

/// Pick the identifier: explicit marker, else a field named `id`.
fn select_identifier(
    name: &str,
    item: &ItemStruct,
    fields: &mut [FieldDescriptor],
    explicit: &[usize],
    collector: &mut Collector<'_>
) {
    let chosen = match explicit {
        [one] => *one,
        [] => {
            let convention = fields
                .iter()
                .position(|f| !f.ignored && f.ident.unraw() == "id");
            let Some(index) = convention else {
                collector.push(
                    DiagnosticKind::MissingIdentifier,
                    item.ident.span(),
                    format!("entity `{name}` has no identifier; mark one field with `#[id]` or name it `id`")
                );
                return;
            };
            index
        }
        many => {
            let names = many
                .iter()
                .map(|&i| format!("`{}`", fields[i].name_str()))
                .collect::<Vec<_>>()
                .join(", ");
            collector.push(
                DiagnosticKind::AmbiguousIdentifier,
                item.ident.span(),
                format!("entity `{name}` marks more than one identifier: {names}")
            );
            return;
        }
    };

    let field = &mut fields[chosen];
    if option_inner(&field.ty).is_some() {
        collector.push(
            DiagnosticKind::UnsupportedMemberKind,
            field.ty.span(),
            format!("identifier `{}` cannot be an Option", field.name_str())
        );
    } else if field.nullable {
        collector.push(
            DiagnosticKind::InvalidAttribute,
            field.ident.span(),
            format!("identifier `{}` cannot be nullable", field.name_str())
        );
    }
    field.is_id = true;
    field.nullable = false;
}

fn check_columns(fields: &[FieldDescriptor], collector: &mut Collector<'_>) {
    let mut columns: HashMap<&str, &FieldDescriptor> = HashMap::new();
    for field in fields.iter().filter(|f| f.is_persistent()) {
        if let Some(first) = columns.insert(&field.column, field) {
            collector.push(
                DiagnosticKind::DuplicateColumnName,
                field.ident.span(),
                format!(
                    "fields `{}` and `{}` both map to column `{}`",
                    first.name_str(),
                    field.name_str(),
                    field.column
                )
            );
        }
    }
}

/// The entity a `references` marker points at, as a fully-qualified name.
fn reference(
    module: &str,
    markers: &FieldMarkers,
    ignored: bool,
    field_name: &str,
    ident: &Ident,
    collector: &mut Collector<'_>
) -> Option<Reference> {
    let target = markers.column.references.as_deref()?;
    if ignored {
        collector.push(
            DiagnosticKind::InvalidAttribute,
            ident.span(),
            format!("ignored field `{field_name}` cannot reference another entity")
        );
        return None;
    }
    match reference_target(module, target) {
        Some(entity) => Some(Reference {
            entity,
            target: None
        }),
        None => {
            collector.push(
                DiagnosticKind::InvalidAttribute,
                ident.span(),
                format!("`references` of `{field_name}` is not an entity path: `{target}`")
            );
            None
        }
    }
}

/// Resolve `target` the way a `use` path inside `module` would be:
/// `crate::` is absolute, `self::` and bare paths start at `module`, and
/// each leading `super::` steps out once.
fn reference_target(module: &str, target: &str) -> Option<String> {
    let path: syn::Path = syn::parse_str(target).ok()?;
    if path.leading_colon.is_some() || path.segments.iter().any(|s| !s.arguments.is_none()) {
        return None;
    }

    let mut names = path
        .segments
        .iter()
        .map(|s| s.ident.unraw().to_string())
        .peekable();
    let here = || module.split("::").map(str::to_string).collect::<Vec<_>>();
    let mut resolved = match names.peek().map(String::as_str) {
        Some("crate") => {
            names.next();
            vec!["crate".to_string()]
        }
        Some("self") => {
            names.next();
            here()
        }
        _ => here()
    };
    while names.peek().is_some_and(|name| name == "super") {
        names.next();
        if resolved.len() <= 1 {
            return None;
        }
        resolved.pop();
    }
    for name in names {
        if matches!(name.as_str(), "crate" | "self" | "super") {
            return None;
        }
        resolved.push(name);
    }
    (resolved.len() > 1).then(|| resolved.join("::"))
}

fn generator(
    markers: &FieldMarkers,
    field_name: &str,
    ident: &Ident,
    collector: &mut Collector<'_>
) -> Option<syn::Path> {
    let path = markers.column.generator.as_deref()?;
    match syn::parse_str(path) {
        Ok(path) => Some(path),
        Err(_) => {
            collector.push(
                DiagnosticKind::InvalidAttribute,
                ident.span(),
                format!("`generator` of `{field_name}` is not a function path: `{path}`")
            );
            None
        }
    }
}

fn check_generators(fields: &[FieldDescriptor], collector: &mut Collector<'_>) {
    for field in fields.iter().filter(|f| f.generator.is_some() && !f.is_id) {
        collector.push(
            DiagnosticKind::InvalidAttribute,
            field.ident.span(),
            format!(
                "`generator` on `{}` is only allowed on the identifier",
                field.name_str()
            )
        );
    }
}

/// Column groups of `#[entity(unique(...))]`. A group naming an unknown or
/// ignored field, or the same field twice, is reported and dropped.
fn unique_constraints(
    item: &ItemStruct,
    groups: &[PathList],
    fields: &[FieldDescriptor],
    collector: &mut Collector<'_>
) -> Vec<Vec<String>> {
    let mut constraints = Vec::with_capacity(groups.len());
    for group in groups {
        if group.is_empty() {
            collector.push(
                DiagnosticKind::InvalidAttribute,
                item.ident.span(),
                "`unique()` needs at least one field".to_string()
            );
            continue;
        }

        let mut columns: Vec<String> = Vec::with_capacity(group.len());
        let mut names = HashSet::new();
        let mut valid = true;
        for path in group.iter() {
            let mut reject = |message: String| {
                collector.push(DiagnosticKind::InvalidAttribute, path.span(), message);
                valid = false;
            };
            let Some(name) = path.get_ident().map(|ident| ident.unraw().to_string()) else {
                reject("`unique` entries must be field names".to_string());
                continue;
            };
            let Some(field) = fields
                .iter()
                .find(|f| f.is_persistent() && f.name_str() == name)
            else {
                reject(format!("`unique` names `{name}`, which is not a persistent field"));
                continue;
            };
            if !names.insert(name.clone()) {
                reject(format!("`unique` lists field `{name}` twice"));
                continue;
            }
            columns.push(field.column.clone());
        }
        if valid {
            constraints.push(columns);
        }
    }
    constraints
}

/// Name of a type shape that has no column representation.
fn unsupported_type(ty: &Type) -> Option<&'static str> {
    match ty {
        Type::Path(_) => None,
        Type::Paren(paren) => unsupported_type(&paren.elem),
        Type::Group(group) => unsupported_type(&group.elem),
        Type::Reference(_) => Some("reference"),
        Type::Ptr(_) => Some("raw pointer"),
        Type::Slice(_) => Some("slice"),
        Type::TraitObject(_) => Some("trait object"),
        Type::Tuple(_) => Some("tuple"),
        Type::Array(_) => Some("array"),
        Type::ImplTrait(_) => Some("`impl Trait`"),
        Type::BareFn(_) => Some("function pointer"),
        Type::Never(_) => Some("never"),
        _ => Some("non-path")
    }
}

fn item_kind(item: &Item) -> &'static str {
    match item {
        Item::Enum(_) => "an enum",
        Item::Union(_) => "a union",
        Item::Static(_) => "a static",
        Item::Const(_) => "a const",
        Item::Fn(_) => "a function",
        Item::Trait(_) => "a trait",
        Item::Type(_) => "a type alias",
        Item::Impl(_) => "an impl block",
        Item::Mod(_) => "a module",
        _ => "an unsupported item"
    }
}

fn item_ident(item: &Item) -> Option<&Ident> {
    match item {
        Item::Enum(i) => Some(&i.ident),
        Item::Union(i) => Some(&i.ident),
        Item::Static(i) => Some(&i.ident),
        Item::Const(i) => Some(&i.ident),
        Item::Fn(i) => Some(&i.sig.ident),
        Item::Trait(i) => Some(&i.ident),
        Item::Type(i) => Some(&i.ident),
        Item::Mod(i) => Some(&i.ident),
        _ => None
    }
}
