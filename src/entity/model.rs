// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Pass-wide collection of entity descriptors.

use std::collections::HashMap;

use super::{descriptor::EntityDescriptor, field::ForeignKey};
use crate::{
    diagnostic::{Diagnostic, DiagnosticKind, Reporter},
    types::ColumnType,
    utils::sql::quote_ident
};

/// Every entity discovered in one pass, in discovery order.
///
/// Keyed by fully-qualified name; a second descriptor with the same name is
/// rejected with a `DuplicateEntity` error. Column references between
/// entities are resolved by [`MetadataModel::link`].
#[derive(Debug, Default)]
pub struct MetadataModel {
    entities: Vec<EntityDescriptor>,
    by_path:  HashMap<String, usize>
}

impl MetadataModel {
    /// Empty model.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a model from a scan, reporting duplicates and linking
    /// references.
    pub fn collect(
        entities: impl IntoIterator<Item = EntityDescriptor>,
        reporter: &mut Reporter
    ) -> Self {
        let mut model = Self::new();
        for entity in entities {
            model.insert(entity, reporter);
        }
        model.link(reporter);
        model
    }

    /// Resolve every `references` marker against the model.
    ///
    /// A reference links when its target is an entity with a single
    /// identifier whose column type matches the referencing column. Anything
    /// else is an `UnresolvedReference` error charged to the referencing
    /// entity, which then stops being emittable.
    pub fn link(&mut self, reporter: &mut Reporter) {
        let mut outcomes = Vec::new();
        for (entity_index, entity) in self.entities.iter().enumerate() {
            for (field_index, field) in entity.fields.iter().enumerate() {
                let Some(reference) = &field.references else {
                    continue;
                };
                if reference.target.is_some() {
                    continue;
                }
                let outcome = self
                    .foreign_key(&reference.entity, field.column_type())
                    .map_err(|why| {
                        Diagnostic::new(
                            DiagnosticKind::UnresolvedReference,
                            format!(
                                "field `{}` of `{}` references `{}`, {why}",
                                field.name_str(),
                                entity.fqn(),
                                reference.entity
                            ),
                            field.location.clone()
                        )
                        .with_entity(entity.fqn())
                    });
                outcomes.push((entity_index, field_index, outcome));
            }
        }

        for (entity_index, field_index, outcome) in outcomes {
            let entity = &mut self.entities[entity_index];
            match outcome {
                Ok(key) => {
                    if let Some(reference) = &mut entity.fields[field_index].references {
                        reference.target = Some(key);
                    }
                }
                Err(diagnostic) => {
                    entity.errors += 1;
                    reporter.report(diagnostic);
                }
            }
        }
    }

    fn foreign_key(
        &self,
        target: &str,
        column_type: Option<&ColumnType>
    ) -> Result<ForeignKey, String> {
        let entity = self
            .get(target)
            .ok_or_else(|| "which is not an entity".to_string())?;
        let id = entity
            .id_field()
            .ok_or_else(|| "which has no single identifier".to_string())?;
        if let (Some(expected), Some(actual)) = (id.column_type(), column_type)
            && expected != actual
        {
            return Err(format!(
                "whose identifier is {} but the column is {}",
                expected.as_sql(),
                actual.as_sql()
            ));
        }
        Ok(ForeignKey {
            table:  entity.qualified_table(),
            column: quote_ident(&id.column)
        })
    }

    /// Add a descriptor. Returns `false` (and reports) on a duplicate name.
    pub fn insert(&mut self, entity: EntityDescriptor, reporter: &mut Reporter) -> bool {
        if let Some(&index) = self.by_path.get(entity.fqn()) {
            let first = &self.entities[index];
            reporter.report(
                Diagnostic::new(
                    DiagnosticKind::DuplicateEntity,
                    format!(
                        "entity `{}` is declared more than once (first at {})",
                        entity.fqn(),
                        first.location
                    ),
                    entity.location.clone()
                )
                .with_entity(entity.fqn())
            );
            return false;
        }
        self.by_path
            .insert(entity.fqn().to_string(), self.entities.len());
        self.entities.push(entity);
        true
    }

    /// Look up an entity by fully-qualified name.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&EntityDescriptor> {
        self.by_path.get(path).map(|&index| &self.entities[index])
    }

    /// Entities in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = &EntityDescriptor> {
        self.entities.iter()
    }

    /// Entities as a slice, in discovery order.
    #[must_use]
    pub fn entities(&self) -> &[EntityDescriptor] {
        &self.entities
    }

    /// Number of entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// `true` when no entity was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
