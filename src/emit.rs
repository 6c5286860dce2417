// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Emitter: one generated file per entity.
//!
//! The output file name is derived from the entity alone
//! (`{snake_case name}{suffix}.rs`), so repeated runs overwrite instead of
//! piling up stale files. A file whose content did not change is left
//! untouched, keeping its timestamp stable for the host build.
//!
//! The output directory is the one resource shared between workers. Each
//! file name is claimed in an in-flight set for the duration of its write;
//! a second claim on the same name while the first is active is refused.
//!
//! Emission is split in two: [`Emitter::prepare`] renders a model into a
//! [`Rendered`] file, which is `Send`, and [`Emitter::write`] puts it on
//! disk. Only the second step runs on worker threads.

mod render;

use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
    sync::{Mutex, PoisonError}
};

pub use self::render::render;
use crate::{
    codegen::CodeModel,
    diagnostic::{Diagnostic, DiagnosticKind, SourceLocation}
};

/// Default output file name suffix.
pub const DEFAULT_SUFFIX: &str = "_repository";

/// Source text of one entity's repository, ready to be written.
///
/// Holds no syntax tree, so it can cross threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    /// Fully-qualified entity name.
    pub entity:    String,
    /// Entity declaration, for diagnostics.
    pub location:  SourceLocation,
    /// Output file name.
    pub file_name: String,
    /// File content.
    pub text:      String
}

/// Writes rendered code models into an output directory.
#[derive(Debug)]
pub struct Emitter {
    out_dir:   PathBuf,
    suffix:    String,
    in_flight: Mutex<HashSet<String>>
}

/// Releases a claimed file name when dropped.
struct Claim<'a> {
    emitter: &'a Emitter,
    name:    String
}

impl Drop for Claim<'_> {
    fn drop(&mut self) {
        self.emitter
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.name);
    }
}

impl Emitter {
    /// Emitter writing into `out_dir` with the default suffix.
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir:   out_dir.into(),
            suffix:    DEFAULT_SUFFIX.to_string(),
            in_flight: Mutex::new(HashSet::new())
        }
    }

    /// Use `suffix` for output file names.
    #[must_use]
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// Output directory.
    #[must_use]
    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// File name `model` is written to, e.g. `user_repository.rs`.
    #[must_use]
    pub fn file_name(&self, model: &CodeModel) -> String {
        format!("{}{}.rs", model.file_stem, self.suffix)
    }

    /// Full output path of `model`.
    #[must_use]
    pub fn path_for(&self, model: &CodeModel) -> PathBuf {
        self.out_dir.join(self.file_name(model))
    }

    /// Render and write `model`.
    ///
    /// # Errors
    ///
    /// See [`Emitter::prepare`] and [`Emitter::write`].
    pub fn emit(&self, model: &CodeModel) -> Result<PathBuf, Diagnostic> {
        let rendered = self.prepare(model)?;
        self.write(&rendered)
    }

    /// Render `model` without touching the filesystem.
    ///
    /// # Errors
    ///
    /// Returns a `NonEmittableModel` diagnostic for a model marked
    /// non-emittable, and `WriteFailure` when the code does not render.
    #[tracing::instrument(skip_all, fields(entity = %model.entity))]
    pub fn prepare(&self, model: &CodeModel) -> Result<Rendered, Diagnostic> {
        if !model.emittable {
            return Err(diagnostic(
                &model.entity,
                &model.location,
                DiagnosticKind::NonEmittableModel,
                format!(
                    "repository for `{}` was not generated because the entity has errors",
                    model.entity
                )
            ));
        }

        let text = render(model).map_err(|err| {
            diagnostic(
                &model.entity,
                &model.location,
                DiagnosticKind::WriteFailure,
                format!("generated code for `{}` does not parse: {err}", model.entity)
            )
        })?;

        Ok(Rendered {
            entity: model.entity.clone(),
            location: model.location.clone(),
            file_name: self.file_name(model),
            text
        })
    }

    /// Write a rendered file, skipping it when the content is unchanged.
    ///
    /// # Errors
    ///
    /// Returns a `WriteFailure` diagnostic when the file is already being
    /// written or the filesystem refuses.
    #[tracing::instrument(skip_all, fields(entity = %rendered.entity))]
    pub fn write(&self, rendered: &Rendered) -> Result<PathBuf, Diagnostic> {
        let fail = |message: String| {
            diagnostic(
                &rendered.entity,
                &rendered.location,
                DiagnosticKind::WriteFailure,
                message
            )
        };

        let name = &rendered.file_name;
        let _claim = self
            .claim(name)
            .ok_or_else(|| fail(format!("`{name}` is already being written")))?;

        fs::create_dir_all(&self.out_dir).map_err(|err| {
            fail(format!(
                "cannot create output directory `{}`: {err}",
                self.out_dir.display()
            ))
        })?;

        let path = self.out_dir.join(name);
        if fs::read_to_string(&path).is_ok_and(|existing| existing == rendered.text) {
            tracing::debug!(path = %path.display(), "unchanged");
            return Ok(path);
        }

        fs::write(&path, &rendered.text)
            .map_err(|err| fail(format!("cannot write `{}`: {err}", path.display())))?;
        tracing::debug!(path = %path.display(), "written");
        Ok(path)
    }

    fn claim(&self, name: &str) -> Option<Claim<'_>> {
        let mut in_flight = self
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        in_flight.insert(name.to_string()).then(|| Claim {
            emitter: self,
            name:    name.to_string()
        })
    }
}

fn diagnostic(
    entity: &str,
    location: &SourceLocation,
    kind: DiagnosticKind,
    message: String
) -> Diagnostic {
    Diagnostic::new(kind, message, location.clone()).with_entity(entity)
}
