// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Outcome of one generation pass.
//!
//! A [`Report`] is what the build step hands back to the host: the files
//! that were written, the inputs they were generated from, and every
//! diagnostic in report order. The pass failed when any diagnostic has
//! error severity, even if some files were written.
//!
//! # Build Scripts
//!
//! ```rust,ignore
//! let report = entity_codegen::generate(&config)?;
//! report.print_cargo_messages();
//! report.into_result()?;
//! ```

use std::{
    io::{self, Write},
    path::PathBuf
};

use crate::{
    diagnostic::{Diagnostic, Severity},
    error::{Error, Result}
};

/// Files and diagnostics of one pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    inputs:      Vec<PathBuf>,
    generated:   Vec<PathBuf>,
    diagnostics: Vec<Diagnostic>
}

impl Report {
    /// Assemble a report.
    #[must_use]
    pub fn new(inputs: Vec<PathBuf>, generated: Vec<PathBuf>, diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            inputs,
            generated,
            diagnostics
        }
    }

    /// Source files the pass read, in scan order.
    #[must_use]
    pub fn inputs(&self) -> &[PathBuf] {
        &self.inputs
    }

    /// Files written or confirmed unchanged, in entity order.
    #[must_use]
    pub fn generated(&self) -> &[PathBuf] {
        &self.generated
    }

    /// Every diagnostic, in report order.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Error-severity diagnostics.
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_error())
    }

    /// Warning-severity diagnostics.
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity() == Severity::Warning)
    }

    /// Number of error-severity diagnostics.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    /// `true` when no error was reported.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.error_count() == 0
    }

    /// The report itself on success, [`Error::GenerationFailed`] otherwise.
    ///
    /// # Errors
    ///
    /// Fails when any error-severity diagnostic was reported.
    pub fn into_result(self) -> Result<Self> {
        match self.error_count() {
            0 => Ok(self),
            errors => Err(Error::GenerationFailed { errors })
        }
    }

    /// Write build script directives: one `cargo:rerun-if-changed` per
    /// input and one `cargo:warning` per diagnostic.
    ///
    /// # Errors
    ///
    /// Propagates write errors of `out`.
    pub fn write_cargo_messages(&self, out: &mut impl Write) -> io::Result<()> {
        for input in &self.inputs {
            writeln!(out, "cargo:rerun-if-changed={}", input.display())?;
        }
        for diagnostic in &self.diagnostics {
            writeln!(
                out,
                "cargo:warning={}[{}]: {} ({})",
                diagnostic.severity(),
                diagnostic.kind.code(),
                diagnostic.message.replace('\n', " "),
                diagnostic.location
            )?;
        }
        Ok(())
    }

    /// [`Report::write_cargo_messages`] to standard output.
    pub fn print_cargo_messages(&self) {
        let stdout = io::stdout();
        if let Err(err) = self.write_cargo_messages(&mut stdout.lock()) {
            tracing::warn!(%err, "failed to print cargo messages");
        }
    }
}
