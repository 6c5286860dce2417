// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Structured diagnostics collected across a generation pass.
//!
//! Every stage reports problems as [`Diagnostic`] values instead of
//! returning early. A pass keeps going after an error so that every broken
//! entity is reported in a single build; the pass as a whole fails when any
//! error-severity diagnostic was collected.
//!
//! # Kinds
//!
//! | Kind | Severity | Raised by |
//! |------|----------|-----------|
//! | `ParseFailure` | error | source loading |
//! | `InvalidAttribute` | error | scanner |
//! | `UnresolvedType` | error | scanner (type resolver miss) |
//! | `MissingIdentifier` / `AmbiguousIdentifier` | error | scanner |
//! | `DuplicateFieldName` / `DuplicateColumnName` | error | scanner |
//! | `DuplicateEntity` | error | metadata model, pass driver |
//! | `UnsupportedMemberKind` | error | scanner |
//! | `NonEmittableModel` | error | emitter |
//! | `WriteFailure` | error | emitter |
//! | `UnresolvedReference` | error | metadata model |
//! | `ReservedWord` | warning | scanner |
//! | `NullabilityMismatch` | warning | scanner |

use std::{
    fmt,
    path::{Path, PathBuf}
};

use proc_macro2::Span;

/// Severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Advisory; never fails the pass.
    Warning,

    /// Fails the pass.
    Error
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => f.write_str("warning"),
            Self::Error => f.write_str("error")
        }
    }
}

/// Classification of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// A source file could not be parsed.
    ParseFailure,

    /// An entity or column attribute is malformed or contradictory.
    InvalidAttribute,

    /// A persistent field's type has no type mapping.
    UnresolvedType,

    /// No identifier field could be determined.
    MissingIdentifier,

    /// More than one field is marked as identifier.
    AmbiguousIdentifier,

    /// Two fields share a name.
    DuplicateFieldName,

    /// Two fields map to the same column.
    DuplicateColumnName,

    /// Two entities share a fully-qualified name or an output file.
    DuplicateEntity,

    /// The marker sits on something the generator cannot handle.
    UnsupportedMemberKind,

    /// The code model inherited an earlier error and was not written.
    NonEmittableModel,

    /// Writing the generated file failed.
    WriteFailure,

    /// A column references something that is not a usable entity.
    UnresolvedReference,

    /// A derived table or column name is a SQL reserved word.
    ReservedWord,

    /// A nullability override disagrees with the field type.
    NullabilityMismatch
}

impl DiagnosticKind {
    /// Severity this kind is always reported with.
    #[must_use]
    pub const fn severity(self) -> Severity {
        match self {
            Self::ReservedWord | Self::NullabilityMismatch => Severity::Warning,
            _ => Severity::Error
        }
    }

    /// Stable short code shown in rendered diagnostics.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ParseFailure => "E0001",
            Self::InvalidAttribute => "E0002",
            Self::UnresolvedType => "E0003",
            Self::MissingIdentifier => "E0004",
            Self::AmbiguousIdentifier => "E0005",
            Self::DuplicateFieldName => "E0006",
            Self::DuplicateColumnName => "E0007",
            Self::DuplicateEntity => "E0008",
            Self::UnsupportedMemberKind => "E0009",
            Self::NonEmittableModel => "E0010",
            Self::WriteFailure => "E0011",
            Self::UnresolvedReference => "E0012",
            Self::ReservedWord => "W0001",
            Self::NullabilityMismatch => "W0002"
        }
    }
}

/// Position of the declaration a diagnostic is attributed to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    /// Source file, as given to the generator.
    pub file:   PathBuf,
    /// 1-based line.
    pub line:   usize,
    /// 1-based column.
    pub column: usize
}

impl SourceLocation {
    /// Location of `span` inside `file`.
    ///
    /// Line and column come from `proc-macro2`'s span locations, which are
    /// available because sources are parsed outside of a macro context.
    #[must_use]
    pub fn from_span(file: &Path, span: Span) -> Self {
        let start = span.start();
        Self {
            file:   file.to_path_buf(),
            line:   start.line,
            column: start.column + 1
        }
    }

    /// Location pointing at the start of `file`.
    #[must_use]
    pub fn file_start(file: &Path) -> Self {
        Self {
            file:   file.to_path_buf(),
            line:   1,
            column: 1
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file.display(), self.line, self.column)
    }
}

/// A single reported problem. Never mutated once reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Classification.
    pub kind:     DiagnosticKind,
    /// Human readable message.
    pub message:  String,
    /// Originating declaration.
    pub location: SourceLocation,
    /// Fully-qualified name of the entity concerned, if any.
    pub entity:   Option<String>
}

impl Diagnostic {
    /// Create a diagnostic at `location`.
    pub fn new(kind: DiagnosticKind, message: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            kind,
            message: message.into(),
            location,
            entity: None
        }
    }

    /// Attribute the diagnostic to an entity.
    #[must_use]
    pub fn with_entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }

    /// Severity derived from the kind.
    #[must_use]
    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }

    /// `true` for error severity.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[{}]: {}\n  --> {}",
            self.severity(),
            self.kind.code(),
            self.message,
            self.location
        )?;
        if let Some(entity) = &self.entity {
            write!(f, "\n  = entity: {entity}")?;
        }
        Ok(())
    }
}

/// Append-only, ordered collection of diagnostics for one pass.
#[derive(Debug, Default)]
pub struct Reporter {
    diagnostics: Vec<Diagnostic>
}

impl Reporter {
    /// Empty reporter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a diagnostic.
    pub fn report(&mut self, diagnostic: Diagnostic) {
        tracing::debug!(
            kind = ?diagnostic.kind,
            location = %diagnostic.location,
            "{}",
            diagnostic.message
        );
        self.diagnostics.push(diagnostic);
    }

    /// Append every diagnostic from `diagnostics`, keeping their order.
    pub fn extend(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        for diagnostic in diagnostics {
            self.report(diagnostic);
        }
    }

    /// `true` once any error-severity diagnostic was reported.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    /// Number of error-severity diagnostics.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    /// Number of diagnostics reported so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// `true` when nothing was reported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Take all diagnostics in report order, leaving the reporter empty.
    pub fn drain(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }
}
