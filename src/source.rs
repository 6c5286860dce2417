// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! The declaration set: parsed source files of the crate being built.
//!
//! Files are discovered below a source root and mapped to module paths
//! with the usual layout rules:
//!
//! | File | Module path |
//! |------|-------------|
//! | `lib.rs`, `main.rs` | `crate` |
//! | `db/mod.rs` | `crate::db` |
//! | `db/user.rs` | `crate::db::user` |
//!
//! Files are kept in sorted path order so that scanning is deterministic.
//! A file that fails to parse is reported as `ParseFailure` and left out;
//! the remaining files are still scanned. It still counts as an input, so a
//! build script reruns once it is fixed.

use std::{
    fs,
    path::{Path, PathBuf}
};

use crate::{
    diagnostic::{Diagnostic, DiagnosticKind, Reporter, SourceLocation},
    error::{Error, Result}
};

/// One parsed source file.
#[derive(Debug)]
pub struct SourceFile {
    /// Path as reported in diagnostics.
    pub path:        PathBuf,
    /// Module path below `crate`, e.g. `["db", "user"]`.
    pub module_path: Vec<String>,
    /// Parsed syntax tree.
    pub syntax:      syn::File
}

impl SourceFile {
    /// Module path rendered with `crate` as root, e.g. `crate::db::user`.
    #[must_use]
    pub fn module_name(&self) -> String {
        std::iter::once("crate")
            .chain(self.module_path.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join("::")
    }
}

/// All parsed files visible to one generation pass.
#[derive(Debug, Default)]
pub struct SourceSet {
    root:   Option<PathBuf>,
    files:  Vec<SourceFile>,
    inputs: Vec<PathBuf>
}

impl SourceSet {
    /// Empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Discover and parse every `*.rs` file below `root`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SourceRoot`] when `root` is not a directory and
    /// [`Error::Io`] when a directory or file cannot be read. Syntax errors
    /// are reported as diagnostics instead.
    #[tracing::instrument(skip_all, fields(root = %root.display()))]
    pub fn load(root: &Path, reporter: &mut Reporter) -> Result<Self> {
        if !root.is_dir() {
            return Err(Error::SourceRoot(root.to_path_buf()));
        }

        let mut paths = Vec::new();
        collect_rust_files(root, &mut paths)?;
        paths.sort();

        let mut set = Self {
            root: Some(root.to_path_buf()),
            ..Self::new()
        };
        for path in paths {
            let text = fs::read_to_string(&path).map_err(|source| Error::Io {
                path: path.clone(),
                source
            })?;
            let module_path = module_path_for(root, &path);
            set.add_source(path, module_path, &text, reporter);
        }

        tracing::debug!(files = set.files.len(), "loaded declaration set");
        Ok(set)
    }

    /// Parse `text` as the file at `path` with the given module path.
    ///
    /// Returns `false` and reports a `ParseFailure` when it does not parse.
    pub fn add_source(
        &mut self,
        path: impl Into<PathBuf>,
        module_path: Vec<String>,
        text: &str,
        reporter: &mut Reporter
    ) -> bool {
        let path = path.into();
        self.inputs.push(path.clone());
        match syn::parse_file(text) {
            Ok(syntax) => {
                self.files.push(SourceFile {
                    path,
                    module_path,
                    syntax
                });
                true
            }
            Err(err) => {
                let location = SourceLocation::from_span(&path, err.span());
                reporter.report(Diagnostic::new(
                    DiagnosticKind::ParseFailure,
                    format!("failed to parse source file: {err}"),
                    location
                ));
                false
            }
        }
    }

    /// Parsed files in discovery order.
    #[must_use]
    pub fn files(&self) -> &[SourceFile] {
        &self.files
    }

    /// Everything the pass read: the source root when loaded from disk,
    /// then every file offered to the set, including those that failed to
    /// parse.
    #[must_use]
    pub fn inputs(&self) -> Vec<PathBuf> {
        self.root
            .iter()
            .chain(&self.inputs)
            .cloned()
            .collect()
    }

    /// Number of parsed files.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// `true` when no file was parsed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

fn collect_rust_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<()> {
    let entries = fs::read_dir(dir).map_err(|source| Error::Io {
        path: dir.to_path_buf(),
        source
    })?;

    for entry in entries {
        let entry = entry.map_err(|source| Error::Io {
            path: dir.to_path_buf(),
            source
        })?;
        let path = entry.path();
        if path.is_dir() {
            collect_rust_files(&path, out)?;
        } else if path.extension().is_some_and(|ext| ext == "rs") {
            out.push(path);
        }
    }
    Ok(())
}

/// Module path of `file` relative to the crate's source `root`.
fn module_path_for(root: &Path, file: &Path) -> Vec<String> {
    let relative = file.strip_prefix(root).unwrap_or(file);
    let mut parts: Vec<String> = relative
        .parent()
        .into_iter()
        .flat_map(Path::components)
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();

    let stem = relative
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let is_root = parts.is_empty() && (stem == "lib" || stem == "main");
    if stem != "mod" && !is_root {
        parts.push(stem);
    }
    parts
}
