// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Generator configuration.
//!
//! Built in code (usually from a build script) or read from TOML:
//!
//! ```toml
//! source_root = "src"
//! out_dir = "target/generated"
//! jobs = 4
//! suffix = "_repository"
//!
//! [[types]]
//! path = "crate::ids::UserId"
//! column = "BIGINT"
//! ```
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `source_root` | `src` | Root of the scanned source tree |
//! | `out_dir` | required | Where generated files go |
//! | `jobs` | available parallelism | Worker threads |
//! | `suffix` | `_repository` | Output file name suffix |
//! | `types` | none | Extra direct type mappings |
//!
//! Relative paths in a TOML file are resolved against the file's directory.

use std::{
    fs,
    num::NonZeroUsize,
    path::{Path, PathBuf}
};

use serde::Deserialize;

use crate::{
    emit::DEFAULT_SUFFIX,
    error::{Error, Result},
    types::{TypeMapping, TypeRegistry}
};

/// A custom type mapping: the driver encodes the type itself.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CustomType {
    /// Rust type path, e.g. `crate::ids::UserId`.
    pub path:   String,
    /// PostgreSQL column type, e.g. `BIGINT`.
    pub column: String
}

/// Everything one generation pass needs to know.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Root of the source tree to scan.
    #[serde(default = "default_source_root")]
    pub source_root: PathBuf,

    /// Directory generated files are written to.
    pub out_dir: PathBuf,

    /// Worker threads; `None` uses the available parallelism.
    #[serde(default)]
    pub jobs: Option<usize>,

    /// Output file name suffix.
    #[serde(default = "default_suffix")]
    pub suffix: String,

    /// Extra type mappings.
    #[serde(default)]
    pub types: Vec<CustomType>
}

fn default_source_root() -> PathBuf {
    PathBuf::from("src")
}

fn default_suffix() -> String {
    DEFAULT_SUFFIX.to_string()
}

impl GeneratorConfig {
    /// Configuration writing to `out_dir`, everything else default.
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_root: default_source_root(),
            out_dir:     out_dir.into(),
            jobs:        None,
            suffix:      default_suffix(),
            types:       Vec::new()
        }
    }

    /// Scan `root` instead of `src`.
    #[must_use]
    pub fn with_source_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.source_root = root.into();
        self
    }

    /// Use `jobs` worker threads.
    #[must_use]
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = Some(jobs);
        self
    }

    /// Use `suffix` for output file names.
    #[must_use]
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// Map `path` to `column` with direct coercion.
    #[must_use]
    pub fn with_type(mut self, path: impl Into<String>, column: impl Into<String>) -> Self {
        self.types.push(CustomType {
            path:   path.into(),
            column: column.into()
        });
        self
    }

    /// Parse TOML text. Relative paths are kept as written.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] when the text is not a valid configuration.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).map_err(|err| Error::Config(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read a TOML file.
    ///
    /// # Errors
    ///
    /// [`Error::Io`] when the file cannot be read, [`Error::ConfigParse`]
    /// when it is not valid TOML for this structure, [`Error::Config`] when
    /// a value is out of range.
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source
        })?;
        let mut config: Self = toml::from_str(&text).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source
        })?;

        if let Some(base) = path.parent() {
            config.source_root = base.join(&config.source_root);
            config.out_dir = base.join(&config.out_dir);
        }
        config.validate()?;
        Ok(config)
    }

    /// Check values serde cannot.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] naming the offending key.
    pub fn validate(&self) -> Result<()> {
        if self.out_dir.as_os_str().is_empty() {
            return Err(Error::Config("`out_dir` must not be empty".to_string()));
        }
        if self.jobs == Some(0) {
            return Err(Error::Config("`jobs` must be at least 1".to_string()));
        }
        if self.suffix.contains(['/', '\\']) {
            return Err(Error::Config(format!(
                "`suffix` must not contain path separators, got `{}`",
                self.suffix
            )));
        }
        for custom in &self.types {
            if custom.column.trim().is_empty() {
                return Err(Error::Config(format!(
                    "custom type `{}` has an empty column type",
                    custom.path
                )));
            }
        }
        Ok(())
    }

    /// Worker thread count.
    #[must_use]
    pub fn worker_count(&self) -> usize {
        self.jobs.unwrap_or_else(|| {
            std::thread::available_parallelism().map_or(1, NonZeroUsize::get)
        })
    }

    /// The standard type table plus every custom mapping.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] when a custom path is not a Rust type.
    pub fn registry(&self) -> Result<TypeRegistry> {
        let mut registry = TypeRegistry::standard();
        for custom in &self.types {
            let mapping = TypeMapping::custom(&custom.path, &custom.column).map_err(|err| {
                Error::Config(format!("custom type `{}` is not a Rust type: {err}", custom.path))
            })?;
            registry.register(mapping);
        }
        Ok(registry)
    }
}
