// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Fatal errors of the generator itself.
//!
//! Problems in the scanned entities are never errors of this type; they are
//! collected as [`crate::Diagnostic`] values so that one broken entity does
//! not hide the others. [`Error`] covers what stops a pass from running at
//! all (unreadable sources, invalid configuration) and the final verdict of
//! a pass that reported diagnostics.

use std::path::PathBuf;

use thiserror::Error as ThisError;

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Generator failure.
#[derive(Debug, ThisError)]
pub enum Error {
    /// The configured source root does not exist or is not a directory.
    #[error("source root `{}` is not a directory", .0.display())]
    SourceRoot(PathBuf),

    /// Reading a source file or directory failed.
    #[error("failed to read `{}`", path.display())]
    Io {
        /// Offending path.
        path:   PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error
    },

    /// The configuration is invalid.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The configuration file could not be parsed.
    #[error("failed to parse configuration `{}`", path.display())]
    ConfigParse {
        /// Configuration file.
        path:   PathBuf,
        /// Underlying error.
        #[source]
        source: toml::de::Error
    },

    /// The pass ran but reported errors.
    #[error("code generation failed with {errors} error(s)")]
    GenerationFailed {
        /// Number of error diagnostics.
        errors: usize
    }
}
