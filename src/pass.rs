// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Generation pass driver.
//!
//! One call to [`generate`] is one emission pass:
//!
//! ```text
//! GeneratorConfig
//!     │ registry(), SourceSet::load
//!     ▼
//! scan ──▶ MetadataModel ──▶ build ──▶ prepare ──▶ write (jobs threads)
//!     │           │            │          │            │
//!     └───────────┴────────────┴──────────┴────────────┴──▶ Reporter ──▶ Report
//! ```
//!
//! Scanning, model building and rendering run on the calling thread.
//! Rendered files are written by up to `jobs` scoped workers; their results
//! are merged back in entity order.

use std::{
    collections::HashMap,
    panic,
    path::PathBuf,
    thread
};

use crate::{
    codegen,
    config::GeneratorConfig,
    diagnostic::{Diagnostic, DiagnosticKind, Reporter},
    emit::{Emitter, Rendered},
    entity::MetadataModel,
    error::Result,
    report::Report,
    scan::scan,
    source::SourceSet,
    types::TypeRegistry
};

/// Run one full pass as configured.
///
/// # Errors
///
/// Returns an error only when the pass cannot start: invalid configuration
/// or an unreadable source tree. Problems in the entities are diagnostics
/// in the returned [`Report`].
#[tracing::instrument(skip_all, fields(root = %config.source_root.display()))]
pub fn generate(config: &GeneratorConfig) -> Result<Report> {
    config.validate()?;
    let registry = config.registry()?;

    let mut reporter = Reporter::new();
    let sources = SourceSet::load(&config.source_root, &mut reporter)?;
    let emitter = Emitter::new(&config.out_dir).with_suffix(&config.suffix);

    Ok(run(
        &sources,
        &registry,
        &emitter,
        config.worker_count(),
        reporter
    ))
}

/// Run a pass over already loaded sources.
///
/// `reporter` may already hold diagnostics from loading; they come first
/// in the report.
pub fn run(
    sources: &SourceSet,
    registry: &TypeRegistry,
    emitter: &Emitter,
    jobs: usize,
    mut reporter: Reporter
) -> Report {
    let scanned: Vec<_> = scan(sources, registry, &mut reporter).collect();
    let model = MetadataModel::collect(scanned, &mut reporter);

    let mut claimed: HashMap<String, &str> = HashMap::new();
    let mut pending: Vec<Rendered> = Vec::with_capacity(model.len());
    for entity in model.iter() {
        let code = codegen::build(entity);
        let rendered = match emitter.prepare(&code) {
            Ok(rendered) => rendered,
            Err(diagnostic) => {
                reporter.report(diagnostic);
                continue;
            }
        };

        if let Some(first) = claimed.get(&rendered.file_name) {
            reporter.report(
                Diagnostic::new(
                    DiagnosticKind::DuplicateEntity,
                    format!(
                        "`{}` would overwrite `{}` generated for `{first}`",
                        rendered.entity, rendered.file_name
                    ),
                    rendered.location.clone()
                )
                .with_entity(&rendered.entity)
            );
            continue;
        }
        claimed.insert(rendered.file_name.clone(), entity.fqn());
        pending.push(rendered);
    }

    let mut generated = Vec::with_capacity(pending.len());
    for result in write_all(emitter, &pending, jobs) {
        match result {
            Ok(path) => generated.push(path),
            Err(diagnostic) => reporter.report(diagnostic)
        }
    }

    let report = Report::new(sources.inputs(), generated, reporter.drain());
    tracing::info!(
        entities = model.len(),
        generated = report.generated().len(),
        errors = report.error_count(),
        warnings = report.warnings().count(),
        "generation pass finished"
    );
    report
}

/// Write `files` across up to `jobs` threads, results in input order.
fn write_all(
    emitter: &Emitter,
    files: &[Rendered],
    jobs: usize
) -> Vec<Result<PathBuf, Diagnostic>> {
    if files.is_empty() {
        return Vec::new();
    }
    let jobs = jobs.clamp(1, files.len());
    if jobs == 1 {
        return files.iter().map(|file| emitter.write(file)).collect();
    }

    let chunk_size = files.len().div_ceil(jobs);
    thread::scope(|scope| {
        let workers: Vec<_> = files
            .chunks(chunk_size)
            .map(|chunk| {
                scope.spawn(move || {
                    chunk
                        .iter()
                        .map(|file| emitter.write(file))
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        workers
            .into_iter()
            .flat_map(|worker| worker.join().unwrap_or_else(|err| panic::resume_unwind(err)))
            .collect()
    })
}
