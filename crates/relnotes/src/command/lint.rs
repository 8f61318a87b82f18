use std::path::PathBuf;

use itertools::Itertools;
use miette::{Diagnostic, NamedSource, Report};
use relnotes_config::Config;
use relnotes_document::{
    Document,
    lint::{self, Severity},
};
use thiserror::Error;
use tracing::{debug, info};

use super::{ParseFailure, report};
use crate::{fs, run_type::RunType};

/// Lint every file matched by `patterns`, printing each finding.
///
/// A file which can't be read or parsed counts as one error, and the rest are still linted.
///
/// With `fix`, fixable problems are written back first (or only reported, for a dry run) and the
/// fixed text is what gets linted.
pub(crate) fn run(patterns: &[String], fix: Option<RunType<()>>, config: &Config) -> Result<(), Error> {
    let paths = expand(patterns)?;
    let lint_config = config.lint_config();
    let parse_options = config.parse_options();
    let mut totals = Totals::default();

    for path in &paths {
        debug!("Linting {}", path.display());
        let name = path.display().to_string();
        let mut source = match fs::read_to_string(path.as_path()) {
            Ok(source) => source,
            Err(err) => {
                totals.errors += 1;
                report(err);
                continue;
            }
        };
        let mut document = match Document::parse(&source, &parse_options) {
            Ok(document) => document,
            Err(problem) => {
                totals.errors += 1;
                report(ParseFailure::new(name, source, problem));
                continue;
            }
        };

        if let Some(run_type) = fix {
            if let Some(fixed) = lint::fix(&document, &source, &lint_config) {
                fs::write(run_type.of(path.as_path()), &fixed)?;
                if run_type.is_dry_run() {
                    info!("Would fix {name}");
                } else {
                    info!("Fixed {name}");
                }
                match Document::parse(&fixed, &parse_options) {
                    Ok(fixed_document) => document = fixed_document,
                    Err(problem) => {
                        totals.errors += 1;
                        report(ParseFailure::new(name, fixed, problem));
                        continue;
                    }
                }
                source = fixed;
            }
        }

        for finding in lint::lint(&document, &lint_config) {
            match finding.severity {
                Severity::Error => totals.errors += 1,
                Severity::Warning => totals.warnings += 1,
            }
            report(Report::new(finding).with_source_code(NamedSource::new(&name, source.clone())));
        }
    }

    println!(
        "Checked {}: {}, {}",
        plural(paths.len(), "file"),
        plural(totals.errors, "error"),
        plural(totals.warnings, "warning")
    );
    if totals.errors > 0 {
        return Err(Error::Failed {
            errors: plural(totals.errors, "error"),
        });
    }
    Ok(())
}

#[derive(Debug, Default)]
struct Totals {
    errors: usize,
    warnings: usize,
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

/// Turn each argument into paths, expanding glob patterns. Plain paths are kept as they are so
/// that a missing file is reported when it's read.
fn expand(patterns: &[String]) -> Result<Vec<PathBuf>, Error> {
    let mut paths = Vec::new();
    for pattern in patterns {
        if !pattern.contains(['*', '?', '[']) {
            paths.push(PathBuf::from(pattern));
            continue;
        }
        let matches: Vec<PathBuf> = glob::glob(pattern)
            .map_err(|source| Error::Pattern {
                pattern: pattern.clone(),
                source,
            })?
            .filter_map(|entry| match entry {
                Ok(path) => Some(path),
                Err(err) => {
                    debug!("Skipping unreadable path: {err}");
                    None
                }
            })
            .filter(|path| path.is_file())
            .collect();
        if matches.is_empty() {
            return Err(Error::NoMatches {
                pattern: pattern.clone(),
            });
        }
        paths.extend(matches);
    }
    Ok(paths.into_iter().unique().collect())
}

#[derive(Debug, Diagnostic, Error)]
pub(crate) enum Error {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Fs(#[from] fs::Error),
    #[error("Invalid glob pattern {pattern}: {source}")]
    #[diagnostic(
        code(lint::pattern),
        help("Patterns use `*`, `?`, and `[...]`, like `doc/release/1.5.*-notes.rst`")
    )]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
    #[error("No files match {pattern}")]
    #[diagnostic(code(lint::no_matches), help("Patterns are relative to the current directory"))]
    NoMatches { pattern: String },
    #[error("Found {errors} in the release notes")]
    #[diagnostic(
        code(lint::failed),
        help("`relnotes lint --fix` corrects heading adornments and the number of contributors")
    )]
    Failed { errors: String },
}
