//! One module per subcommand.

use miette::{Diagnostic, NamedSource, Report, SourceSpan};
use relnotes_document::ParseError;
use thiserror::Error;

pub(crate) mod authors;
pub(crate) mod generate;
pub(crate) mod lint;
pub(crate) mod lists;
pub(crate) mod rules;
pub(crate) mod show;

/// Print a diagnostic without stopping.
fn report(diagnostic: impl Into<Report>) {
    eprintln!("{:?}", diagnostic.into());
}

/// A file that couldn't be parsed, with its source attached so the problem can be pointed at.
#[derive(Debug, Diagnostic, Error)]
#[error("Could not read release notes from {path}: {problem}")]
#[diagnostic(code(parse::failed))]
pub(crate) struct ParseFailure {
    path: String,
    #[source_code]
    source_code: NamedSource<String>,
    #[label("here")]
    span: Option<SourceSpan>,
    #[diagnostic_source]
    problem: ParseError,
}

impl ParseFailure {
    pub(crate) fn new(path: String, source: String, problem: ParseError) -> Self {
        Self {
            span: problem.span().map(SourceSpan::from),
            source_code: NamedSource::new(&path, source),
            path,
            problem,
        }
    }
}
