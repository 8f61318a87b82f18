use std::path::Path;

use miette::Diagnostic;
use relnotes_config::Config;
use relnotes_document::{Document, ReleaseNotes};
use thiserror::Error;

use super::ParseFailure;
use crate::fs;

/// Print what a release notes file contains, as a short summary or as JSON.
pub(crate) fn run(path: &Path, json: bool, config: &Config) -> Result<(), Error> {
    let source = fs::read_to_string(path)?;
    let document = Document::parse(&source, &config.parse_options()).map_err(|problem| {
        Box::new(ParseFailure::new(
            path.display().to_string(),
            source.clone(),
            problem,
        ))
    })?;
    if json {
        println!("{}", serde_json::to_string_pretty(&document.notes)?);
    } else {
        print!("{}", summary(&document.notes));
    }
    Ok(())
}

fn summary(notes: &ReleaseNotes) -> String {
    let release = &notes.release;
    let authors = &notes.authors;
    let mut lines = vec![format!("{} {}", release.project, release.version)];
    if let Some(compared_to) = release.compared_to() {
        lines.push(format!("Compared to: {compared_to}"));
    }
    lines.push(format!(
        "Contributors: {} ({} first-time)",
        authors.distinct_count(),
        authors.first_time_count()
    ));
    lines.push(format!("Issues closed: {}", notes.issues.records.len()));
    lines.push(format!("Pull requests: {}", notes.pull_requests.records.len()));
    let mut summary = lines.join("\n");
    summary.push('\n');
    summary
}

#[derive(Debug, Diagnostic, Error)]
pub(crate) enum Error {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Fs(#[from] fs::Error),
    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] Box<ParseFailure>),
    #[error("Could not serialize the release notes: {0}")]
    #[diagnostic(code(show::json))]
    Json(#[from] serde_json::Error),
}
