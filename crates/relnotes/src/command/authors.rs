use relnotes_config::Config;
use relnotes_document::{Authors, render::render_authors};
use tracing::info;

use crate::integrations::git;

/// Print the `Authors` section for the commits in `from..to`.
pub(crate) fn run(from: &str, to: &str, config: &Config) -> Result<(), git::Error> {
    let authors = collect(from, to, config)?;
    print!("{}", render_authors(&authors, &config.render_options()));
    Ok(())
}

pub(crate) fn collect(from: &str, to: &str, config: &Config) -> Result<Authors, git::Error> {
    let authors = Authors::from_contributors(git::contributors(from, to, &config.authors.exclude)?);
    info!(
        "{} people contributed to {from}..{to}, {} for the first time",
        authors.distinct_count(),
        authors.first_time_count()
    );
    Ok(authors)
}
