use miette::Diagnostic;
use relnotes_config::Config;
use relnotes_document::{ChangeKind, Section, Version, render::render_section};
use thiserror::Error;

use crate::integrations::github::{self, Milestone};

/// Print the issue and pull request sections for a release, from its GitHub milestone.
pub(crate) async fn run(
    version: &Version,
    milestone: Option<&str>,
    token: Option<&str>,
    config: &Config,
) -> Result<(), Error> {
    let Some(github) = &config.github else {
        return Err(Error::NotConfigured);
    };
    let milestone = milestone.map_or_else(|| version.to_string(), str::to_string);
    let (issues, pull_requests) = sections(version, github::milestone(github, &milestone, token).await?);
    print!(
        "{}\n{}",
        render_section(&issues, version),
        render_section(&pull_requests, version)
    );
    Ok(())
}

pub(crate) fn sections(version: &Version, milestone: Milestone) -> (Section, Section) {
    (
        Section::new(ChangeKind::Issue, Some(version.clone()), milestone.issues),
        Section::new(
            ChangeKind::PullRequest,
            Some(version.clone()),
            milestone.pull_requests,
        ),
    )
}

#[derive(Debug, Diagnostic, Error)]
pub(crate) enum Error {
    #[error("GitHub is not configured")]
    #[diagnostic(
        code(lists::not_configured),
        help("Add a [github] table with `owner` and `repo` to relnotes.toml")
    )]
    NotConfigured,
    #[error(transparent)]
    #[diagnostic(transparent)]
    GitHub(#[from] github::Error),
}
