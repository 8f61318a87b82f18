//! `relnotes generate`: compose the notes for a new release.

use std::path::{Path, PathBuf};

use miette::Diagnostic;
use relnotes_config::Config;
use relnotes_document::{Release, ReleaseNotes, Version, render::render};
use thiserror::Error;
use tracing::{info, warn};

use super::{authors, lists};
use crate::{
    fs,
    integrations::{
        git,
        github::{self, Milestone},
    },
    run_type::RunType,
};

pub(crate) struct Options {
    pub(crate) version: Version,
    /// The revision of the previous release
    pub(crate) from: String,
    pub(crate) to: String,
    pub(crate) summary: Option<String>,
    pub(crate) caveats: Vec<String>,
    pub(crate) output: Option<PathBuf>,
    /// Defaults to the version
    pub(crate) milestone: Option<String>,
    pub(crate) token: Option<String>,
    /// Replace an existing file
    pub(crate) force: bool,
}

pub(crate) async fn run(options: Options, run_type: RunType<()>, config: &Config) -> Result<(), Error> {
    let Options {
        version,
        from,
        to,
        summary,
        caveats,
        output,
        milestone,
        token,
        force,
    } = options;
    let project = config.project.clone().ok_or(Error::NoProject)?;
    let summary = match summary {
        Some(summary) => summary,
        None => default_summary(&project, &version).ok_or_else(|| Error::NoSummary {
            version: version.to_string(),
        })?,
    };
    let path = output.unwrap_or_else(|| default_path(config, &version));
    if path.exists() && !force {
        return Err(Error::Exists { path });
    }

    let authors = authors::collect(&from, &to, config)?;
    let milestone = match &config.github {
        Some(github) => {
            let milestone = milestone.unwrap_or_else(|| version.to_string());
            github::milestone(github, &milestone, token.as_deref()).await?
        }
        None => {
            warn!("GitHub is not configured, so the issue and pull request lists will be empty");
            Milestone::default()
        }
    };
    let (issues, pull_requests) = lists::sections(&version, milestone);
    let notes = ReleaseNotes {
        release: Release {
            project,
            version,
            summary,
            caveats,
        },
        authors,
        issues,
        pull_requests,
    };
    let rendered = render(&notes, &config.render_options());

    fs::write(run_type.of(path.as_path()), &rendered)?;
    if run_type.is_dry_run() {
        print!("{rendered}");
    } else {
        info!("Wrote {}", path.display());
    }
    Ok(())
}

/// The usual opening of a point release. Other releases need to be described by hand.
fn default_summary(project: &str, version: &Version) -> Option<String> {
    let previous = version.previous_point_release()?;
    Some(format!(
        "{project} {version} is a bug-fix release with no new features\ncompared to {previous}."
    ))
}

fn default_path(config: &Config, version: &Version) -> PathBuf {
    Path::new(&config.generate.directory).join(format!("{version}-notes.rst"))
}

#[derive(Debug, Diagnostic, Error)]
pub(crate) enum Error {
    #[error("The project name is not configured")]
    #[diagnostic(
        code(generate::no_project),
        help("Set `project` in relnotes.toml, it's used in the title like `SciPy 1.5.2 Release Notes`")
    )]
    NoProject,
    #[error("Release {version} needs a summary")]
    #[diagnostic(
        code(generate::no_summary),
        help("Only point releases have a default summary, pass one with --summary")
    )]
    NoSummary { version: String },
    #[error("{path} already exists")]
    #[diagnostic(
        code(generate::exists),
        help("Published release notes shouldn't change, pass --force to replace the file anyway")
    )]
    Exists { path: PathBuf },
    #[error(transparent)]
    #[diagnostic(transparent)]
    Git(#[from] git::Error),
    #[error(transparent)]
    #[diagnostic(transparent)]
    GitHub(#[from] github::Error),
    #[error(transparent)]
    #[diagnostic(transparent)]
    Fs(#[from] fs::Error),
}
