//! Who contributed to a release, according to Git history.

use std::{collections::HashSet, sync::LazyLock};

use git2::{Mailmap, Oid, Repository, Revwalk, Signature};
use itertools::Itertools;
use miette::Diagnostic;
use regex::Regex;
use relnotes_document::Contributor;
use thiserror::Error;
use tracing::{debug, trace};

#[allow(clippy::unwrap_used)] // Constant pattern, covered by tests
static CO_AUTHOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?im)^co-authored-by:[ \t]*(.+?)[ \t]*<([^>]*)>[ \t]*$").unwrap());

/// Everyone with a commit in `from..to`, sorted by last name.
///
/// Authors and `Co-authored-by:` trailers both count, after `.mailmap` is applied. Someone is a
/// first-time contributor if nothing reachable from `from` is attributed to them. Bots and anyone
/// in `exclude` are left out.
pub(crate) fn contributors(from: &str, to: &str, exclude: &[String]) -> Result<Vec<Contributor>, Error> {
    let repo = Repository::open(".").map_err(Error::OpenRepo)?;
    let mailmap = repo.mailmap().ok();
    let from_oid = resolve(&repo, from)?;
    let to_oid = resolve(&repo, to)?;

    let mut walk = repo.revwalk()?;
    walk.push(to_oid)?;
    walk.hide(from_oid)?;
    let current = names(&repo, walk, mailmap.as_ref())?;
    debug!("Found {} names in {from}..{to}", current.len());

    let mut walk = repo.revwalk()?;
    walk.push(from_oid)?;
    let previous = names(&repo, walk, mailmap.as_ref())?;

    Ok(current
        .into_iter()
        .filter(|name| {
            let keep = !is_bot(name) && !exclude.contains(name);
            if !keep {
                debug!("Leaving {name} out of the authors");
            }
            keep
        })
        .map(|name| {
            let first_time = !previous.contains(&name);
            Contributor::new(name, first_time)
        })
        .sorted_by_cached_key(|contributor| sort_key(&contributor.name))
        .collect())
}

fn resolve(repo: &Repository, revision: &str) -> Result<Oid, Error> {
    repo.revparse_single(revision)
        .and_then(|object| object.peel_to_commit())
        .map(|commit| commit.id())
        .map_err(|source| Error::Revision {
            revision: revision.to_string(),
            source,
        })
}

fn names(
    repo: &Repository,
    walk: Revwalk,
    mailmap: Option<&Mailmap>,
) -> Result<HashSet<String>, Error> {
    let mut names = HashSet::new();
    for oid in walk {
        let commit = repo.find_commit(oid?)?;
        let author = match mailmap {
            Some(mailmap) => commit.author_with_mailmap(mailmap)?,
            None => commit.author().to_owned(),
        };
        trace!("{} by {}", commit.id(), display_name(&author));
        names.insert(display_name(&author));
        let message = String::from_utf8_lossy(commit.message_bytes());
        for (name, email) in co_authors(&message) {
            let name = match (mailmap, Signature::now(name, email)) {
                (Some(mailmap), Ok(signature)) => mailmap
                    .resolve_signature(&signature)
                    .map_or_else(|_| name.to_string(), |resolved| display_name(&resolved)),
                _ => name.to_string(),
            };
            names.insert(name);
        }
    }
    names.remove("");
    Ok(names)
}

fn display_name(signature: &Signature) -> String {
    String::from_utf8_lossy(signature.name_bytes()).trim().to_string()
}

/// The `(name, email)` of each `Co-authored-by:` trailer in a commit message.
fn co_authors(message: &str) -> Vec<(&str, &str)> {
    CO_AUTHOR
        .captures_iter(message)
        .filter_map(|captures| {
            Some((captures.get(1)?.as_str().trim(), captures.get(2)?.as_str()))
        })
        .collect()
}

fn is_bot(name: &str) -> bool {
    name.ends_with("[bot]")
}

/// Sort by the last word of the name, then by the whole name, ignoring case.
fn sort_key(name: &str) -> (String, String) {
    let last = name.split_whitespace().last().unwrap_or(name);
    (last.to_lowercase(), name.to_lowercase())
}

#[derive(Debug, Diagnostic, Error)]
pub(crate) enum Error {
    #[error("Could not open Git repository: {0}")]
    #[diagnostic(
        code(git::open_repo),
        help("Make sure you are in a Git repository and that you have permission to access it.")
    )]
    OpenRepo(#[source] git2::Error),
    #[error("Could not find the commit for {revision}: {source}")]
    #[diagnostic(
        code(git::revision),
        help("Revisions can be tags, branches, or commit hashes, like the tag of the previous release.")
    )]
    Revision {
        revision: String,
        #[source]
        source: git2::Error,
    },
    #[error("Unknown Git error: {0}")]
    #[diagnostic(
        code(git::libgit2),
        help(
            "Something went wrong when reading Git history that we don't have an explanation for. \
            Maybe try `git log` on the same range?"
        )
    )]
    Git(#[from] git2::Error),
}
