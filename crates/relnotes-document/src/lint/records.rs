use std::{collections::HashMap, sync::LazyLock};

use regex::Regex;

use super::{Config, Draft};
use crate::{ChangeKind, Document, Section};

#[allow(clippy::unwrap_used)] // Constant pattern, covered by tests
static URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?i:https?)://([^/\s?#]+)(/[^\s?#]*)?(?:[?#]\S*)?$").unwrap()
});

#[allow(clippy::unwrap_used)] // Constant pattern, covered by tests
static CHANGE_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/([^/]+)/([^/]+)/(issues|pull)/(\d+)/?$").unwrap());

/// The parts of a link to a GitHub issue or pull request.
struct Link<'a> {
    host: &'a str,
    owner: &'a str,
    repo: &'a str,
    kind: ChangeKind,
    number: Option<u64>,
}

enum LinkProblem {
    Malformed,
    NotAChange,
}

fn link(url: &str) -> Result<Link<'_>, LinkProblem> {
    let captures = URL.captures(url).ok_or(LinkProblem::Malformed)?;
    let host = captures.get(1).map_or("", |host| host.as_str());
    let path = captures.get(2).map_or("", |path| path.as_str());
    let path = CHANGE_PATH.captures(path).ok_or(LinkProblem::NotAChange)?;
    let part = |index| path.get(index).map_or("", |part| part.as_str());
    Ok(Link {
        host,
        owner: part(1),
        repo: part(2),
        kind: if part(3) == "pull" {
            ChangeKind::PullRequest
        } else {
            ChangeKind::Issue
        },
        number: part(4).parse().ok(),
    })
}

fn heading(section: &Section) -> String {
    section.version.as_ref().map_or_else(
        || section.kind.heading_prefix().to_string(),
        |version| section.kind.heading(version),
    )
}

/// The sections that were actually written in the document.
fn written_sections(document: &Document) -> impl Iterator<Item = &Section> {
    document
        .notes
        .sections()
        .filter(|section| section.heading_span.is_some())
}

pub(super) fn duplicates(document: &Document) -> Vec<Draft> {
    let mut drafts = Vec::new();
    for section in written_sections(document) {
        let mut seen = HashMap::new();
        for record in &section.records {
            if seen.insert(record.number, record.span).is_some() {
                drafts.push(
                    Draft::new(
                        record.span,
                        format!(
                            "#{number} is listed more than once in {heading}",
                            number = record.number,
                            heading = heading(section)
                        ),
                    )
                    .label("duplicate")
                    .help("Each issue and pull request may only be listed once per section"),
                );
            }
        }
    }
    drafts
}

pub(super) fn link_targets(document: &Document, config: &Config) -> Vec<Draft> {
    let mut drafts = Vec::new();
    for record in written_sections(document).flat_map(|section| &section.records) {
        let number = record.number;
        let link = match link(&record.url) {
            Ok(link) => link,
            Err(LinkProblem::Malformed) => {
                drafts.push(
                    Draft::new(
                        record.url_span,
                        format!("The link for #{number} is not a well-formed URL"),
                    )
                    .label("malformed URL")
                    .help("Links must be absolute http(s) URLs without white space"),
                );
                continue;
            }
            Err(LinkProblem::NotAChange) => {
                drafts.push(
                    Draft::new(
                        record.url_span,
                        format!("The link for #{number} doesn't point to an issue or pull request"),
                    )
                    .label("expected .../issues/N or .../pull/N")
                    .help(format!(
                        "Link to https://github.com/<owner>/<repo>/{segment}/{number}",
                        segment = record.kind.url_segment()
                    )),
                );
                continue;
            }
        };
        if link.number != Some(number) {
            let target = link
                .number
                .map_or_else(|| String::from("another number"), |n| format!("#{n}"));
            drafts.push(
                Draft::new(
                    record.url_span,
                    format!("The link for #{number} points to {target}"),
                )
                .label("wrong number")
                .help("The link label and the number at the end of the URL must match"),
            );
        }
        if let Some(expected) = &config.repository {
            let same_repo = link.host.eq_ignore_ascii_case("github.com")
                && link.owner.eq_ignore_ascii_case(&expected.owner)
                && link.repo.eq_ignore_ascii_case(&expected.repo);
            if !same_repo {
                drafts.push(
                    Draft::new(
                        record.url_span,
                        format!(
                            "The link for #{number} points to {host}/{owner}/{repo} instead of github.com/{expected_owner}/{expected_repo}",
                            host = link.host,
                            owner = link.owner,
                            repo = link.repo,
                            expected_owner = expected.owner,
                            expected_repo = expected.repo,
                        ),
                    )
                    .label("wrong repository"),
                );
            }
        }
    }
    drafts
}

pub(super) fn kinds(document: &Document) -> Vec<Draft> {
    written_sections(document)
        .flat_map(|section| &section.records)
        .filter_map(|record| {
            let link = link(&record.url).ok()?;
            (link.kind != record.kind).then(|| {
                Draft::new(
                    record.url_span,
                    format!(
                        "#{number} is listed as {listed_as} but links to {linked_kind}",
                        number = record.number,
                        listed_as = with_article(record.kind),
                        linked_kind = with_article(link.kind),
                    ),
                )
                .label(format!("expected /{}/", record.kind.url_segment()))
            })
        })
        .collect()
}

fn with_article(kind: ChangeKind) -> String {
    match kind {
        ChangeKind::Issue => format!("an {kind}"),
        ChangeKind::PullRequest => format!("a {kind}"),
    }
}

pub(super) fn malformed(document: &Document) -> Vec<Draft> {
    document
        .malformed
        .iter()
        .map(|entry| {
            Draft::new(
                entry.span,
                format!("Malformed {kind} entry: {problem}", kind = entry.kind, problem = entry.problem),
            )
            .help(format!(
                "Entries look like `#123 <https://github.com/<owner>/<repo>/{segment}/123>`__: Title",
                segment = entry.kind.url_segment()
            ))
        })
        .collect()
}

pub(super) fn sort_order(document: &Document) -> Vec<Draft> {
    let mut drafts = Vec::new();
    for section in written_sections(document) {
        for pair in section.records.windows(2) {
            if let [previous, current] = pair {
                if current.number < previous.number {
                    drafts.push(
                        Draft::new(
                            current.span,
                            format!(
                                "#{current} is listed after #{previous}",
                                current = current.number,
                                previous = previous.number
                            ),
                        )
                        .help("Sort issues and pull requests by number"),
                    );
                }
            }
        }
    }
    drafts
}

pub(super) fn section_versions(document: &Document) -> Vec<Draft> {
    let expected = &document.notes.release.version;
    written_sections(document)
        .filter_map(|section| {
            let span = section.heading_span?;
            match &section.version {
                None => Some(
                    Draft::new(span, "Could not read the version in this heading")
                        .help(format!("The heading should be `{}`", section.kind.heading(expected))),
                ),
                Some(version) if version != expected => Some(
                    Draft::new(
                        span,
                        format!("This heading names {version}, but these are the notes for {expected}"),
                    )
                    .label("wrong version"),
                ),
                Some(_) => None,
            }
        })
        .collect()
}
