use std::collections::HashSet;

use super::{Config, Draft};
use crate::{Document, HeadingRole, Span};

fn authors_heading(document: &Document) -> Option<Span> {
    document
        .headings_with_role(HeadingRole::Authors)
        .next()
        .map(|heading| heading.text_span)
}

pub(super) fn count(document: &Document) -> Vec<Draft> {
    let Some(heading) = authors_heading(document) else {
        return Vec::new();
    };
    let authors = &document.notes.authors;
    let distinct = authors.distinct_count();
    match (authors.stated_total, authors.total_span) {
        (Some(total), Some(span)) if total != distinct as u64 => vec![
            Draft::new(
                span,
                format!("The notes say {total} people contributed, but {distinct} are listed"),
            )
            .label(format!("expected {distinct}")),
        ],
        (Some(_), _) => Vec::new(),
        (None, _) => vec![
            Draft::new(heading, "The Authors section doesn't say how many people contributed")
                .help(format!(
                    "Add `A total of {distinct} people contributed to this release.` after the list of names"
                )),
        ],
    }
}

pub(super) fn duplicates(document: &Document) -> Vec<Draft> {
    let mut seen = HashSet::new();
    document
        .notes
        .authors
        .contributors
        .iter()
        .filter(|contributor| !seen.insert(contributor.name.as_str()))
        .map(|contributor| {
            Draft::new(
                contributor.span,
                format!("{} is listed more than once", contributor.name),
            )
            .label("duplicate")
        })
        .collect()
}

pub(super) fn first_time_markers(document: &Document, config: &Config) -> Vec<Draft> {
    let marker = config.first_time_marker.as_str();
    if marker.is_empty() {
        return Vec::new();
    }
    let authors = &document.notes.authors;
    let bracketed = format!("({marker})");
    let mut drafts = Vec::new();
    for contributor in &authors.contributors {
        let raw = contributor.raw.as_str();
        if contributor.first_time {
            let expected = format!("{} {marker}", contributor.name);
            if raw != expected {
                drafts.push(
                    Draft::new(contributor.span, "Inconsistent first-time contributor marker")
                        .help(format!("Write this as `{expected}`")),
                );
            }
        } else if raw.ends_with(marker) || raw.contains(&bracketed) {
            let name = raw.replace(&bracketed, "");
            let name = name.trim().trim_end_matches(marker).trim_end();
            drafts.push(
                Draft::new(
                    contributor.span,
                    format!("{raw} looks like a first-time contributor, but isn't marked as one"),
                )
                .label("unexpected marker")
                .help(format!(
                    "Mark first-time contributors with a space and `{marker}` after their name, like `{name} {marker}`"
                )),
            );
        }
    }

    let explained = authors
        .footer
        .iter()
        .any(|line| line.contains(&format!("\"{marker}\"")));
    if authors.first_time_count() > 0 && !explained {
        if let Some(heading) = authors_heading(document) {
            drafts.push(
                Draft::new(
                    authors.total_span.unwrap_or(heading),
                    "First-time contributors are marked, but the marker is never explained",
                )
                .help(format!(
                    "Add `People with a \"{marker}\" by their names contributed a patch for the first time.`"
                )),
            );
        }
    }
    drafts
}
