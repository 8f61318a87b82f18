use super::{Config, Draft, UnderlineMode};
use crate::{ChangeKind, Document, HeadingRole, parse::Heading};

/// The adornment length a heading should have, given how long it currently is.
pub(super) const fn expected_adornment_len(heading: &Heading, mode: UnderlineMode) -> usize {
    match mode {
        UnderlineMode::Exact => heading.width,
        UnderlineMode::AtLeast => {
            if heading.underline.len > heading.width {
                heading.underline.len
            } else {
                heading.width
            }
        }
    }
}

pub(super) fn underlines(document: &Document, config: &Config) -> Vec<Draft> {
    let mut drafts = Vec::new();
    for heading in &document.headings {
        let width = heading.width;
        let underline = heading.underline;
        if let Some(overline) = heading.overline {
            if overline.len != underline.len {
                drafts.push(
                    Draft::new(
                        overline.span,
                        format!(
                            "The overline of {:?} is {} characters, but its underline is {}",
                            heading.text, overline.len, underline.len
                        ),
                    )
                    .label("overline"),
                );
            }
        }
        let wrong = match config.underline {
            UnderlineMode::Exact => underline.len != width,
            UnderlineMode::AtLeast => underline.len < width,
        };
        if wrong {
            drafts.push(
                Draft::new(
                    underline.span,
                    format!(
                        "The underline of {:?} is {} characters, but the heading is {width}",
                        heading.text, underline.len
                    ),
                )
                .label(format!("expected {}", expected_adornment_len(heading, config.underline)))
                .help("Run `relnotes lint --fix` to correct underline lengths"),
            );
        }
    }
    drafts
}

pub(super) fn previous_version(document: &Document) -> Vec<Draft> {
    let release = &document.notes.release;
    let Some(expected) = release.version.previous_point_release() else {
        return Vec::new();
    };
    let span = document.summary_span.unwrap_or(document.title_span);
    match release.compared_to() {
        Some(compared_to) if compared_to == expected => Vec::new(),
        Some(compared_to) => vec![
            Draft::new(
                span,
                format!(
                    "{version} is compared to {compared_to}, but the previous release is {expected}",
                    version = release.version
                ),
            )
            .label("summary"),
        ],
        None => vec![
            Draft::new(
                span,
                "The summary doesn't say which release this one is compared to",
            )
            .help(format!(
                "Point releases usually open with `{project} {version} is a bug-fix release with no new features compared to {expected}.`",
                project = release.project,
                version = release.version
            )),
        ],
    }
}

pub(super) fn missing_sections(document: &Document) -> Vec<Draft> {
    let version = &document.notes.release.version;
    let mut drafts = Vec::new();
    let required = [
        (HeadingRole::Authors, String::from("Authors")),
        (
            HeadingRole::Changes(ChangeKind::Issue),
            ChangeKind::Issue.heading(version),
        ),
        (
            HeadingRole::Changes(ChangeKind::PullRequest),
            ChangeKind::PullRequest.heading(version),
        ),
    ];
    for (role, heading) in required {
        let mut found = document.headings_with_role(role).skip(1);
        if document.headings_with_role(role).next().is_none() {
            drafts.push(
                Draft::new(document.title_span, format!("There is no {heading} section"))
                    .help(format!("Add a section titled `{heading}`")),
            );
        } else if let Some(extra) = found.next() {
            drafts.push(
                Draft::new(extra.text_span, format!("There is more than one {heading} section"))
                    .label("repeated section"),
            );
        }
    }
    if !document.has_contents {
        drafts.push(
            Draft::new(document.title_span, "There is no table of contents")
                .help("Add a `.. contents::` directive after the title"),
        );
    }
    drafts
}
