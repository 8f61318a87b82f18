//! Reading release notes written in reStructuredText.

use std::{fmt::Display, str::FromStr, sync::LazyLock};

#[cfg(feature = "miette")]
use miette::Diagnostic;
use regex::Regex;
use thiserror::Error;
use tracing::{debug, trace};

pub use block::Adornment;
use block::{Body, Item, Line, RawHeading};

use crate::{
    Authors, ChangeKind, ChangeRecord, Contributor, Release, ReleaseNotes, Section, Span, Version,
    version,
};

mod block;

/// Options which change how the document is read.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseOptions {
    /// The text after a contributor's name that marks their first contribution
    pub first_time_marker: String,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            first_time_marker: String::from("+"),
        }
    }
}

/// A parsed release notes file: the release notes themselves plus everything about how they were
/// written that lint rules need to look at.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Document {
    pub notes: ReleaseNotes,
    pub headings: Vec<Heading>,
    /// Whether a `.. contents::` directive appears anywhere
    pub has_contents: bool,
    /// List items in the issue and pull request sections that couldn't be read
    pub malformed: Vec<MalformedEntry>,
    pub title_span: Span,
    pub summary_span: Option<Span>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Heading {
    pub text: String,
    pub role: HeadingRole,
    pub text_span: Span,
    /// Width of the heading text in characters, including the inset of an overlined title
    pub width: usize,
    pub underline: Adornment,
    pub overline: Option<Adornment>,
}

impl Heading {
    fn new(raw: &RawHeading, role: HeadingRole) -> Self {
        Self {
            text: raw.text.to_string(),
            role,
            text_span: raw.text_span,
            width: raw.width,
            underline: raw.underline,
            overline: raw.overline,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum HeadingRole {
    Title,
    Authors,
    Changes(ChangeKind),
    Other,
}

impl HeadingRole {
    fn from_text(text: &str) -> Self {
        if text == "Authors" {
            return Self::Authors;
        }
        [ChangeKind::Issue, ChangeKind::PullRequest]
            .into_iter()
            .find(|kind| text.starts_with(kind.heading_prefix()))
            .map_or(Self::Other, Self::Changes)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MalformedEntry {
    pub kind: ChangeKind,
    pub text: String,
    pub span: Span,
    pub problem: EntryProblem,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EntryProblem {
    /// The entry doesn't start with a link like `` `#123 <url>`__: ``
    NotALink,
    EmptyTitle,
}

impl Display for EntryProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::NotALink => "entry does not start with a numbered link",
            Self::EmptyTitle => "entry has no title",
        })
    }
}

#[allow(clippy::unwrap_used)] // Constant pattern, covered by tests
static TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+?)\s+(\S+)\s+Release\s+Notes$").unwrap());

#[allow(clippy::unwrap_used)] // Constant pattern, covered by tests
static ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^`#?(\d+)\s*<([^>]*)>`__?\s*(?::|\x{2014}|\x{2013}|-)\s*(.*)$").unwrap()
});

#[allow(clippy::unwrap_used)] // Constant pattern, covered by tests
static TOTAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^A total of (\d+) (?:people|persons?|contributors?) contributed to this release\.?$",
    )
    .unwrap()
});

impl Document {
    /// Parse release notes from their reStructuredText source.
    ///
    /// # Errors
    ///
    /// If the source has no title, or the title doesn't name a project and version. Problems
    /// further down the document are left for lint rules to report.
    pub fn parse(source: &str, options: &ParseOptions) -> Result<Self, ParseError> {
        if source.trim_start_matches(block::BYTE_ORDER_MARK).trim().is_empty() {
            return Err(ParseError::Empty);
        }
        let lines = block::lines(source);

        let mut raw_headings = Vec::new();
        let mut index = 0;
        while index < lines.len() {
            if let Some(heading) = block::heading_at(&lines, index) {
                index = heading.next_line;
                raw_headings.push((heading, index));
            } else {
                index += 1;
            }
        }
        // Pair each heading with the range of lines making up its body
        let sections = raw_headings
            .iter()
            .enumerate()
            .map(|(position, (heading, body_start))| {
                let body_end = raw_headings
                    .get(position + 1)
                    .map_or(lines.len(), |(next, next_body_start)| {
                        next_body_start - heading_line_count(next)
                    });
                (heading, lines.get(*body_start..body_end).unwrap_or_default())
            })
            .collect::<Vec<_>>();

        let Some(((title, preamble), rest)) = sections.split_first() else {
            return Err(ParseError::MissingTitle);
        };
        let (project, version) = parse_title(title)?;
        debug!("Parsing release notes for {project} {version}");

        let (summary, summary_span, caveats) = preamble_paragraphs(preamble);
        let mut document = Self {
            notes: ReleaseNotes {
                release: Release {
                    project,
                    version,
                    summary,
                    caveats,
                },
                authors: Authors::default(),
                issues: Section::new(ChangeKind::Issue, None, Vec::new()),
                pull_requests: Section::new(ChangeKind::PullRequest, None, Vec::new()),
            },
            headings: vec![Heading::new(title, HeadingRole::Title)],
            has_contents: lines
                .iter()
                .any(|line| line.trimmed().starts_with(".. contents::")),
            malformed: Vec::new(),
            title_span: title.text_span,
            summary_span,
        };

        let mut authors_read = false;
        for (heading, body) in rest {
            let role = HeadingRole::from_text(heading.text);
            trace!("Found heading {:?} ({role:?})", heading.text);
            document.headings.push(Heading::new(heading, role));
            match role {
                // Only the first list of authors counts, lint rules report any others
                HeadingRole::Authors if !authors_read => {
                    document.notes.authors = authors(&block::body(body), options);
                    authors_read = true;
                }
                HeadingRole::Authors => {}
                HeadingRole::Changes(kind) => document.read_changes(kind, heading, body),
                HeadingRole::Title | HeadingRole::Other => {}
            }
        }
        Ok(document)
    }

    fn read_changes(&mut self, kind: ChangeKind, heading: &RawHeading, lines: &[Line]) {
        let version = heading
            .text
            .strip_prefix(kind.heading_prefix())
            .and_then(|version| Version::from_str(version).ok());
        let mut records = Vec::new();
        for item in block::body(lines).items {
            match change_record(kind, &item) {
                Ok(record) => records.push(record),
                Err(problem) => {
                    debug!("Malformed {kind} entry: {}", item.text);
                    self.malformed.push(MalformedEntry {
                        kind,
                        text: item.text,
                        span: item.span,
                        problem,
                    });
                }
            }
        }
        let section = match kind {
            ChangeKind::Issue => &mut self.notes.issues,
            ChangeKind::PullRequest => &mut self.notes.pull_requests,
        };
        section.version = version;
        section.records.extend(records);
        section.heading_span = Some(heading.text_span);
    }

    /// Every heading that plays `role`.
    pub fn headings_with_role(&self, role: HeadingRole) -> impl Iterator<Item = &Heading> {
        self.headings
            .iter()
            .filter(move |heading| heading.role == role)
    }
}

const fn heading_line_count(heading: &RawHeading) -> usize {
    if heading.overline.is_some() { 3 } else { 2 }
}

fn parse_title(title: &RawHeading) -> Result<(String, Version), ParseError> {
    let captures = TITLE
        .captures(title.text)
        .ok_or_else(|| ParseError::Title {
            text: title.text.to_string(),
            span: title.text_span,
        })?;
    let project = captures.get(1).map_or("", |project| project.as_str());
    let version = captures.get(2).map_or("", |version| version.as_str());
    let version = Version::from_str(version).map_err(|source| ParseError::Version {
        source,
        span: title.text_span,
    })?;
    Ok((project.to_string(), version))
}

/// The summary (first paragraph) and caveats (every other paragraph), skipping directives.
fn preamble_paragraphs(lines: &[Line]) -> (String, Option<Span>, Vec<String>) {
    let mut paragraphs = block::paragraphs(lines)
        .into_iter()
        .filter(|paragraph| {
            paragraph
                .first()
                .is_some_and(|line| !line.trimmed().starts_with(".."))
        })
        .map(|paragraph| {
            let span = paragraph
                .iter()
                .map(|line| line.content_span())
                .reduce(Span::join);
            let text = paragraph
                .iter()
                .map(|line| line.trimmed())
                .collect::<Vec<_>>()
                .join("\n");
            (text, span)
        });
    let (summary, summary_span) = paragraphs.next().unwrap_or_default();
    (
        summary,
        summary_span,
        paragraphs.map(|(caveat, _)| caveat).collect(),
    )
}

fn authors(body: &Body, options: &ParseOptions) -> Authors {
    let contributors = body
        .items
        .iter()
        .map(|item| contributor(item, &options.first_time_marker))
        .collect();
    let mut authors = Authors {
        contributors,
        ..Authors::default()
    };
    for paragraph in &body.prose {
        let mut index = 0;
        while let Some(line) = paragraph.get(index) {
            let total = authors
                .stated_total
                .is_none()
                .then(|| stated_total(paragraph.get(index..).unwrap_or_default()))
                .flatten();
            if let Some((total, span, line_count)) = total {
                authors.stated_total = Some(total);
                authors.total_span = Some(span);
                index += line_count;
            } else {
                authors.footer.push(line.trimmed().to_string());
                index += 1;
            }
        }
    }
    authors
}

/// Read "A total of N people contributed to this release." starting at the first of `lines`,
/// where the sentence may wrap onto the lines after it.
///
/// Returns the total, the span of its digits, and how many lines the sentence takes up.
fn stated_total(lines: &[Line]) -> Option<(u64, Span, usize)> {
    let mut sentence = String::new();
    let mut line_starts = Vec::new();
    for (index, line) in lines.iter().enumerate() {
        if !sentence.is_empty() {
            sentence.push(' ');
        }
        line_starts.push((sentence.len(), *line));
        sentence.push_str(line.trimmed());
        if let Some(number) = TOTAL.captures(&sentence).and_then(|captures| captures.get(1)) {
            let total = number.as_str().parse::<u64>().ok()?;
            let (line_start, line) = line_starts
                .iter()
                .rev()
                .find(|(line_start, _)| *line_start <= number.start())?;
            let offset = line.offset + line.indent() + number.start() - line_start;
            return Some((total, Span::new(offset, number.len()), index + 1));
        }
        if sentence.ends_with('.') {
            return None;
        }
    }
    None
}

fn contributor(item: &Item, marker: &str) -> Contributor {
    let raw = item.text.trim();
    let marked_name = if marker.is_empty() {
        None
    } else {
        raw.strip_suffix(marker)
            .filter(|name| name.ends_with(char::is_whitespace))
    };
    let (name, first_time) = match marked_name {
        Some(name) => (name.trim_end(), true),
        None => (raw, false),
    };
    Contributor {
        name: name.to_string(),
        first_time,
        raw: raw.to_string(),
        span: item.span,
    }
}

fn change_record(kind: ChangeKind, item: &Item) -> Result<ChangeRecord, EntryProblem> {
    let captures = ENTRY.captures(&item.text).ok_or(EntryProblem::NotALink)?;
    let number = captures
        .get(1)
        .and_then(|number| number.as_str().parse::<u64>().ok())
        .ok_or(EntryProblem::NotALink)?;
    let url = captures.get(2).map_or("", |url| url.as_str()).trim();
    let title = captures.get(3).map_or("", |title| title.as_str()).trim();
    if title.is_empty() {
        return Err(EntryProblem::EmptyTitle);
    }
    let url_span = item
        .first_line
        .text
        .find(url)
        .filter(|_| !url.is_empty())
        .map_or(item.span, |position| {
            Span::new(item.first_line.offset + position, url.len())
        });
    Ok(ChangeRecord {
        kind,
        number,
        url: url.to_string(),
        title: title.to_string(),
        span: item.span,
        url_span,
    })
}

#[derive(Debug, Error)]
#[cfg_attr(feature = "miette", derive(Diagnostic))]
pub enum ParseError {
    #[error("The release notes are empty")]
    #[cfg_attr(
        feature = "miette",
        diagnostic(
            code(parse::empty),
            help("Release notes need at least a title, like `SciPy 1.5.2 Release Notes`")
        )
    )]
    Empty,
    #[error("No title found")]
    #[cfg_attr(
        feature = "miette",
        diagnostic(
            code(parse::missing_title),
            help(
                "The first heading of the release notes is the title. It must be underlined (and optionally overlined) \
                with a line of repeated punctuation, like `=========`"
            )
        )
    )]
    MissingTitle,
    #[error("The title {text:?} doesn't name the release")]
    #[cfg_attr(
        feature = "miette",
        diagnostic(
            code(parse::title),
            help("The title must read `<Project> <version> Release Notes`, like `SciPy 1.5.2 Release Notes`")
        )
    )]
    Title { text: String, span: Span },
    #[error("The title doesn't contain a valid version")]
    #[cfg_attr(feature = "miette", diagnostic(code(parse::version)))]
    Version {
        #[cfg_attr(feature = "miette", diagnostic_source)]
        source: version::Error,
        span: Span,
    },
}

impl ParseError {
    /// Where in the source the problem is, if it's anywhere in particular.
    #[must_use]
    pub const fn span(&self) -> Option<Span> {
        match self {
            Self::Empty | Self::MissingTitle => None,
            Self::Title { span, .. } | Self::Version { span, .. } => Some(*span),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod test_parse {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_fixtures::SCIPY_1_5_2;

    fn parse(source: &str) -> Document {
        Document::parse(source, &ParseOptions::default()).unwrap()
    }

    #[test]
    fn release_preamble() {
        let document = parse(SCIPY_1_5_2);
        let release = &document.notes.release;
        assert_eq!(release.project, "SciPy");
        assert_eq!(release.version, Version::new(1, 5, 2));
        assert_eq!(
            release.summary,
            "SciPy 1.5.2 is a bug-fix release with no new features\ncompared to 1.5.1."
        );
        assert_eq!(release.caveats.len(), 1);
        assert!(release.caveats[0].starts_with("Note that the wheels for Python 3.6"));
        assert!(document.has_contents);
        assert!(document.malformed.is_empty());
    }

    #[test]
    fn authors_section() {
        let document = parse(SCIPY_1_5_2);
        let authors = &document.notes.authors;
        assert_eq!(authors.contributors.len(), 14);
        assert_eq!(authors.stated_total, Some(14));
        assert_eq!(authors.first_time_count(), 4);
        let tobias = &authors.contributors[1];
        assert_eq!(tobias.name, "Tobias Biester");
        assert!(tobias.first_time);
        assert_eq!(tobias.raw, "Tobias Biester +");
        assert_eq!(authors.footer.len(), 2);
        let total_span = authors.total_span.unwrap();
        assert_eq!(
            &SCIPY_1_5_2[total_span.offset..total_span.end()],
            "14"
        );
    }

    #[test]
    fn wrapped_total() {
        let source = SCIPY_1_5_2.replace(
            "A total of 14 people contributed to this release.",
            "A total of 14 people contributed to\nthis release.",
        );
        let authors = parse(&source).notes.authors;
        assert_eq!(authors.stated_total, Some(14));
        let total_span = authors.total_span.unwrap();
        assert_eq!(&source[total_span.offset..total_span.end()], "14");
        assert_eq!(authors.footer.len(), 2);
        assert!(authors.footer[0].starts_with("People with a"));
    }

    #[test]
    fn total_on_the_line_after_a_wrap() {
        let source = "\
SciPy 1.5.2 Release Notes
=========================

Authors
=======

* Peter Bell

A total of
1 person contributed to this release.
";
        let authors = parse(source).notes.authors;
        assert_eq!(authors.stated_total, Some(1));
        let total_span = authors.total_span.unwrap();
        assert_eq!(&source[total_span.offset..total_span.end()], "1");
        assert!(authors.footer.is_empty());
    }

    #[test]
    fn byte_order_mark() {
        let source = format!("\u{feff}{SCIPY_1_5_2}");
        let document = parse(&source);
        assert_eq!(document.notes.release.version, Version::new(1, 5, 2));
        assert_eq!(document.notes.authors.contributors.len(), 14);
        let title = document.title_span;
        assert_eq!(
            &source[title.offset..title.end()],
            "SciPy 1.5.2 Release Notes"
        );
        let total_span = document.notes.authors.total_span.unwrap();
        assert_eq!(&source[total_span.offset..total_span.end()], "14");
    }

    #[test]
    fn only_a_byte_order_mark() {
        assert!(matches!(
            Document::parse("\u{feff}\n", &ParseOptions::default()),
            Err(ParseError::Empty)
        ));
    }

    #[test]
    fn change_sections() {
        let document = parse(SCIPY_1_5_2);
        let issues = &document.notes.issues;
        assert_eq!(issues.version, Some(Version::new(1, 5, 2)));
        assert_eq!(issues.records.len(), 7);
        let first = &issues.records[0];
        assert_eq!(first.number, 3847);
        assert_eq!(first.url, "https://github.com/scipy/scipy/issues/3847");
        assert_eq!(first.title, "Crash of interpolate.splprep(task=-1)");
        assert_eq!(
            &SCIPY_1_5_2[first.url_span.offset..first.url_span.end()],
            first.url
        );

        let pull_requests = &document.notes.pull_requests;
        assert_eq!(pull_requests.records.len(), 11);
        assert!(
            pull_requests
                .records
                .iter()
                .all(|record| record.kind == ChangeKind::PullRequest)
        );
    }

    #[test]
    fn headings() {
        let document = parse(SCIPY_1_5_2);
        let roles: Vec<HeadingRole> = document.headings.iter().map(|h| h.role).collect();
        assert_eq!(
            roles,
            [
                HeadingRole::Title,
                HeadingRole::Authors,
                HeadingRole::Changes(ChangeKind::Issue),
                HeadingRole::Changes(ChangeKind::PullRequest),
            ]
        );
        let title = &document.headings[0];
        assert_eq!(title.text, "SciPy 1.5.2 Release Notes");
        assert_eq!(title.overline.map(|overline| overline.len), Some(25));
    }

    #[test]
    fn multi_line_entry_and_separators() {
        let source = "\
SciPy 1.5.2 Release Notes
=========================

Pull requests for 1.5.2
-----------------------

* `#12243 <https://github.com/scipy/scipy/pull/12243>`__: BUG: fix a long
  title that wraps
* `#12244 <https://github.com/scipy/scipy/pull/12244>`_ \u{2014} em dash title
* `#12245 <https://github.com/scipy/scipy/pull/12245>`__ - hyphen title
";
        let document = parse(source);
        let titles: Vec<&str> = document
            .notes
            .pull_requests
            .records
            .iter()
            .map(|record| record.title.as_str())
            .collect();
        assert_eq!(
            titles,
            [
                "BUG: fix a long title that wraps",
                "em dash title",
                "hyphen title"
            ]
        );
    }

    #[test]
    fn malformed_entries() {
        let source = "\
SciPy 1.5.2 Release Notes
=========================

Issues closed for 1.5.2
-----------------------

* #3847: no link
* `#3848 <https://github.com/scipy/scipy/issues/3848>`__:
";
        let document = parse(source);
        assert!(document.notes.issues.records.is_empty());
        let problems: Vec<EntryProblem> =
            document.malformed.iter().map(|entry| entry.problem).collect();
        assert_eq!(problems, [EntryProblem::NotALink, EntryProblem::EmptyTitle]);
    }

    #[test]
    fn look_alike_markers_are_not_first_time() {
        let source = "\
SciPy 1.5.2 Release Notes
=========================

Authors
=======

* Jane Doe+
* John Doe (+)
* Max Mustermann  +
";
        let document = parse(source);
        let contributors = &document.notes.authors.contributors;
        assert!(!contributors[0].first_time);
        assert_eq!(contributors[0].name, "Jane Doe+");
        assert!(!contributors[1].first_time);
        assert!(contributors[2].first_time);
        assert_eq!(contributors[2].name, "Max Mustermann");
        assert_eq!(contributors[2].raw, "Max Mustermann  +");
    }

    #[test]
    fn custom_marker() {
        let source = "\
Foo 0.1.1 Release Notes
=======================

Authors
=======

* Jane Doe *
";
        let options = ParseOptions {
            first_time_marker: "*".into(),
        };
        let document = Document::parse(source, &options).unwrap();
        assert!(document.notes.authors.contributors[0].first_time);
    }

    #[test]
    fn empty() {
        assert!(matches!(
            Document::parse("  \n", &ParseOptions::default()),
            Err(ParseError::Empty)
        ));
    }

    #[test]
    fn no_headings() {
        assert!(matches!(
            Document::parse("just text\n", &ParseOptions::default()),
            Err(ParseError::MissingTitle)
        ));
    }

    #[test]
    fn bad_title() {
        let result = Document::parse("Changelog\n=========\n", &ParseOptions::default());
        let Err(err) = result else {
            panic!("expected an error");
        };
        assert!(matches!(err, ParseError::Title { .. }));
        assert_eq!(err.span(), Some(Span::new(0, 9)));
    }

    #[test]
    fn bad_version() {
        let result = Document::parse(
            "SciPy 1.5 Release Notes\n=======================\n",
            &ParseOptions::default(),
        );
        assert!(matches!(result, Err(ParseError::Version { .. })));
    }

    #[test]
    fn unparseable_section_version() {
        let source = "\
SciPy 1.5.2 Release Notes
=========================

Issues closed for next
----------------------
";
        let document = parse(source);
        assert_eq!(document.notes.issues.version, None);
        assert!(document.notes.issues.heading_span.is_some());
        assert!(document.notes.pull_requests.heading_span.is_none());
    }
}
