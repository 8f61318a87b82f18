//! The release notes of a single release, independent of how they are written down.

use std::{collections::HashSet, fmt::Display, sync::LazyLock};

use regex::Regex;
use serde::Serialize;

use crate::Version;

/// A byte range in the source text, used to point diagnostics at the right place.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Span {
    pub offset: usize,
    pub len: usize,
}

impl Span {
    #[must_use]
    pub const fn new(offset: usize, len: usize) -> Self {
        Self { offset, len }
    }

    #[must_use]
    pub const fn end(self) -> usize {
        self.offset + self.len
    }

    /// The smallest span covering both `self` and `other`.
    #[must_use]
    pub fn join(self, other: Self) -> Self {
        let offset = self.offset.min(other.offset);
        let end = self.end().max(other.end());
        Self::new(offset, end - offset)
    }
}

#[cfg(feature = "miette")]
impl From<Span> for miette::SourceSpan {
    fn from(span: Span) -> Self {
        (span.offset, span.len).into()
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ReleaseNotes {
    pub release: Release,
    pub authors: Authors,
    pub issues: Section,
    pub pull_requests: Section,
}

impl ReleaseNotes {
    /// Both change sections, issues first.
    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        [&self.issues, &self.pull_requests].into_iter()
    }
}

/// The preamble of the release notes.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Release {
    /// The name of the project, like `SciPy`
    pub project: String,
    pub version: Version,
    /// The first paragraph after the title
    pub summary: String,
    /// Every other paragraph of the preamble, usually compatibility notes
    pub caveats: Vec<String>,
}

#[allow(clippy::unwrap_used)] // Constant pattern, covered by tests
static COMPARED_TO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"compared\s+to\s+v?(\d+\.\d+\.\d+(?:(?:a|b|rc)\d+)?)").unwrap()
});

impl Release {
    /// The version the summary says this release is compared to, as in "no new features compared
    /// to 1.5.1".
    #[must_use]
    pub fn compared_to(&self) -> Option<Version> {
        COMPARED_TO
            .captures(&self.summary)
            .and_then(|captures| captures.get(1))
            .and_then(|version| version.as_str().parse().ok())
    }

    /// The title of the document, like `SciPy 1.5.2 Release Notes`
    #[must_use]
    pub fn title(&self) -> String {
        format!("{} {} Release Notes", self.project, self.version)
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Contributor {
    pub name: String,
    /// Whether this was the person's first contribution to the project
    pub first_time: bool,
    /// The list item as written, without the bullet
    #[serde(skip)]
    pub raw: String,
    #[serde(skip)]
    pub span: Span,
}

impl Contributor {
    #[must_use]
    pub fn new(name: impl Into<String>, first_time: bool) -> Self {
        let name = name.into();
        Self {
            raw: name.clone(),
            name,
            first_time,
            span: Span::default(),
        }
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct Authors {
    pub contributors: Vec<Contributor>,
    /// The number from "A total of N people contributed to this release."
    pub stated_total: Option<u64>,
    /// Any other lines following the list of names
    pub footer: Vec<String>,
    #[serde(skip)]
    pub total_span: Option<Span>,
}

impl Authors {
    /// Build an author list whose stated total is correct.
    #[must_use]
    pub fn from_contributors(contributors: Vec<Contributor>) -> Self {
        let mut authors = Self {
            contributors,
            ..Self::default()
        };
        authors.stated_total = Some(authors.distinct_count() as u64);
        authors
    }

    /// The number of distinct names in the list.
    #[must_use]
    pub fn distinct_count(&self) -> usize {
        self.contributors
            .iter()
            .map(|contributor| contributor.name.as_str())
            .collect::<HashSet<_>>()
            .len()
    }

    #[must_use]
    pub fn first_time_count(&self) -> usize {
        self.contributors
            .iter()
            .filter(|contributor| contributor.first_time)
            .count()
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChangeKind {
    Issue,
    PullRequest,
}

impl ChangeKind {
    /// The start of the section heading listing changes of this kind.
    #[must_use]
    pub const fn heading_prefix(self) -> &'static str {
        match self {
            Self::Issue => "Issues closed for",
            Self::PullRequest => "Pull requests for",
        }
    }

    /// The path segment GitHub uses before the number, like `/issues/123`.
    #[must_use]
    pub const fn url_segment(self) -> &'static str {
        match self {
            Self::Issue => "issues",
            Self::PullRequest => "pull",
        }
    }

    #[must_use]
    pub fn heading(self, version: &Version) -> String {
        format!("{} {version}", self.heading_prefix())
    }
}

impl Display for ChangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Issue => "issue",
            Self::PullRequest => "pull request",
        })
    }
}

/// A single closed issue or merged pull request.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ChangeRecord {
    pub kind: ChangeKind,
    pub number: u64,
    pub url: String,
    pub title: String,
    #[serde(skip)]
    pub span: Span,
    #[serde(skip)]
    pub url_span: Span,
}

impl ChangeRecord {
    #[must_use]
    pub fn new(kind: ChangeKind, number: u64, url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            kind,
            number,
            url: url.into(),
            title: title.into(),
            span: Span::default(),
            url_span: Span::default(),
        }
    }
}

/// Either the closed issues or the merged pull requests of a release.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Section {
    pub kind: ChangeKind,
    /// The version named in the heading, if it could be parsed
    pub version: Option<Version>,
    pub records: Vec<ChangeRecord>,
    #[serde(skip)]
    pub heading_span: Option<Span>,
}

impl Section {
    #[must_use]
    pub const fn new(kind: ChangeKind, version: Option<Version>, records: Vec<ChangeRecord>) -> Self {
        Self {
            kind,
            version,
            records,
            heading_span: None,
        }
    }
}
