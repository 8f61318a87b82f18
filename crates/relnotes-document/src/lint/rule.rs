use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

/// Every check that can be run against release notes.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Rule {
    DuplicateRecord,
    LinkTarget,
    RecordKind,
    MalformedEntry,
    ContributorCount,
    DuplicateContributor,
    FirstTimeMarker,
    UnderlineLength,
    SectionVersion,
    PreviousVersion,
    MissingSection,
    SortOrder,
}

impl Rule {
    pub const ALL: [Self; 12] = [
        Self::DuplicateRecord,
        Self::LinkTarget,
        Self::RecordKind,
        Self::MalformedEntry,
        Self::ContributorCount,
        Self::DuplicateContributor,
        Self::FirstTimeMarker,
        Self::UnderlineLength,
        Self::SectionVersion,
        Self::PreviousVersion,
        Self::MissingSection,
        Self::SortOrder,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DuplicateRecord => "duplicate-record",
            Self::LinkTarget => "link-target",
            Self::RecordKind => "record-kind",
            Self::MalformedEntry => "malformed-entry",
            Self::ContributorCount => "contributor-count",
            Self::DuplicateContributor => "duplicate-contributor",
            Self::FirstTimeMarker => "first-time-marker",
            Self::UnderlineLength => "underline-length",
            Self::SectionVersion => "section-version",
            Self::PreviousVersion => "previous-version",
            Self::MissingSection => "missing-section",
            Self::SortOrder => "sort-order",
        }
    }

    /// How serious a violation is when the config doesn't say otherwise.
    #[must_use]
    pub const fn default_level(self) -> Level {
        match self {
            Self::RecordKind
            | Self::DuplicateContributor
            | Self::PreviousVersion
            | Self::SortOrder => Level::Warning,
            Self::DuplicateRecord
            | Self::LinkTarget
            | Self::MalformedEntry
            | Self::ContributorCount
            | Self::FirstTimeMarker
            | Self::UnderlineLength
            | Self::SectionVersion
            | Self::MissingSection => Level::Error,
        }
    }

    /// A one-line explanation, shown when listing rules.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::DuplicateRecord => "An issue or pull request is listed twice in one section",
            Self::LinkTarget => "A link is malformed or points somewhere other than its label",
            Self::RecordKind => "An issue links to a pull request, or the other way around",
            Self::MalformedEntry => "A list entry isn't a numbered link followed by a title",
            Self::ContributorCount => "The stated number of contributors doesn't match the list",
            Self::DuplicateContributor => "A contributor is listed twice",
            Self::FirstTimeMarker => "First-time contributors are marked inconsistently",
            Self::UnderlineLength => "A heading's underline doesn't match its length",
            Self::SectionVersion => "A section heading names a different version than the title",
            Self::PreviousVersion => "A point release is compared to the wrong release",
            Self::MissingSection => "A required section or the table of contents is missing",
            Self::SortOrder => "Issues or pull requests are not sorted by number",
        }
    }
}

impl Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown lint rule {0}")]
pub struct UnknownRule(pub String);

impl FromStr for Rule {
    type Err = UnknownRule;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|rule| rule.as_str() == s)
            .ok_or_else(|| UnknownRule(s.to_string()))
    }
}

/// What to do when a rule is violated.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Level {
    Error,
    Warning,
    Off,
}

impl Level {
    #[must_use]
    pub const fn severity(self) -> Option<Severity> {
        match self {
            Self::Error => Some(Severity::Error),
            Self::Warning => Some(Severity::Warning),
            Self::Off => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub enum Severity {
    Warning,
    Error,
}

impl Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Warning => "warning",
            Self::Error => "error",
        })
    }
}
