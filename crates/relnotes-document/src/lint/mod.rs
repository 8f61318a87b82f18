//! Checks that release notes are internally consistent and formatted the way the rendering
//! toolchain expects.

use std::collections::HashMap;

use serde::Deserialize;
use tracing::debug;

pub use fix::fix;
pub use rule::{Level, Rule, Severity, UnknownRule};

use crate::{Document, Span};

mod authors;
mod fix;
mod records;
mod rule;
mod structure;

/// How a heading's underline must relate to the heading's length.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub enum UnderlineMode {
    /// Exactly as long as the heading
    #[default]
    Exact,
    /// At least as long as the heading, which is all reStructuredText requires
    AtLeast,
}

/// The GitHub repository links must point into.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Repository {
    pub owner: String,
    pub repo: String,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub underline: UnderlineMode,
    /// Overrides of each rule's default level
    pub levels: HashMap<Rule, Level>,
    pub repository: Option<Repository>,
    pub first_time_marker: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            underline: UnderlineMode::default(),
            levels: HashMap::new(),
            repository: None,
            first_time_marker: String::from("+"),
        }
    }
}

impl Config {
    #[must_use]
    pub fn level(&self, rule: Rule) -> Level {
        self.levels
            .get(&rule)
            .copied()
            .unwrap_or_else(|| rule.default_level())
    }

    fn is_enabled(&self, rule: Rule) -> bool {
        self.level(rule).severity().is_some()
    }
}

/// One violation of a rule.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct Finding {
    pub rule: Rule,
    pub severity: Severity,
    pub message: String,
    pub help: Option<String>,
    /// Short text shown next to the highlighted source
    pub label: Option<String>,
    pub span: Span,
}

#[cfg(feature = "miette")]
impl miette::Diagnostic for Finding {
    fn code<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        Some(Box::new(format!("lint::{}", self.rule)))
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(match self.severity {
            Severity::Error => miette::Severity::Error,
            Severity::Warning => miette::Severity::Warning,
        })
    }

    fn help<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        self.help
            .as_ref()
            .map(|help| Box::new(help) as Box<dyn std::fmt::Display + 'a>)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = miette::LabeledSpan> + '_>> {
        Some(Box::new(std::iter::once(miette::LabeledSpan::new_with_span(
            self.label.clone(),
            self.span,
        ))))
    }
}

/// A finding before the rule's configured severity is attached.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Draft {
    span: Span,
    message: String,
    help: Option<String>,
    label: Option<String>,
}

impl Draft {
    pub(crate) fn new(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            help: None,
            label: None,
        }
    }

    pub(crate) fn help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub(crate) fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Run every enabled rule against `document`, returning findings in source order.
#[must_use]
pub fn lint(document: &Document, config: &Config) -> Vec<Finding> {
    let mut findings = Vec::new();
    for rule in Rule::ALL {
        let Some(severity) = config.level(rule).severity() else {
            debug!("Skipping disabled rule {rule}");
            continue;
        };
        let drafts = match rule {
            Rule::DuplicateRecord => records::duplicates(document),
            Rule::LinkTarget => records::link_targets(document, config),
            Rule::RecordKind => records::kinds(document),
            Rule::MalformedEntry => records::malformed(document),
            Rule::SortOrder => records::sort_order(document),
            Rule::SectionVersion => records::section_versions(document),
            Rule::ContributorCount => authors::count(document),
            Rule::DuplicateContributor => authors::duplicates(document),
            Rule::FirstTimeMarker => authors::first_time_markers(document, config),
            Rule::UnderlineLength => structure::underlines(document, config),
            Rule::PreviousVersion => structure::previous_version(document),
            Rule::MissingSection => structure::missing_sections(document),
        };
        findings.extend(drafts.into_iter().map(|draft| Finding {
            rule,
            severity,
            message: draft.message,
            help: draft.help,
            label: draft.label,
            span: draft.span,
        }));
    }
    findings.sort_by_key(|finding| (finding.span.offset, finding.rule));
    findings
}
