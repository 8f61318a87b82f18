//! Writing release notes back out as reStructuredText.

use std::fmt::Write;

use itertools::Itertools;

use crate::{Authors, ChangeRecord, ReleaseNotes, Section};

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RenderOptions {
    pub first_time_marker: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            first_time_marker: String::from("+"),
        }
    }
}

/// The lines after the total number of contributors, used when the authors have no footer yet.
#[must_use]
pub fn default_footer(marker: &str) -> Vec<String> {
    vec![
        format!("People with a \"{marker}\" by their names contributed a patch for the first time."),
        String::from(
            "This list of names is automatically generated, and may not be fully complete.",
        ),
    ]
}

/// Render a complete release notes document.
#[must_use]
pub fn render(notes: &ReleaseNotes, options: &RenderOptions) -> String {
    let release = &notes.release;
    let title = release.title();
    let rule = "=".repeat(title.chars().count());
    let mut out = format!("{rule}\n{title}\n{rule}\n\n.. contents::\n\n");
    for paragraph in std::iter::once(&release.summary)
        .chain(&release.caveats)
        .filter(|paragraph| !paragraph.trim().is_empty())
    {
        out.push_str(paragraph.trim());
        out.push_str("\n\n");
    }
    out.push_str(&render_authors(&notes.authors, options));
    out.push('\n');
    out.push_str(&render_section(&notes.issues, &release.version));
    out.push('\n');
    out.push_str(&render_section(&notes.pull_requests, &release.version));
    out
}

/// Render the `Authors` section, including the totals after the names.
#[must_use]
pub fn render_authors(authors: &Authors, options: &RenderOptions) -> String {
    let mut out = heading("Authors", '=');
    out.push('\n');
    for contributor in &authors.contributors {
        if contributor.first_time {
            writeln!(
                out,
                "* {name} {marker}",
                name = contributor.name,
                marker = options.first_time_marker
            )
            .ok();
        } else {
            writeln!(out, "* {}", contributor.name).ok();
        }
    }
    if !authors.contributors.is_empty() {
        out.push('\n');
    }
    let total = authors
        .stated_total
        .unwrap_or_else(|| authors.distinct_count() as u64);
    writeln!(out, "A total of {total} people contributed to this release.").ok();
    let footer = if authors.footer.is_empty() {
        default_footer(&options.first_time_marker)
    } else {
        authors.footer.clone()
    };
    for line in footer {
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// Render the issues or pull requests section, sorted by number.
#[must_use]
pub fn render_section(section: &Section, fallback_version: &crate::Version) -> String {
    let version = section.version.as_ref().unwrap_or(fallback_version);
    let mut out = heading(&section.kind.heading(version), '-');
    let records = section
        .records
        .iter()
        .sorted_by_key(|record| record.number)
        .map(render_record)
        .join("\n");
    if !records.is_empty() {
        out.push('\n');
        out.push_str(&records);
        out.push('\n');
    }
    out
}

fn render_record(record: &ChangeRecord) -> String {
    let title = record.title.split_whitespace().join(" ");
    format!(
        "* `#{number} <{url}>`__: {title}",
        number = record.number,
        url = record.url
    )
}

fn heading(text: &str, character: char) -> String {
    let underline = character.to_string().repeat(text.chars().count());
    format!("{text}\n{underline}\n")
}
