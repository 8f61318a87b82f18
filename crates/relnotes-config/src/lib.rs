//! The contents of `relnotes.toml`.

use std::ops::Range;

use indexmap::IndexMap;
use relnotes_document::{
    ParseOptions,
    lint::{self, Level, Rule, UnderlineMode},
    render::RenderOptions,
};
use serde::Deserialize;

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// The name of the project, used in the title of generated release notes
    pub project: Option<String>,
    pub github: Option<GitHub>,
    #[serde(default)]
    pub authors: Authors,
    #[serde(default)]
    pub lint: Lint,
    #[serde(default)]
    pub generate: Generate,
}

/// The repository that issues and pull requests belong to.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GitHub {
    pub owner: String,
    pub repo: String,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct Authors {
    /// Written after the name of anyone contributing for the first time
    #[serde(default = "default_marker")]
    pub first_time_marker: String,
    /// Names which never appear in the list of authors
    #[serde(default)]
    pub exclude: Vec<String>,
}

fn default_marker() -> String {
    String::from("+")
}

impl Default for Authors {
    fn default() -> Self {
        Self {
            first_time_marker: default_marker(),
            exclude: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Lint {
    #[serde(default)]
    pub underline: UnderlineMode,
    /// Overrides of the default level of each rule
    #[serde(default)]
    pub rules: IndexMap<Rule, Level>,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Generate {
    /// Where new release notes are written, as `<directory>/<version>-notes.rst`
    #[serde(default = "default_directory")]
    pub directory: String,
}

fn default_directory() -> String {
    String::from("doc/release")
}

impl Default for Generate {
    fn default() -> Self {
        Self {
            directory: default_directory(),
        }
    }
}

impl Config {
    pub const FILE_NAME: &'static str = "relnotes.toml";

    /// Parse the contents of a `relnotes.toml` file.
    ///
    /// # Errors
    ///
    /// If the TOML is invalid, has unknown keys or rules, or the first-time marker is unusable.
    pub fn from_toml(source: &str) -> Result<Self, Error> {
        let config: Self = toml::from_str(source).map_err(|err| Error {
            message: err.message().to_string(),
            span: err.span(),
        })?;
        let marker = &config.authors.first_time_marker;
        if marker.is_empty() || marker.contains(char::is_whitespace) {
            return Err(Error {
                message: format!(
                    "first-time-marker must be non-empty and contain no white space, found {marker:?}"
                ),
                span: source
                    .find("first-time-marker")
                    .map(|start| start..start + "first-time-marker".len()),
            });
        }
        Ok(config)
    }

    #[must_use]
    pub fn lint_config(&self) -> lint::Config {
        lint::Config {
            underline: self.lint.underline,
            levels: self
                .lint
                .rules
                .iter()
                .map(|(rule, level)| (*rule, *level))
                .collect(),
            repository: self.github.as_ref().map(|github| lint::Repository {
                owner: github.owner.clone(),
                repo: github.repo.clone(),
            }),
            first_time_marker: self.authors.first_time_marker.clone(),
        }
    }

    #[must_use]
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            first_time_marker: self.authors.first_time_marker.clone(),
        }
    }

    #[must_use]
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            first_time_marker: self.authors.first_time_marker.clone(),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct Error {
    pub message: String,
    /// Byte range of the problem in the TOML source
    pub span: Option<Range<usize>>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod test_config {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.authors.first_time_marker, "+");
        assert_eq!(config.generate.directory, "doc/release");
        assert_eq!(config.lint_config(), lint::Config::default());
    }

    #[test]
    fn full_config() {
        let config = Config::from_toml(
            r#"
project = "SciPy"

[github]
owner = "scipy"
repo = "scipy"

[authors]
first-time-marker = "*"
exclude = ["Release Bot"]

[lint]
underline = "at-least"

[lint.rules]
sort-order = "off"
record-kind = "error"
"#,
        )
        .unwrap();
        assert_eq!(config.project.as_deref(), Some("SciPy"));
        let lint_config = config.lint_config();
        assert_eq!(lint_config.underline, UnderlineMode::AtLeast);
        assert_eq!(lint_config.level(Rule::SortOrder), Level::Off);
        assert_eq!(lint_config.level(Rule::RecordKind), Level::Error);
        assert_eq!(lint_config.level(Rule::LinkTarget), Level::Error);
        assert_eq!(
            lint_config.repository,
            Some(lint::Repository {
                owner: "scipy".into(),
                repo: "scipy".into()
            })
        );
        assert_eq!(config.parse_options().first_time_marker, "*");
        assert_eq!(config.authors.exclude, ["Release Bot"]);
    }

    #[test]
    fn unknown_rule() {
        let source = "[lint.rules]\nline-length = \"off\"\n";
        let err = Config::from_toml(source).unwrap_err();
        assert!(err.message.contains("line-length"), "{}", err.message);
        assert!(err.span.is_some());
    }

    #[test]
    fn unknown_key() {
        let err = Config::from_toml("projects = \"SciPy\"\n").unwrap_err();
        assert!(err.message.contains("projects"), "{}", err.message);
    }

    #[test]
    fn blank_marker() {
        let err = Config::from_toml("[authors]\nfirst-time-marker = \" \"\n").unwrap_err();
        assert!(err.message.starts_with("first-time-marker must be non-empty"));
        assert_eq!(err.span, Some(10..27));
    }
}
