use std::{cmp::Ordering, fmt::Display, str::FromStr};

#[cfg(feature = "miette")]
use miette::Diagnostic;
use serde::{Serialize, Serializer};

/// The version of a release, like `1.5.2` or `1.6.0rc1`.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub pre: Option<Prerelease>,
}

impl Version {
    #[must_use]
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            pre: None,
        }
    }

    #[must_use]
    pub const fn with_pre(self, pre: Prerelease) -> Self {
        Self {
            pre: Some(pre),
            ..self
        }
    }

    /// A point release only contains fixes relative to the release before it.
    #[must_use]
    pub const fn is_point_release(&self) -> bool {
        self.patch > 0 && self.pre.is_none()
    }

    /// The release that a point release should be compared against, e.g. `1.5.1` for `1.5.2`.
    #[must_use]
    pub const fn previous_point_release(&self) -> Option<Self> {
        if self.is_point_release() {
            Some(Self::new(self.major, self.minor, self.patch - 1))
        } else {
            None
        }
    }

    const fn triple(&self) -> (u64, u64, u64) {
        (self.major, self.minor, self.patch)
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.triple().cmp(&other.triple()) {
            Ordering::Equal => match (&self.pre, &other.pre) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(pre), Some(other_pre)) => pre.cmp(other_pre),
            },
            ordering => ordering,
        }
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl FromStr for Version {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let without_prefix = trimmed.strip_prefix('v').unwrap_or(trimmed);
        let split_at = without_prefix
            .find(|c: char| !c.is_ascii_digit() && c != '.')
            .unwrap_or(without_prefix.len());
        let (numbers, pre) = without_prefix.split_at(split_at);
        let [major, minor, patch]: [u64; 3] = numbers
            .split('.')
            .map(|part| part.parse::<u64>().map_err(|_| Error(s.to_string())))
            .collect::<Result<Vec<_>, _>>()?
            .try_into()
            .map_err(|_| Error(s.to_string()))?;
        let version = Self::new(major, minor, patch);
        if pre.is_empty() {
            Ok(version)
        } else {
            let pre = Prerelease::from_str(pre).map_err(|_| Error(s.to_string()))?;
            Ok(version.with_pre(pre))
        }
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(pre) = &self.pre {
            write!(f, "{pre}")?;
        }
        Ok(())
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "miette", derive(Diagnostic))]
#[error("Found invalid release version {0}")]
#[cfg_attr(
    feature = "miette",
    diagnostic(
        code(version),
        help(
            "Release versions have three numeric parts and an optional pre-release suffix, like 1.5.2 or 1.6.0rc1"
        )
    )
)]
pub struct Error(String);

/// A pre-release suffix like `rc1`.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Prerelease {
    pub label: Label,
    pub number: u64,
}

impl Prerelease {
    #[must_use]
    pub const fn new(label: Label, number: u64) -> Self {
        Self { label, number }
    }
}

impl FromStr for Prerelease {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let split_at = s
            .find(|c: char| c.is_ascii_digit())
            .ok_or_else(|| Error(s.to_string()))?;
        let (label, number) = s.split_at(split_at);
        let label = match label {
            "a" => Label::Alpha,
            "b" => Label::Beta,
            "rc" => Label::ReleaseCandidate,
            _ => return Err(Error(s.to_string())),
        };
        let number = number.parse().map_err(|_| Error(s.to_string()))?;
        Ok(Self { label, number })
    }
}

impl Display for Prerelease {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.label, self.number)
    }
}

/// Ordered from least to most stable.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Label {
    Alpha,
    Beta,
    ReleaseCandidate,
}

impl Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Alpha => "a",
            Self::Beta => "b",
            Self::ReleaseCandidate => "rc",
        })
    }
}
