//! Point-release notes in reStructuredText: reading them, checking them, and writing them.

pub mod lint;
mod model;
pub mod parse;
pub mod render;
#[cfg(test)]
mod test_fixtures;
pub mod version;

pub use model::{
    Authors, ChangeKind, ChangeRecord, Contributor, Release, ReleaseNotes, Section, Span,
};
pub use parse::{Document, HeadingRole, ParseError, ParseOptions};
pub use version::Version;
