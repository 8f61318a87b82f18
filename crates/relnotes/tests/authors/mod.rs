use crate::helpers::GitCommand::{self, Commit, Tag};

mod bad_revision;
mod configured;
mod history;

/// Alice contributed before 1.0.0, everyone else is new. Bob's personal email is mapped to his
/// name by `.mailmap`, and Carol only appears in a trailer.
pub const HISTORY: &[GitCommand] = &[
    Commit {
        message: "Initial commit",
        author: "Alice Old <alice@example.com>",
    },
    Tag("v1.0.0"),
    Commit {
        message: "BUG: fix a crash",
        author: "Alice Old <alice@example.com>",
    },
    Commit {
        message: "ENH: add an option",
        author: "bob <bob@personal.example>",
    },
    Commit {
        message: "MAINT: bump a dependency",
        author: "dependabot[bot] <bot@example.com>",
    },
    Commit {
        message: "BUG: pair on a fix\n\nCo-authored-by: Carol Coauthor <carol@example.com>",
        author: "Bob New <bob@example.com>",
    },
];
