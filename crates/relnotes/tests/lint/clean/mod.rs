use crate::helpers::TestCase;

/// Lint every file matching a glob, none of which have problems.
#[test]
fn clean() {
    TestCase::new(file!()).run(&["lint", "doc/release/*-notes.rst"]);
}
