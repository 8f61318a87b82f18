use crate::helpers::TestCase;

/// A glob which matches nothing is an error rather than a silent success.
#[test]
fn no_matches() {
    TestCase::new(file!()).fails().run(&["lint", "doc/release/*-notes.rst"]);
}
