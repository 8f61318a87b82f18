use crate::helpers::TestCase;

/// A file without a title can't be linted.
#[test]
fn unparseable() {
    TestCase::new(file!()).fails().run(&["lint", "notes.rst"]);
}
