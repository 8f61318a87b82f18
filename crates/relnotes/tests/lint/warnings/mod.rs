use crate::helpers::TestCase;

/// Records out of order are only a warning, so linting still succeeds.
#[test]
fn warnings() {
    TestCase::new(file!()).run(&["lint", "notes.rst"]);
}
