use crate::helpers::TestCase;

/// A file that can't be read is one error, the files after it are still linted.
#[test]
fn unreadable() {
    TestCase::new(file!())
        .fails()
        .run(&["lint", "missing-notes.rst", "notes.rst"]);
}
