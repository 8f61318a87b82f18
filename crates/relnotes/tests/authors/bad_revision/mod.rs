use crate::{authors::HISTORY, helpers::TestCase};

#[test]
fn bad_revision() {
    TestCase::new(file!())
        .git(HISTORY)
        .fails()
        .run(&["authors", "v0.9.0", "HEAD"]);
}
