use crate::{authors::HISTORY, helpers::TestCase};

#[test]
fn history() {
    TestCase::new(file!())
        .git(HISTORY)
        .run(&["authors", "v1.0.0", "HEAD"]);
}
