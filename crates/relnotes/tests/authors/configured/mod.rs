use crate::{authors::HISTORY, helpers::TestCase};

/// Without `.mailmap`, Bob's two emails are two names.
#[test]
fn configured() {
    TestCase::new(file!())
        .git(HISTORY)
        .run(&["authors", "v1.0.0"]);
}
