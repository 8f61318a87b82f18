use crate::{authors::HISTORY, helpers::TestCase};

#[test]
fn no_project() {
    TestCase::new(file!())
        .git(HISTORY)
        .fails()
        .run(&["generate", "1.0.1", "--from", "v1.0.0"]);
}
