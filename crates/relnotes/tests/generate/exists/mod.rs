use crate::{authors::HISTORY, helpers::TestCase};

/// Published release notes aren't replaced without `--force`.
#[test]
fn exists() {
    TestCase::new(file!())
        .git(HISTORY)
        .fails()
        .run(&["generate", "1.0.1", "--from", "v1.0.0"]);
}

