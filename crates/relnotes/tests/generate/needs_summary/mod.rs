use crate::{authors::HISTORY, helpers::TestCase};

/// Only point releases have a default summary.
#[test]
fn needs_summary() {
    TestCase::new(file!())
        .git(HISTORY)
        .fails()
        .run(&["generate", "1.1.0", "--from", "v1.0.0"]);
}
