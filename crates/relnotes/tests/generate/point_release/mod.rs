use crate::{authors::HISTORY, helpers::TestCase};

/// Without GitHub configured, the lists are left empty and everything else is filled in.
#[test]
fn point_release() {
    TestCase::new(file!())
        .git(HISTORY)
        .run(&["generate", "1.0.1", "--from", "v1.0.0"]);
}
