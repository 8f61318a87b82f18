use crate::{authors::HISTORY, helpers::TestCase};

#[test]
fn forced() {
    TestCase::new(file!())
        .git(HISTORY)
        .run(&["generate", "1.0.1", "--from", "v1.0.0", "--force"]);
}
