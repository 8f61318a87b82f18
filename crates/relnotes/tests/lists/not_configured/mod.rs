use crate::helpers::TestCase;

/// Without a `[github]` table there's no milestone to look up, and nothing is requested.
#[test]
fn not_configured() {
    TestCase::new(file!()).fails().run(&["lists", "1.5.2"]);
}
