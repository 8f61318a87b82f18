use crate::helpers::TestCase;

/// An unknown underline mode in relnotes.toml is reported before anything is linted.
#[test]
fn invalid_config() {
    TestCase::new(file!()).fails().run(&["lint", "notes.rst"]);
}
