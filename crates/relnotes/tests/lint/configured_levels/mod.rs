use crate::helpers::TestCase;

/// relnotes.toml can make a warning into an error.
#[test]
fn configured_levels() {
    TestCase::new(file!()).fails().run(&["lint", "notes.rst"]);
}
