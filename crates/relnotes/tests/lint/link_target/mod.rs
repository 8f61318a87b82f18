use crate::helpers::TestCase;

/// Links must point into the configured repository.
#[test]
fn link_target() {
    TestCase::new(file!()).fails().run(&["lint", "notes.rst"]);
}
