use crate::helpers::TestCase;

/// A short underline and the wrong number of contributors are both errors.
#[test]
fn errors() {
    TestCase::new(file!()).fails().run(&["lint", "notes.rst"]);
}
