use crate::helpers::TestCase;

#[test]
fn missing_file() {
    TestCase::new(file!()).fails().run(&["show", "doc/release/9.9.9-notes.rst"]);
}
