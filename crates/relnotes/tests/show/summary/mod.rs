use crate::helpers::TestCase;

#[test]
fn summary() {
    TestCase::new(file!()).run(&["show", "notes.rst"]);
}
