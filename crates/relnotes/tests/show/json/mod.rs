use crate::helpers::TestCase;

#[test]
fn json() {
    TestCase::new(file!()).run(&["show", "--json", "notes.rst"]);
}
