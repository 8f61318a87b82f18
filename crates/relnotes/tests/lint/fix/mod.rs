use crate::helpers::TestCase;

/// `--fix` corrects the underline and the number of contributors, then finds nothing else.
#[test]
fn fix() {
    TestCase::new(file!()).run(&["lint", "--fix", "notes.rst"]);
}
