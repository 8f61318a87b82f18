use crate::{authors::HISTORY, helpers::TestCase};

/// A release which isn't a point release, described by hand and written somewhere specific.
#[test]
fn custom() {
    TestCase::new(file!()).git(HISTORY).run(&[
        "generate",
        "1.1.0",
        "--from",
        "v1.0.0",
        "--to",
        "HEAD~1",
        "--summary",
        "SciPy 1.1.0 adds an option to everything.",
        "--caveat",
        "Wheels need pip >= 19.3 to install.",
        "--caveat",
        "Python 3.6 is no longer supported.",
        "--output",
        "NOTES.rst",
    ]);
}
