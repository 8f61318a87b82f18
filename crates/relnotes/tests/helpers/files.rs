use std::path::Path;

pub fn copy_dir_contents(source: &Path, target: &Path) {
    for entry in source.read_dir().expect("read_dir call failed") {
        let entry = entry.expect("DirEntry");
        let path = entry.path();
        let target = target.join(path.file_name().unwrap());
        if path.is_dir() {
            std::fs::create_dir_all(&target).expect("create_dir_all call failed");
            copy_dir_contents(&path, &target);
        } else {
            std::fs::copy(&path, &target).expect("copy call failed");
        }
    }
}

/// Assert that every file under `expected` has the same contents under `actual`.
pub fn assert_files_match(expected: &Path, actual: &Path) {
    for entry in expected.read_dir().expect("read_dir call failed") {
        let entry = entry.expect("DirEntry");
        let path = entry.path();
        let actual = actual.join(path.file_name().unwrap());
        if path.is_dir() {
            assert_files_match(&path, &actual);
        } else {
            let expected_contents = std::fs::read_to_string(&path).unwrap();
            let actual_contents = std::fs::read_to_string(&actual)
                .unwrap_or_else(|err| panic!("{}: {err}", actual.display()));
            pretty_assertions::assert_eq!(
                expected_contents,
                actual_contents,
                "{}",
                actual.display()
            );
        }
    }
}
