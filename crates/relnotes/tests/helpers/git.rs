use std::{path::Path, process::Command};

fn git(path: &Path, args: &[&str]) {
    let output = Command::new("git")
        .args(args)
        .current_dir(path)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "{}",
        String::from_utf8_lossy(&output.stderr)
    );
}

/// Create a Git repo in `path` with some fake config.
pub fn init(path: &Path) {
    git(path, &["init", "--initial-branch=main"]);
    git(path, &["config", "user.email", "fake@relnotes.dev"]);
    git(path, &["config", "user.name", "Fake Committer"]);
    git(path, &["config", "commit.gpgsign", "false"]);
}

/// Create an empty commit by `author`, formatted like `Name <email>`.
pub fn commit(path: &Path, message: &str, author: &str) {
    git(
        path,
        &["commit", "--allow-empty", "-m", message, "--author", author],
    );
}

/// Create a tag with `label` in the Git repo which exists in `path`.
pub fn tag(path: &Path, label: &str) {
    git(path, &["tag", label]);
}
