use std::path::{Path, PathBuf};

use snapbox::{
    Assert, Data,
    cmd::{Command, OutputAssert, cargo_bin},
};
use tempfile::TempDir;

use crate::helpers::{assert_files_match, commit, copy_dir_contents, init, tag};

/// A directory holding `in/` (copied to the working directory), and what to expect afterward:
/// `stdout.log`, `stderr.log`, `out/` (files which must match afterward), and
/// `dryrun_stdout.log` (run again with `--dry-run`, which must not change any files).
pub struct TestCase {
    file_name: &'static str,
    git: &'static [GitCommand],
    env: Vec<(&'static str, &'static str)>,
    failure: bool,
}

impl TestCase {
    /// Create a new `TestCase`. `file_name` should be an invocation of `file!()`.
    pub const fn new(file_name: &'static str) -> Self {
        Self {
            file_name,
            git: &[],
            env: Vec::new(),
            failure: false,
        }
    }

    pub const fn git(mut self, commands: &'static [GitCommand]) -> Self {
        self.git = commands;
        self
    }

    pub fn env(mut self, key: &'static str, value: &'static str) -> Self {
        self.env.push((key, value));
        self
    }

    /// Expect the command to exit with an error.
    pub const fn fails(mut self) -> Self {
        self.failure = true;
        self
    }

    /// Set up a new temporary directory with the contents of the `in` directory (if any).
    /// Initialize a git repository and run the commands in `git`.
    pub fn arrange(&self) -> TempDir {
        let working_dir = tempfile::tempdir().unwrap();
        let path = working_dir.path();

        let in_dir = self.in_dir();
        if in_dir.exists() {
            copy_dir_contents(&in_dir, path);
        }

        init(path);
        for command in self.git {
            match command {
                GitCommand::Commit { message, author } => commit(path, message, author),
                GitCommand::Tag(name) => tag(path, name),
            }
        }

        working_dir
    }

    fn command(&self, working_dir: &Path, args: &[&str]) -> Command {
        let mut command = Command::new(cargo_bin!("relnotes"))
            .current_dir(working_dir)
            .env("NO_COLOR", "1")
            .env("NO_GRAPHICS", "1")
            .env_remove("GITHUB_TOKEN")
            .with_assert(Assert::new().action_env("SNAPSHOTS"))
            .args(args);
        for (key, value) in &self.env {
            command = command.env(key, value);
        }
        command
    }

    /// Run `relnotes` with `args` and check everything the data directory describes.
    pub fn run(self, args: &[&str]) {
        let data_path = self.data_path();

        let working_dir = self.arrange();
        let output = self.command(working_dir.path(), args).assert();
        let output = if self.failure {
            output.failure()
        } else {
            output.success()
        };
        Self::assert_output(output, &data_path, "stdout.log", "stderr.log");
        let out_dir = data_path.join("out");
        if out_dir.exists() {
            assert_files_match(&out_dir, working_dir.path());
        }

        let dry_run_stdout = data_path.join("dryrun_stdout.log");
        if dry_run_stdout.exists() {
            let working_dir = self.arrange();
            let mut dry_run_args = args.to_vec();
            dry_run_args.push("--dry-run");
            let output = self.command(working_dir.path(), &dry_run_args).assert();
            let output = if self.failure {
                output.failure()
            } else {
                output.success()
            };
            Self::assert_output(
                output,
                &data_path,
                "dryrun_stdout.log",
                "dryrun_stderr.log",
            );
            let in_dir = self.in_dir();
            if in_dir.exists() {
                assert_files_match(&in_dir, working_dir.path());
            }
        }
    }

    fn assert_output(output: OutputAssert, data_path: &Path, stdout: &str, stderr: &str) {
        let stdout_file = data_path.join(stdout);
        let expected = if stdout_file.exists() {
            Data::read_from(&stdout_file, None)
        } else {
            "".into()
        };
        let output = output.stdout_eq(expected);
        let stderr_file = data_path.join(stderr);
        if stderr_file.exists() {
            output.stderr_eq(Data::read_from(&stderr_file, None));
        }
    }

    /// `file!()` may be relative to the workspace, so find it from this crate's `tests` directory.
    fn data_path(&self) -> PathBuf {
        let in_tests: PathBuf = Path::new(self.file_name)
            .components()
            .skip_while(|component| component.as_os_str() != "tests")
            .collect();
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join(in_tests)
            .parent()
            .unwrap()
            .to_path_buf()
    }

    fn in_dir(&self) -> PathBuf {
        self.data_path().join("in")
    }
}

#[derive(Clone, Copy, Debug)]
pub enum GitCommand {
    Commit {
        message: &'static str,
        author: &'static str,
    },
    Tag(&'static str),
}
