//! Shared harness for CLI black-box tests: each test gets an isolated
//! working directory and database via the FITSCHED_DATABASE_PATH override.

use assert_cmd::assert::Assert;
use assert_cmd::Command;
use tempfile::TempDir;

pub struct CliTestHarness {
    temp: TempDir,
}

impl CliTestHarness {
    pub fn new() -> Self {
        Self {
            temp: tempfile::tempdir().expect("Failed to create temp directory"),
        }
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("fitsched").expect("binary exists");
        cmd.current_dir(self.temp.path());
        cmd.env(
            "FITSCHED_DATABASE_PATH",
            self.temp.path().join("test.db").to_string_lossy().to_string(),
        );
        cmd.env("FITSCHED_DEFAULT_TIMEZONE", "UTC");
        cmd
    }

    pub fn run_success(&self, args: &[&str]) -> Assert {
        self.cmd().args(args).assert().success()
    }

    pub fn run_failure(&self, args: &[&str]) -> Assert {
        self.cmd().args(args).assert().failure()
    }

    /// Runs a command expected to succeed and returns its decolored stdout.
    pub fn stdout_of(&self, args: &[&str]) -> String {
        let output = self.cmd().args(args).output().expect("command runs");
        assert!(
            output.status.success(),
            "command {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        strip_ansi(&String::from_utf8_lossy(&output.stdout))
    }
}

/// Drops ANSI styling sequences so IDs can be parsed out of styled output.
pub fn strip_ansi(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars();
    while let Some(c) = chars.next() {
        if c == '\u{1b}' {
            for esc in chars.by_ref() {
                if esc.is_ascii_alphabetic() {
                    break;
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Finds the first UUID-shaped token in decolored command output.
pub fn extract_id(output: &str) -> String {
    output
        .split_whitespace()
        .find(|token| uuid::Uuid::parse_str(token).is_ok())
        .unwrap_or_else(|| panic!("no UUID in output: {output}"))
        .to_string()
}
