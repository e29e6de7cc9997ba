//! Read-only access to history through the system `git` binary.
//!
//! Output of every command is returned as an opaque text stream; parsing
//! happens in [`super::commits`] and [`super::numstat`].

use std::path::PathBuf;
use std::process::Command;

use tracing::debug;

use crate::error::GitError;

use super::numstat::COMMIT_MARKER_FORMAT;

/// Source of raw log, numstat and ref text.
///
/// Author filters are a case-sensitive substring test against git's
/// `Name <email>` author header, so an author query of `"an"` matches both
/// `Ana` and `Anand`. Reports may therefore include commits by more than
/// one person.
#[cfg_attr(test, mockall::automock)]
pub trait LogSource {
    /// All commits reachable from HEAD, no author filter.
    fn full_log(&self, format: &str) -> Result<String, GitError>;

    /// Commits whose author header contains `author`.
    fn author_log(&self, author: &str, format: &str, date_format: &str)
    -> Result<String, GitError>;

    /// `added removed path` lines for the author's commits, no commit boundaries.
    fn numstat(&self, author: &str) -> Result<String, GitError>;

    /// Same as [`LogSource::numstat`], with a marker line before each
    /// commit's file lines (see [`super::numstat::group_by_commit`]).
    fn author_numstat_by_commit(&self, author: &str) -> Result<String, GitError>;

    /// Numstat lines for exactly one commit.
    fn show_numstat(&self, hash: &str) -> Result<String, GitError>;

    /// The author's commits reachable from `reference`; fails if the ref
    /// does not exist.
    fn ref_log(&self, reference: &str, author: &str, format: &str) -> Result<String, GitError>;
}

/// [`LogSource`] backed by `git` subprocesses run inside `workdir`.
#[derive(Debug, Clone)]
pub struct GitCli {
    workdir: PathBuf,
}

impl GitCli {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }

    /// Check that a `git` executable is on PATH.
    pub fn check_installed() -> Result<(), GitError> {
        which::which("git")
            .map(|_| ())
            .map_err(|_| GitError::NotInstalled)
    }

    /// Run a git command and return its stdout.
    fn run_git(&self, args: &[&str], operation: &str) -> Result<String, GitError> {
        debug!("git {}", args.join(" "));

        let output = Command::new("git")
            .current_dir(&self.workdir)
            .args(args)
            .output()
            .map_err(|source| GitError::SpawnFailed {
                operation: operation.to_string(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(GitError::NonZeroExit {
                operation: operation.to_string(),
                code: output.status.code().unwrap_or(-1),
                stderr: stderr.trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

fn author_arg(author: &str) -> String {
    format!("--author={author}")
}

fn pretty_arg(format: &str) -> String {
    format!("--pretty=format:{format}")
}

impl LogSource for GitCli {
    fn full_log(&self, format: &str) -> Result<String, GitError> {
        self.run_git(&["log", &pretty_arg(format)], "log")
    }

    fn author_log(
        &self,
        author: &str,
        format: &str,
        date_format: &str,
    ) -> Result<String, GitError> {
        let date = format!("--date={date_format}");
        self.run_git(
            &[
                "log",
                "--fixed-strings",
                &author_arg(author),
                &pretty_arg(format),
                &date,
            ],
            "log --author",
        )
    }

    fn numstat(&self, author: &str) -> Result<String, GitError> {
        self.run_git(
            &[
                "log",
                "--fixed-strings",
                &author_arg(author),
                "--pretty=tformat:",
                "--numstat",
            ],
            "log --numstat",
        )
    }

    fn author_numstat_by_commit(&self, author: &str) -> Result<String, GitError> {
        let pretty = format!("--pretty=tformat:{COMMIT_MARKER_FORMAT}%H");
        self.run_git(
            &[
                "log",
                "--fixed-strings",
                &author_arg(author),
                &pretty,
                "--numstat",
            ],
            "log --numstat (per commit)",
        )
    }

    fn show_numstat(&self, hash: &str) -> Result<String, GitError> {
        self.run_git(
            &["show", "--numstat", "--pretty=format:", hash],
            &format!("show {hash}"),
        )
    }

    fn ref_log(&self, reference: &str, author: &str, format: &str) -> Result<String, GitError> {
        self.run_git(
            &[
                "log",
                "--fixed-strings",
                &author_arg(author),
                &pretty_arg(format),
                reference,
                "--",
            ],
            &format!("log {reference}"),
        )
    }
}
