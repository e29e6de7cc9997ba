//! Git history access through the `git` command line.

pub mod commits;
pub mod numstat;
pub mod source;

pub use commits::{CommitRecord, CommitType, parse_commit_message, parse_log_lines};
pub use numstat::{CommitNumstat, FileDelta, group_by_commit, sum_lines};
pub use source::{GitCli, LogSource};
