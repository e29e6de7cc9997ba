//! Main-line versus feature-branch classification.

use std::collections::HashSet;

use serde::Serialize;
use tracing::debug;

use crate::error::GitError;
use crate::git::commits::CommitRecord;
use crate::git::source::LogSource;

/// Log format that yields one full hash per line.
pub const HASH_ONLY: &str = "%H";

/// Commits split by reachability from the main-line ref.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BranchPartition {
    pub main_commits: Vec<CommitRecord>,
    pub non_main_commits: Vec<CommitRecord>,
}

/// Hashes of the author's commits reachable from the first ref in `refs`
/// that resolves.
pub fn main_branch_hashes<S: LogSource + ?Sized>(
    source: &S,
    author: &str,
    refs: &[String],
) -> Result<HashSet<String>, GitError> {
    let mut last_error = None;

    for reference in refs {
        match source.ref_log(reference, author, HASH_ONLY) {
            Ok(raw) => {
                let hashes: HashSet<String> = raw
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .map(str::to_string)
                    .collect();
                debug!("{} commit(s) reachable from {}", hashes.len(), reference);
                return Ok(hashes);
            }
            Err(e) => {
                debug!("Ref {} did not resolve: {}", reference, e);
                last_error = Some(e);
            }
        }
    }

    Err(GitError::MainRefNotFound {
        refs: refs.to_vec(),
        last_error: Box::new(last_error.unwrap_or(GitError::NonZeroExit {
            operation: "log".to_string(),
            code: -1,
            stderr: "no main branch refs configured".to_string(),
        })),
    })
}

/// Split `commits` by membership in `main_hashes`, keeping order.
pub fn partition(commits: &[CommitRecord], main_hashes: &HashSet<String>) -> BranchPartition {
    let (main_commits, non_main_commits): (Vec<_>, Vec<_>) = commits
        .iter()
        .cloned()
        .partition(|commit| main_hashes.contains(&commit.hash));

    BranchPartition {
        main_commits,
        non_main_commits,
    }
}
