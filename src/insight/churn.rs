//! Per-commit line churn from one batched numstat query.

use std::collections::HashMap;

use tracing::debug;

use crate::error::GitError;
use crate::git::commits::CommitRecord;
use crate::git::numstat::{group_by_commit, sum_lines};
use crate::git::source::LogSource;
use crate::insight::ranking::CommitChurn;

/// Churn for each requested commit plus the number of commits the batched
/// query reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChurnBatch {
    pub commits: Vec<CommitChurn>,
    pub distinct_commits: u64,
}

/// Look up added/removed counts for every commit in `commits`.
///
/// Commits absent from the batched output, or reported there without any file
/// lines (merges), are queried one by one with [`LogSource::show_numstat`].
/// The result keeps the order of `commits`.
pub fn collect_commit_churn<S: LogSource + ?Sized>(
    source: &S,
    author: &str,
    commits: &[CommitRecord],
) -> Result<ChurnBatch, GitError> {
    let batch = group_by_commit(&source.author_numstat_by_commit(author)?);
    let distinct_commits = batch.len() as u64;

    // log --numstat prints no file lines for merges; show diffs them against the first parent
    let totals: HashMap<String, (u64, u64)> = batch
        .into_iter()
        .filter(|group| !group.files.is_empty())
        .map(|group| {
            let counts = (group.added(), group.removed());
            (group.hash, counts)
        })
        .collect();

    let mut fallbacks = 0usize;
    let mut churn = Vec::with_capacity(commits.len());
    for commit in commits {
        let (added, removed) = match totals.get(&commit.hash) {
            Some(&counts) => counts,
            None => {
                fallbacks += 1;
                sum_lines(&source.show_numstat(&commit.hash)?)
            }
        };
        churn.push(CommitChurn {
            commit: commit.clone(),
            added,
            removed,
        });
    }

    debug!(
        "Collected churn for {} commit(s), {} via git show",
        churn.len(),
        fallbacks
    );

    Ok(ChurnBatch {
        commits: churn,
        distinct_commits,
    })
}
