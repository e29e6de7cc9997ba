//! Assembles a per-author insight report from a [`LogSource`].

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::InsightConfig;
use crate::error::GitError;
use crate::git::commits::{
    CommitRecord, DATE_FORMAT_ARG, HASH_DATE_AUTHOR_SUBJECT, parse_log_lines,
};
use crate::git::source::LogSource;
use crate::insight::branch::{BranchPartition, HASH_ONLY, main_branch_hashes, partition};
use crate::insight::churn::collect_commit_churn;
use crate::insight::ranking::{
    CommitChurn, RankedEntry, WeeklyBuckets, rank_commits, top_entries, weekly_buckets,
};
use crate::insight::stats::{RepositoryStats, from_numstat};

/// Key used in the commit-type mix for non-conventional subjects.
pub const OTHER_COMMIT_TYPE: &str = "other";

/// Everything known about one author's history.
#[derive(Debug, Clone, Serialize)]
pub struct InsightReport {
    pub author: String,
    /// Author commits, most recent first.
    pub commits: Vec<CommitRecord>,
    pub stats: RepositoryStats,
    pub branches: BranchPartition,
    /// Churn of every commit, in log order.
    pub commit_churn: Vec<CommitChurn>,
    pub top_commits: Vec<CommitChurn>,
    pub top_files: Vec<RankedEntry>,
    pub top_directories: Vec<RankedEntry>,
    pub weekly: WeeklyBuckets,
    /// Commit count per conventional commit type.
    pub commit_types: BTreeMap<String, u64>,
    /// Commits reachable from HEAD, all authors.
    pub repository_commits: u64,
}

impl InsightReport {
    /// Author commits as a fraction of the whole history, 0.0 when empty.
    pub fn repository_share(&self) -> f64 {
        if self.repository_commits == 0 {
            return 0.0;
        }
        self.commits.len() as f64 / self.repository_commits as f64
    }
}

/// Count commits by conventional type; unrecognised subjects go under
/// [`OTHER_COMMIT_TYPE`].
pub fn commit_type_mix(commits: &[CommitRecord]) -> BTreeMap<String, u64> {
    let mut mix = BTreeMap::new();
    for commit in commits {
        let key = commit
            .commit_type()
            .map(|t| t.as_str())
            .unwrap_or(OTHER_COMMIT_TYPE);
        *mix.entry(key.to_string()).or_insert(0) += 1;
    }
    mix
}

/// Build the insight report for every commit whose author header contains
/// `author`.
///
/// Failure to resolve any main-line ref is logged and treated as an empty
/// main branch; every other git failure is returned.
pub fn build_insight<S: LogSource + ?Sized>(
    source: &S,
    author: &str,
    config: &InsightConfig,
) -> Result<InsightReport, GitError> {
    info!("Building insight report for author matching {:?}", author);

    let raw_log = source.author_log(author, HASH_DATE_AUTHOR_SUBJECT, DATE_FORMAT_ARG)?;
    let commits = parse_log_lines(&raw_log, 4);
    debug!("Parsed {} commit(s)", commits.len());

    let mut stats = from_numstat(&source.numstat(author)?);

    let churn = collect_commit_churn(source, author, &commits)?;
    stats.total_commits_distinct = Some(churn.distinct_commits);
    let top_commits = rank_commits(churn.commits.clone(), config.top_commits);

    let top_files = top_entries(&stats.by_file, config.top_files);
    let top_directories = top_entries(&stats.by_directory, config.top_directories);

    let weekly = weekly_buckets(&commits);

    let main_hashes = match main_branch_hashes(source, author, &config.main_refs) {
        Ok(hashes) => hashes,
        Err(e) => {
            warn!("{}. Treating every commit as off the main branch", e);
            HashSet::new()
        }
    };
    let branches = partition(&commits, &main_hashes);

    let commit_types = commit_type_mix(&commits);

    let repository_commits = source
        .full_log(HASH_ONLY)?
        .lines()
        .filter(|line| !line.trim().is_empty())
        .count() as u64;

    Ok(InsightReport {
        author: author.to_string(),
        commits,
        stats,
        branches,
        commit_churn: churn.commits,
        top_commits,
        top_files,
        top_directories,
        weekly,
        commit_types,
        repository_commits,
    })
}
