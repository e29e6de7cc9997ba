//! Top-N rankings and weekly habit buckets.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::git::commits::CommitRecord;
use crate::insight::stats::DimensionStats;

/// Commits grouped by ISO week key (`YYYY-Www`), in log order within a week.
pub type WeeklyBuckets = BTreeMap<String, Vec<CommitRecord>>;

/// One row of a top files/directories list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedEntry {
    pub key: String,
    pub changes: u64,
    pub added: u64,
    pub removed: u64,
}

/// Lines touched by a single commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitChurn {
    pub commit: CommitRecord,
    pub added: u64,
    pub removed: u64,
}

impl CommitChurn {
    pub fn total(&self) -> u64 {
        self.added + self.removed
    }
}

/// Keys of `stats` ordered by change count, highest first.
///
/// Equal counts keep key order.
pub fn top_entries(stats: &DimensionStats, limit: usize) -> Vec<RankedEntry> {
    let mut entries: Vec<RankedEntry> = stats
        .changes()
        .iter()
        .map(|(key, &changes)| RankedEntry {
            key: key.clone(),
            changes,
            added: stats.added().get(key).copied().unwrap_or(0),
            removed: stats.removed().get(key).copied().unwrap_or(0),
        })
        .collect();

    entries.sort_by(|a, b| b.changes.cmp(&a.changes));
    entries.truncate(limit);
    entries
}

/// Commits ordered by `added + removed`, highest first.
///
/// Equal totals keep log order.
pub fn rank_commits(mut churn: Vec<CommitChurn>, limit: usize) -> Vec<CommitChurn> {
    churn.sort_by(|a, b| b.total().cmp(&a.total()));
    churn.truncate(limit);
    churn
}

/// ISO 8601 week key of `date`, e.g. `2024-W11`.
pub fn iso_week_key(date: NaiveDate) -> String {
    date.format("%G-W%V").to_string()
}

pub fn weekly_buckets(commits: &[CommitRecord]) -> WeeklyBuckets {
    let mut buckets = WeeklyBuckets::new();
    for commit in commits {
        buckets
            .entry(iso_week_key(commit.date))
            .or_default()
            .push(commit.clone());
    }
    buckets
}
