//! Numstat aggregation into per-extension, per-file and per-directory totals.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::git::numstat::FileDelta;

/// Accumulated count per key (extension, path or directory).
pub type StatisticGroup = BTreeMap<String, u64>;

/// Change, added and removed groups for one dimension.
///
/// The three groups only change together through [`DimensionStats::record`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DimensionStats {
    changes: StatisticGroup,
    added: StatisticGroup,
    removed: StatisticGroup,
}

impl DimensionStats {
    pub fn record(&mut self, key: &str, added: u64, removed: u64) {
        *self.changes.entry(key.to_string()).or_insert(0) += 1;
        *self.added.entry(key.to_string()).or_insert(0) += added;
        *self.removed.entry(key.to_string()).or_insert(0) += removed;
    }

    pub fn changes(&self) -> &StatisticGroup {
        &self.changes
    }

    pub fn added(&self) -> &StatisticGroup {
        &self.added
    }

    pub fn removed(&self) -> &StatisticGroup {
        &self.removed
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

/// Totals over an author's numstat output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RepositoryStats {
    pub total_added: u64,
    pub total_removed: u64,
    /// Number of parsed numstat lines. A commit touching several files is
    /// counted once per file.
    pub total_commits: u64,
    /// Number of distinct commits, when known.
    pub total_commits_distinct: Option<u64>,
    pub by_extension: DimensionStats,
    pub by_file: DimensionStats,
    pub by_directory: DimensionStats,
}

impl RepositoryStats {
    /// Fold one file delta into every total and group.
    pub fn record(&mut self, delta: &FileDelta) {
        self.total_commits += 1;
        self.total_added += delta.lines_added;
        self.total_removed += delta.lines_removed;

        let (added, removed) = (delta.lines_added, delta.lines_removed);
        self.by_extension.record(delta.extension(), added, removed);
        self.by_file.record(&delta.path, added, removed);
        self.by_directory.record(delta.directory(), added, removed);
    }
}

/// Aggregate numstat lines. Lines with fewer than three fields are skipped.
pub fn aggregate<'a, I>(lines: I) -> RepositoryStats
where
    I: IntoIterator<Item = &'a str>,
{
    let mut stats = RepositoryStats::default();
    let mut skipped = 0usize;

    for line in lines.into_iter().filter(|l| !l.trim().is_empty()) {
        match FileDelta::parse(line) {
            Some(delta) => stats.record(&delta),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        debug!("Skipped {} numstat line(s) without three fields", skipped);
    }
    stats
}

/// Aggregate a raw numstat text stream.
pub fn from_numstat(raw: &str) -> RepositoryStats {
    aggregate(raw.lines())
}
