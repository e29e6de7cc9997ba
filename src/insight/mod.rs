//! Per-author commit analytics.

pub mod branch;
pub mod churn;
pub mod ranking;
pub mod render;
pub mod report;
pub mod stats;

pub use branch::{BranchPartition, main_branch_hashes, partition};
pub use churn::{ChurnBatch, collect_commit_churn};
pub use ranking::{
    CommitChurn, RankedEntry, WeeklyBuckets, iso_week_key, rank_commits, top_entries,
    weekly_buckets,
};
pub use render::render_text;
pub use report::{InsightReport, build_insight, commit_type_mix};
pub use stats::{DimensionStats, RepositoryStats, StatisticGroup, aggregate, from_numstat};
