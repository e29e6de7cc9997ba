//! Text rendering of an [`InsightReport`].

use std::collections::HashMap;

use crate::insight::ranking::RankedEntry;
use crate::insight::report::InsightReport;

const BOLD: &str = "\x1b[1m";
const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";

fn heading(lines: &mut Vec<String>, title: &str) {
    lines.push(String::new());
    lines.push(format!("{BOLD}{title}{RESET}"));
}

fn delta(added: u64, removed: u64) -> String {
    format!("{GREEN}+{added}{RESET} {RED}-{removed}{RESET}")
}

fn ranked(lines: &mut Vec<String>, entries: &[RankedEntry]) {
    if entries.is_empty() {
        lines.push("  (none)".to_string());
    }
    lines.extend(entries.iter().map(|entry| {
        format!(
            "  {:<40} {:>5} changes  {}",
            entry.key,
            entry.changes,
            delta(entry.added, entry.removed)
        )
    }));
}

/// Render the report with ANSI highlighting. Map keys appear in sorted order.
pub fn render_text(report: &InsightReport) -> String {
    let mut lines = Vec::new();
    let stats = &report.stats;

    lines.push(format!("{BOLD}Insight for {YELLOW}{}{RESET}", report.author));

    heading(&mut lines, "Overall");
    lines.push(format!(
        "  Commits: {} ({:.1}% of {} in repository)",
        report.commits.len(),
        report.repository_share() * 100.0,
        report.repository_commits
    ));
    lines.push(format!(
        "  On main branch: {}  Elsewhere: {}",
        report.branches.main_commits.len(),
        report.branches.non_main_commits.len()
    ));
    lines.push(format!("  Lines: {}", delta(stats.total_added, stats.total_removed)));
    lines.push(match stats.total_commits_distinct {
        Some(distinct) => format!(
            "  File changes: {}  Distinct commits: {}",
            stats.total_commits, distinct
        ),
        None => format!("  File changes: {}", stats.total_commits),
    });

    heading(&mut lines, "File changes by type");
    let by_ext = &stats.by_extension;
    for (ext, changes) in by_ext.changes() {
        let added = by_ext.added().get(ext).copied().unwrap_or(0);
        let removed = by_ext.removed().get(ext).copied().unwrap_or(0);
        lines.push(format!(
            "  {:<12} {:>5} changes  {}",
            ext,
            changes,
            delta(added, removed)
        ));
    }

    heading(&mut lines, "Top files");
    ranked(&mut lines, &report.top_files);

    heading(&mut lines, "Top directories");
    ranked(&mut lines, &report.top_directories);

    heading(&mut lines, "Top commits");
    for churn in &report.top_commits {
        lines.push(format!(
            "  {YELLOW}{}{RESET} {} {}  {}",
            churn.commit.short_hash(),
            churn.commit.date,
            delta(churn.added, churn.removed),
            churn.commit.message
        ));
    }

    heading(&mut lines, "Commit types");
    for (kind, count) in &report.commit_types {
        lines.push(format!("  {:<10} {}", kind, count));
    }

    heading(&mut lines, "Commit habits");
    let churn_by_hash: HashMap<&str, (u64, u64)> = report
        .commit_churn
        .iter()
        .map(|c| (c.commit.hash.as_str(), (c.added, c.removed)))
        .collect();
    for (week, commits) in &report.weekly {
        lines.push(format!("  {BOLD}{week}{RESET} ({} commits)", commits.len()));
        for commit in commits {
            let (added, removed) = churn_by_hash
                .get(commit.hash.as_str())
                .copied()
                .unwrap_or((0, 0));
            lines.push(format!(
                "    {YELLOW}{}{RESET} {} {}  {}",
                commit.short_hash(),
                commit.date,
                delta(added, removed),
                commit.message
            ));
        }
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::commits::parse_log_lines;
    use crate::insight::branch::BranchPartition;
    use crate::insight::ranking::{CommitChurn, weekly_buckets};
    use crate::insight::stats::from_numstat;
    use std::collections::BTreeMap;

    fn report() -> InsightReport {
        let commits = parse_log_lines(
            "abcdef0123 2024-01-10 a@x fix: y\n0123456789 2024-01-02 a@x feat: x\n",
            4,
        );
        let commit_churn: Vec<CommitChurn> = commits
            .iter()
            .map(|c| CommitChurn {
                commit: c.clone(),
                added: 4,
                removed: 1,
            })
            .collect();
        let stats = from_numstat("4\t1\tsrc/z.rs\n4\t1\ta.md\n");

        InsightReport {
            author: "Ana".to_string(),
            weekly: weekly_buckets(&commits),
            branches: BranchPartition {
                main_commits: commits[..1].to_vec(),
                non_main_commits: commits[1..].to_vec(),
            },
            top_commits: commit_churn.clone(),
            commit_churn,
            top_files: Vec::new(),
            top_directories: Vec::new(),
            commit_types: BTreeMap::from([("fix".to_string(), 1), ("feat".to_string(), 1)]),
            repository_commits: 4,
            commits,
            stats,
        }
    }

    #[test]
    fn test_sections_present() {
        let text = render_text(&report());
        for section in [
            "Overall",
            "File changes by type",
            "Top files",
            "Top directories",
            "Top commits",
            "Commit types",
            "Commit habits",
        ] {
            assert!(text.contains(section), "missing section {section}");
        }
        assert!(text.contains("50.0% of 4"));
        assert!(text.contains("On main branch: 1  Elsewhere: 1"));
        assert!(text.contains("abcdef0"));
        assert!(!text.contains("abcdef01"));
    }

    #[test]
    fn test_weeks_and_keys_sorted() {
        let text = render_text(&report());

        let w1 = text.find("2024-W01").unwrap();
        let w2 = text.find("2024-W02").unwrap();
        assert!(w1 < w2);

        let types = &text[text.find("Commit types").unwrap()..text.find("Commit habits").unwrap()];
        let feat = types.find("feat").unwrap();
        let fix = types.find("fix").unwrap();
        assert!(feat < fix);

        let md = text.find("  md ").unwrap();
        let rs = text.find("  rs ").unwrap();
        assert!(md < rs);
    }

    #[test]
    fn test_weekly_lines_carry_commit_churn() {
        let mut report = report();
        report.commit_churn[1].added = 9;

        let text = render_text(&report);
        let habits = &text[text.find("Commit habits").unwrap()..];
        assert!(habits.contains("+9"));
        assert_eq!(habits.matches("+4").count(), 1);
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let report = report();
        assert_eq!(render_text(&report), render_text(&report));
    }
}
