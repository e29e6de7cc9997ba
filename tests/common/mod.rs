//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::path::Path;

use chrono::NaiveDate;
use git2::{Oid, Repository, Signature, Time};

/// Seconds since the epoch at noon UTC on `date` (`YYYY-MM-DD`).
fn epoch_at_noon(date: &str) -> i64 {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .expect("Invalid test date")
        .and_hms_opt(12, 0, 0)
        .expect("Invalid time")
        .and_utc()
        .timestamp()
}

/// A test git repository builder for integration tests.
///
/// History starts on `main`; [`TestRepo::switch_branch`] moves HEAD to a
/// new branch at the current tip.
pub struct TestRepo {
    pub dir: tempfile::TempDir,
    pub repo: Repository,
}

impl TestRepo {
    /// Create a new empty git repository in a temp directory.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let repo = Repository::init(dir.path()).expect("Failed to init git repo");
        repo.set_head("refs/heads/main").expect("Failed to point HEAD at main");
        Self { dir, repo }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Commit `files` (path, content) as `name <email>` dated `date`.
    pub fn commit_as(
        &self,
        name: &str,
        email: &str,
        date: &str,
        message: &str,
        files: &[(&str, &str)],
    ) -> Oid {
        let sig = Signature::new(name, email, &Time::new(epoch_at_noon(date), 0))
            .expect("Failed to create signature");

        let mut index = self.repo.index().expect("Failed to get index");
        for (path, content) in files {
            let full = self.dir.path().join(path);
            if let Some(parent) = full.parent() {
                std::fs::create_dir_all(parent).expect("Failed to create directories");
            }
            std::fs::write(&full, content).expect("Failed to write test file");
            index.add_path(Path::new(path)).expect("Failed to add file");
        }
        index.write().expect("Failed to write index");
        let tree_id = index.write_tree().expect("Failed to write tree");
        let tree = self.repo.find_tree(tree_id).expect("Failed to find tree");

        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("Failed to create commit")
    }

    /// Create `name` at the current tip and make it HEAD.
    pub fn switch_branch(&self, name: &str) {
        let tip = self
            .repo
            .head()
            .and_then(|h| h.peel_to_commit())
            .expect("Repository has no commits");
        self.repo.branch(name, &tip, false).expect("Failed to create branch");
        self.repo
            .set_head(&format!("refs/heads/{name}"))
            .expect("Failed to switch branch");
    }

    /// Make `name` HEAD and reset the index and working tree to its tip.
    pub fn checkout(&self, name: &str) {
        self.repo
            .set_head(&format!("refs/heads/{name}"))
            .expect("Failed to switch branch");
        self.reset_to_head();
    }

    /// Merge `branch` into HEAD with a two-parent commit, even when a fast
    /// forward would do.
    pub fn merge_no_ff(&self, name: &str, email: &str, date: &str, message: &str, branch: &str) -> Oid {
        let sig = Signature::new(name, email, &Time::new(epoch_at_noon(date), 0))
            .expect("Failed to create signature");

        let ours = self
            .repo
            .head()
            .and_then(|h| h.peel_to_commit())
            .expect("Repository has no commits");
        let theirs = self
            .repo
            .find_branch(branch, git2::BranchType::Local)
            .and_then(|b| b.get().peel_to_commit())
            .expect("No such branch");

        let mut merged = self
            .repo
            .merge_commits(&ours, &theirs, None)
            .expect("Failed to merge");
        assert!(!merged.has_conflicts(), "Test merge must be conflict free");
        let tree_id = merged.write_tree_to(&self.repo).expect("Failed to write tree");
        let tree = self.repo.find_tree(tree_id).expect("Failed to find tree");

        let oid = self
            .repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &[&ours, &theirs])
            .expect("Failed to create merge commit");
        self.reset_to_head();
        oid
    }

    fn reset_to_head(&self) {
        let tree = self
            .repo
            .head()
            .and_then(|h| h.peel_to_tree())
            .expect("Repository has no commits");
        let mut index = self.repo.index().expect("Failed to get index");
        index.read_tree(&tree).expect("Failed to read tree");
        index.write().expect("Failed to write index");
        self.repo
            .checkout_head(Some(git2::build::CheckoutBuilder::new().force().remove_untracked(true)))
            .expect("Failed to check out HEAD");
    }

    /// Rename `main` to `master`, keeping HEAD on it when it was there.
    pub fn rename_main_to_master(&self) {
        let mut branch = self
            .repo
            .find_branch("main", git2::BranchType::Local)
            .expect("No main branch");
        branch.rename("master", false).expect("Failed to rename branch");
    }
}

/// Lines of `n` numbered rows, each ending in a newline.
pub fn lines(n: usize) -> String {
    (1..=n).map(|i| format!("line {i}\n")).collect()
}
