//! commitron - A CLI assistant for commit messages and per-author git insights.
//!
//! # Overview
//!
//! commitron bounds a unified diff to a token budget and asks an
//! OpenAI-compatible completion service for a conventional commit message.
//! It also reads `git log` output for one author and reports line churn,
//! top files and directories, weekly commit habits and main-branch share.

pub mod commit;
pub mod config;
pub mod error;
pub mod git;
pub mod insight;
pub mod llm;
pub mod logging;

// Re-export commonly used types
pub use config::{BudgetConfig, InsightConfig, LlmConfig};
pub use error::{ConfigError, GitError, LlmError};
pub use git::{CommitRecord, CommitType, GitCli, LogSource};
pub use insight::{InsightReport, RepositoryStats, build_insight, render_text};
