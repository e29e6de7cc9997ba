//! Commit log line parsing and conventional commit classification.

use std::sync::LazyLock;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Date layout of the `--date=short` log field.
pub const DATE_LAYOUT: &str = "%Y-%m-%d";

/// `--date` value matching [`DATE_LAYOUT`].
pub const DATE_FORMAT_ARG: &str = "short";

/// Log format for the 3-field layout: hash, date, subject.
pub const HASH_DATE_SUBJECT: &str = "%H %cd %s";

/// Log format for the 4-field layout: hash, date, author email, subject.
pub const HASH_DATE_AUTHOR_SUBJECT: &str = "%H %cd %ae %s";

/// Number of hash characters shown to humans.
pub const SHORT_HASH_LEN: usize = 7;

/// Conventional commit types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitType {
    Feat,
    Fix,
    Docs,
    Style,
    Refactor,
    Perf,
    Test,
    Build,
    Ci,
    Chore,
    Revert,
}

impl CommitType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommitType::Feat => "feat",
            CommitType::Fix => "fix",
            CommitType::Docs => "docs",
            CommitType::Style => "style",
            CommitType::Refactor => "refactor",
            CommitType::Perf => "perf",
            CommitType::Test => "test",
            CommitType::Build => "build",
            CommitType::Ci => "ci",
            CommitType::Chore => "chore",
            CommitType::Revert => "revert",
        }
    }
}

impl std::str::FromStr for CommitType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "feat" => Ok(Self::Feat),
            "fix" => Ok(Self::Fix),
            "docs" => Ok(Self::Docs),
            "style" => Ok(Self::Style),
            "refactor" => Ok(Self::Refactor),
            "perf" => Ok(Self::Perf),
            "test" => Ok(Self::Test),
            "build" => Ok(Self::Build),
            "ci" => Ok(Self::Ci),
            "chore" => Ok(Self::Chore),
            "revert" => Ok(Self::Revert),
            _ => Err(format!("Unknown commit type: {}", s)),
        }
    }
}

impl std::fmt::Display for CommitType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// type(scope)!: description, scope and ! optional, space before the colon tolerated
static CONVENTIONAL: LazyLock<regex_lite::Regex> =
    LazyLock::new(|| regex_lite::Regex::new(r"^(\w+)(?:\s*\(([^)]+)\))?(!)?\s*:\s*").unwrap());

/// Parse the conventional commit type and scope of a subject line.
pub fn parse_commit_message(message: &str) -> (Option<CommitType>, Option<String>) {
    let first_line = message.lines().next().unwrap_or("");

    match CONVENTIONAL.captures(first_line) {
        Some(caps) => {
            let commit_type = caps
                .get(1)
                .and_then(|m| m.as_str().parse::<CommitType>().ok());
            let scope = caps.get(2).map(|m| m.as_str().trim().to_string());
            (commit_type, scope)
        }
        None => (None, None),
    }
}

/// One commit parsed from a log line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitRecord {
    pub hash: String,
    /// Author email for the 4-field layout, empty for the 3-field layout.
    pub author: String,
    pub date: NaiveDate,
    pub message: String,
}

impl CommitRecord {
    /// First seven characters of the hash (the whole hash if shorter).
    pub fn short_hash(&self) -> &str {
        self.hash.get(..SHORT_HASH_LEN).unwrap_or(&self.hash)
    }

    pub fn commit_type(&self) -> Option<CommitType> {
        parse_commit_message(&self.message).0
    }
}

/// Split `line` on whitespace into at most `n` fields; the last field keeps
/// the rest of the line with its internal spacing.
///
/// A separator after field `n - 1` opens the last field even when nothing
/// follows it, so `hash date ` yields an empty subject.
fn split_fields(line: &str, n: usize) -> Vec<&str> {
    let mut fields = Vec::with_capacity(n);
    let mut rest = line.trim_start();

    while fields.len() + 1 < n {
        match rest.find(char::is_whitespace) {
            Some(idx) => {
                fields.push(&rest[..idx]);
                rest = rest[idx..].trim_start();
            }
            None => {
                if !rest.is_empty() {
                    fields.push(rest);
                }
                return fields;
            }
        }
    }
    fields.push(rest.trim_end());
    fields
}

/// Parse one log line laid out as `hash date [author] message`.
///
/// Returns `None` when the line has fewer than `field_count` fields or its
/// date is not `YYYY-MM-DD`.
pub fn parse_log_line(line: &str, field_count: usize) -> Option<CommitRecord> {
    if field_count < 3 {
        return None;
    }

    let fields = split_fields(line, field_count);
    if fields.len() < field_count {
        return None;
    }

    let date = NaiveDate::parse_from_str(fields[1], DATE_LAYOUT).ok()?;
    let (author, message) = if field_count >= 4 {
        (fields[2], fields[field_count - 1])
    } else {
        ("", fields[2])
    };

    Some(CommitRecord {
        hash: fields[0].to_string(),
        author: author.to_string(),
        date,
        message: message.to_string(),
    })
}

/// Parse every non-empty line of `raw`, skipping malformed ones.
pub fn parse_log_lines(raw: &str, field_count: usize) -> Vec<CommitRecord> {
    let mut skipped = 0usize;
    let records: Vec<CommitRecord> = raw
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| {
            let record = parse_log_line(line, field_count);
            if record.is_none() {
                skipped += 1;
            }
            record
        })
        .collect();

    if skipped > 0 {
        debug!("Skipped {} malformed log line(s)", skipped);
    }
    records
}
