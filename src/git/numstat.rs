//! Numstat line parsing.
//!
//! Format: `<added> <removed> <path>`, whitespace separated. Binary files
//! report `-` for both counts; those are read as zero.

/// Extension reported for paths without a `.`.
pub const UNKNOWN_EXTENSION: &str = "unknown";

/// Directory reported for files at the repository root.
pub const ROOT_DIRECTORY: &str = "root";

/// First character of the line that opens each commit in batched output.
pub const COMMIT_MARKER: char = '\u{1e}';

/// `--pretty` placeholder that emits [`COMMIT_MARKER`].
pub const COMMIT_MARKER_FORMAT: &str = "%x1e";

/// Per-file line counts from one numstat line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDelta {
    pub path: String,
    pub lines_added: u64,
    pub lines_removed: u64,
}

impl FileDelta {
    /// Parse one numstat line. Lines with fewer than three fields yield `None`;
    /// non-numeric counts become zero.
    pub fn parse(line: &str) -> Option<Self> {
        let mut fields = line.split_whitespace();
        let added = fields.next()?;
        let removed = fields.next()?;
        let path = fields.next()?;

        Some(Self {
            path: path.to_string(),
            lines_added: added.parse().unwrap_or(0),
            lines_removed: removed.parse().unwrap_or(0),
        })
    }

    /// Substring after the last `.` in the path, or `"unknown"`.
    pub fn extension(&self) -> &str {
        self.path
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .unwrap_or(UNKNOWN_EXTENSION)
    }

    /// First path segment, or `"root"` for top-level files.
    pub fn directory(&self) -> &str {
        self.path
            .split_once('/')
            .map(|(dir, _)| dir)
            .unwrap_or(ROOT_DIRECTORY)
    }

    pub fn churn(&self) -> u64 {
        self.lines_added + self.lines_removed
    }
}

/// Numstat lines belonging to one commit of a batched query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitNumstat {
    pub hash: String,
    pub files: Vec<FileDelta>,
}

impl CommitNumstat {
    pub fn added(&self) -> u64 {
        self.files.iter().map(|f| f.lines_added).sum()
    }

    pub fn removed(&self) -> u64 {
        self.files.iter().map(|f| f.lines_removed).sum()
    }
}

/// Split batched numstat output into per-commit groups.
///
/// Every line starting with [`COMMIT_MARKER`] opens a group for the hash
/// that follows; file lines before the first marker are dropped.
pub fn group_by_commit(raw: &str) -> Vec<CommitNumstat> {
    let mut groups: Vec<CommitNumstat> = Vec::new();

    for line in raw.lines() {
        if let Some(hash) = line.strip_prefix(COMMIT_MARKER) {
            groups.push(CommitNumstat {
                hash: hash.trim().to_string(),
                files: Vec::new(),
            });
        } else if let Some(delta) = FileDelta::parse(line)
            && let Some(current) = groups.last_mut()
        {
            current.files.push(delta);
        }
    }

    groups
}

/// Sum added/removed over every parseable line of `raw`.
pub fn sum_lines(raw: &str) -> (u64, u64) {
    raw.lines()
        .filter_map(FileDelta::parse)
        .fold((0, 0), |(added, removed), delta| {
            (added + delta.lines_added, removed + delta.lines_removed)
        })
}
