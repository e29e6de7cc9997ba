//! Diff budgeting: compress an arbitrarily large unified diff into a
//! question that fits the token budget.
//!
//! Small diffs pass through untouched. Large ones first lose the bodies of
//! oversized files (file markers and hunk headers survive), then, as a last
//! resort, get cut at a code-point boundary.

use std::borrow::Cow;

use tracing::debug;

use crate::commit::tokens::TokenCounter;
use crate::config::BudgetConfig;

/// Header line placed in front of every diff before measuring.
pub const DIFF_HEADER: &str = "DiffInfo:\n";

/// Literal separating per-file blocks in a unified git diff.
pub const FILE_DELIMITER: &str = "diff --git";

/// Line prefixes kept when a file's hunks are elided.
const STRUCTURAL_PREFIXES: [&str; 3] = ["--- a/", "+++ b/", "@@ "];

const LARGE_DIFF_START: &str = "--Large Diff Start --";

/// Build the bounded question for `diff`.
///
/// The result never exceeds `config.token_budget` as measured by `counter`,
/// provided the budget can hold the header itself.
pub fn summarize(diff: &str, config: &BudgetConfig, counter: &dyn TokenCounter) -> String {
    let question = format!("{DIFF_HEADER}{diff}");
    let initial = counter.count(&question);
    if initial <= config.token_budget {
        return question;
    }

    let condensed = format!("{DIFF_HEADER}{}", condense_large_files(diff, config.file_ceiling));
    let after_condense = counter.count(&condensed);
    debug!(
        "Diff question condensed from {} to {} tokens (budget {})",
        initial, after_condense, config.token_budget
    );
    if after_condense <= config.token_budget {
        return condensed;
    }

    truncate_to_budget(&condensed, config.token_budget, counter)
}

/// Replace the body of every file block longer than `ceiling` bytes with
/// its structural lines only.
pub fn condense_large_files(diff: &str, ceiling: usize) -> String {
    diff.split(FILE_DELIMITER)
        .map(|segment| {
            if segment.len() <= ceiling {
                Cow::Borrowed(segment)
            } else {
                Cow::Owned(condense_segment(segment, ceiling))
            }
        })
        .collect::<Vec<_>>()
        .join(FILE_DELIMITER)
}

fn condense_segment(segment: &str, ceiling: usize) -> String {
    let mut lines = vec![format!("\n{LARGE_DIFF_START}")];
    lines.extend(
        segment
            .split('\n')
            .filter(|line| is_structural(line))
            .map(str::to_string),
    );
    lines.push(format!(
        "--Large Diff End -- (elided, exceeded {ceiling} bytes)\n"
    ));
    lines.join("\n")
}

fn is_structural(line: &str) -> bool {
    STRUCTURAL_PREFIXES
        .iter()
        .any(|prefix| line.starts_with(prefix))
}

/// Cut `text` to the longest code-point prefix whose count fits `budget`.
///
/// Starts at `budget` code points, which is exact for code-point counters;
/// counters that can report more tokens than code points fall through to a
/// binary search.
pub fn truncate_to_budget(text: &str, budget: usize, counter: &dyn TokenCounter) -> String {
    let total_chars = text.chars().count();
    let first_guess = budget.min(total_chars);
    let candidate = prefix_chars(text, first_guess);
    if counter.count(candidate) <= budget {
        return candidate.to_string();
    }

    // `lo` always fits, `hi` never does.
    let (mut lo, mut hi) = (0, first_guess);
    while hi - lo > 1 {
        let mid = lo + (hi - lo) / 2;
        if counter.count(prefix_chars(text, mid)) <= budget {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    prefix_chars(text, lo).to_string()
}

fn prefix_chars(text: &str, n: usize) -> &str {
    match text.char_indices().nth(n) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
