//! AI-generated commit messages from bounded diffs.

pub mod budget;
pub mod message;
pub mod prompt;
pub mod tokens;

pub use budget::{DIFF_HEADER, FILE_DELIMITER, condense_large_files, summarize, truncate_to_budget};
pub use message::{clean_answer, generate_commit_message};
pub use prompt::DEFAULT_PROMPT;
pub use tokens::{BpeCounter, CharCounter, TokenCounter, Tokenizer};
