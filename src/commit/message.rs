//! Commit message generation via the completion service.

use std::sync::LazyLock;

use regex_lite::Regex;
use tracing::debug;

use crate::commit::budget::summarize;
use crate::commit::tokens::TokenCounter;
use crate::config::BudgetConfig;
use crate::error::LlmError;
use crate::llm::client::CompletionClient;
use crate::llm::retry::complete_with_retry;

/// A whole answer wrapped in one markdown code fence.
static FENCED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^```[A-Za-z0-9_-]*\s*\n(.*?)\n?```$").unwrap());

/// Generate a commit message for `diff`.
///
/// The diff is bounded by `budget` before it is sent; the answer is
/// stripped of surrounding code fences and whitespace.
pub async fn generate_commit_message<C: CompletionClient + ?Sized>(
    client: &C,
    prompt: &str,
    diff: &str,
    budget: &BudgetConfig,
    counter: &dyn TokenCounter,
) -> Result<String, LlmError> {
    let question = summarize(diff, budget, counter);
    debug!(
        "Commit question: {} tokens of {} allowed ({} bytes of diff)",
        counter.count(&question),
        budget.token_budget,
        diff.len()
    );

    let answer = complete_with_retry(client, prompt, &question).await?;
    let message = clean_answer(&answer);
    if message.is_empty() {
        return Err(LlmError::EmptyAnswer);
    }
    Ok(message)
}

/// Strip a surrounding code fence and outer whitespace.
pub fn clean_answer(answer: &str) -> String {
    let trimmed = answer.trim();
    match FENCED.captures(trimmed).and_then(|caps| caps.get(1)) {
        Some(inner) => inner.as_str().trim().to_string(),
        None => trimmed.to_string(),
    }
}
