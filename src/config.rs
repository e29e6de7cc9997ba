//! Run configuration, built once at startup and passed by parameter.
//!
//! Command-line values win; empty or absent values fall back to the
//! environment variables below.

use std::env;

use crate::error::ConfigError;

/// Environment variable holding the completion service API key.
pub const API_KEY_ENV_VAR: &str = "ARK_API_KEY";

/// Environment variable holding the model endpoint id.
pub const ENDPOINT_ENV_VAR: &str = "DOUBAO_ENDPOINT";

/// Environment variable overriding the completion service base URL.
pub const BASE_URL_ENV_VAR: &str = "ARK_BASE_URL";

/// Default base URL of the OpenAI-compatible completion API.
pub const DEFAULT_BASE_URL: &str = "https://ark.cn-beijing.volces.com/api/v3";

/// Default token budget for the generated question.
pub const DEFAULT_TOKEN_BUDGET: usize = 28 * 1024;

/// Default per-file ceiling (bytes) before a file's hunks are elided.
pub const DEFAULT_FILE_CEILING: usize = 8 * 1024;

/// Limits applied by the diff budgeting engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BudgetConfig {
    pub token_budget: usize,
    pub file_ceiling: usize,
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            token_budget: DEFAULT_TOKEN_BUDGET,
            file_ceiling: DEFAULT_FILE_CEILING,
        }
    }
}

/// Connection settings for the completion service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmConfig {
    pub base_url: String,
    pub endpoint: String,
    pub api_key: String,
    /// System prompt sent with every question.
    pub prompt: String,
}

impl LlmConfig {
    /// Resolve settings from command-line values with environment fallbacks.
    ///
    /// `prompt` falls back to the built-in commit message prompt.
    pub fn resolve(
        api_key: Option<String>,
        endpoint: Option<String>,
        base_url: Option<String>,
        prompt: Option<String>,
    ) -> Result<Self, ConfigError> {
        let api_key =
            flag_or_env(api_key, API_KEY_ENV_VAR).ok_or(ConfigError::MissingApiKey(API_KEY_ENV_VAR))?;
        let endpoint = flag_or_env(endpoint, ENDPOINT_ENV_VAR)
            .ok_or(ConfigError::MissingEndpoint(ENDPOINT_ENV_VAR))?;
        let base_url = flag_or_env(base_url, BASE_URL_ENV_VAR)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let prompt = non_empty(prompt)
            .unwrap_or_else(|| crate::commit::prompt::DEFAULT_PROMPT.to_string());

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            endpoint,
            api_key,
            prompt,
        })
    }
}

/// Limits and refs used when building an author insight report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsightConfig {
    pub top_commits: usize,
    pub top_files: usize,
    pub top_directories: usize,
    /// Main-line refs tried in order; the first that resolves wins.
    pub main_refs: Vec<String>,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            top_commits: 10,
            top_files: 10,
            top_directories: 3,
            main_refs: vec!["main".to_string(), "master".to_string()],
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn flag_or_env(flag: Option<String>, var: &str) -> Option<String> {
    non_empty(flag).or_else(|| non_empty(env::var(var).ok()))
}
