//! Error types for commitron modules using thiserror.

use thiserror::Error;

/// Errors from git log/diff command invocations.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("git executable not found. Install git and make sure it is on PATH")]
    NotInstalled,

    #[error("Failed to run git {operation}: {source}")]
    SpawnFailed {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("git {operation} exited with code {code}: {stderr}")]
    NonZeroExit {
        operation: String,
        code: i32,
        stderr: String,
    },

    #[error("None of the main branch refs ({}) could be resolved: {last_error}", .refs.join(", "))]
    MainRefNotFound {
        refs: Vec<String>,
        #[source]
        last_error: Box<GitError>,
    },
}

/// Errors from the text-completion service.
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Completion request failed: {0}")]
    RequestFailed(#[source] reqwest::Error),

    #[error("Completion API returned {status}: {body}")]
    ApiError { status: u16, body: String },

    #[error("Unexpected completion response: {0}")]
    InvalidResponse(String),

    #[error("Completion service returned an empty answer")]
    EmptyAnswer,

    #[error("All retry attempts failed: {0}")]
    RetriesExhausted(#[source] Box<LlmError>),
}

/// Errors from resolving command-line and environment configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Please provide the diff information using --diff (or -d) or standard input")]
    MissingDiff,

    #[error("Please provide the API key using --api-key or the {0} environment variable")]
    MissingApiKey(&'static str),

    #[error("Please provide the endpoint using --endpoint or the {0} environment variable")]
    MissingEndpoint(&'static str),

    #[error("Failed to load tokenizer: {0}")]
    TokenizerLoad(String),
}
