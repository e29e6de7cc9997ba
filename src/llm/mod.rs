//! Text-completion service access.

pub mod client;
pub mod retry;

pub use client::{ArkClient, ChatMessage, CompletionClient, Role};
pub use retry::{complete_with_retry, retry_with_backoff};
