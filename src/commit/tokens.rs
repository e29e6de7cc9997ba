//! Token counting used to measure the diff budget.

use clap::ValueEnum;
use tiktoken_rs::CoreBPE;

use crate::error::ConfigError;

/// Measures text in the units the budget is expressed in.
pub trait TokenCounter {
    fn count(&self, text: &str) -> usize;
}

/// Counts Unicode code points.
#[derive(Debug, Clone, Copy, Default)]
pub struct CharCounter;

impl TokenCounter for CharCounter {
    fn count(&self, text: &str) -> usize {
        text.chars().count()
    }
}

/// Counts `cl100k_base` BPE tokens.
pub struct BpeCounter {
    bpe: CoreBPE,
}

impl BpeCounter {
    pub fn cl100k() -> Result<Self, ConfigError> {
        let bpe = tiktoken_rs::cl100k_base().map_err(|e| ConfigError::TokenizerLoad(e.to_string()))?;
        Ok(Self { bpe })
    }
}

impl TokenCounter for BpeCounter {
    fn count(&self, text: &str) -> usize {
        self.bpe.encode_ordinary(text).len()
    }
}

/// Tokenizer selectable from the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Tokenizer {
    /// Unicode code points
    #[default]
    Chars,
    /// OpenAI cl100k_base BPE tokens
    Cl100k,
}

impl Tokenizer {
    pub fn counter(self) -> Result<Box<dyn TokenCounter>, ConfigError> {
        match self {
            Tokenizer::Chars => Ok(Box::new(CharCounter)),
            Tokenizer::Cl100k => Ok(Box::new(BpeCounter::cl100k()?)),
        }
    }
}
