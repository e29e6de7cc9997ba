//! commitron - CLI entry point.

use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::debug;

use commitron::commit::{Tokenizer, generate_commit_message, summarize};
use commitron::config::{BudgetConfig, DEFAULT_FILE_CEILING, DEFAULT_TOKEN_BUDGET, InsightConfig, LlmConfig};
use commitron::error::ConfigError;
use commitron::git::GitCli;
use commitron::insight::{build_insight, render_text};
use commitron::llm::ArkClient;
use commitron::logging::init_logging;

/// Commit messages from diffs, and commit insights per author.
#[derive(Parser, Debug)]
#[command(name = "commitron")]
#[command(about = "Generate commit messages with an LLM and analyze commit history")]
#[command(version)]
struct Cli {
    /// Enable debug logging on stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a commit message for a diff
    Comment(CommentArgs),

    /// Report commit statistics for an author
    Insight(InsightArgs),
}

#[derive(Args, Debug)]
struct CommentArgs {
    /// Diff text (read from stdin when omitted and stdin is piped)
    #[arg(short, long)]
    diff: Option<String>,

    /// API key for the completion service (falls back to ARK_API_KEY)
    #[arg(long)]
    api_key: Option<String>,

    /// Model endpoint id (falls back to DOUBAO_ENDPOINT)
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Completion API base URL (falls back to ARK_BASE_URL)
    #[arg(long)]
    base_url: Option<String>,

    /// Custom system prompt replacing the built-in one
    #[arg(short, long)]
    prompt: Option<String>,

    /// Token budget for the question sent to the model
    #[arg(long, default_value_t = DEFAULT_TOKEN_BUDGET)]
    budget: usize,

    /// Per-file size in bytes above which a file's hunks are elided
    #[arg(long, default_value_t = DEFAULT_FILE_CEILING)]
    file_ceiling: usize,

    /// Token counting method
    #[arg(long, value_enum, default_value_t = Tokenizer::Chars)]
    tokenizer: Tokenizer,

    /// Print the bounded question instead of calling the service
    #[arg(long)]
    dry_run: bool,
}

#[derive(Args, Debug)]
struct InsightArgs {
    /// Author name or email substring (case-sensitive)
    author: String,

    /// Repository to analyze
    #[arg(short, long, default_value = ".")]
    repo: PathBuf,

    /// Number of top commits and files to list
    #[arg(long, default_value_t = 10)]
    top: usize,

    /// Emit the report as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Comment(args) => run_comment(args).await,
        Command::Insight(args) => run_insight(args),
    }
}

async fn run_comment(args: CommentArgs) -> Result<()> {
    let diff = read_diff(args.diff).context("No diff to describe")?;
    let budget = BudgetConfig {
        token_budget: args.budget,
        file_ceiling: args.file_ceiling,
    };
    let counter = args
        .tokenizer
        .counter()
        .context("Failed to set up token counting")?;

    if args.dry_run {
        println!("{}", summarize(&diff, &budget, counter.as_ref()));
        return Ok(());
    }

    let config = LlmConfig::resolve(args.api_key, args.endpoint, args.base_url, args.prompt)
        .context("Completion service is not configured")?;
    let client = ArkClient::new(&config).context("Failed to create completion client")?;
    debug!("Using endpoint {}", client.endpoint());

    let message =
        generate_commit_message(&client, &config.prompt, &diff, &budget, counter.as_ref())
            .await
            .context("Failed to generate commit message")?;

    println!("{}", message);
    Ok(())
}

/// Take the diff from the flag, or from stdin when it is piped.
fn read_diff(flag: Option<String>) -> Result<String, ConfigError> {
    if let Some(diff) = flag.filter(|d| !d.trim().is_empty()) {
        return Ok(diff);
    }

    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Err(ConfigError::MissingDiff);
    }

    let mut diff = String::new();
    stdin
        .lock()
        .read_to_string(&mut diff)
        .map_err(|_| ConfigError::MissingDiff)?;
    if diff.trim().is_empty() {
        return Err(ConfigError::MissingDiff);
    }
    Ok(diff)
}

fn run_insight(args: InsightArgs) -> Result<()> {
    GitCli::check_installed().context("git is required for insight reports")?;

    let source = GitCli::new(&args.repo);
    let config = InsightConfig {
        top_commits: args.top,
        top_files: args.top,
        ..InsightConfig::default()
    };

    let report = build_insight(&source, &args.author, &config).with_context(|| {
        format!(
            "Failed to read history of {} for author {:?}",
            args.repo.display(),
            args.author
        )
    })?;

    if args.json {
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{}", json);
    } else {
        print!("{}", render_text(&report));
    }

    Ok(())
}
