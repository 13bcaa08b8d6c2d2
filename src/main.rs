mod cmd;
mod config;
mod context;
mod domain;
mod error;
mod infra;
mod services;
#[cfg(test)]
mod testing;
mod workflow;

use std::io;
use std::sync::Arc;

use clap::{ArgAction, CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use crate::cmd::generate::{self, GenerateCommandArgs};
use crate::config::{AppConfig, LOG_VARIABLE};
use crate::context::AppContext;
use crate::error::AppResult;
use crate::infra::clipboard::SystemClipboard;
use crate::infra::git::GitCli;
use crate::infra::llm::GeminiClient;

const AFTER_HELP: &str = "\
SETUP:
    1. Get your Gemini API key from: https://aistudio.google.com/apikey
    2. Set the environment variable: export GOOGLE_AI_TOKEN=your_api_key_here
    3. Run genie in any git repository with changes

    Optional: GENIE_MODEL picks the Gemini model, GENIE_API_URL overrides the
    API base URL, GENIE_LOG sets the log filter (e.g. debug).

DESCRIPTION:
    genie analyzes your git changes and generates a conventional commit
    message with a matching emoji using Google's Gemini AI, then copies it
    to your clipboard.

    Staged changes are analyzed first. Without staged changes genie falls
    back to unstaged changes, then to untracked files.

EXAMPLES:
    genie                              # Generate commit message for changes
    genie \"Bot API 9.0 migration\"      # Generate with context
    genie \"performance improvements\"   # Generate with context
    genie --version                    # Show version
    genie --help                       # Show this help";

/// Describes the command line for `--help`. The mode itself is decided by
/// [`Invocation::from_args`], which only looks at the first token.
#[derive(Parser, Debug)]
#[command(
    name = "genie",
    about = "AI-powered Git commit message generator",
    override_usage = "genie [OPTIONS]\n       genie [CONTEXT]...",
    after_help = AFTER_HELP,
    disable_help_flag = true,
    disable_version_flag = true
)]
#[allow(dead_code)]
struct Cli {
    /// Show this help message
    #[arg(short = 'h', long, action = ArgAction::SetTrue)]
    help: bool,

    /// Show version information
    #[arg(short = 'v', long, action = ArgAction::SetTrue)]
    version: bool,

    /// Optional context to help generate better commit messages
    /// (e.g., "changes from Bot API 9.0", "refactor for performance")
    #[arg(value_name = "CONTEXT", trailing_var_arg = true, allow_hyphen_values = true)]
    context: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Invocation {
    Version,
    Help,
    Run { context: Option<String> },
}

impl Invocation {
    /// Classifies the arguments after the program name. Nothing is ever
    /// rejected: anything other than a leading version or help flag is context.
    fn from_args<I>(args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let args: Vec<String> = args.into_iter().collect();
        match args.first().map(String::as_str) {
            Some("-v" | "--version") => Invocation::Version,
            Some("-h" | "--help") => Invocation::Help,
            None => Invocation::Run { context: None },
            Some(_) => Invocation::Run {
                context: Some(args.join(" ")),
            },
        }
    }
}

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(error) = run().await {
        eprintln!("❌ Error: {error}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_VARIABLE).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

async fn run() -> AppResult<()> {
    let args = std::env::args_os()
        .skip(1)
        .map(|arg| arg.to_string_lossy().into_owned());
    match Invocation::from_args(args) {
        Invocation::Version => {
            println!("{} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Invocation::Help => {
            Cli::command().print_help()?;
            println!();
            Ok(())
        }
        Invocation::Run { context } => run_generate(context).await,
    }
}

async fn run_generate(context: Option<String>) -> AppResult<()> {
    let cwd = std::env::current_dir()?;
    let config = AppConfig::load(&cwd);

    let language_model = Arc::new(GeminiClient::new(
        config.gemini_api_key.clone(),
        config.gemini_model.clone(),
        config.gemini_api_url.clone(),
    )?);
    let git = Arc::new(GitCli::new(config.workspace_root.clone()));
    let clipboard = Arc::new(SystemClipboard::new());

    let ctx = AppContext::new(config, git, language_model, clipboard);

    let mut stdout = io::stdout();
    generate::run(&ctx, GenerateCommandArgs { context }, &mut stdout).await?;
    Ok(())
}
