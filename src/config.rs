// Command line and environment configuration.

use std::path::PathBuf;

use clap::Parser;

use crate::cache::paths;
use crate::github::MAX_PER_PAGE;

const DEFAULT_API_URL: &str = "https://api.github.com";

#[derive(Parser, Debug)]
#[command(name = "gitmarks")]
#[command(about = "Browse a GitHub user's starred repositories")]
#[command(version)]
pub struct Args {
    /// GitHub username, or a path/URL whose first segment is the username
    pub location: String,

    /// Base URL of the GitHub REST API
    #[arg(long, env = "GITMARKS_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Token for authenticated requests (higher rate limits)
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Directory for cached snapshots and the log file
    #[arg(long, env = "GITMARKS_CACHE_DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Drop the cached list and fetch again
    #[arg(long)]
    pub reload: bool,

    /// Only show repositories in this language ("All" shows everything)
    #[arg(short, long)]
    pub language: Option<String>,

    /// Print the list to stdout instead of opening the TUI
    #[arg(long)]
    pub plain: bool,

    /// Keep the cache in memory for this run only
    #[arg(long)]
    pub ephemeral: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Resolved settings shared by the client, the store, and the app.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub token: Option<String>,
    pub cache_dir: PathBuf,
    pub page_size: u32,
}

impl Config {
    pub fn from_args(args: &Args) -> Self {
        let cache_dir = args
            .cache_dir
            .clone()
            .or_else(paths::cache_dir)
            .unwrap_or_else(|| std::env::temp_dir().join("gitmarks"));

        Self {
            api_url: args.api_url.clone(),
            token: args.token.clone().filter(|t| !t.trim().is_empty()),
            cache_dir,
            page_size: MAX_PER_PAGE,
        }
    }
}
