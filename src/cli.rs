//! Command-line interface for tweet_guess.

use clap::Parser;
use std::path::PathBuf;

/// Tweet Guess - guess which of two accounts wrote each post
#[derive(Parser, Debug)]
#[command(name = "tweet_guess")]
#[command(about = "Guess which of two accounts wrote each post", long_about = None)]
#[command(version)]
pub struct Cli {
    /// First account handle (prompted for when omitted)
    #[arg(long)]
    pub handle1: Option<String>,

    /// Second account handle (prompted for when omitted)
    #[arg(long)]
    pub handle2: Option<String>,

    /// Path to a TOML game config
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Play offline from a TOML fixture of posts instead of the HTTP API
    #[arg(long)]
    pub fixture: Option<PathBuf>,

    /// Seed for a reproducible dealing order
    #[arg(long)]
    pub seed: Option<u64>,

    /// Upper bound on posts requested per account
    #[arg(long)]
    pub max_items: Option<u32>,
}
