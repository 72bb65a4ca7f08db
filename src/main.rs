//! Tweet Guess - console trivia game.
//!
//! Fetches posts from two accounts and asks the player who wrote each one.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use std::io;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;
use tweet_guess::{
    ConsoleGame, ContentSource, FixtureSource, GameConfig, RoundEngine, TimelineClient,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    run(cli).await
}

/// Loads configuration, builds the engine and plays one game.
#[instrument(skip_all)]
async fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => GameConfig::from_file(path)?,
        None => GameConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    if let Some(max_items) = cli.max_items {
        config = config.with_max_items(max_items)?;
    }

    let stdin = io::stdin();
    let mut console = ConsoleGame::new(stdin.lock(), io::stdout());
    let (handle1, handle2) = console.read_handles(cli.handle1, cli.handle2)?;

    let source: Box<dyn ContentSource> = match &cli.fixture {
        Some(path) => {
            info!(path = %path.display(), "Playing from fixture");
            Box::new(FixtureSource::from_file(path)?)
        }
        None => Box::new(TimelineClient::new(
            config.api_url().clone(),
            config.bearer_token()?,
        )),
    };

    let mut engine = RoundEngine::create(
        source.as_ref(),
        handle1,
        handle2,
        &config.fetch_request(),
        &config.post_filter(),
        *config.seed(),
    )
    .await?
    .with_streak_threshold(*config.streak_threshold());

    console.run(&mut engine)?;
    Ok(())
}
