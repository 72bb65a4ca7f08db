//! Tweet Guess library - the two-account guessing game
//!
//! Posts from two accounts are fetched, stripped of give-aways, pooled and
//! dealt one at a time; the player guesses who wrote each one.
//!
//! # Architecture
//!
//! - **Source**: where raw texts come from (HTTP timeline or fixture)
//! - **Filter**: drops texts with mentions or shortened links
//! - **Engine**: pool, dealing, scoring and streaks
//! - **Console**: prompts and the play-again loop
//!
//! # Example
//!
//! ```
//! use tweet_guess::{AccountHandle, Post, RoundEngine};
//!
//! let a = AccountHandle::from("A");
//! let b = AccountHandle::from("B");
//! let mut engine = RoundEngine::from_posts(
//!     a.clone(),
//!     b,
//!     vec![Post::new("x", a)],
//!     Some(1),
//! )?;
//!
//! let outcome = engine.play_round("A")?;
//! assert!(*outcome.correct());
//! assert!(engine.play_round("A").is_err());
//! # Ok::<(), tweet_guess::EngineError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod account;
mod config;
mod console;
mod engine;
mod error;
mod pool;
mod post;
pub mod source;

// Crate-level exports - Accounts and posts
pub use account::AccountHandle;
pub use post::{LINK_MARKER, MENTION_MARKER, Post, PostFilter};

// Crate-level exports - Configuration
pub use config::{BEARER_TOKEN_VAR, ConfigError, DEFAULT_STREAK_THRESHOLD, GameConfig};

// Crate-level exports - Engine
pub use engine::{PendingRound, RoundEngine, RoundOutcome, SessionStats};
pub use error::EngineError;
pub use pool::PostPool;

// Crate-level exports - Content sources
pub use source::{ContentSource, FetchRequest, FixtureSource, SourceError, TimelineClient};

// Crate-level exports - Console
pub use console::{ConsoleGame, GameEnd};
