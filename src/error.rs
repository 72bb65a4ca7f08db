//! Round engine error types.

use crate::AccountHandle;
use crate::source::SourceError;
use derive_more::{Display, Error};

/// Failures surfaced by the round engine.
///
/// All three end the session; none are retried. `PoolExhausted` is the
/// ordinary way a game runs out of material.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum EngineError {
    /// The engine was configured with unusable accounts or posts.
    #[display("invalid configuration: {reason}")]
    InvalidConfiguration {
        /// What was wrong with the configuration.
        reason: String,
    },

    /// The content source failed for one of the accounts.
    #[display("API call unsuccessful for handle '{account}': {reason}")]
    SourceUnavailable {
        /// Account whose fetch failed.
        account: AccountHandle,
        /// Failure reported by the source.
        #[error(source)]
        reason: SourceError,
    },

    /// Every post has been dealt.
    #[display(
        "No more tweets remain - Game Over. You played {rounds_played} round(s) and had {score} correct answer(s)"
    )]
    PoolExhausted {
        /// Rounds played when the pool ran dry.
        rounds_played: u32,
        /// Correct guesses when the pool ran dry.
        score: u32,
    },
}

impl EngineError {
    /// Returns true for the normal end-of-material condition.
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::PoolExhausted { .. })
    }
}
