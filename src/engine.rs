//! Round-state engine: deals posts, scores guesses, tracks streaks.
//!
//! The engine owns the pool and the session counters. It never drives the
//! game loop itself; callers play rounds until they stop or the engine
//! reports [`EngineError::PoolExhausted`].
//!
//! A round is a consuming transition: [`RoundEngine::begin_round`] deals a
//! post and hands back a [`PendingRound`], which accepts exactly one guess.

use crate::config::DEFAULT_STREAK_THRESHOLD;
use crate::source::{ContentSource, FetchRequest};
use crate::{AccountHandle, EngineError, Post, PostFilter, PostPool};
use derive_getters::Getters;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, instrument, warn};

/// Score counters for the current session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Getters, derive_more::Display)]
#[display("You played {rounds_played} round(s) and had {score} correct answer(s)")]
pub struct SessionStats {
    /// Correct guesses.
    score: u32,
    /// Consecutive correct guesses; zero after any miss.
    streak: u32,
    /// Rounds dealt through [`RoundEngine::begin_round`] or [`RoundEngine::play_round`].
    rounds_played: u32,
}

/// Everything a caller needs to render feedback for one round.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct RoundOutcome {
    /// The post that was dealt.
    post: Post,
    /// Whether the guess named the author.
    correct: bool,
    /// Streak after scoring this round.
    streak: u32,
    /// Whether the streak has reached the notable threshold.
    notable_streak: bool,
}

impl RoundOutcome {
    /// The account that actually wrote the post.
    pub fn true_author(&self) -> &AccountHandle {
        self.post.author()
    }
}

/// The two-account guessing game state.
#[derive(Debug, Clone)]
pub struct RoundEngine {
    accounts: [AccountHandle; 2],
    pool: PostPool,
    rng: ChaCha8Rng,
    stats: SessionStats,
    streak_threshold: u32,
}

// ─────────────────────────────────────────────────────────────
//  Construction
// ─────────────────────────────────────────────────────────────

impl RoundEngine {
    /// Fetches both accounts' posts and builds a fresh session.
    ///
    /// `account1` is fetched before `account2`. Identical handles are
    /// rejected before the source is contacted.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidConfiguration`] if the handles are equal
    /// - [`EngineError::SourceUnavailable`] if either fetch fails
    #[instrument(skip(source, filter), fields(account1 = %account1, account2 = %account2))]
    pub async fn create<S>(
        source: &S,
        account1: AccountHandle,
        account2: AccountHandle,
        request: &FetchRequest,
        filter: &PostFilter,
        seed: Option<u64>,
    ) -> Result<Self, EngineError>
    where
        S: ContentSource + ?Sized,
    {
        ensure_distinct(&account1, &account2)?;

        let mut posts = Vec::new();
        for account in [&account1, &account2] {
            let raw = source.fetch(account, request).await.map_err(|reason| {
                warn!(account = %account, error = %reason, "Content source failed");
                EngineError::SourceUnavailable {
                    account: account.clone(),
                    reason,
                }
            })?;
            posts.extend(filter.apply(account, raw));
        }

        let engine = Self::build(account1, account2, PostPool::new(posts), seed);
        info!(pool_size = engine.pool.len(), "Engine ready");
        Ok(engine)
    }

    /// Builds a session from posts already in hand.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfiguration`] if the handles are equal
    /// or a post names some other author.
    #[instrument(skip(posts), fields(account1 = %account1, account2 = %account2))]
    pub fn from_posts(
        account1: AccountHandle,
        account2: AccountHandle,
        posts: impl IntoIterator<Item = Post>,
        seed: Option<u64>,
    ) -> Result<Self, EngineError> {
        ensure_distinct(&account1, &account2)?;

        let posts: Vec<Post> = posts.into_iter().collect();
        if let Some(stray) = posts
            .iter()
            .find(|p| p.author() != &account1 && p.author() != &account2)
        {
            return Err(EngineError::InvalidConfiguration {
                reason: format!("post author '{}' is not one of the two handles", stray.author()),
            });
        }

        Ok(Self::build(account1, account2, PostPool::new(posts), seed))
    }

    fn build(
        account1: AccountHandle,
        account2: AccountHandle,
        pool: PostPool,
        seed: Option<u64>,
    ) -> Self {
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        Self {
            accounts: [account1, account2],
            pool,
            rng,
            stats: SessionStats::default(),
            streak_threshold: DEFAULT_STREAK_THRESHOLD,
        }
    }

    /// Sets the streak length reported as notable.
    pub fn with_streak_threshold(mut self, threshold: u32) -> Self {
        self.streak_threshold = threshold;
        self
    }
}

#[instrument]
fn ensure_distinct(account1: &AccountHandle, account2: &AccountHandle) -> Result<(), EngineError> {
    if account1 == account2 {
        warn!("Identical handles rejected");
        return Err(EngineError::InvalidConfiguration {
            reason: format!("handles can not be the same ('{}' given twice)", account1),
        });
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────
//  Dealing and scoring
// ─────────────────────────────────────────────────────────────

impl RoundEngine {
    /// Removes a random post from the pool without scoring anything.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::PoolExhausted`] when nothing is left; the
    /// session counters are untouched.
    #[instrument(skip(self), fields(pool_size = self.pool.len()))]
    pub fn deal_next(&mut self) -> Result<Post, EngineError> {
        self.pool.deal(&mut self.rng).ok_or_else(|| {
            info!(
                rounds_played = self.stats.rounds_played,
                score = self.stats.score,
                "Pool exhausted"
            );
            EngineError::PoolExhausted {
                rounds_played: self.stats.rounds_played,
                score: self.stats.score,
            }
        })
    }

    /// Deals a post and opens a round awaiting one guess.
    ///
    /// The round counts as played as soon as the post is dealt.
    ///
    /// # Errors
    ///
    /// Propagates [`EngineError::PoolExhausted`] from [`Self::deal_next`].
    #[instrument(skip(self))]
    pub fn begin_round(&mut self) -> Result<PendingRound<'_>, EngineError> {
        let post = self.deal_next()?;
        self.stats.rounds_played += 1;
        debug!(round = self.stats.rounds_played, "Round dealt");

        Ok(PendingRound {
            engine: self,
            post,
            resolved: false,
        })
    }

    /// Deals a post and scores `guess` against its author.
    ///
    /// # Errors
    ///
    /// Propagates [`EngineError::PoolExhausted`] from [`Self::deal_next`].
    #[instrument(skip(self))]
    pub fn play_round(&mut self, guess: &str) -> Result<RoundOutcome, EngineError> {
        Ok(self.begin_round()?.guess(guess))
    }

    fn record_guess(&mut self, post: Post, guess: &str) -> RoundOutcome {
        let correct = post.author().matches(guess);
        if correct {
            self.stats.score += 1;
            self.stats.streak += 1;
        } else {
            self.stats.streak = 0;
        }

        info!(
            correct,
            score = self.stats.score,
            streak = self.stats.streak,
            "Round scored"
        );

        RoundOutcome {
            post,
            correct,
            streak: self.stats.streak,
            notable_streak: correct && self.stats.streak >= self.streak_threshold,
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Accessors
// ─────────────────────────────────────────────────────────────

impl RoundEngine {
    /// Current counters, also the end-of-game summary.
    pub fn summary(&self) -> SessionStats {
        self.stats
    }

    /// Number of posts not yet dealt.
    pub fn remaining(&self) -> usize {
        self.pool.len()
    }

    /// Number of posts the session started with.
    pub fn initial_pool_size(&self) -> usize {
        self.pool.initial_size()
    }

    /// Posts not yet dealt.
    pub fn pool(&self) -> &PostPool {
        &self.pool
    }
}

// ─────────────────────────────────────────────────────────────
//  Pending round
// ─────────────────────────────────────────────────────────────

/// A dealt post waiting for its single guess.
///
/// Dropping it without calling [`PendingRound::guess`] forfeits the round:
/// no point is scored and the streak resets.
#[derive(Debug)]
#[must_use = "a dealt round is forfeited unless guessed"]
pub struct PendingRound<'a> {
    engine: &'a mut RoundEngine,
    post: Post,
    resolved: bool,
}

impl PendingRound<'_> {
    /// The post to show the player.
    pub fn post(&self) -> &Post {
        &self.post
    }

    /// The two accounts the player chooses between.
    pub fn accounts(&self) -> &[AccountHandle; 2] {
        &self.engine.accounts
    }

    /// Scores `guess` and closes the round.
    #[instrument(skip(self))]
    pub fn guess(mut self, guess: &str) -> RoundOutcome {
        self.resolved = true;
        let post = self.post.clone();
        self.engine.record_guess(post, guess)
    }
}

impl Drop for PendingRound<'_> {
    fn drop(&mut self) {
        if !self.resolved {
            warn!("Round dropped without a guess, streak reset");
            self.engine.stats.streak = 0;
        }
    }
}
