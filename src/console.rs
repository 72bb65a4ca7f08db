//! Line-oriented console front end.
//!
//! Generic over its input and output streams so whole games can be played
//! against in-memory buffers.

use crate::{AccountHandle, EngineError, RoundEngine, SessionStats};
use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use tracing::{debug, info, instrument};

/// How a console game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEnd {
    /// The player declined to continue or closed the input.
    PlayerStopped(SessionStats),
    /// Every post was dealt.
    PoolExhausted(SessionStats),
}

impl GameEnd {
    /// Final counters, whichever way the game ended.
    pub fn stats(&self) -> SessionStats {
        match self {
            GameEnd::PlayerStopped(stats) | GameEnd::PoolExhausted(stats) => *stats,
        }
    }
}

/// Prompts, feedback and the play-again loop.
#[derive(Debug)]
pub struct ConsoleGame<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConsoleGame<R, W> {
    /// Creates a console reading from `input` and writing to `output`.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Consumes the console, returning its output stream.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Asks for whichever handles were not supplied up front.
    #[instrument(skip(self))]
    pub fn read_handles(
        &mut self,
        handle1: Option<String>,
        handle2: Option<String>,
    ) -> Result<(AccountHandle, AccountHandle)> {
        if handle1.is_none() || handle2.is_none() {
            writeln!(self.output, "Input two twitter handles (do not include '@' symbol)")?;
        }

        let handle1 = match handle1 {
            Some(handle) => handle,
            None => self
                .prompt("Input handle 1 (ex: kanyewest): ")?
                .context("Input closed before handle 1 was entered")?,
        };
        let handle2 = match handle2 {
            Some(handle) => handle,
            None => self
                .prompt("Input handle 2 (ex: elonmusk): ")?
                .context("Input closed before handle 2 was entered")?,
        };

        Ok((AccountHandle::parse(&handle1), AccountHandle::parse(&handle2)))
    }

    /// Plays rounds until the player stops or the pool runs dry, then prints
    /// the final summary.
    #[instrument(skip_all, fields(pool_size = engine.remaining()))]
    pub fn run(&mut self, engine: &mut RoundEngine) -> Result<GameEnd> {
        // `Some` carries the exhaustion notice; `None` means the player stopped.
        let exhausted = loop {
            let round = match engine.begin_round() {
                Ok(round) => round,
                Err(exhausted @ EngineError::PoolExhausted { .. }) => break Some(exhausted),
                Err(other) => return Err(other.into()),
            };

            let [first, second] = round.accounts().clone();
            writeln!(self.output, "{}", round.post().text())?;
            let question = format!("Who tweeted this? (  {}  ) or (  {}  )? ", first, second);

            let Some(guess) = self.prompt(&question)? else {
                debug!("Input closed mid-round");
                drop(round);
                break None;
            };

            let outcome = round.guess(&guess);
            if *outcome.correct() {
                writeln!(self.output, "Correct")?;
                if *outcome.notable_streak() {
                    writeln!(self.output, "That makes {} in a row!", outcome.streak())?;
                }
            } else {
                writeln!(
                    self.output,
                    "Incorrect: This was tweeted by {}",
                    outcome.true_author()
                )?;
            }

            let again = self.prompt("Play again? (y/n) ")?;
            if !matches!(again.as_deref(), Some("y") | Some("Y")) {
                break None;
            }
        };

        let stats = engine.summary();
        let end = match exhausted {
            Some(notice) => {
                writeln!(self.output, "{}", notice)?;
                GameEnd::PoolExhausted(stats)
            }
            None => {
                writeln!(self.output, "Game Over: {}", stats)?;
                GameEnd::PlayerStopped(stats)
            }
        };
        self.output.flush()?;

        info!(stats = ?end.stats(), "Game finished");
        Ok(end)
    }

    /// Writes `message`, then reads one line with its line ending removed.
    /// Returns `None` at end of input.
    fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read from input")?;
        if read == 0 {
            return Ok(None);
        }

        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }
}
