//! Account identifiers for the two posters in a game.

use derive_more::{Display, From};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Short handle naming a social-media poster (no leading `@`).
///
/// Comparison is case-sensitive and exact: `Elon` and `elon` are two
/// different accounts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountHandle(String);

impl AccountHandle {
    /// Creates a handle from free-text input.
    ///
    /// Surrounding whitespace is trimmed and a single leading `@` is dropped.
    #[instrument(skip(raw))]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let bare = trimmed.strip_prefix('@').unwrap_or(trimmed);
        Self(bare.to_string())
    }

    /// Returns the handle as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if `guess` names this account, by exact match.
    pub fn matches(&self, guess: &str) -> bool {
        self.0 == guess
    }
}

impl AsRef<str> for AccountHandle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AccountHandle {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}
