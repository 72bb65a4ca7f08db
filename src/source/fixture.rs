//! Canned content source for offline play and tests.

use super::{ContentSource, FetchRequest, SourceError};
use crate::{AccountHandle, ConfigError};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Deserialize)]
struct FixtureFile {
    accounts: HashMap<AccountHandle, Vec<String>>,
}

/// Serves fixed texts per account from memory.
///
/// Accounts without an entry are rejected with status 404. Every fetch is
/// recorded so callers can see which accounts were asked for.
#[derive(Debug, Default)]
pub struct FixtureSource {
    accounts: HashMap<AccountHandle, Vec<String>>,
    failures: HashMap<AccountHandle, SourceError>,
    requests: Mutex<Vec<AccountHandle>>,
}

impl FixtureSource {
    /// Creates an empty source that rejects every account.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds texts for `account`, replacing any previous entry.
    pub fn with_account<I, S>(mut self, account: impl Into<AccountHandle>, texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.accounts
            .insert(account.into(), texts.into_iter().map(Into::into).collect());
        self
    }

    /// Makes every fetch for `account` fail with `error`.
    pub fn with_failure(mut self, account: impl Into<AccountHandle>, error: SourceError) -> Self {
        self.failures.insert(account.into(), error);
        self
    }

    /// Parses a fixture from TOML text.
    ///
    /// ```toml
    /// [accounts]
    /// kanyewest = ["first post", "second post"]
    /// elonmusk = ["another post"]
    /// ```
    #[instrument(skip(content))]
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let file: FixtureFile = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse fixture: {}", e)))?;

        info!(accounts = file.accounts.len(), "Fixture loaded");
        Ok(Self {
            accounts: file.accounts,
            ..Self::default()
        })
    }

    /// Loads a fixture from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading fixture from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read fixture file: {}", e)))?;
        Self::from_toml_str(&content)
    }

    /// Accounts fetched so far, in call order.
    pub fn requests(&self) -> Vec<AccountHandle> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait::async_trait]
impl ContentSource for FixtureSource {
    #[instrument(skip(self, account), fields(account = %account))]
    async fn fetch(
        &self,
        account: &AccountHandle,
        request: &FetchRequest,
    ) -> Result<Vec<String>, SourceError> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(account.clone());

        if let Some(error) = self.failures.get(account) {
            warn!(error = %error, "Fixture configured to fail");
            return Err(error.clone());
        }

        let texts = self
            .accounts
            .get(account)
            .ok_or(SourceError::Rejected { status: 404 })?;

        let limit = usize::try_from(*request.max_items()).unwrap_or(usize::MAX);
        Ok(texts.iter().take(limit).cloned().collect())
    }
}
