//! Game configuration loaded from TOML and the environment.

use crate::source::{DEFAULT_API_URL, DEFAULT_MAX_ITEMS, FetchRequest};
use crate::{LINK_MARKER, MENTION_MARKER, PostFilter};
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Environment variable holding the API bearer token.
pub const BEARER_TOKEN_VAR: &str = "TWEET_GUESS_BEARER_TOKEN";

/// Streak length at which a run of correct guesses is called out.
pub const DEFAULT_STREAK_THRESHOLD: u32 = 3;

/// Settings for one game. Every field has a default, so an empty file is valid.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// Timeline endpoint.
    #[serde(default = "default_api_url")]
    api_url: String,

    /// Whether reposts are requested from the source.
    #[serde(default)]
    include_reposts: bool,

    /// Upper bound on posts requested per account.
    #[serde(default = "default_max_items")]
    max_items: u32,

    /// Substring marking a mention.
    #[serde(default = "default_mention_marker")]
    mention_marker: String,

    /// Substring marking a shortened link.
    #[serde(default = "default_link_marker")]
    link_marker: String,

    /// Streak length reported as notable.
    #[serde(default = "default_streak_threshold")]
    streak_threshold: u32,

    /// Seed for dealing order; random when absent.
    #[serde(default)]
    seed: Option<u64>,
}

#[instrument]
fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

#[instrument]
fn default_max_items() -> u32 {
    DEFAULT_MAX_ITEMS
}

#[instrument]
fn default_mention_marker() -> String {
    MENTION_MARKER.to_string()
}

#[instrument]
fn default_link_marker() -> String {
    LINK_MARKER.to_string()
}

#[instrument]
fn default_streak_threshold() -> u32 {
    DEFAULT_STREAK_THRESHOLD
}

#[track_caller]
fn validate_max_items(max_items: u32) -> Result<(), ConfigError> {
    if max_items == 0 {
        return Err(ConfigError::new("max_items must be at least 1"));
    }
    Ok(())
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            include_reposts: false,
            max_items: default_max_items(),
            mention_marker: default_mention_marker(),
            link_marker: default_link_marker(),
            streak_threshold: default_streak_threshold(),
            seed: None,
        }
    }
}

impl GameConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        Self::from_toml_str(&content)
    }

    /// Parses configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        validate_max_items(config.max_items)?;

        info!(api_url = %config.api_url, max_items = config.max_items, "Config loaded successfully");
        Ok(config)
    }

    /// Overrides the dealing seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Overrides the per-account item bound.
    pub fn with_max_items(mut self, max_items: u32) -> Result<Self, ConfigError> {
        validate_max_items(max_items)?;
        self.max_items = max_items;
        Ok(self)
    }

    /// Builds the fetch parameters sent to the content source.
    pub fn fetch_request(&self) -> FetchRequest {
        FetchRequest::new(self.include_reposts, self.max_items)
    }

    /// Builds the give-away filter from the configured markers.
    pub fn post_filter(&self) -> PostFilter {
        PostFilter::new(vec![self.mention_marker.clone(), self.link_marker.clone()])
    }

    /// Reads the bearer token from the environment.
    #[instrument(skip(self))]
    pub fn bearer_token(&self) -> Result<String, ConfigError> {
        std::env::var(BEARER_TOKEN_VAR).map_err(|_| {
            ConfigError::new(format!("{} environment variable not set", BEARER_TOKEN_VAR))
        })
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
